//! # Geometry 模块
//!
//! 水波纹使用的基础几何类型：整数像素矩形与二维向量。

use serde::{Deserialize, Serialize};

/// 线性插值
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// 二维向量
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    /// 创建新的向量
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// 线性插值
    pub fn lerp(self, other: Self, t: f32) -> Self {
        Self {
            x: lerp(self.x, other.x, t),
            y: lerp(self.y, other.y, t),
        }
    }
}

/// 像素矩形
///
/// 左/上边界包含，右/下边界不包含。
/// 作为内边距使用时，四个字段分别表示各边的缩进量。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Rect {
    /// 创建矩形
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// 原点在 (0, 0) 的矩形
    pub const fn from_size(width: i32, height: i32) -> Self {
        Self::new(0, 0, width, height)
    }

    /// 全零矩形（无内边距）
    pub const fn zero() -> Self {
        Self::new(0, 0, 0, 0)
    }

    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }

    /// 宽或高不为正
    pub fn is_empty(&self) -> bool {
        self.left >= self.right || self.top >= self.bottom
    }

    /// 点是否落在矩形内
    ///
    /// 坐标先向零截断到像素网格再比较；空矩形不包含任何点。
    pub fn contains(&self, x: f32, y: f32) -> bool {
        if self.is_empty() || !x.is_finite() || !y.is_finite() {
            return false;
        }
        let (x, y) = (x.trunc(), y.trunc());
        x >= self.left as f32
            && x < self.right as f32
            && y >= self.top as f32
            && y < self.bottom as f32
    }
}
