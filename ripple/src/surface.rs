//! # Surface 模块
//!
//! 绘制接口。水波纹只需要"画一个圆"这一种能力，
//! 填充还是描边、alpha 与线宽都由 [`Paint`] 携带。

use serde::{Deserialize, Serialize};

use crate::geometry::Vec2;

/// 画笔样式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaintStyle {
    /// 实心填充
    #[default]
    Fill,
    /// 描边（线宽由 `stroke_width` 决定，描边中心线落在半径上）
    Stroke,
}

/// 画笔
///
/// 由调用方持有。渲染时会改写 `alpha`、`style` 与 `stroke_width`，颜色保持不变。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Paint {
    /// RGB 颜色
    pub color: [u8; 3],
    /// 透明度 (0 - 255)
    pub alpha: u8,
    pub style: PaintStyle,
    pub stroke_width: f32,
}

impl Default for Paint {
    fn default() -> Self {
        Self {
            color: [0, 0, 0],
            alpha: 255,
            style: PaintStyle::Fill,
            stroke_width: 0.0,
        }
    }
}

impl Paint {
    /// 指定颜色的不透明填充画笔
    pub fn with_color(color: [u8; 3]) -> Self {
        Self {
            color,
            ..Self::default()
        }
    }
}

/// 可绘制圆形的表面
pub trait DrawSurface {
    fn draw_circle(&mut self, center: Vec2, radius: f32, paint: &Paint);
}

/// 一次绘制调用
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawCommand {
    pub center: Vec2,
    pub radius: f32,
    pub paint: Paint,
}

/// 只记录绘制调用的表面
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// 已记录的绘制调用（按调用顺序）
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// 最后一次绘制调用
    pub fn last(&self) -> Option<&DrawCommand> {
        self.commands.last()
    }

    /// 取出并清空记录
    pub fn take(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }
}

impl DrawSurface for RecordingSurface {
    fn draw_circle(&mut self, center: Vec2, radius: f32, paint: &Paint) {
        self.commands.push(DrawCommand {
            center,
            radius,
            paint: *paint,
        });
    }
}
