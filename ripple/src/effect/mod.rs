//! # Effect 模块
//!
//! 单个水波纹：一次按压手势对应一个 [`RippleEffect`]。
//!
//! ## 状态
//!
//! 对象只保存三个时间戳（进入、退出、最近一次内外切换）和触点位置。
//! 半径与 alpha 在每次渲染时由时间戳和当前时间重新计算，因此：
//! - 同一时刻渲染两次得到完全相同的结果
//! - 跳帧或帧率波动不会累积误差
//!
//! ## 三条进度曲线
//!
//! - enter：触点按下，外半径从起始半径扩张到最远角距离
//! - outside：触点越过边界，外半径在"内部半径"与"外部半径"之间过渡
//! - exit：触点抬起，内半径从 0 扩张到外半径，圆变为逐渐变细的圆环
//!
//! ## 调用约定
//!
//! `enter()` 必须先于 `exit()`。违反时 `exit()` 不生效并记录警告；
//! 从未进入的水波纹不会绘制任何内容。


use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::clock::{AnimationClock, Millis, SystemClock};
use crate::config::RippleConfig;
use crate::easing::EasingFunction;
use crate::error::RippleResult;
use crate::geometry::{Rect, Vec2, lerp};
use crate::surface::{DrawSurface, Paint, PaintStyle};

/// 完全不透明
const MAX_ALPHA: f32 = 255.0;

/// 水波纹所处阶段（仅用于诊断，渲染不依赖它）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RipplePhase {
    /// 尚未调用 `enter()`
    Idle,
    /// 扩张动画进行中
    Entering,
    /// 扩张完成，手指仍按住
    Held,
    /// 消散动画进行中
    Exiting,
    /// 消散完成，可以丢弃
    Finished,
}

/// 单帧绘制结果
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RippleFrame {
    /// 实心圆
    Fill { center: Vec2, radius: f32, alpha: u8 },
    /// 圆环：`radius` 为描边中心线半径
    Ring {
        center: Vec2,
        radius: f32,
        stroke_width: f32,
        alpha: u8,
    },
}

impl RippleFrame {
    pub fn center(&self) -> Vec2 {
        match *self {
            RippleFrame::Fill { center, .. } | RippleFrame::Ring { center, .. } => center,
        }
    }

    pub fn alpha(&self) -> u8 {
        match *self {
            RippleFrame::Fill { alpha, .. } | RippleFrame::Ring { alpha, .. } => alpha,
        }
    }

    /// 圆或圆环覆盖到的最外侧半径
    pub fn outer_radius(&self) -> f32 {
        match *self {
            RippleFrame::Fill { radius, .. } => radius,
            RippleFrame::Ring {
                radius,
                stroke_width,
                ..
            } => radius + stroke_width / 2.0,
        }
    }
}

/// 水波纹
pub struct RippleEffect<C: AnimationClock = SystemClock> {
    bounds: Rect,
    padding: Rect,
    config: RippleConfig,
    min_radius: f32,
    outside_radius: f32,

    /// 触点位置
    center: Vec2,
    /// 触点是否在边界内
    inside: bool,

    /// 开始扩张的时间
    enter_time: Option<Millis>,
    /// 开始消散的时间
    exit_time: Option<Millis>,
    /// 最近一次内外切换的时间
    outside_time: Option<Millis>,

    clock: C,
}

impl<C: AnimationClock> RippleEffect<C> {
    /// 使用默认参数创建水波纹
    ///
    /// # 参数
    ///
    /// - `bounds`: 可交互区域
    /// - `padding`: 区域内边距，触点越过内边距后位置开始受阻
    /// - `x`, `y`: 初始触点位置
    /// - `density`: 每 dp 的像素数
    /// - `clock`: 动画时钟，所有时间戳都从它采样
    pub fn new(bounds: Rect, padding: Rect, x: f32, y: f32, density: f32, clock: C) -> Self {
        Self::from_checked(bounds, padding, x, y, density, RippleConfig::default(), clock)
    }

    /// 使用指定参数创建水波纹
    ///
    /// 参数未通过 [`RippleConfig::validate`] 时返回错误。
    pub fn with_config(
        bounds: Rect,
        padding: Rect,
        x: f32,
        y: f32,
        density: f32,
        config: RippleConfig,
        clock: C,
    ) -> RippleResult<Self> {
        config.validate()?;
        Ok(Self::from_checked(bounds, padding, x, y, density, config, clock))
    }

    /// `config` 必须已通过校验
    fn from_checked(
        bounds: Rect,
        padding: Rect,
        x: f32,
        y: f32,
        density: f32,
        config: RippleConfig,
        clock: C,
    ) -> Self {
        let min_radius = config.min_radius(density);
        let outside_radius = config.outside_radius(density);

        Self {
            bounds,
            padding,
            min_radius,
            outside_radius,
            center: Vec2::new(x, y),
            inside: bounds.contains(x, y),
            enter_time: None,
            exit_time: None,
            outside_time: None,
            config,
            clock,
        }
    }

    /// 更新触点位置
    ///
    /// 触点跨越边界时重置内外切换动画。
    pub fn move_to(&mut self, x: f32, y: f32) {
        self.center = Vec2::new(x, y);

        let inside = self.bounds.contains(x, y);
        if inside != self.inside {
            let now = self.clock.now_millis();
            debug!(x = x, y = y, inside = inside, now = now, "水波纹触点跨越边界");
            self.outside_time = Some(now);
            self.inside = inside;
        }
    }

    /// 开始扩张动画
    ///
    /// 再次调用会从当前时间重新开始扩张。
    pub fn enter(&mut self) {
        let now = self.clock.now_millis();
        debug!(now = now, "水波纹开始扩张");
        self.enter_time = Some(now);
    }

    /// 开始消散动画
    ///
    /// 距离 `enter()` 不足最短间隔时，消散会推迟到间隔结束，
    /// 保证快速轻点也能看到扩张过程。
    pub fn exit(&mut self) {
        let now = self.clock.now_millis();
        let Some(enter_time) = self.enter_time else {
            warn!(now = now, "exit() 先于 enter() 调用，已忽略");
            return;
        };

        let exit_time = now.max(enter_time + self.config.exit_min_delay());
        debug!(now = now, exit_time = exit_time, "水波纹开始消散");
        self.exit_time = Some(exit_time);
    }

    /// 是否仍在动画中
    ///
    /// 返回 `false` 后调用方可以丢弃该对象。
    pub fn is_active(&self) -> bool {
        let now = self.clock.now_millis();
        match self.enter_time {
            Some(enter_time) if enter_time <= now => self
                .exit_time
                .is_none_or(|exit_time| now <= exit_time + self.config.exit_duration()),
            _ => false,
        }
    }

    /// 当前阶段
    pub fn phase(&self) -> RipplePhase {
        let now = self.clock.now_millis();
        let Some(enter_time) = self.enter_time else {
            return RipplePhase::Idle;
        };

        match self.exit_time {
            Some(exit_time) if now > exit_time + self.config.exit_duration() => {
                RipplePhase::Finished
            }
            Some(exit_time) if now >= exit_time => RipplePhase::Exiting,
            _ if now - enter_time < self.config.enter_duration() => RipplePhase::Entering,
            _ => RipplePhase::Held,
        }
    }

    /// 替换可交互区域与内边距
    ///
    /// 绘制几何立即跟随新区域；内外状态在下一次 `move_to` 时重新判断。
    pub fn set_bounds(&mut self, bounds: Rect, padding: Rect) {
        self.bounds = bounds;
        self.padding = padding;
    }

    /// 计算当前帧
    ///
    /// 纯计算，不修改状态。尚未进入或没有可见内容时返回 `None`。
    pub fn frame(&self) -> Option<RippleFrame> {
        let enter_time = self.enter_time?;
        let now = self.clock.now_millis();
        let config = &self.config;
        let easing = config.easing;

        let max_radius = max_radius(&self.bounds, self.center);

        let enter = progress(easing, now - enter_time, config.enter_duration());
        let outside = self
            .outside_time
            .map_or(1.0, |t| progress(easing, now - t, config.outside_duration()));
        let exit = self
            .exit_time
            .map_or(0.0, |t| progress(easing, now - t, config.exit_duration()));

        let outer = outer_radius(
            self.min_radius,
            max_radius,
            self.outside_radius,
            enter,
            outside,
            self.inside,
        );

        // 越界阻力
        let margin = outer * config.outside_margin;
        let x = loose_constrain(
            self.center.x,
            (self.bounds.left + self.padding.left) as f32,
            (self.bounds.right - self.padding.right) as f32,
            margin,
            config.outside_resistance,
        );
        let y = loose_constrain(
            self.center.y,
            (self.bounds.top + self.padding.top) as f32,
            (self.bounds.bottom - self.padding.bottom) as f32,
            margin,
            config.outside_resistance,
        );
        let center = Vec2::new(x, y);

        let pulse_time = now - enter_time - config.enter_duration() - config.pulse_delay();
        let pulse = pulse_alpha(pulse_time, config);
        let max_alpha = blend_max_alpha(pulse, exit, outside, self.inside);

        trace!(
            now = now,
            enter = enter,
            outside = outside,
            exit = exit,
            outer_radius = outer,
            max_alpha = max_alpha,
            "水波纹帧"
        );

        if exit <= 0.0 {
            (outer > 0.0).then_some(RippleFrame::Fill {
                center,
                radius: outer,
                alpha: max_alpha,
            })
        } else {
            let inner = lerp(0.0, outer, exit);
            let stroke_width = outer - inner;
            (stroke_width > 0.0).then(|| RippleFrame::Ring {
                center,
                radius: inner + stroke_width / 2.0,
                stroke_width,
                alpha: round_alpha(lerp(f32::from(max_alpha), 0.0, exit)),
            })
        }
    }

    /// 绘制当前帧
    ///
    /// 改写画笔的 alpha、样式与线宽后画一个圆；没有可见内容时不绘制。
    pub fn render<S: DrawSurface + ?Sized>(&self, surface: &mut S, paint: &mut Paint) {
        match self.frame() {
            Some(RippleFrame::Fill {
                center,
                radius,
                alpha,
            }) => {
                paint.alpha = alpha;
                paint.style = PaintStyle::Fill;
                surface.draw_circle(center, radius, paint);
            }
            Some(RippleFrame::Ring {
                center,
                radius,
                stroke_width,
                alpha,
            }) => {
                paint.alpha = alpha;
                paint.style = PaintStyle::Stroke;
                paint.stroke_width = stroke_width;
                surface.draw_circle(center, radius, paint);
            }
            None => {}
        }
    }

    pub fn center(&self) -> Vec2 {
        self.center
    }

    pub fn is_inside(&self) -> bool {
        self.inside
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn min_radius(&self) -> f32 {
        self.min_radius
    }

    pub fn outside_radius(&self) -> f32 {
        self.outside_radius
    }

    /// 实际生效的消散开始时间
    pub fn exit_time(&self) -> Option<Millis> {
        self.exit_time
    }

    pub fn enter_time(&self) -> Option<Millis> {
        self.enter_time
    }
}

impl<C: AnimationClock> std::fmt::Debug for RippleEffect<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RippleEffect")
            .field("bounds", &self.bounds)
            .field("center", &self.center)
            .field("inside", &self.inside)
            .field("enter_time", &self.enter_time)
            .field("exit_time", &self.exit_time)
            .field("outside_time", &self.outside_time)
            .finish()
    }
}

/// 从中心到区域最远角的距离（向上取整）
///
/// 按区域原点为 (0, 0) 度量。
pub fn max_radius(bounds: &Rect, center: Vec2) -> f32 {
    let dx = center.x.max(bounds.right as f32 - center.x);
    let dy = center.y.max(bounds.bottom as f32 - center.y);
    (dx * dx + dy * dy).sqrt().ceil()
}

/// 缓动后的归一化进度
pub fn progress(easing: EasingFunction, elapsed: Millis, duration: Millis) -> f32 {
    easing.apply(elapsed as f32 / duration as f32)
}

/// 外半径
///
/// 先按进入进度从起始半径扩张到最大半径，
/// 再按内外切换进度在外部半径与该值之间混合。
pub fn outer_radius(
    min_radius: f32,
    max_radius: f32,
    outside_radius: f32,
    enter: f32,
    outside: f32,
    inside: bool,
) -> f32 {
    let inside_radius = lerp(min_radius, max_radius, enter);
    let blend = if inside { outside } else { 1.0 - outside };
    lerp(outside_radius, inside_radius, blend)
}

/// 带渐近余量的约束
///
/// `[min, max]` 内原样返回；越界部分按 `excess^factor` 衰减，且最多越界 `margin`。
pub fn loose_constrain(value: f32, min: f32, max: f32, margin: f32, factor: f32) -> f32 {
    if value < min {
        min - margin.min((min - value).powf(factor))
    } else if value > max {
        max + margin.min((value - max).powf(factor))
    } else {
        value
    }
}

/// 脉冲 alpha
///
/// `pulse_time` 为距第一次脉冲开始的时间。尚未开始或处于两次脉冲的间隔中时返回 `None`。
pub fn pulse_alpha(pulse_time: Millis, config: &RippleConfig) -> Option<f32> {
    if pulse_time < 0 {
        return None;
    }

    let period = Millis::from(config.pulse_interval_ms) + Millis::from(config.pulse_duration_ms);
    let state = pulse_time.rem_euclid(period) as f32 / config.pulse_duration_ms as f32;
    if state >= 1.0 {
        return None;
    }

    let min_alpha = f32::from(config.pulse_min_alpha);
    Some(if state > 0.5 {
        lerp(min_alpha, MAX_ALPHA, (state - 0.5) * 2.0)
    } else {
        lerp(MAX_ALPHA, min_alpha, state * 2.0)
    })
}

/// 最终的最大 alpha
///
/// 消散中按退出进度混合脉冲；在内部时直接使用脉冲值；
/// 在外部时随内外切换进度回到完全不透明。
pub fn blend_max_alpha(pulse: Option<f32>, exit: f32, outside: f32, inside: bool) -> u8 {
    let Some(pulse) = pulse else {
        return u8::MAX;
    };

    let alpha = if exit > 0.0 {
        lerp(MAX_ALPHA, pulse, exit)
    } else if inside {
        pulse
    } else {
        lerp(pulse, MAX_ALPHA, outside)
    };
    round_alpha(alpha)
}

fn round_alpha(value: f32) -> u8 {
    (value + 0.5).clamp(0.0, MAX_ALPHA) as u8
}
