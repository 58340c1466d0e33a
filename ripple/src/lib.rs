//! # Ripple
//!
//! 按压反馈水波纹：一个随时间扩张、消散的圆形高亮。
//!
//! ## 架构概述
//!
//! `ripple` 是纯逻辑核心，不处理输入事件，也不调度绘制。
//! 宿主负责采集按下/移动/抬起，并在效果活跃期间每帧调用一次 `render`：
//!
//! ```text
//! Host                               RippleEffect
//!   │                                     │
//!   │── enter() / move_to() / exit() ───►│ 记录时间戳
//!   │                                     │
//!   │── is_active()? ───────────────────►│
//!   │── render(surface, paint) ─────────►│ 由时间戳 + 当前时间计算
//!   │◄─────────── draw_circle ────────────│
//! ```
//!
//! ## 使用示例
//!
//! ```ignore
//! use ripple::{Paint, Rect, RippleEffect, SystemClock};
//!
//! let mut ripple = RippleEffect::new(bounds, Rect::zero(), x, y, density, SystemClock::new());
//! ripple.enter();
//!
//! // 渲染循环
//! while ripple.is_active() {
//!     ripple.render(&mut canvas, &mut paint);
//!     // 抬起时调用 ripple.exit()
//! }
//! ```
//!
//! ## 模块结构
//!
//! - [`effect`]：水波纹状态机与逐帧计算
//! - [`config`]：可调参数
//! - [`easing`]：缓动函数
//! - [`clock`]：动画时钟
//! - [`geometry`]：矩形与向量
//! - [`surface`]：绘制接口
//! - [`error`]：错误类型

pub mod clock;
pub mod config;
pub mod easing;
pub mod effect;
pub mod error;
pub mod geometry;
pub mod surface;

// 重导出核心类型
pub use clock::{AnimationClock, ManualClock, Millis, SystemClock};
pub use config::RippleConfig;
pub use easing::EasingFunction;
pub use effect::{RippleEffect, RippleFrame, RipplePhase};
pub use error::{ConfigError, RippleResult};
pub use geometry::{Rect, Vec2};
pub use surface::{DrawCommand, DrawSurface, Paint, PaintStyle, RecordingSurface};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_api_accessible() {
        let clock = ManualClock::new(0);
        let mut ripple = RippleEffect::new(
            Rect::from_size(10, 10),
            Rect::zero(),
            5.0,
            5.0,
            1.0,
            clock,
        );
        ripple.enter();

        let mut surface = RecordingSurface::new();
        ripple.render(&mut surface, &mut Paint::default());
        assert_eq!(surface.commands().len(), 1);
        assert_eq!(ripple.phase(), RipplePhase::Entering);
    }
}
