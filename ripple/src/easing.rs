//! # Easing 模块
//!
//! 缓动函数，把线性时间进度映射为视觉进度。

use std::f32::consts::PI;

use serde::{Deserialize, Serialize};

/// 缓动函数类型
///
/// 所有变体都满足 `f(0) = 0`、`f(1) = 1`，且在 `[0, 1]` 上单调。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EasingFunction {
    /// 线性（匀速）
    Linear,
    /// 二次缓出
    EaseOutQuad,
    /// 三次缓出
    EaseOutCubic,
    /// 正弦缓出
    EaseOutSine,
    /// 减速曲线（先快后慢）
    ///
    /// `factor == 1` 时为 `1 - (1 - t)^2`，否则为 `1 - (1 - t)^(2 * factor)`。
    Decelerate { factor: f32 },
}

impl Default for EasingFunction {
    fn default() -> Self {
        Self::Decelerate { factor: 2.0 }
    }
}

impl EasingFunction {
    /// 计算缓动值
    ///
    /// # 参数
    /// - `t`: 时间进度，超出 `[0, 1]` 的部分会被截断
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);

        match *self {
            EasingFunction::Linear => t,
            EasingFunction::EaseOutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            EasingFunction::EaseOutCubic => 1.0 - (1.0 - t).powi(3),
            EasingFunction::EaseOutSine => (t * PI / 2.0).sin(),
            EasingFunction::Decelerate { factor } => decelerate(t, factor),
        }
    }
}

fn decelerate(t: f32, factor: f32) -> f32 {
    if factor == 1.0 {
        1.0 - (1.0 - t) * (1.0 - t)
    } else {
        1.0 - (1.0 - t).powf(2.0 * factor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [EasingFunction; 5] = [
        EasingFunction::Linear,
        EasingFunction::EaseOutQuad,
        EasingFunction::EaseOutCubic,
        EasingFunction::EaseOutSine,
        EasingFunction::Decelerate { factor: 2.0 },
    ];

    #[test]
    fn test_endpoints() {
        for easing in ALL {
            assert_eq!(easing.apply(0.0), 0.0, "{easing:?}");
            assert!((easing.apply(1.0) - 1.0).abs() < 1e-6, "{easing:?}");
        }
    }

    #[test]
    fn test_monotonic() {
        for easing in ALL {
            let mut prev = easing.apply(0.0);
            for i in 1..=100 {
                let value = easing.apply(i as f32 / 100.0);
                assert!(value >= prev, "{easing:?} 在 {i} 处下降");
                prev = value;
            }
        }
    }

    #[test]
    fn test_clamp() {
        let easing = EasingFunction::default();
        assert_eq!(easing.apply(-0.5), 0.0);
        assert_eq!(easing.apply(1.5), 1.0);
    }

    #[test]
    fn test_decelerate_shape() {
        let easing = EasingFunction::Decelerate { factor: 2.0 };
        // 1 - 0.5^4
        assert!((easing.apply(0.5) - 0.9375).abs() < 1e-6);

        let quad = EasingFunction::Decelerate { factor: 1.0 };
        assert!((quad.apply(0.5) - EasingFunction::EaseOutQuad.apply(0.5)).abs() < 1e-6);
    }

    #[test]
    fn test_serde_tagged() {
        let json = serde_json::to_string(&EasingFunction::default()).unwrap();
        assert_eq!(json, r#"{"type":"decelerate","factor":2.0}"#);

        let parsed: EasingFunction = serde_json::from_str(r#"{"type":"linear"}"#).unwrap();
        assert_eq!(parsed, EasingFunction::Linear);
    }
}
