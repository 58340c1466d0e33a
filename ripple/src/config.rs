//! # Config 模块
//!
//! 水波纹的全部可调参数。
//!
//! 默认值即为标准水波纹效果；JSON 中缺失的字段使用默认值。
//! 两个半径参数（起始半径、触点在外时的半径）取值相同但含义不同，分别配置。

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::clock::Millis;
use crate::easing::EasingFunction;
use crate::error::{ConfigError, RippleResult};

/// 水波纹配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RippleConfig {
    /// 起始半径（dp）
    #[serde(default = "default_starting_radius_dp")]
    pub starting_radius_dp: f32,

    /// 触点位于边界外时的半径（dp）
    #[serde(default = "default_outside_radius_dp")]
    pub outside_radius_dp: f32,

    /// 边界外约束的最大越界距离（外半径的比例）
    #[serde(default = "default_outside_margin")]
    pub outside_margin: f32,

    /// 边界外约束的阻力指数
    #[serde(default = "default_outside_resistance")]
    pub outside_resistance: f32,

    /// 扩张（进入）动画时长
    #[serde(default = "default_enter_duration_ms")]
    pub enter_duration_ms: u32,

    /// 消散（退出）动画时长
    #[serde(default = "default_exit_duration_ms")]
    pub exit_duration_ms: u32,

    /// 进入与退出之间的最短间隔
    #[serde(default = "default_exit_min_delay_ms")]
    pub exit_min_delay_ms: u32,

    /// 内外切换动画时长
    #[serde(default = "default_outside_duration_ms")]
    pub outside_duration_ms: u32,

    /// 单次脉冲时长
    #[serde(default = "default_pulse_duration_ms")]
    pub pulse_duration_ms: u32,

    /// 两次脉冲之间的间隔
    #[serde(default = "default_pulse_interval_ms")]
    pub pulse_interval_ms: u32,

    /// 脉冲最低 alpha
    #[serde(default = "default_pulse_min_alpha")]
    pub pulse_min_alpha: u8,

    /// 进入完成后到第一次脉冲的延迟
    #[serde(default = "default_pulse_delay_ms")]
    pub pulse_delay_ms: u32,

    /// 三条进度曲线共用的缓动函数
    #[serde(default)]
    pub easing: EasingFunction,
}

// 默认值函数
fn default_starting_radius_dp() -> f32 {
    40.0
}

fn default_outside_radius_dp() -> f32 {
    40.0
}

fn default_outside_margin() -> f32 {
    0.8
}

fn default_outside_resistance() -> f32 {
    0.7
}

fn default_enter_duration_ms() -> u32 {
    400
}

fn default_exit_duration_ms() -> u32 {
    600
}

fn default_exit_min_delay_ms() -> u32 {
    200
}

fn default_outside_duration_ms() -> u32 {
    300
}

fn default_pulse_duration_ms() -> u32 {
    400
}

fn default_pulse_interval_ms() -> u32 {
    400
}

fn default_pulse_min_alpha() -> u8 {
    128
}

fn default_pulse_delay_ms() -> u32 {
    500
}

impl Default for RippleConfig {
    fn default() -> Self {
        Self {
            starting_radius_dp: default_starting_radius_dp(),
            outside_radius_dp: default_outside_radius_dp(),
            outside_margin: default_outside_margin(),
            outside_resistance: default_outside_resistance(),
            enter_duration_ms: default_enter_duration_ms(),
            exit_duration_ms: default_exit_duration_ms(),
            exit_min_delay_ms: default_exit_min_delay_ms(),
            outside_duration_ms: default_outside_duration_ms(),
            pulse_duration_ms: default_pulse_duration_ms(),
            pulse_interval_ms: default_pulse_interval_ms(),
            pulse_min_alpha: default_pulse_min_alpha(),
            pulse_delay_ms: default_pulse_delay_ms(),
            easing: EasingFunction::default(),
        }
    }
}

impl RippleConfig {
    /// 从 JSON 文本解析并校验
    pub fn from_json_str(json: &str) -> RippleResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// 加载配置文件
    pub fn load(path: impl AsRef<Path>) -> RippleResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let config = Self::from_json_str(&content)?;
        debug!(path = ?path, "水波纹配置加载成功");
        Ok(config)
    }

    /// 保存配置到文件
    pub fn save(&self, path: impl AsRef<Path>) -> RippleResult<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// 验证配置有效性
    pub fn validate(&self) -> RippleResult<()> {
        check_radius("starting_radius_dp", self.starting_radius_dp)?;
        check_radius("outside_radius_dp", self.outside_radius_dp)?;

        if !self.outside_margin.is_finite() || self.outside_margin < 0.0 {
            return Err(ConfigError::invalid("outside_margin", "必须是非负有限数"));
        }
        if !self.outside_resistance.is_finite() || self.outside_resistance <= 0.0 {
            return Err(ConfigError::invalid("outside_resistance", "必须是正有限数"));
        }

        // 时长都会作为除数
        for (field, value) in [
            ("enter_duration_ms", self.enter_duration_ms),
            ("exit_duration_ms", self.exit_duration_ms),
            ("outside_duration_ms", self.outside_duration_ms),
            ("pulse_duration_ms", self.pulse_duration_ms),
        ] {
            if value == 0 {
                return Err(ConfigError::invalid(field, "时长必须大于 0"));
            }
        }

        if let EasingFunction::Decelerate { factor } = self.easing {
            if !factor.is_finite() || factor <= 0.0 {
                return Err(ConfigError::invalid("easing", "减速因子必须是正有限数"));
            }
        }

        Ok(())
    }

    /// 起始半径（像素）
    pub fn min_radius(&self, density: f32) -> f32 {
        (density * self.starting_radius_dp).round()
    }

    /// 触点在外时的半径（像素）
    pub fn outside_radius(&self, density: f32) -> f32 {
        (density * self.outside_radius_dp).round()
    }

    pub(crate) fn enter_duration(&self) -> Millis {
        Millis::from(self.enter_duration_ms)
    }

    pub(crate) fn exit_duration(&self) -> Millis {
        Millis::from(self.exit_duration_ms)
    }

    pub(crate) fn exit_min_delay(&self) -> Millis {
        Millis::from(self.exit_min_delay_ms)
    }

    pub(crate) fn outside_duration(&self) -> Millis {
        Millis::from(self.outside_duration_ms)
    }

    pub(crate) fn pulse_delay(&self) -> Millis {
        Millis::from(self.pulse_delay_ms)
    }
}

fn check_radius(field: &'static str, value: f32) -> RippleResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(ConfigError::invalid(field, "半径必须是非负有限数"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RippleConfig::default();
        assert_eq!(config.starting_radius_dp, 40.0);
        assert_eq!(config.outside_radius_dp, 40.0);
        assert_eq!(config.enter_duration_ms, 400);
        assert_eq!(config.exit_duration_ms, 600);
        assert_eq!(config.exit_min_delay_ms, 200);
        assert_eq!(config.pulse_min_alpha, 128);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = RippleConfig::from_json_str(r#"{ "enter_duration_ms": 250 }"#).unwrap();
        assert_eq!(config.enter_duration_ms, 250);
        assert_eq!(config.exit_duration_ms, 600);
        assert_eq!(config.easing, EasingFunction::Decelerate { factor: 2.0 });
    }

    #[test]
    fn test_zero_duration_rejected() {
        let err = RippleConfig::from_json_str(r#"{ "exit_duration_ms": 0 }"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "exit_duration_ms",
                ..
            }
        ));
    }

    #[test]
    fn test_invalid_values_rejected() {
        let mut config = RippleConfig::default();
        config.outside_resistance = 0.0;
        assert!(config.validate().is_err());

        let mut config = RippleConfig::default();
        config.starting_radius_dp = f32::NAN;
        assert!(config.validate().is_err());

        let mut config = RippleConfig::default();
        config.easing = EasingFunction::Decelerate { factor: -1.0 };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_malformed_json() {
        let err = RippleConfig::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_radii_scale_with_density() {
        let config = RippleConfig::default();
        assert_eq!(config.min_radius(1.0), 40.0);
        assert_eq!(config.min_radius(1.5), 60.0);

        let config = RippleConfig {
            outside_radius_dp: 5.0,
            ..RippleConfig::default()
        };
        // 7.5 四舍五入
        assert_eq!(config.outside_radius(1.5), 8.0);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ripple.json");

        let mut config = RippleConfig::default();
        config.pulse_delay_ms = 750;
        config.easing = EasingFunction::EaseOutCubic;
        config.save(&path).unwrap();

        let loaded = RippleConfig::load(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = RippleConfig::load(dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
