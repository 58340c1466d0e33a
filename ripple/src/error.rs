//! # Error 模块
//!
//! 定义 ripple 中使用的错误类型。
//!
//! 效果本身是封闭的数值计算，不会失败；只有配置的读写与校验会产生错误。

use thiserror::Error;

/// 配置错误
#[derive(Error, Debug)]
pub enum ConfigError {
    /// 读写配置文件失败
    #[error("配置 IO 错误: {0}")]
    Io(#[from] std::io::Error),

    /// JSON 解析或序列化失败
    #[error("配置解析失败: {0}")]
    Parse(#[from] serde_json::Error),

    /// 配置项取值无效
    #[error("配置项 '{field}' 无效: {message}")]
    Invalid {
        field: &'static str,
        message: String,
    },
}

impl ConfigError {
    pub(crate) fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            message: message.into(),
        }
    }
}

/// Result 类型别名
pub type RippleResult<T> = Result<T, ConfigError>;
