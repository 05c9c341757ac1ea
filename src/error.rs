//! 统一错误模型
//! 定义客户端错误类型和用户可见消息

use crate::session::LoginRoute;
use thiserror::Error;

/// 应用错误类型
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// 认证失败。传输层只负责上报，由顶层执行跳转
    #[error("Authentication required")]
    Unauthenticated { redirect: LoginRoute },

    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Session storage error: {0}")]
    Session(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    /// 获取用户友好的错误消息（不包含敏感信息）
    pub fn user_message(&self) -> String {
        match self {
            AppError::Transport(_) => "Network error, please check your connection".to_string(),
            AppError::Unauthenticated { redirect } => {
                format!("Session expired, continue at {}", redirect.path())
            }
            AppError::Api { message, .. } => message.clone(),
            AppError::Session(_) => "Session storage error".to_string(),
            AppError::Config(msg) => msg.clone(),
        }
    }

    /// 服务端返回的消息（如果有）
    pub fn server_message(&self) -> Option<&str> {
        match self {
            AppError::Api { message, .. } if !message.is_empty() => Some(message),
            _ => None,
        }
    }

    /// 是否为认证失败
    pub fn is_unauthenticated(&self) -> bool {
        matches!(self, AppError::Unauthenticated { .. })
    }
}

impl From<std::io::Error> for AppError {
    fn from(e: std::io::Error) -> Self {
        AppError::Session(e.to_string())
    }
}
