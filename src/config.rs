//! 客户端配置管理

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

/// 应用配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// 后端 API 配置
    pub api: ApiConfig,

    /// 会话存储配置
    pub session: SessionConfig,

    /// 日志配置
    pub logging: LoggingConfig,
}

/// 后端 API 配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// 后端基础地址（不含 /api 后缀）
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// 请求超时（秒）
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

/// 会话存储配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// 会话文件路径
    #[serde(default = "default_session_file")]
    pub file: PathBuf,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// 日志级别（trace/debug/info/warn/error）
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 日志格式（json/pretty/default）
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_base_url() -> String {
    "http://localhost:4000".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_session_file() -> PathBuf {
    match std::env::var("HOME") {
        Ok(home) => PathBuf::from(home).join(".hrm-console").join("session.json"),
        Err(_) => PathBuf::from("/tmp/hrm-console/session.json"),
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "default".to_string()
}

impl AppConfig {
    /// 从环境变量加载配置
    pub fn from_env() -> Result<Self> {
        let base_url = std::env::var("HRM_API_URL").unwrap_or_else(|_| default_base_url());

        // 校验地址格式，启动时失败优于首次请求时失败
        Url::parse(&base_url).with_context(|| format!("Invalid HRM_API_URL: {}", base_url))?;

        Ok(Self {
            api: ApiConfig {
                base_url,
                timeout_secs: std::env::var("HRM_API_TIMEOUT_SECS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or_else(default_timeout),
            },
            session: SessionConfig {
                file: std::env::var("HRM_SESSION_FILE")
                    .map(PathBuf::from)
                    .unwrap_or_else(|_| default_session_file()),
            },
            logging: LoggingConfig {
                level: std::env::var("HRM_LOG_LEVEL").unwrap_or_else(|_| default_log_level()),
                format: std::env::var("HRM_LOG_FORMAT").unwrap_or_else(|_| default_log_format()),
            },
        })
    }

    /// 所有接口路径的公共前缀（固定 /api 后缀）
    pub fn api_base(&self) -> String {
        format!("{}/api", self.api.base_url.trim_end_matches('/'))
    }

    /// 获取请求超时
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.api.timeout_secs)
    }
}
