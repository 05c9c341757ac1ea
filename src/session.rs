//! 会话凭证存储
//!
//! 浏览器端的持久化键值对（token / companyId / userRole）在这里落地为一个
//! JSON 文件。登录时写入，每次请求读取，认证失败只清除 token（角色要留给
//! 跳转判断），登出全部清除。token 本身是不透明凭证，客户端不解析、不做
//! 过期判断，是否带凭证完全由存储中是否存在 token 决定。

use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::RwLock;

/// 持久化的会话数据
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionData {
    /// 不透明 Bearer 凭证
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    /// 租户（公司）标识
    #[serde(default, rename = "companyId", skip_serializing_if = "Option::is_none")]
    pub company_id: Option<String>,

    /// 角色字符串，决定认证失败后的登录入口
    #[serde(default, rename = "userRole", skip_serializing_if = "Option::is_none")]
    pub user_role: Option<String>,
}

/// 会话存储
///
/// 显式传递的会话对象，注入 HTTP 客户端使用，不读全局环境。
pub struct SessionStore {
    path: PathBuf,
    data: RwLock<SessionData>,
}

impl SessionStore {
    /// 从文件加载会话。文件不存在视为空会话
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, AppError> {
        let path = path.into();

        let data = match std::fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(data) => data,
                Err(e) => {
                    // 损坏的会话文件等同于未登录
                    tracing::warn!(path = %path.display(), error = %e, "Discarding unreadable session file");
                    SessionData::default()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => SessionData::default(),
            Err(e) => return Err(AppError::Session(e.to_string())),
        };

        Ok(Self {
            path,
            data: RwLock::new(data),
        })
    }

    /// 会话文件路径
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn token(&self) -> Option<String> {
        self.data.read().expect("session lock poisoned").token.clone()
    }

    pub fn company_id(&self) -> Option<String> {
        self.data.read().expect("session lock poisoned").company_id.clone()
    }

    pub fn user_role(&self) -> Option<String> {
        self.data.read().expect("session lock poisoned").user_role.clone()
    }

    /// 是否存在凭证。这是请求是否带认证头的唯一依据
    pub fn is_authenticated(&self) -> bool {
        self.data.read().expect("session lock poisoned").token.is_some()
    }

    /// 登录成功后写入全部凭证
    pub fn set_credentials(
        &self,
        token: String,
        company_id: Option<String>,
        user_role: Option<String>,
    ) -> Result<(), AppError> {
        {
            let mut data = self.data.write().expect("session lock poisoned");
            data.token = Some(token);
            data.company_id = company_id;
            data.user_role = user_role;
        }
        self.persist()
    }

    /// 认证失败时只清除 token，角色保留用于决定跳转目标
    pub fn clear_token(&self) -> Result<(), AppError> {
        {
            let mut data = self.data.write().expect("session lock poisoned");
            data.token = None;
        }
        self.persist()
    }

    /// 登出：清除全部会话数据
    pub fn clear(&self) -> Result<(), AppError> {
        {
            let mut data = self.data.write().expect("session lock poisoned");
            *data = SessionData::default();
        }
        self.persist()
    }

    /// 根据存储中的角色得到认证失败后的登录入口
    pub fn login_route(&self) -> LoginRoute {
        LoginRoute::for_role(self.user_role().as_deref())
    }

    fn persist(&self) -> Result<(), AppError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let data = self.data.read().expect("session lock poisoned").clone();
        let raw = serde_json::to_string_pretty(&data)
            .map_err(|e| AppError::Session(e.to_string()))?;
        std::fs::write(&self.path, raw)?;
        Ok(())
    }
}

/// 认证失败后的登录入口
///
/// 角色到入口是纯函数三分支映射，与触发它的请求无关。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginRoute {
    /// 平台管理入口
    MasterPortal,
    /// 公司管理员登录
    CompanyLogin,
    /// 员工登录
    EmployeeLogin,
}

impl LoginRoute {
    /// 角色字符串（大小写不敏感）映射到登录入口
    pub fn for_role(role: Option<&str>) -> Self {
        match role.map(|r| r.to_lowercase()).as_deref() {
            Some("super_admin") | Some("superadmin") => LoginRoute::MasterPortal,
            Some("admin") => LoginRoute::CompanyLogin,
            _ => LoginRoute::EmployeeLogin,
        }
    }

    /// 入口路径
    pub fn path(&self) -> &'static str {
        match self {
            LoginRoute::MasterPortal => "/master-portal",
            LoginRoute::CompanyLogin => "/company-login",
            LoginRoute::EmployeeLogin => "/employee-login",
        }
    }
}

impl std::fmt::Display for LoginRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path())
    }
}
