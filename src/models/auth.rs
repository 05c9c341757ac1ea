//! Authentication-related models

use serde::{Deserialize, Serialize};

/// Login request
///
/// identifier 是国家区号与电话号码的拼接。
#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub identifier: String,
    pub password: String,
}

/// Login response
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub token: String,

    #[serde(default)]
    pub role: Option<String>,

    #[serde(default, rename = "companyId")]
    pub company_id: Option<String>,

    #[serde(default)]
    pub user: Option<AuthUser>,
}

/// Authenticated user profile
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthUser {
    #[serde(default)]
    pub full_name: Option<String>,

    #[serde(default)]
    pub first_name: Option<String>,

    #[serde(default)]
    pub last_name: Option<String>,

    #[serde(default)]
    pub role: Option<String>,
}

impl AuthUser {
    /// 显示名：fullName 优先，退回 firstName [lastName]
    pub fn display_name(&self) -> String {
        if let Some(full) = &self.full_name {
            return full.clone();
        }
        match (&self.first_name, &self.last_name) {
            (Some(first), Some(last)) => format!("{} {}", first, last),
            (Some(first), None) => first.clone(),
            _ => "User".to_string(),
        }
    }
}
