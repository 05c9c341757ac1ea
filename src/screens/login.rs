//! 员工登录屏
//!
//! 收集国家区号、电话号码和密码，区号与号码拼接为登录标识。认证委托给
//! 登录接口；成功把凭证写入会话存储，失败展示三级兜底消息。没有重试、
//! 没有锁定、没有限流。

use crate::client::ApiClient;
use crate::error::AppError;
use crate::models::auth::LoginRequest;
use crate::session::SessionStore;

/// 登录表单状态
#[derive(Debug, Clone)]
pub struct LoginScreen {
    pub country_code: String,
    pub phone: String,
    pub password: String,

    /// 提交中。唯一的防重复提交手段
    pub submitting: bool,

    pub error: Option<String>,
}

impl Default for LoginScreen {
    fn default() -> Self {
        Self {
            country_code: "+91".to_string(),
            phone: String::new(),
            password: String::new(),
            submitting: false,
            error: None,
        }
    }
}

impl LoginScreen {
    pub fn new(country_code: String, phone: String, password: String) -> Self {
        Self {
            country_code,
            phone,
            password,
            ..Self::default()
        }
    }

    /// 登录标识：区号与号码直接拼接
    pub fn identifier(&self) -> String {
        format!("{}{}", self.country_code, self.phone)
    }

    /// 号码和密码非空且不在提交中才允许提交
    pub fn can_submit(&self) -> bool {
        !self.submitting && !self.phone.is_empty() && !self.password.is_empty()
    }

    /// 提交登录。返回是否成功；失败消息留在 `error` 上
    pub async fn submit(&mut self, client: &ApiClient, session: &SessionStore) -> bool {
        if !self.can_submit() {
            return false;
        }

        self.error = None;
        self.submitting = true;

        tracing::debug!(identifier = %self.identifier(), "Attempting employee login");
        let request = LoginRequest {
            identifier: self.identifier(),
            password: self.password.clone(),
        };
        let result = client.login(&request).await;

        self.submitting = false;

        match result {
            Ok(response) => {
                let role = response
                    .role
                    .clone()
                    .or_else(|| response.user.as_ref().and_then(|u| u.role.clone()));

                if let Err(e) = session.set_credentials(response.token, response.company_id, role) {
                    self.error = Some(e.user_message());
                    return false;
                }

                tracing::info!("Employee login succeeded");
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "Employee login failed");
                self.error = Some(login_error_message(&e));
                false
            }
        }
    }
}

/// 登录失败消息：服务端消息 → 错误文本 → 固定兜底
fn login_error_message(error: &AppError) -> String {
    if let Some(server) = error.server_message() {
        return server.to_string();
    }

    let text = error.to_string();
    if text.is_empty() {
        "Something went wrong".to_string()
    } else {
        text
    }
}
