//! HR 后端 API 客户端
//!
//! 所有页面共用的单一 HTTP 客户端。出站侧每次请求从会话存储读取凭证与
//! 租户标识，存在则附加 Authorization 与 x-company-id 头；入站侧对 401
//! 响应先清除凭证，再按存储中的角色映射出登录入口，以类型化结果上报给
//! 调用方，传输层不做任何跳转。其余失败（网络、非 401 的 4xx/5xx）原样
//! 向调用方传播。

use crate::config::AppConfig;
use crate::error::AppError;
use crate::models::auth::{LoginRequest, LoginResponse};
use crate::models::billing::{CompanyConfig, Plan, RenewResponse, RenewSubscriptionRequest};
use crate::models::employee::{CreateEmployeeRequest, Employee, UpdateEmployeeRequest};
use crate::models::history::{LeaveRecord, PayrollRecord};
use crate::session::SessionStore;
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Instant;
use uuid::Uuid;

/// API 客户端
pub struct ApiClient {
    client: Client,
    base_url: String,
    session: Arc<SessionStore>,
}

impl ApiClient {
    /// 创建客户端。基础地址 = 配置地址 + 固定 /api 后缀
    pub fn new(config: &AppConfig, session: Arc<SessionStore>) -> Result<Self, AppError> {
        let client = Client::builder().timeout(config.request_timeout()).build()?;

        Ok(Self {
            client,
            base_url: config.api_base(),
            session,
        })
    }

    /// 构造请求，按会话存储现状附加认证头与租户头
    ///
    /// 没有凭证时不附加任何头，请求以匿名身份发出。
    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let mut req = self.client.request(method, format!("{}{}", self.base_url, path));

        if let Some(token) = self.session.token() {
            req = req.bearer_auth(token);
        }
        if let Some(company_id) = self.session.company_id() {
            req = req.header("x-company-id", company_id);
        }

        req
    }

    /// 发送请求并统一处理响应
    async fn send(
        &self,
        req: RequestBuilder,
        method: &'static str,
        path: &str,
    ) -> Result<reqwest::Response, AppError> {
        let request_id = Uuid::new_v4();
        let start = Instant::now();

        let response = req.send().await?;

        let status = response.status();
        let elapsed = start.elapsed();

        metrics::counter!("api_requests_total", "method" => method, "status" => status_label(status))
            .increment(1);
        metrics::histogram!("api_request_duration_seconds").record(elapsed.as_secs_f64());

        tracing::debug!(
            request_id = %request_id,
            method,
            path,
            status = status.as_u16(),
            elapsed_ms = elapsed.as_millis(),
            "API request completed"
        );

        if status == StatusCode::UNAUTHORIZED {
            // 无条件清除凭证；角色保留，决定上报的登录入口
            self.session.clear_token()?;
            let redirect = self.session.login_route();
            tracing::warn!(path, %redirect, "Authentication failed, credential cleared");
            return Err(AppError::Unauthenticated { redirect });
        }

        if !status.is_success() {
            let message = extract_error_message(response).await.unwrap_or_else(|| {
                status.canonical_reason().unwrap_or("Request failed").to_string()
            });
            return Err(AppError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response)
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        req: RequestBuilder,
        method: &'static str,
        path: &str,
    ) -> Result<T, AppError> {
        let response = self.send(req, method, path).await?;
        Ok(response.json::<T>().await?)
    }

    /// 发送请求，丢弃响应体
    async fn execute_ok(
        &self,
        req: RequestBuilder,
        method: &'static str,
        path: &str,
    ) -> Result<(), AppError> {
        self.send(req, method, path).await?;
        Ok(())
    }

    // ---- 认证 ----

    pub async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, AppError> {
        let path = "/auth/login";
        self.execute(self.request(Method::POST, path).json(request), "POST", path)
            .await
    }

    // ---- 订阅与套餐 ----

    pub async fn plans(&self) -> Result<Vec<Plan>, AppError> {
        let path = "/auth/plans";
        self.execute(self.request(Method::GET, path), "GET", path).await
    }

    pub async fn company_config(&self) -> Result<CompanyConfig, AppError> {
        let path = "/company/config";
        self.execute(self.request(Method::GET, path), "GET", path).await
    }

    pub async fn renew_subscription(&self, days: u32) -> Result<RenewResponse, AppError> {
        let path = "/company/renew-subscription";
        self.execute(
            self.request(Method::POST, path).json(&RenewSubscriptionRequest { days }),
            "POST",
            path,
        )
        .await
    }

    // ---- 员工 ----

    pub async fn list_employees(&self, company_id: Option<&str>) -> Result<Vec<Employee>, AppError> {
        let path = "/employees";
        let mut req = self.request(Method::GET, path);
        if let Some(id) = company_id {
            req = req.query(&[("companyId", id)]);
        }
        self.execute(req, "GET", path).await
    }

    pub async fn create_employee(&self, request: &CreateEmployeeRequest) -> Result<(), AppError> {
        let path = "/employees";
        self.execute_ok(self.request(Method::POST, path).json(request), "POST", path)
            .await
    }

    pub async fn update_employee(
        &self,
        id: &str,
        request: &UpdateEmployeeRequest,
    ) -> Result<(), AppError> {
        let path = format!("/employees/{}", id);
        self.execute_ok(
            self.request(Method::PUT, &path).json(request),
            "PUT",
            "/employees/{id}",
        )
        .await
    }

    pub async fn delete_employee(&self, id: &str) -> Result<(), AppError> {
        let path = format!("/employees/{}", id);
        self.execute_ok(self.request(Method::DELETE, &path), "DELETE", "/employees/{id}")
            .await
    }

    // ---- 历史记录 ----

    /// 工资发放历史。employee_id 作为服务端过滤参数传递，
    /// 调用方仍会按员工过滤结果，兼容忽略该参数的后端
    pub async fn salary_records(
        &self,
        company_id: Option<&str>,
        employee_id: Option<&str>,
    ) -> Result<Vec<PayrollRecord>, AppError> {
        let path = "/employees/salary-records";
        self.execute(
            history_query(self.request(Method::GET, path), company_id, employee_id),
            "GET",
            path,
        )
        .await
    }

    /// 请假历史
    pub async fn leave_records(
        &self,
        company_id: Option<&str>,
        employee_id: Option<&str>,
    ) -> Result<Vec<LeaveRecord>, AppError> {
        let path = "/employees/leaves";
        self.execute(
            history_query(self.request(Method::GET, path), company_id, employee_id),
            "GET",
            path,
        )
        .await
    }
}

/// 历史查询参数：缺失的标识不发送参数
fn history_query(
    mut req: RequestBuilder,
    company_id: Option<&str>,
    employee_id: Option<&str>,
) -> RequestBuilder {
    if let Some(id) = company_id {
        req = req.query(&[("companyId", id)]);
    }
    if let Some(id) = employee_id {
        req = req.query(&[("employeeId", id)]);
    }
    req
}

/// 服务端错误体，尽力提取 message 字段
#[derive(Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    message: Option<String>,
}

async fn extract_error_message(response: reqwest::Response) -> Option<String> {
    let body = response.text().await.ok()?;
    serde_json::from_str::<ApiErrorBody>(&body).ok()?.message
}

/// 指标用静态状态标签
fn status_label(status: StatusCode) -> &'static str {
    match status.as_u16() {
        200 => "200",
        201 => "201",
        204 => "204",
        400 => "400",
        401 => "401",
        403 => "403",
        404 => "404",
        500 => "500",
        _ => "other",
    }
}
