//! 测试公共模块
//! 提供一个内置后端替身、会话与配置辅助函数

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use hrm_console::config::{ApiConfig, AppConfig, LoggingConfig, SessionConfig};
use hrm_console::output::{Confirm, Notifier};
use hrm_console::session::SessionStore;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

/// 后端替身记录到的一次请求
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub method: String,
    pub path: String,
    pub authorization: Option<String>,
    pub company_header: Option<String>,
    pub query: HashMap<String, String>,
    pub body: Option<Value>,
}

/// 后端替身的可编程状态
pub struct BackendState {
    pub requests: Vec<CapturedRequest>,

    pub employees: Vec<Value>,
    pub salary_records: Vec<Value>,
    pub leave_records: Vec<Value>,
    pub plans: Vec<Value>,
    pub company: Value,
    pub login_response: Value,

    /// 所有请求返回 401
    pub reject_all: bool,

    /// 套餐接口返回 500
    pub plans_fail: bool,

    /// 续订接口返回 500
    pub renew_fail: bool,

    /// 登录接口返回 400 与该消息
    pub login_error: Option<String>,
}

impl Default for BackendState {
    fn default() -> Self {
        Self {
            requests: Vec::new(),
            employees: Vec::new(),
            salary_records: Vec::new(),
            leave_records: Vec::new(),
            plans: Vec::new(),
            company: json!({
                "company": {
                    "name": "Acme Traders",
                    "plan": "Growth",
                    "subscriptionEndsAt": "2026-09-01T00:00:00Z"
                }
            }),
            login_response: json!({
                "token": "issued-token",
                "role": "employee",
                "companyId": "company-9"
            }),
            reject_all: false,
            plans_fail: false,
            renew_fail: false,
            login_error: None,
        }
    }
}

type Shared = Arc<Mutex<BackendState>>;

/// 运行中的后端替身
pub struct TestBackend {
    pub state: Shared,
    pub base_url: String,
}

impl TestBackend {
    /// 记录到的全部请求
    pub fn requests(&self) -> Vec<CapturedRequest> {
        self.state.lock().unwrap().requests.clone()
    }

    /// 指定方法+路径的请求
    pub fn requests_for(&self, method: &str, path: &str) -> Vec<CapturedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.method == method && r.path == path)
            .collect()
    }
}

/// 启动后端替身，绑定随机端口
pub async fn spawn_backend(state: BackendState) -> TestBackend {
    let shared: Shared = Arc::new(Mutex::new(state));

    let app = Router::new()
        .route("/api/auth/plans", get(plans_handler))
        .route("/api/auth/login", post(login_handler))
        .route("/api/company/config", get(company_config_handler))
        .route("/api/company/renew-subscription", post(renew_handler))
        .route("/api/employees", get(list_employees_handler).post(create_employee_handler))
        .route("/api/employees/salary-records", get(salary_records_handler))
        .route("/api/employees/leaves", get(leave_records_handler))
        .route("/api/employees/{id}", put(update_employee_handler).delete(delete_employee_handler))
        .with_state(shared.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    TestBackend {
        state: shared,
        base_url: format!("http://{}", addr),
    }
}

fn capture(
    method: &str,
    path: &str,
    headers: &HeaderMap,
    query: &HashMap<String, String>,
    body: Option<&Value>,
) -> CapturedRequest {
    CapturedRequest {
        method: method.to_string(),
        path: path.to_string(),
        authorization: headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        company_header: headers
            .get("x-company-id")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        query: query.clone(),
        body: body.cloned(),
    }
}

fn unauthorized() -> Response {
    (StatusCode::UNAUTHORIZED, Json(json!({"message": "Unauthorized"}))).into_response()
}

async fn plans_handler(
    State(state): State<Shared>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    let mut s = state.lock().unwrap();
    s.requests.push(capture("GET", "/api/auth/plans", &headers, &query, None));

    if s.reject_all {
        return unauthorized();
    }
    if s.plans_fail {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"message": "plans backend offline"})),
        )
            .into_response();
    }
    Json(s.plans.clone()).into_response()
}

async fn login_handler(
    State(state): State<Shared>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
    Json(body): Json<Value>,
) -> Response {
    let mut s = state.lock().unwrap();
    s.requests.push(capture("POST", "/api/auth/login", &headers, &query, Some(&body)));

    if s.reject_all {
        return unauthorized();
    }
    if let Some(message) = &s.login_error {
        return (StatusCode::BAD_REQUEST, Json(json!({"message": message}))).into_response();
    }
    Json(s.login_response.clone()).into_response()
}

async fn company_config_handler(
    State(state): State<Shared>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    let mut s = state.lock().unwrap();
    s.requests.push(capture("GET", "/api/company/config", &headers, &query, None));

    if s.reject_all {
        return unauthorized();
    }
    Json(s.company.clone()).into_response()
}

async fn renew_handler(
    State(state): State<Shared>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
    Json(body): Json<Value>,
) -> Response {
    let mut s = state.lock().unwrap();
    s.requests
        .push(capture("POST", "/api/company/renew-subscription", &headers, &query, Some(&body)));

    if s.reject_all {
        return unauthorized();
    }
    if s.renew_fail {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"message": "payment gateway unavailable"})),
        )
            .into_response();
    }

    // 续订生效：更新服务端配置，客户端刷新后能看到新截止时间
    s.company = json!({
        "company": {
            "name": "Acme Traders",
            "plan": "Growth",
            "subscriptionEndsAt": "2026-12-31T00:00:00Z"
        }
    });
    Json(json!({"message": "Subscription renewed"})).into_response()
}

async fn list_employees_handler(
    State(state): State<Shared>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    let mut s = state.lock().unwrap();
    s.requests.push(capture("GET", "/api/employees", &headers, &query, None));

    if s.reject_all {
        return unauthorized();
    }
    Json(s.employees.clone()).into_response()
}

async fn create_employee_handler(
    State(state): State<Shared>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
    Json(body): Json<Value>,
) -> Response {
    let mut s = state.lock().unwrap();
    s.requests.push(capture("POST", "/api/employees", &headers, &query, Some(&body)));

    if s.reject_all {
        return unauthorized();
    }

    let mut created = body;
    created["_id"] = json!(format!("emp-{}", s.employees.len() + 1));
    s.employees.push(created.clone());
    (StatusCode::CREATED, Json(created)).into_response()
}

async fn update_employee_handler(
    State(state): State<Shared>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
    Json(body): Json<Value>,
) -> Response {
    let mut s = state.lock().unwrap();
    s.requests
        .push(capture("PUT", &format!("/api/employees/{}", id), &headers, &query, Some(&body)));

    if s.reject_all {
        return unauthorized();
    }
    Json(json!({"message": "updated"})).into_response()
}

async fn delete_employee_handler(
    State(state): State<Shared>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    let mut s = state.lock().unwrap();
    s.requests
        .push(capture("DELETE", &format!("/api/employees/{}", id), &headers, &query, None));

    if s.reject_all {
        return unauthorized();
    }
    s.employees.retain(|emp| emp["_id"] != json!(id));
    Json(json!({"message": "deleted"})).into_response()
}

async fn salary_records_handler(
    State(state): State<Shared>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    let mut s = state.lock().unwrap();
    s.requests
        .push(capture("GET", "/api/employees/salary-records", &headers, &query, None));

    if s.reject_all {
        return unauthorized();
    }
    // 刻意忽略 employeeId 过滤参数，整批返回，客户端必须自行过滤
    Json(s.salary_records.clone()).into_response()
}

async fn leave_records_handler(
    State(state): State<Shared>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    let mut s = state.lock().unwrap();
    s.requests.push(capture("GET", "/api/employees/leaves", &headers, &query, None));

    if s.reject_all {
        return unauthorized();
    }
    Json(s.leave_records.clone()).into_response()
}

// ---- 客户端侧辅助 ----

/// 指向后端替身的测试配置
pub fn test_config(base_url: &str, session_file: PathBuf) -> AppConfig {
    AppConfig {
        api: ApiConfig {
            base_url: base_url.to_string(),
            timeout_secs: 5,
        },
        session: SessionConfig { file: session_file },
        logging: LoggingConfig {
            level: "debug".to_string(),
            format: "default".to_string(),
        },
    }
}

/// 每个测试独立的会话文件路径
pub fn temp_session_path() -> PathBuf {
    std::env::temp_dir().join(format!("hrm-console-test-{}.json", uuid::Uuid::new_v4()))
}

/// 已登录的会话存储
pub fn authed_session(path: PathBuf, role: &str) -> SessionStore {
    let store = SessionStore::load(path).unwrap();
    store
        .set_credentials(
            "tok-123".to_string(),
            Some("company-9".to_string()),
            Some(role.to_string()),
        )
        .unwrap();
    store
}

// ---- 测试数据 ----

pub fn employee_json(id: &str, first: &str, last: &str) -> Value {
    json!({
        "_id": id,
        "firstName": first,
        "lastName": last,
        "email": format!("{}@example.com", first.to_lowercase()),
        "phone": "9000000000",
        "position": "Engineer",
        "salary": 100000,
        "status": "Active"
    })
}

pub fn payroll_json(employee_id: &str, period: &str) -> Value {
    json!({
        "employeeId": {"_id": employee_id},
        "payPeriod": period,
        "amount": 35000,
        "paymentDate": "2026-02-28T00:00:00Z",
        "remarks": "Salary Disbursement"
    })
}

pub fn leave_json(employee_id: &str, leave_type: &str) -> Value {
    json!({
        "employeeId": {"_id": employee_id},
        "type": leave_type,
        "startDate": "2026-03-02T00:00:00Z",
        "endDate": "2026-03-04T00:00:00Z",
        "status": "Approved"
    })
}

// ---- 注入用替身 ----

/// 记录通知内容
#[derive(Default)]
pub struct RecordingNotifier {
    pub successes: Mutex<Vec<String>>,
    pub errors: Mutex<Vec<String>>,
}

impl Notifier for RecordingNotifier {
    fn success(&self, message: &str) {
        self.successes.lock().unwrap().push(message.to_string());
    }

    fn error(&self, message: &str) {
        self.errors.lock().unwrap().push(message.to_string());
    }
}

/// 一律拒绝的确认
pub struct DeclineConfirm;

impl Confirm for DeclineConfirm {
    fn confirm(&self, _prompt: &str) -> bool {
        false
    }
}
