//! Employee domain models
//!
//! 员工记录由后端拥有，客户端只保存临时副本。创建/更新请求的差别在密码
//! 字段：创建请求原样携带表单里的密码（允许空串，不做校验），更新请求在
//! 密码为空时整个省略该字段，表示"不修改"。

use serde::{Deserialize, Serialize};

/// 员工记录（后端返回）
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    #[serde(rename = "_id")]
    pub id: String,

    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub position: String,

    #[serde(default)]
    pub department: Option<String>,

    pub salary: f64,

    /// Active / Inactive 等状态字符串
    pub status: String,

    #[serde(default)]
    pub category: Option<String>,

    /// 每月免费请假天数
    #[serde(default = "default_free_leaves")]
    pub free_leaves_per_month: u32,

    /// 每周工作日数
    #[serde(default = "default_working_days")]
    pub working_days_per_week: u32,
}

fn default_free_leaves() -> u32 {
    1
}

fn default_working_days() -> u32 {
    6
}

impl Employee {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn status(&self) -> EmployeeStatus {
        EmployeeStatus::from(self.status.as_str())
    }
}

/// 员工状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmployeeStatus {
    Active,
    Inactive,
}

impl From<&str> for EmployeeStatus {
    fn from(s: &str) -> Self {
        if s.eq_ignore_ascii_case("active") {
            EmployeeStatus::Active
        } else {
            EmployeeStatus::Inactive
        }
    }
}

/// 创建/编辑表单状态
///
/// 固定字段集。编辑时从现有记录预填充，密码留空。
#[derive(Debug, Clone)]
pub struct EmployeeForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    pub position: String,
    pub department: String,
    pub salary: f64,
    pub status: String,
    pub category: String,
    pub free_leaves_per_month: u32,
    pub working_days_per_week: u32,
}

impl Default for EmployeeForm {
    fn default() -> Self {
        Self {
            first_name: String::new(),
            last_name: String::new(),
            email: String::new(),
            phone: String::new(),
            password: String::new(),
            position: String::new(),
            department: String::new(),
            salary: 0.0,
            status: "Active".to_string(),
            category: "General".to_string(),
            free_leaves_per_month: 1,
            working_days_per_week: 6,
        }
    }
}

impl EmployeeForm {
    /// 编辑时从现有记录预填充，密码留空
    pub fn from_employee(emp: &Employee) -> Self {
        Self {
            first_name: emp.first_name.clone(),
            last_name: emp.last_name.clone(),
            email: emp.email.clone(),
            phone: emp.phone.clone(),
            password: String::new(),
            position: emp.position.clone(),
            department: emp.department.clone().unwrap_or_default(),
            salary: emp.salary,
            status: emp.status.clone(),
            category: emp.category.clone().unwrap_or_else(|| "General".to_string()),
            free_leaves_per_month: emp.free_leaves_per_month,
            working_days_per_week: emp.working_days_per_week,
        }
    }

    /// 创建请求：密码原样携带（空串也发送），附带租户标识
    pub fn create_request(&self, company_id: String) -> CreateEmployeeRequest {
        CreateEmployeeRequest {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            password: self.password.clone(),
            position: self.position.clone(),
            department: self.department.clone(),
            salary: self.salary,
            status: self.status.clone(),
            category: self.category.clone(),
            free_leaves_per_month: self.free_leaves_per_month,
            working_days_per_week: self.working_days_per_week,
            company_id,
        }
    }

    /// 更新请求：密码为空表示"不修改"，字段整个省略
    pub fn update_request(&self) -> UpdateEmployeeRequest {
        UpdateEmployeeRequest {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            password: if self.password.is_empty() {
                None
            } else {
                Some(self.password.clone())
            },
            position: self.position.clone(),
            department: self.department.clone(),
            salary: self.salary,
            status: self.status.clone(),
            category: self.category.clone(),
            free_leaves_per_month: self.free_leaves_per_month,
            working_days_per_week: self.working_days_per_week,
        }
    }
}

/// Create employee request
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEmployeeRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    pub position: String,
    pub department: String,
    pub salary: f64,
    pub status: String,
    pub category: String,
    pub free_leaves_per_month: u32,
    pub working_days_per_week: u32,
    pub company_id: String,
}

/// Update employee request
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEmployeeRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    pub position: String,
    pub department: String,
    pub salary: f64,
    pub status: String,
    pub category: String,
    pub free_leaves_per_month: u32,
    pub working_days_per_week: u32,
}
