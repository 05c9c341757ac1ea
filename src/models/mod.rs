//! 与后端交换的领域模型

pub mod auth;
pub mod billing;
pub mod employee;
pub mod history;

pub use auth::{LoginRequest, LoginResponse};
pub use billing::{CompanyConfig, CompanyInfo, Plan, SubscriptionStatus};
pub use employee::{CreateEmployeeRequest, Employee, EmployeeForm, UpdateEmployeeRequest};
pub use history::{LeaveRecord, Ledger, PayrollRecord};
