//! 工资与请假历史记录
//!
//! 两类历史都按租户整批拉取，后端以联表对象形式返回员工引用
//! （employeeId._id）。台账视图按选中员工过滤两个集合。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 联表返回的员工引用
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeRef {
    #[serde(rename = "_id")]
    pub id: String,
}

/// 工资发放记录（只读）
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayrollRecord {
    /// 缺失表示记录未关联到员工，过滤时一律排除
    #[serde(default, rename = "employeeId")]
    pub employee: Option<EmployeeRef>,

    pub pay_period: String,
    pub amount: f64,
    pub payment_date: DateTime<Utc>,

    #[serde(default)]
    pub remarks: Option<String>,
}

impl PayrollRecord {
    pub fn belongs_to(&self, employee_id: &str) -> bool {
        self.employee.as_ref().is_some_and(|r| r.id == employee_id)
    }
}

/// 请假记录（只读）
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveRecord {
    #[serde(default, rename = "employeeId")]
    pub employee: Option<EmployeeRef>,

    #[serde(rename = "type")]
    pub leave_type: String,

    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub status: String,
}

impl LeaveRecord {
    pub fn belongs_to(&self, employee_id: &str) -> bool {
        self.employee.as_ref().is_some_and(|r| r.id == employee_id)
    }
}

/// 单个员工的台账：工资历史 + 请假历史
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    pub payroll: Vec<PayrollRecord>,
    pub leaves: Vec<LeaveRecord>,
}

impl Ledger {
    /// 从整批历史中过滤出指定员工的记录
    pub fn for_employee(
        payroll: Vec<PayrollRecord>,
        leaves: Vec<LeaveRecord>,
        employee_id: &str,
    ) -> Self {
        Self {
            payroll: payroll.into_iter().filter(|r| r.belongs_to(employee_id)).collect(),
            leaves: leaves.into_iter().filter(|r| r.belongs_to(employee_id)).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.payroll.is_empty() && self.leaves.is_empty()
    }
}
