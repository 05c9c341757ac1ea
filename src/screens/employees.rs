//! 员工管理屏
//!
//! 员工集合按会话中的租户标识拉取；创建/编辑共用一份固定字段表单；删除
//! 需要交互确认，成功后只做本地移除不重新拉取；台账视图并行拉取工资与
//! 请假两类历史再按员工过滤。

use crate::client::ApiClient;
use crate::error::AppError;
use crate::models::employee::{Employee, EmployeeForm};
use crate::models::history::Ledger;
use crate::output::Confirm;
use crate::session::SessionStore;

/// 员工列表与编辑状态
#[derive(Default)]
pub struct EmployeesScreen {
    /// 后端集合的临时本地副本
    pub employees: Vec<Employee>,

    pub search_term: String,

    /// 创建/编辑表单
    pub form: EmployeeForm,

    /// 正在编辑的员工标识；None 表示创建
    pub editing: Option<String>,

    pub loading: bool,
}

impl EmployeesScreen {
    pub fn new() -> Self {
        Self::default()
    }

    /// 拉取租户范围内的员工集合
    pub async fn load(
        &mut self,
        client: &ApiClient,
        session: &SessionStore,
    ) -> Result<(), AppError> {
        self.loading = true;
        let result = client.list_employees(session.company_id().as_deref()).await;
        self.loading = false;

        self.employees = result?;
        tracing::debug!(count = self.employees.len(), "Employees loaded");
        Ok(())
    }

    /// 搜索过滤：姓或名包含搜索词（大小写不敏感）。O(n) 扫描
    pub fn filtered(&self) -> Vec<&Employee> {
        let term = self.search_term.to_lowercase();
        self.employees
            .iter()
            .filter(|emp| {
                emp.first_name.to_lowercase().contains(&term)
                    || emp.last_name.to_lowercase().contains(&term)
            })
            .collect()
    }

    pub fn find(&self, id: &str) -> Option<&Employee> {
        self.employees.iter().find(|emp| emp.id == id)
    }

    /// 打开创建表单：重置为默认值
    pub fn open_create(&mut self) {
        self.form = EmployeeForm::default();
        self.editing = None;
    }

    /// 打开编辑表单：从现有记录预填充，密码留空
    pub fn open_edit(&mut self, id: &str) -> bool {
        match self.find(id) {
            Some(emp) => {
                self.form = EmployeeForm::from_employee(emp);
                self.editing = Some(id.to_string());
                true
            }
            None => false,
        }
    }

    /// 保存表单：编辑走更新（空密码省略字段），否则走创建（密码原样，
    /// 附带租户标识）。成功后重置表单并重新拉取列表
    pub async fn save(
        &mut self,
        client: &ApiClient,
        session: &SessionStore,
    ) -> Result<(), AppError> {
        match &self.editing {
            Some(id) => {
                client.update_employee(id, &self.form.update_request()).await?;
                tracing::info!(id = %id, "Employee updated");
            }
            None => {
                let company_id = session.company_id().unwrap_or_default();
                client.create_employee(&self.form.create_request(company_id)).await?;
                tracing::info!("Employee created");
            }
        }

        self.form = EmployeeForm::default();
        self.editing = None;
        self.load(client, session).await
    }

    /// 删除员工。确认被拒绝时不发任何请求并返回 false；
    /// 确认后发一次删除请求，成功后仅从本地列表移除该标识
    pub async fn delete(
        &mut self,
        client: &ApiClient,
        confirm: &dyn Confirm,
        id: &str,
    ) -> Result<bool, AppError> {
        if !confirm.confirm("Are you sure you want to delete this employee?") {
            return Ok(false);
        }

        client.delete_employee(id).await?;
        self.employees.retain(|emp| emp.id != id);
        tracing::info!(id = %id, "Employee deleted");
        Ok(true)
    }

    /// 查看台账：并行拉取两类历史，按选中员工过滤
    pub async fn view_ledger(
        &self,
        client: &ApiClient,
        session: &SessionStore,
        employee_id: &str,
    ) -> Result<Ledger, AppError> {
        let company_id = session.company_id();

        let (payroll, leaves) = tokio::try_join!(
            client.salary_records(company_id.as_deref(), Some(employee_id)),
            client.leave_records(company_id.as_deref(), Some(employee_id)),
        )?;

        Ok(Ledger::for_employee(payroll, leaves, employee_id))
    }
}
