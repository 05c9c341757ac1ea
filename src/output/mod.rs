//! 终端输出与交互
//!
//! 浏览器里的 toast 与 confirm 在终端侧落为两个小 trait，屏幕控制器只
//! 依赖 trait，测试注入记录器，命令行注入真实实现。

use crate::models::billing::{CompanyInfo, Plan, SubscriptionStatus};
use crate::models::employee::{Employee, EmployeeStatus};
use crate::models::history::Ledger;
use std::io::Write;

/// 通知（toast 的终端替身）
pub trait Notifier {
    fn success(&self, message: &str);
    fn error(&self, message: &str);
}

/// 终端通知实现
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn success(&self, message: &str) {
        println!("✔ {}", message);
    }

    fn error(&self, message: &str) {
        eprintln!("✖ {}", message);
    }
}

/// 交互确认
pub trait Confirm {
    fn confirm(&self, prompt: &str) -> bool;
}

/// 终端确认：读取标准输入，y/yes 视为确认
pub struct ConsolePrompt;

impl Confirm for ConsolePrompt {
    fn confirm(&self, prompt: &str) -> bool {
        print!("{} [y/N] ", prompt);
        if std::io::stdout().flush().is_err() {
            return false;
        }

        let mut answer = String::new();
        if std::io::stdin().read_line(&mut answer).is_err() {
            return false;
        }

        matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
    }
}

/// 跳过交互（--yes）
pub struct AlwaysConfirm;

impl Confirm for AlwaysConfirm {
    fn confirm(&self, _prompt: &str) -> bool {
        true
    }
}

/// 员工列表
pub fn render_employees(employees: &[&Employee]) {
    if employees.is_empty() {
        println!("No employees found.");
        return;
    }

    println!(
        "{:<26} {:<22} {:<20} {:<10} {:>12}",
        "ID", "NAME", "POSITION", "STATUS", "SALARY"
    );
    for emp in employees {
        let status = match emp.status() {
            EmployeeStatus::Active => "Active",
            EmployeeStatus::Inactive => "Inactive",
        };
        println!(
            "{:<26} {:<22} {:<20} {:<10} {:>12}",
            emp.id,
            emp.full_name(),
            emp.position,
            status,
            format!("₹{}", emp.salary)
        );
    }
    println!("{} employee(s)", employees.len());
}

/// 单个员工的台账
pub fn render_ledger(name: &str, ledger: &Ledger) {
    println!("Ledger for {}", name);

    println!("\nSalary history:");
    if ledger.payroll.is_empty() {
        println!("  No payroll records found.");
    } else {
        for rec in &ledger.payroll {
            println!(
                "  {:<14} {:>12}  {}  {}",
                rec.pay_period,
                format!("₹{}", rec.amount),
                rec.payment_date.format("%Y-%m-%d"),
                rec.remarks.as_deref().unwrap_or("Salary Disbursement")
            );
        }
    }

    println!("\nLeave requests:");
    if ledger.leaves.is_empty() {
        println!("  No leave records found.");
    } else {
        for rec in &ledger.leaves {
            println!(
                "  {:<10} {} - {}  {}",
                rec.leave_type,
                rec.start_date.format("%Y-%m-%d"),
                rec.end_date.format("%Y-%m-%d"),
                rec.status
            );
        }
    }
}

/// 套餐列表
pub fn render_plans(plans: &[Plan], current_plan: Option<&str>) {
    for plan in plans {
        let mut marker = String::new();
        if plan.popular {
            marker.push_str(" [recommended]");
        }
        if current_plan == Some(plan.name.as_str()) {
            marker.push_str(" [current]");
        }
        println!("{} — ₹{}/month{}", plan.name, plan.price, marker);
        println!("  {}", plan.description);
        for feature in &plan.features {
            println!("  - {}", feature);
        }
        println!();
    }
}

/// 订阅状态
pub fn render_subscription(company: &CompanyInfo, status: SubscriptionStatus) {
    if let Some(name) = &company.name {
        println!("Company: {}", name);
    }
    println!("Plan: {}", company.plan.as_deref().unwrap_or("-"));

    match company.subscription_ends_at {
        Some(ends_at) if status.expired => {
            println!("Status: EXPIRED (ended {})", ends_at.format("%Y-%m-%d"));
            println!("Days left: 0");
        }
        Some(ends_at) => {
            println!("Status: Active (next billing {})", ends_at.format("%Y-%m-%d"));
            println!("Days left: {}", status.days_remaining);
        }
        None => {
            println!("Status: no subscription end date on record");
        }
    }
}
