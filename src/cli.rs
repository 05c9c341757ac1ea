//! 命令行定义
//! 浏览器路由在终端侧落为子命令树

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "hrm-console", version, about = "HR administration console")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Sign in as an employee
    Login {
        /// Country calling code prefixed to the phone number
        #[arg(long, default_value = "+91")]
        country_code: String,

        #[arg(long)]
        phone: String,

        #[arg(long)]
        password: String,
    },

    /// Clear the stored session
    Logout,

    /// Employee management
    Employees {
        #[command(subcommand)]
        command: EmployeesCommand,
    },

    /// Billing and subscription
    Billing {
        #[command(subcommand)]
        command: BillingCommand,
    },
}

#[derive(Subcommand)]
pub enum EmployeesCommand {
    /// List employees, optionally filtered by first/last name
    List {
        #[arg(long, default_value = "")]
        search: String,
    },

    /// Onboard a new employee
    Add {
        #[arg(long)]
        first_name: String,

        #[arg(long)]
        last_name: String,

        #[arg(long)]
        email: String,

        #[arg(long)]
        phone: String,

        /// Initial password; sent verbatim, an empty value is allowed
        #[arg(long, default_value = "")]
        password: String,

        #[arg(long)]
        position: String,

        #[arg(long, default_value = "")]
        department: String,

        #[arg(long)]
        salary: f64,

        #[arg(long, default_value = "Active")]
        status: String,

        #[arg(long, default_value = "General")]
        category: String,

        #[arg(long, default_value_t = 1)]
        free_leaves_per_month: u32,

        #[arg(long, default_value_t = 6)]
        working_days_per_week: u32,
    },

    /// Update an existing employee; omitted fields keep their value,
    /// an omitted password means "no change"
    Update {
        id: String,

        #[arg(long)]
        first_name: Option<String>,

        #[arg(long)]
        last_name: Option<String>,

        #[arg(long)]
        email: Option<String>,

        #[arg(long)]
        phone: Option<String>,

        #[arg(long)]
        password: Option<String>,

        #[arg(long)]
        position: Option<String>,

        #[arg(long)]
        department: Option<String>,

        #[arg(long)]
        salary: Option<f64>,

        #[arg(long)]
        status: Option<String>,

        #[arg(long)]
        category: Option<String>,

        #[arg(long)]
        free_leaves_per_month: Option<u32>,

        #[arg(long)]
        working_days_per_week: Option<u32>,
    },

    /// Delete an employee (asks for confirmation)
    Rm {
        id: String,

        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },

    /// Show one employee's payroll and leave ledger
    Ledger { id: String },
}

#[derive(Subcommand)]
pub enum BillingCommand {
    /// Show current plan and subscription status
    Status,

    /// List available plans
    Plans,

    /// Renew the subscription for another 30 days
    Renew,
}
