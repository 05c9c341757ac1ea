use chrono::Utc;
use clap::Parser;
use hrm_console::cli::{BillingCommand, Cli, Command, EmployeesCommand};
use hrm_console::client::ApiClient;
use hrm_console::config::AppConfig;
use hrm_console::error::AppError;
use hrm_console::output::{self, AlwaysConfirm, Confirm, ConsoleNotifier, ConsolePrompt};
use hrm_console::screens::{BillingScreen, EmployeesScreen, LoginScreen};
use hrm_console::session::SessionStore;
use hrm_console::telemetry;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Ok(profile) = std::env::var("HRM_ENV") {
        dotenv::from_filename(format!(".env.{}", profile)).ok();
    } else {
        dotenv::from_filename(".env.local").ok();
        dotenv::dotenv().ok();
    }

    let config = AppConfig::from_env().map_err(|e| {
        eprintln!("Configuration error: {}", e);
        anyhow::anyhow!("Failed to load configuration: {}", e)
    })?;

    telemetry::init_telemetry(&config);
    telemetry::init_metrics();

    let session = Arc::new(
        SessionStore::load(config.session.file.clone())
            .map_err(|e| anyhow::anyhow!(e.user_message()))?,
    );
    let client =
        ApiClient::new(&config, session.clone()).map_err(|e| anyhow::anyhow!(e.user_message()))?;

    if let Err(e) = run_command(cli.command, &client, &session).await {
        match e {
            AppError::Unauthenticated { redirect } => {
                // 全局认证失败处理：凭证已被客户端清除，这里执行"跳转"
                eprintln!("Session expired. Please sign in again at {}", redirect.path());
            }
            other => eprintln!("✖ {}", other.user_message()),
        }
        std::process::exit(1);
    }

    Ok(())
}

async fn run_command(
    command: Command,
    client: &ApiClient,
    session: &SessionStore,
) -> Result<(), AppError> {
    match command {
        Command::Login { country_code, phone, password } => {
            let mut screen = LoginScreen::new(country_code, phone, password);
            if screen.submit(client, session).await {
                println!("Signed in. Continue at /employee-dashboard");
                Ok(())
            } else {
                let message = screen
                    .error
                    .unwrap_or_else(|| "Phone number and password are required".to_string());
                eprintln!("✖ {}", message);
                std::process::exit(1);
            }
        }

        Command::Logout => {
            session.clear()?;
            println!("Signed out.");
            Ok(())
        }

        Command::Employees { command } => run_employees(command, client, session).await,
        Command::Billing { command } => run_billing(command, client).await,
    }
}

async fn run_employees(
    command: EmployeesCommand,
    client: &ApiClient,
    session: &SessionStore,
) -> Result<(), AppError> {
    let mut screen = EmployeesScreen::new();

    match command {
        EmployeesCommand::List { search } => {
            screen.load(client, session).await?;
            screen.search_term = search;
            output::render_employees(&screen.filtered());
            Ok(())
        }

        EmployeesCommand::Add {
            first_name,
            last_name,
            email,
            phone,
            password,
            position,
            department,
            salary,
            status,
            category,
            free_leaves_per_month,
            working_days_per_week,
        } => {
            screen.open_create();
            let form = &mut screen.form;
            form.first_name = first_name;
            form.last_name = last_name;
            form.email = email;
            form.phone = phone;
            form.password = password;
            form.position = position;
            form.department = department;
            form.salary = salary;
            form.status = status;
            form.category = category;
            form.free_leaves_per_month = free_leaves_per_month;
            form.working_days_per_week = working_days_per_week;

            save_with_feedback(&mut screen, client, session).await
        }

        EmployeesCommand::Update {
            id,
            first_name,
            last_name,
            email,
            phone,
            password,
            position,
            department,
            salary,
            status,
            category,
            free_leaves_per_month,
            working_days_per_week,
        } => {
            screen.load(client, session).await?;
            if !screen.open_edit(&id) {
                eprintln!("✖ Employee {} not found", id);
                std::process::exit(1);
            }

            let form = &mut screen.form;
            if let Some(v) = first_name {
                form.first_name = v;
            }
            if let Some(v) = last_name {
                form.last_name = v;
            }
            if let Some(v) = email {
                form.email = v;
            }
            if let Some(v) = phone {
                form.phone = v;
            }
            if let Some(v) = password {
                // 省略时表单密码保持空串，更新请求里整个字段被省略
                form.password = v;
            }
            if let Some(v) = position {
                form.position = v;
            }
            if let Some(v) = department {
                form.department = v;
            }
            if let Some(v) = salary {
                form.salary = v;
            }
            if let Some(v) = status {
                form.status = v;
            }
            if let Some(v) = category {
                form.category = v;
            }
            if let Some(v) = free_leaves_per_month {
                form.free_leaves_per_month = v;
            }
            if let Some(v) = working_days_per_week {
                form.working_days_per_week = v;
            }

            save_with_feedback(&mut screen, client, session).await
        }

        EmployeesCommand::Rm { id, yes } => {
            screen.load(client, session).await?;

            let confirm: &dyn Confirm = if yes { &AlwaysConfirm } else { &ConsolePrompt };
            match screen.delete(client, confirm, &id).await {
                Ok(true) => {
                    println!("Employee deleted. {} employee(s) remaining.", screen.employees.len());
                    Ok(())
                }
                Ok(false) => {
                    println!("Cancelled.");
                    Ok(())
                }
                Err(e) if e.is_unauthenticated() => Err(e),
                Err(e) => {
                    tracing::warn!(error = %e, "Employee deletion failed");
                    eprintln!("✖ Failed to delete employee");
                    std::process::exit(1);
                }
            }
        }

        EmployeesCommand::Ledger { id } => {
            screen.load(client, session).await?;
            let name = match screen.find(&id) {
                Some(emp) => emp.full_name(),
                None => {
                    eprintln!("✖ Employee {} not found", id);
                    std::process::exit(1);
                }
            };

            let ledger = screen.view_ledger(client, session, &id).await?;
            output::render_ledger(&name, &ledger);
            Ok(())
        }
    }
}

/// 保存表单并按原有口径反馈：服务端消息优先，缺省走固定文案
async fn save_with_feedback(
    screen: &mut EmployeesScreen,
    client: &ApiClient,
    session: &SessionStore,
) -> Result<(), AppError> {
    match screen.save(client, session).await {
        Ok(()) => {
            println!("Employee saved. {} employee(s) on record.", screen.employees.len());
            Ok(())
        }
        Err(e) if e.is_unauthenticated() => Err(e),
        Err(e) => {
            let message = e
                .server_message()
                .map(str::to_string)
                .unwrap_or_else(|| "Failed to save employee".to_string());
            eprintln!("✖ {}", message);
            std::process::exit(1);
        }
    }
}

async fn run_billing(command: BillingCommand, client: &ApiClient) -> Result<(), AppError> {
    let mut screen = BillingScreen::new();

    match command {
        BillingCommand::Status => {
            screen.load(client).await?;
            let status = screen.subscription_status(Utc::now());
            if let Some(company) = &screen.company {
                output::render_subscription(company, status);
            }
            Ok(())
        }

        BillingCommand::Plans => {
            screen.load(client).await?;
            let current = screen.company.as_ref().and_then(|c| c.plan.clone());
            output::render_plans(&screen.plans, current.as_deref());
            Ok(())
        }

        BillingCommand::Renew => {
            screen.renew(client, &ConsoleNotifier).await?;
            if let Some(company) = &screen.company {
                output::render_subscription(company, screen.subscription_status(Utc::now()));
            }
            Ok(())
        }
    }
}
