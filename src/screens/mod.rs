//! 屏幕控制器
//!
//! 每个屏幕是一个保存本地视图状态的控制器：发请求、存结果、按状态渲染。
//! 屏幕之间没有共享编排，只共用 API 客户端与会话存储。

pub mod billing;
pub mod employees;
pub mod login;

pub use billing::BillingScreen;
pub use employees::EmployeesScreen;
pub use login::LoginScreen;
