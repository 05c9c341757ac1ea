//! 订阅与套餐模型
//!
//! 过期状态和剩余天数不落盘，由订阅截止时间与调用方提供的当前时刻现算。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 订阅套餐
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Plan {
    pub name: String,
    pub price: i64,
    pub description: String,

    #[serde(default)]
    pub features: Vec<String>,

    #[serde(default)]
    pub popular: bool,
}

/// 套餐接口不可用时的固定三档降级数据
///
/// 这是刻意的降级路径：拉取失败不向用户报错，直接展示这份表。
pub fn fallback_plans() -> Vec<Plan> {
    vec![
        Plan {
            name: "Starter".to_string(),
            price: 999,
            description: "Basic features for small teams".to_string(),
            features: vec![
                "Up to 10 Employees".to_string(),
                "Basic Invoicing".to_string(),
                "Finance Tracking".to_string(),
            ],
            popular: false,
        },
        Plan {
            name: "Growth".to_string(),
            price: 2999,
            description: "Scaling operations for medium firms".to_string(),
            features: vec![
                "Unlimited Employees".to_string(),
                "Payroll Module".to_string(),
                "Advanced Analytics".to_string(),
                "Inventory Management".to_string(),
            ],
            popular: true,
        },
        Plan {
            name: "Enterprise".to_string(),
            price: 7999,
            description: "Complete ERP suite for large organizations".to_string(),
            features: vec![
                "Custom Integrations".to_string(),
                "Dedicated Support".to_string(),
                "White-labeling".to_string(),
                "API Access".to_string(),
            ],
            popular: false,
        },
    ]
}

/// 公司配置（订阅数据来源）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyConfig {
    pub company: CompanyInfo,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyInfo {
    #[serde(default)]
    pub name: Option<String>,

    /// 当前套餐名
    #[serde(default)]
    pub plan: Option<String>,

    /// 订阅截止时间
    #[serde(default)]
    pub subscription_ends_at: Option<DateTime<Utc>>,
}

/// 渲染时现算的订阅状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriptionStatus {
    pub expired: bool,

    /// 展示用剩余天数：过期或无截止时间时为 0，否则为 (截止 − 当前) 按天向上取整
    pub days_remaining: i64,
}

impl SubscriptionStatus {
    pub fn evaluate(ends_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> Self {
        match ends_at {
            None => Self { expired: false, days_remaining: 0 },
            Some(end) if end < now => Self { expired: true, days_remaining: 0 },
            Some(end) => {
                let secs = (end - now).num_seconds();
                Self {
                    expired: false,
                    days_remaining: (secs + 86_399) / 86_400,
                }
            }
        }
    }
}

/// 续订请求
#[derive(Debug, Serialize)]
pub struct RenewSubscriptionRequest {
    pub days: u32,
}

/// 续订响应
#[derive(Debug, Clone, Deserialize)]
pub struct RenewResponse {
    #[serde(default)]
    pub message: Option<String>,

    #[serde(default, rename = "subscriptionEndsAt")]
    pub subscription_ends_at: Option<DateTime<Utc>>,
}
