//! 订阅计费屏
//!
//! 过期与剩余天数由公司配置里的订阅截止时间与当前时刻现算。套餐列表拉取
//! 失败走固定三档降级表，不向用户报错。续订成功后延迟一段时间重新拉取
//! 配置（整页刷新的替身），失败只发一条错误通知，不向上传播、不回滚。

use crate::client::ApiClient;
use crate::error::AppError;
use crate::models::billing::{fallback_plans, CompanyInfo, Plan, SubscriptionStatus};
use crate::output::Notifier;
use chrono::{DateTime, Utc};
use std::time::Duration;

/// 续订固定申请天数
const RENEW_DAYS: u32 = 30;

/// 续订成功到配置刷新之间的固定延迟
const RELOAD_DELAY: Duration = Duration::from_millis(1500);

/// 计费屏状态
pub struct BillingScreen {
    pub company: Option<CompanyInfo>,
    pub plans: Vec<Plan>,

    /// 续订中。唯一的防重复提交手段
    pub renewing: bool,

    reload_delay: Duration,
}

impl Default for BillingScreen {
    fn default() -> Self {
        Self {
            company: None,
            plans: Vec::new(),
            renewing: false,
            reload_delay: RELOAD_DELAY,
        }
    }
}

impl BillingScreen {
    pub fn new() -> Self {
        Self::default()
    }

    /// 测试用：覆盖刷新延迟
    pub fn with_reload_delay(mut self, delay: Duration) -> Self {
        self.reload_delay = delay;
        self
    }

    /// 拉取公司配置与套餐列表
    pub async fn load(&mut self, client: &ApiClient) -> Result<(), AppError> {
        self.company = Some(client.company_config().await?.company);
        self.load_plans(client).await
    }

    /// 拉取套餐列表。失败降级到固定三档表，仅认证失败向上传播
    pub async fn load_plans(&mut self, client: &ApiClient) -> Result<(), AppError> {
        match client.plans().await {
            Ok(plans) => {
                self.plans = plans;
                Ok(())
            }
            Err(e) if e.is_unauthenticated() => Err(e),
            Err(e) => {
                tracing::debug!(error = %e, "Plans fetch failed, using fallback table");
                self.plans = fallback_plans();
                Ok(())
            }
        }
    }

    /// 现算订阅状态
    pub fn subscription_status(&self, now: DateTime<Utc>) -> SubscriptionStatus {
        SubscriptionStatus::evaluate(
            self.company.as_ref().and_then(|c| c.subscription_ends_at),
            now,
        )
    }

    pub fn is_current_plan(&self, plan_name: &str) -> bool {
        self.company
            .as_ref()
            .and_then(|c| c.plan.as_deref())
            .is_some_and(|plan| plan == plan_name)
    }

    /// 续订。成败都只通过通知反馈，仅认证失败向上传播
    pub async fn renew(
        &mut self,
        client: &ApiClient,
        notifier: &dyn Notifier,
    ) -> Result<(), AppError> {
        if self.renewing {
            return Ok(());
        }
        self.renewing = true;

        let result = client.renew_subscription(RENEW_DAYS).await;

        self.renewing = false;

        match result {
            Ok(_) => {
                notifier.success("Subscription renewed successfully! All features are now unlocked.");

                // 等后端配置生效后重新拉取，代替整页刷新
                tokio::time::sleep(self.reload_delay).await;
                match client.company_config().await {
                    Ok(config) => self.company = Some(config.company),
                    Err(e) => tracing::warn!(error = %e, "Config refresh after renewal failed"),
                }
                Ok(())
            }
            Err(e) if e.is_unauthenticated() => Err(e),
            Err(e) => {
                tracing::warn!(error = %e, "Subscription renewal failed");
                notifier.error("Renewal failed. Please try again later.");
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration as ChronoDuration;

    fn now() -> DateTime<Utc> {
        "2026-08-07T12:00:00Z".parse().unwrap()
    }

    fn screen_with_company(ends_at: Option<DateTime<Utc>>, plan: Option<&str>) -> BillingScreen {
        BillingScreen {
            company: Some(CompanyInfo {
                name: Some("Acme".to_string()),
                plan: plan.map(str::to_string),
                subscription_ends_at: ends_at,
            }),
            ..BillingScreen::default()
        }
    }

    #[test]
    fn test_status_from_company_config() {
        let screen = screen_with_company(Some(now() + ChronoDuration::days(10)), Some("Growth"));
        let status = screen.subscription_status(now());
        assert!(!status.expired);
        assert_eq!(status.days_remaining, 10);
    }

    #[test]
    fn test_status_expired() {
        let screen = screen_with_company(Some(now() - ChronoDuration::days(1)), Some("Growth"));
        let status = screen.subscription_status(now());
        assert!(status.expired);
        assert_eq!(status.days_remaining, 0);
    }

    #[test]
    fn test_status_without_company() {
        let screen = BillingScreen::new();
        let status = screen.subscription_status(now());
        assert!(!status.expired);
        assert_eq!(status.days_remaining, 0);
    }

    #[test]
    fn test_is_current_plan() {
        let screen = screen_with_company(None, Some("Growth"));
        assert!(screen.is_current_plan("Growth"));
        assert!(!screen.is_current_plan("Starter"));

        let screen = screen_with_company(None, None);
        assert!(!screen.is_current_plan("Growth"));
    }
}
