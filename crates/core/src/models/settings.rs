use chrono::NaiveDate;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::chart::CarryForwardPolicy;
use super::holding::FundHolding;
use crate::errors::CoreError;
use crate::providers::retry::RetryPolicy;

pub const DEFAULT_BASE_URL: &str = "https://api.mfapi.in";

/// Thousands-separator style used when rendering amounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum NumberGrouping {
    /// 12,34,567 (lakh/crore grouping)
    #[default]
    Indian,
    /// 1,234,567
    Western,
}

/// Static configuration for one portfolio.
///
/// Values come from `Default` (the tracked portfolio) and are adjusted only
/// through the `with_*` setters; nothing is read from files or the environment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSettings {
    /// Buy date. NAV history before it is ignored everywhere.
    pub cutoff_date: NaiveDate,

    /// Configured holdings, in display order.
    pub holdings: Vec<FundHolding>,

    /// NAV API root, without a trailing slash.
    pub base_url: String,

    /// Maximum number of holdings fetched at once.
    pub concurrency: usize,

    /// Per-request timeout.
    pub request_timeout: Duration,

    pub retry: RetryPolicy,

    pub carry_forward: CarryForwardPolicy,

    /// Currency glyph prefixed to every amount.
    pub currency_symbol: String,

    pub grouping: NumberGrouping,
}

impl Default for PortfolioSettings {
    fn default() -> Self {
        Self {
            cutoff_date: NaiveDate::from_ymd_opt(2024, 9, 30).unwrap_or_default(),
            holdings: vec![
                FundHolding::new("SBI Innovation Opportunities Fund", dec!(100000), dec!(9861.93)),
                FundHolding::new("SBI Technology Opportunities Fund", dec!(35000), dec!(158.37)),
                FundHolding::new("Tata Digital India Fund", dec!(150000), dec!(2500.83)),
                FundHolding::new("SBI Contra Fund", dec!(44300), dec!(113.59)),
            ],
            base_url: DEFAULT_BASE_URL.to_string(),
            concurrency: 4,
            request_timeout: Duration::from_secs(30),
            retry: RetryPolicy::default(),
            carry_forward: CarryForwardPolicy::default(),
            currency_symbol: "₹".to_string(),
            grouping: NumberGrouping::default(),
        }
    }
}

impl PortfolioSettings {
    pub fn with_holdings(mut self, holdings: Vec<FundHolding>) -> Self {
        self.holdings = holdings;
        self
    }

    pub fn with_cutoff_date(mut self, cutoff_date: NaiveDate) -> Self {
        self.cutoff_date = cutoff_date;
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_carry_forward(mut self, policy: CarryForwardPolicy) -> Self {
        self.carry_forward = policy;
        self
    }

    pub fn with_grouping(mut self, grouping: NumberGrouping) -> Self {
        self.grouping = grouping;
        self
    }

    /// Reject configurations the aggregator cannot value.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.holdings.is_empty() {
            return Err(CoreError::Validation("at least one holding is required".into()));
        }
        if self.concurrency == 0 {
            return Err(CoreError::Validation("concurrency must be at least 1".into()));
        }
        if self.retry.max_attempts == 0 {
            return Err(CoreError::Validation("retry.max_attempts must be at least 1".into()));
        }

        let mut seen = std::collections::HashSet::new();
        for holding in &self.holdings {
            if holding.name.trim().is_empty() {
                return Err(CoreError::Validation("holding name must not be empty".into()));
            }
            if !seen.insert(holding.name.to_lowercase()) {
                return Err(CoreError::Validation(format!(
                    "holding '{}' is configured more than once",
                    holding.name
                )));
            }
            if holding.units_held <= dec!(0) {
                return Err(CoreError::Validation(format!(
                    "units held for '{}' must be positive, got {}",
                    holding.name, holding.units_held
                )));
            }
            if holding.invested_amount < dec!(0) {
                return Err(CoreError::Validation(format!(
                    "invested amount for '{}' must not be negative, got {}",
                    holding.name, holding.invested_amount
                )));
            }
        }
        Ok(())
    }
}
