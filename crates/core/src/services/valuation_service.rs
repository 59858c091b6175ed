use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::errors::CoreError;
use crate::models::analytics::{HoldingValuation, PortfolioSummary};
use crate::models::nav::FundSeries;

/// `part / whole × 100`, undefined when `whole` is not positive.
pub fn percent_of(part: Decimal, whole: Decimal) -> Option<Decimal> {
    if whole > Decimal::ZERO {
        part.checked_div(whole).map(|ratio| ratio * dec!(100))
    } else {
        None
    }
}

/// Computes current value and profit/loss from each fund's latest NAV.
///
/// Pure arithmetic on already-fetched series; no rounding happens here.
pub struct ValuationService;

impl ValuationService {
    pub fn new() -> Self {
        Self
    }

    /// Value one holding at its chronologically last NAV.
    pub fn value_holding(&self, series: &FundSeries) -> Result<HoldingValuation, CoreError> {
        let latest = series.history.latest().ok_or_else(|| CoreError::NoNavData {
            scheme_code: series.history.scheme.scheme_code.to_string(),
        })?;

        let holding = &series.holding;
        let current_value = latest.nav * holding.units_held;
        let pl = current_value - holding.invested_amount;

        Ok(HoldingValuation {
            fund_name: holding.name.clone(),
            display_name: series.history.scheme.scheme_name.clone(),
            scheme_code: series.history.scheme.scheme_code.clone(),
            invested: holding.invested_amount,
            units: holding.units_held,
            latest_nav: latest.nav,
            latest_date: latest.date,
            current_value,
            pl,
            pl_percent: percent_of(pl, holding.invested_amount),
        })
    }

    /// Value every holding, preserving input order.
    pub fn value_holdings(&self, funds: &[FundSeries]) -> Result<Vec<HoldingValuation>, CoreError> {
        funds.iter().map(|f| self.value_holding(f)).collect()
    }

    /// Portfolio totals over already-valued holdings.
    pub fn summarize(&self, holdings: &[HoldingValuation]) -> PortfolioSummary {
        let total_invested: Decimal = holdings.iter().map(|h| h.invested).sum();
        let total_current: Decimal = holdings.iter().map(|h| h.current_value).sum();
        let net_pl = total_current - total_invested;

        PortfolioSummary {
            total_invested,
            total_current,
            net_pl,
            net_pl_percent: percent_of(net_pl, total_invested),
        }
    }

    /// Value holdings and compute totals in one pass.
    pub fn value_portfolio(
        &self,
        funds: &[FundSeries],
    ) -> Result<(Vec<HoldingValuation>, PortfolioSummary), CoreError> {
        let holdings = self.value_holdings(funds)?;
        let summary = self.summarize(&holdings);
        Ok((holdings, summary))
    }
}

impl Default for ValuationService {
    fn default() -> Self {
        Self::new()
    }
}
