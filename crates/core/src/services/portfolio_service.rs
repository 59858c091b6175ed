use futures::stream::{self, StreamExt, TryStreamExt};
use tracing::{debug, info};

use crate::errors::CoreError;
use crate::models::analytics::{HoldingState, HoldingStatus};
use crate::models::holding::FundHolding;
use crate::models::nav::FundSeries;
use super::nav_service::NavService;
use super::scheme_resolver::SchemeResolver;

/// Runs the resolve → fetch pipeline for every configured holding.
///
/// Holdings are processed concurrently (at most `concurrency` at a time) and
/// results are always returned in configured order, whatever order the
/// network calls complete in.
pub struct PortfolioService {
    concurrency: usize,
}

impl PortfolioService {
    pub fn new(concurrency: usize) -> Self {
        Self {
            concurrency: concurrency.max(1),
        }
    }

    /// Resolve and fetch a single holding.
    pub async fn load_fund(
        &self,
        resolver: &SchemeResolver,
        nav_service: &NavService,
        holding: &FundHolding,
    ) -> Result<FundSeries, CoreError> {
        let scheme = resolver.resolve(&holding.name).await?;
        let history = nav_service.fetch_history(&scheme).await?;
        debug!(
            fund = %holding.name,
            scheme_code = %scheme.scheme_code,
            points = history.len(),
            "holding loaded"
        );
        Ok(FundSeries {
            holding: holding.clone(),
            history,
        })
    }

    /// Load every holding; the first failure (in configured order) aborts.
    pub async fn load_funds(
        &self,
        resolver: &SchemeResolver,
        nav_service: &NavService,
        holdings: &[FundHolding],
    ) -> Result<Vec<FundSeries>, CoreError> {
        info!(holdings = holdings.len(), concurrency = self.concurrency, "loading portfolio");
        stream::iter(holdings)
            .map(|holding| self.load_fund(resolver, nav_service, holding))
            .buffered(self.concurrency)
            .try_collect()
            .await
    }

    /// Load every holding and keep each outcome, index-aligned with `holdings`.
    pub async fn load_funds_settled(
        &self,
        resolver: &SchemeResolver,
        nav_service: &NavService,
        holdings: &[FundHolding],
    ) -> Vec<Result<FundSeries, CoreError>> {
        info!(holdings = holdings.len(), concurrency = self.concurrency, "loading portfolio (settled)");
        stream::iter(holdings)
            .map(|holding| self.load_fund(resolver, nav_service, holding))
            .buffered(self.concurrency)
            .collect()
            .await
    }

    /// Per-holding display state for a set of settled results.
    pub fn statuses(
        holdings: &[FundHolding],
        results: &[Result<FundSeries, CoreError>],
    ) -> Vec<HoldingStatus> {
        holdings
            .iter()
            .zip(results)
            .map(|(holding, result)| {
                let state = match result.as_ref().map_err(ToString::to_string).and_then(loaded_state) {
                    Ok(state) => state,
                    Err(reason) => HoldingState::Failed { reason },
                };
                HoldingStatus {
                    fund_name: holding.name.clone(),
                    state,
                }
            })
            .collect()
    }
}

/// `Loaded` state for a fetched series. `NavService` never returns an empty
/// history; a hand-built one is reported as `NoNavData`.
fn loaded_state(series: &FundSeries) -> Result<HoldingState, String> {
    let latest = series.history.latest().ok_or_else(|| {
        CoreError::NoNavData {
            scheme_code: series.history.scheme.scheme_code.to_string(),
        }
        .to_string()
    })?;
    Ok(HoldingState::Loaded {
        scheme_name: series.history.scheme.scheme_name.clone(),
        latest_date: latest.date,
    })
}

impl Default for PortfolioService {
    fn default() -> Self {
        Self::new(4)
    }
}
