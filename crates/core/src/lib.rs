pub mod errors;
pub mod models;
pub mod providers;
pub mod render;
pub mod services;

use std::sync::Arc;
use tracing::{info, warn};

use errors::CoreError;
use models::{
    analytics::{LoadOutcome, PortfolioSnapshot},
    nav::FundSeries,
    settings::PortfolioSettings,
};
use providers::{mfapi::MfApiProvider, traits::NavProvider};
use render::HtmlOptions;
use services::{
    chart_service::ChartService, nav_service::NavService,
    portfolio_service::PortfolioService, scheme_resolver::SchemeResolver,
    valuation_service::ValuationService,
};

/// Main entry point for the mutual-fund portfolio core library.
/// Holds the configuration and the provider; every load starts fresh.
#[must_use]
pub struct MfPortfolio {
    settings: PortfolioSettings,
    provider: Arc<dyn NavProvider>,
    valuation_service: ValuationService,
    chart_service: ChartService,
    portfolio_service: PortfolioService,
}

impl std::fmt::Debug for MfPortfolio {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MfPortfolio")
            .field("holdings", &self.settings.holdings.len())
            .field("cutoff_date", &self.settings.cutoff_date)
            .field("provider", &self.provider.name())
            .field("carry_forward", &self.settings.carry_forward)
            .finish()
    }
}

impl MfPortfolio {
    /// Portfolio backed by api.mfapi.in (or `settings.base_url`).
    pub fn new(settings: PortfolioSettings) -> Result<Self, CoreError> {
        let provider = MfApiProvider::with_base_url(settings.base_url.clone(), settings.request_timeout);
        Self::with_provider(settings, Arc::new(provider))
    }

    /// Portfolio backed by any NAV provider (mirrors, fixtures, mocks).
    pub fn with_provider(
        settings: PortfolioSettings,
        provider: Arc<dyn NavProvider>,
    ) -> Result<Self, CoreError> {
        settings.validate()?;
        Ok(Self {
            valuation_service: ValuationService::new(),
            chart_service: ChartService::new(settings.carry_forward),
            portfolio_service: PortfolioService::new(settings.concurrency),
            settings,
            provider,
        })
    }

    #[must_use]
    pub fn settings(&self) -> &PortfolioSettings {
        &self.settings
    }

    // ── Loading ─────────────────────────────────────────────────────

    /// Resolve, fetch and value every holding.
    ///
    /// Any resolution or fetch failure aborts the whole load; no partial
    /// portfolio is ever returned.
    pub async fn load(&self) -> Result<PortfolioSnapshot, CoreError> {
        let (resolver, nav_service) = self.load_context();
        let funds = self
            .portfolio_service
            .load_funds(&resolver, &nav_service, &self.settings.holdings)
            .await?;
        self.build_snapshot(&funds)
    }

    /// Like `load`, but a failure yields per-holding statuses instead of an
    /// error so the page can show which fund failed.
    pub async fn load_outcome(&self) -> LoadOutcome {
        let (resolver, nav_service) = self.load_context();
        let holdings = &self.settings.holdings;
        let results = self
            .portfolio_service
            .load_funds_settled(&resolver, &nav_service, holdings)
            .await;

        let statuses = PortfolioService::statuses(holdings, &results);
        let mut funds = Vec::with_capacity(results.len());
        let mut first_error = None;
        for result in results {
            match result {
                Ok(series) => funds.push(series),
                Err(e) if first_error.is_none() => first_error = Some(e),
                Err(_) => {}
            }
        }

        let outcome = match first_error {
            None => self.build_snapshot(&funds),
            Some(e) => Err(e),
        };

        match outcome {
            Ok(snapshot) => LoadOutcome::Complete(snapshot),
            Err(e) => {
                let failed = statuses.iter().filter(|s| !s.is_loaded()).count();
                warn!(failed, error = %e, "portfolio load failed");
                LoadOutcome::Failed {
                    statuses,
                    error: e.to_string(),
                }
            }
        }
    }

    // ── Rendering ───────────────────────────────────────────────────

    /// Load and render the full HTML page.
    pub async fn render_page(&self) -> String {
        let outcome = self.load_outcome().await;
        render::render_page(&outcome, &HtmlOptions::from_settings(&self.settings))
    }

    /// Export a computed snapshot as pretty JSON (debugging/display).
    pub fn snapshot_to_json(snapshot: &PortfolioSnapshot) -> Result<String, CoreError> {
        serde_json::to_string_pretty(snapshot)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize snapshot: {e}")))
    }

    // ── Internal ────────────────────────────────────────────────────

    /// Fresh resolver (empty memo) and NAV service for one load.
    fn load_context(&self) -> (SchemeResolver, NavService) {
        let resolver = SchemeResolver::new(Arc::clone(&self.provider), self.settings.retry.clone());
        let nav_service = NavService::new(
            Arc::clone(&self.provider),
            self.settings.cutoff_date,
            self.settings.retry.clone(),
        );
        (resolver, nav_service)
    }

    fn build_snapshot(&self, funds: &[FundSeries]) -> Result<PortfolioSnapshot, CoreError> {
        let (holdings, summary) = self.valuation_service.value_portfolio(funds)?;
        let history = self.chart_service.build_history(funds);
        let as_of = holdings
            .iter()
            .map(|h| h.latest_date)
            .max()
            .unwrap_or(self.settings.cutoff_date);

        info!(
            holdings = holdings.len(),
            total_invested = %summary.total_invested,
            total_current = %summary.total_current,
            history_points = history.len(),
            "portfolio valued"
        );

        Ok(PortfolioSnapshot {
            as_of,
            cutoff: self.settings.cutoff_date,
            holdings,
            summary,
            history,
        })
    }
}
