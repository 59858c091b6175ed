use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::chart::ChartSeries;
use super::scheme::SchemeCode;

/// Current valuation of a single holding, ready for list rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoldingValuation {
    /// Configured fund name (the search query)
    pub fund_name: String,

    /// Resolved scheme name, shown to the user
    pub display_name: String,

    pub scheme_code: SchemeCode,

    /// Amount invested in this holding
    pub invested: Decimal,

    /// Units held
    pub units: Decimal,

    /// Most recent NAV on or after the cutoff
    pub latest_nav: Decimal,

    /// Date of `latest_nav`
    pub latest_date: NaiveDate,

    /// latest_nav × units, unrounded
    pub current_value: Decimal,

    /// current_value − invested
    pub pl: Decimal,

    /// pl / invested × 100, `None` when nothing was invested
    pub pl_percent: Option<Decimal>,
}

/// Portfolio-level totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSummary {
    /// Sum of all configured invested amounts
    pub total_invested: Decimal,

    /// Sum of every holding's current value
    pub total_current: Decimal,

    /// total_current − total_invested
    pub net_pl: Decimal,

    /// net_pl / total_invested × 100, only defined when total_invested > 0
    pub net_pl_percent: Option<Decimal>,
}

/// Everything one load computes: per-holding rows, totals and the chart series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSnapshot {
    /// Latest NAV date across all holdings
    pub as_of: NaiveDate,

    /// Buy date; history before it is excluded
    pub cutoff: NaiveDate,

    pub holdings: Vec<HoldingValuation>,
    pub summary: PortfolioSummary,
    pub history: ChartSeries,
}

/// Per-holding load state, used when a load fails part-way.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoldingStatus {
    pub fund_name: String,
    pub state: HoldingState,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum HoldingState {
    /// Resolved and fetched successfully
    Loaded {
        scheme_name: String,
        latest_date: NaiveDate,
    },
    /// Resolution or fetch failed
    Failed { reason: String },
}

impl HoldingStatus {
    pub fn is_loaded(&self) -> bool {
        matches!(self.state, HoldingState::Loaded { .. })
    }
}

/// Result of a page load.
///
/// A failed load keeps per-holding statuses for display but never carries
/// totals or a chart, so no partial portfolio can be shown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LoadOutcome {
    Complete(PortfolioSnapshot),
    Failed {
        statuses: Vec<HoldingStatus>,
        error: String,
    },
}

impl LoadOutcome {
    pub fn snapshot(&self) -> Option<&PortfolioSnapshot> {
        match self {
            LoadOutcome::Complete(snapshot) => Some(snapshot),
            LoadOutcome::Failed { .. } => None,
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, LoadOutcome::Complete(_))
    }
}
