use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::holding::FundHolding;
use super::scheme::{SchemeMeta, SchemeRecord};

/// A single NAV observation (date → per-unit price).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavPoint {
    pub date: NaiveDate,
    pub nav: Decimal,
}

/// Cutoff-filtered NAV series for one scheme, ascending by date with no
/// duplicate dates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavHistory {
    pub scheme: SchemeRecord,
    pub meta: SchemeMeta,
    pub points: Vec<NavPoint>,
}

impl NavHistory {
    /// The chronologically last observation.
    pub fn latest(&self) -> Option<&NavPoint> {
        self.points.last()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// A holding paired with the scheme and history it resolved to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FundSeries {
    pub holding: FundHolding,
    pub history: NavHistory,
}

// ── Upstream wire shape ─────────────────────────────────────────────

/// One NAV entry as published: `{"date": "DD-MM-YYYY", "nav": "12.34500"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawNavEntry {
    pub date: String,
    pub nav: String,
}

/// Unparsed history payload of the NAV endpoint, newest entry first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawNavHistory {
    #[serde(default)]
    pub meta: SchemeMeta,

    #[serde(default)]
    pub data: Vec<RawNavEntry>,
}
