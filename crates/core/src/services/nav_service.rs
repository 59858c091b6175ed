use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::str::FromStr;
use std::sync::Arc;
use tracing::debug;

use crate::errors::CoreError;
use crate::models::nav::{NavHistory, NavPoint, RawNavEntry, RawNavHistory};
use crate::models::scheme::SchemeRecord;
use crate::providers::retry::{with_retry, RetryPolicy};
use crate::providers::traits::NavProvider;

/// Date format used by the NAV endpoint.
pub const NAV_DATE_FORMAT: &str = "%d-%m-%Y";

/// Parse one published entry into a typed point.
pub fn parse_entry(entry: &RawNavEntry) -> Result<NavPoint, CoreError> {
    let date = NaiveDate::parse_from_str(entry.date.trim(), NAV_DATE_FORMAT).map_err(|e| {
        CoreError::Parse(format!("invalid NAV date '{}': {e}", entry.date))
    })?;
    let nav = Decimal::from_str(entry.nav.trim()).map_err(|e| {
        CoreError::Parse(format!("invalid NAV '{}' on {}: {e}", entry.nav, entry.date))
    })?;
    Ok(NavPoint { date, nav })
}

/// Parse, drop entries before `cutoff`, and order ascending by date.
///
/// Input may be in any order (upstream publishes newest first). When a date
/// appears twice the entry published first upstream wins.
pub fn normalize_entries(entries: &[RawNavEntry], cutoff: NaiveDate) -> Result<Vec<NavPoint>, CoreError> {
    let mut points = Vec::with_capacity(entries.len());
    for entry in entries {
        let point = parse_entry(entry)?;
        if point.date >= cutoff {
            points.push(point);
        }
    }

    // Stable sort keeps upstream order among equal dates; dedup keeps the first.
    points.sort_by_key(|p| p.date);
    points.dedup_by_key(|p| p.date);
    Ok(points)
}

/// Fetches NAV histories and turns them into ascending, cutoff-filtered series.
pub struct NavService {
    provider: Arc<dyn NavProvider>,
    cutoff: NaiveDate,
    retry: RetryPolicy,
}

impl NavService {
    pub fn new(provider: Arc<dyn NavProvider>, cutoff: NaiveDate, retry: RetryPolicy) -> Self {
        Self {
            provider,
            cutoff,
            retry,
        }
    }

    pub fn cutoff(&self) -> NaiveDate {
        self.cutoff
    }

    /// Fetch the history for `scheme`.
    ///
    /// Fails with `CoreError::NoNavData` if nothing was published on or after
    /// the cutoff, since such a holding has no latest NAV to value.
    pub async fn fetch_history(&self, scheme: &SchemeRecord) -> Result<NavHistory, CoreError> {
        let raw: RawNavHistory = with_retry(&self.retry, "NAV history", || {
            self.provider.get_nav_history(&scheme.scheme_code)
        })
        .await?;

        let points = normalize_entries(&raw.data, self.cutoff)?;
        if points.is_empty() {
            return Err(CoreError::NoNavData {
                scheme_code: scheme.scheme_code.to_string(),
            });
        }

        debug!(
            scheme_code = %scheme.scheme_code,
            published = raw.data.len(),
            kept = points.len(),
            "NAV history normalized"
        );

        Ok(NavHistory {
            scheme: scheme.clone(),
            meta: raw.meta,
            points,
        })
    }
}
