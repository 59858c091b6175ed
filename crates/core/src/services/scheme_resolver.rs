use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::{debug, warn};

use crate::errors::CoreError;
use crate::models::scheme::SchemeRecord;
use crate::providers::retry::{with_retry, RetryPolicy};
use crate::providers::traits::NavProvider;

/// Every qualifying scheme name contains all of these (case-insensitive).
const REQUIRED_TERMS: [&str; 3] = ["direct", "growth", "fund"];

/// Trackers and payout classes publish a different NAV series than the
/// direct growth class a holding was bought under.
const EXCLUDED_TERMS: [&str; 6] = ["etf", "index", "nifty", "sensex", "idcw", "dividend"];

/// How a scheme was picked among the qualifying candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TieBreak {
    /// The candidate's name contains the configured fund name.
    NameMatch,
    /// No candidate contained the fund name; the first one in upstream
    /// order was taken. Only as stable as the API's ordering.
    ApiOrder,
}

/// Whether `scheme_name` is a direct growth share class of an actively
/// managed fund.
pub fn is_direct_growth(scheme_name: &str) -> bool {
    let name = scheme_name.to_lowercase();
    REQUIRED_TERMS.iter().all(|t| name.contains(t))
        && !EXCLUDED_TERMS.iter().any(|t| name.contains(t))
}

/// Pick the scheme a holding named `fund_name` refers to.
///
/// Returns `None` when no hit qualifies as direct growth.
pub fn select_scheme(fund_name: &str, hits: &[SchemeRecord]) -> Option<(SchemeRecord, TieBreak)> {
    let wanted = fund_name.to_lowercase();
    let candidates: Vec<&SchemeRecord> = hits
        .iter()
        .filter(|s| is_direct_growth(&s.scheme_name))
        .collect();

    if let Some(found) = candidates
        .iter()
        .find(|s| s.scheme_name.to_lowercase().contains(&wanted))
    {
        return Some(((*found).clone(), TieBreak::NameMatch));
    }

    candidates
        .first()
        .map(|s| ((*s).clone(), TieBreak::ApiOrder))
}

/// Resolves configured fund names to scheme records.
///
/// Results are memoized by fund name for the lifetime of the resolver, so a
/// load that needs the same fund twice searches once.
pub struct SchemeResolver {
    provider: Arc<dyn NavProvider>,
    retry: RetryPolicy,
    resolved: Mutex<HashMap<String, SchemeRecord>>,
}

impl SchemeResolver {
    pub fn new(provider: Arc<dyn NavProvider>, retry: RetryPolicy) -> Self {
        Self {
            provider,
            retry,
            resolved: Mutex::new(HashMap::new()),
        }
    }

    /// Resolve `fund_name` to exactly one direct growth scheme.
    pub async fn resolve(&self, fund_name: &str) -> Result<SchemeRecord, CoreError> {
        if let Some(hit) = self.cached(fund_name) {
            debug!(fund = fund_name, scheme_code = %hit.scheme_code, "scheme resolved from memo");
            return Ok(hit);
        }

        let hits = with_retry(&self.retry, "scheme search", || {
            self.provider.search_schemes(fund_name)
        })
        .await?;

        let (scheme, tie_break) = select_scheme(fund_name, &hits).ok_or_else(|| {
            let payload = serde_json::to_string(&hits).unwrap_or_default();
            warn!(fund = fund_name, hits = hits.len(), %payload, "no direct growth scheme found");
            CoreError::Resolution {
                fund_name: fund_name.to_string(),
                payload,
            }
        })?;

        if tie_break == TieBreak::ApiOrder {
            warn!(
                fund = fund_name,
                scheme = %scheme.scheme_name,
                "no candidate contains the fund name, using first match in API order"
            );
        }
        debug!(fund = fund_name, scheme_code = %scheme.scheme_code, scheme = %scheme.scheme_name, "scheme resolved");

        self.resolved
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(fund_name.to_string(), scheme.clone());
        Ok(scheme)
    }

    /// Number of fund names resolved so far.
    pub fn resolved_count(&self) -> usize {
        self.resolved.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    fn cached(&self, fund_name: &str) -> Option<SchemeRecord> {
        self.resolved
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(fund_name)
            .cloned()
    }
}
