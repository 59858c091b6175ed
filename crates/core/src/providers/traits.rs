use async_trait::async_trait;

use crate::errors::CoreError;
use crate::models::nav::RawNavHistory;
use crate::models::scheme::{SchemeCode, SchemeRecord};

/// Trait abstraction for mutual-fund NAV data sources.
///
/// `MfApiProvider` talks to api.mfapi.in; tests substitute in-memory
/// implementations. Services only ever see this trait.
#[async_trait]
pub trait NavProvider: Send + Sync {
    /// Human-readable name of this provider (for logs/errors).
    fn name(&self) -> &str;

    /// Free-text scheme search. Hits are returned in upstream order.
    async fn search_schemes(&self, query: &str) -> Result<Vec<SchemeRecord>, CoreError>;

    /// Full NAV history for a scheme, exactly as published (newest first,
    /// dates and NAVs as text).
    async fn get_nav_history(&self, scheme_code: &SchemeCode) -> Result<RawNavHistory, CoreError>;
}
