use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

use crate::errors::CoreError;
use crate::models::nav::RawNavHistory;
use crate::models::scheme::{SchemeCode, SchemeRecord};
use crate::models::settings::DEFAULT_BASE_URL;
use super::traits::NavProvider;

const PROVIDER_NAME: &str = "mfapi";

/// api.mfapi.in provider for Indian mutual-fund NAVs.
///
/// - **Free**: No API key, no documented rate limits.
/// - **Coverage**: every AMFI-registered scheme, full daily NAV history.
/// - **Endpoints**: `/mf/search?q={query}`, `/mf/{schemeCode}`
///
/// History is published newest first, with `DD-MM-YYYY` dates and NAVs
/// encoded as strings.
pub struct MfApiProvider {
    client: Client,
    base_url: String,
}

impl MfApiProvider {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL, Duration::from_secs(30))
    }

    /// Point the provider at another host (mirrors, test servers).
    pub fn with_base_url(base_url: impl Into<String>, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Turn an HTTP response into `T`, mapping non-2xx statuses and
    /// undecodable bodies to `CoreError::Api`.
    async fn decode<T: DeserializeOwned>(resp: Response, what: &str) -> Result<T, CoreError> {
        let status = resp.status();
        if !status.is_success() {
            return Err(CoreError::Api {
                provider: PROVIDER_NAME.into(),
                message: format!("{what} returned HTTP {status}"),
                status: Some(status.as_u16()),
            });
        }

        let body = resp.text().await?;
        serde_json::from_str(&body).map_err(|e| CoreError::Api {
            provider: PROVIDER_NAME.into(),
            message: format!("Failed to parse {what} response: {e}"),
            status: None,
        })
    }
}

impl Default for MfApiProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NavProvider for MfApiProvider {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    async fn search_schemes(&self, query: &str) -> Result<Vec<SchemeRecord>, CoreError> {
        let url = format!("{}/mf/search", self.base_url);
        debug!(query, "searching schemes");

        let resp = self
            .client
            .get(&url)
            .query(&[("q", query)])
            .send()
            .await?;

        Self::decode(resp, "scheme search").await
    }

    async fn get_nav_history(&self, scheme_code: &SchemeCode) -> Result<RawNavHistory, CoreError> {
        let url = format!("{}/mf/{}", self.base_url, scheme_code);
        debug!(scheme_code = %scheme_code, "fetching NAV history");

        let resp = self.client.get(&url).send().await?;
        Self::decode(resp, &format!("NAV history for {scheme_code}")).await
    }
}
