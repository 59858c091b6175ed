use thiserror::Error;

/// Unified error type for the entire mf-portfolio-core library.
/// Every public function returns `Result<T, CoreError>`.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Scheme Resolution ───────────────────────────────────────────
    /// No "Direct Growth" scheme qualified for a configured holding.
    /// `payload` carries the raw search hits for operator debugging.
    #[error("No direct growth scheme found for '{fund_name}'")]
    Resolution { fund_name: String, payload: String },

    // ── API / Network ───────────────────────────────────────────────
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error ({provider}): {message}")]
    Api {
        provider: String,
        message: String,
        status: Option<u16>,
    },

    // ── Data ────────────────────────────────────────────────────────
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("No NAV data on or after the cutoff date for scheme {scheme_code}")]
    NoNavData { scheme_code: String },

    #[error("Serialization error: {0}")]
    Serialization(String),

    // ── Configuration ───────────────────────────────────────────────
    #[error("Invalid configuration: {0}")]
    Validation(String),
}

impl CoreError {
    /// Whether retrying the same request could succeed.
    ///
    /// Transport failures, timeouts, rate limiting and server errors are
    /// transient. Resolution, parse and client errors are not.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            CoreError::Network(_) => true,
            CoreError::Api { status: Some(code), .. } => *code == 429 || *code >= 500,
            _ => false,
        }
    }
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<reqwest::Error> for CoreError {
    fn from(e: reqwest::Error) -> Self {
        // Fund names travel in the query string; keep them out of error text.
        let msg = e.to_string();
        let sanitized = if let Some(idx) = msg.find('?') {
            format!("{}?<query redacted>", &msg[..idx])
        } else {
            msg
        };
        if e.is_timeout() {
            CoreError::Network(format!("request timed out: {sanitized}"))
        } else {
            CoreError::Network(sanitized)
        }
    }
}
