use thiserror::Error;

use crate::models::violation::Violations;

/// Unified error type for the entire stockflow-core library.
/// Every public function returns `Result<T, CoreError>`.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Validation ──────────────────────────────────────────────────
    #[error("Validation failed: {0}")]
    Validation(Violations),

    // ── Store ───────────────────────────────────────────────────────
    #[error("Store I/O error: {0}")]
    StoreIo(String),

    #[error("Corrupt store document: {0}")]
    CorruptStore(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    // ── API / Network ───────────────────────────────────────────────
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    // ── Business Logic ──────────────────────────────────────────────
    #[error("Stock item not found: {0}")]
    ItemNotFound(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),
}

impl CoreError {
    /// Violations carried by a `Validation` error, if any.
    #[must_use]
    pub fn violations(&self) -> Option<&Violations> {
        match self {
            CoreError::Validation(v) => Some(v),
            _ => None,
        }
    }
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<Violations> for CoreError {
    fn from(v: Violations) -> Self {
        CoreError::Validation(v)
    }
}

impl From<std::io::Error> for CoreError {
    fn from(e: std::io::Error) -> Self {
        CoreError::StoreIo(e.to_string())
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Deserialization(e.to_string())
    }
}

impl From<reqwest::Error> for CoreError {
    fn from(e: reqwest::Error) -> Self {
        // reqwest errors embed the full URL; drop the query string.
        let msg = e.to_string();
        let sanitized = if let Some(idx) = msg.find('?') {
            format!("{}?<query redacted>", &msg[..idx])
        } else {
            msg
        };
        CoreError::Network(sanitized)
    }
}
