//! Error types for the veryfi client.
//!
//! A single [`VeryfiError`] covers every failure a caller can observe, grouped
//! by where it happens:
//!
//! * **Construction**: the [`crate::config::Options`] were incomplete or
//!   inconsistent, so no client was built.
//! * **Transport**: no HTTP response was received even after the configured
//!   retries (connection refused, timeout, broken body).
//! * **Application**: Veryfi answered, but the body describes a failure.
//!   These are never retried; the remote status and the most specific context
//!   string the body carried are kept.
//! * **Decode**: the body was neither the expected success schema nor a
//!   recognisable error.

use std::path::PathBuf;
use thiserror::Error;

/// All errors returned by the veryfi library.
#[derive(Debug, Error)]
pub enum VeryfiError {
    // ── Construction errors ───────────────────────────────────────────────
    /// A required configuration field has no value.
    #[error("options can not be missing `{field}`")]
    MissingConfig { field: &'static str },

    /// Configuration values are present but unusable.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Transport errors ──────────────────────────────────────────────────
    /// No response could be obtained after all attempts.
    #[error("fail to make a request to Veryfi after {attempts} attempt(s): {source}")]
    Request {
        attempts: u32,
        #[source]
        source: reqwest::Error,
    },

    /// The HTTP request itself could not be assembled.
    #[error("fail to build a request to Veryfi: {0}")]
    Http(#[from] reqwest::Error),

    // ── Application errors ────────────────────────────────────────────────
    /// Veryfi returned an error body.
    #[error("get a response from Veryfi with status={status} and context={context}")]
    Api { status: String, context: String },

    // ── Decode errors ─────────────────────────────────────────────────────
    /// The response body did not match the expected schema.
    #[error("unexpected response from Veryfi with status={status}: {source}")]
    Decode {
        status: String,
        #[source]
        source: serde_json::Error,
    },

    /// The request payload could not be serialised.
    #[error("fail to encode request payload: {0}")]
    Serialize(#[source] serde_json::Error),

    /// The HMAC key could not be initialised from the client secret.
    #[error("fail to sign request: {0}")]
    Signature(String),

    // ── I/O errors ────────────────────────────────────────────────────────
    /// A document to upload could not be read.
    #[error("Failed to read '{path}': {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl VeryfiError {
    /// Whether the failure came from Veryfi itself rather than the network.
    pub fn is_api_error(&self) -> bool {
        matches!(self, VeryfiError::Api { .. })
    }

    /// The remote status, when a response was received.
    pub fn status(&self) -> Option<&str> {
        match self {
            VeryfiError::Api { status, .. } | VeryfiError::Decode { status, .. } => Some(status),
            _ => None,
        }
    }
}
