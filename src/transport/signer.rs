//! Request signature for the v8 API.
//!
//! The signed message is `timestamp:<ts>` followed by one `key:value` token
//! per canonical entry, in encoder order, joined with `,`. It is hashed with
//! HMAC-SHA256 keyed by the client secret and sent base64-encoded next to the
//! raw timestamp. The secret itself never leaves the process.

use crate::error::VeryfiError;
use crate::transport::canonical::CanonicalMap;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::time::{SystemTime, UNIX_EPOCH};

type HmacSha256 = Hmac<Sha256>;

/// Header carrying the Unix timestamp (seconds) the signature was made with.
pub const TIMESTAMP_HEADER: &str = "X-Veryfi-Request-Timestamp";

/// Header carrying the base64 signature.
pub const SIGNATURE_HEADER: &str = "X-Veryfi-Request-Signature";

/// Build the exact message that gets signed.
pub fn signing_message(params: &CanonicalMap, timestamp: u64) -> String {
    let mut tokens = Vec::with_capacity(params.len() + 1);
    tokens.push(format!("timestamp:{timestamp}"));
    tokens.extend(params.iter().map(|(k, v)| format!("{k}:{v}")));
    tokens.join(",")
}

/// Sign `params` at `timestamp` with `secret`.
pub fn generate_signature(
    secret: &str,
    params: &CanonicalMap,
    timestamp: u64,
) -> Result<String, VeryfiError> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|e| VeryfiError::Signature(e.to_string()))?;
    mac.update(signing_message(params, timestamp).as_bytes());
    Ok(STANDARD.encode(mac.finalize().into_bytes()))
}

/// Current Unix time in seconds.
pub fn unix_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}
