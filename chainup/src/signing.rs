//! HMAC-SHA256 request signing.
//!
//! The signed message is `timestamp ++ UPPER(method) ++ path[?query] ++ body`,
//! where `body` is the exact JSON sent on the wire (empty for GET). The
//! signature is the lower-case hex digest.

use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::error::{ChainupError, Result};

type HmacSha256 = Hmac<Sha256>;

/// Header carrying the API key.
pub const HEADER_API_KEY: &str = "x-ch-apikey";
/// Header carrying the millisecond timestamp.
pub const HEADER_TIMESTAMP: &str = "x-ch-ts";
/// Header carrying the hex signature.
pub const HEADER_SIGNATURE: &str = "x-ch-sign";

/// Build the string that gets signed.
pub fn signing_payload(timestamp_ms: u64, method: &str, path: &str, body: &str) -> String {
    format!("{timestamp_ms}{}{path}{body}", method.to_uppercase())
}

/// Compute the request signature.
pub fn sign(
    secret: &str,
    timestamp_ms: u64,
    method: &str,
    path: &str,
    body: &str,
) -> Result<String> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|e| ChainupError::Signing(format!("invalid HMAC key: {e}")))?;
    mac.update(signing_payload(timestamp_ms, method, path, body).as_bytes());
    Ok(hex::encode(mac.finalize().into_bytes()))
}

/// Current wall-clock time in epoch milliseconds.
pub fn timestamp_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
