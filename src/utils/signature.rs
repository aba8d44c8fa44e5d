//! Webhook signature verification.
//!
//! Retell signs webhook deliveries with an HMAC-SHA256 digest of the
//! request body, keyed by the account API key, sent hex-encoded in the
//! `x-retell-signature` header.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;
use tracing::debug;

type HmacSha256 = Hmac<Sha256>;

/// Verify an HMAC-SHA256 signature over a raw request body.
///
/// The signature is expected as lowercase or uppercase hex, optionally
/// prefixed with `sha256=`. Comparison is constant-time.
pub fn verify_signature(payload: &[u8], secret: &str, signature: &str) -> bool {
    let signature = signature.strip_prefix("sha256=").unwrap_or(signature);

    let Ok(provided) = hex::decode(signature) else {
        debug!("Signature header is not valid hex");
        return false;
    };

    let mut mac = match HmacSha256::new_from_slice(secret.as_bytes()) {
        Ok(mac) => mac,
        // HMAC accepts keys of any length; kept for completeness
        Err(_) => return false,
    };
    mac.update(payload);
    let expected = mac.finalize().into_bytes();

    expected.ct_eq(provided.as_slice()).into()
}
