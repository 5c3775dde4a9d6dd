//! HMAC-SHA256 segment signatures.

use super::codec;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

/// Sign `message` with `secret` and return the digest as Base64URL text.
///
/// Deterministic: the same `(secret, message)` pair always yields the same
/// signature. Anyone holding `secret` can mint valid tokens. Returns `None`
/// only if the MAC refuses the key.
pub fn sign(secret: &[u8], message: &str) -> Option<String> {
    let Ok(mut mac) = HmacSha256::new_from_slice(secret) else {
        return None;
    };
    mac.update(message.as_bytes());
    Some(codec::encode(mac.finalize().into_bytes()))
}

/// Recompute the signature for `message` and compare it with `signature`
/// without early exit.
pub fn verify(secret: &[u8], message: &str, signature: &str) -> bool {
    let Some(expected) = sign(secret, message) else {
        return false;
    };
    constant_time_eq(&expected, signature)
}

/// Constant-time equality comparison for signature text.
fn constant_time_eq(a: &str, b: &str) -> bool {
    a.as_bytes().ct_eq(b.as_bytes()).into()
}
