//! Base64URL text encoding for token segments.
//!
//! Output uses the URL-safe alphabet (`-`, `_`) without `=` padding. Input
//! is accepted with or without padding; anything else that does not decode
//! cleanly is reported as `None` so callers can treat it as an invalid token.

use base64::Engine;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};

const BASE64URL: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Encode raw bytes or UTF-8 text as unpadded Base64URL.
pub fn encode(input: impl AsRef<[u8]>) -> String {
    BASE64URL.encode(input)
}

/// Decode Base64URL text, tolerating missing padding.
pub fn decode(text: &str) -> Option<Vec<u8>> {
    BASE64URL.decode(text).ok()
}
