//! `SS1` sealed summary tokens.
//!
//! Wire format: `SS1.<payload>.<signature>` where `<payload>` is unpadded
//! Base64URL of the JSON body `{"v":1,"uid":..,"taskId":..,"summary":..,"ts":..}`
//! and `<signature>` is unpadded Base64URL of HMAC-SHA256 over the payload
//! segment text.
//!
//! Unsealing checks the signature before decoding anything and folds every
//! failure into `None`, so callers get a single "no summary" branch and no
//! oracle distinguishing forged tokens from corrupted ones.

use super::{codec, signer};
use crate::error::SealError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Leading literal identifying the token family and generation.
pub const TOKEN_PREFIX: &str = "SS1";
/// Payload `v` value that rides together with [`TOKEN_PREFIX`].
pub const PROTOCOL_VERSION: u32 = 1;

const SEGMENT_DELIMITER: char = '.';

/// Payload carried inside a token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SealedSummary {
    #[serde(rename = "v")]
    pub version: u32,
    #[serde(rename = "uid")]
    pub user_id: String,
    #[serde(rename = "taskId")]
    pub task_id: String,
    pub summary: String,
    /// Unix milliseconds at sealing time.
    #[serde(rename = "ts")]
    pub issued_at_ms: i64,
}

/// Caller-supplied fields for a new token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummaryInput<'a> {
    pub user_id: &'a str,
    pub task_id: &'a str,
    pub summary: &'a str,
}

impl<'a> SummaryInput<'a> {
    pub fn new(user_id: &'a str, task_id: &'a str, summary: &'a str) -> Self {
        Self {
            user_id,
            task_id,
            summary,
        }
    }
}

/// Current wall-clock time in Unix milliseconds.
pub fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Seal `input` into a token stamped with the current time.
pub fn seal(secret: &[u8], input: &SummaryInput<'_>) -> Result<String, SealError> {
    seal_at(secret, input, now_ms())
}

/// Seal `input` into a token with an explicit issue time.
pub fn seal_at(
    secret: &[u8],
    input: &SummaryInput<'_>,
    issued_at_ms: i64,
) -> Result<String, SealError> {
    if secret.is_empty() {
        return Err(SealError::InvalidInput("secret is empty"));
    }
    if input.user_id.is_empty() {
        return Err(SealError::InvalidInput("user id is empty"));
    }
    if input.task_id.is_empty() {
        return Err(SealError::InvalidInput("task id is empty"));
    }

    let payload = SealedSummary {
        version: PROTOCOL_VERSION,
        user_id: input.user_id.to_string(),
        task_id: input.task_id.to_string(),
        summary: input.summary.to_string(),
        issued_at_ms,
    };
    let json = serde_json::to_string(&payload).map_err(|e| SealError::Encode(e.to_string()))?;

    let payload_segment = codec::encode(json);
    let signature_segment = signer::sign(secret, &payload_segment)
        .ok_or(SealError::InvalidInput("secret is not a usable HMAC key"))?;
    Ok(format!(
        "{TOKEN_PREFIX}{SEGMENT_DELIMITER}{payload_segment}{SEGMENT_DELIMITER}{signature_segment}"
    ))
}

/// Verify and decode `token`. Returns `None` for every kind of failure.
pub fn unseal(secret: &[u8], token: &str) -> Option<SealedSummary> {
    match open(secret, token) {
        Ok(payload) => Some(payload),
        Err(rejection) => {
            tracing::debug!(reason = %rejection, "rejected sealed summary token");
            None
        }
    }
}

/// Why a token was refused. Only ever logged, never returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rejection {
    NoSecret,
    SegmentCount,
    Prefix,
    SignatureMismatch,
    Encoding,
    Json,
    Structure,
    Version,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Self::NoSecret => "no secret",
            Self::SegmentCount => "wrong segment count",
            Self::Prefix => "unknown prefix",
            Self::SignatureMismatch => "signature mismatch",
            Self::Encoding => "payload is not base64url",
            Self::Json => "payload is not a JSON object",
            Self::Structure => "payload fields are missing or mistyped",
            Self::Version => "unsupported payload version",
        };
        f.write_str(reason)
    }
}

fn open(secret: &[u8], token: &str) -> Result<SealedSummary, Rejection> {
    if secret.is_empty() {
        return Err(Rejection::NoSecret);
    }

    let mut segments = token.split(SEGMENT_DELIMITER);
    let (Some(prefix), Some(payload_segment), Some(signature_segment), None) = (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) else {
        return Err(Rejection::SegmentCount);
    };

    if prefix != TOKEN_PREFIX {
        return Err(Rejection::Prefix);
    }

    if !signer::verify(secret, payload_segment, signature_segment) {
        return Err(Rejection::SignatureMismatch);
    }

    let bytes = codec::decode(payload_segment).ok_or(Rejection::Encoding)?;
    let value: serde_json::Value = serde_json::from_slice(&bytes).map_err(|_| Rejection::Json)?;
    if !value.is_object() {
        return Err(Rejection::Json);
    }

    let payload: SealedSummary = serde_json::from_value(value).map_err(|_| Rejection::Structure)?;
    if payload.version != PROTOCOL_VERSION {
        return Err(Rejection::Version);
    }

    Ok(payload)
}
