use crate::seal::UnsealPolicy;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SealConfig {
    /// Shared HMAC secret, used byte-for-byte (surrounding whitespace is part
    /// of the key). Persisted encrypted when `[secrets] encrypt` is on.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret: Option<String>,
    /// Refuse summaries older than this many seconds (default: never expire)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_age_secs: Option<u64>,
}

impl SealConfig {
    pub fn unseal_policy(&self) -> UnsealPolicy {
        match self.max_age_secs {
            Some(secs) => UnsealPolicy::new().with_max_age(Duration::from_secs(secs)),
            None => UnsealPolicy::new(),
        }
    }
}
