use super::policy::UnsealPolicy;
use super::token::{self, SealedSummary, SummaryInput};
use crate::error::SealError;
use std::fmt;
use zeroize::Zeroizing;

/// Holds the process-wide sealing secret and exposes the token operations
/// bound to it. The secret buffer is wiped on drop.
#[derive(Clone)]
pub struct Sealer {
    secret: Zeroizing<Vec<u8>>,
}

impl Sealer {
    pub fn new(secret: impl Into<Vec<u8>>) -> Result<Self, SealError> {
        let secret = Zeroizing::new(secret.into());
        if secret.is_empty() {
            return Err(SealError::InvalidInput("secret is empty"));
        }
        Ok(Self { secret })
    }

    pub fn seal(&self, input: &SummaryInput<'_>) -> Result<String, SealError> {
        token::seal(&self.secret, input)
    }

    pub fn seal_at(&self, input: &SummaryInput<'_>, issued_at_ms: i64) -> Result<String, SealError> {
        token::seal_at(&self.secret, input, issued_at_ms)
    }

    pub fn unseal(&self, token: &str) -> Option<SealedSummary> {
        token::unseal(&self.secret, token)
    }

    /// Unseal and then apply `policy` against the current clock.
    pub fn unseal_with(&self, token: &str, policy: &UnsealPolicy) -> Option<SealedSummary> {
        self.unseal_with_at(token, policy, token::now_ms())
    }

    pub fn unseal_with_at(
        &self,
        token: &str,
        policy: &UnsealPolicy,
        now_ms: i64,
    ) -> Option<SealedSummary> {
        self.unseal(token)
            .and_then(|payload| policy.apply(payload, now_ms))
    }
}

impl fmt::Debug for Sealer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sealer")
            .field("secret", &"<redacted>")
            .finish()
    }
}
