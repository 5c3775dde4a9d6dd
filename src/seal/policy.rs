//! Acceptance rules layered on top of [`unseal`](super::unseal).
//!
//! The token contract never expires a summary on its own. Callers that need
//! staleness or ownership checks describe them here and apply the policy to
//! an already verified payload.

use super::SealedSummary;
use std::time::Duration;

/// How far in the future an issue time may sit before a max-age policy
/// treats the token as bogus.
pub const CLOCK_SKEW_ALLOWANCE: Duration = Duration::from_secs(60);

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnsealPolicy {
    max_age: Option<Duration>,
    expected_user: Option<String>,
    expected_task: Option<String>,
}

impl UnsealPolicy {
    /// A policy that admits every verified payload.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_age(mut self, max_age: Duration) -> Self {
        self.max_age = Some(max_age);
        self
    }

    pub fn for_user(mut self, user_id: impl Into<String>) -> Self {
        self.expected_user = Some(user_id.into());
        self
    }

    pub fn for_task(mut self, task_id: impl Into<String>) -> Self {
        self.expected_task = Some(task_id.into());
        self
    }

    pub fn max_age(&self) -> Option<Duration> {
        self.max_age
    }

    /// Returns `true` if `payload` satisfies every configured rule at `now_ms`.
    pub fn admits(&self, payload: &SealedSummary, now_ms: i64) -> bool {
        if let Some(max_age) = self.max_age {
            let age_ms = now_ms.saturating_sub(payload.issued_at_ms);
            if age_ms > duration_ms(max_age) || age_ms < -duration_ms(CLOCK_SKEW_ALLOWANCE) {
                return false;
            }
        }

        if let Some(user) = &self.expected_user
            && *user != payload.user_id
        {
            return false;
        }

        if let Some(task) = &self.expected_task
            && *task != payload.task_id
        {
            return false;
        }

        true
    }

    /// Pass `payload` through when admitted, otherwise drop it.
    pub fn apply(&self, payload: SealedSummary, now_ms: i64) -> Option<SealedSummary> {
        if self.admits(&payload, now_ms) {
            Some(payload)
        } else {
            tracing::debug!(
                task_id = %payload.task_id,
                "sealed summary refused by unseal policy"
            );
            None
        }
    }
}

fn duration_ms(duration: Duration) -> i64 {
    i64::try_from(duration.as_millis()).unwrap_or(i64::MAX)
}
