use thiserror::Error;

// ─── Top-level error hierarchy ───────────────────────────────────────────────

/// Structured error hierarchy for `summary-seal`.
///
/// Each subsystem defines its own error variant. Library callers can match on
/// these to decide recovery strategy; the binary continues to use
/// `anyhow::Result` for ad-hoc context chains.
///
/// Unsealing has no variant here: a rejected token is `None`, never an error.
#[derive(Debug, Error)]
pub enum SummarySealError {
    // ── Sealing ─────────────────────────────────────────────────────────
    #[error("seal: {0}")]
    Seal(#[from] SealError),

    // ── Config ──────────────────────────────────────────────────────────
    #[error("config: {0}")]
    Config(#[from] ConfigError),

    // ── Summary cache ───────────────────────────────────────────────────
    #[error("cache: {0}")]
    Cache(#[from] CacheError),

    // ── Generic fallthrough (wraps anyhow for interop) ──────────────────
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ─── Seal errors ─────────────────────────────────────────────────────────────

/// Caller-side mistakes when building a token. These indicate an integration
/// bug, so they are surfaced loudly instead of being folded into `None`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SealError {
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),

    #[error("payload serialization failed: {0}")]
    Encode(String),
}

// ─── Config errors ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("no sealing secret configured (set [seal] secret or SUMMARY_SEAL_SECRET)")]
    MissingSecret,
}

// ─── Cache errors ────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("invalid task id: {0:?}")]
    InvalidTaskId(String),

    #[error("unsupported cache file version {0}")]
    UnsupportedVersion(u32),

    #[error("cache file is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

// ─── Convenience re-exports ─────────────────────────────────────────────────

/// Shorthand result type for the crate.
pub type Result<T> = std::result::Result<T, SummarySealError>;
