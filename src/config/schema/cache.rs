use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// File name of the summary cache when no explicit path is configured.
pub const DEFAULT_CACHE_FILE: &str = "summaries.json";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Summary cache location (default: next to config.toml)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}
