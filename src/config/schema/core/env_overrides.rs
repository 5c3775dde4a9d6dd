use super::Config;
use std::path::PathBuf;

pub const SECRET_ENV: &str = "SUMMARY_SEAL_SECRET";
pub const MAX_AGE_ENV: &str = "SUMMARY_SEAL_MAX_AGE_SECS";
pub const CACHE_PATH_ENV: &str = "SUMMARY_SEAL_CACHE_PATH";

impl Config {
    pub fn apply_env_overrides(&mut self) {
        if let Ok(secret) = std::env::var(SECRET_ENV)
            && !secret.trim().is_empty()
        {
            self.seal.secret = Some(secret);
        }

        if let Ok(max_age) = std::env::var(MAX_AGE_ENV) {
            match max_age.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => self.seal.max_age_secs = Some(secs),
                _ => tracing::warn!(value = %max_age, "ignoring invalid SUMMARY_SEAL_MAX_AGE_SECS"),
            }
        }

        if let Ok(path) = std::env::var(CACHE_PATH_ENV)
            && !path.is_empty()
        {
            self.cache.path = Some(PathBuf::from(path));
        }
    }
}
