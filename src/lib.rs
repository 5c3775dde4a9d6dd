#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::new_without_default,
    clippy::return_self_not_must_use
)]

pub mod app;
pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod seal;
pub mod security;

pub use cache::SummaryCache;
pub use config::Config;
pub use error::{CacheError, ConfigError, SealError, SummarySealError};
pub use seal::{
    SealedSummary, Sealer, SummaryInput, UnsealPolicy, is_valid_task_id, seal, unseal,
};
