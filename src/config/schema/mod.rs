mod cache;
mod core;
mod seal;

pub use cache::CacheConfig;
pub use core::{Config, SecretsConfig};
pub use seal::SealConfig;
