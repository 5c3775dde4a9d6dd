pub mod schema;

pub use schema::{CacheConfig, Config, SealConfig, SecretsConfig};
