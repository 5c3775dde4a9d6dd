//! Client-side store for sealed summaries.
//!
//! Tokens are kept opaquely, one per task id. A new summary always replaces
//! the previous token; a token that no longer verifies is evicted on read
//! and reported as "no summary".

mod store;

pub use store::{CACHE_FILE_VERSION, SummaryCache};
