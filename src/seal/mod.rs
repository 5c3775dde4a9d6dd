//! HMAC-sealed chat summaries.
//!
//! A summary is sealed into a self-contained bearer token that the client
//! stores and replays. There is no server-side registry: possession of a
//! token signed with the current secret is the whole proof. All operations
//! here are pure and may be called from any number of threads.

pub mod codec;
pub mod policy;
mod sealer;
pub mod signer;
mod task_id;
pub mod token;

pub use policy::UnsealPolicy;
pub use sealer::Sealer;
pub use task_id::{MAX_TASK_ID_LEN, is_valid_task_id};
pub use token::{
    PROTOCOL_VERSION, SealedSummary, SummaryInput, TOKEN_PREFIX, now_ms, seal, seal_at, unseal,
};
