pub mod commands;

pub use commands::{CacheCommands, Cli, Commands};
