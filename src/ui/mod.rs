//! User interface and interaction
//!
//! CLI parsing and the mapping from parsed arguments to configuration.

pub mod cli;

// Re-export commonly used items
pub use cli::{Cli, Commands, QueryArgs, cli_to_config};
