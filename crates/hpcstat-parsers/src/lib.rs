//! Shared utilities for querying scheduler command-line tools.
//!
//! Process invocation, executable lookup and environment access sit
//! behind small traits so scheduler adapters can be tested without a
//! cluster.

pub mod command;
pub mod env;

pub use command::{
    CommandError, CommandOutput, CommandRunner, SystemRunner, capture_output, find_executable,
};
pub use env::{Environment, MapEnv, SystemEnv};

/// Lines of `text` that are not empty, in order.
///
/// Whitespace-only lines count as empty.
pub fn non_empty_lines(text: &str) -> impl Iterator<Item = &str> {
    text.lines().filter(|line| !line.trim().is_empty())
}
