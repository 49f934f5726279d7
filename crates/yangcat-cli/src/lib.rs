//! yangcat-cli library
//!
//! Exposes the argument model and command implementations of the `yangcat`
//! binary so they can be tested.

pub mod cli;
#[doc(hidden)]
pub mod commands;
pub mod logging;

pub use cli::{Cli, Commands};
pub use commands::types::{Neo4jArgs, QueryCommands};

#[cfg(test)]
mod tests;
