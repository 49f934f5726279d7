//! CLI commands

pub mod populate;
pub mod query;
pub mod resolve;
pub mod sdo;
mod store;
pub mod types;

pub use types::{Neo4jArgs, QueryCommands};
