//! Neo4j query modules organized by entity

mod catalog;
mod read;

pub(super) use super::neo4j::Neo4jClient;

pub use read::{DependencyResult, GraphStats, ImplementationResult, ModuleResult};
