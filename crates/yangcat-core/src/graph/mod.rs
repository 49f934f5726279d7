//! Graph module: Neo4j catalog persistence
//!
//! Stores catalog records as `Module` nodes merged by catalog key, with one
//! `Implementation` node per device platform and `IMPORTS`/`INCLUDES`
//! edges between modules.

pub mod neo4j;
pub mod queries;

pub use neo4j::{Neo4jClient, Neo4jConfig, Neo4jError};
pub use queries::{DependencyResult, GraphStats, ImplementationResult, ModuleResult};
