//! Version module: Catalog run identity
//!
//! Each ingestion run gets a [`CatalogRun`] so that implementations written
//! to the graph can be traced back to the run and schema commit that
//! produced them.

mod catalog_run;

pub use catalog_run::CatalogRun;

#[cfg(test)]
mod tests;
