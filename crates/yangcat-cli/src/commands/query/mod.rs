//! Query module: Execute queries against the catalog graph

mod run;

pub use run::run;
