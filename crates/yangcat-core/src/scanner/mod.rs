//! Scanner module: Capability and schema file discovery
//!
//! Walks vendor and SDO trees with the `ignore` walker, in file name
//! order, and tells capability documents apart by file name.

mod format;
mod walker;

pub use format::CapabilityFormat;
pub use walker::{compute_file_hash, DiscoveredFile, Scanner};

#[cfg(test)]
mod tests;
