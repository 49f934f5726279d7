//! yangcat-core: YANG module catalog ingestion
//!
//! Resolves the capability set a network device advertises (NETCONF hello,
//! YANG-Library document or platform metadata) into the full set of schema
//! modules it depends on, follows submodule and import edges across
//! multiple schema trees, classifies each module's owning organization and
//! emits one catalog record per module annotated with vendor and platform
//! context. Records can be exported as JSON or stored in Neo4j.

pub mod capability;
pub mod catalog;
pub mod graph;
pub mod locator;
pub mod organization;
pub mod parser;
pub mod platform;
pub mod resolve;
pub mod scanner;
pub mod version;

// Re-export commonly used types
pub use capability::{CapabilityDocument, CapabilitySet, CapabilitySource, PlatformMetadata};
pub use catalog::{
    write_exports, CatalogKey, CatalogRecord, CatalogStore, Cataloger, InMemoryCatalog,
    InMemoryIntegrity, IntegrityTracker, ModuleDescriptor,
};
pub use graph::{Neo4jClient, Neo4jConfig};
pub use locator::ModuleLocator;
pub use organization::OrganizationResolver;
pub use parser::{Statement, StatementParser, YangParser};
pub use platform::{DeviceContext, SchemaSource};
pub use resolve::{ResolutionEngine, ResolutionOutcome};
pub use scanner::{compute_file_hash, CapabilityFormat, DiscoveredFile, Scanner};
pub use version::CatalogRun;
