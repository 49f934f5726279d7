//! Resolve module: Dependency closure of a capability set
//!
//! Top-level entries are resolved first, in advertisement order. The
//! submodule and import edges of each top-level module are then followed
//! with an explicit LIFO worklist. A per-run [`VisitedSet`] of module names
//! stops import cycles and makes the first discovery of a name decide its
//! conformance type.

mod descriptor;

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::capability::{CapabilityEntry, CapabilitySet};
use crate::catalog::model::{ConformanceType, EdgeKind, ModuleDescriptor, ModuleRef};
use crate::catalog::{IntegrityGap, ParseFailure};
use crate::locator::ModuleLocator;
use crate::organization::{classify_module, OrganizationResolver};
use crate::parser::StatementParser;
use crate::platform::DeviceContext;

pub use descriptor::{normalize_revision, DEFAULT_REVISION};

/// Result of one resolution run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolutionOutcome {
    /// Resolved modules in discovery order
    pub records: Vec<ModuleDescriptor>,
    /// One gap per module name that could not be located
    pub gaps: Vec<IntegrityGap>,
    pub failures: Vec<ParseFailure>,
}

/// Module names already processed in one run
#[derive(Debug, Default)]
pub struct VisitedSet {
    names: HashSet<String>,
}

impl VisitedSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `name` visited. Returns `false` if it already was.
    pub fn insert(&mut self, name: &str) -> bool {
        self.names.insert(name.to_string())
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }
}

/// State owned by a single run
struct Run<'d> {
    device_path: &'d str,
    visited: VisitedSet,
    missing: HashSet<String>,
    outcome: ResolutionOutcome,
}

impl<'d> Run<'d> {
    fn new(device_path: &'d str) -> Self {
        Self {
            device_path,
            visited: VisitedSet::new(),
            missing: HashSet::new(),
            outcome: ResolutionOutcome::default(),
        }
    }

    fn record_missing(&mut self, name: &str) {
        if self.missing.insert(name.to_string()) {
            debug!("{} not found for {}", name, self.device_path);
            self.outcome.gaps.push(IntegrityGap {
                device_path: self.device_path.to_string(),
                missing_module_names: vec![name.to_string()],
            });
        }
    }

    fn record_failure(&mut self, path: &Path, message: String) {
        warn!("Failed to parse {}: {}", path.display(), message);
        self.outcome.failures.push(ParseFailure {
            path: path.to_path_buf(),
            message,
        });
    }
}

/// Computes the module closure of capability sets
pub struct ResolutionEngine<'p, P: StatementParser + ?Sized> {
    parser: &'p P,
    locator: ModuleLocator,
    organizations: OrganizationResolver<'p, P>,
}

impl<'p, P: StatementParser + ?Sized> ResolutionEngine<'p, P> {
    /// Create an engine that finds schema files with `locator`
    ///
    /// The locator's roots double as fallback roots when looking for the
    /// parent module of a submodule.
    #[must_use]
    pub fn new(parser: &'p P, locator: ModuleLocator) -> Self {
        let organizations =
            OrganizationResolver::new(parser).with_fallback_roots(locator.roots().to_vec());
        Self {
            parser,
            locator,
            organizations,
        }
    }

    /// Resolve every module a device depends on
    ///
    /// Never fails: missing modules become gaps and unparsable files become
    /// failures, and the rest of the run continues.
    #[must_use]
    pub fn resolve(&self, capability_set: &CapabilitySet, device: &DeviceContext) -> ResolutionOutcome {
        info!(
            "Resolving {} advertised modules for {}",
            capability_set.entries.len(),
            device.device_path
        );
        let mut run = Run::new(&device.device_path);
        let top_level: HashSet<&str> = capability_set
            .entries
            .iter()
            .map(|e| e.module_name.as_str())
            .collect();

        let mut resolved_top_level = Vec::new();
        for entry in &capability_set.entries {
            if run.visited.contains(&entry.module_name) {
                continue;
            }
            let Some(path) = self.locate(&entry.module_name, entry.revision.as_deref()) else {
                run.record_missing(&entry.module_name);
                continue;
            };
            let conformance = entry.conformance_type.unwrap_or(ConformanceType::Implement);
            match self.describe(&path, &entry.module_name, Some(entry), Some(conformance), device) {
                Ok(descriptor) => {
                    run.visited.insert(&entry.module_name);
                    resolved_top_level.push(run.outcome.records.len());
                    run.outcome.records.push(descriptor);
                }
                Err(message) => run.record_failure(&path, message),
            }
        }

        for index in resolved_top_level {
            let edges = pending_edges(&run.outcome.records[index]);
            self.follow(&mut run, edges, &top_level, device);
        }

        info!(
            "Resolved {} modules for {} ({} missing, {} unparsable)",
            run.outcome.records.len(),
            device.device_path,
            run.outcome.gaps.len(),
            run.outcome.failures.len()
        );
        run.outcome
    }

    /// Describe standalone schema files without following their edges
    #[must_use]
    pub fn resolve_files(&self, files: &[PathBuf], device: &DeviceContext) -> ResolutionOutcome {
        let mut run = Run::new(&device.device_path);
        for path in files {
            let requested = descriptor::name_from_file(path);
            match self.describe(path, &requested, None, None, device) {
                Ok(descriptor) => run.outcome.records.push(descriptor),
                Err(message) => run.record_failure(path, message),
            }
        }
        run.outcome
    }

    /// Drain a worklist seeded with one top-level module's edges
    fn follow(
        &self,
        run: &mut Run<'_>,
        mut worklist: Vec<(EdgeKind, ModuleRef)>,
        top_level: &HashSet<&str>,
        device: &DeviceContext,
    ) {
        while let Some((kind, reference)) = worklist.pop() {
            if !run.visited.insert(&reference.name) {
                continue;
            }
            let Some(path) = self.locate(&reference.name, reference.revision.as_deref()) else {
                run.record_missing(&reference.name);
                continue;
            };

            let conformance = match kind {
                EdgeKind::Include => Some(ConformanceType::Import),
                EdgeKind::Import if top_level.contains(reference.name.as_str()) => {
                    Some(ConformanceType::Implement)
                }
                EdgeKind::Import => None,
            };
            match self.describe(&path, &reference.name, None, conformance, device) {
                Ok(descriptor) => {
                    debug!("{} {} via {}", descriptor.name, descriptor.revision, kind);
                    worklist.extend(pending_edges(&descriptor));
                    run.outcome.records.push(descriptor);
                }
                Err(message) => run.record_failure(&path, message),
            }
        }
    }

    /// Exact revision first, then any revision
    fn locate(&self, name: &str, revision: Option<&str>) -> Option<PathBuf> {
        self.locator.locate(name, revision).or_else(|| {
            revision.and_then(|r| {
                let found = self.locator.locate(name, None);
                if found.is_some() {
                    debug!("{}@{} not found, using best-effort match", name, r);
                }
                found
            })
        })
    }

    fn describe(
        &self,
        path: &Path,
        requested: &str,
        entry: Option<&CapabilityEntry>,
        conformance: Option<ConformanceType>,
        device: &DeviceContext,
    ) -> Result<ModuleDescriptor, String> {
        let module = self.parser.parse_file(path).map_err(|e| e.to_string())?;
        let content_hash = crate::scanner::compute_file_hash(path).map_err(|e| e.to_string())?;

        let mut descriptor = descriptor::from_statement(&module, requested, path);
        let namespace = self.organizations.resolve_namespace(path, &module);
        descriptor.organization = classify_module(&module, namespace.as_deref());
        descriptor.namespace = namespace;
        descriptor.schema_url = device.schema_url(path);
        descriptor.conformance_type = conformance;
        descriptor.content_hash = content_hash;

        if let Some(entry) = entry {
            if let Some(revision) = &entry.revision {
                descriptor.revision.clone_from(revision);
            }
            descriptor.features.clone_from(&entry.features);
            descriptor.deviations = entry
                .deviations
                .iter()
                .map(|deviation| {
                    let mut deviation = deviation.clone();
                    if deviation.revision.is_none() {
                        deviation.revision = Some(self.deviation_revision(&deviation.name));
                    }
                    deviation
                })
                .collect();
        }
        Ok(descriptor)
    }

    /// Latest declared revision of a deviation module, if it can be found
    fn deviation_revision(&self, name: &str) -> String {
        self.locator
            .locate(name, None)
            .and_then(|path| self.parser.parse_file(&path).ok())
            .map_or_else(
                || DEFAULT_REVISION.to_string(),
                |module| normalize_revision(module.find_arg("revision")),
            )
    }
}

/// Edges of a descriptor in pop order for a LIFO worklist
fn pending_edges(descriptor: &ModuleDescriptor) -> Vec<(EdgeKind, ModuleRef)> {
    let mut edges: Vec<_> = descriptor
        .edges()
        .map(|(kind, reference)| (kind, reference.clone()))
        .collect();
    edges.reverse();
    edges
}
