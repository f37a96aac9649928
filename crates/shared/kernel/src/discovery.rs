//! # Module discovery
//!
//! Walks the compiled manifest in lexicographic order of each entry's
//! declaration path, constructs every module, and validates its declaration.
//! A module that fails to load or validate is logged and left out; it never
//! prevents the remaining modules from being discovered.

use crate::error::{KernelError, KernelErrorExt};
use crate::module::{ManifestEntry, ServiceModule};
use crate::schema;
use fxhash::FxHashSet;
use mosaic_domain::module::ModuleConfig;
use std::any::Any;
use std::panic::{AssertUnwindSafe, catch_unwind};
use tracing::{error, info, warn};

/// A module that loaded and passed schema validation.
#[derive(Debug)]
pub struct DiscoveredModule {
    pub source: &'static str,
    pub config: ModuleConfig,
    pub module: Box<dyn ServiceModule>,
}

/// A module left out of discovery, with the reason.
#[derive(Debug)]
pub struct ExcludedModule {
    pub source: &'static str,
    pub error: KernelError,
}

/// Outcome of a discovery pass.
#[derive(Debug, Default)]
pub struct Discovery {
    /// Successfully validated modules in discovery order.
    pub modules: Vec<DiscoveredModule>,
    pub excluded: Vec<ExcludedModule>,
}

impl Discovery {
    /// Validated configs in discovery order.
    pub fn configs(&self) -> impl Iterator<Item = &ModuleConfig> {
        self.modules.iter().map(|m| &m.config)
    }

    /// Declared dependencies that name no discovered module, as `(module, dependency)`.
    #[must_use]
    pub fn missing_dependencies(&self) -> Vec<(&str, &str)> {
        let present: FxHashSet<&str> = self.configs().map(|c| c.module_name.as_str()).collect();
        self.configs()
            .flat_map(|config| {
                config
                    .dependencies
                    .iter()
                    .filter(|dep| !present.contains(dep.as_str()))
                    .map(|dep| (config.module_name.as_str(), dep.as_str()))
            })
            .collect()
    }
}

/// Discovers every module listed in `manifest`.
pub fn discover_all(manifest: &[ManifestEntry]) -> Discovery {
    let mut entries = manifest.to_vec();
    entries.sort_by(|a, b| a.source.cmp(b.source));

    let mut discovery = Discovery::default();
    for entry in entries {
        match load(entry) {
            Ok(discovered) => {
                info!(
                    module = %discovered.config.module_name,
                    source = entry.source,
                    "Module discovered"
                );
                discovery.modules.push(discovered);
            },
            Err(err) => {
                error!(source = entry.source, error = %err, "Module excluded from discovery");
                discovery.excluded.push(ExcludedModule { source: entry.source, error: err });
            },
        }
    }

    // Dependencies are informational: report, never enforce.
    for (module, dependency) in discovery.missing_dependencies() {
        warn!(module, dependency, "Declared dependency is not present");
    }

    info!(
        discovered = discovery.modules.len(),
        excluded = discovery.excluded.len(),
        "Module discovery finished"
    );
    discovery
}

fn load(entry: ManifestEntry) -> Result<DiscoveredModule, KernelError> {
    let module = isolate(entry.source, "constructing module", entry.factory)?;
    let raw = isolate(entry.source, "reading declaration", || module.raw_config())?;
    let config = schema::validate(&raw).context(format!("declared by {}", entry.source))?;

    Ok(DiscoveredModule { source: entry.source, config, module })
}

/// Runs a load step, turning both errors and panics into a load failure of this module.
fn isolate<T>(
    source: &'static str,
    step: &'static str,
    f: impl FnOnce() -> Result<T, KernelError>,
) -> Result<T, KernelError> {
    match catch_unwind(AssertUnwindSafe(f)) {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(err @ KernelError::DiscoveryLoad { .. })) => Err(err),
        Ok(Err(err)) => Err(KernelError::DiscoveryLoad {
            module: source.into(),
            message: err.to_string().into(),
            context: Some(step.into()),
        }),
        Err(payload) => Err(KernelError::DiscoveryLoad {
            module: source.into(),
            message: panic_message(payload.as_ref()).into(),
            context: Some(step.into()),
        }),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| (*s).to_owned())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "panicked while loading".to_owned())
}
