//! Contract between the host and a service module.

use crate::error::KernelError;
use crate::registry::Registrar;
use mosaic_domain::route::RouteNode;
use serde_json::Value;
use std::fmt::Debug;

/// An independently authored unit that extends the host.
pub trait ServiceModule: Debug + Send + Sync {
    /// The module's raw declaration, validated by the host before anything else is used.
    ///
    /// # Errors
    /// Any error here excludes the module from discovery.
    fn raw_config(&self) -> Result<Value, KernelError>;

    /// Route subtree mounted under the module's namespace.
    fn routes(&self) -> Vec<RouteNode> {
        Vec::new()
    }

    /// Root-level routes replacing host fallbacks with an equivalent path
    /// (landing page, not-found page, `robots.txt`, `sitemap.xml`).
    fn fallback_overrides(&self) -> Vec<RouteNode> {
        Vec::new()
    }

    /// Registers sitemap/robots contributors. Called once, in discovery order.
    ///
    /// # Errors
    /// A registration error is fatal for start-up.
    fn register(&self, _registrar: &mut Registrar<'_>) -> Result<(), KernelError> {
        Ok(())
    }
}

/// Constructor of a module, as listed in the compiled manifest.
pub type ModuleFactory = fn() -> Result<Box<dyn ServiceModule>, KernelError>;

/// One line of the build-time module manifest.
#[derive(Debug, Clone, Copy)]
pub struct ManifestEntry {
    /// Location of the module's declaration under the discovery convention
    /// (`crates/features/<name>/module.json`); used for ordering and diagnostics.
    pub source: &'static str,
    pub factory: ModuleFactory,
}

impl ManifestEntry {
    pub const fn new(source: &'static str, factory: ModuleFactory) -> Self {
        Self { source, factory }
    }
}

/// Parses a module's embedded JSON declaration.
///
/// # Errors
/// Returns [`KernelError::DiscoveryLoad`] when the text is not valid JSON.
pub fn parse_declaration(source: &'static str, text: &str) -> Result<Value, KernelError> {
    serde_json::from_str(text).map_err(|e| KernelError::DiscoveryLoad {
        module: source.into(),
        message: e.to_string().into(),
        context: Some("parsing module declaration".into()),
    })
}
