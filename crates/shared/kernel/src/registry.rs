//! # Contribution registries
//!
//! Append-only stores of per-module contributions, one per concern
//! (dashboard, sitemap, robots). They are filled sequentially during start-up
//! and then frozen behind an `Arc` and read concurrently by request handlers.

use crate::error::KernelError;
use crate::origin::RequestOrigin;
use fxhash::FxHashSet;
use mosaic_domain::module::DashboardEntry;
use mosaic_domain::robots::RobotsGroup;
use mosaic_domain::sitemap::SitemapUrlEntry;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use strum::{AsRefStr, Display};
use tracing::debug;

/// Future returned by a dynamic contributor.
pub type ContributorFuture<T> = Pin<Box<dyn Future<Output = Result<Vec<T>, KernelError>> + Send>>;

/// Request-time callback producing entries for one request origin.
pub type ContributorFn<T> = Arc<dyn Fn(RequestOrigin) -> ContributorFuture<T> + Send + Sync>;

/// Which concern a registry stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum RegistryKind {
    Dashboard,
    Sitemap,
    Robots,
}

/// A contribution resolved at request time: fixed entries or a callback.
pub enum Contributor<T> {
    Static(Vec<T>),
    Dynamic(ContributorFn<T>),
}

impl<T: 'static> Contributor<T> {
    /// Wraps an async closure as a dynamic contributor.
    ///
    /// ```rust
    /// # use mosaic_kernel::registry::Contributor;
    /// # use mosaic_domain::robots::RobotsGroup;
    /// let robots = Contributor::dynamic(|_origin| async move {
    ///     Ok(vec![RobotsGroup::any_agent().allow("/blog/")])
    /// });
    /// # let _: Contributor<RobotsGroup> = robots;
    /// ```
    pub fn dynamic<F, Fut>(callback: F) -> Self
    where
        F: Fn(RequestOrigin) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Vec<T>, KernelError>> + Send + 'static,
    {
        Self::Dynamic(Arc::new(move |origin| -> ContributorFuture<T> { Box::pin(callback(origin)) }))
    }
}

impl<T> Clone for Contributor<T>
where
    T: Clone,
{
    fn clone(&self) -> Self {
        match self {
            Self::Static(entries) => Self::Static(entries.clone()),
            Self::Dynamic(callback) => Self::Dynamic(Arc::clone(callback)),
        }
    }
}

impl<T> fmt::Debug for Contributor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Static(entries) => f.debug_tuple("Static").field(&entries.len()).finish(),
            Self::Dynamic(_) => f.write_str("Dynamic(..)"),
        }
    }
}

/// One module's contribution to a registry.
#[derive(Debug, Clone)]
pub struct Registration<T> {
    pub module: String,
    pub contribution: T,
}

/// Append-only registry keyed by module name, preserving registration order.
#[derive(Debug)]
pub struct ContributionRegistry<T> {
    kind: RegistryKind,
    names: FxHashSet<String>,
    entries: Vec<Registration<T>>,
}

impl<T> ContributionRegistry<T> {
    #[must_use]
    pub fn new(kind: RegistryKind) -> Self {
        Self { kind, names: FxHashSet::default(), entries: Vec::new() }
    }

    /// Adds `contribution` for `module`. The first registration for a name wins.
    ///
    /// # Errors
    /// Returns [`KernelError::DuplicateRegistration`] if `module` is already present;
    /// the registry is left unchanged.
    pub fn register(
        &mut self,
        module: impl Into<String>,
        contribution: T,
    ) -> Result<(), KernelError> {
        let module = module.into();
        if self.names.contains(&module) {
            return Err(KernelError::DuplicateRegistration {
                registry: self.kind.as_ref().to_owned().into(),
                module: module.into(),
                context: None,
            });
        }

        debug!(registry = %self.kind, module = %module, "Contribution registered");
        self.names.insert(module.clone());
        self.entries.push(Registration { module, contribution });
        Ok(())
    }

    /// All registrations in registration order.
    #[must_use]
    pub fn list_all(&self) -> &[Registration<T>] {
        &self.entries
    }

    #[must_use]
    pub fn contains(&self, module: &str) -> bool {
        self.names.contains(module)
    }

    #[must_use]
    pub const fn kind(&self) -> RegistryKind {
        self.kind
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The three registries, built once at start-up and passed explicitly to
/// discovery and to the request layer.
#[derive(Debug)]
pub struct Registries {
    pub dashboard: ContributionRegistry<Vec<DashboardEntry>>,
    pub sitemap: ContributionRegistry<Contributor<SitemapUrlEntry>>,
    pub robots: ContributionRegistry<Contributor<RobotsGroup>>,
}

impl Default for Registries {
    fn default() -> Self {
        Self {
            dashboard: ContributionRegistry::new(RegistryKind::Dashboard),
            sitemap: ContributionRegistry::new(RegistryKind::Sitemap),
            robots: ContributionRegistry::new(RegistryKind::Robots),
        }
    }
}

impl Registries {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A registration handle bound to one module's validated name.
    pub fn registrar<'a>(&'a mut self, module: &'a str) -> Registrar<'a> {
        Registrar { module, registries: self }
    }
}

/// What a module sees of the registries while it registers itself.
///
/// Every call registers under the module's own validated name, so a module
/// cannot contribute on behalf of another.
#[derive(Debug)]
pub struct Registrar<'a> {
    module: &'a str,
    registries: &'a mut Registries,
}

impl Registrar<'_> {
    #[must_use]
    pub const fn module(&self) -> &str {
        self.module
    }

    /// # Errors
    /// [`KernelError::DuplicateRegistration`] on a second sitemap contribution.
    pub fn sitemap(&mut self, contributor: Contributor<SitemapUrlEntry>) -> Result<(), KernelError> {
        self.registries.sitemap.register(self.module, contributor)
    }

    /// # Errors
    /// [`KernelError::DuplicateRegistration`] on a second robots contribution.
    pub fn robots(&mut self, contributor: Contributor<RobotsGroup>) -> Result<(), KernelError> {
        self.registries.robots.register(self.module, contributor)
    }
}
