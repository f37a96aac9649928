//! # Start-up
//!
//! Discovery, registration and route composition run once, sequentially,
//! before the host serves its first request. The resulting [`Platform`] is
//! immutable and shared by reference with every request.

use crate::discovery::{self, ExcludedModule};
use crate::error::{KernelError, KernelErrorExt};
use crate::module::ManifestEntry;
use crate::registry::Registries;
use crate::routes::{self, ModuleRouteSet, RouteTable};
use mosaic_domain::module::ModuleConfig;
use mosaic_domain::route::RouteNode;
use std::sync::Arc;
use tracing::{info, instrument};

/// Routes owned by the host rather than by any module.
#[derive(Debug, Clone, Default)]
pub struct HostRoutes {
    /// Always present (authentication pages, the dashboard shell).
    pub routes: Vec<RouteNode>,
    /// Landing page, `robots.txt`, `sitemap.xml`, not-found; yield to module claims.
    pub fallbacks: Vec<RouteNode>,
}

/// Everything composed at start-up.
#[derive(Debug, Clone)]
pub struct Platform {
    registries: Arc<Registries>,
    routes: Arc<RouteTable>,
    modules: Arc<[ModuleConfig]>,
    excluded: Arc<[ExcludedModule]>,
}

impl Platform {
    #[must_use]
    pub fn registries(&self) -> &Registries {
        &self.registries
    }

    #[must_use]
    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    /// Validated declarations, in discovery order.
    #[must_use]
    pub fn modules(&self) -> &[ModuleConfig] {
        &self.modules
    }

    /// Modules left out by discovery, with the reason.
    #[must_use]
    pub fn excluded(&self) -> &[ExcludedModule] {
        &self.excluded
    }
}

/// Discovers the modules in `manifest`, fills the registries and composes the route table.
///
/// Modules that fail to load or validate are excluded and reported in
/// [`Platform::excluded`]. Registration order is discovery order.
///
/// # Errors
/// Fatal errors only: [`KernelError::DuplicateRegistration`] when two modules
/// share a name, [`KernelError::RouteConflict`] when route claims collide, or
/// whatever a module's own registration returns.
#[instrument(skip_all, fields(manifest = manifest.len()))]
pub fn bootstrap(manifest: &[ManifestEntry], host: HostRoutes) -> Result<Platform, KernelError> {
    let discovery = discovery::discover_all(manifest);

    let mut registries = Registries::new();
    let mut route_sets = Vec::with_capacity(discovery.modules.len());
    let mut modules = Vec::with_capacity(discovery.modules.len());

    for discovered in discovery.modules {
        let name = discovered.config.module_name.as_str();

        registries
            .dashboard
            .register(name, discovered.config.dashboard_routes.clone())
            .context(format!("declared by {}", discovered.source))?;

        discovered
            .module
            .register(&mut registries.registrar(name))
            .context(format!("registering {name}"))?;

        route_sets.push(ModuleRouteSet::new(
            &discovered.config,
            discovered.module.routes(),
            discovered.module.fallback_overrides(),
        ));
        modules.push(discovered.config);
    }

    let table = routes::compose(host.fallbacks, host.routes, &route_sets)?;

    info!(
        modules = modules.len(),
        excluded = discovery.excluded.len(),
        sitemap_contributors = registries.sitemap.len(),
        robots_contributors = registries.robots.len(),
        "Platform composed"
    );

    Ok(Platform {
        registries: Arc::new(registries),
        routes: Arc::new(table),
        modules: modules.into(),
        excluded: discovery.excluded.into(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::module::{ServiceModule, parse_declaration};
    use crate::registry::{Contributor, Registrar};
    use mosaic_domain::sitemap::SitemapUrlEntry;
    use serde_json::{Value, json};

    #[derive(Debug)]
    struct Fixture(Value);

    impl ServiceModule for Fixture {
        fn raw_config(&self) -> Result<Value, KernelError> {
            Ok(self.0.clone())
        }

        fn routes(&self) -> Vec<RouteNode> {
            vec![RouteNode::index()]
        }

        fn register(&self, registrar: &mut Registrar<'_>) -> Result<(), KernelError> {
            registrar.sitemap(Contributor::Static(vec![SitemapUrlEntry::new(
                format!("/{}", registrar.module().to_lowercase()),
                chrono::Utc::now(),
            )]))
        }
    }

    fn blog() -> Result<Box<dyn ServiceModule>, KernelError> {
        Ok(Box::new(Fixture(json!({
            "moduleName": "Blog",
            "dashboardRoutes": [{ "title": "Posts", "url": "blog", "iconRef": "file-text" }]
        }))))
    }

    fn shop() -> Result<Box<dyn ServiceModule>, KernelError> {
        Ok(Box::new(Fixture(json!({
            "moduleName": "Shop",
            "dashboardRoutes": [{ "title": "Orders", "url": "shop/orders", "iconRef": "shopping-cart" }]
        }))))
    }

    fn broken() -> Result<Box<dyn ServiceModule>, KernelError> {
        Ok(Box::new(Fixture(parse_declaration("broken/module.json", r#"{"moduleName": ""}"#)?)))
    }

    #[test]
    fn registers_valid_modules_in_discovery_order() {
        let manifest = [
            ManifestEntry::new("crates/features/shop/module.json", shop),
            ManifestEntry::new("crates/features/broken/module.json", broken),
            ManifestEntry::new("crates/features/blog/module.json", blog),
        ];

        let platform = bootstrap(&manifest, HostRoutes::default()).unwrap();

        let names: Vec<_> = platform.modules().iter().map(|m| m.module_name.as_str()).collect();
        assert_eq!(names, ["Blog", "Shop"]);
        assert_eq!(platform.excluded().len(), 1);
        assert_eq!(platform.registries().sitemap.len(), 2);
        assert!(platform.routes().find("/shop").is_some());
    }

    #[test]
    fn same_module_name_twice_is_fatal() {
        let manifest = [
            ManifestEntry::new("crates/features/blog/module.json", blog),
            ManifestEntry::new("crates/features/blog-copy/module.json", blog),
        ];

        let err = bootstrap(&manifest, HostRoutes::default()).unwrap_err();
        assert!(err.is_fatal());
    }
}
