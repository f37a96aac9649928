//! Facade crate for the Mosaic host.
//! Re-exports domain/kernel primitives and owns the compiled module manifest.
//! Keep this crate thin: it should compose other crates, not implement business logic.
//!
//! ## Usage
//! - Enable a module with its cargo feature (`blog`, `shop`); it joins [`MANIFEST`].
//! - Call [`bootstrap`] once at start-up and share the resulting [`Platform`].

pub use mosaic_domain as domain;
pub use mosaic_kernel as kernel;

use mosaic_domain::config::HostConfig;
use mosaic_domain::route::RouteNode;
use mosaic_kernel::KernelError;
use mosaic_kernel::module::ManifestEntry;
use mosaic_kernel::platform::{self, HostRoutes, Platform};
use tracing::info;

#[cfg(feature = "server")]
pub mod server {
    pub use mosaic_kernel::server::HostState;
    pub mod router {
        pub use mosaic_kernel::server::router::{host_router, system_router};
    }
}

/// Service modules compiled into this build.
pub mod modules {
    #[cfg(feature = "blog")]
    pub use mosaic_blog as blog;
    #[cfg(feature = "shop")]
    pub use mosaic_shop as shop;

    /// Build-time enabled modules (by Cargo feature).
    pub const ENABLED: &[&str] = &[
        #[cfg(feature = "blog")]
        "blog",
        #[cfg(feature = "shop")]
        "shop",
    ];

    #[must_use]
    pub fn is_enabled(name: &str) -> bool {
        ENABLED.contains(&name)
    }
}

/// One entry per module matching `crates/features/<name>/module.json`.
pub const MANIFEST: &[ManifestEntry] = &[
    #[cfg(feature = "blog")]
    mosaic_blog::MANIFEST_ENTRY,
    #[cfg(feature = "shop")]
    mosaic_shop::MANIFEST_ENTRY,
];

/// Routes the host always serves: authentication and the dashboard shell.
#[must_use]
pub fn host_routes(config: &HostConfig) -> Vec<RouteNode> {
    vec![
        RouteNode::layout("auth", vec![RouteNode::page("login"), RouteNode::page("logout")]),
        RouteNode::layout(config.site.dashboard_base.trim_matches('/'), vec![RouteNode::index()]),
    ]
}

/// Landing page, crawler files and not-found, in that order. Modules may claim any of them.
#[must_use]
pub fn fallback_routes() -> Vec<RouteNode> {
    vec![
        RouteNode::index(),
        RouteNode::page("robots.txt"),
        RouteNode::page("sitemap.xml"),
        RouteNode::splat(),
    ]
}

/// Composes the platform from [`MANIFEST`].
///
/// # Errors
/// Returns the fatal start-up errors of [`platform::bootstrap`].
pub fn bootstrap(config: &HostConfig) -> Result<Platform, KernelError> {
    info!(modules = ?modules::ENABLED, "Bootstrapping platform");
    bootstrap_with(config, MANIFEST)
}

/// Composes the platform from an explicit manifest, with the host's own routes.
///
/// # Errors
/// Returns the fatal start-up errors of [`platform::bootstrap`].
pub fn bootstrap_with(config: &HostConfig, manifest: &[ManifestEntry]) -> Result<Platform, KernelError> {
    platform::bootstrap(
        manifest,
        HostRoutes { routes: host_routes(config), fallbacks: fallback_routes() },
    )
}
