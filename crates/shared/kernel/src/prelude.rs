//! Everything a service module or host binary usually needs.

pub use crate::dashboard::{NavItem, navigation};
pub use crate::error::{KernelError, KernelErrorExt};
pub use crate::module::{ManifestEntry, ModuleFactory, ServiceModule, parse_declaration};
pub use crate::origin::RequestOrigin;
pub use crate::platform::{HostRoutes, Platform, bootstrap};
pub use crate::registry::{Contributor, Registrar};
pub use crate::robots::RobotsAggregator;
pub use crate::sitemap::SitemapAggregator;
pub use mosaic_domain::module::{DashboardEntry, IconRef, ModuleConfig, SubEntry};
pub use mosaic_domain::robots::RobotsGroup;
pub use mosaic_domain::route::{RouteKind, RouteNode};
pub use mosaic_domain::sitemap::{ChangeFrequency, SitemapUrlEntry};

#[cfg(feature = "server")]
pub use crate::server::HostState;
