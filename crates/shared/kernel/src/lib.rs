//! # Mosaic Kernel
//!
//! The composition engine behind the host: it discovers service modules from
//! a compiled manifest, validates their declarations, fills the contribution
//! registries, composes the route table, and aggregates `sitemap.xml` and
//! `robots.txt` per request.
//!
//! Start-up is sequential and happens once ([`platform::bootstrap`]);
//! afterwards every registry is read-only and shared behind `Arc`.
//!
//! ```rust,ignore
//! use mosaic_kernel::prelude::*;
//!
//! let platform = bootstrap(&MANIFEST, HostRoutes::default())?;
//! let nav = navigation(&platform.registries().dashboard, "/dashboard");
//! ```
//!
//! ## Config loading
//! ```rust,ignore
//! use mosaic_kernel::config::load_config;
//! use mosaic_kernel::domain::config::HostConfig;
//!
//! let cfg: HostConfig = load_config(Some("server"))?;
//! ```
pub mod aggregate;
pub mod config;
pub mod dashboard;
pub mod discovery;
pub mod error;
pub mod module;
pub mod origin;
pub mod platform;
pub mod prelude;
pub mod registry;
pub mod robots;
pub mod routes;
pub mod schema;
#[cfg(feature = "server")]
pub mod server;
pub mod sitemap;

pub use error::{KernelError, KernelErrorExt};
pub use mosaic_domain as domain;
