use crate::robots::RobotsGroup;
use serde::Deserialize;
use std::net::{IpAddr, Ipv4Addr};
use std::ops::{Deref, DerefMut};
use std::path::PathBuf;
use std::sync::Arc;

/// Top-level host configuration.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HostConfigInner {
    pub server: ServerConfig,
    pub site: SiteConfig,
    pub aggregation: AggregationConfig,
    pub robots: RobotsConfig,
    pub logging: LoggingConfig,
}

/// Thin Arc-wrapped config for inexpensive cloning into handlers.
#[derive(Default, Debug, Clone, Deserialize)]
pub struct HostConfig {
    #[serde(flatten, default)]
    inner: Arc<HostConfigInner>,
}

impl Deref for HostConfig {
    type Target = HostConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for HostConfig {
    fn deref_mut(&mut self) -> &mut HostConfigInner {
        Arc::make_mut(&mut self.inner)
    }
}

/// HTTP listener configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub address: IpAddr,
    pub port: u16,
}

/// Public-facing site settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Used when a request carries no usable `Host` header.
    pub public_origin: String,
    /// Mount point of the dashboard shell; navigation hrefs live under it.
    pub dashboard_base: String,
    pub sitemap_max_age_seconds: u32,
    pub sitemap_stale_while_revalidate_seconds: u32,
}

/// Per-request aggregation limits.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AggregationConfig {
    /// Upper bound for a single sitemap/robots contributor call.
    pub contributor_timeout_ms: u64,
}

/// Groups always emitted ahead of module-contributed ones.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RobotsConfig {
    pub host_defaults: Vec<RobotsGroup>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default level directive (`info`, `debug`, or a full filter string).
    pub filter: String,
    pub directory: Option<PathBuf>,
    pub json: bool,
}

// --- Default ---

impl Default for ServerConfig {
    fn default() -> Self {
        Self { address: IpAddr::V4(Ipv4Addr::UNSPECIFIED), port: 4583 }
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            public_origin: "http://localhost:4583".to_owned(),
            dashboard_base: "/dashboard".to_owned(),
            sitemap_max_age_seconds: 300,
            sitemap_stale_while_revalidate_seconds: 600,
        }
    }
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self { contributor_timeout_ms: 5_000 }
    }
}

impl Default for RobotsConfig {
    fn default() -> Self {
        Self { host_defaults: vec![RobotsGroup::any_agent().disallow("/dashboard/")] }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { filter: "info".to_owned(), directory: None, json: false }
    }
}
