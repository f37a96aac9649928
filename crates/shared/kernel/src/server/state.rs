use crate::origin::RequestOrigin;
use crate::platform::Platform;
use crate::robots::RobotsAggregator;
use crate::sitemap::{self, SitemapAggregator};
use axum::extract::FromRef;
use axum::http::{HeaderMap, header};
use mosaic_domain::config::HostConfig;
use std::borrow::Cow;
use std::ops::Deref;
use std::sync::Arc;
use tracing::debug;

const FORWARDED_PROTO: &str = "x-forwarded-proto";

#[mosaic_derive::mosaic_error]
pub enum HostStateError {
    #[error("State validation error{}: {message}", format_context(.context))]
    Validation { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
    #[error("Invalid public origin{}: {source}", format_context(.context))]
    Origin { source: crate::error::KernelError, context: Option<Cow<'static, str>> },
}

#[derive(Debug)]
pub struct HostStateInner {
    pub config: HostConfig,
    pub platform: Platform,
    pub sitemap: SitemapAggregator,
    pub robots: RobotsAggregator,
    /// `site.public_origin`, used when a request carries no usable `Host` header.
    pub public_origin: RequestOrigin,
    pub sitemap_cache_control: String,
}

/// Shared, read-only state behind every handler.
#[derive(Debug, Clone)]
pub struct HostState {
    inner: Arc<HostStateInner>,
}

impl HostState {
    #[must_use]
    pub fn builder() -> HostStateBuilder {
        HostStateBuilder::default()
    }

    /// Origin of the request: `X-Forwarded-Proto` (first value) and `Host`,
    /// else the configured public origin.
    #[must_use]
    pub fn origin_for(&self, headers: &HeaderMap) -> RequestOrigin {
        let scheme = headers
            .get(FORWARDED_PROTO)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| self.public_origin.url().scheme());

        headers
            .get(header::HOST)
            .and_then(|v| v.to_str().ok())
            .and_then(|host| {
                RequestOrigin::from_host(scheme, host)
                    .inspect_err(|e| debug!(host, error = %e, "Ignoring unusable Host header"))
                    .ok()
            })
            .unwrap_or_else(|| self.public_origin.clone())
    }
}

impl Deref for HostState {
    type Target = HostStateInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl FromRef<HostState> for HostConfig {
    fn from_ref(state: &HostState) -> Self {
        state.inner.config.clone()
    }
}

impl FromRef<HostState> for Platform {
    fn from_ref(state: &HostState) -> Self {
        state.inner.platform.clone()
    }
}

#[derive(Debug, Default)]
pub struct HostStateBuilder {
    config: Option<HostConfig>,
    platform: Option<Platform>,
}

impl HostStateBuilder {
    #[must_use]
    pub fn config(mut self, config: HostConfig) -> Self {
        self.config = Some(config);
        self
    }

    #[must_use]
    pub fn platform(mut self, platform: Platform) -> Self {
        self.platform = Some(platform);
        self
    }

    /// # Errors
    /// Fails when the platform is missing or `site.public_origin` is not an http(s) origin.
    pub fn build(self) -> Result<HostState, HostStateError> {
        let config = self.config.unwrap_or_default();
        let platform = self.platform.ok_or_else(|| HostStateError::Validation {
            message: "Platform not provided".into(),
            context: None,
        })?;
        let public_origin =
            RequestOrigin::parse(&config.site.public_origin).context("site.public_origin")?;

        Ok(HostState {
            inner: Arc::new(HostStateInner {
                sitemap: SitemapAggregator::from_config(&config.aggregation),
                robots: RobotsAggregator::from_config(&config.aggregation),
                sitemap_cache_control: sitemap::cache_control(&config.site),
                public_origin,
                platform,
                config,
            }),
        })
    }
}
