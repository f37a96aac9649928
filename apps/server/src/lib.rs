//! # Mosaic Server
//!
//! The host process: composes the platform from the compiled module
//! manifest once, then serves `sitemap.xml`, `robots.txt` and the dashboard
//! navigation on `Axum`.
//!
//! ## Example
//! ```no_run
//! use mosaic_server::Server;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     Server::builder()
//!         .port(4583)
//!         .build()?
//!         .run()
//!         .await
//! }
//! ```

mod router;

use anyhow::{Context, Result};
use axum::Router;
use axum_server::Handle;
use mosaic::domain::config::HostConfig;
use mosaic::kernel::module::ManifestEntry;
use mosaic::server::HostState;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::signal;
use tracing::{error, info, warn};

const SHUTDOWN_GRACE: Duration = Duration::from_secs(30);

/// A fluent builder for configuring and initializing the [`Server`].
#[must_use = "builders do nothing unless you call .build()"]
#[derive(Debug)]
pub struct ServerBuilder {
    cfg: HostConfig,
    manifest: &'static [ManifestEntry],
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self { cfg: HostConfig::default(), manifest: mosaic::MANIFEST }
    }
}

impl ServerBuilder {
    /// Set up the server's configuration.
    pub fn config(mut self, cfg: HostConfig) -> Self {
        self.cfg = cfg;
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.cfg.server.port = port;
        self
    }

    /// Replaces the compiled [`mosaic::MANIFEST`].
    pub fn manifest(mut self, manifest: &'static [ManifestEntry]) -> Self {
        self.manifest = manifest;
        self
    }

    /// Consumes the builder and composes the platform.
    ///
    /// # Process
    /// 1. Discovers and validates every module in the manifest
    /// 2. Fills the dashboard, sitemap and robots registries in discovery order
    /// 3. Composes the route table
    /// 4. Constructs the shared request state
    ///
    /// # Errors
    /// Returns an error if:
    /// * Two modules share a name or claim the same route (start-up is aborted)
    /// * `site.public_origin` is not an absolute http(s) origin
    pub fn build(self) -> Result<Server> {
        let address = SocketAddr::new(self.cfg.server.address, self.cfg.server.port);
        info!(address = %address, "Initializing server");

        let platform = mosaic::bootstrap_with(&self.cfg, self.manifest).context("Platform bootstrap failed")?;
        for excluded in platform.excluded() {
            warn!(source = excluded.source, error = %excluded.error, "Module not loaded");
        }

        let state = HostState::builder()
            .config(self.cfg)
            .platform(platform)
            .build()
            .context("Failed to finalize host state")?;

        Ok(Server { state })
    }
}

/// A fully initialized server instance ready to run.
#[must_use = "call .run().await to start the server"]
#[derive(Debug)]
pub struct Server {
    state: HostState,
}

impl Server {
    /// Returns a new [`ServerBuilder`] to configure the server.
    pub fn builder() -> ServerBuilder {
        ServerBuilder::default()
    }

    /// The fully layered application router.
    pub fn router(&self) -> Router {
        router::init(self.state.clone())
    }

    /// Starts the server and runs until the shutdown signal is received.
    ///
    /// # Errors
    /// Returns an error if the server fails to bind to the configured address.
    pub async fn run(self) -> Result<()> {
        let cfg = self.state.config.clone();
        let address = SocketAddr::new(cfg.server.address, cfg.server.port);

        info!(
            address = %address,
            modules = self.state.platform.modules().len(),
            "Starting server"
        );

        let app = self.router();

        let handle = Handle::<SocketAddr>::new();
        let shutdown_handle = handle.clone();

        tokio::spawn(async move {
            if let Err(e) = shutdown_signal().await {
                error!("Error while waiting for shutdown signal: {e}");
                return;
            }
            info!("Shutdown signal received, starting graceful shutdown...");
            shutdown_handle.graceful_shutdown(Some(SHUTDOWN_GRACE));
        });

        info!("Starting HTTP server on http://{address}");
        axum_server::bind(address)
            .handle(handle)
            .serve(app.into_make_service())
            .await
            .context("HTTP server failed")?;

        info!("Server shutdown complete");
        Ok(())
    }

    /// Returns a reference to the application state.
    #[must_use]
    pub const fn state(&self) -> &HostState {
        &self.state
    }
}

/// Listens for shutdown signals (Ctrl+C, SIGTERM).
async fn shutdown_signal() -> Result<()> {
    let ctrl_c = async { signal::ctrl_c().await.context("Failed to install Ctrl+C handler") };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .context("Failed to install SIGTERM handler")?
            .recv()
            .await;
        Ok::<_, anyhow::Error>(())
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<Result<()>>();

    tokio::select! {
        res = ctrl_c => {
            res.context("Ctrl+C signal received")?;
        },
        res = terminate => {
            res.context("SIGTERM signal received")?;
        },
    }

    Ok(())
}
