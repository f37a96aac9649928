use crate::error::{KernelError, KernelErrorExt};
use config::{Config, Environment, File};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use tracing::info;

const DEFAULT_FILE: &str = "server";
const ENV_PREFIX: &str = "MOSAIC";

/// Loads configuration from a file overlaid with `MOSAIC__` environment variables.
///
/// 1. **Base file**: `path` with any extension the `config` crate understands
///    (`server.toml`, `server.json`, ...). An explicit path must exist; the default
///    `server` file is optional so a bare host starts on defaults.
/// 2. **Environment**: nested keys use double underscores, e.g.
///    `MOSAIC__SERVER__PORT=8080` or `MOSAIC__AGGREGATION__CONTRIBUTOR_TIMEOUT_MS=2000`.
///
/// # Errors
/// Returns [`KernelError::Config`] if an explicit file is missing, a value has
/// the wrong shape, or deserialization into `T` fails.
///
/// # Example
/// ```rust
/// use mosaic_kernel::config::load_config;
/// use mosaic_kernel::domain::config::HostConfig;
///
/// let cfg: HostConfig = load_config(None::<&str>).unwrap_or_default();
/// assert_eq!(cfg.site.dashboard_base, "/dashboard");
/// ```
pub fn load_config<T>(path: Option<impl AsRef<Path>>) -> Result<T, KernelError>
where
    T: DeserializeOwned,
{
    let required = path.is_some();
    let effective_path = path.map_or_else(|| PathBuf::from(DEFAULT_FILE), |p| p.as_ref().to_path_buf());

    let builder = Config::builder()
        .add_source(File::from(effective_path.as_path()).required(required))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .convert_case(config::Case::Snake),
        );

    info!(path = %effective_path.display(), required, "Loading config");

    builder
        .build()
        .context("Failed to build config")?
        .try_deserialize::<T>()
        .context("Failed to deserialize config")
}

#[cfg(test)]
mod tests {
    use super::*;
    use mosaic_domain::config::HostConfig;
    use std::io::Write;

    #[test]
    fn reads_sections_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[server]\nport = 8080\n\n[aggregation]\ncontributor_timeout_ms = 250\n\n\
             [[robots.host_defaults]]\nuserAgents = [\"*\"]\ndisallow = [\"/private/\"]"
        )
        .unwrap();

        let cfg: HostConfig = load_config(Some(file.path())).unwrap();
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.aggregation.contributor_timeout_ms, 250);
        assert_eq!(cfg.robots.host_defaults[0].disallow, ["/private/"]);
        assert_eq!(cfg.site.dashboard_base, "/dashboard");
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config::<HostConfig>(Some(dir.path().join("absent.toml"))).unwrap_err();
        assert!(matches!(err, KernelError::Config { .. }));
    }
}
