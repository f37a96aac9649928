use anyhow::Context;
use mosaic::domain::config::HostConfig;
use mosaic::kernel::config::load_config;
use mosaic_logger::Logger;
use mosaic_server::Server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cfg: HostConfig =
        load_config(None::<&str>).context("Critical: Configuration is malformed")?;

    let mut logger = Logger::builder(env!("CARGO_PKG_NAME")).env_filter(&cfg.logging.filter);
    if let Some(directory) = &cfg.logging.directory {
        logger = logger.path(directory).json(cfg.logging.json);
    }
    let _log = logger.init()?;

    Server::builder().config(cfg).build()?.run().await
}
