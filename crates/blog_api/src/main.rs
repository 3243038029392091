use anyhow::Context;
use blog_api::config::Config;
use blog_api::db::Database;
use blog_api::{app, AppState};
use log::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load()?;

    let log_dir = config
        .logging
        .absolute_dir()
        .context("failed to resolve log directory")?;
    blog_core::init_logging(&config.logging.level, &log_dir.to_string_lossy())
        .map_err(anyhow::Error::msg)?;
    info!("event=config_load module=api status=ok database={}", config.database.path);

    let db = Database::connect(&config.database)?;

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("event=server_start module=api status=ok addr={addr}");

    axum::serve(listener, app(AppState { db })).await?;

    Ok(())
}
