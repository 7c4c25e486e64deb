use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use clap::Parser;
use flashdeck::{backup, config, db, logging, AppState};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if std::fs::metadata(".env").is_ok() {
        dotenv::dotenv().ok();
    }

    let args = config::CliArgs::parse();

    let log_dir = config::get_data_dir_path()
        .filter(|path| path.exists())
        .map(|path| path.join("logs"));
    let _log_guard = logging::init_logging(log_dir.as_deref(), args.debug, args.json_logs);

    let config = config::get_config(&args);

    let pool = Arc::new(db::init_pool(&config.database_url)?);
    {
        let mut conn = pool.get().context("Failed to get connection for migrations")?;
        flashdeck::run_migrations(&mut conn)?;
    }

    let state = Arc::new(AppState::load(pool));

    match config.backup_interval() {
        Some(interval) => {
            backup::spawn_backup_task(
                state.clone(),
                interval,
                config.backup_dir.clone(),
                config.backup_count as usize,
            );
        }
        None => info!("Periodic backups disabled"),
    }

    let app = flashdeck::create_app(state);

    let addr = SocketAddr::from(([127, 0, 0, 1], config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("Listening on {}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
