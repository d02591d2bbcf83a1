use chrono::{TimeDelta, Utc};
use color_eyre::eyre::WrapErr;
use core::{MatchdayConfig, MatchdaySimulator};
use database::{DatabaseGenerator, DatabaseLoader};
use env_logger::Env;
use log::info;
use std::env;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::watch;
use web::{GameAppData, MatchdayServer};

#[cfg(target_os = "linux")]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

const DEFAULT_PORT: u16 = 18000;

fn load_config() -> color_eyre::Result<MatchdayConfig> {
    let Ok(path) = env::var("MATCHDAY_CONFIG") else {
        return Ok(MatchdayConfig::default());
    };

    let raw = std::fs::read_to_string(&path)
        .wrap_err_with(|| format!("cannot read config file {}", path))?;

    serde_json::from_str(&raw).wrap_err_with(|| format!("invalid config file {}", path))
}

// The workspace crate named `core` shadows `::core`, which `#[tokio::main]`
// expands to, so the runtime is built by hand.
fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .wrap_err("cannot start tokio runtime")?
        .block_on(run())
}

async fn run() -> color_eyre::Result<()> {
    let config = load_config()?;
    let port = env::var("MATCHDAY_PORT")
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(DEFAULT_PORT);

    let now = Instant::now();

    let database = DatabaseLoader::load().wrap_err("embedded league data is invalid")?;
    // First round kicks off shortly after startup
    let start = Utc::now().naive_utc() + TimeDelta::minutes(1);
    let seed = DatabaseGenerator::generate(&database, Some(start), config.seed);

    info!("database loaded: {} ms", now.elapsed().as_millis());

    let simulator = Arc::new(MatchdaySimulator::in_memory(config));
    simulator.seed(seed);

    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let tracker = tokio::spawn(Arc::clone(&simulator.tracker).run(shutdown_rx.clone()));
    let scheduler = tokio::spawn(Arc::clone(&simulator.scheduler).run(shutdown_rx));

    let data = GameAppData { simulator };

    MatchdayServer::new(data, port).run().await;

    info!("server stopped, shutting down background loops");

    shutdown_tx.send(true)?;
    tracker.await?;
    scheduler.await?;

    Ok(())
}
