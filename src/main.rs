//! Forest weather dashboard server.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use forest_weather::{router, ArchiveClient, Dashboard, FailurePolicy, DEFAULT_ARCHIVE_URL};
use log::{error, info};

/// Enrich forest-inventory uploads with historic weather and serve the dashboard API
#[derive(Parser, Debug)]
#[command(name = "forest-weather")]
struct Args {
    /// Listen address
    #[arg(short, long, default_value = "0.0.0.0:8050", env = "FOREST_WEATHER_LISTEN_ADDR")]
    listen: SocketAddr,

    /// Base URL of the daily weather archive
    #[arg(long, default_value = DEFAULT_ARCHIVE_URL, env = "FOREST_WEATHER_ARCHIVE_URL")]
    archive_url: String,

    /// What a failed row lookup does to an upload: "abort" or "mark-unavailable"
    #[arg(long, default_value = "abort", env = "FOREST_WEATHER_FAILURE_POLICY")]
    failure_policy: FailurePolicy,

    /// Sessions unused for this many seconds are dropped
    #[arg(long, default_value_t = 3600, env = "FOREST_WEATHER_SESSION_IDLE_SECS")]
    session_idle_secs: u64,

    /// Largest accepted upload, in bytes
    #[arg(long, default_value_t = forest_weather::DEFAULT_MAX_UPLOAD_BYTES, env = "FOREST_WEATHER_MAX_UPLOAD_BYTES")]
    max_upload_bytes: usize,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let archive = ArchiveClient::builder().base_url(args.archive_url).build();
    let dashboard = Dashboard::builder()
        .source(Arc::new(archive))
        .failure_policy(args.failure_policy)
        .build();
    let dashboard = Arc::new(dashboard);

    let max_idle = Duration::from_secs(args.session_idle_secs);
    let sweeper = Arc::clone(&dashboard);
    tokio::spawn(async move {
        let period = max_idle.clamp(Duration::from_secs(1), Duration::from_secs(60));
        let mut ticks = tokio::time::interval(period);
        loop {
            ticks.tick().await;
            sweeper.evict_idle_sessions(max_idle).await;
        }
    });

    let app = router(dashboard, args.max_upload_bytes);

    info!(
        "Listening on {} (failure policy: {})",
        args.listen, args.failure_policy
    );
    let listener = match tokio::net::TcpListener::bind(args.listen).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind {}: {}", args.listen, e);
            std::process::exit(1);
        }
    };
    if let Err(e) = axum::serve(listener, app).await {
        error!("Server failed: {}", e);
        std::process::exit(1);
    }
}
