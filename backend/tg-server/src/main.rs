use tg_server::{
    ShutdownCoordinator, build_router, build_services, logger, spawn_rate_limit_housekeeping,
};

use std::error::Error;
use std::future::IntoFuture;
use std::net::SocketAddr;
use std::time::Duration;

use log::{error, info, warn};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenvy::dotenv().ok();

    // Load and validate configuration
    let config = tg_config::Config::load()?;
    config.validate()?;

    let log_file_path = if let Some(ref filename) = config.logging.file {
        let log_dir = tg_config::Config::config_dir()?.join(&config.logging.dir);
        std::fs::create_dir_all(&log_dir)?;
        Some(log_dir.join(filename))
    } else {
        None
    };

    // Initialize logger (before any other logging)
    logger::initialize(config.logging.level, log_file_path, config.logging.colored)?;

    info!("Starting tg-server v{}", env!("CARGO_PKG_VERSION"));
    config.log_summary();

    let services = build_services(&config).await?;
    let shutdown = ShutdownCoordinator::new();

    let housekeeping = spawn_rate_limit_housekeeping(
        services.limiter.clone(),
        config.rate_limit.cleanup_interval(),
        shutdown.subscribe_guard(),
    );

    let app = build_router(services.state);

    let listener = TcpListener::bind(config.bind_addr()).await?;
    let actual_addr = listener.local_addr()?;
    info!("Server listening on {}", actual_addr);

    let shutdown_for_signal = shutdown.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Received SIGINT (Ctrl+C), initiating graceful shutdown");
                shutdown_for_signal.shutdown();
            }
            Err(e) => {
                error!("Failed to listen for SIGINT: {}", e);
            }
        }
    });

    let mut server_guard = shutdown.subscribe_guard();
    let server = axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(async move { server_guard.wait().await })
    .into_future();

    // In-flight requests get the grace period, then the process exits anyway
    let grace = Duration::from_secs(config.server.shutdown_grace_secs);
    let mut grace_guard = shutdown.subscribe_guard();
    let grace_elapsed = async move {
        grace_guard.wait().await;
        tokio::time::sleep(grace).await;
    };

    info!("Server ready to accept connections");
    tokio::select! {
        result = server => result?,
        _ = grace_elapsed => warn!("Shutdown grace period of {}s elapsed, dropping in-flight requests", grace.as_secs()),
    }

    if let Err(e) = housekeeping.await {
        warn!("Housekeeping task ended abnormally: {}", e);
    }

    info!("Graceful shutdown complete");
    Ok(())
}
