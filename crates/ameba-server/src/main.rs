//! HTTP server for the Ameba artificial-life simulation.

mod api;
mod cli;
mod prometheus;
mod telemetry;

use ameba_world::{Scheduler, SimulationService};
use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Args::parse();
    let config = args.load_config()?;

    telemetry::init_telemetry(config.server.otel_endpoint.as_deref())?;

    info!(
        "Starting Ameba simulation server on {}:{}",
        config.server.bind_address, config.server.port
    );

    let service = Arc::new(SimulationService::new(config.simulation.clone())?);
    service.populate();

    let stats = service.inspect(|world| world.population_stats());
    record_gauge!("population_alive", stats.alive);
    info!(organisms = stats.total, "Initial population created");

    // Start the tick loop before accepting requests
    let shutdown = CancellationToken::new();
    let period = Duration::from_millis(config.simulation.tick_interval_ms);
    let scheduler = Scheduler::new(service.clone(), period).spawn(shutdown.clone());

    let app = api::router(api::AppState {
        service,
        sim_name: config.server.sim_name.clone(),
    });

    let addr = format!("{}:{}", config.server.bind_address, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    shutdown.cancel();
    if let Err(e) = scheduler.await {
        error!("Scheduler task failed: {}", e);
    }

    telemetry::shutdown_telemetry();

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
