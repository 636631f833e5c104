//! Command-line arguments and configuration loading.

use ameba_core::AppConfig;
use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Default)]
#[command(name = "ameba-server")]
#[command(about = "Artificial-life simulation served over HTTP")]
pub struct Args {
    /// Path to a JSON configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Address to bind the server to
    #[arg(short, long)]
    pub bind: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "PORT")]
    pub port: Option<u16>,

    /// Scheduler period in milliseconds
    #[arg(long)]
    pub tick_ms: Option<u64>,

    /// Maximum retained events (0 keeps everything)
    #[arg(long)]
    pub event_log_capacity: Option<usize>,

    /// OpenTelemetry collector endpoint
    #[arg(long, env = "OTEL_EXPORTER_OTLP_ENDPOINT")]
    pub otel_endpoint: Option<String>,
}

impl Args {
    /// Defaults, then the config file, then flags
    pub fn load_config(&self) -> Result<AppConfig> {
        let mut config = match &self.config {
            Some(path) => AppConfig::from_file(path)
                .with_context(|| format!("failed to load config from {}", path.display()))?,
            None => AppConfig::default(),
        };

        if let Some(bind) = &self.bind {
            config.server.bind_address = bind.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(tick_ms) = self.tick_ms {
            config.simulation.tick_interval_ms = tick_ms;
        }
        if let Some(capacity) = self.event_log_capacity {
            config.simulation.event_log_capacity = capacity;
        }
        if let Some(endpoint) = &self.otel_endpoint {
            config.server.otel_endpoint = Some(endpoint.clone());
        }

        config.simulation.validate()?;
        Ok(config)
    }
}
