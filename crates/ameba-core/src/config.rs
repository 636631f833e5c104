//! Configuration types for the simulation.

use crate::{Bounds, Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// World configuration parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Width of the plane
    pub width: f64,
    /// Height of the plane
    pub height: f64,
    /// Organisms created before the scheduler starts
    pub initial_organisms: usize,
    /// Food units created before the scheduler starts
    pub initial_foods: usize,
    /// Per-tick probability of spawning one food unit
    pub food_spawn_prob: f64,
    /// Food units dropped by one touch
    pub touch_food_count: usize,
    /// Max jitter of touch food from the touch point, per axis
    pub touch_jitter: f64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 2000.0,
            height: 2000.0,
            initial_organisms: 20,
            initial_foods: 12,
            food_spawn_prob: 0.15,
            touch_food_count: 3,
            touch_jitter: 30.0,
        }
    }
}

impl WorldConfig {
    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.width, self.height)
    }
}

/// Energy and cost configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EnergyConfig {
    /// Upper bound on organism energy
    pub energy_cap: f64,
    /// Metabolic cost paid every tick
    pub base_drain: f64,
    /// Extra cost per unit of |vx| + |vy|
    pub motion_drain: f64,
    /// Largest displacement per axis per tick
    pub max_step: f64,
    /// Base pickup radius, added to organism size
    pub consumption_radius: f64,
    /// Range of starting energy for new organisms
    pub initial_energy: (f64, f64),
    /// Range of organism sizes
    pub size: (f64, f64),
    /// Range of energy carried by one food unit
    pub food_energy: (f64, f64),
}

impl Default for EnergyConfig {
    fn default() -> Self {
        Self {
            energy_cap: 1.6,
            base_drain: 0.002,
            motion_drain: 0.001,
            max_step: 0.5,
            consumption_radius: 10.0,
            initial_energy: (0.6, 1.5),
            size: (8.0, 12.0),
            food_energy: (0.4, 1.2),
        }
    }
}

/// Reproduction configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReproductionConfig {
    /// Per-tick chance of reproducing once well fed
    pub base_chance: f64,
    /// Energy that must be exceeded before reproduction is possible
    pub energy_threshold: f64,
    /// Energy deducted from the parent
    pub cost: f64,
    /// Per-layer probability of a DNA mutation in the child
    pub mutation_rate: f64,
}

impl Default for ReproductionConfig {
    fn default() -> Self {
        Self {
            base_chance: 0.12,
            energy_threshold: 1.1,
            cost: 0.45,
            mutation_rate: 0.02,
        }
    }
}

/// Everything the simulation engine needs
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub world: WorldConfig,
    pub energy: EnergyConfig,
    pub reproduction: ReproductionConfig,
    /// Scheduler period (milliseconds)
    pub tick_interval_ms: u64,
    /// Maximum retained events; 0 keeps every event
    pub event_log_capacity: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            world: WorldConfig::default(),
            energy: EnergyConfig::default(),
            reproduction: ReproductionConfig::default(),
            tick_interval_ms: 200,
            event_log_capacity: 10_000,
        }
    }
}

impl SimulationConfig {
    /// Reject configurations the engine cannot run with
    pub fn validate(&self) -> Result<()> {
        if !(self.world.width > 0.0 && self.world.height > 0.0) {
            return Err(Error::Validation(format!(
                "world bounds must be positive, got {}x{}",
                self.world.width, self.world.height
            )));
        }
        for (name, p) in [
            ("food_spawn_prob", self.world.food_spawn_prob),
            ("reproduction.base_chance", self.reproduction.base_chance),
            ("reproduction.mutation_rate", self.reproduction.mutation_rate),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(Error::Validation(format!("{name} must be in [0, 1], got {p}")));
            }
        }
        for (name, (lo, hi)) in [
            ("energy.initial_energy", self.energy.initial_energy),
            ("energy.size", self.energy.size),
            ("energy.food_energy", self.energy.food_energy),
        ] {
            if !(lo <= hi) || lo < 0.0 {
                return Err(Error::Validation(format!("{name} must be a non-negative range, got ({lo}, {hi})")));
            }
        }
        if self.energy.food_energy.0 <= 0.0 {
            return Err(Error::Validation("food energy must be positive".to_string()));
        }
        if self.energy.energy_cap <= 0.0 {
            return Err(Error::Validation("energy_cap must be positive".to_string()));
        }
        if self.energy.initial_energy.1 > self.energy.energy_cap {
            return Err(Error::Validation(format!(
                "energy.initial_energy upper bound {} exceeds energy_cap {}",
                self.energy.initial_energy.1, self.energy.energy_cap
            )));
        }
        for (name, value) in [
            ("energy.base_drain", self.energy.base_drain),
            ("energy.motion_drain", self.energy.motion_drain),
            ("energy.max_step", self.energy.max_step),
            ("energy.consumption_radius", self.energy.consumption_radius),
            ("reproduction.cost", self.reproduction.cost),
            ("world.touch_jitter", self.world.touch_jitter),
        ] {
            if !(value >= 0.0) {
                return Err(Error::Validation(format!("{name} must be non-negative, got {value}")));
            }
        }
        if self.tick_interval_ms == 0 {
            return Err(Error::Validation("tick_interval_ms must be non-zero".to_string()));
        }
        Ok(())
    }
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server bind address
    pub bind_address: String,
    /// Server port
    pub port: u16,
    /// Name reported by the health endpoint
    pub sim_name: String,
    /// OpenTelemetry endpoint
    pub otel_endpoint: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0".to_string(),
            port: 5001,
            sim_name: "go-sim".to_string(),
            otel_endpoint: None,
        }
    }
}

/// Top-level configuration, as read from a JSON file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub simulation: SimulationConfig,
}

impl AppConfig {
    /// Load from a JSON file; absent keys keep their defaults
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let config: AppConfig = serde_json::from_str(&raw)?;
        tracing::debug!(path = %path.as_ref().display(), "Loaded configuration file");
        Ok(config)
    }
}
