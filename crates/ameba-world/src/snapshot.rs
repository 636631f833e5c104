//! Consistent read-only views of the world, each taken under one lock.

use crate::{Food, Organism};
use ameba_core::PopulationStats;
use serde::{Deserialize, Serialize};

/// Full world snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub tick: u64,
    pub organisms: Vec<Organism>,
    pub foods: Vec<Food>,
}

/// Live simulation parameters as reported to clients
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tunables {
    pub food_spawn_prob: f64,
    pub reproduction_base_chance: f64,
    pub world_width: f64,
    pub world_height: f64,
}

/// Counters and aggregates for monitoring
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub tick: u64,
    pub births: u64,
    pub deaths: u64,
    pub foods: usize,
    pub population: PopulationStats,
    pub tunables: Tunables,
}
