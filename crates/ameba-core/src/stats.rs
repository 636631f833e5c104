//! Population statistics aggregated over the organism collection.

use serde::{Deserialize, Serialize};

/// Running aggregate over organisms, built with [`PopulationStats::record`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PopulationStats {
    /// All organisms, dead ones included
    pub total: usize,
    pub alive: usize,
    pub dead: usize,
    pub energy_sum: f64,
    pub size_sum: f64,
}

impl PopulationStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one organism to the aggregate
    pub fn record(&mut self, energy: f64, size: f64, is_dead: bool) {
        self.total += 1;
        if is_dead {
            self.dead += 1;
        } else {
            self.alive += 1;
        }
        self.energy_sum += energy;
        self.size_sum += size;
    }

    /// Mean energy over every organism; 0 when empty
    pub fn avg_energy(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.energy_sum / self.total as f64
        }
    }

    pub fn avg_size(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.size_sum / self.total as f64
        }
    }
}

impl FromIterator<(f64, f64, bool)> for PopulationStats {
    fn from_iter<I: IntoIterator<Item = (f64, f64, bool)>>(iter: I) -> Self {
        let mut stats = PopulationStats::new();
        for (energy, size, is_dead) in iter {
            stats.record(energy, size, is_dead);
        }
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_population_averages_to_zero() {
        let stats = PopulationStats::new();
        assert_eq!(stats.avg_energy(), 0.0);
        assert_eq!(stats.avg_size(), 0.0);
    }

    #[test]
    fn test_dead_organisms_count_toward_average() {
        let stats: PopulationStats = vec![(1.0, 10.0, false), (0.0, 8.0, true)]
            .into_iter()
            .collect();

        assert_eq!(stats.total, 2);
        assert_eq!(stats.alive, 1);
        assert_eq!(stats.dead, 1);
        assert_eq!(stats.avg_energy(), 0.5);
        assert_eq!(stats.avg_size(), 9.0);
    }
}
