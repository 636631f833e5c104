//! Mutation operators for DNA.

use crate::color::{mutate_color, BASELINE_COLOR};
use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MutationConfig {
    /// Perturbation applied to an existing layer
    pub layer_magnitude: f64,
    /// Perturbation applied to the baseline color when a layer is appended
    pub append_magnitude: f64,
    /// Append chance is `mutation_rate / append_divisor`
    pub append_divisor: f64,
    /// Color a new layer is derived from
    pub baseline: String,
}

impl Default for MutationConfig {
    fn default() -> Self {
        Self {
            layer_magnitude: 0.08,
            append_magnitude: 0.15,
            append_divisor: 3.0,
            baseline: BASELINE_COLOR.to_string(),
        }
    }
}

pub struct DnaMutator {
    config: MutationConfig,
}

impl DnaMutator {
    pub fn new(config: MutationConfig) -> Self {
        Self { config }
    }

    /// Derive a child genome from `parent`.
    ///
    /// Each layer mutates independently with probability `mutation_rate`. When
    /// no layer changed, a new layer is appended with probability
    /// `mutation_rate / append_divisor`, so the result is never shorter than
    /// the parent and at most one layer longer.
    pub fn mutate<R: Rng + ?Sized>(&self, parent: &[String], mutation_rate: f64, rng: &mut R) -> Vec<String> {
        let mut out = Vec::with_capacity(parent.len() + 1);
        let mut changed = false;

        for layer in parent {
            if rng.gen::<f64>() < mutation_rate {
                out.push(mutate_color(layer, self.config.layer_magnitude, rng));
                changed = true;
            } else {
                out.push(layer.clone());
            }
        }

        if !changed && rng.gen::<f64>() < mutation_rate / self.config.append_divisor {
            out.push(mutate_color(&self.config.baseline, self.config.append_magnitude, rng));
        }

        out
    }
}

impl Default for DnaMutator {
    fn default() -> Self {
        Self::new(MutationConfig::default())
    }
}

/// [`DnaMutator::mutate`] with the default configuration
pub fn mutate_dna<R: Rng + ?Sized>(parent: &[String], mutation_rate: f64, rng: &mut R) -> Vec<String> {
    DnaMutator::default().mutate(parent, mutation_rate, rng)
}
