//! Organism state and management.

use ameba_core::{OrganismId, OrganismState, Vec2};
use ameba_genome::Dna;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// An organism in the simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Organism {
    pub id: OrganismId,
    pub position: Vec2,
    /// Displacement applied on the last tick
    pub velocity: Vec2,
    pub size: f64,
    pub energy: f64,
    pub state: OrganismState,
    #[serde(rename = "dna_layers")]
    pub dna: Dna,
    pub traits: BTreeMap<String, f64>,
    pub born_at_tick: u64,
}

impl Organism {
    pub fn new(position: Vec2, size: f64, energy: f64, dna: Dna, born_at_tick: u64) -> Self {
        Self {
            id: OrganismId::new(),
            position,
            velocity: Vec2::ZERO,
            size,
            energy,
            state: OrganismState::Normal,
            dna,
            traits: BTreeMap::new(),
            born_at_tick,
        }
    }

    pub fn with_traits(mut self, traits: BTreeMap<String, f64>) -> Self {
        self.traits = traits;
        self
    }

    pub fn is_alive(&self) -> bool {
        !self.state.is_dead()
    }

    /// Subtract metabolic cost. Returns true when this drain killed the organism.
    pub fn drain(&mut self, amount: f64) -> bool {
        self.energy -= amount;
        if self.energy <= 0.0 {
            self.energy = 0.0;
            self.state = OrganismState::Dead;
            return true;
        }
        false
    }

    /// Add energy, capped at `cap`
    pub fn feed(&mut self, amount: f64, cap: f64) {
        self.energy = (self.energy + amount).min(cap);
    }

    /// Pay a fixed cost without ever dying from it
    pub fn pay(&mut self, cost: f64) {
        self.energy = (self.energy - cost).max(0.0);
    }

    /// Squared pickup distance for food
    pub fn reach_squared(&self, base_radius: f64) -> f64 {
        let reach = base_radius + self.size;
        reach * reach
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_organism(energy: f64) -> Organism {
        Organism::new(Vec2::new(5.0, 5.0), 10.0, energy, vec!["#88c1ff".to_string()], 0)
    }

    #[test]
    fn test_organism_creation() {
        let organism = test_organism(1.0);

        assert_eq!(organism.position, Vec2::new(5.0, 5.0));
        assert_eq!(organism.velocity, Vec2::ZERO);
        assert_eq!(organism.state, OrganismState::Normal);
        assert!(organism.traits.is_empty());
        assert!(organism.is_alive());
    }

    #[test]
    fn test_drain_to_death() {
        let mut organism = test_organism(0.01);

        assert!(!organism.drain(0.005));
        assert!(organism.is_alive());

        assert!(organism.drain(0.02));
        assert_eq!(organism.energy, 0.0);
        assert_eq!(organism.state, OrganismState::Dead);
    }

    #[test]
    fn test_feed_respects_cap() {
        let mut organism = test_organism(1.4);
        organism.feed(0.5, 1.6);
        assert_eq!(organism.energy, 1.6);

        let mut organism = test_organism(0.2);
        organism.feed(0.5, 1.6);
        assert!((organism.energy - 0.7).abs() < 1e-12);
    }

    #[test]
    fn test_pay_never_goes_negative() {
        let mut organism = test_organism(0.3);
        organism.pay(0.45);
        assert_eq!(organism.energy, 0.0);
        assert!(organism.is_alive());
    }

    #[test]
    fn test_organism_serialization() {
        let organism = test_organism(1.0).with_traits(BTreeMap::from([("speed".to_string(), 0.5)]));
        let json = serde_json::to_value(&organism).unwrap();

        assert_eq!(json["state"], "normal");
        assert_eq!(json["dna_layers"][0], "#88c1ff");
        assert_eq!(json["position"]["x"], 5.0);
        assert_eq!(json["velocity"]["y"], 0.0);
        assert_eq!(json["traits"]["speed"], 0.5);
        assert!(json["id"].as_str().unwrap().starts_with("org_"));
    }
}
