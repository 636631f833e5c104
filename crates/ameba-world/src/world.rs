//! Authoritative world state and its creation entry points.

use crate::events::{EventKind, EventLog};
use crate::snapshot::{MetricsSnapshot, Tunables, WorldSnapshot};
use crate::{Event, Food, Organism};
use ameba_core::{Bounds, OrganismId, PopulationStats, Result, SimulationConfig, Vec2};
use ameba_genome::{baseline_dna, Dna, DnaMutator};
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Mutable world state. Callers outside this crate reach it through
/// [`crate::SimulationService`].
pub struct World {
    pub(crate) config: SimulationConfig,
    pub(crate) bounds: Bounds,
    pub(crate) tick: u64,
    pub(crate) organisms: Vec<Organism>,
    pub(crate) foods: Vec<Food>,
    pub(crate) births: u64,
    pub(crate) deaths: u64,
    pub(crate) events: EventLog,
    pub(crate) mutator: DnaMutator,
    pub(crate) rng: ChaCha8Rng,
}

impl World {
    /// Empty world seeded from entropy
    pub fn new(config: SimulationConfig) -> Result<Self> {
        Self::with_rng(config, ChaCha8Rng::from_entropy())
    }

    pub fn with_rng(config: SimulationConfig, rng: ChaCha8Rng) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            bounds: config.world.bounds(),
            events: EventLog::new(config.event_log_capacity),
            config,
            tick: 0,
            organisms: Vec::new(),
            foods: Vec::new(),
            births: 0,
            deaths: 0,
            mutator: DnaMutator::default(),
            rng,
        })
    }

    /// Create the startup population. Not counted as births.
    pub fn populate(&mut self) {
        for _ in 0..self.config.world.initial_organisms {
            self.create_organism(None, BTreeMap::new());
        }
        for _ in 0..self.config.world.initial_foods {
            self.spawn_food_random();
        }
        info!(
            organisms = self.organisms.len(),
            foods = self.foods.len(),
            "World populated"
        );
    }

    /// Shared creation path for external spawns and reproduction.
    ///
    /// Does not touch `births` or the event log; callers account for the birth.
    pub(crate) fn create_organism(&mut self, dna: Option<Dna>, traits: BTreeMap<String, f64>) -> OrganismId {
        let dna = dna.filter(|d| !d.is_empty()).unwrap_or_else(baseline_dna);
        let position = self.random_position();
        let size = sample(self.config.energy.size, &mut self.rng);
        let energy = sample(self.config.energy.initial_energy, &mut self.rng);

        let organism = Organism::new(position, size, energy, dna, self.tick).with_traits(traits);
        let id = organism.id.clone();
        self.organisms.push(organism);
        id
    }

    /// Create one organism on behalf of an external request
    pub fn spawn(&mut self, seed_traits: BTreeMap<String, f64>) -> Organism {
        let id = self.create_organism(None, seed_traits);
        self.births += 1;
        self.events.record(self.tick, EventKind::Birth { parent: None, child: id });

        // Just pushed
        let organism = self.organisms[self.organisms.len() - 1].clone();
        debug!(organism_id = %organism.id, "Organism spawned");
        organism
    }

    /// Drop food around a point, jittered on each axis
    pub fn touch(&mut self, x: f64, y: f64) -> Vec<Food> {
        let jitter = self.config.world.touch_jitter;
        (0..self.config.world.touch_food_count)
            .map(|_| {
                let nx = x + (self.rng.gen::<f64>() - 0.5) * 2.0 * jitter;
                let ny = y + (self.rng.gen::<f64>() - 0.5) * 2.0 * jitter;
                self.spawn_food_at(nx, ny)
            })
            .collect()
    }

    /// One food unit at an exact position
    pub fn spawn_food_at(&mut self, x: f64, y: f64) -> Food {
        let energy = sample(self.config.energy.food_energy, &mut self.rng);
        let food = Food::new(Vec2::new(x, y), energy);
        self.foods.push(food.clone());
        food
    }

    pub(crate) fn spawn_food_random(&mut self) -> Food {
        let position = self.random_position();
        self.spawn_food_at(position.x, position.y)
    }

    /// Insert a fully specified organism, bypassing randomization
    pub fn insert_organism(&mut self, organism: Organism) {
        self.organisms.push(organism);
    }

    /// Insert a fully specified food unit, bypassing randomization
    pub fn insert_food(&mut self, food: Food) {
        self.foods.push(food);
    }

    fn random_position(&mut self) -> Vec2 {
        Vec2::new(
            self.rng.gen::<f64>() * self.bounds.width,
            self.rng.gen::<f64>() * self.bounds.height,
        )
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn organisms(&self) -> &[Organism] {
        &self.organisms
    }

    pub fn organism(&self, id: &str) -> Option<&Organism> {
        self.organisms.iter().find(|o| o.id.as_str() == id)
    }

    pub fn foods(&self) -> &[Food] {
        &self.foods
    }

    pub fn births(&self) -> u64 {
        self.births
    }

    pub fn deaths(&self) -> u64 {
        self.deaths
    }

    pub fn events(&self) -> &EventLog {
        &self.events
    }

    pub fn population_stats(&self) -> PopulationStats {
        self.organisms
            .iter()
            .map(|o| (o.energy, o.size, o.state.is_dead()))
            .collect()
    }

    pub fn tunables(&self) -> Tunables {
        Tunables {
            food_spawn_prob: self.config.world.food_spawn_prob,
            reproduction_base_chance: self.config.reproduction.base_chance,
            world_width: self.bounds.width,
            world_height: self.bounds.height,
        }
    }

    pub fn snapshot(&self) -> WorldSnapshot {
        WorldSnapshot {
            tick: self.tick,
            organisms: self.organisms.clone(),
            foods: self.foods.clone(),
        }
    }

    pub fn metrics(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            tick: self.tick,
            births: self.births,
            deaths: self.deaths,
            foods: self.foods.len(),
            population: self.population_stats(),
            tunables: self.tunables(),
        }
    }

    pub fn events_since(&self, since: u64, limit: Option<usize>) -> Vec<Event> {
        self.events.since(since, limit)
    }
}

/// Uniform draw from `lo + u * (hi - lo)`, inclusive of a degenerate range
pub(crate) fn sample<R: Rng + ?Sized>((lo, hi): (f64, f64), rng: &mut R) -> f64 {
    lo + rng.gen::<f64>() * (hi - lo)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ameba_core::OrganismState;

    fn test_world() -> World {
        World::with_rng(SimulationConfig::default(), ChaCha8Rng::seed_from_u64(42)).unwrap()
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = SimulationConfig::default();
        config.world.height = -1.0;
        assert!(World::new(config).is_err());
    }

    #[test]
    fn test_populate_does_not_count_births() {
        let mut world = test_world();
        world.populate();

        assert_eq!(world.organisms().len(), 20);
        assert_eq!(world.foods().len(), 12);
        assert_eq!(world.births(), 0);
        assert!(world.events().is_empty());
    }

    #[test]
    fn test_spawn_defaults() {
        let mut world = test_world();
        let organism = world.spawn(BTreeMap::new());

        assert!((0.6..=1.5).contains(&organism.energy));
        assert!((8.0..=12.0).contains(&organism.size));
        assert_eq!(organism.dna, vec!["#88c1ff".to_string()]);
        assert_eq!(organism.state, OrganismState::Normal);
        assert!(world.bounds().contains(organism.position));
        assert_eq!(world.births(), 1);

        let events: Vec<_> = world.events().iter().collect();
        assert_eq!(events.len(), 1);
        assert_eq!(
            events[0].kind,
            EventKind::Birth { parent: None, child: organism.id.clone() }
        );
    }

    #[test]
    fn test_spawn_keeps_seed_traits() {
        let mut world = test_world();
        let traits = BTreeMap::from([("cohesion".to_string(), 0.4), ("escape".to_string(), 0.7)]);
        let organism = world.spawn(traits.clone());
        assert_eq!(organism.traits, traits);
    }

    #[test]
    fn test_touch_spawns_jittered_food() {
        let mut world = test_world();
        let foods = world.touch(500.0, 500.0);

        assert_eq!(foods.len(), 3);
        assert_eq!(world.foods().len(), 3);
        for food in &foods {
            assert!((food.x - 500.0).abs() <= 30.0);
            assert!((food.y - 500.0).abs() <= 30.0);
            assert!((0.4..=1.2).contains(&food.energy));
        }
    }

    #[test]
    fn test_spawn_food_at_exact_position() {
        let mut world = test_world();
        let food = world.spawn_food_at(12.5, 40.0);

        assert_eq!(food.position(), Vec2::new(12.5, 40.0));
        assert_eq!(world.foods(), &[food]);
    }

    #[test]
    fn test_metrics_and_tunables() {
        let mut world = test_world();
        world.populate();
        world.spawn(BTreeMap::new());

        let metrics = world.metrics();
        assert_eq!(metrics.population.total, 21);
        assert_eq!(metrics.births, 1);
        assert_eq!(metrics.foods, 12);
        assert_eq!(metrics.tunables.food_spawn_prob, 0.15);
        assert_eq!(metrics.tunables.world_width, 2000.0);
        assert!(metrics.population.avg_energy() > 0.0);
    }

    #[test]
    fn test_find_organism_by_id() {
        let mut world = test_world();
        let organism = world.spawn(BTreeMap::new());

        assert_eq!(world.organism(organism.id.as_str()), Some(&organism));
        assert!(world.organism("org_missing").is_none());
    }
}
