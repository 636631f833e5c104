//! Serialized access to the world.
//!
//! [`SimulationService`] is the only owner of the [`World`]. Every method takes
//! the lock exactly once for its whole body and releases it on return, so
//! readers always observe a world between two complete mutations. None of the
//! methods are async; the lock is never held across an await point.

use crate::snapshot::{MetricsSnapshot, Tunables, WorldSnapshot};
use crate::{Event, Food, Organism, StepReport, World};
use ameba_core::{Error, Result, SimulationConfig};
use parking_lot::Mutex;
use std::collections::BTreeMap;
use tracing::{debug, instrument};

pub struct SimulationService {
    world: Mutex<World>,
}

impl SimulationService {
    pub fn new(config: SimulationConfig) -> Result<Self> {
        Ok(Self::from_world(World::new(config)?))
    }

    pub fn from_world(world: World) -> Self {
        Self {
            world: Mutex::new(world),
        }
    }

    /// Create the startup population
    pub fn populate(&self) {
        self.world.lock().populate();
    }

    pub fn step(&self) -> StepReport {
        self.world.lock().step()
    }

    #[instrument(skip(self, seed_traits), fields(traits = seed_traits.len()))]
    pub fn spawn(&self, seed_traits: BTreeMap<String, f64>) -> Organism {
        self.world.lock().spawn(seed_traits)
    }

    #[instrument(skip(self))]
    pub fn touch(&self, x: f64, y: f64) -> Vec<Food> {
        let foods = self.world.lock().touch(x, y);
        debug!(count = foods.len(), "Touch dropped food");
        foods
    }

    pub fn spawn_food_at(&self, x: f64, y: f64) -> Food {
        self.world.lock().spawn_food_at(x, y)
    }

    pub fn snapshot(&self) -> WorldSnapshot {
        self.world.lock().snapshot()
    }

    pub fn metrics(&self) -> MetricsSnapshot {
        self.world.lock().metrics()
    }

    pub fn tunables(&self) -> Tunables {
        self.world.lock().tunables()
    }

    pub fn events(&self, since: u64, limit: Option<usize>) -> Vec<Event> {
        self.world.lock().events_since(since, limit)
    }

    pub fn organism(&self, id: &str) -> Result<Organism> {
        self.world
            .lock()
            .organism(id)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("organism {id}")))
    }

    /// Run a read-only closure against the world under the lock
    pub fn inspect<T>(&self, f: impl FnOnce(&World) -> T) -> T {
        f(&*self.world.lock())
    }
}
