//! Per-tick world update.

use crate::events::EventKind;
use crate::world::World;
use ameba_core::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::trace;

/// What changed during one tick
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StepReport {
    pub tick: u64,
    pub deaths: u32,
    pub foods_eaten: u32,
    pub births: u32,
    pub food_spawned: bool,
}

impl World {
    /// Advance the world by one tick.
    ///
    /// Organisms are visited in insertion order. Children born during the tick
    /// are appended and first move on the next tick.
    pub fn step(&mut self) -> StepReport {
        self.tick += 1;
        let mut report = StepReport {
            tick: self.tick,
            ..Default::default()
        };

        let count = self.organisms.len();
        for index in 0..count {
            self.process_organism(index, &mut report);
        }

        if self.rng.gen::<f64>() < self.config.world.food_spawn_prob {
            self.spawn_food_random();
            report.food_spawned = true;
        }

        report
    }

    fn process_organism(&mut self, index: usize, report: &mut StepReport) {
        if !self.organisms[index].is_alive() {
            return;
        }

        let energy_config = &self.config.energy;
        let max_step = energy_config.max_step;
        let vx = (self.rng.gen::<f64>() - 0.5) * 2.0 * max_step;
        let vy = (self.rng.gen::<f64>() - 0.5) * 2.0 * max_step;
        let velocity = Vec2::new(vx, vy);

        let organism = &mut self.organisms[index];
        organism.position = organism.position.add(vx, vy).clamp_to(self.bounds);
        organism.velocity = velocity;

        let drain = energy_config.base_drain + energy_config.motion_drain * velocity.manhattan_length();
        if organism.drain(drain) {
            self.deaths += 1;
            report.deaths += 1;
            self.events.record(
                self.tick,
                EventKind::Death {
                    organism: organism.id.clone(),
                },
            );
            trace!(organism_id = %organism.id, tick = self.tick, "Organism starved");
            return;
        }

        // First match in scan order, not the nearest food
        let reach_squared = organism.reach_squared(energy_config.consumption_radius);
        let position = organism.position;
        let Some(food_index) = self
            .foods
            .iter()
            .position(|food| food.position().distance_squared(&position) < reach_squared)
        else {
            return;
        };

        let food = self.foods.remove(food_index);
        organism.feed(food.energy, energy_config.energy_cap);
        report.foods_eaten += 1;
        self.events.record(
            self.tick,
            EventKind::FoodConsumed {
                organism: organism.id.clone(),
                food: food.id,
            },
        );

        let reproduction = &self.config.reproduction;
        if organism.energy > reproduction.energy_threshold && self.rng.gen::<f64>() < reproduction.base_chance {
            self.reproduce(index);
            report.births += 1;
        }
    }

    fn reproduce(&mut self, parent_index: usize) {
        let parent_id = self.organisms[parent_index].id.clone();
        let parent_dna = self.organisms[parent_index].dna.clone();
        let child_dna = self
            .mutator
            .mutate(&parent_dna, self.config.reproduction.mutation_rate, &mut self.rng);
        let mutated = child_dna != parent_dna;

        let child_id = self.create_organism(Some(child_dna.clone()), BTreeMap::new());
        self.births += 1;
        self.events.record(
            self.tick,
            EventKind::Birth {
                parent: Some(parent_id.clone()),
                child: child_id.clone(),
            },
        );
        if mutated {
            self.events.record(
                self.tick,
                EventKind::Mutation {
                    organism: child_id.clone(),
                    dna: child_dna,
                },
            );
        }

        let cost = self.config.reproduction.cost;
        self.organisms[parent_index].pay(cost);
        trace!(parent_id = %parent_id, child_id = %child_id, mutated, tick = self.tick, "Organism reproduced");
    }
}
