//! Consumable food units.

use ameba_core::{FoodId, Vec2};
use serde::{Deserialize, Serialize};

/// One unit of food. Never mutated; removed when eaten.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Food {
    pub id: FoodId,
    pub x: f64,
    pub y: f64,
    pub energy: f64,
}

impl Food {
    pub fn new(position: Vec2, energy: f64) -> Self {
        Self {
            id: FoodId::new(),
            x: position.x,
            y: position.y,
            energy,
        }
    }

    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}
