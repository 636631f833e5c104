//! Core type definitions for the simulation.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for an organism
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrganismId(pub String);

impl OrganismId {
    pub fn new() -> Self {
        Self(format!("org_{}", Uuid::new_v4().simple()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for OrganismId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for OrganismId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a food unit
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FoodId(pub String);

impl FoodId {
    pub fn new() -> Self {
        Self(format!("food_{}", Uuid::new_v4().simple()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for FoodId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for FoodId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 2D vector on the continuous plane, used for positions and velocities
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn add(&self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Clamp each axis independently into the given bounds
    pub fn clamp_to(&self, bounds: Bounds) -> Self {
        Self {
            x: self.x.clamp(0.0, bounds.width),
            y: self.y.clamp(0.0, bounds.height),
        }
    }

    pub fn distance_squared(&self, other: &Vec2) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        dx * dx + dy * dy
    }

    /// Sum of absolute components
    pub fn manhattan_length(&self) -> f64 {
        self.x.abs() + self.y.abs()
    }
}

/// Size of the simulated plane, fixed at startup
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn contains(&self, point: Vec2) -> bool {
        (0.0..=self.width).contains(&point.x) && (0.0..=self.height).contains(&point.y)
    }
}

/// Lifecycle state of an organism. `Dead` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrganismState {
    #[default]
    Normal,
    Dead,
}

impl OrganismState {
    pub fn is_dead(&self) -> bool {
        matches!(self, OrganismState::Dead)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_to_bounds() {
        let bounds = Bounds::new(100.0, 50.0);

        assert_eq!(Vec2::new(-1.0, 20.0).clamp_to(bounds), Vec2::new(0.0, 20.0));
        assert_eq!(Vec2::new(120.0, 60.0).clamp_to(bounds), Vec2::new(100.0, 50.0));
        assert_eq!(Vec2::new(10.0, 10.0).clamp_to(bounds), Vec2::new(10.0, 10.0));
    }

    #[test]
    fn test_distance_squared() {
        let a = Vec2::new(100.0, 100.0);
        let b = Vec2::new(103.0, 104.0);
        assert_eq!(a.distance_squared(&b), 25.0);
    }

    #[test]
    fn test_ids_are_unique_and_prefixed() {
        let a = OrganismId::new();
        let b = OrganismId::new();
        assert_ne!(a, b);
        assert!(a.as_str().starts_with("org_"));
        assert!(FoodId::new().as_str().starts_with("food_"));
    }

    #[test]
    fn test_state_serialization() {
        assert_eq!(serde_json::to_string(&OrganismState::Dead).unwrap(), "\"dead\"");
        assert_eq!(serde_json::to_string(&OrganismState::Normal).unwrap(), "\"normal\"");
    }
}
