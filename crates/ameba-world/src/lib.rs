//! World simulation engine.
//!
//! This crate owns the mutable world (organisms, food, counters, event log), the
//! per-tick update that advances it, the gate that serializes access to it, and
//! the scheduler that drives it at a fixed period.

pub mod events;
pub mod food;
pub mod organism;
pub mod scheduler;
pub mod service;
pub mod simulation;
pub mod snapshot;
pub mod world;

pub use events::{Event, EventKind, EventLog};
pub use food::Food;
pub use organism::Organism;
pub use scheduler::Scheduler;
pub use service::SimulationService;
pub use simulation::StepReport;
pub use snapshot::{MetricsSnapshot, Tunables, WorldSnapshot};
pub use world::World;
