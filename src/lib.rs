//! Bouncing-creeps simulation engine.
//!
//! Each tick rebuilds the pairwise distance index, removes every entity caught
//! in a collision, derives a view per survivor and lets creeps steer and move.

pub mod collision;
pub mod distance;
pub mod entity;
pub mod output;
pub mod population;
pub mod simulation;
pub mod steering;
pub mod visibility;

pub use distance::DistanceIndex;
pub use entity::{Entity, EntityId, EntitySpec};
pub use simulation::{CreepSimulation, TickReport};
pub use visibility::{Bounds, Observation, Sighting, View};
