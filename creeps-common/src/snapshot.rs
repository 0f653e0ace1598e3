use crate::kind::EntityKind;
use serde::{Deserialize, Serialize};

/// What a renderer needs to draw one entity: position, size and orientation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityRecord {
    pub id: u32,
    pub kind: EntityKind,
    pub radius: f32,
    pub x: f32,
    pub y: f32,
    /// Degrees in `[0, 360)`, 0° along +x, 90° along +y.
    pub heading: f32,
}

/// A snapshot of the simulation state and metrics after a given tick.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    /// Number of ticks completed when the snapshot was taken.
    pub tick: u64,
    /// Entities alive (bases and creeps).
    pub entity_count: u32,
    /// Mobile entities alive.
    pub creep_count: u32,
    /// Entities removed by collisions since the simulation started.
    pub removed_total: u32,
    /// `neighbor_counts_distribution[n]` is the number of entities that see exactly
    /// `n` others within the visibility radius. The last bin also absorbs overflow.
    pub neighbor_counts_distribution: Vec<u32>,
    #[serde(skip_serializing_if = "Option::is_none")] // Don't write "entities": null
    #[serde(default)]
    pub entities: Option<Vec<EntityRecord>>,
}
