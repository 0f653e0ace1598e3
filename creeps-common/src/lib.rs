pub mod arena;
pub mod config;
pub mod error;
pub mod kind;
pub mod snapshot;
pub mod vecmath;

// Re-export key types for easier use by dependent crates
pub use arena::Arena;
pub use config::{SimulationConfig, ArenaConfig, PopulationConfig, BaseConfig, TimingConfig, OutputConfig, OutputFormat};
pub use error::ConfigError;
pub use kind::EntityKind;
pub use snapshot::{EntityRecord, Snapshot};
pub use vecmath::{Vec2, clamp, heading_to_vec, normalize_heading};
