use thiserror::Error;

/// Reasons a simulation refuses to be constructed.
///
/// Every variant is raised before the first tick runs; a simulation that was
/// built successfully never produces one of these.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("arena width must be positive (got {0})")]
    NonPositiveWidth(f32),
    #[error("arena height must be positive (got {0})")]
    NonPositiveHeight(f32),
    #[error("visibility radius must be positive (got {0})")]
    NonPositiveVisibility(f32),
    #[error("entity {index} radius must be positive (got {radius})")]
    NonPositiveRadius { index: usize, radius: f32 },
    #[error("entity {index} speed must not be negative (got {speed})")]
    NegativeSpeed { index: usize, speed: f32 },
    #[error("creep {index} with radius {radius} cannot fit between opposite arena walls")]
    RadiusExceedsArena { index: usize, radius: f32 },
    #[error("entity {index} has a non-finite {field}")]
    NonFinite { index: usize, field: &'static str },
    #[error("population is empty: configure at least one creep or base")]
    EmptyPopulation,
}
