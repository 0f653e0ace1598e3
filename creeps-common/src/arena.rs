use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Immutable arena parameters shared by every tick of a simulation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
    /// Entities farther apart than this cannot see each other.
    pub visibility_radius: f32,
}

impl Arena {
    /// Validates and builds the arena.
    pub fn new(width: f32, height: f32, visibility_radius: f32) -> Result<Self, ConfigError> {
        // `!(x > 0.0)` also rejects NaN
        if !(width > 0.0) || !width.is_finite() {
            return Err(ConfigError::NonPositiveWidth(width));
        }
        if !(height > 0.0) || !height.is_finite() {
            return Err(ConfigError::NonPositiveHeight(height));
        }
        if !(visibility_radius > 0.0) {
            return Err(ConfigError::NonPositiveVisibility(visibility_radius));
        }
        Ok(Arena { width, height, visibility_radius })
    }

    /// Whether a mobile body of `radius` has room to bounce on both axes.
    /// Otherwise the left/right rule fires every tick and the top/bottom rule never runs.
    pub fn fits(&self, radius: f32) -> bool {
        2.0 * radius < self.width && 2.0 * radius < self.height
    }
}
