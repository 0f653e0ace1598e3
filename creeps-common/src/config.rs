use crate::arena::Arena;
use crate::error::ConfigError;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

// Arena dimensions and sensing range
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct ArenaConfig {
    #[serde(default = "default_width")]
    pub width: f32,
    #[serde(default = "default_height")]
    pub height: f32,
    #[serde(default = "default_visibility_radius")]
    pub visibility_radius: f32,
}

// The randomly placed creep population
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct PopulationConfig {
    #[serde(default = "default_num_creeps")]
    pub num_creeps: u32,
    #[serde(default = "default_creep_radius")]
    pub creep_radius: f32,
    #[serde(default = "default_creep_speed")]
    pub creep_speed: f32,
    #[serde(default)]
    pub placement_seed: u64,
}

// A static base placed at a fixed position
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct BaseConfig {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct TimingConfig {
    pub total_ticks: u32,
    #[serde(default = "default_record_interval")]
    pub record_interval_ticks: u32,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct OutputConfig {
    pub base_filename: String,
    #[serde(default = "default_true")]
    pub save_stats: bool,
    #[serde(default)]
    pub save_final_positions: bool,
    #[serde(default = "default_true")]
    pub save_entities_in_snapshot: bool,
    pub format: Option<String>, // Output format: "json", "bincode", "messagepack"
}

/// Snapshot file encodings understood by the output writer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Bincode,
    MessagePack,
}

impl OutputFormat {
    /// Parses a format name as written in the config file.
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "json" => Some(OutputFormat::Json),
            "bincode" | "bin" => Some(OutputFormat::Bincode),
            "messagepack" | "msgpack" => Some(OutputFormat::MessagePack),
            _ => None,
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Bincode => "bin",
            OutputFormat::MessagePack => "msgpack",
        }
    }
}

// Main simulation configuration structure, loaded from config.toml.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct SimulationConfig {
    pub arena: ArenaConfig,
    pub population: PopulationConfig,
    #[serde(default)]
    pub bases: Vec<BaseConfig>,
    pub timing: TimingConfig,
    pub output: OutputConfig,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        ArenaConfig {
            width: default_width(),
            height: default_height(),
            visibility_radius: default_visibility_radius(),
        }
    }
}

impl Default for PopulationConfig {
    fn default() -> Self {
        PopulationConfig {
            num_creeps: default_num_creeps(),
            creep_radius: default_creep_radius(),
            creep_speed: default_creep_speed(),
            placement_seed: 0,
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            arena: ArenaConfig::default(),
            population: PopulationConfig::default(),
            bases: Vec::new(),
            timing: TimingConfig {
                total_ticks: 1000,
                record_interval_ticks: default_record_interval(),
            },
            output: OutputConfig {
                base_filename: "creeps".to_string(),
                save_stats: true,
                save_final_positions: false,
                save_entities_in_snapshot: true,
                format: None,
            },
        }
    }
}

impl SimulationConfig {
    /// Loads the simulation configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_ref = path.as_ref();

        let config_str = std::fs::read_to_string(path_ref)
            .map_err(|e| anyhow::anyhow!("Failed to read config file '{}': {}", path_ref.display(), e))?;
        let config = Self::from_toml_str(&config_str)
            .map_err(|e| anyhow::anyhow!("Invalid config '{}': {}", path_ref.display(), e))?;
        Ok(config)
    }

    /// Parses and validates a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: SimulationConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects configurations that could never produce a valid simulation.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let arena = self.arena()?;
        if self.population.num_creeps == 0 && self.bases.is_empty() {
            return Err(ConfigError::EmptyPopulation);
        }
        if !(self.population.creep_radius > 0.0) {
            return Err(ConfigError::NonPositiveRadius {
                index: self.bases.len(),
                radius: self.population.creep_radius,
            });
        }
        if self.population.num_creeps > 0 && !arena.fits(self.population.creep_radius) {
            return Err(ConfigError::RadiusExceedsArena {
                index: self.bases.len(),
                radius: self.population.creep_radius,
            });
        }
        if self.population.creep_speed < 0.0 || !self.population.creep_speed.is_finite() {
            return Err(ConfigError::NegativeSpeed {
                index: self.bases.len(),
                speed: self.population.creep_speed,
            });
        }
        for (index, base) in self.bases.iter().enumerate() {
            if !(base.radius > 0.0) {
                return Err(ConfigError::NonPositiveRadius { index, radius: base.radius });
            }
            if !base.x.is_finite() || !base.y.is_finite() {
                return Err(ConfigError::NonFinite { index, field: "position" });
            }
        }
        Ok(())
    }

    /// Builds the runtime arena parameters.
    pub fn arena(&self) -> Result<Arena, ConfigError> {
        Arena::new(self.arena.width, self.arena.height, self.arena.visibility_radius)
    }

    /// Interval between recorded snapshots; zero is treated as every tick.
    pub fn record_interval(&self) -> u32 {
        self.timing.record_interval_ticks.max(1)
    }
}

// Defaults: a 300x400 arena with ten slow creeps
fn default_width() -> f32 {
    300.0
}

fn default_height() -> f32 {
    400.0
}

fn default_visibility_radius() -> f32 {
    100.0
}

fn default_num_creeps() -> u32 {
    10
}

fn default_creep_radius() -> f32 {
    8.0
}

fn default_creep_speed() -> f32 {
    2.0
}

fn default_record_interval() -> u32 {
    1
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"
        [arena]
        width = 200.0
        height = 300.0
        visibility_radius = 100.0

        [population]
        num_creeps = 4
        placement_seed = 7

        [timing]
        total_ticks = 50

        [output]
        base_filename = "out"
    "#;

    #[test]
    fn test_minimal_config_fills_defaults() {
        let config = SimulationConfig::from_toml_str(MINIMAL).unwrap();
        assert_eq!(config.population.num_creeps, 4);
        assert_eq!(config.population.creep_radius, 8.0);
        assert_eq!(config.population.creep_speed, 2.0);
        assert_eq!(config.population.placement_seed, 7);
        assert_eq!(config.timing.record_interval_ticks, 1);
        assert!(config.bases.is_empty());
        assert!(config.output.save_stats);
        assert!(!config.output.save_final_positions);
        assert_eq!(config.output.format, None);
    }

    #[test]
    fn test_bases_are_parsed_in_order() {
        let text = format!(
            "{}\n[[bases]]\nx = 10.0\ny = 20.0\nradius = 12.0\n\n[[bases]]\nx = 50.0\ny = 60.0\nradius = 6.0\n",
            MINIMAL
        );
        let config = SimulationConfig::from_toml_str(&text).unwrap();
        assert_eq!(config.bases.len(), 2);
        assert_eq!(config.bases[0], BaseConfig { x: 10.0, y: 20.0, radius: 12.0 });
        assert_eq!(config.bases[1].radius, 6.0);
    }

    #[test]
    fn test_negative_speed_is_rejected() {
        let mut config = SimulationConfig::default();
        config.population.creep_speed = -1.0;
        assert!(matches!(config.validate(), Err(ConfigError::NegativeSpeed { .. })));
    }

    #[test]
    fn test_creep_too_large_for_arena_is_rejected() {
        let mut config = SimulationConfig::default();
        config.arena.width = 10.0;
        config.arena.height = 10.0;
        assert_eq!(
            config.validate(),
            Err(ConfigError::RadiusExceedsArena { index: 0, radius: 8.0 })
        );
        config.population.creep_radius = 4.0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_bad_base_radius_is_rejected() {
        let mut config = SimulationConfig::default();
        config.bases.push(BaseConfig { x: 1.0, y: 1.0, radius: 0.0 });
        assert_eq!(
            config.validate(),
            Err(ConfigError::NonPositiveRadius { index: 0, radius: 0.0 })
        );
    }

    #[test]
    fn test_empty_population_is_rejected() {
        let mut config = SimulationConfig::default();
        config.population.num_creeps = 0;
        assert_eq!(config.validate(), Err(ConfigError::EmptyPopulation));
    }

    #[test]
    fn test_zero_width_arena_fails_to_parse() {
        let text = MINIMAL.replace("width = 200.0", "width = 0.0");
        assert!(SimulationConfig::from_toml_str(&text).is_err());
    }

    #[test]
    fn test_output_format_names() {
        assert_eq!(OutputFormat::parse("json"), Some(OutputFormat::Json));
        assert_eq!(OutputFormat::parse("MessagePack"), Some(OutputFormat::MessagePack));
        assert_eq!(OutputFormat::parse("bin"), Some(OutputFormat::Bincode));
        assert_eq!(OutputFormat::parse("yaml"), None);
    }

    #[test]
    fn test_load_reports_missing_file() {
        let err = SimulationConfig::load("/definitely/not/here.toml").unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, MINIMAL).unwrap();
        let config = SimulationConfig::load(&path).unwrap();
        assert_eq!(config.arena.width, 200.0);
        assert_eq!(config.timing.total_ticks, 50);
    }
}
