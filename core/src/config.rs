//! Immutable tuning values threaded through every generation call.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::Difficulty;

/// Errors raised while loading or validating a [`GenerationConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The TOML document could not be parsed into a configuration.
    #[error("could not parse generation config: {0}")]
    Parse(#[from] toml::de::Error),
    /// The map has no tiles.
    #[error("map dimensions must be non-zero, got {width}x{height}")]
    EmptyMap {
        /// Configured width in tiles.
        width: u32,
        /// Configured height in tiles.
        height: u32,
    },
    /// The tile size is not a positive finite number.
    #[error("tile size must be positive, got {0}")]
    InvalidTileSize(f32),
    /// A range has its minimum above its maximum.
    #[error("range `{name}` is inverted")]
    InvertedRange {
        /// Name of the offending range.
        name: &'static str,
    },
    /// A noise layer requests no octaves, a non-positive zoom or a non-finite persistence.
    #[error("noise layer `{layer}` needs at least one octave, a positive zoom and a finite persistence")]
    InvalidNoise {
        /// Name of the offending layer.
        layer: &'static str,
    },
    /// A path cost weight is not finite, or a scale is negative.
    #[error("path cost `{field}` must be finite and scales non-negative")]
    InvalidPathCost {
        /// Name of the offending field.
        field: &'static str,
    },
    /// Rounds would contain no waves.
    #[error("waves per round must be at least one")]
    ZeroWaves,
    /// A difficulty spawns no enemies or has a non-positive wave duration.
    #[error("difficulty `{difficulty}` has an unusable spawner count or wave duration")]
    InvalidDifficulty {
        /// Name of the offending difficulty.
        difficulty: &'static str,
    },
}

/// Inclusive range of tuning values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TuningRange<T> {
    min: T,
    max: T,
}

impl<T: Copy + PartialOrd> TuningRange<T> {
    /// Creates an inclusive range.
    #[must_use]
    pub const fn new(min: T, max: T) -> Self {
        Self { min, max }
    }

    /// Smallest value in the range.
    #[must_use]
    pub fn min(&self) -> T {
        self.min
    }

    /// Largest value in the range.
    #[must_use]
    pub fn max(&self) -> T {
        self.max
    }

    /// Reports whether `value` lies inside the range.
    #[must_use]
    pub fn contains(&self, value: T) -> bool {
        self.min <= value && value <= self.max
    }

    fn is_ordered(&self) -> bool {
        self.min <= self.max
    }
}

/// Complete tuning surface for world, round and wave generation.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Tilemap dimensions.
    pub map: MapConfig,
    /// Climate ranges rounds are drawn from.
    pub climate: ClimateConfig,
    /// Fractal noise parameters for the per-tile fields.
    pub noise: NoiseConfig,
    /// Base and spawner search parameters.
    pub placement: PlacementConfig,
    /// Path cost model used when carving.
    pub path_cost: PathCost,
    /// River growth automaton parameters.
    pub rivers: RiverConfig,
    /// Grammar expansion limits.
    pub grammar: GrammarConfig,
    /// Round structure.
    pub rounds: RoundConfig,
    /// Difficulty-indexed tuning tables.
    pub difficulties: DifficultyTables,
}

impl GenerationConfig {
    /// Parses a configuration from TOML, filling omitted fields with defaults.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the invariants every generation step relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.map.width == 0 || self.map.height == 0 {
            return Err(ConfigError::EmptyMap {
                width: self.map.width,
                height: self.map.height,
            });
        }
        if !is_positive(self.map.tile_size) {
            return Err(ConfigError::InvalidTileSize(self.map.tile_size));
        }
        if self.climate.min_temperature >= self.climate.max_temperature {
            return Err(ConfigError::InvertedRange {
                name: "climate.temperature",
            });
        }
        if self.climate.min_precipitation >= self.climate.max_precipitation {
            return Err(ConfigError::InvertedRange {
                name: "climate.precipitation",
            });
        }
        for (layer, settings) in [
            ("height", &self.noise.height),
            ("temperature", &self.noise.temperature),
            ("moisture", &self.noise.moisture),
        ] {
            if settings.octaves == 0
                || !is_positive(settings.zoom)
                || !settings.persistence.is_finite()
            {
                return Err(ConfigError::InvalidNoise { layer });
            }
        }
        for (field, value, signed) in [
            ("offset", self.path_cost.offset, true),
            ("scale", self.path_cost.scale, false),
            ("heuristic_scale", self.path_cost.heuristic_scale, false),
        ] {
            if !value.is_finite() || (!signed && value < 0.0) {
                return Err(ConfigError::InvalidPathCost { field });
            }
        }
        if self.rounds.waves_per_round == 0 {
            return Err(ConfigError::ZeroWaves);
        }
        for difficulty in Difficulty::ALL {
            let settings = self.difficulties.get(difficulty);
            if !settings.world_depth.is_ordered() {
                return Err(ConfigError::InvertedRange {
                    name: "difficulties.world_depth",
                });
            }
            if !settings.spawner_count.is_ordered() {
                return Err(ConfigError::InvertedRange {
                    name: "difficulties.spawner_count",
                });
            }
            if settings.spawner_count.min() == 0 || !is_positive(settings.wave_duration) {
                return Err(ConfigError::InvalidDifficulty {
                    difficulty: difficulty.name(),
                });
            }
        }
        Ok(())
    }
}

fn is_positive(value: f32) -> bool {
    value.is_finite() && value > 0.0
}

/// Tilemap dimensions.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    /// Number of tile columns.
    pub width: u32,
    /// Number of tile rows.
    pub height: u32,
    /// Side length of a tile in world units.
    pub tile_size: f32,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            width: 45,
            height: 45,
            tile_size: 16.0,
        }
    }
}

/// Climate ranges that rounds draw temperature and precipitation from.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClimateConfig {
    /// Coldest round temperature.
    pub min_temperature: f32,
    /// Hottest round temperature.
    pub max_temperature: f32,
    /// Driest round precipitation.
    pub min_precipitation: f32,
    /// Wettest round precipitation.
    pub max_precipitation: f32,
}

impl Default for ClimateConfig {
    fn default() -> Self {
        Self {
            min_temperature: -10.0,
            max_temperature: 30.0,
            min_precipitation: 0.0,
            max_precipitation: 400.0,
        }
    }
}

impl ClimateConfig {
    /// Width of the temperature range.
    #[must_use]
    pub fn temperature_span(&self) -> f32 {
        self.max_temperature - self.min_temperature
    }

    /// Width of the precipitation range.
    #[must_use]
    pub fn precipitation_span(&self) -> f32 {
        self.max_precipitation - self.min_precipitation
    }
}

/// Parameters of one fractal noise layer.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct NoiseLayer {
    /// Scale applied to normalized coordinates before sampling.
    pub zoom: f32,
    /// Number of octaves summed.
    pub octaves: u32,
    /// Amplitude multiplier between successive octaves.
    pub persistence: f32,
}

impl NoiseLayer {
    /// Creates a noise layer description.
    #[must_use]
    pub const fn new(zoom: f32, octaves: u32, persistence: f32) -> Self {
        Self {
            zoom,
            octaves,
            persistence,
        }
    }
}

/// Noise layers used by the terrain generator.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoiseConfig {
    /// Height and density field, also the source of path cost.
    pub height: NoiseLayer,
    /// Per-tile temperature field.
    pub temperature: NoiseLayer,
    /// Per-tile moisture field.
    pub moisture: NoiseLayer,
}

impl Default for NoiseConfig {
    fn default() -> Self {
        Self {
            height: NoiseLayer::new(10.0, 2, 0.5),
            temperature: NoiseLayer::new(20.0, 1, 0.5),
            moisture: NoiseLayer::new(4.0, 4, 0.4),
        }
    }
}

/// Base and spawner search parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementConfig {
    /// Random base candidates drawn before acceptance is forced.
    pub max_base_tries: u32,
    /// Influence of the coordinate weighting on base acceptance.
    pub base_weight_influence: f32,
    /// Distance, in tiles, inside which spawners are never accepted.
    pub min_spawner_distance: u32,
    /// Frequency of the sine curve that scores spawner distance.
    pub spawner_distance_curve: f32,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            max_base_tries: 25,
            base_weight_influence: 0.8,
            min_spawner_distance: 16,
            spawner_distance_curve: 2.3,
        }
    }
}

/// Cost model for the terrain-aware path search.
///
/// The defaults reproduce the carving search used during round generation,
/// whose squared-distance heuristic is weighted by 10.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathCost {
    /// Offset `k` in the edge weight `(k - noise) * scale`.
    pub offset: f32,
    /// Multiplier applied to every edge weight.
    pub scale: f32,
    /// Multiplier applied to the squared-distance heuristic.
    pub heuristic_scale: f32,
}

impl Default for PathCost {
    fn default() -> Self {
        Self {
            offset: 2.0,
            scale: 100.0,
            heuristic_scale: 10.0,
        }
    }
}

/// River growth automaton parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiverConfig {
    /// Number of synchronous automaton iterations.
    pub iterations: u32,
    /// A tile turns into river when more than this many neighbours are river.
    pub neighbour_threshold: u32,
}

impl Default for RiverConfig {
    fn default() -> Self {
        Self {
            iterations: 3,
            neighbour_threshold: 1,
        }
    }
}

/// Grammar expansion limits.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrammarConfig {
    /// Depth below which non-terminal symbols are no longer expanded.
    pub max_depth: u32,
    /// Largest number of nodes a single run may create, root included.
    pub max_nodes: u32,
}

impl Default for GrammarConfig {
    fn default() -> Self {
        Self {
            max_depth: 64,
            max_nodes: 4096,
        }
    }
}

/// Round structure.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoundConfig {
    /// Waves played per round.
    pub waves_per_round: u32,
}

impl Default for RoundConfig {
    fn default() -> Self {
        Self { waves_per_round: 5 }
    }
}

/// Tuning values selected by a [`Difficulty`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DifficultySettings {
    /// Number of rounds planned for a world.
    pub world_depth: TuningRange<u32>,
    /// Number of spawners placed per round.
    pub spawner_count: TuningRange<u32>,
    /// Gold the player starts with.
    pub starting_gold: f32,
    /// Duration of a wave in seconds.
    pub wave_duration: f32,
}

/// Difficulty-indexed tuning tables.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DifficultyTables {
    /// Settings for [`Difficulty::Easy`].
    pub easy: DifficultySettings,
    /// Settings for [`Difficulty::Normal`].
    pub normal: DifficultySettings,
    /// Settings for [`Difficulty::Hard`].
    pub hard: DifficultySettings,
}

impl DifficultyTables {
    /// Looks up the settings for a difficulty.
    #[must_use]
    pub fn get(&self, difficulty: Difficulty) -> &DifficultySettings {
        match difficulty {
            Difficulty::Easy => &self.easy,
            Difficulty::Normal => &self.normal,
            Difficulty::Hard => &self.hard,
        }
    }
}

impl Default for DifficultyTables {
    fn default() -> Self {
        Self {
            easy: DifficultySettings {
                world_depth: TuningRange::new(5, 10),
                spawner_count: TuningRange::new(1, 2),
                starting_gold: 200.0,
                wave_duration: 60.0,
            },
            normal: DifficultySettings {
                world_depth: TuningRange::new(8, 14),
                spawner_count: TuningRange::new(2, 3),
                starting_gold: 150.0,
                wave_duration: 45.0,
            },
            hard: DifficultySettings {
                world_depth: TuningRange::new(15, 21),
                spawner_count: TuningRange::new(2, 5),
                starting_gold: 100.0,
                wave_duration: 30.0,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        GenerationConfig::default()
            .validate()
            .expect("default configuration is valid");
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = GenerationConfig::from_toml_str(
            r#"
            [map]
            width = 32

            [rivers]
            iterations = 5
            "#,
        )
        .expect("config parses");

        assert_eq!(config.map.width, 32);
        assert_eq!(config.map.height, 45);
        assert_eq!(config.rivers.iterations, 5);
        assert_eq!(config.placement.max_base_tries, 25);
    }

    #[test]
    fn zero_sized_map_is_rejected() {
        let result = GenerationConfig::from_toml_str("[map]\nwidth = 0\n");
        assert!(matches!(result, Err(ConfigError::EmptyMap { width: 0, .. })));
    }

    #[test]
    fn inverted_spawner_range_is_rejected() {
        let mut config = GenerationConfig::default();
        config.difficulties.hard.spawner_count = TuningRange::new(4, 2);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvertedRange {
                name: "difficulties.spawner_count"
            })
        ));
    }

    #[test]
    fn non_finite_wave_durations_are_rejected() {
        for duration in [f32::NAN, f32::INFINITY, 0.0, -5.0] {
            let mut config = GenerationConfig::default();
            config.difficulties.normal.wave_duration = duration;
            assert!(
                matches!(
                    config.validate(),
                    Err(ConfigError::InvalidDifficulty {
                        difficulty: "normal"
                    })
                ),
                "wave duration {duration} was accepted"
            );
        }
    }

    #[test]
    fn nan_duration_in_toml_is_rejected() {
        let result = GenerationConfig::from_toml_str(
            r#"
            [difficulties.easy]
            world_depth = { min = 5, max = 10 }
            spawner_count = { min = 1, max = 2 }
            starting_gold = 200.0
            wave_duration = nan
            "#,
        );
        assert!(matches!(
            result,
            Err(ConfigError::InvalidDifficulty { difficulty: "easy" })
        ));
    }

    #[test]
    fn non_finite_noise_layers_are_rejected() {
        let mut config = GenerationConfig::default();
        config.noise.moisture.zoom = f32::INFINITY;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidNoise { layer: "moisture" })
        ));

        let mut config = GenerationConfig::default();
        config.noise.height.persistence = f32::NAN;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidNoise { layer: "height" })
        ));
    }

    #[test]
    fn non_finite_path_costs_are_rejected() {
        let mut config = GenerationConfig::default();
        config.path_cost.offset = f32::NAN;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidPathCost { field: "offset" })
        ));

        let mut config = GenerationConfig::default();
        config.path_cost.heuristic_scale = f32::NEG_INFINITY;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidPathCost {
                field: "heuristic_scale"
            })
        ));

        let mut config = GenerationConfig::default();
        config.path_cost.scale = -1.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn difficulty_lookup_matches_tables() {
        let tables = DifficultyTables::default();
        assert_eq!(tables.get(Difficulty::Normal).spawner_count.min(), 2);
        assert!(tables.get(Difficulty::Hard).world_depth.contains(18));
        assert!((tables.get(Difficulty::Easy).wave_duration - 60.0).abs() < f32::EPSILON);
    }
}
