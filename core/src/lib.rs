#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the PCG Towers round generator.
//!
//! This crate defines the data and message surface that connects the
//! command-line adapter, the authoritative world, and the pure generation
//! systems. Adapters submit [`Command`] values describing the generation step
//! they want, the world executes those commands via its `apply` entry point,
//! and then broadcasts [`Event`] values describing the outcome. Systems never
//! own round state; they read the [`Tilemap`] and configuration they are
//! handed and return freshly generated data.

mod biome;
mod config;
mod enemy;
mod random;
mod tilemap;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use biome::{biome_tile, path_tile, Biome, MapTile};
pub use config::{
    ClimateConfig, ConfigError, DifficultySettings, DifficultyTables, GenerationConfig,
    GrammarConfig, MapConfig, NoiseConfig, NoiseLayer, PathCost, PlacementConfig, RiverConfig,
    RoundConfig, TuningRange,
};
pub use enemy::{Enemy, EnemyArchetype, EnemyColor, EnemyShape, EnemyStats};
pub use random::GenerationRng;
pub use tilemap::{TileData, Tilemap};

/// Describes how punishing a generated world should be.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    /// Longer waves, fewer spawners and a shallow world.
    Easy,
    /// Balanced defaults.
    Normal,
    /// Short waves, many spawners and a deep world.
    Hard,
}

impl Difficulty {
    /// Every difficulty in ascending order.
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard];

    /// Lowercase name used by adapters and logs.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Normal => "normal",
            Self::Hard => "hard",
        }
    }
}

/// Commands that express every permissible world mutation.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Plans a new world from the provided seed and generates its first round.
    GenerateWorld {
        /// Seed chosen by the player or adapter.
        seed: u32,
        /// Difficulty that selects the tuning tables for the world.
        difficulty: Difficulty,
    },
    /// Generates a single round from explicit round parameters.
    GenerateRound {
        /// Seed and climate for the round.
        info: RoundInfo,
    },
    /// Generates the next planned round of the current world.
    AdvanceRound,
    /// Composes the next wave for every spawner of the active round.
    NextWave,
    /// Advances spawner clocks by the provided delta time.
    Tick {
        /// Simulated seconds that elapsed since the previous tick.
        dt: f32,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Announces that a world plan was created.
    WorldGenerated {
        /// Seed the world was derived from.
        seed: u32,
        /// Difficulty active for the world.
        difficulty: Difficulty,
        /// Number of rounds planned for the world.
        depth: u32,
    },
    /// Confirms that a round was generated and is ready to be played.
    RoundGenerated {
        /// Parameters the round was generated from.
        info: RoundInfo,
        /// Biome classified from the round climate.
        biome: Biome,
        /// Tile that holds the player's base.
        base: TilePosition,
        /// Tiles that hold enemy spawners, in spawner id order.
        spawners: Vec<TilePosition>,
    },
    /// Reports that a round could not be generated and was discarded.
    RoundRejected {
        /// Parameters of the discarded round.
        info: RoundInfo,
        /// Reason the round is unusable.
        reason: GenerationFailure,
    },
    /// Reports that every planned round of the world has been generated.
    WorldCompleted {
        /// Number of rounds the world was planned with.
        rounds: u32,
    },
    /// Announces that a wave has been composed for every spawner.
    WaveComposed {
        /// One-based wave number within the round.
        wave: u32,
        /// Total enemies queued across all spawners.
        enemies: u32,
    },
    /// Confirms that the simulation clock advanced.
    TimeAdvanced {
        /// Simulated seconds that elapsed in the tick.
        dt: f32,
    },
    /// Reports that a spawner released an enemy onto its path.
    EnemySpawned {
        /// Spawner that released the enemy.
        spawner: SpawnerId,
        /// Enemy that entered the map.
        enemy: Enemy,
    },
}

/// Whole-round failures that prevent a round from starting.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error, Serialize, Deserialize)]
pub enum GenerationFailure {
    /// The base search produced no candidate tile.
    #[error("no base position candidate was accepted")]
    NoBaseCandidate,
    /// The spawner search produced no candidate tile.
    #[error("no enemy spawner candidate was accepted")]
    NoSpawnerCandidate,
    /// No accepted spawner candidate has a route to the base.
    #[error("no enemy spawner can reach the base")]
    NoReachableSpawner,
}

/// Seed and climate that fully determine a generated round.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoundInfo {
    /// Seed for terrain, placement and wave generation.
    pub seed: u32,
    /// Round temperature within the configured climate range.
    pub temperature: f32,
    /// Round precipitation within the configured climate range.
    pub precipitation: f32,
}

/// Location of a single tile expressed as column and row coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TilePosition {
    x: u32,
    y: u32,
}

impl TilePosition {
    /// Creates a new tile coordinate.
    #[must_use]
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Zero-based column of the tile.
    #[must_use]
    pub const fn x(&self) -> u32 {
        self.x
    }

    /// Zero-based row of the tile.
    #[must_use]
    pub const fn y(&self) -> u32 {
        self.y
    }

    /// Computes the Manhattan distance between two tile coordinates.
    #[must_use]
    pub fn manhattan_distance(self, other: TilePosition) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// Computes the squared Euclidean distance between two tile coordinates.
    #[must_use]
    pub fn distance_squared(self, other: TilePosition) -> u64 {
        let dx = u64::from(self.x.abs_diff(other.x));
        let dy = u64::from(self.y.abs_diff(other.y));
        dx * dx + dy * dy
    }

    /// Computes the Euclidean distance between two tile coordinates.
    #[must_use]
    pub fn distance(self, other: TilePosition) -> f32 {
        (self.distance_squared(other) as f32).sqrt()
    }
}

/// Identifier of a tile in the themed tile set.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TileId(u32);

impl TileId {
    /// Creates a new tile identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to an enemy spawner within a round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SpawnerId(u32);

impl SpawnerId {
    /// Creates a new spawner identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Route carved from a spawner to the base.
///
/// `tiles` and `centroids` are parallel: every tile on the route has its
/// world-space centre at the same index. An empty path means no route exists.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Path {
    tiles: Vec<TilePosition>,
    centroids: Vec<Vec2>,
}

impl Path {
    /// Creates an empty path.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            tiles: Vec::new(),
            centroids: Vec::new(),
        }
    }

    /// Appends a tile and its world-space centroid to the end of the path.
    pub fn push(&mut self, tile: TilePosition, centroid: Vec2) {
        self.tiles.push(tile);
        self.centroids.push(centroid);
    }

    /// Tiles visited by the path in travel order.
    #[must_use]
    pub fn tiles(&self) -> &[TilePosition] {
        &self.tiles
    }

    /// World-space tile centres in travel order.
    #[must_use]
    pub fn centroids(&self) -> &[Vec2] {
        &self.centroids
    }

    /// Number of tiles on the path.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Reports whether the path is empty, meaning no route was found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Final tile of the path, if any.
    #[must_use]
    pub fn last_tile(&self) -> Option<TilePosition> {
        self.tiles.last().copied()
    }
}
