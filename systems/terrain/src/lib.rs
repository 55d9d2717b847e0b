#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Terrain, biome, river and placement generation for a round.
//!
//! The system is pure: it receives a [`pcg_towers_core::Tilemap`] together
//! with the round parameters and configuration, and writes terrain into it.
//! Base and spawner searches only read the tilemap and return candidates;
//! the world decides which candidates become the round's layout.

mod biome;
mod fractal;
mod generator;
mod placement;
mod rivers;

pub use biome::{BiomeLookup, BiomeLookupError};
pub use fractal::{sample, smoother_step, LayeredNoise};
pub use generator::{TerrainGenerator, TerrainSummary};
pub use placement::{
    coordinate_weight, find_best_base_position, find_enemy_spawner_locations, set_base_tile,
};
pub use rivers::{grow_rivers, grow_rivers_iteration};
