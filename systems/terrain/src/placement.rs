//! Probabilistic base and spawner candidate search.

use std::f32::consts::PI;

use pcg_towers_core::{
    biome_tile, Biome, GenerationFailure, GenerationRng, MapTile, PlacementConfig, TilePosition,
    Tilemap,
};

const BASE_WEIGHT_NORMALISER: f32 = 1.164;

/// M-shaped acceptance weight of a normalized coordinate.
///
/// Peaks at roughly a quarter and three quarters of the axis and dips at the
/// centre and edges.
#[must_use]
pub fn coordinate_weight(value: f32) -> f32 {
    ((2.0 * PI * value).sin().abs() + 0.5 - 0.5 * (PI * value).cos().abs()) / BASE_WEIGHT_NORMALISER
}

/// Samples base candidates, returning them in acceptance order.
///
/// Random tiles are drawn and accepted when `uniform > 1 - weight`. Once
/// `max_base_tries` draws have been spent every further draw is accepted, so
/// the search always yields at least one candidate on a non-empty map.
pub fn find_best_base_position(
    tilemap: &Tilemap,
    config: &PlacementConfig,
    rng: &mut GenerationRng,
) -> Result<Vec<TilePosition>, GenerationFailure> {
    if tilemap.is_empty() {
        return Err(GenerationFailure::NoBaseCandidate);
    }

    let (width, height) = tilemap.size();
    let mut candidates = Vec::new();
    let mut tries = 0;
    while tries < config.max_base_tries || candidates.is_empty() {
        let x = rng.range_u32(0, width);
        let y = rng.range_u32(0, height);

        let weight = if tries >= config.max_base_tries {
            1.0
        } else {
            let x_weight = coordinate_weight(normalized(x, width));
            let y_weight = coordinate_weight(normalized(y, height));
            (x_weight + y_weight) / 2.0 * config.base_weight_influence
        };

        if rng.uniform() > 1.0 - weight {
            candidates.push(TilePosition::new(x, y));
        }
        tries += 1;
    }

    log::debug!(
        "base search accepted {} candidates after {tries} draws",
        candidates.len()
    );
    Ok(candidates)
}

/// Scores every tile by its distance from `base` and samples spawner candidates.
///
/// Tiles closer than `min_spawner_distance` are never accepted; beyond it the
/// acceptance weight follows a sine over the remaining map span. Candidates
/// are returned in row-major order.
pub fn find_enemy_spawner_locations(
    tilemap: &Tilemap,
    base: TilePosition,
    config: &PlacementConfig,
    rng: &mut GenerationRng,
) -> Vec<TilePosition> {
    let (width, height) = tilemap.size();
    let map_size = width.max(height) as f32;
    let min_distance = config.min_spawner_distance as f32;
    let span = (map_size - min_distance).max(1.0);

    let mut candidates = Vec::new();
    for y in 0..height {
        for x in 0..width {
            let tile = TilePosition::new(x, y);
            let distance = tile.distance(base).trunc();
            let weight = ((distance - min_distance).max(0.0) / span
                * config.spawner_distance_curve)
                .sin();
            if rng.uniform() > 1.0 - weight {
                candidates.push(tile);
            }
        }
    }

    log::debug!(
        "spawner search accepted {} candidates around base ({}, {})",
        candidates.len(),
        base.x(),
        base.y()
    );
    candidates
}

/// Writes the biome's base tile at `position` and clears its placeability.
pub fn set_base_tile(tilemap: &mut Tilemap, biome: Biome, position: TilePosition) {
    tilemap.set_tile(position, biome_tile(biome, MapTile::Base));
    if let Some(data) = tilemap.tile_data_mut(position) {
        data.turret_placeable = false;
    }
}

fn normalized(value: u32, extent: u32) -> f32 {
    if extent <= 1 {
        return 0.0;
    }
    value as f32 / (extent - 1) as f32
}
