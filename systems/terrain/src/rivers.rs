//! Cellular automaton that spreads very moist pockets into rivers.

use pcg_towers_core::{RiverConfig, TileId, Tilemap};
use rayon::prelude::*;

const MOORE_NEIGHBOURHOOD: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Runs the configured number of river growth iterations.
///
/// Returns the total number of tiles converted into river.
pub fn grow_rivers(tilemap: &mut Tilemap, river: TileId, config: &RiverConfig) -> usize {
    let mut converted = 0;
    for _ in 0..config.iterations {
        converted += grow_rivers_iteration(tilemap, river, config.neighbour_threshold);
    }
    converted
}

/// Runs a single synchronous automaton step.
///
/// Every tile reads the previous state and a tile becomes `river` when more
/// than `threshold` of its eight neighbours are river. The next state is
/// computed in contiguous chunks, one per rayon worker, then committed.
/// Newly converted tiles lose turret placeability. Returns the number of
/// tiles converted by this step.
pub fn grow_rivers_iteration(tilemap: &mut Tilemap, river: TileId, threshold: u32) -> usize {
    let len = tilemap.len();
    if len == 0 {
        return 0;
    }

    let workers = rayon::current_num_threads().max(1);
    let chunk_len = (len + workers - 1) / workers;
    let mut next = vec![TileId::default(); len];
    {
        let previous: &Tilemap = tilemap;
        next.par_chunks_mut(chunk_len)
            .enumerate()
            .for_each(|(chunk, slots)| {
                let start = chunk * chunk_len;
                for (offset, slot) in slots.iter_mut().enumerate() {
                    *slot = next_state(previous, start + offset, river, threshold);
                }
            });
    }

    let mut converted = 0;
    for (index, tile) in next.into_iter().enumerate() {
        if tile == river {
            if tilemap.tile_at_index(index) != Some(river) {
                converted += 1;
            }
            if let Some(data) = tilemap.tile_data_at_index_mut(index) {
                data.turret_placeable = false;
            }
        }
        tilemap.set_tile_at_index(index, tile);
    }
    converted
}

fn next_state(tilemap: &Tilemap, index: usize, river: TileId, threshold: u32) -> TileId {
    let current = tilemap.tile_at_index(index).unwrap_or_default();
    let Some(position) = tilemap.position_from_index(index) else {
        return current;
    };

    let neighbours = MOORE_NEIGHBOURHOOD
        .iter()
        .filter_map(|&(dx, dy)| tilemap.offset(position, dx, dy))
        .filter(|neighbour| tilemap.tile(*neighbour) == Some(river))
        .count();

    if neighbours > threshold as usize {
        river
    } else {
        current
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pcg_towers_core::TilePosition;

    const RIVER: TileId = TileId::new(5);
    const PLAIN: TileId = TileId::new(0);

    fn filled(width: u32, height: u32, tile: TileId) -> Tilemap {
        let mut map = Tilemap::new(width, height);
        for index in 0..map.len() {
            map.set_tile_at_index(index, tile);
        }
        map
    }

    #[test]
    fn single_neighbour_does_not_grow() {
        let mut map = filled(5, 5, PLAIN);
        map.set_tile(TilePosition::new(2, 2), RIVER);
        assert_eq!(grow_rivers_iteration(&mut map, RIVER, 1), 0);
        assert_eq!(map.tile(TilePosition::new(2, 2)), Some(RIVER));
        assert_eq!(map.tile(TilePosition::new(2, 3)), Some(PLAIN));
    }

    #[test]
    fn two_neighbours_convert_tile() {
        let mut map = filled(5, 5, PLAIN);
        map.set_tile(TilePosition::new(1, 2), RIVER);
        map.set_tile(TilePosition::new(3, 2), RIVER);

        let converted = grow_rivers_iteration(&mut map, RIVER, 1);

        assert!(converted >= 1);
        assert_eq!(map.tile(TilePosition::new(2, 2)), Some(RIVER));
        let data = map.tile_data(TilePosition::new(2, 2)).expect("in bounds");
        assert!(!data.turret_placeable);
    }

    #[test]
    fn update_reads_previous_state_only() {
        let mut map = filled(6, 1, PLAIN);
        map.set_tile(TilePosition::new(0, 0), RIVER);
        map.set_tile(TilePosition::new(2, 0), RIVER);

        let _ = grow_rivers_iteration(&mut map, RIVER, 1);

        assert_eq!(map.tile(TilePosition::new(1, 0)), Some(RIVER));
        assert_eq!(
            map.tile(TilePosition::new(3, 0)),
            Some(PLAIN),
            "tile (3, 0) only had one river neighbour before the step"
        );
    }

    #[test]
    fn existing_river_keeps_placeability_untouched_elsewhere() {
        let mut map = filled(4, 4, PLAIN);
        let _ = grow_rivers(&mut map, RIVER, &RiverConfig::default());
        assert!(map.tile_data_slice().iter().all(|data| data.turret_placeable));
    }
}
