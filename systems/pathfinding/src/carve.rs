//! Carving found routes into the tilemap.

use pcg_towers_core::{path_tile, Biome, Path, PathCost, TilePosition, Tilemap};

use crate::find_path;

/// Finds a route from `from` to `to` and carves it into the tilemap.
///
/// Every tile on the route loses turret placeability and is replaced by the
/// biome's path tile; very moist tiles become the very moist path variant.
/// The returned [`Path`] lists the carved tiles and their world-space
/// centroids in travel order, excluding `from`. An empty path means no route
/// was found and leaves the tilemap untouched.
pub fn carve_path(
    tilemap: &mut Tilemap,
    from: TilePosition,
    to: TilePosition,
    biome: Biome,
    cost: PathCost,
    tile_size: f32,
) -> Path {
    let (Some(from_index), Some(to_index)) = (
        tilemap.index_from_position(from),
        tilemap.index_from_position(to),
    ) else {
        log::warn!(
            "cannot carve path from ({}, {}) to ({}, {}): outside the map",
            from.x(),
            from.y(),
            to.x(),
            to.y()
        );
        return Path::empty();
    };

    let route = find_path(tilemap, from_index, to_index, cost);
    if route.is_empty() {
        log::warn!(
            "no path from ({}, {}) to ({}, {})",
            from.x(),
            from.y(),
            to.x(),
            to.y()
        );
        return Path::empty();
    }

    let mut path = Path::empty();
    for index in route {
        let Some(position) = tilemap.position_from_index(index) else {
            continue;
        };
        if let Some(data) = tilemap.tile_data_at_index_mut(index) {
            data.turret_placeable = false;
        }
        if let Some(current) = tilemap.tile_at_index(index) {
            tilemap.set_tile_at_index(index, path_tile(biome, current));
        }
        path.push(position, Tilemap::centroid(position, tile_size));
    }

    log::debug!("carved path of {} tiles", path.len());
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use pcg_towers_core::{biome_tile, MapTile};

    #[test]
    fn carving_marks_tiles_and_records_centroids() {
        let biome = Biome::Grassland;
        let mut map = Tilemap::new(4, 1);
        for index in 0..map.len() {
            map.set_tile_at_index(index, biome_tile(biome, MapTile::Plain));
        }
        map.set_tile(
            TilePosition::new(2, 0),
            biome_tile(biome, MapTile::VeryMoist),
        );

        let path = carve_path(
            &mut map,
            TilePosition::new(0, 0),
            TilePosition::new(3, 0),
            biome,
            PathCost::default(),
            16.0,
        );

        assert_eq!(
            path.tiles(),
            &[
                TilePosition::new(1, 0),
                TilePosition::new(2, 0),
                TilePosition::new(3, 0)
            ]
        );
        let first = path.centroids()[0];
        assert_eq!((first.x, first.y), (24.0, 8.0));
        assert_eq!(
            map.tile(TilePosition::new(1, 0)),
            Some(biome_tile(biome, MapTile::Path))
        );
        assert_eq!(
            map.tile(TilePosition::new(2, 0)),
            Some(biome_tile(biome, MapTile::PathVeryMoist))
        );
        assert_eq!(
            map.tile(TilePosition::new(0, 0)),
            Some(biome_tile(biome, MapTile::Plain)),
            "the start tile is not carved"
        );
        for tile in path.tiles() {
            assert!(!map.tile_data(*tile).expect("in bounds").turret_placeable);
        }
    }

    #[test]
    fn carving_outside_the_map_is_empty() {
        let mut map = Tilemap::new(2, 2);
        let path = carve_path(
            &mut map,
            TilePosition::new(0, 0),
            TilePosition::new(5, 5),
            Biome::Desert,
            PathCost::default(),
            16.0,
        );
        assert!(path.is_empty());
    }
}
