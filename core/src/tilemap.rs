//! Row-major tile grid with per-tile generation data.

use glam::Vec2;

use crate::{TileId, TilePosition};

/// Auxiliary data stored alongside every tile.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TileData {
    /// Smoothed height noise in `[0, 1]`, used as path cost.
    pub noise: f32,
    /// Local temperature.
    pub temperature: f32,
    /// Local moisture.
    pub moisture: f32,
    /// Whether a turret may be built on the tile.
    pub turret_placeable: bool,
}

impl Default for TileData {
    fn default() -> Self {
        Self {
            noise: 0.0,
            temperature: 0.0,
            moisture: 0.0,
            turret_placeable: true,
        }
    }
}

/// Fixed-size grid of tile identifiers and [`TileData`].
///
/// Tiles are stored row-major: index `y * width + x`. Every accessor is O(1)
/// and returns `None` for coordinates outside the grid.
#[derive(Clone, Debug, PartialEq)]
pub struct Tilemap {
    width: u32,
    height: u32,
    tiles: Vec<TileId>,
    data: Vec<TileData>,
}

impl Tilemap {
    /// Creates a grid of default tiles.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        let count = width as usize * height as usize;
        Self {
            width,
            height,
            tiles: vec![TileId::default(); count],
            data: vec![TileData::default(); count],
        }
    }

    /// Dimensions of the grid as `(width, height)`.
    #[must_use]
    pub const fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Number of columns.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Number of rows.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Total number of tiles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Reports whether the grid has no tiles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Reports whether the signed coordinate lies inside the grid.
    #[must_use]
    pub fn within_bounds(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && x < i64::from(self.width) && y < i64::from(self.height)
    }

    /// Converts a coordinate to its row-major index.
    #[must_use]
    pub fn index_from_position(&self, position: TilePosition) -> Option<usize> {
        if position.x() >= self.width || position.y() >= self.height {
            return None;
        }
        Some(position.y() as usize * self.width as usize + position.x() as usize)
    }

    /// Converts a row-major index to its coordinate.
    #[must_use]
    pub fn position_from_index(&self, index: usize) -> Option<TilePosition> {
        if index >= self.tiles.len() {
            return None;
        }
        let width = self.width as usize;
        Some(TilePosition::new((index % width) as u32, (index / width) as u32))
    }

    /// Coordinate displaced by `(dx, dy)`, if it stays inside the grid.
    #[must_use]
    pub fn offset(&self, position: TilePosition, dx: i32, dy: i32) -> Option<TilePosition> {
        let x = i64::from(position.x()) + i64::from(dx);
        let y = i64::from(position.y()) + i64::from(dy);
        if !self.within_bounds(x, y) {
            return None;
        }
        Some(TilePosition::new(x as u32, y as u32))
    }

    /// Tile identifier at a coordinate.
    #[must_use]
    pub fn tile(&self, position: TilePosition) -> Option<TileId> {
        self.index_from_position(position)
            .and_then(|index| self.tile_at_index(index))
    }

    /// Tile identifier at a row-major index.
    #[must_use]
    pub fn tile_at_index(&self, index: usize) -> Option<TileId> {
        self.tiles.get(index).copied()
    }

    /// Replaces the tile at a coordinate; coordinates outside the grid are ignored.
    pub fn set_tile(&mut self, position: TilePosition, tile: TileId) {
        if let Some(index) = self.index_from_position(position) {
            self.set_tile_at_index(index, tile);
        }
    }

    /// Replaces the tile at a row-major index; indices outside the grid are ignored.
    pub fn set_tile_at_index(&mut self, index: usize, tile: TileId) {
        debug_assert!(index < self.tiles.len(), "tile index {index} out of bounds");
        if let Some(slot) = self.tiles.get_mut(index) {
            *slot = tile;
        }
    }

    /// Every tile identifier in row-major order.
    #[must_use]
    pub fn tile_ids(&self) -> &[TileId] {
        &self.tiles
    }

    /// Tile data at a coordinate.
    #[must_use]
    pub fn tile_data(&self, position: TilePosition) -> Option<&TileData> {
        self.index_from_position(position)
            .and_then(|index| self.data.get(index))
    }

    /// Mutable tile data at a coordinate.
    pub fn tile_data_mut(&mut self, position: TilePosition) -> Option<&mut TileData> {
        let index = self.index_from_position(position)?;
        self.data.get_mut(index)
    }

    /// Tile data at a row-major index.
    #[must_use]
    pub fn tile_data_at_index(&self, index: usize) -> Option<&TileData> {
        self.data.get(index)
    }

    /// Mutable tile data at a row-major index.
    pub fn tile_data_at_index_mut(&mut self, index: usize) -> Option<&mut TileData> {
        self.data.get_mut(index)
    }

    /// Every tile's data in row-major order.
    #[must_use]
    pub fn tile_data_slice(&self) -> &[TileData] {
        &self.data
    }

    /// World-space centre of a tile.
    #[must_use]
    pub fn centroid(position: TilePosition, tile_size: f32) -> Vec2 {
        Vec2::new(
            position.x() as f32 * tile_size + tile_size / 2.0,
            position.y() as f32 * tile_size + tile_size / 2.0,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_and_position_are_interconvertible() {
        let map = Tilemap::new(5, 3);
        for index in 0..map.len() {
            let position = map.position_from_index(index).expect("in bounds");
            assert_eq!(map.index_from_position(position), Some(index));
        }
        assert_eq!(map.index_from_position(TilePosition::new(4, 2)), Some(14));
        assert_eq!(map.index_from_position(TilePosition::new(5, 0)), None);
        assert_eq!(map.position_from_index(15), None);
    }

    #[test]
    fn bounds_reject_negative_and_overflowing_coordinates() {
        let map = Tilemap::new(4, 4);
        assert!(map.within_bounds(0, 0));
        assert!(map.within_bounds(3, 3));
        assert!(!map.within_bounds(-1, 0));
        assert!(!map.within_bounds(0, 4));
        assert_eq!(map.offset(TilePosition::new(0, 0), -1, 0), None);
        assert_eq!(
            map.offset(TilePosition::new(1, 1), 1, -1),
            Some(TilePosition::new(2, 0))
        );
    }

    #[test]
    fn new_tiles_are_placeable() {
        let map = Tilemap::new(2, 2);
        assert!(map.tile_data_slice().iter().all(|data| data.turret_placeable));
    }

    #[test]
    fn set_tile_ignores_out_of_bounds_coordinates() {
        let mut map = Tilemap::new(2, 2);
        map.set_tile(TilePosition::new(1, 1), TileId::new(9));
        assert_eq!(map.tile(TilePosition::new(1, 1)), Some(TileId::new(9)));
        assert_eq!(map.tile(TilePosition::new(2, 1)), None);
    }

    #[test]
    fn centroid_sits_in_tile_centre() {
        let centre = Tilemap::centroid(TilePosition::new(2, 3), 16.0);
        assert_eq!(centre, Vec2::new(40.0, 56.0));
    }
}
