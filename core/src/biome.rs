//! Biome tags and the themed tile set they select.

use serde::{Deserialize, Serialize};

use crate::TileId;

/// Climate-driven terrain category.
///
/// Each variant carries the RGBA colour that encodes it in the biome lookup
/// image, so a pixel reinterpreted as an integer maps straight to a biome.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Biome {
    /// Colour did not match any authored biome.
    Unknown,
    /// Frozen treeless plain.
    Tundra,
    /// Cold coniferous forest.
    Taiga,
    /// Temperate woodland and shrubland.
    Woodland,
    /// Temperate grassland and cold desert.
    Grassland,
    /// Temperate seasonal forest.
    SeasonalForest,
    /// Temperate rainforest.
    RainForestTemperate,
    /// Tropical rainforest.
    RainForestTropical,
    /// Tropical seasonal forest and savannah.
    Savannah,
    /// Subtropical desert.
    Desert,
}

impl Biome {
    /// Every authored biome, excluding [`Biome::Unknown`].
    pub const AUTHORED: [Biome; 9] = [
        Biome::Tundra,
        Biome::Taiga,
        Biome::Woodland,
        Biome::Grassland,
        Biome::SeasonalForest,
        Biome::RainForestTemperate,
        Biome::RainForestTropical,
        Biome::Savannah,
        Biome::Desert,
    ];

    /// RGBA colour, packed as `0xRRGGBBAA`, that encodes the biome.
    #[must_use]
    pub const fn code(self) -> u32 {
        match self {
            Self::Unknown => 0,
            Self::Tundra => 0x93A7_ACFF,
            Self::Taiga => 0x5B8F_52FF,
            Self::Woodland => 0xB37C_06FF,
            Self::Grassland => 0x927E_30FF,
            Self::SeasonalForest => 0x2C89_A0FF,
            Self::RainForestTemperate => 0x0A54_6DFF,
            Self::RainForestTropical => 0x0753_30FF,
            Self::Savannah => 0x97A5_27FF,
            Self::Desert => 0xC871_37FF,
        }
    }

    /// Resolves a packed RGBA colour into a biome; unmatched colours are unknown.
    #[must_use]
    pub fn from_code(code: u32) -> Self {
        Self::AUTHORED
            .into_iter()
            .find(|biome| biome.code() == code)
            .unwrap_or(Self::Unknown)
    }

    /// Index of the tile theme drawn for this biome.
    #[must_use]
    pub const fn theme_index(self) -> u32 {
        match self {
            Self::Tundra | Self::Taiga => 1,
            Self::Savannah | Self::Desert => 2,
            _ => 0,
        }
    }
}

/// Logical tile categories inside a biome theme.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MapTile {
    /// Open buildable ground.
    Plain,
    /// Damp but buildable ground.
    Moist,
    /// Carved enemy path.
    Path,
    /// The player's base.
    Base,
    /// Thick vegetation or rock that blocks building.
    Dense,
    /// Marsh or river water that blocks building.
    VeryMoist,
    /// Carved path that crosses very moist ground.
    PathVeryMoist,
}

impl MapTile {
    /// Number of categories per theme.
    pub const COUNT: u32 = 7;

    const ALL: [MapTile; 7] = [
        MapTile::Plain,
        MapTile::Moist,
        MapTile::Path,
        MapTile::Base,
        MapTile::Dense,
        MapTile::VeryMoist,
        MapTile::PathVeryMoist,
    ];

    /// Offset of the category inside a theme.
    #[must_use]
    pub const fn offset(self) -> u32 {
        match self {
            Self::Plain => 0,
            Self::Moist => 1,
            Self::Path => 2,
            Self::Base => 3,
            Self::Dense => 4,
            Self::VeryMoist => 5,
            Self::PathVeryMoist => 6,
        }
    }

    /// Recovers the category of a themed tile identifier.
    #[must_use]
    pub fn from_tile_id(tile: TileId) -> Self {
        let offset = (tile.get() % Self::COUNT) as usize;
        Self::ALL[offset]
    }

    /// Reports whether the category is part of a carved path.
    #[must_use]
    pub const fn is_path(self) -> bool {
        matches!(self, Self::Path | Self::PathVeryMoist)
    }
}

/// Selects the themed tile for a biome: `theme_index * MapTile::COUNT + category`.
#[must_use]
pub const fn biome_tile(biome: Biome, tile: MapTile) -> TileId {
    TileId::new(biome.theme_index() * MapTile::COUNT + tile.offset())
}

/// Selects the path variant that replaces `current` when a path is carved over it.
///
/// Very moist ground becomes a very moist path; everything else becomes a
/// plain path tile of the biome's theme.
#[must_use]
pub fn path_tile(biome: Biome, current: TileId) -> TileId {
    let category = match MapTile::from_tile_id(current) {
        MapTile::VeryMoist | MapTile::PathVeryMoist => MapTile::PathVeryMoist,
        _ => MapTile::Path,
    };
    biome_tile(biome, category)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_resolve_back_to_biomes() {
        for biome in Biome::AUTHORED {
            assert_eq!(Biome::from_code(biome.code()), biome);
        }
        assert_eq!(Biome::from_code(0xDEAD_BEEF), Biome::Unknown);
    }

    #[test]
    fn biome_tile_offsets_by_theme() {
        assert_eq!(biome_tile(Biome::Grassland, MapTile::Plain), TileId::new(0));
        assert_eq!(biome_tile(Biome::Taiga, MapTile::Dense), TileId::new(11));
        assert_eq!(biome_tile(Biome::Desert, MapTile::VeryMoist), TileId::new(19));
    }

    #[test]
    fn categories_survive_theme_offsets() {
        for biome in Biome::AUTHORED {
            for tile in MapTile::ALL {
                assert_eq!(MapTile::from_tile_id(biome_tile(biome, tile)), tile);
            }
        }
    }

    #[test]
    fn path_tile_keeps_very_moist_variant() {
        let marsh = biome_tile(Biome::Tundra, MapTile::VeryMoist);
        let plain = biome_tile(Biome::Tundra, MapTile::Plain);
        assert_eq!(
            path_tile(Biome::Tundra, marsh),
            biome_tile(Biome::Tundra, MapTile::PathVeryMoist)
        );
        assert_eq!(
            path_tile(Biome::Tundra, plain),
            biome_tile(Biome::Tundra, MapTile::Path)
        );
    }
}
