//! Per-round terrain synthesis.

use std::f32::consts::{FRAC_PI_2, PI};

use pcg_towers_core::{
    biome_tile, Biome, GenerationConfig, GenerationRng, MapTile, RoundInfo, TileData,
    TilePosition, Tilemap,
};

use crate::{grow_rivers, smoother_step, BiomeLookup, LayeredNoise};

const DENSITY_SCALE: f32 = 1.5;
const SMOOTHING_PASSES: usize = 3;

/// Outcome of a terrain pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TerrainSummary {
    /// Biome the round climate classified into.
    pub biome: Biome,
    /// Vegetation density used for dense tile rolls.
    pub density: f32,
    /// Tiles converted by river growth.
    pub river_tiles: usize,
}

/// Fills a tilemap with biome-themed terrain for a round.
#[derive(Clone, Copy, Debug)]
pub struct TerrainGenerator<'a> {
    config: &'a GenerationConfig,
    lookup: &'a BiomeLookup,
}

impl<'a> TerrainGenerator<'a> {
    /// Creates a generator bound to a configuration and biome lookup.
    #[must_use]
    pub const fn new(config: &'a GenerationConfig, lookup: &'a BiomeLookup) -> Self {
        Self { config, lookup }
    }

    /// Classifies the round climate into a biome.
    #[must_use]
    pub fn classify(&self, info: &RoundInfo) -> Biome {
        self.lookup
            .classify(info.temperature, info.precipitation, &self.config.climate)
    }

    /// Density of vegetation for the round climate.
    ///
    /// Temperature contributes `sin(t * pi) * t` and precipitation
    /// `sin(p * pi / 2)`, both normalized by the climate maxima.
    #[must_use]
    pub fn biome_density(&self, info: &RoundInfo) -> f32 {
        let climate = &self.config.climate;
        let t = ratio(info.temperature, climate.max_temperature);
        let p = ratio(info.precipitation, climate.max_precipitation);
        (t * PI).sin() * t * (p * FRAC_PI_2).sin() * DENSITY_SCALE
    }

    /// Generates terrain for `info`, overwriting every tile and its data.
    ///
    /// The noise fields are seeded from the round seed while dense rolls
    /// draw from `rng`, so replaying the same seed and rng state reproduces
    /// the tilemap exactly. River growth runs once the base terrain is laid.
    pub fn generate(
        &self,
        tilemap: &mut Tilemap,
        info: &RoundInfo,
        rng: &mut GenerationRng,
    ) -> TerrainSummary {
        let biome = self.classify(info);
        let density = self.biome_density(info);
        let noise = LayeredNoise::new(info.seed);
        let layers = &self.config.noise;
        let (width, height) = tilemap.size();

        log::info!(
            "generating {width}x{height} terrain for seed {} as {biome:?} (density {density:.3})",
            info.seed
        );

        for y in 0..height {
            for x in 0..width {
                let u = x as f32 / width as f32;
                let v = y as f32 / height as f32;

                let height_noise = noise.sample(u, v, layers.height);
                let temperature = noise.sample(u, v, layers.temperature) * info.temperature;
                let moisture_noise = noise.sample(u, v, layers.moisture);
                let moisture = moisture_noise * info.precipitation;

                let mut placeable = true;
                let tile = if rng.uniform() < density * height_noise {
                    placeable = false;
                    MapTile::Dense
                } else {
                    let total = ((moisture * FRAC_PI_2).sin() * moisture_noise).abs();
                    if total > 0.3 && total < 0.5 {
                        MapTile::Moist
                    } else if total > 0.7 {
                        placeable = false;
                        MapTile::VeryMoist
                    } else {
                        MapTile::Plain
                    }
                };

                let mut path_noise = height_noise;
                for _ in 0..SMOOTHING_PASSES {
                    path_noise = smoother_step(path_noise);
                }

                let position = TilePosition::new(x, y);
                tilemap.set_tile(position, biome_tile(biome, tile));
                if let Some(data) = tilemap.tile_data_mut(position) {
                    *data = TileData {
                        noise: path_noise,
                        temperature,
                        moisture,
                        turret_placeable: placeable,
                    };
                }
            }
        }

        let river = biome_tile(biome, MapTile::VeryMoist);
        let river_tiles = grow_rivers(tilemap, river, &self.config.rivers);
        log::debug!("river growth converted {river_tiles} tiles");

        TerrainSummary {
            biome,
            density,
            river_tiles,
        }
    }
}

fn ratio(value: f32, max: f32) -> f32 {
    if max == 0.0 {
        return 0.0;
    }
    value / max
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(temperature: f32, precipitation: f32) -> RoundInfo {
        RoundInfo {
            seed: 42,
            temperature,
            precipitation,
        }
    }

    #[test]
    fn density_vanishes_at_climate_extremes() {
        let config = GenerationConfig::default();
        let lookup = BiomeLookup::whittaker();
        let generator = TerrainGenerator::new(&config, &lookup);

        assert!(generator.biome_density(&info(0.0, 200.0)).abs() < 1e-6);
        assert!(generator.biome_density(&info(15.0, 0.0)).abs() < 1e-6);
        assert!(generator.biome_density(&info(20.0, 300.0)) > 0.5);
    }

    #[test]
    fn every_tile_is_written_with_biome_theme() {
        let config = GenerationConfig::default();
        let lookup = BiomeLookup::whittaker();
        let generator = TerrainGenerator::new(&config, &lookup);
        let mut map = Tilemap::new(16, 12);
        let mut rng = GenerationRng::seeded(42);

        let summary = generator.generate(&mut map, &info(-5.0, 60.0), &mut rng);

        assert_eq!(summary.biome, Biome::Tundra);
        let theme = summary.biome.theme_index();
        for tile in map.tile_ids() {
            assert_eq!(tile.get() / MapTile::COUNT, theme);
        }
        for data in map.tile_data_slice() {
            assert!((0.0..=1.0).contains(&data.noise));
        }
    }

    #[test]
    fn blocking_tiles_are_not_placeable() {
        let config = GenerationConfig::default();
        let lookup = BiomeLookup::whittaker();
        let generator = TerrainGenerator::new(&config, &lookup);
        let mut map = Tilemap::new(45, 45);
        let mut rng = GenerationRng::seeded(7);

        let _ = generator.generate(&mut map, &info(22.0, 320.0), &mut rng);

        for (tile, data) in map.tile_ids().iter().zip(map.tile_data_slice()) {
            match MapTile::from_tile_id(*tile) {
                MapTile::Dense | MapTile::VeryMoist => assert!(!data.turret_placeable),
                _ => assert!(data.turret_placeable),
            }
        }
    }
}
