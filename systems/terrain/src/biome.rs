//! Climate to biome classification through a 2D lookup table.

use std::path::Path;

use image::RgbaImage;
use pcg_towers_core::{Biome, ClimateConfig};
use thiserror::Error;

const WHITTAKER_RESOLUTION: u32 = 32;

/// Errors raised while building a [`BiomeLookup`].
#[derive(Debug, Error)]
pub enum BiomeLookupError {
    /// The lookup image could not be opened or decoded.
    #[error("could not load biome lookup image: {0}")]
    Image(#[from] image::ImageError),
    /// The lookup has no pixels.
    #[error("biome lookup has no pixels")]
    Empty,
    /// The pixel buffer does not match the declared dimensions.
    #[error("biome lookup expected {expected} pixels, got {actual}")]
    SizeMismatch {
        /// Pixels implied by the dimensions.
        expected: usize,
        /// Pixels supplied.
        actual: usize,
    },
}

/// Grid of packed RGBA biome codes addressed by normalized climate.
///
/// Columns run from the coldest (left) to the hottest (right) temperature.
/// Rows are stored top-down with row 0 holding the wettest precipitation,
/// so precipitation indexes the grid vertically flipped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BiomeLookup {
    width: u32,
    height: u32,
    codes: Vec<u32>,
}

impl BiomeLookup {
    /// Builds a lookup from row-major packed `0xRRGGBBAA` codes.
    pub fn from_codes(width: u32, height: u32, codes: Vec<u32>) -> Result<Self, BiomeLookupError> {
        let expected = width as usize * height as usize;
        if expected == 0 {
            return Err(BiomeLookupError::Empty);
        }
        if codes.len() != expected {
            return Err(BiomeLookupError::SizeMismatch {
                expected,
                actual: codes.len(),
            });
        }
        Ok(Self {
            width,
            height,
            codes,
        })
    }

    /// Builds a lookup from a decoded RGBA image.
    pub fn from_image(image: &RgbaImage) -> Result<Self, BiomeLookupError> {
        let codes = image
            .pixels()
            .map(|pixel| u32::from_be_bytes(pixel.0))
            .collect();
        Self::from_codes(image.width(), image.height(), codes)
    }

    /// Loads a lookup image from disk.
    pub fn open(path: &Path) -> Result<Self, BiomeLookupError> {
        let image = image::open(path)?.to_rgba8();
        let lookup = Self::from_image(&image)?;
        log::debug!(
            "loaded {}x{} biome lookup from {}",
            lookup.width,
            lookup.height,
            path.display()
        );
        Ok(lookup)
    }

    /// Built-in Whittaker-style table used when no lookup image is supplied.
    #[must_use]
    pub fn whittaker() -> Self {
        let size = WHITTAKER_RESOLUTION;
        let mut codes = Vec::with_capacity((size * size) as usize);
        for row in 0..size {
            let precipitation = 1.0 - (row as f32 + 0.5) / size as f32;
            for column in 0..size {
                let temperature = (column as f32 + 0.5) / size as f32;
                codes.push(whittaker_biome(temperature, precipitation).code());
            }
        }
        Self {
            width: size,
            height: size,
            codes,
        }
    }

    /// Dimensions of the lookup as `(width, height)`.
    #[must_use]
    pub const fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Classifies a climate into a biome.
    ///
    /// Temperature and precipitation are normalized into the configured
    /// climate ranges and clamped, then used as UV coordinates.
    #[must_use]
    pub fn classify(&self, temperature: f32, precipitation: f32, climate: &ClimateConfig) -> Biome {
        let u = normalize(temperature, climate.min_temperature, climate.temperature_span());
        let v = normalize(
            precipitation,
            climate.min_precipitation,
            climate.precipitation_span(),
        );

        let column = cell(u, self.width);
        let row = self.height - 1 - cell(v, self.height);
        let index = row as usize * self.width as usize + column as usize;
        self.codes
            .get(index)
            .map_or(Biome::Unknown, |code| Biome::from_code(*code))
    }
}

fn normalize(value: f32, min: f32, span: f32) -> f32 {
    if span <= 0.0 {
        return 0.0;
    }
    ((value - min) / span).clamp(0.0, 1.0)
}

fn cell(normalized: f32, cells: u32) -> u32 {
    ((normalized * cells as f32) as u32).min(cells - 1)
}

fn whittaker_biome(temperature: f32, precipitation: f32) -> Biome {
    if temperature < 0.2 {
        Biome::Tundra
    } else if temperature < 0.4 {
        if precipitation < 0.25 {
            Biome::Grassland
        } else {
            Biome::Taiga
        }
    } else if temperature < 0.7 {
        if precipitation < 0.2 {
            Biome::Grassland
        } else if precipitation < 0.45 {
            Biome::Woodland
        } else if precipitation < 0.7 {
            Biome::SeasonalForest
        } else {
            Biome::RainForestTemperate
        }
    } else if precipitation < 0.25 {
        Biome::Desert
    } else if precipitation < 0.6 {
        Biome::Savannah
    } else {
        Biome::RainForestTropical
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn climate() -> ClimateConfig {
        ClimateConfig::default()
    }

    #[test]
    fn whittaker_covers_climate_extremes() {
        let lookup = BiomeLookup::whittaker();
        let climate = climate();
        assert_eq!(lookup.classify(-10.0, 0.0, &climate), Biome::Tundra);
        assert_eq!(lookup.classify(30.0, 0.0, &climate), Biome::Desert);
        assert_eq!(lookup.classify(30.0, 400.0, &climate), Biome::RainForestTropical);
        assert_eq!(lookup.classify(14.0, 380.0, &climate), Biome::RainForestTemperate);
    }

    #[test]
    fn out_of_range_climate_is_clamped() {
        let lookup = BiomeLookup::whittaker();
        let climate = climate();
        assert_eq!(
            lookup.classify(-500.0, -20.0, &climate),
            lookup.classify(-10.0, 0.0, &climate)
        );
        assert_eq!(
            lookup.classify(90.0, 9_000.0, &climate),
            lookup.classify(30.0, 400.0, &climate)
        );
    }

    #[test]
    fn image_rows_are_flipped_for_precipitation() {
        let mut image = RgbaImage::new(1, 2);
        image.put_pixel(0, 0, Rgba(Biome::RainForestTropical.code().to_be_bytes()));
        image.put_pixel(0, 1, Rgba(Biome::Desert.code().to_be_bytes()));
        let lookup = BiomeLookup::from_image(&image).expect("lookup builds");
        let climate = climate();

        assert_eq!(lookup.classify(20.0, 390.0, &climate), Biome::RainForestTropical);
        assert_eq!(lookup.classify(20.0, 10.0, &climate), Biome::Desert);
    }

    #[test]
    fn unknown_colours_classify_as_unknown() {
        let lookup = BiomeLookup::from_codes(1, 1, vec![0x1234_5678]).expect("lookup builds");
        assert_eq!(lookup.classify(0.0, 0.0, &climate()), Biome::Unknown);
    }

    #[test]
    fn empty_and_mismatched_buffers_are_rejected() {
        assert!(matches!(
            BiomeLookup::from_codes(0, 4, Vec::new()),
            Err(BiomeLookupError::Empty)
        ));
        assert!(matches!(
            BiomeLookup::from_codes(2, 2, vec![0; 3]),
            Err(BiomeLookupError::SizeMismatch {
                expected: 4,
                actual: 3
            })
        ));
    }

    #[test]
    fn missing_image_is_a_load_error() {
        let result = BiomeLookup::open(Path::new("definitely/not/here/biome_data.png"));
        assert!(matches!(result, Err(BiomeLookupError::Image(_))));
    }
}
