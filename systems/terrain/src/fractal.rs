//! Layered value noise sampled at normalized coordinates.

use noise::{NoiseFn, Value};
use pcg_towers_core::NoiseLayer;

/// Fractal value noise bound to a single seed.
///
/// Sampling is a pure function of the coordinates, the layer parameters and
/// the seed, so two sources built from the same seed always agree.
#[derive(Clone, Debug)]
pub struct LayeredNoise {
    seed: u32,
    source: Value,
}

impl LayeredNoise {
    /// Creates a noise source for `seed`.
    #[must_use]
    pub fn new(seed: u32) -> Self {
        Self {
            seed,
            source: Value::new(seed),
        }
    }

    /// Seed the source was built from.
    #[must_use]
    pub const fn seed(&self) -> u32 {
        self.seed
    }

    /// Samples the layer at normalized coordinates; the result lies in `[0, 1]`.
    ///
    /// Octave `i` is sampled at frequency `zoom * 2^i` with amplitude
    /// `persistence^i`, and the sum is divided by the total amplitude.
    #[must_use]
    pub fn sample(&self, x: f32, y: f32, layer: NoiseLayer) -> f32 {
        let octaves = layer.octaves.max(1);
        let zoom = f64::from(layer.zoom);
        let persistence = f64::from(layer.persistence);

        let mut total = 0.0;
        let mut amplitude = 1.0;
        let mut frequency = 1.0;
        let mut max_amplitude = 0.0;
        for _ in 0..octaves {
            let point = [
                f64::from(x) * zoom * frequency,
                f64::from(y) * zoom * frequency,
            ];
            total += self.source.get(point) * amplitude;
            max_amplitude += amplitude;
            amplitude *= persistence;
            frequency *= 2.0;
        }

        if max_amplitude <= 0.0 {
            return 0.5;
        }
        let normalized = (total / max_amplitude + 1.0) * 0.5;
        normalized.clamp(0.0, 1.0) as f32
    }
}

/// One-shot form of [`LayeredNoise::sample`].
#[must_use]
pub fn sample(x: f32, y: f32, zoom: f32, octaves: u32, persistence: f32, seed: u32) -> f32 {
    LayeredNoise::new(seed).sample(x, y, NoiseLayer::new(zoom, octaves, persistence))
}

/// Quintic smoother-step: `6t^5 - 15t^4 + 10t^3` over `t` clamped to `[0, 1]`.
#[must_use]
pub fn smoother_step(value: f32) -> f32 {
    let t = value.clamp(0.0, 1.0);
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}
