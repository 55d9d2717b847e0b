//! Enemy archetypes and the data a spawned enemy carries.

use serde::{Deserialize, Serialize};

/// Stat profile family selected by a wave grammar terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyArchetype {
    /// Slow and durable, hits the base hard.
    Tank,
    /// Fast and fragile.
    Speedy,
    /// Baseline enemy.
    Generic,
    /// Every stat rolled independently.
    Randomized,
}

impl EnemyArchetype {
    /// Every archetype in symbol order.
    pub const ALL: [EnemyArchetype; 4] = [
        EnemyArchetype::Tank,
        EnemyArchetype::Speedy,
        EnemyArchetype::Generic,
        EnemyArchetype::Randomized,
    ];

    /// Grammar terminal that selects the archetype.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Tank => 't',
            Self::Speedy => 's',
            Self::Generic => 'g',
            Self::Randomized => 'r',
        }
    }

    /// Resolves a grammar terminal into an archetype.
    #[must_use]
    pub fn from_symbol(symbol: char) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|archetype| archetype.symbol() == symbol)
    }
}

/// Combat-relevant values of an enemy.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EnemyStats {
    /// Health the enemy spawns with.
    pub max_health: f32,
    /// Travel speed in world units per second.
    pub speed: f32,
    /// Damage dealt to the base on arrival.
    pub damage: f32,
}

/// Silhouette used by renderers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyShape {
    /// Square body.
    Square,
    /// Circular body.
    Circle,
    /// Triangular body.
    Triangle,
}

impl EnemyShape {
    /// Every shape in declaration order.
    pub const ALL: [EnemyShape; 3] = [EnemyShape::Square, EnemyShape::Circle, EnemyShape::Triangle];
}

/// Tint applied to an enemy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EnemyColor {
    red: u8,
    green: u8,
    blue: u8,
}

impl EnemyColor {
    /// Creates a colour from byte RGB components.
    #[must_use]
    pub const fn from_rgb(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Converts hue (degrees), saturation and value (both `0..=1`) into a colour.
    #[must_use]
    pub fn from_hsv(hue: f32, saturation: f32, value: f32) -> Self {
        let hue = hue.rem_euclid(360.0);
        let saturation = saturation.clamp(0.0, 1.0);
        let value = value.clamp(0.0, 1.0);

        let chroma = value * saturation;
        let sector = hue / 60.0;
        let secondary = chroma * (1.0 - (sector % 2.0 - 1.0).abs());
        let (r, g, b) = match sector as u32 {
            0 => (chroma, secondary, 0.0),
            1 => (secondary, chroma, 0.0),
            2 => (0.0, chroma, secondary),
            3 => (0.0, secondary, chroma),
            4 => (secondary, 0.0, chroma),
            _ => (chroma, 0.0, secondary),
        };
        let lift = value - chroma;
        let to_byte = |channel: f32| ((channel + lift) * 255.0).round().clamp(0.0, 255.0) as u8;
        Self::from_rgb(to_byte(r), to_byte(g), to_byte(b))
    }

    /// Red component.
    #[must_use]
    pub const fn red(&self) -> u8 {
        self.red
    }

    /// Green component.
    #[must_use]
    pub const fn green(&self) -> u8 {
        self.green
    }

    /// Blue component.
    #[must_use]
    pub const fn blue(&self) -> u8 {
        self.blue
    }
}

/// Enemy queued by a spawner and released onto its path.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    /// Archetype the enemy was rolled from.
    pub archetype: EnemyArchetype,
    /// Rolled stats.
    pub stats: EnemyStats,
    /// Silhouette.
    pub shape: EnemyShape,
    /// Tint.
    pub color: EnemyColor,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbols_round_trip() {
        for archetype in EnemyArchetype::ALL {
            assert_eq!(EnemyArchetype::from_symbol(archetype.symbol()), Some(archetype));
        }
        assert_eq!(EnemyArchetype::from_symbol('e'), None);
    }

    #[test]
    fn hsv_primaries_convert() {
        assert_eq!(EnemyColor::from_hsv(0.0, 1.0, 1.0), EnemyColor::from_rgb(255, 0, 0));
        assert_eq!(EnemyColor::from_hsv(120.0, 1.0, 1.0), EnemyColor::from_rgb(0, 255, 0));
        assert_eq!(EnemyColor::from_hsv(240.0, 1.0, 1.0), EnemyColor::from_rgb(0, 0, 255));
        assert_eq!(EnemyColor::from_hsv(42.0, 0.0, 1.0), EnemyColor::from_rgb(255, 255, 255));
    }
}
