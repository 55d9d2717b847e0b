//! Stat profiles rolled for each enemy archetype.

use pcg_towers_core::{
    Enemy, EnemyArchetype, EnemyColor, EnemyShape, EnemyStats, GenerationRng,
};

const CYAN: EnemyColor = EnemyColor::from_rgb(0, 255, 255);
const LIGHT_YELLOW: EnemyColor = EnemyColor::from_rgb(255, 255, 224);
const RED: EnemyColor = EnemyColor::from_rgb(255, 0, 0);

/// Rolls an enemy of `archetype`; speeds scale with `tile_size`.
pub fn roll_enemy(archetype: EnemyArchetype, tile_size: f32, rng: &mut GenerationRng) -> Enemy {
    match archetype {
        EnemyArchetype::Tank => Enemy {
            archetype,
            stats: EnemyStats {
                max_health: rng.range_f32(100.0, 200.0),
                speed: tile_size / 2.0,
                damage: 2.0,
            },
            shape: EnemyShape::Square,
            color: CYAN,
        },
        EnemyArchetype::Speedy => Enemy {
            archetype,
            stats: EnemyStats {
                max_health: 20.0,
                speed: rng.range_f32(tile_size, tile_size * 2.0),
                damage: 0.5,
            },
            shape: EnemyShape::Triangle,
            color: LIGHT_YELLOW,
        },
        EnemyArchetype::Generic => Enemy {
            archetype,
            stats: EnemyStats {
                max_health: rng.range_f32(60.0, 100.0),
                speed: tile_size,
                damage: 1.0,
            },
            shape: EnemyShape::Circle,
            color: RED,
        },
        EnemyArchetype::Randomized => {
            let stats = EnemyStats {
                max_health: rng.range_f32(10.0, 160.0),
                speed: rng.range_f32(tile_size / 4.0, tile_size * 1.5),
                damage: rng.range_f32(0.5, 3.0),
            };
            let shape = rng
                .index(EnemyShape::ALL.len())
                .map_or(EnemyShape::Circle, |index| EnemyShape::ALL[index]);
            let color = EnemyColor::from_hsv(rng.range_f32(0.0, 360.0), 0.5, 1.0);
            Enemy {
                archetype,
                stats,
                shape,
                color,
            }
        }
    }
}
