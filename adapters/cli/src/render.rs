//! Plain-text rendering of a generated round.

use std::fmt::Write as _;

use pcg_towers_core::{EnemyArchetype, MapTile, TilePosition};
use pcg_towers_world::{query, Spawner, World};

/// Glyph drawn for a tile category.
pub(crate) const fn tile_glyph(tile: MapTile) -> char {
    match tile {
        MapTile::Plain => '.',
        MapTile::Moist => ',',
        MapTile::Path => '#',
        MapTile::Base => 'B',
        MapTile::Dense => '^',
        MapTile::VeryMoist => '~',
        MapTile::PathVeryMoist => '=',
    }
}

/// Draws the active tilemap one row per line, marking spawners with `S`.
pub(crate) fn render_map(world: &World) -> String {
    let tilemap = query::tilemap(world);
    let spawners: Vec<TilePosition> = query::spawners(world)
        .iter()
        .map(Spawner::position)
        .collect();
    let (width, height) = tilemap.size();

    let mut out = String::with_capacity(((width + 1) * height) as usize);
    for y in 0..height {
        for x in 0..width {
            let position = TilePosition::new(x, y);
            let glyph = if spawners.contains(&position) {
                'S'
            } else {
                tilemap
                    .tile(position)
                    .map_or(' ', |tile| tile_glyph(MapTile::from_tile_id(tile)))
            };
            out.push(glyph);
        }
        out.push('\n');
    }
    out
}

/// Lists every spawner with its position and carved path length.
pub(crate) fn describe_spawners(world: &World) -> String {
    let mut out = String::new();
    for spawner in query::spawners(world) {
        let position = spawner.position();
        let _ = writeln!(
            out,
            "  spawner {} at ({}, {}), path length {}",
            spawner.id().get(),
            position.x(),
            position.y(),
            spawner.path().len()
        );
    }
    out
}

/// Summarises the queued wave of every spawner as group sizes and archetypes.
pub(crate) fn describe_wave(world: &World) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "wave {}", query::wave(world));
    for spawner in query::spawners(world) {
        let groups: Vec<String> = spawner
            .schedule()
            .groups()
            .iter()
            .map(|group| {
                let archetypes: String = group
                    .iter()
                    .map(|enemy| archetype_glyph(enemy.archetype))
                    .collect();
                format!("{}[{archetypes}]", group.len())
            })
            .collect();
        let _ = writeln!(
            out,
            "  spawner {}: {}",
            spawner.id().get(),
            groups.join(" ")
        );
    }
    out
}

const fn archetype_glyph(archetype: EnemyArchetype) -> char {
    match archetype {
        EnemyArchetype::Tank => 'T',
        EnemyArchetype::Speedy => 'S',
        EnemyArchetype::Generic => 'G',
        EnemyArchetype::Randomized => 'R',
    }
}
