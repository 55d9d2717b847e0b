//! Enemy spawners placed on a generated round.

use pcg_towers_core::{Enemy, Path, SpawnerId, TilePosition};
use pcg_towers_system_wave_composition::{SpawnerSchedule, WaveComposition};

/// Map location that releases enemy groups along its carved path.
#[derive(Clone, Debug, PartialEq)]
pub struct Spawner {
    id: SpawnerId,
    position: TilePosition,
    path: Path,
    schedule: SpawnerSchedule,
}

impl Spawner {
    pub(crate) fn new(id: SpawnerId, position: TilePosition, path: Path) -> Self {
        Self {
            id,
            position,
            path,
            schedule: SpawnerSchedule::default(),
        }
    }

    /// Identifier of the spawner within its round.
    #[must_use]
    pub const fn id(&self) -> SpawnerId {
        self.id
    }

    /// Tile the spawner occupies.
    #[must_use]
    pub const fn position(&self) -> TilePosition {
        self.position
    }

    /// Route carved from the spawner to the base.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Release schedule of the current wave.
    #[must_use]
    pub fn schedule(&self) -> &SpawnerSchedule {
        &self.schedule
    }

    pub(crate) fn arm_wave(&mut self, composition: WaveComposition, duration: f32) {
        self.schedule.replace_groups(composition.groups);
        self.schedule.update_wave_timing(duration);
    }

    pub(crate) fn tick(&mut self, dt: f32, spawned: &mut Vec<Enemy>) {
        self.schedule.tick(dt, spawned);
    }
}
