#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world and round state for the PCG Towers generator.

mod spawner;

use pcg_towers_core::{
    Biome, Command, ConfigError, Difficulty, Event, GenerationConfig, GenerationFailure,
    GenerationRng, RoundInfo, SpawnerId, TilePosition, Tilemap,
};
use pcg_towers_system_pathfinding::carve_path;
use pcg_towers_system_terrain::{
    find_best_base_position, find_enemy_spawner_locations, set_base_tile, BiomeLookup,
    TerrainGenerator,
};
use pcg_towers_system_wave_composition::WaveComposer;
use sha2::{Digest, Sha256};

pub use spawner::Spawner;

const WORLD_SEED_LABEL: &str = "world";

/// Represents the authoritative state of a generated world.
#[derive(Debug)]
pub struct World {
    config: GenerationConfig,
    lookup: BiomeLookup,
    composer: WaveComposer,
    difficulty: Difficulty,
    seed: u32,
    plan: Vec<RoundInfo>,
    next_round: usize,
    tilemap: Tilemap,
    round: Option<Round>,
}

#[derive(Debug)]
struct Round {
    info: RoundInfo,
    biome: Biome,
    base: TilePosition,
    spawners: Vec<Spawner>,
    wave: u32,
}

impl World {
    /// Creates an empty world that generates with `config` and `lookup`.
    pub fn new(config: GenerationConfig, lookup: BiomeLookup) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_parts(config, lookup))
    }

    fn from_parts(config: GenerationConfig, lookup: BiomeLookup) -> Self {
        let composer = WaveComposer::new(&config.grammar, config.map.tile_size);
        let tilemap = Tilemap::new(config.map.width, config.map.height);
        Self {
            config,
            lookup,
            composer,
            difficulty: Difficulty::Normal,
            seed: 0,
            plan: Vec::new(),
            next_round: 0,
            tilemap,
            round: None,
        }
    }

    fn generate_world(&mut self, seed: u32, difficulty: Difficulty, out_events: &mut Vec<Event>) {
        self.difficulty = difficulty;
        self.seed = seed;
        self.round = None;

        let mut rng = GenerationRng::seeded(derive_world_seed(seed));
        let settings = self.config.difficulties.get(difficulty);
        let depth = rng.range_inclusive_u32(settings.world_depth.min(), settings.world_depth.max());
        let climate = &self.config.climate;
        self.plan = (0..depth)
            .map(|_| RoundInfo {
                seed: rng.next_u32(),
                temperature: rng.range_f32(climate.min_temperature, climate.max_temperature),
                precipitation: rng.range_f32(climate.min_precipitation, climate.max_precipitation),
            })
            .collect();
        self.next_round = 0;

        log::info!(
            "planned {} world {seed} with {depth} rounds",
            difficulty.name()
        );
        out_events.push(Event::WorldGenerated {
            seed,
            difficulty,
            depth,
        });
        self.advance_round(out_events);
    }

    fn advance_round(&mut self, out_events: &mut Vec<Event>) {
        let Some(info) = self.plan.get(self.next_round).copied() else {
            out_events.push(Event::WorldCompleted {
                rounds: self.plan.len() as u32,
            });
            return;
        };
        self.next_round += 1;
        self.generate_round(info, out_events);
    }

    fn generate_round(&mut self, info: RoundInfo, out_events: &mut Vec<Event>) {
        self.round = None;
        match self.build_round(info) {
            Ok(round) => {
                out_events.push(Event::RoundGenerated {
                    info,
                    biome: round.biome,
                    base: round.base,
                    spawners: round.spawners.iter().map(Spawner::position).collect(),
                });
                self.round = Some(round);
                self.next_wave(out_events);
            }
            Err(reason) => {
                log::warn!("round {} rejected: {reason}", info.seed);
                out_events.push(Event::RoundRejected { info, reason });
            }
        }
    }

    fn build_round(&mut self, info: RoundInfo) -> Result<Round, GenerationFailure> {
        let config = &self.config;
        let settings = config.difficulties.get(self.difficulty);
        let mut rng = GenerationRng::seeded(u64::from(info.seed));
        let spawner_count =
            rng.range_inclusive_u32(settings.spawner_count.min(), settings.spawner_count.max());

        let mut tilemap = Tilemap::new(config.map.width, config.map.height);
        let generator = TerrainGenerator::new(config, &self.lookup);
        let summary = generator.generate(&mut tilemap, &info, &mut rng);
        let biome = summary.biome;

        let base_candidates = find_best_base_position(&tilemap, &config.placement, &mut rng)?;
        let base = rng
            .index(base_candidates.len())
            .and_then(|index| base_candidates.get(index).copied())
            .ok_or(GenerationFailure::NoBaseCandidate)?;

        let spawner_candidates =
            find_enemy_spawner_locations(&tilemap, base, &config.placement, &mut rng);
        if spawner_candidates.is_empty() {
            return Err(GenerationFailure::NoSpawnerCandidate);
        }

        let spawners = place_spawners(
            &mut tilemap,
            spawner_candidates,
            spawner_count,
            base,
            biome,
            config,
            &mut rng,
        );
        if spawners.is_empty() {
            return Err(GenerationFailure::NoReachableSpawner);
        }

        set_base_tile(&mut tilemap, biome, base);
        self.tilemap = tilemap;

        log::info!(
            "round {} generated: {biome:?}, base ({}, {}), {} spawners",
            info.seed,
            base.x(),
            base.y(),
            spawners.len()
        );
        Ok(Round {
            info,
            biome,
            base,
            spawners,
            wave: 0,
        })
    }

    fn next_wave(&mut self, out_events: &mut Vec<Event>) {
        let Some(round) = self.round.as_mut() else {
            return;
        };
        if round.wave >= self.config.rounds.waves_per_round {
            return;
        }
        round.wave += 1;

        let duration = self.config.difficulties.get(self.difficulty).wave_duration;
        let mut enemies = 0;
        for spawner in &mut round.spawners {
            let composition =
                self.composer
                    .compose(round.info.seed, round.wave, spawner.id().get());
            enemies += composition.enemy_count() as u32;
            spawner.arm_wave(composition, duration);
        }

        out_events.push(Event::WaveComposed {
            wave: round.wave,
            enemies,
        });
    }

    fn tick(&mut self, dt: f32, out_events: &mut Vec<Event>) {
        out_events.push(Event::TimeAdvanced { dt });
        let Some(round) = self.round.as_mut() else {
            return;
        };
        let mut spawned = Vec::new();
        for spawner in &mut round.spawners {
            spawner.tick(dt, &mut spawned);
            for enemy in spawned.drain(..) {
                out_events.push(Event::EnemySpawned {
                    spawner: spawner.id(),
                    enemy,
                });
            }
        }
    }
}

impl Default for World {
    fn default() -> Self {
        Self::from_parts(GenerationConfig::default(), BiomeLookup::whittaker())
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::GenerateWorld { seed, difficulty } => {
            world.generate_world(seed, difficulty, out_events);
        }
        Command::GenerateRound { info } => world.generate_round(info, out_events),
        Command::AdvanceRound => world.advance_round(out_events),
        Command::NextWave => world.next_wave(out_events),
        Command::Tick { dt } => world.tick(dt, out_events),
    }
}

/// Draws up to `count` spawners from `candidates` and carves their routes.
///
/// Each candidate is used at most once. Candidates without a route to `base`
/// are discarded and another one is drawn in their place.
fn place_spawners(
    tilemap: &mut Tilemap,
    mut candidates: Vec<TilePosition>,
    count: u32,
    base: TilePosition,
    biome: Biome,
    config: &GenerationConfig,
    rng: &mut GenerationRng,
) -> Vec<Spawner> {
    let mut spawners = Vec::new();
    while (spawners.len() as u32) < count {
        let Some(index) = rng.index(candidates.len()) else {
            log::warn!(
                "ran out of spawner candidates after {} spawners",
                spawners.len()
            );
            break;
        };
        let position = candidates.remove(index);
        let path = carve_path(
            tilemap,
            position,
            base,
            biome,
            config.path_cost,
            config.map.tile_size,
        );
        if path.is_empty() {
            log::warn!(
                "discarding spawner candidate ({}, {}) without a route to the base",
                position.x(),
                position.y()
            );
            continue;
        }
        let id = SpawnerId::new(spawners.len() as u32);
        spawners.push(Spawner::new(id, position, path));
    }
    spawners
}

fn derive_world_seed(seed: u32) -> u64 {
    let mut hasher = Sha256::new();
    hasher.update(WORLD_SEED_LABEL.as_bytes());
    hasher.update(seed.to_le_bytes());
    let digest = hasher.finalize();
    let mut bytes = [0_u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    u64::from_le_bytes(bytes)
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use pcg_towers_core::{
        Biome, Difficulty, GenerationConfig, Path, RoundInfo, TilePosition, Tilemap,
    };

    use super::{Spawner, World};

    /// Provides read-only access to the tilemap of the active round.
    #[must_use]
    pub fn tilemap(world: &World) -> &Tilemap {
        &world.tilemap
    }

    /// Configuration the world generates with.
    #[must_use]
    pub fn config(world: &World) -> &GenerationConfig {
        &world.config
    }

    /// Difficulty of the current world.
    #[must_use]
    pub fn difficulty(world: &World) -> Difficulty {
        world.difficulty
    }

    /// Seed the current world was planned from.
    #[must_use]
    pub fn seed(world: &World) -> u32 {
        world.seed
    }

    /// Rounds planned for the current world, in play order.
    #[must_use]
    pub fn planned_rounds(world: &World) -> &[RoundInfo] {
        &world.plan
    }

    /// Parameters of the active round.
    #[must_use]
    pub fn round_info(world: &World) -> Option<RoundInfo> {
        world.round.as_ref().map(|round| round.info)
    }

    /// Biome of the active round.
    #[must_use]
    pub fn biome(world: &World) -> Option<Biome> {
        world.round.as_ref().map(|round| round.biome)
    }

    /// Base tile of the active round.
    #[must_use]
    pub fn base(world: &World) -> Option<TilePosition> {
        world.round.as_ref().map(|round| round.base)
    }

    /// Spawners of the active round, in identifier order.
    #[must_use]
    pub fn spawners(world: &World) -> &[Spawner] {
        world
            .round
            .as_ref()
            .map_or(&[], |round| round.spawners.as_slice())
    }

    /// Carved spawner paths of the active round, in spawner order.
    #[must_use]
    pub fn paths(world: &World) -> Vec<&Path> {
        spawners(world).iter().map(Spawner::path).collect()
    }

    /// One-based number of the current wave, or zero before the first wave.
    #[must_use]
    pub fn wave(world: &World) -> u32 {
        world.round.as_ref().map_or(0, |round| round.wave)
    }

    /// Gold the player starts a round with at the current difficulty.
    #[must_use]
    pub fn starting_gold(world: &World) -> f32 {
        world.config.difficulties.get(world.difficulty).starting_gold
    }
}
