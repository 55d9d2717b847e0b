//! Turns grammar trees into enemy groups.

use pcg_towers_core::{Enemy, EnemyArchetype, GenerationRng, GrammarConfig};
use pcg_towers_system_grammar::{GrammarError, Rule, RuleNode, WeightedGrammar};
use sha2::{Digest, Sha256};

use crate::roll_enemy;

/// Axiom every wave expands from.
pub const START_SYMBOL: char = 'S';
/// Symbol whose direct enemy children form one spawn group.
pub const GROUP_SYMBOL: char = 'G';
/// Symbol whose child selects the active archetype.
pub const SWITCH_SYMBOL: char = 'T';
/// Terminal that emits one enemy of the active archetype.
pub const ENEMY_SYMBOL: char = 'e';

const ENEMY_STREAM: &str = "enemies";

const DEFAULT_RULES: [(char, &str, f32); 13] = [
    ('S', "TGGG", 0.25),
    ('S', "TGG", 0.5),
    ('S', "TG", 0.25),
    ('G', "eeeee", 0.15),
    ('G', "eeee", 0.4),
    ('G', "eee", 0.3),
    ('G', "ee", 0.15),
    ('G', "TG", 0.5),
    ('G', "TGG", 0.1),
    ('T', "t", 0.3),
    ('T', "s", 0.3),
    ('T', "g", 0.3),
    ('T', "r", 0.1),
];

/// Groups composed for one spawner in one wave.
#[derive(Clone, Debug, PartialEq)]
pub struct WaveComposition {
    /// Enemy groups in release order.
    pub groups: Vec<Vec<Enemy>>,
}

impl WaveComposition {
    /// Total number of enemies across every group.
    #[must_use]
    pub fn enemy_count(&self) -> usize {
        self.groups.iter().map(Vec::len).sum()
    }
}

/// Composes per-spawner enemy groups from grammar runs.
#[derive(Clone, Debug)]
pub struct WaveComposer {
    grammar: WeightedGrammar,
    rng: GenerationRng,
    tile_size: f32,
}

impl WaveComposer {
    /// Creates a composer with the default wave grammar.
    #[must_use]
    pub fn new(config: &GrammarConfig, tile_size: f32) -> Self {
        let mut grammar = WeightedGrammar::new(0, config);
        for (symbol, successor, weight) in DEFAULT_RULES {
            if let Err(error) = grammar.add_rule(symbol, Rule::new(successor, weight)) {
                log::error!("default wave rule rejected: {error}");
            }
        }
        Self::with_grammar(grammar, tile_size)
    }

    /// Creates a composer around a caller-supplied grammar.
    #[must_use]
    pub fn with_grammar(grammar: WeightedGrammar, tile_size: f32) -> Self {
        Self {
            grammar,
            rng: GenerationRng::seeded(0),
            tile_size,
        }
    }

    /// Registers an additional production in the wave grammar.
    pub fn add_rule(&mut self, symbol: char, rule: Rule) -> Result<(), GrammarError> {
        self.grammar.add_rule(symbol, rule)
    }

    /// Composes the groups released by `spawner` during `wave`.
    ///
    /// The grammar and enemy rolls are seeded from `(world_seed, wave,
    /// spawner)`, so every spawner gets an independent but reproducible
    /// composition.
    pub fn compose(&mut self, world_seed: u32, wave: u32, spawner: u32) -> WaveComposition {
        let seed = derive_wave_seed(world_seed, wave, spawner);
        self.grammar.seed(seed);
        self.rng.reseed(derive_labeled_seed(seed, ENEMY_STREAM));

        let tree = self.grammar.run(START_SYMBOL);
        let composition = self.interpret(&tree);
        log::debug!(
            "wave {wave} spawner {spawner}: {} groups, {} enemies",
            composition.groups.len(),
            composition.enemy_count()
        );
        composition
    }

    /// Walks a rule tree and collects its enemy groups.
    ///
    /// A group node gathers its direct enemy children into one group. A
    /// switch node changes the archetype used for later enemies. A nested
    /// group closes the group gathered so far before it is walked. Enemies
    /// default to [`EnemyArchetype::Generic`] until a switch is seen.
    pub fn interpret(&mut self, tree: &RuleNode) -> WaveComposition {
        let mut archetype = EnemyArchetype::Generic;
        let mut groups = Vec::new();
        self.walk(tree, &mut archetype, &mut groups);
        groups.retain(|group: &Vec<Enemy>| !group.is_empty());
        WaveComposition { groups }
    }

    fn walk(
        &mut self,
        node: &RuleNode,
        archetype: &mut EnemyArchetype,
        groups: &mut Vec<Vec<Enemy>>,
    ) {
        match node.symbol() {
            GROUP_SYMBOL => {
                let mut pending = Vec::new();
                for child in node.children() {
                    match child.symbol() {
                        ENEMY_SYMBOL => {
                            pending.push(roll_enemy(*archetype, self.tile_size, &mut self.rng));
                        }
                        SWITCH_SYMBOL => switch_archetype(child, archetype),
                        _ => {
                            if !pending.is_empty() {
                                groups.push(std::mem::take(&mut pending));
                            }
                            self.walk(child, archetype, groups);
                        }
                    }
                }
                if !pending.is_empty() {
                    groups.push(pending);
                }
            }
            SWITCH_SYMBOL => switch_archetype(node, archetype),
            _ => {
                for child in node.children() {
                    self.walk(child, archetype, groups);
                }
            }
        }
    }
}

fn switch_archetype(node: &RuleNode, archetype: &mut EnemyArchetype) {
    if let Some(selected) = node
        .children()
        .first()
        .and_then(|child| EnemyArchetype::from_symbol(child.symbol()))
    {
        *archetype = selected;
    }
}

/// Seed of the grammar run for one spawner in one wave.
#[must_use]
pub fn derive_wave_seed(world_seed: u32, wave: u32, spawner: u32) -> u64 {
    let mut hasher = Sha256::new();
    hasher.update(world_seed.to_le_bytes());
    hasher.update(wave.to_le_bytes());
    hasher.update(spawner.to_le_bytes());
    finalize_seed(hasher)
}

fn derive_labeled_seed(base: u64, label: &str) -> u64 {
    let mut hasher = Sha256::new();
    hasher.update(base.to_le_bytes());
    hasher.update(label.as_bytes());
    finalize_seed(hasher)
}

fn finalize_seed(hasher: Sha256) -> u64 {
    let digest = hasher.finalize();
    let mut bytes = [0_u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    u64::from_le_bytes(bytes)
}
