//! Weighted stochastic rewriting engine.

use std::collections::{BTreeMap, HashSet};

use pcg_towers_core::{GenerationRng, GrammarConfig};
use thiserror::Error;

use crate::RuleNode;

/// Errors raised while registering rules.
#[derive(Clone, Copy, Debug, PartialEq, Error)]
pub enum GrammarError {
    /// Rule weights must be finite and non-negative.
    #[error("rule for `{symbol}` has invalid weight {weight}")]
    InvalidWeight {
        /// Symbol the rule was registered for.
        symbol: char,
        /// Rejected weight.
        weight: f32,
    },
}

/// Weighted production from a symbol to a successor string.
#[derive(Clone, Debug, PartialEq)]
pub struct Rule {
    successor: String,
    weight: f32,
}

impl Rule {
    /// Creates a rule.
    #[must_use]
    pub fn new(successor: impl Into<String>, weight: f32) -> Self {
        Self {
            successor: successor.into(),
            weight,
        }
    }

    /// String the symbol is rewritten into.
    #[must_use]
    pub fn successor(&self) -> &str {
        &self.successor
    }

    /// Relative selection weight.
    #[must_use]
    pub const fn weight(&self) -> f32 {
        self.weight
    }
}

/// Context-free grammar with weighted, randomized production choice.
///
/// Rules for a symbol are kept in registration order, which fixes the
/// roulette-wheel layout and therefore the trees a given seed produces.
#[derive(Clone, Debug)]
pub struct WeightedGrammar {
    rules: BTreeMap<char, Vec<Rule>>,
    terminals: HashSet<char>,
    rng: GenerationRng,
    max_depth: u32,
    max_nodes: u32,
}

impl WeightedGrammar {
    /// Creates an empty grammar seeded with `seed`.
    #[must_use]
    pub fn new(seed: u64, config: &GrammarConfig) -> Self {
        Self {
            rules: BTreeMap::new(),
            terminals: HashSet::new(),
            rng: GenerationRng::seeded(seed),
            max_depth: config.max_depth,
            max_nodes: config.max_nodes,
        }
    }

    /// Restarts the random sequence from `seed`.
    pub fn seed(&mut self, seed: u64) {
        self.rng.reseed(seed);
    }

    /// Registers a production for `symbol`.
    pub fn add_rule(&mut self, symbol: char, rule: Rule) -> Result<(), GrammarError> {
        if !rule.weight.is_finite() || rule.weight < 0.0 {
            return Err(GrammarError::InvalidWeight {
                symbol,
                weight: rule.weight,
            });
        }
        self.rules.entry(symbol).or_default().push(rule);
        Ok(())
    }

    /// Registers `symbol` as terminal regardless of its case or rules.
    pub fn add_terminal(&mut self, symbol: char) {
        let _ = self.terminals.insert(symbol);
    }

    /// Productions registered for `symbol`, in registration order.
    #[must_use]
    pub fn rules(&self, symbol: char) -> &[Rule] {
        self.rules.get(&symbol).map_or(&[], Vec::as_slice)
    }

    /// Reports whether `symbol` never expands.
    ///
    /// Lowercase symbols, explicitly registered terminals and symbols without
    /// rules are terminal.
    #[must_use]
    pub fn is_terminating(&self, symbol: char) -> bool {
        symbol.is_lowercase() || self.terminals.contains(&symbol) || self.rules(symbol).is_empty()
    }

    /// Expands `axiom` into a rule tree.
    ///
    /// The returned root holds the axiom and owns the whole tree. Expansion
    /// stops below the configured maximum depth, leaving deeper non-terminals
    /// as leaves. Children are expanded depth first; once a successor would
    /// push the tree past the node budget, its symbol stays a leaf.
    pub fn run(&mut self, axiom: char) -> RuleNode {
        let mut root = RuleNode::leaf(axiom);
        let mut budget = (self.max_nodes as usize).saturating_sub(1);
        if !self.is_terminating(axiom) {
            self.expand(&mut root, 0, &mut budget);
        }
        log::trace!(
            "grammar expanded `{axiom}` into {} nodes",
            root.node_count()
        );
        root
    }

    /// Picks a successor for `symbol` by weighted roulette selection.
    ///
    /// Returns `None` for terminal symbols and when rounding leaves the
    /// draw past the last rule.
    pub fn select(&mut self, symbol: char) -> Option<&str> {
        if self.is_terminating(symbol) {
            return None;
        }
        let rules = self.rules.get(&symbol)?;
        let sum: f32 = rules.iter().map(Rule::weight).sum();
        let mut running = self.rng.uniform() * sum;
        for rule in rules {
            running -= rule.weight;
            if running < 0.0 {
                return Some(rule.successor());
            }
        }
        None
    }

    fn expand(&mut self, node: &mut RuleNode, depth: u32, budget: &mut usize) {
        if depth >= self.max_depth {
            return;
        }
        let Some(successor) = self.select(node.symbol()).map(str::to_owned) else {
            return;
        };
        let width = successor.chars().count();
        if width > *budget {
            log::trace!("node budget exhausted expanding `{}`", node.symbol());
            return;
        }
        *budget -= width;
        for symbol in successor.chars() {
            node.push(RuleNode::leaf(symbol));
        }
        for child in node.children_mut() {
            if !self.is_terminating(child.symbol()) {
                self.expand(child, depth + 1, budget);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grammar(seed: u64) -> WeightedGrammar {
        WeightedGrammar::new(seed, &GrammarConfig::default())
    }

    #[test]
    fn invalid_weights_are_rejected() {
        let mut grammar = grammar(1);
        assert_eq!(
            grammar.add_rule('A', Rule::new("a", -1.0)),
            Err(GrammarError::InvalidWeight {
                symbol: 'A',
                weight: -1.0
            })
        );
        assert!(grammar.add_rule('A', Rule::new("a", f32::NAN)).is_err());
        assert!(grammar.rules('A').is_empty());
    }

    #[test]
    fn zero_weight_selection_misses_and_leaves_a_leaf() {
        let mut grammar = grammar(3);
        grammar
            .add_rule('A', Rule::new("bb", 0.0))
            .expect("zero weight is valid");

        assert_eq!(grammar.select('A'), None);
        let tree = grammar.run('A');
        assert!(tree.is_leaf());
        assert_eq!(tree.symbol(), 'A');
    }

    #[test]
    fn depth_cap_stops_runaway_recursion() {
        let config = GrammarConfig {
            max_depth: 4,
            ..GrammarConfig::default()
        };
        let mut grammar = WeightedGrammar::new(5, &config);
        grammar
            .add_rule('A', Rule::new("A", 1.0))
            .expect("valid rule");

        let tree = grammar.run('A');

        assert_eq!(tree.node_count(), 5);
    }

    #[test]
    fn node_budget_bounds_branching_grammars() {
        let config = GrammarConfig {
            max_nodes: 100,
            ..GrammarConfig::default()
        };
        let mut grammar = WeightedGrammar::new(11, &config);
        grammar
            .add_rule('A', Rule::new("AAAA", 1.0))
            .expect("valid rule");

        let tree = grammar.run('A');

        let nodes = tree.node_count();
        assert!(nodes <= 100, "tree grew to {nodes} nodes");
        assert!(nodes > 90, "budget left mostly unused: {nodes} nodes");
    }

    #[test]
    fn default_budget_stops_exponential_growth() {
        let mut grammar = grammar(12);
        grammar
            .add_rule('A', Rule::new("AAAA", 1.0))
            .expect("valid rule");

        let nodes = grammar.run('A').node_count();

        assert!(nodes <= GrammarConfig::default().max_nodes as usize);
    }

    #[test]
    fn successors_keep_order() {
        let mut grammar = grammar(9);
        grammar
            .add_rule('S', Rule::new("abAc", 1.0))
            .expect("valid rule");
        grammar
            .add_rule('A', Rule::new("xy", 1.0))
            .expect("valid rule");

        let tree = grammar.run('S');

        assert_eq!(tree.leaf_symbols(), "abxyc");
        let symbols: Vec<char> = tree.children().iter().map(RuleNode::symbol).collect();
        assert_eq!(symbols, vec!['a', 'b', 'A', 'c']);
    }
}
