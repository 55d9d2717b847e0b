#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Stochastic weighted grammar engine.
//!
//! A [`WeightedGrammar`] maps symbols to weighted successor strings and
//! expands an axiom into an owned [`RuleNode`] tree. Each run hands the
//! caller the whole tree; nothing from a previous run is kept.

mod engine;
mod tree;

pub use engine::{GrammarError, Rule, WeightedGrammar};
pub use tree::RuleNode;
