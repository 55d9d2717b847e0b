#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Grammar-driven wave composition and spawner release timing.
//!
//! Every spawner runs its own grammar expansion per wave. The resulting tree
//! is interpreted into ordered enemy groups, which a [`SpawnerSchedule`]
//! releases evenly over the wave duration.

mod archetype;
mod composer;
mod schedule;

pub use archetype::roll_enemy;
pub use composer::{
    derive_wave_seed, WaveComposer, WaveComposition, ENEMY_SYMBOL, GROUP_SYMBOL, START_SYMBOL,
    SWITCH_SYMBOL,
};
pub use schedule::{SpawnerSchedule, WaveTiming};
