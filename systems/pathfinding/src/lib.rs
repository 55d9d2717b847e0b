#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Terrain-aware path search and path carving.
//!
//! Routes follow low path-cost noise: stepping onto a tile costs
//! `(offset - noise) * scale`, and the search is guided by the squared grid
//! distance to the goal. Paths shaped this way favour smooth terrain over
//! strictly shortest routes.

mod carve;
mod search;

pub use carve::carve_path;
pub use search::{edge_weight, find_path, find_path_with};
