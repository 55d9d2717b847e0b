//! Weighted A* over the von Neumann neighbourhood of a tilemap.

use std::{cmp::Ordering, collections::BinaryHeap};

use pcg_towers_core::{PathCost, Tilemap};

const NEIGHBOURS: [(i32, i32); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

#[derive(Clone, Copy, Debug)]
struct OpenNode {
    score: f32,
    index: usize,
}

impl PartialEq for OpenNode {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for OpenNode {}

impl Ord for OpenNode {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .score
            .total_cmp(&self.score)
            .then_with(|| other.index.cmp(&self.index))
    }
}

impl PartialOrd for OpenNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Cost of stepping onto a tile with the given path noise.
#[must_use]
pub fn edge_weight(noise: f32, cost: PathCost) -> f32 {
    ((cost.offset - noise) * cost.scale).max(0.0)
}

/// Finds a least-cost route between two tile indices.
///
/// The returned indices exclude `from` and end with `to`. An empty vector
/// means no route exists, including when `from == to` or either index lies
/// outside the map.
#[must_use]
pub fn find_path(tilemap: &Tilemap, from: usize, to: usize, cost: PathCost) -> Vec<usize> {
    find_path_with(tilemap, from, to, cost, |_| false)
}

/// Variant of [`find_path`] that never enters tiles for which `is_blocked`
/// returns `true`.
///
/// The open set is ordered by ascending `local + heuristic` score with ties
/// broken by tile index, so identical inputs always produce identical routes.
/// The heuristic is the squared grid distance to the goal scaled by
/// `cost.heuristic_scale`.
pub fn find_path_with<F>(
    tilemap: &Tilemap,
    from: usize,
    to: usize,
    cost: PathCost,
    mut is_blocked: F,
) -> Vec<usize>
where
    F: FnMut(usize) -> bool,
{
    let tile_count = tilemap.len();
    if from >= tile_count || to >= tile_count || from == to || is_blocked(to) {
        return Vec::new();
    }
    let Some(goal) = tilemap.position_from_index(to) else {
        return Vec::new();
    };
    let heuristic = |index: usize| -> f32 {
        tilemap
            .position_from_index(index)
            .map_or(f32::INFINITY, |position| {
                position.distance_squared(goal) as f32 * cost.heuristic_scale
            })
    };

    let mut local = vec![f32::INFINITY; tile_count];
    let mut previous: Vec<Option<usize>> = vec![None; tile_count];
    let mut closed = vec![false; tile_count];
    let mut open = BinaryHeap::new();

    local[from] = 0.0;
    open.push(OpenNode {
        score: heuristic(from),
        index: from,
    });

    while let Some(OpenNode { index: current, .. }) = open.pop() {
        if closed[current] {
            continue;
        }
        closed[current] = true;

        if current == to {
            return reconstruct(&previous, from, to);
        }

        let Some(position) = tilemap.position_from_index(current) else {
            continue;
        };
        for (dx, dy) in NEIGHBOURS {
            let Some(neighbour) = tilemap
                .offset(position, dx, dy)
                .and_then(|tile| tilemap.index_from_position(tile))
            else {
                continue;
            };
            if closed[neighbour] || is_blocked(neighbour) {
                continue;
            }

            let noise = tilemap
                .tile_data_at_index(neighbour)
                .map_or(0.0, |data| data.noise);
            let score = local[current] + edge_weight(noise, cost);
            if score < local[neighbour] {
                local[neighbour] = score;
                previous[neighbour] = Some(current);
                open.push(OpenNode {
                    score: score + heuristic(neighbour),
                    index: neighbour,
                });
            }
        }
    }

    Vec::new()
}

fn reconstruct(previous: &[Option<usize>], from: usize, to: usize) -> Vec<usize> {
    let mut path = Vec::new();
    let mut current = to;
    while current != from {
        path.push(current);
        match previous.get(current).copied().flatten() {
            Some(step) => current = step,
            None => return Vec::new(),
        }
    }
    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use pcg_towers_core::TilePosition;

    fn index(map: &Tilemap, x: u32, y: u32) -> usize {
        map.index_from_position(TilePosition::new(x, y))
            .expect("in bounds")
    }

    #[test]
    fn lower_noise_is_cheaper() {
        let cost = PathCost::default();
        assert!(edge_weight(0.9, cost) < edge_weight(0.1, cost));
        assert!((edge_weight(0.0, cost) - 200.0).abs() < f32::EPSILON);
    }

    #[test]
    fn route_prefers_low_cost_corridor() {
        let mut map = Tilemap::new(5, 3);
        for x in 0..5 {
            if let Some(data) = map.tile_data_mut(TilePosition::new(x, 2)) {
                data.noise = 1.0;
            }
        }
        let from = index(&map, 0, 0);
        let to = index(&map, 4, 2);

        let cost = PathCost {
            heuristic_scale: 1.0,
            ..PathCost::default()
        };
        let path = find_path(&map, from, to, cost);

        let expected: Vec<usize> = [(0, 1), (0, 2), (1, 2), (2, 2), (3, 2), (4, 2)]
            .into_iter()
            .map(|(x, y)| index(&map, x, y))
            .collect();
        assert_eq!(path, expected);
    }

    #[test]
    fn out_of_range_indices_have_no_route() {
        let map = Tilemap::new(3, 3);
        assert!(find_path(&map, 0, 9, PathCost::default()).is_empty());
        assert!(find_path(&map, 42, 0, PathCost::default()).is_empty());
    }

    #[test]
    fn open_nodes_pop_lowest_score_then_lowest_index() {
        let mut heap = BinaryHeap::new();
        heap.push(OpenNode { score: 5.0, index: 1 });
        heap.push(OpenNode { score: 2.0, index: 7 });
        heap.push(OpenNode { score: 2.0, index: 3 });
        let order: Vec<usize> = std::iter::from_fn(|| heap.pop().map(|node| node.index)).collect();
        assert_eq!(order, vec![3, 7, 1]);
    }
}
