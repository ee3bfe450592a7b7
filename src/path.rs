//! Shortest-path search over the grid.
//!
//! Best-first expansion on `g + h` with a Manhattan heuristic — A* on a
//! uniform-cost 4-connected grid, so the result is a true shortest path in
//! cell count. Ties are broken by the heap's ordering on `(priority, Pos)`,
//! which is arbitrary but deterministic for a given grid and endpoints.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

use crate::entities::Pos;
use crate::maze::Grid;

pub fn manhattan(a: Pos, b: Pos) -> usize {
    a.x.abs_diff(b.x) + a.y.abs_diff(b.y)
}

/// The shortest Wall-avoiding route from `start` to `goal`, excluding
/// `start` and including `goal`. Empty when the goal is unreachable or
/// equals the start.
pub fn shortest_path(grid: &Grid, start: Pos, goal: Pos) -> Vec<Pos> {
    if start == goal {
        return Vec::new();
    }

    let mut frontier: BinaryHeap<Reverse<(usize, Pos)>> = BinaryHeap::new();
    frontier.push(Reverse((manhattan(start, goal), start)));
    let mut came_from: HashMap<Pos, Pos> = HashMap::new();
    let mut cost_so_far: HashMap<Pos, usize> = HashMap::new();
    cost_so_far.insert(start, 0);

    while let Some(Reverse((_, current))) = frontier.pop() {
        if current == goal {
            break;
        }
        let base = cost_so_far[&current];
        for next in grid.neighbors(current) {
            if grid.is_wall(next) {
                continue;
            }
            let new_cost = base + 1;
            if cost_so_far.get(&next).map_or(true, |&c| new_cost < c) {
                cost_so_far.insert(next, new_cost);
                frontier.push(Reverse((new_cost + manhattan(next, goal), next)));
                came_from.insert(next, current);
            }
        }
    }

    // Walk the parent links back from the goal; no link means unreachable.
    let mut route = Vec::new();
    let mut current = goal;
    while current != start {
        match came_from.get(&current) {
            Some(&prev) => {
                route.push(current);
                current = prev;
            }
            None => return Vec::new(),
        }
    }
    route.reverse();
    route
}
