use pixel_maze::entities::Pos;
use pixel_maze::maze::{generate, Cell, Grid};
use pixel_maze::path::{manhattan, shortest_path};

use std::collections::{HashMap, VecDeque};

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Every interior cell open — no walls except the border.
fn open_grid(rows: usize, cols: usize) -> Grid {
    let mut grid = Grid::new(rows, cols);
    for y in 1..grid.rows - 1 {
        for x in 1..grid.cols - 1 {
            grid.set(Pos::new(x, y), Cell::Path);
        }
    }
    grid
}

/// Reference BFS distance in steps, `None` when unreachable.
fn bfs_distance(grid: &Grid, start: Pos, goal: Pos) -> Option<usize> {
    let mut dist = HashMap::new();
    dist.insert(start, 0usize);
    let mut queue = VecDeque::from([start]);
    while let Some(current) = queue.pop_front() {
        if current == goal {
            return Some(dist[&current]);
        }
        let d = dist[&current];
        for next in grid.neighbors(current) {
            if grid.is_path(next) && !dist.contains_key(&next) {
                dist.insert(next, d + 1);
                queue.push_back(next);
            }
        }
    }
    None
}

// ── manhattan ─────────────────────────────────────────────────────────────────

#[test]
fn manhattan_is_symmetric() {
    let a = Pos::new(2, 7);
    let b = Pos::new(9, 3);
    assert_eq!(manhattan(a, b), 11);
    assert_eq!(manhattan(b, a), 11);
}

#[test]
fn manhattan_zero_for_same_cell() {
    let p = Pos::new(4, 4);
    assert_eq!(manhattan(p, p), 0);
}

// ── shortest_path ─────────────────────────────────────────────────────────────

#[test]
fn path_on_open_grid_has_manhattan_length() {
    let grid = open_grid(9, 9);
    let start = Pos::new(1, 1);
    let goal = Pos::new(7, 5);
    let route = shortest_path(&grid, start, goal);
    assert_eq!(route.len(), manhattan(start, goal));
}

#[test]
fn path_excludes_start_and_includes_goal() {
    let grid = open_grid(9, 9);
    let start = Pos::new(1, 1);
    let goal = Pos::new(5, 5);
    let route = shortest_path(&grid, start, goal);
    assert!(!route.contains(&start));
    assert_eq!(route.last(), Some(&goal));
}

#[test]
fn path_steps_are_adjacent_open_cells() {
    let grid = open_grid(9, 9);
    let start = Pos::new(1, 1);
    let route = shortest_path(&grid, start, Pos::new(7, 7));
    let mut prev = start;
    for &step in &route {
        assert_eq!(manhattan(prev, step), 1);
        assert!(grid.is_path(step));
        prev = step;
    }
}

#[test]
fn same_start_and_goal_yields_empty_path() {
    let grid = open_grid(9, 9);
    let p = Pos::new(3, 3);
    assert!(shortest_path(&grid, p, p).is_empty());
}

#[test]
fn unreachable_goal_yields_empty_path() {
    let mut grid = open_grid(9, 9);
    // Wall off (7,7) completely.
    let goal = Pos::new(7, 7);
    for neighbor in grid.neighbors(goal) {
        grid.set(neighbor, Cell::Wall);
    }
    assert!(shortest_path(&grid, Pos::new(1, 1), goal).is_empty());
}

#[test]
fn path_routes_around_a_wall() {
    let mut grid = open_grid(9, 9);
    // Vertical wall at x=4 with a single gap at y=7.
    for y in 1..7 {
        grid.set(Pos::new(4, y), Cell::Wall);
    }
    let start = Pos::new(1, 1);
    let goal = Pos::new(7, 1);
    let route = shortest_path(&grid, start, goal);
    assert!(!route.is_empty());
    assert!(route.contains(&Pos::new(4, 7)));
    assert_eq!(Some(route.len()), bfs_distance(&grid, start, goal));
}

#[test]
fn path_length_matches_bfs_on_generated_mazes() {
    for seed in 0..8 {
        let mut rng = StdRng::seed_from_u64(seed);
        let grid = generate(21, 21, &mut rng);
        let start = Pos::new(1, 1);
        let goal = Pos::new(grid.cols - 2, grid.rows - 2);
        let route = shortest_path(&grid, start, goal);
        assert_eq!(Some(route.len()), bfs_distance(&grid, start, goal), "seed {seed}");
    }
}
