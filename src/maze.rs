//! Grid storage and procedural maze generation.
//!
//! A maze is carved on an odd-by-odd lattice: cells at odd coordinates,
//! walls between them. The randomized DFS produces a spanning tree (every
//! Path cell reachable from (1,1)); `add_extra_passages` then knocks out a
//! few junction walls to introduce cycles.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::entities::Pos;

/// Attempt budget for the probabilistic extra-passage carver.
const CARVE_ATTEMPTS: usize = 500;

const JUMPS: [(isize, isize); 4] = [(-2, 0), (2, 0), (0, -2), (0, 2)];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cell {
    Wall,
    Path,
}

/// Rectangular occupancy field. Storage and queries only; the generator
/// mutates it in place and gameplay code treats it as read-only.
#[derive(Clone, Debug)]
pub struct Grid {
    pub rows: usize,
    pub cols: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// All-wall grid. Even dimensions leave no room for a wall lattice, so
    /// they are bumped to the next odd number.
    pub fn new(rows: usize, cols: usize) -> Self {
        let rows = if rows % 2 == 0 { rows + 1 } else { rows };
        let cols = if cols % 2 == 0 { cols + 1 } else { cols };
        debug_assert!(
            rows >= 5 && cols >= 5,
            "grid too small for a maze: {rows}x{cols}"
        );
        Self {
            rows,
            cols,
            cells: vec![Cell::Wall; rows * cols],
        }
    }

    pub fn in_bounds(&self, pos: Pos) -> bool {
        pos.x < self.cols && pos.y < self.rows
    }

    pub fn is_wall(&self, pos: Pos) -> bool {
        self.cells[pos.y * self.cols + pos.x] == Cell::Wall
    }

    pub fn is_path(&self, pos: Pos) -> bool {
        !self.is_wall(pos)
    }

    pub fn set(&mut self, pos: Pos, cell: Cell) {
        self.cells[pos.y * self.cols + pos.x] = cell;
    }

    /// The orthogonal neighbours of `pos` that lie inside the grid.
    pub fn neighbors(&self, pos: Pos) -> Vec<Pos> {
        let mut out = Vec::with_capacity(4);
        for (dx, dy) in [(-1isize, 0isize), (1, 0), (0, -1), (0, 1)] {
            let nx = pos.x as isize + dx;
            let ny = pos.y as isize + dy;
            if nx < 0 || ny < 0 {
                continue;
            }
            let next = Pos::new(nx as usize, ny as usize);
            if self.in_bounds(next) {
                out.push(next);
            }
        }
        out
    }
}

/// Carve a maze with a randomized iterative depth-first search from (1,1).
///
/// Each step jumps two cells in a shuffled direction and opens both the
/// destination and the wall between; dead ends pop the stack. The border is
/// never touched, and every carved cell is reachable from the start.
pub fn generate(rows: usize, cols: usize, rng: &mut impl Rng) -> Grid {
    let mut grid = Grid::new(rows, cols);
    let start = Pos::new(1, 1);
    grid.set(start, Cell::Path);

    let mut stack = vec![start];
    while let Some(&current) = stack.last() {
        let mut directions = JUMPS;
        directions.shuffle(rng);

        let mut carved = false;
        for (dx, dy) in directions {
            let nx = current.x as isize + dx;
            let ny = current.y as isize + dy;
            if nx < 1 || ny < 1 || nx >= grid.cols as isize - 1 || ny >= grid.rows as isize - 1 {
                continue;
            }
            let next = Pos::new(nx as usize, ny as usize);
            if grid.is_path(next) {
                continue;
            }
            let between = Pos::new((current.x + next.x) / 2, (current.y + next.y) / 2);
            grid.set(next, Cell::Path);
            grid.set(between, Cell::Path);
            stack.push(next);
            carved = true;
            break;
        }

        if !carved {
            stack.pop();
        }
    }
    grid
}

/// Open up to `count` extra passages to create loops.
///
/// Best-effort: each of at most `CARVE_ATTEMPTS` tries picks a random
/// interior cell and converts Wall→Path only when at least two orthogonal
/// neighbours are already Path, which favours cycles over dead-end stubs
/// and can never disconnect the maze.
pub fn add_extra_passages(grid: &mut Grid, count: usize, rng: &mut impl Rng) {
    let mut remaining = count;
    let mut attempts = 0;
    while remaining > 0 && attempts < CARVE_ATTEMPTS {
        attempts += 1;
        let pos = Pos::new(
            rng.gen_range(1..grid.cols - 1),
            rng.gen_range(1..grid.rows - 1),
        );
        if grid.is_path(pos) {
            continue;
        }
        let open = grid
            .neighbors(pos)
            .into_iter()
            .filter(|&n| grid.is_path(n))
            .count();
        if open >= 2 {
            grid.set(pos, Cell::Path);
            remaining -= 1;
        }
    }
}

/// A uniformly random interior Path cell. A generated maze always has Path
/// cells, so rejection sampling terminates.
pub fn random_path_cell(grid: &Grid, rng: &mut impl Rng) -> Pos {
    loop {
        let pos = Pos::new(
            rng.gen_range(1..grid.cols - 1),
            rng.gen_range(1..grid.rows - 1),
        );
        if grid.is_path(pos) {
            return pos;
        }
    }
}
