//! All game entity types — pure data, no logic.

use crate::maze::Grid;

// ── Geometry ──────────────────────────────────────────────────────────────────

/// A grid cell address. Valid iff `x < cols` and `y < rows`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pos {
    pub x: usize,
    pub y: usize,
}

impl Pos {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Dir {
    Up,
    Down,
    Left,
    Right,
}

impl Dir {
    pub fn delta(self) -> (isize, isize) {
        match self {
            Dir::Up => (0, -1),
            Dir::Down => (0, 1),
            Dir::Left => (-1, 0),
            Dir::Right => (1, 0),
        }
    }
}

// ── Player ────────────────────────────────────────────────────────────────────

/// Transient statuses are a flag plus an absolute deadline; the deadline is
/// compared against the `now` each tick supplies, never against a real clock.
#[derive(Clone, Debug)]
pub struct Player {
    pub pos: Pos,
    pub invisible: bool,
    pub invisible_until: f64,
    pub speed_boost: bool,
    pub speed_boost_until: f64,
}

// ── Enemies ───────────────────────────────────────────────────────────────────

/// Navigation policy tag — one `Enemy` record per adversary, no subclassing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnemyKind {
    /// 50% chance to recompute a shortest path to the player, otherwise one
    /// random legal step.
    Wanderer,
    /// Recomputes the shortest path to the player on every decision.
    Chaser,
    /// Walks a fixed waypoint loop and ignores the player entirely.
    Patrol,
}

#[derive(Clone, Debug)]
pub struct PatrolState {
    pub waypoints: Vec<Pos>,
    pub index: usize,
    /// Loop direction. The route always wraps forward; ping-pong was never
    /// part of the contract.
    pub forward: bool,
    pub wait_time: f64,
    /// Set when the current waypoint is reached, cleared when the cursor
    /// advances.
    pub reached_at: Option<f64>,
}

#[derive(Clone, Debug)]
pub struct Enemy {
    pub pos: Pos,
    pub kind: EnemyKind,
    /// Current planned route (excluding the cell the enemy stands on).
    pub path: Vec<Pos>,
    pub path_index: usize,
    /// Minimum seconds between decisions for this enemy.
    pub speed: f64,
    pub last_move_time: f64,
    /// Present iff `kind == EnemyKind::Patrol`.
    pub patrol: Option<PatrolState>,
}

// ── Pickups & exit ────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Collectible {
    pub pos: Pos,
    pub collected: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PowerKind {
    Speed,
    Invincibility,
}

#[derive(Clone, Debug)]
pub struct PowerUp {
    pub pos: Pos,
    pub kind: PowerKind,
    pub collected: bool,
}

// ── Session state machine ─────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Menu,
    Instructions,
    Playing,
    GameOver,
}

pub const MENU_OPTIONS: [&str; 3] = ["Start Game", "Instructions", "Exit"];

/// Discrete input surface. Produced by the input layer, consumed by
/// `compute::step`; which commands are honoured depends on the current mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Move(Dir),
    TogglePause,
    Invisibility,
    Restart,
    Quit,
    MenuUp,
    MenuDown,
    MenuSelect,
    Back,
}

// ── Configuration ─────────────────────────────────────────────────────────────

/// Session-scoped tuning knobs. One instance lives inside `GameState` so the
/// core never reads globals.
#[derive(Clone, Debug)]
pub struct Config {
    /// Maze dimensions; even values are bumped to odd by the generator.
    pub maze_rows: usize,
    pub maze_cols: usize,
    /// Cycle-adding passages carved after the DFS spanning tree.
    pub extra_passages: usize,
    /// Seconds on the clock at the start of each level.
    pub level_time: f64,
    /// Minimum seconds between global enemy decision rounds.
    pub enemy_move_interval: f64,
    /// Default per-enemy decision cadence in seconds.
    pub enemy_cadence: f64,
    pub patrol_route_len: usize,
    pub patrol_wait_time: f64,
    pub collectible_count: usize,
    pub collectible_score: u32,
    /// Duration of both powerup effects.
    pub powerup_duration: f64,
    /// Duration of the manually triggered invisibility.
    pub manual_invisibility: f64,
    /// Minimum Manhattan distance between the exit and every enemy.
    pub exit_min_distance: usize,
    /// Random placements tried before falling back to the far corner.
    pub exit_max_tries: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            maze_rows: 21,
            maze_cols: 21,
            extra_passages: 2,
            level_time: 60.0,
            enemy_move_interval: 0.5,
            enemy_cadence: 1.0,
            patrol_route_len: 4,
            patrol_wait_time: 1.0,
            collectible_count: 4,
            collectible_score: 10,
            powerup_duration: 5.0,
            manual_invisibility: 3.0,
            exit_min_distance: 8,
            exit_max_tries: 500,
        }
    }
}

// ── Master game state ─────────────────────────────────────────────────────────

/// The entire session state. Cloneable so pure update functions can return a
/// new copy without mutating the original; the renderer only ever reads it.
#[derive(Clone, Debug)]
pub struct GameState {
    pub grid: Grid,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub collectibles: Vec<Collectible>,
    pub powerups: Vec<PowerUp>,
    pub exit: Pos,
    pub score: u32,
    /// Seconds left on the level clock; ticks down only while Playing and
    /// unpaused.
    pub level_time: f64,
    /// `now` of the last tick that billed the clock.
    pub last_time_update: f64,
    /// `now` of the last global enemy decision round.
    pub last_enemy_move_time: f64,
    pub current_level: u32,
    pub mode: Mode,
    pub paused: bool,
    /// Highlighted entry on the main menu.
    pub selected_option: usize,
    /// Set by the Quit command; the shell exits when it sees this.
    pub quitting: bool,
    pub config: Config,
}
