//! Pure game-logic functions.
//!
//! Every public function takes an immutable reference to the current
//! `GameState` (plus the tick's `now` in seconds and, where needed, an RNG
//! handle) and returns a brand-new `GameState`. Side effects are limited to
//! the injected RNG; all waiting is expressed as deadlines compared against
//! `now`, so the core runs without a real clock.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::entities::{
    Collectible, Command, Config, Dir, Enemy, EnemyKind, GameState, Mode, PatrolState, Player,
    PowerKind, PowerUp, Pos, MENU_OPTIONS,
};
use crate::maze::{self, Grid};
use crate::path::{manhattan, shortest_path};

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build the initial session: a generated level behind the main menu.
/// `starting_level` is the persisted progress loaded by the shell.
pub fn init_state(config: Config, starting_level: u32, now: f64, rng: &mut impl Rng) -> GameState {
    let grid = Grid::new(config.maze_rows, config.maze_cols);
    let exit = Pos::new(grid.cols - 2, grid.rows - 2);
    let base = GameState {
        grid,
        player: Player {
            pos: Pos::new(1, 1),
            invisible: false,
            invisible_until: 0.0,
            speed_boost: false,
            speed_boost_until: 0.0,
        },
        enemies: Vec::new(),
        collectibles: Vec::new(),
        powerups: Vec::new(),
        exit,
        score: 0,
        level_time: config.level_time,
        last_time_update: now,
        last_enemy_move_time: now,
        current_level: starting_level.max(1),
        mode: Mode::Menu,
        paused: false,
        selected_option: 0,
        quitting: false,
        config,
    };
    start_level(&base, now, rng)
}

/// Regenerate the maze and respawn every entity for the current level.
///
/// Used for the first level, each level advance, and restarts: the old grid
/// and entity list are discarded wholesale, so no stale path or patrol state
/// can leak across the boundary. Score, level counter and mode are left to
/// the caller.
pub fn start_level(state: &GameState, now: f64, rng: &mut impl Rng) -> GameState {
    let mut s = state.clone();
    let cfg = s.config.clone();
    debug_assert!(cfg.patrol_route_len >= 1, "patrol route needs a waypoint");

    let mut grid = maze::generate(cfg.maze_rows, cfg.maze_cols, rng);
    maze::add_extra_passages(&mut grid, cfg.extra_passages, rng);

    s.player.pos = Pos::new(1, 1);

    let mut enemies = vec![Enemy {
        pos: maze::random_path_cell(&grid, rng),
        kind: EnemyKind::Wanderer,
        path: Vec::new(),
        path_index: 0,
        speed: cfg.enemy_cadence,
        last_move_time: now,
        patrol: None,
    }];
    let route: Vec<Pos> = (0..cfg.patrol_route_len)
        .map(|_| maze::random_path_cell(&grid, rng))
        .collect();
    enemies.push(Enemy {
        pos: route[0],
        kind: EnemyKind::Patrol,
        path: Vec::new(),
        path_index: 0,
        speed: cfg.enemy_cadence,
        last_move_time: now,
        patrol: Some(PatrolState {
            waypoints: route,
            index: 0,
            forward: true,
            wait_time: cfg.patrol_wait_time,
            reached_at: None,
        }),
    });

    // Pickups land on distinct Path cells, away from the player spawn.
    let mut occupied = vec![s.player.pos];
    let mut collectibles = Vec::new();
    while collectibles.len() < cfg.collectible_count {
        let pos = maze::random_path_cell(&grid, rng);
        if occupied.contains(&pos) {
            continue;
        }
        occupied.push(pos);
        collectibles.push(Collectible {
            pos,
            collected: false,
        });
    }
    let mut powerups = Vec::new();
    for kind in [PowerKind::Speed, PowerKind::Invincibility] {
        loop {
            let pos = maze::random_path_cell(&grid, rng);
            if occupied.contains(&pos) {
                continue;
            }
            occupied.push(pos);
            powerups.push(PowerUp {
                pos,
                kind,
                collected: false,
            });
            break;
        }
    }

    s.exit = place_exit(&grid, &enemies, &cfg, rng);
    s.grid = grid;
    s.enemies = enemies;
    s.collectibles = collectibles;
    s.powerups = powerups;
    s.level_time = cfg.level_time;
    s.last_time_update = now;
    s.last_enemy_move_time = now;
    s
}

/// A Path cell at least `exit_min_distance` Manhattan steps from every
/// enemy, found by bounded random search. Falls back to the corner opposite
/// the player spawn when the budget runs out.
fn place_exit(grid: &Grid, enemies: &[Enemy], cfg: &Config, rng: &mut impl Rng) -> Pos {
    for _ in 0..cfg.exit_max_tries {
        let pos = Pos::new(
            rng.gen_range(1..grid.cols - 1),
            rng.gen_range(1..grid.rows - 1),
        );
        if !grid.is_path(pos) {
            continue;
        }
        if enemies
            .iter()
            .all(|e| manhattan(e.pos, pos) >= cfg.exit_min_distance)
        {
            return pos;
        }
    }
    Pos::new(grid.cols - 2, grid.rows - 2)
}

// ── The per-frame tick ───────────────────────────────────────────────────────

/// Advance the session by one frame: apply pending UI commands (these work
/// in every mode, paused included), advance timers and enemies, then apply
/// queued movement. Movement is deliberately processed after the enemy
/// round so a frame's outcome does not depend on input arrival order.
pub fn step(state: &GameState, now: f64, commands: &[Command], rng: &mut impl Rng) -> GameState {
    let mut s = state.clone();
    let mut moves = Vec::new();
    for &command in commands {
        match command {
            Command::Move(dir) => moves.push(dir),
            _ => s = apply_command(&s, command, now, rng),
        }
    }
    s = advance(&s, now, rng);
    for dir in moves {
        s = move_player(&s, dir, now, rng);
    }
    s
}

/// Process one discrete input command against the current mode.
pub fn apply_command(state: &GameState, command: Command, now: f64, rng: &mut impl Rng) -> GameState {
    let mut s = state.clone();
    match (s.mode, command) {
        (_, Command::Quit) => s.quitting = true,

        (Mode::Menu, Command::MenuUp) => {
            s.selected_option = (s.selected_option + MENU_OPTIONS.len() - 1) % MENU_OPTIONS.len();
        }
        (Mode::Menu, Command::MenuDown) => {
            s.selected_option = (s.selected_option + 1) % MENU_OPTIONS.len();
        }
        (Mode::Menu, Command::MenuSelect) => match s.selected_option {
            0 => {
                s = start_level(&s, now, rng);
                s.mode = Mode::Playing;
                s.paused = false;
            }
            1 => s.mode = Mode::Instructions,
            _ => s.quitting = true,
        },

        (Mode::Instructions, Command::Back) => s.mode = Mode::Menu,

        (Mode::Playing, Command::TogglePause) => s.paused = !s.paused,
        (Mode::Playing, Command::Invisibility) if !s.paused => {
            s.player.invisible = true;
            s.player.invisible_until = now + s.config.manual_invisibility;
        }
        (Mode::Playing, Command::Move(dir)) => s = move_player(&s, dir, now, rng),
        (Mode::Playing | Mode::GameOver, Command::Restart) => s = restart(&s, now, rng),

        _ => {}
    }
    s
}

/// Timer, status-expiry and enemy advancement. A no-op outside unpaused
/// Playing except that the clock anchors are re-based to `now`, so time
/// spent paused or in a menu is never billed against the level.
pub fn advance(state: &GameState, now: f64, rng: &mut impl Rng) -> GameState {
    let mut s = state.clone();
    if s.mode != Mode::Playing || s.paused {
        s.last_time_update = now;
        s.last_enemy_move_time = now;
        return s;
    }

    let delta = now - s.last_time_update;
    s.last_time_update = now;
    s.level_time -= delta;
    if s.level_time <= 0.0 {
        s.level_time = 0.0;
        s.mode = Mode::GameOver;
        return s;
    }

    if s.player.invisible && now >= s.player.invisible_until {
        s.player.invisible = false;
    }
    if s.player.speed_boost && now >= s.player.speed_boost_until {
        s.player.speed_boost = false;
    }

    if now - s.last_enemy_move_time >= s.config.enemy_move_interval {
        s = update_enemies(&s, now, rng);
        s.last_enemy_move_time = now;
    }
    s
}

// ── Enemy navigation ─────────────────────────────────────────────────────────

/// One decision round: every enemy whose own cadence has elapsed acts once,
/// then capture is checked against the (stationary) player.
fn update_enemies(state: &GameState, now: f64, rng: &mut impl Rng) -> GameState {
    let mut s = state.clone();
    let player_pos = s.player.pos;

    let mut enemies = std::mem::take(&mut s.enemies);
    for enemy in &mut enemies {
        if now - enemy.last_move_time >= enemy.speed {
            decide(enemy, &s.grid, player_pos, now, rng);
            enemy.last_move_time = now;
        }
    }
    s.enemies = enemies;

    if !s.player.invisible && s.enemies.iter().any(|e| e.pos == player_pos) {
        s.mode = Mode::GameOver;
    }
    s
}

/// Run one navigation-policy decision for a single enemy.
fn decide(enemy: &mut Enemy, grid: &Grid, player: Pos, now: f64, rng: &mut impl Rng) {
    match enemy.kind {
        EnemyKind::Wanderer => {
            if rng.gen_bool(0.5) {
                enemy.path = shortest_path(grid, enemy.pos, player);
                enemy.path_index = 0;
                follow_path(enemy);
            } else {
                enemy.path.clear();
                enemy.path_index = 0;
                random_step(enemy, grid, rng);
            }
        }
        EnemyKind::Chaser => {
            enemy.path = shortest_path(grid, enemy.pos, player);
            enemy.path_index = 0;
            follow_path(enemy);
        }
        EnemyKind::Patrol => patrol_step(enemy, grid, now),
    }
}

/// Take the next step of the planned route, if any. An empty route (player
/// unreachable, or already at the goal) means stay in place this tick.
fn follow_path(enemy: &mut Enemy) {
    if let Some(&next) = enemy.path.get(enemy.path_index) {
        enemy.pos = next;
        enemy.path_index += 1;
    }
}

/// One uniformly random legal step; a no-op when fully boxed in.
fn random_step(enemy: &mut Enemy, grid: &Grid, rng: &mut impl Rng) {
    let mut dirs = [Dir::Up, Dir::Down, Dir::Left, Dir::Right];
    dirs.shuffle(rng);
    for dir in dirs {
        if let Some(next) = offset(enemy.pos, dir.delta(), grid) {
            if grid.is_path(next) {
                enemy.pos = next;
                break;
            }
        }
    }
}

/// Waypoint-loop movement: hold `wait_time` seconds after arriving at the
/// current waypoint, then advance the cursor (wrapping) and walk toward the
/// next one, one axis-aligned step per decision — horizontal before
/// vertical, never diagonal.
fn patrol_step(enemy: &mut Enemy, grid: &Grid, now: f64) {
    let Some(patrol) = enemy.patrol.as_mut() else {
        return;
    };
    if patrol.waypoints.is_empty() {
        return;
    }

    if enemy.pos == patrol.waypoints[patrol.index] {
        match patrol.reached_at {
            // Spawned on the waypoint: the hold starts now.
            None => {
                patrol.reached_at = Some(now);
                return;
            }
            Some(reached) if now - reached < patrol.wait_time => return,
            Some(_) => {
                patrol.reached_at = None;
                if patrol.forward {
                    patrol.index = (patrol.index + 1) % patrol.waypoints.len();
                }
            }
        }
    }

    let target = patrol.waypoints[patrol.index];
    let dx = (target.x as isize - enemy.pos.x as isize).signum();
    let dy = (target.y as isize - enemy.pos.y as isize).signum();
    for step in [(dx, 0), (0, dy)] {
        if step == (0, 0) {
            continue;
        }
        if let Some(next) = offset(enemy.pos, step, grid) {
            if grid.is_path(next) {
                enemy.pos = next;
                break;
            }
        }
    }
    if enemy.pos == target {
        patrol.reached_at = Some(now);
    }
}

fn offset(pos: Pos, (dx, dy): (isize, isize), grid: &Grid) -> Option<Pos> {
    let nx = pos.x as isize + dx;
    let ny = pos.y as isize + dy;
    if nx < 0 || ny < 0 {
        return None;
    }
    let next = Pos::new(nx as usize, ny as usize);
    grid.in_bounds(next).then_some(next)
}

// ── Player movement ──────────────────────────────────────────────────────────

/// Move the player one cell (two sequential cells under a speed boost).
///
/// Each sub-step is silently rejected — and the rest abandoned — when the
/// destination is out of bounds or a Wall; rejection is an expected outcome
/// of input, not an error. A successful sub-step resolves pickups, the
/// exit, and enemy contact, in that order.
pub fn move_player(state: &GameState, dir: Dir, now: f64, rng: &mut impl Rng) -> GameState {
    if state.mode != Mode::Playing || state.paused {
        return state.clone();
    }
    let mut s = state.clone();
    let steps = if s.player.speed_boost { 2 } else { 1 };
    let delta = dir.delta();
    let gem_score = s.config.collectible_score;
    let boost_secs = s.config.powerup_duration;

    for _ in 0..steps {
        let next = match offset(s.player.pos, delta, &s.grid) {
            Some(next) if s.grid.is_path(next) => next,
            _ => break,
        };
        s.player.pos = next;

        for gem in &mut s.collectibles {
            if !gem.collected && gem.pos == next {
                gem.collected = true;
                s.score += gem_score;
            }
        }
        for power in &mut s.powerups {
            if !power.collected && power.pos == next {
                power.collected = true;
                match power.kind {
                    PowerKind::Speed => {
                        s.player.speed_boost = true;
                        s.player.speed_boost_until = now + boost_secs;
                    }
                    // Same flag and deadline as the manual key; the two
                    // invisibility sources share one timer.
                    PowerKind::Invincibility => {
                        s.player.invisible = true;
                        s.player.invisible_until = now + boost_secs;
                    }
                }
            }
        }

        if s.player.pos == s.exit {
            s.current_level += 1;
            s = start_level(&s, now, rng);
            break;
        }
        if !s.player.invisible && s.enemies.iter().any(|e| e.pos == s.player.pos) {
            s.mode = Mode::GameOver;
            break;
        }
    }
    s
}

// ── Session transitions ──────────────────────────────────────────────────────

/// Back to level 1 with a fresh maze and zero score. Progress persistence is
/// untouched: the shell only writes when the level counter increases.
pub fn restart(state: &GameState, now: f64, rng: &mut impl Rng) -> GameState {
    let mut s = state.clone();
    s.score = 0;
    s.current_level = 1;
    s = start_level(&s, now, rng);
    s.mode = Mode::Playing;
    s.paused = false;
    s
}
