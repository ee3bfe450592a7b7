use pixel_maze::entities::*;

#[test]
fn dir_deltas_are_unit_steps() {
    assert_eq!(Dir::Up.delta(), (0, -1));
    assert_eq!(Dir::Down.delta(), (0, 1));
    assert_eq!(Dir::Left.delta(), (-1, 0));
    assert_eq!(Dir::Right.delta(), (1, 0));
}

#[test]
fn pos_equality_and_ordering() {
    assert_eq!(Pos::new(3, 4), Pos::new(3, 4));
    assert_ne!(Pos::new(3, 4), Pos::new(4, 3));
    // Ordering is total, so heap entries keyed on Pos tie-break deterministically.
    assert!(Pos::new(1, 1) < Pos::new(2, 0));
}

#[test]
fn default_config_values() {
    let cfg = Config::default();
    assert_eq!(cfg.maze_rows, 21);
    assert_eq!(cfg.maze_cols, 21);
    assert_eq!(cfg.level_time, 60.0);
    assert_eq!(cfg.enemy_move_interval, 0.5);
    assert_eq!(cfg.collectible_count, 4);
    assert_eq!(cfg.collectible_score, 10);
    assert_eq!(cfg.powerup_duration, 5.0);
    assert_eq!(cfg.manual_invisibility, 3.0);
    assert_eq!(cfg.exit_min_distance, 8);
}

#[test]
fn menu_has_three_options() {
    assert_eq!(MENU_OPTIONS.len(), 3);
    assert_eq!(MENU_OPTIONS[0], "Start Game");
}

#[test]
fn cloned_player_is_independent() {
    let player = Player {
        pos: Pos::new(1, 1),
        invisible: false,
        invisible_until: 0.0,
        speed_boost: false,
        speed_boost_until: 0.0,
    };
    let mut copy = player.clone();
    copy.pos = Pos::new(5, 5);
    copy.invisible = true;
    assert_eq!(player.pos, Pos::new(1, 1));
    assert!(!player.invisible);
}

#[test]
fn cloned_enemy_keeps_its_own_patrol_state() {
    let enemy = Enemy {
        pos: Pos::new(2, 2),
        kind: EnemyKind::Patrol,
        path: Vec::new(),
        path_index: 0,
        speed: 1.0,
        last_move_time: 0.0,
        patrol: Some(PatrolState {
            waypoints: vec![Pos::new(2, 2), Pos::new(6, 2)],
            index: 0,
            forward: true,
            wait_time: 1.0,
            reached_at: None,
        }),
    };
    let mut copy = enemy.clone();
    copy.patrol.as_mut().unwrap().index = 1;
    assert_eq!(enemy.patrol.as_ref().unwrap().index, 0);
}
