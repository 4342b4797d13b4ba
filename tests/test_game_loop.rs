use invaders::config::GameConfig;
use invaders::entities::{GameState, GameStatus};
use invaders::input::Key;
use invaders::{Flow, GameLoop, KeyTracker, Render};

/// Keeps every snapshot it is asked to draw.
#[derive(Default)]
struct Recorder {
    frames: Vec<GameState>,
}

impl Render for Recorder {
    fn render(&mut self, state: &GameState) -> std::io::Result<()> {
        self.frames.push(state.clone());
        Ok(())
    }
}

/// One stationary enemy at 80..110 × 30..60, straight above the ship
/// (80..120 × 170..190) on a 200×200 playfield.
fn duel_config() -> GameConfig {
    GameConfig {
        canvas_width: 200.0,
        canvas_height: 200.0,
        enemy_rows: 1,
        enemy_cols: 1,
        enemy_offset_left: 80.0,
        enemy_speed: 0.0,
        ..GameConfig::default()
    }
}

#[test]
fn frame_renders_the_ticked_state() {
    let mut game = GameLoop::new(duel_config());
    let mut out = Recorder::default();
    assert_eq!(game.frame(&mut out).unwrap(), Flow::Continue);
    assert_eq!(out.frames.len(), 1);
    assert_eq!(&out.frames[0], game.state());
    assert_eq!(game.state().frame, 1);
}

#[test]
fn input_is_applied_before_the_tick() {
    let mut game = GameLoop::new(duel_config());
    let mut out = Recorder::default();
    let start_x = game.state().ship.x;

    game.key_down(Key::Right);
    game.key_down(Key::Fire);
    game.frame(&mut out).unwrap();

    let s = game.state();
    assert_eq!(s.ship.x, start_x + 4.0);
    assert_eq!(s.bullets.len(), 1);
    // Spawned at the ship's top edge, then moved once.
    assert_eq!(s.bullets[0].y, s.ship.y - 2.0);
}

#[test]
fn key_up_stops_the_ship() {
    let mut game = GameLoop::new(duel_config());
    let mut out = Recorder::default();
    game.key_down(Key::Left);
    game.frame(&mut out).unwrap();
    game.key_up(Key::Left);
    game.frame(&mut out).unwrap();
    assert_eq!(out.frames[0].ship.x, out.frames[1].ship.x);
}

#[test]
fn held_fire_shoots_once() {
    let mut game = GameLoop::new(duel_config());
    let mut out = Recorder::default();
    game.key_down(Key::Fire);
    for _ in 0..5 {
        game.key_down(Key::Fire);
        game.frame(&mut out).unwrap();
    }
    assert_eq!(game.state().bullets.len(), 1);
}

#[test]
fn shooting_the_last_enemy_ends_the_loop() {
    let mut game = GameLoop::new(duel_config());
    let mut out = Recorder::default();
    game.key_down(Key::Fire);

    let mut flow = Flow::Continue;
    let mut frames = 0;
    while flow == Flow::Continue && frames < 200 {
        flow = game.frame(&mut out).unwrap();
        frames += 1;
    }

    assert_eq!(flow, Flow::Terminal);
    let s = game.state();
    assert_eq!(s.status, GameStatus::GameOver);
    assert_eq!(s.score, 1);
    assert!(s.bullets.is_empty());
    assert_eq!(out.frames.len(), frames);
}

#[test]
fn finished_game_is_rendered_but_not_advanced() {
    let mut game = GameLoop::new(duel_config());
    let mut out = Recorder::default();
    game.key_down(Key::Fire);
    while game.frame(&mut out).unwrap() == Flow::Continue {}

    let finished = game.state().clone();
    game.key_up(Key::Fire);
    game.key_down(Key::Fire);
    game.key_down(Key::Left);

    assert_eq!(game.frame(&mut out).unwrap(), Flow::Terminal);
    assert_eq!(game.state(), &finished);
    assert_eq!(out.frames.last(), Some(&finished));
}

#[test]
fn restart_begins_a_fresh_game() {
    let mut game = GameLoop::new(duel_config());
    let mut out = Recorder::default();
    game.key_down(Key::Fire);
    while game.frame(&mut out).unwrap() == Flow::Continue {}

    game.restart();

    let s = game.state();
    assert_eq!(s.status, GameStatus::Running);
    assert_eq!(s.score, 0);
    assert_eq!(s.frame, 0);
    assert_eq!(s.enemies.alive_count(), 1);
    assert_eq!(game.input().pending_shots(), 0);
}

// ── KeyTracker ────────────────────────────────────────────────────────────────

const WINDOW: u64 = 8;

#[test]
fn classic_terminal_quick_fire_taps_each_shoot() {
    let mut game = GameLoop::new(duel_config());
    let mut keys = KeyTracker::new(WINDOW, false);

    // Two presses two frames apart, no release events in between.
    keys.press(&mut game, Key::Fire, 1);
    keys.expire(&mut game, 1);
    keys.press(&mut game, Key::Fire, 3);
    keys.expire(&mut game, 3);

    assert_eq!(game.input().pending_shots(), 2);
}

#[test]
fn enhanced_terminal_fire_repeats_shoot_once() {
    let mut game = GameLoop::new(duel_config());
    let mut keys = KeyTracker::new(WINDOW, true);

    for frame in 1..=5 {
        keys.press(&mut game, Key::Fire, frame);
    }
    assert_eq!(game.input().pending_shots(), 1);

    keys.release(&mut game, Key::Fire);
    keys.press(&mut game, Key::Fire, 6);
    assert_eq!(game.input().pending_shots(), 2);
}

#[test]
fn enhanced_terminal_never_expires_held_keys() {
    let mut game = GameLoop::new(duel_config());
    let mut keys = KeyTracker::new(WINDOW, true);

    keys.press(&mut game, Key::Right, 1);
    keys.expire(&mut game, 1 + WINDOW * 10);

    assert_eq!(game.input().velocity(), 4.0);
    assert_eq!(keys.steering(), Some(Key::Right));

    keys.release(&mut game, Key::Right);
    assert_eq!(game.input().velocity(), 0.0);
    assert_eq!(keys.steering(), None);
}

#[test]
fn classic_terminal_steering_key_expires_after_silence() {
    let mut game = GameLoop::new(duel_config());
    let mut keys = KeyTracker::new(WINDOW, false);

    keys.press(&mut game, Key::Left, 1);
    keys.expire(&mut game, 1 + WINDOW);
    assert_eq!(game.input().velocity(), -4.0);

    keys.expire(&mut game, 2 + WINDOW);
    assert_eq!(game.input().velocity(), 0.0);
    assert_eq!(keys.steering(), None);
}

#[test]
fn classic_terminal_repeats_keep_steering_key_alive() {
    let mut game = GameLoop::new(duel_config());
    let mut keys = KeyTracker::new(WINDOW, false);

    for frame in (1..100).step_by(4) {
        keys.press(&mut game, Key::Right, frame);
        keys.expire(&mut game, frame);
    }
    assert_eq!(game.input().velocity(), 4.0);
}

#[test]
fn stale_key_does_not_cancel_the_active_direction() {
    let mut game = GameLoop::new(duel_config());
    let mut keys = KeyTracker::new(WINDOW, false);

    keys.press(&mut game, Key::Left, 1);
    // Switch to Right and keep it refreshed while Left goes stale.
    for frame in (3..=30).step_by(3) {
        keys.press(&mut game, Key::Right, frame);
        keys.expire(&mut game, frame);
    }

    assert_eq!(game.input().velocity(), 4.0);
    assert_eq!(keys.steering(), Some(Key::Right));
}

#[test]
fn clear_forgets_held_keys() {
    let mut game = GameLoop::new(duel_config());
    let mut keys = KeyTracker::new(WINDOW, false);

    keys.press(&mut game, Key::Left, 1);
    keys.clear();
    game.restart();
    keys.expire(&mut game, 100);

    assert_eq!(keys.steering(), None);
    assert_eq!(game.input().velocity(), 0.0);
}

#[test]
fn tracked_fire_taps_reach_the_playfield() {
    let mut game = GameLoop::new(duel_config());
    let mut keys = KeyTracker::new(WINDOW, false);
    let mut out = Recorder::default();

    keys.press(&mut game, Key::Fire, 1);
    game.frame(&mut out).unwrap();
    keys.press(&mut game, Key::Fire, 2);
    game.frame(&mut out).unwrap();

    assert_eq!(game.state().bullets.len(), 2);
}
