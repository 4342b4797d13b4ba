//! Pure game-logic functions.
//!
//! Every public function takes an immutable reference to the current
//! `GameState` and returns a brand-new `GameState`.  Nothing here reads a
//! clock, touches the terminal, or draws randomness, so a sequence of ticks
//! replays exactly.

use log::{debug, info};

use crate::config::GameConfig;
use crate::entities::{create_enemy_grid, Direction, GameState, GameStatus, Ship};
use crate::geometry::intersects;

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build the initial world for a (validated) configuration.
pub fn init_state(config: &GameConfig) -> GameState {
    let ship = Ship {
        x: config.canvas_width / 2.0 - config.ship_width / 2.0,
        y: config.canvas_height - config.ship_height - config.ship_margin,
        width: config.ship_width,
        height: config.ship_height,
        dx: 0.0,
    };
    let enemies = create_enemy_grid(
        config.enemy_rows,
        config.enemy_cols,
        config.enemy_width,
        config.enemy_height,
        config.enemy_padding,
        config.enemy_offset_left,
        config.enemy_offset_top,
    );

    info!(
        "new game: {}x{} enemies on a {}x{} playfield",
        enemies.rows(),
        enemies.cols(),
        config.canvas_width,
        config.canvas_height
    );

    GameState {
        ship,
        bullets: Vec::new(),
        enemies,
        enemy_speed: config.enemy_speed,
        direction: Direction::Right,
        score: 0,
        status: GameStatus::Running,
        frame: 0,
        width: config.canvas_width,
        height: config.canvas_height,
        bullet_speed: config.bullet_speed,
        bullet_width: config.bullet_width,
        bullet_height: config.bullet_height,
    }
}

// ── Per-frame tick ───────────────────────────────────────────────────────────

/// Advance the simulation by one frame.
///
/// Phases run in a fixed order: ship, bullets, then the enemy scan (movement,
/// boundary flip, ship collision, bullet collision).  A game-over state is
/// returned unchanged.
pub fn tick(state: &GameState) -> GameState {
    if state.is_over() {
        return state.clone();
    }

    let mut next = state.clone();
    move_ship(&mut next);
    move_bullets(&mut next);
    move_enemies(&mut next);
    next.frame += 1;
    next
}

// ── 1. Ship ──────────────────────────────────────────────────────────────────

fn move_ship(state: &mut GameState) {
    let max_x = state.width - state.ship.width;
    state.ship.x = (state.ship.x + state.ship.dx).max(0.0).min(max_x);
}

// ── 2. Bullets ───────────────────────────────────────────────────────────────

fn move_bullets(state: &mut GameState) {
    let speed = state.bullet_speed;
    for bullet in &mut state.bullets {
        bullet.y -= speed;
    }
    state.bullets.retain(|b| b.y >= 0.0);
}

// ── 3. Enemies ───────────────────────────────────────────────────────────────

/// Row-major scan over the grid.
///
/// The first live enemy that crosses a side wall flips the shared direction,
/// drops the whole grid by one cell and ends the scan for this tick; enemies
/// after it (and its own collision checks) wait until the next tick.
fn move_enemies(state: &mut GameState) {
    let step = state.enemy_speed * state.direction.sign();
    let rows = state.enemies.rows();
    let cols = state.enemies.cols();

    for row in 0..rows {
        for col in 0..cols {
            let Some(enemy) = state.enemies.get_mut(row, col) else {
                continue;
            };
            if !enemy.alive {
                continue;
            }

            enemy.x += step;

            if enemy.x + enemy.width > state.width || enemy.x < 0.0 {
                state.direction = state.direction.flipped();
                drop_enemies(state);
                debug!(
                    "frame {}: enemy ({row}, {col}) hit the wall, heading {:?}",
                    state.frame, state.direction
                );
                return;
            }

            let enemy_rect = enemy.rect();

            if intersects(&enemy_rect, &state.ship.rect())
                && state.status != GameStatus::GameOver
            {
                info!("game over: enemy ({row}, {col}) reached the ship");
                state.status = GameStatus::GameOver;
            }

            if let Some(hit) = state
                .bullets
                .iter()
                .position(|b| intersects(&enemy_rect, &b.rect()))
            {
                enemy.alive = false;
                state.bullets.remove(hit);
                state.score += 1;
                debug!("enemy ({row}, {col}) destroyed, score {}", state.score);

                if state.score == state.winning_score() {
                    info!("game over: grid cleared with score {}", state.score);
                    state.status = GameStatus::GameOver;
                }
            }
        }
    }
}

fn drop_enemies(state: &mut GameState) {
    let drop = state.enemies.cell_height;
    for enemy in state.enemies.iter_mut() {
        enemy.y += drop;
    }
}
