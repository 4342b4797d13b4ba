//! Keyboard intent → ship velocity and fire requests.
//!
//! The presenter maps raw key codes onto [`Key`]; anything it does not
//! recognise never reaches this module.

use crate::entities::{spawn_bullet, GameState};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Fire,
}

#[derive(Clone, Debug, PartialEq)]
pub struct InputState {
    ship_speed: f64,
    dx: f64,
    fire_held: bool,
    /// Presses not yet turned into bullets.
    pending_shots: u32,
}

impl InputState {
    pub fn new(ship_speed: f64) -> Self {
        InputState {
            ship_speed,
            dx: 0.0,
            fire_held: false,
            pending_shots: 0,
        }
    }

    /// Current horizontal velocity: `-ship_speed`, `0` or `+ship_speed`.
    pub fn velocity(&self) -> f64 {
        self.dx
    }

    pub fn pending_shots(&self) -> u32 {
        self.pending_shots
    }

    pub fn on_key_down(&mut self, key: Key) {
        match key {
            Key::Left => self.dx = -self.ship_speed,
            Key::Right => self.dx = self.ship_speed,
            Key::Fire => {
                // Repeats while held do not fire again.
                if !self.fire_held {
                    self.fire_held = true;
                    self.pending_shots += 1;
                }
            }
        }
    }

    pub fn on_key_up(&mut self, key: Key) {
        match key {
            Key::Left | Key::Right => self.dx = 0.0,
            Key::Fire => self.fire_held = false,
        }
    }

    /// Push the current intent into the world: set the ship's velocity and
    /// spawn one bullet per queued press.  Queued presses are consumed even
    /// when the game is already over, but a finished game is left untouched.
    pub fn apply(&mut self, state: &GameState) -> GameState {
        let shots = std::mem::take(&mut self.pending_shots);
        if state.is_over() {
            return state.clone();
        }

        let mut next = state.clone();
        next.ship.dx = self.dx;
        for _ in 0..shots {
            next.bullets
                .push(spawn_bullet(&next.ship, next.bullet_width, next.bullet_height));
        }
        next
    }
}
