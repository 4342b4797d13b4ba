//! One frame at a time: apply input, simulate, render.
//!
//! Timing and event polling belong to the host (the terminal front end);
//! this module owns the ordering within a frame and the terminal state.

use std::collections::HashMap;

use crate::compute::{init_state, tick};
use crate::config::GameConfig;
use crate::entities::GameState;
use crate::input::{InputState, Key};

/// Anything that can draw a read-only snapshot of the world.
pub trait Render {
    fn render(&mut self, state: &GameState) -> std::io::Result<()>;
}

/// Whether the host should keep scheduling simulation frames.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Terminal,
}

#[derive(Clone, Debug)]
pub struct GameLoop {
    config: GameConfig,
    state: GameState,
    input: InputState,
}

impl GameLoop {
    pub fn new(config: GameConfig) -> Self {
        let state = init_state(&config);
        let input = InputState::new(config.ship_speed);
        GameLoop {
            config,
            state,
            input,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    pub fn key_down(&mut self, key: Key) {
        self.input.on_key_down(key);
    }

    pub fn key_up(&mut self, key: Key) {
        self.input.on_key_up(key);
    }

    /// Throw the current game away and start over with the same config.
    pub fn restart(&mut self) {
        *self = GameLoop::new(self.config.clone());
    }

    /// Run one frame.
    ///
    /// Input lands before the tick that follows it.  Once the game is over
    /// the world is only re-rendered, never advanced.
    pub fn frame<R: Render>(&mut self, out: &mut R) -> std::io::Result<Flow> {
        if !self.state.is_over() {
            let with_input = self.input.apply(&self.state);
            self.state = tick(&with_input);
        }

        out.render(&self.state)?;

        Ok(if self.state.is_over() {
            Flow::Terminal
        } else {
            Flow::Continue
        })
    }
}

/// Turns raw terminal key events into `key_down`/`key_up` calls.
///
/// Terminals with keyboard enhancement report real releases, which are
/// forwarded as they arrive and nothing ever expires.  Classic terminals only
/// report presses (auto-repeat included), so:
///
/// - every Fire press is a fresh press: the trigger is released and pulled
///   again, giving one shot per press;
/// - the direction key currently steering the ship is released once it has
///   been silent for more than `hold_window` frames.  A stale key that no
///   longer steers is forgotten without touching the velocity.
#[derive(Clone, Debug)]
pub struct KeyTracker {
    hold_window: u64,
    release_events: bool,
    last_seen: HashMap<Key, u64>,
    steering: Option<Key>,
}

impl KeyTracker {
    pub fn new(hold_window: u64, release_events: bool) -> Self {
        KeyTracker {
            hold_window,
            release_events,
            last_seen: HashMap::new(),
            steering: None,
        }
    }

    /// The direction key whose velocity the ship currently carries.
    pub fn steering(&self) -> Option<Key> {
        self.steering
    }

    /// A press or auto-repeat of `key` seen on `frame`.
    pub fn press(&mut self, game: &mut GameLoop, key: Key, frame: u64) {
        match key {
            Key::Fire => {
                if !self.release_events {
                    game.key_up(Key::Fire);
                }
            }
            Key::Left | Key::Right => {
                self.steering = Some(key);
                self.last_seen.insert(key, frame);
            }
        }
        game.key_down(key);
    }

    /// A key-release event; only enhanced terminals send these.
    pub fn release(&mut self, game: &mut GameLoop, key: Key) {
        self.last_seen.remove(&key);
        if self.steering == Some(key) {
            self.steering = None;
        }
        game.key_up(key);
    }

    /// Release the steering key if it has gone quiet; classic terminals only.
    pub fn expire(&mut self, game: &mut GameLoop, frame: u64) {
        if self.release_events {
            return;
        }
        let window = self.hold_window;
        self.last_seen
            .retain(|_, last| frame.saturating_sub(*last) <= window);

        if let Some(key) = self.steering {
            if !self.last_seen.contains_key(&key) {
                self.steering = None;
                game.key_up(key);
            }
        }
    }

    /// Forget everything, e.g. when a new game starts.
    pub fn clear(&mut self) {
        self.last_seen.clear();
        self.steering = None;
    }
}
