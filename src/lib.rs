//! Invaders - a minimal grid shooter
//!
//! Core modules:
//! - `geometry`: Axis-aligned rectangle overlap
//! - `entities`: Ship, bullets, enemy grid and the world aggregate
//! - `compute`: Deterministic per-frame simulation step
//! - `input`: Key intent → ship velocity and fire requests
//! - `game_loop`: Input → tick → render ordering for one frame
//! - `config`: Data-driven tuning and playfield bounds

pub mod compute;
pub mod config;
pub mod entities;
pub mod error;
pub mod game_loop;
pub mod geometry;
pub mod input;

pub use config::{ConfigError, GameConfig};
pub use error::{Error, Result};
pub use game_loop::{Flow, GameLoop, KeyTracker, Render};
