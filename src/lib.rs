//! Chaser - A side-scrolling jump-and-collect arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, spawning, collisions, scoring)
//! - `tuning`: Data-driven game balance
//! - `highscores`: Best-distance record and its storage backends
//! - `setup`: Player setup form validation
//! - `app`: Login / Playing / Result screen state machine

pub mod app;
pub mod highscores;
pub mod setup;
pub mod sim;
pub mod tuning;

pub use app::{App, FrameInput, Screen, SessionSummary};
pub use highscores::{BestDistance, RecordError, RecordStore};
pub use setup::{PlayerProfile, SetupError, SetupForm};
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation rate (one tick per rendered frame)
    pub const TICK_RATE: u32 = 60;
    /// Nominal real time per tick
    pub const SIM_DT: f64 = 1.0 / TICK_RATE as f64;

    /// Play field dimensions
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 800.0;
    /// Ground line (screen-relative, y grows downward)
    pub const GROUND_Y: f32 = 650.0;

    /// Player defaults
    pub const PLAYER_X: f32 = 150.0;
    pub const START_LIVES: u8 = 3;
    /// Gravity (units/tick²)
    pub const GRAVITY: f32 = 1.1;
    /// Jump impulse (units/tick, negative is up)
    pub const JUMP_IMPULSE: f32 = -20.0;
    /// Invincibility after a hit (real seconds)
    pub const INVINCIBILITY_SECS: f64 = 1.0;

    /// Spawn gates (real seconds between fires)
    pub const OBSTACLE_INTERVAL_SECS: f64 = 1.5;
    pub const DECORATION_INTERVAL_SECS: f64 = 3.0;

    /// Collectible box edge
    pub const COLLECTIBLE_SIZE: f32 = 24.0;

    /// Distance accrued per tick per unit of scroll speed
    pub const DISTANCE_PER_SPEED: f32 = 0.05;
}
