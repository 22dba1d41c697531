//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - One `advance` per frame, driven by the caller
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod difficulty;
pub mod entity;
pub mod physics;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::{Hit, collect, resolve_obstacles, reward_burst};
pub use difficulty::{DifficultyCurve, SpeedTier};
pub use entity::{Aabb, Collectible, Decoration, Obstacle, ObstacleKind};
pub use physics::{Appearance, Player};
pub use spawner::Spawner;
pub use state::{GameEvent, GameSession, SessionPhase, SessionStats};
pub use tick::TickResult;
