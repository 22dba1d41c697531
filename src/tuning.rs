//! Data-driven game balance
//!
//! Every gameplay constant lives here so a run can be re-tuned from a JSON
//! file without rebuilding. Defaults are the reference values in `consts`.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::difficulty::DifficultyCurve;

/// Inclusive integer range used for randomized sizes and offsets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntRange {
    pub min: u16,
    pub max: u16,
}

impl IntRange {
    pub const fn new(min: u16, max: u16) -> Self {
        Self { min, max }
    }

    /// Uniform draw in `[min, max]` (a reversed range collapses to `min`)
    pub fn sample<R: Rng>(&self, rng: &mut R) -> f32 {
        if self.max <= self.min {
            return self.min as f32;
        }
        rng.random_range(self.min..=self.max) as f32
    }

    pub fn contains(&self, value: f32) -> bool {
        value >= self.min as f32 && value <= self.max.max(self.min) as f32
    }
}

/// Width and height policy for one obstacle kind
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObstacleShape {
    /// Relative spawn weight
    pub weight: f32,
    pub width: f32,
    pub height: IntRange,
}

/// Complete balance table for a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Player ===
    pub start_lives: u8,
    pub gravity: f32,
    pub jump_impulse: f32,
    pub invincibility_secs: f64,

    // === Spawning ===
    pub obstacle_interval_secs: f64,
    pub decoration_interval_secs: f64,
    /// Chance that an obstacle fire also spawns a collectible
    pub collectible_chance: f32,
    /// Height above ground for spawned collectibles
    pub collectible_rise: IntRange,
    pub box_shape: ObstacleShape,
    pub spike_shape: ObstacleShape,
    pub tall_shape: ObstacleShape,
    /// Collectibles released the first time a spike is hit
    pub reward_burst: IntRange,
    /// Vertical gap between stacked burst collectibles
    pub burst_stack_offset: f32,

    // === Decorations ===
    pub decoration_y: IntRange,
    pub decoration_width: IntRange,
    pub decoration_height: IntRange,
    /// Fraction of scroll speed (parallax)
    pub decoration_parallax: f32,

    // === Progression ===
    pub distance_per_speed: f32,
    pub difficulty: DifficultyCurve,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            start_lives: START_LIVES,
            gravity: GRAVITY,
            jump_impulse: JUMP_IMPULSE,
            invincibility_secs: INVINCIBILITY_SECS,

            obstacle_interval_secs: OBSTACLE_INTERVAL_SECS,
            decoration_interval_secs: DECORATION_INTERVAL_SECS,
            collectible_chance: 0.8,
            collectible_rise: IntRange::new(120, 180),
            box_shape: ObstacleShape {
                weight: 0.60,
                width: 40.0,
                height: IntRange::new(40, 70),
            },
            spike_shape: ObstacleShape {
                weight: 0.25,
                width: 25.0,
                height: IntRange::new(60, 60),
            },
            tall_shape: ObstacleShape {
                weight: 0.15,
                width: 40.0,
                height: IntRange::new(80, 100),
            },
            reward_burst: IntRange::new(1, 3),
            burst_stack_offset: 14.0,

            decoration_y: IntRange::new(50, 250),
            decoration_width: IntRange::new(60, 100),
            decoration_height: IntRange::new(30, 50),
            decoration_parallax: 0.3,

            distance_per_speed: DISTANCE_PER_SPEED,
            difficulty: DifficultyCurve::default(),
        }
    }
}

/// Why a tuning table was rejected
#[derive(Debug)]
pub enum TuningError {
    Parse(serde_json::Error),
    Invalid(&'static str),
}

impl std::fmt::Display for TuningError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TuningError::Parse(e) => write!(f, "malformed tuning: {}", e),
            TuningError::Invalid(what) => write!(f, "invalid tuning: {}", what),
        }
    }
}

impl std::error::Error for TuningError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TuningError::Parse(e) => Some(e),
            TuningError::Invalid(_) => None,
        }
    }
}

impl From<serde_json::Error> for TuningError {
    fn from(e: serde_json::Error) -> Self {
        TuningError::Parse(e)
    }
}

fn non_negative(v: f32) -> bool {
    v.is_finite() && v >= 0.0
}

impl Tuning {
    /// File consulted by native builds
    #[allow(dead_code)]
    const TUNING_FILE: &'static str = "chaser_tuning.json";

    /// Parse a (possibly partial) tuning table; missing fields keep defaults
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject tables that would break lives, distance or speed bounds
    pub fn validate(&self) -> Result<(), TuningError> {
        if !(1..=START_LIVES).contains(&self.start_lives) {
            return Err(TuningError::Invalid("start_lives must be 1..=3"));
        }
        if !(self.obstacle_interval_secs.is_finite() && self.obstacle_interval_secs > 0.0)
            || !(self.decoration_interval_secs.is_finite() && self.decoration_interval_secs > 0.0)
        {
            return Err(TuningError::Invalid("spawn intervals must be positive"));
        }
        if !(self.invincibility_secs.is_finite() && self.invincibility_secs >= 0.0) {
            return Err(TuningError::Invalid("invincibility_secs must be non-negative"));
        }
        if !non_negative(self.distance_per_speed) {
            return Err(TuningError::Invalid("distance_per_speed must be non-negative"));
        }
        if !non_negative(self.difficulty.base_speed)
            || self.difficulty.tiers.iter().any(|t| !non_negative(t.speed))
        {
            return Err(TuningError::Invalid("scroll speeds must be non-negative"));
        }
        if !(0.0..=1.0).contains(&self.collectible_chance) {
            return Err(TuningError::Invalid("collectible_chance must be within 0..=1"));
        }
        if !self.gravity.is_finite() || !self.jump_impulse.is_finite() {
            return Err(TuningError::Invalid("gravity and jump_impulse must be finite"));
        }
        Ok(())
    }

    /// Load tuning from the working directory (native only)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::load_from(std::path::Path::new(Self::TUNING_FILE))
    }

    /// Load tuning from `path`, falling back to defaults when missing or rejected
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(tuning) => {
                    log::info!("Loaded tuning from {}", path.display());
                    tuning
                }
                Err(e) => {
                    log::warn!("Ignoring {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Using default tuning");
                Self::default()
            }
        }
    }

    /// Web builds always use defaults
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        Self::default()
    }
}
