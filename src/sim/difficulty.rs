//! Difficulty curve: cumulative distance → scroll speed tier

use serde::{Deserialize, Serialize};

/// Speed applied once distance strictly exceeds `above`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpeedTier {
    pub above: f32,
    pub speed: f32,
}

/// Stepwise, non-decreasing map from distance to scroll speed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DifficultyCurve {
    /// Speed before the first tier is reached
    pub base_speed: f32,
    pub tiers: Vec<SpeedTier>,
}

impl Default for DifficultyCurve {
    fn default() -> Self {
        Self {
            base_speed: 5.0,
            tiers: vec![
                SpeedTier {
                    above: 150.0,
                    speed: 7.0,
                },
                SpeedTier {
                    above: 300.0,
                    speed: 10.0,
                },
            ],
        }
    }
}

impl DifficultyCurve {
    /// Scroll speed for a given cumulative distance
    ///
    /// Every tier whose threshold has been passed contributes, and the
    /// fastest one wins, so a badly ordered table still never slows down.
    pub fn speed_at(&self, distance: f32) -> f32 {
        self.tiers
            .iter()
            .filter(|tier| distance > tier.above)
            .fold(self.base_speed, |speed, tier| speed.max(tier.speed))
    }
}
