//! Player vertical motion and invincibility timer

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::Aabb;
use crate::consts::{FIELD_WIDTH, GROUND_Y, PLAYER_X};
use crate::tuning::Tuning;

/// Appearance picked on the setup screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Appearance {
    #[default]
    Male,
    Female,
    Other,
}

impl Appearance {
    pub const ALL: [Appearance; 3] = [Appearance::Male, Appearance::Female, Appearance::Other];

    pub fn as_str(&self) -> &'static str {
        match self {
            Appearance::Male => "Male",
            Appearance::Female => "Female",
            Appearance::Other => "Other",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "male" => Some(Appearance::Male),
            "female" => Some(Appearance::Female),
            "other" => Some(Appearance::Other),
            _ => None,
        }
    }

    /// Rendered footprint (width, height) standing on the ground
    pub fn idle_size(&self) -> Vec2 {
        match self {
            Appearance::Male => Vec2::new(50.0, 80.0),
            Appearance::Female => Vec2::new(50.0, 78.0),
            Appearance::Other => Vec2::new(50.0, 76.0),
        }
    }

    /// Rendered footprint (width, height) while airborne
    pub fn jump_size(&self) -> Vec2 {
        match self {
            Appearance::Male => Vec2::new(50.0, 72.0),
            Appearance::Female => Vec2::new(50.0, 70.0),
            Appearance::Other => Vec2::new(50.0, 68.0),
        }
    }
}

/// The player character
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Horizontal centre (fixed)
    pub x: f32,
    /// Feet; equals `GROUND_Y` when grounded
    pub y: f32,
    pub vel_y: f32,
    pub grounded: bool,
    /// Session time the current invincibility window started
    pub invincible_since: Option<f64>,
    pub appearance: Appearance,
}

impl Player {
    pub fn new(appearance: Appearance) -> Self {
        Self {
            x: PLAYER_X,
            y: GROUND_Y,
            vel_y: 0.0,
            grounded: true,
            invincible_since: None,
            appearance,
        }
    }

    pub fn is_invincible(&self) -> bool {
        self.invincible_since.is_some()
    }

    /// Start a fresh invincibility window
    pub fn make_invincible(&mut self, now: f64) {
        self.invincible_since = Some(now);
    }

    /// Jump if standing; ignored while airborne
    pub fn jump(&mut self, tuning: &Tuning) -> bool {
        if !self.grounded {
            return false;
        }
        self.vel_y = tuning.jump_impulse;
        self.grounded = false;
        true
    }

    /// One tick of gravity, ground clamp and invincibility expiry
    pub fn update(&mut self, now: f64, tuning: &Tuning) {
        self.vel_y += tuning.gravity;
        self.y += self.vel_y;

        if self.y >= GROUND_Y {
            self.y = GROUND_Y;
            self.vel_y = 0.0;
            self.grounded = true;
        }

        // Wall-clock window, independent of tick rate
        if let Some(since) = self.invincible_since {
            if now - since > tuning.invincibility_secs {
                self.invincible_since = None;
            }
        }
    }

    /// Current pose footprint (idle or jump)
    pub fn pose_size(&self) -> Vec2 {
        if self.grounded {
            self.appearance.idle_size()
        } else {
            self.appearance.jump_size()
        }
    }

    /// Hit box matching the rendered pose: feet on `y`, centred on `x`,
    /// clamped inside the field
    pub fn bounding_box(&self) -> Aabb {
        let size = self.pose_size();
        let left = (self.x - (size.x / 2.0).floor()).clamp(0.0, FIELD_WIDTH - size.x);
        let top = (self.y - size.y).max(0.0);
        Aabb::new(left, top, size.x, size.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jump_only_when_grounded() {
        let tuning = Tuning::default();
        let mut player = Player::new(Appearance::Male);
        assert!(player.jump(&tuning));
        assert_eq!(player.vel_y, -20.0);
        assert!(!player.grounded);

        // Mid-air jump is a no-op
        player.update(0.0, &tuning);
        let vel = player.vel_y;
        assert!(!player.jump(&tuning));
        assert_eq!(player.vel_y, vel);
    }

    #[test]
    fn test_gravity_integration() {
        let tuning = Tuning::default();
        let mut player = Player::new(Appearance::Female);
        player.jump(&tuning);
        player.update(0.0, &tuning);
        assert!((player.vel_y - (-18.9)).abs() < 1e-4);
        assert!((player.y - (GROUND_Y - 18.9)).abs() < 1e-3);
    }

    #[test]
    fn test_lands_and_clamps() {
        let tuning = Tuning::default();
        let mut player = Player::new(Appearance::Other);
        player.jump(&tuning);
        let mut ticks = 0;
        loop {
            player.update(0.0, &tuning);
            ticks += 1;
            assert!(player.y <= GROUND_Y);
            if player.grounded {
                break;
            }
            assert!(ticks < 100, "player never landed");
        }
        assert_eq!(player.y, GROUND_Y);
        assert_eq!(player.vel_y, 0.0);
        // Roughly 2 * 20 / 1.1 ticks of flight
        assert!((35..=38).contains(&ticks));
    }

    #[test]
    fn test_grounded_update_stays_put() {
        let tuning = Tuning::default();
        let mut player = Player::new(Appearance::Male);
        for _ in 0..10 {
            player.update(0.0, &tuning);
        }
        assert!(player.grounded);
        assert_eq!(player.y, GROUND_Y);
    }

    #[test]
    fn test_invincibility_uses_wall_clock() {
        let tuning = Tuning::default();
        let mut player = Player::new(Appearance::Male);
        player.make_invincible(10.0);

        player.update(10.999, &tuning);
        assert!(player.is_invincible());
        player.update(11.001, &tuning);
        assert!(!player.is_invincible());
    }

    #[test]
    fn test_bounding_box_follows_pose() {
        let tuning = Tuning::default();
        let mut player = Player::new(Appearance::Male);
        let idle = player.bounding_box();
        assert_eq!(idle.size, Vec2::new(50.0, 80.0));
        assert_eq!(idle.min, Vec2::new(125.0, GROUND_Y - 80.0));
        assert_eq!(idle.max().y, GROUND_Y);

        player.jump(&tuning);
        player.update(0.0, &tuning);
        let air = player.bounding_box();
        assert_eq!(air.size, Vec2::new(50.0, 72.0));
        assert!((air.max().y - player.y).abs() < 1e-3);
    }

    #[test]
    fn test_bounding_box_clamped_to_field() {
        let mut player = Player::new(Appearance::Male);
        player.y = 30.0;
        assert_eq!(player.bounding_box().min.y, 0.0);
        player.x = 5.0;
        assert_eq!(player.bounding_box().min.x, 0.0);
    }

    #[test]
    fn test_appearance_names() {
        for a in Appearance::ALL {
            assert_eq!(Appearance::from_str(a.as_str()), Some(a));
        }
        assert_eq!(Appearance::from_str("robot"), None);
    }
}
