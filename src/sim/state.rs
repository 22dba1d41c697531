//! Game session state and core simulation types
//!
//! A `GameSession` owns everything that changes during a run. Nothing here is
//! process-wide; the best-distance record lives outside in `highscores`.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::entity::{Collectible, Decoration, EntityIds, Obstacle, ObstacleKind};
use super::physics::{Appearance, Player};
use super::spawner::Spawner;
use crate::tuning::Tuning;

/// Whether the session still accepts ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    Active,
    /// Lives exhausted; `advance` is a no-op until `reset`
    Over,
}

/// Something notable that happened during a tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    ObstacleHit { kind: ObstacleKind },
    RewardBurst { count: usize },
    CollectiblePicked,
    SpeedTierChanged { speed: f32 },
    SessionOver { distance: f32, pickups: u32 },
}

/// Counters for the current run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionStats {
    pub lives: u8,
    /// Cumulative, never decreases within a session
    pub distance: f32,
    pub pickups: u32,
    /// Real seconds since the session started
    pub elapsed: f64,
    /// Current scroll speed, derived from `distance`
    pub speed: f32,
}

impl SessionStats {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            lives: tuning.start_lives,
            distance: 0.0,
            pickups: 0,
            elapsed: 0.0,
            speed: tuning.difficulty.speed_at(0.0),
        }
    }
}

/// Complete state of one run
#[derive(Debug, Clone)]
pub struct GameSession {
    pub(crate) tuning: Tuning,
    pub(crate) rng: Pcg32,
    pub(crate) ids: EntityIds,
    pub(crate) player: Player,
    /// In spawn order
    pub(crate) obstacles: Vec<Obstacle>,
    pub(crate) collectibles: Vec<Collectible>,
    pub(crate) decorations: Vec<Decoration>,
    pub(crate) stats: SessionStats,
    pub(crate) spawner: Spawner,
    pub(crate) phase: SessionPhase,
    pub(crate) events: Vec<GameEvent>,
}

impl GameSession {
    /// Create a session with the given seed, ready to play
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        let stats = SessionStats::new(&tuning);
        Self {
            rng: Pcg32::seed_from_u64(seed),
            ids: EntityIds::default(),
            player: Player::new(Appearance::default()),
            obstacles: Vec::new(),
            collectibles: Vec::new(),
            decorations: Vec::new(),
            stats,
            spawner: Spawner::default(),
            phase: SessionPhase::Active,
            events: Vec::new(),
            tuning,
        }
    }

    /// Start a fresh run with the chosen appearance
    ///
    /// The RNG keeps its stream, so consecutive runs differ while the whole
    /// sequence stays reproducible from the seed.
    pub fn reset(&mut self, appearance: Appearance) {
        self.ids = EntityIds::default();
        self.player = Player::new(appearance);
        self.obstacles.clear();
        self.collectibles.clear();
        self.decorations.clear();
        self.stats = SessionStats::new(&self.tuning);
        self.spawner = Spawner::default();
        self.phase = SessionPhase::Active;
        self.events.clear();
        log::info!("Session started ({})", appearance.as_str());
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn collectibles(&self) -> &[Collectible] {
        &self.collectibles
    }

    pub fn decorations(&self) -> &[Decoration] {
        &self.decorations
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn is_over(&self) -> bool {
        self.phase == SessionPhase::Over
    }

    /// Take the events produced since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{GROUND_Y, START_LIVES};

    #[test]
    fn test_new_session_defaults() {
        let session = GameSession::new(1, Tuning::default());
        assert_eq!(session.stats().lives, START_LIVES);
        assert_eq!(session.stats().distance, 0.0);
        assert_eq!(session.stats().speed, 5.0);
        assert_eq!(session.phase(), SessionPhase::Active);
        assert!(session.player().grounded);
        assert_eq!(session.player().y, GROUND_Y);
    }

    #[test]
    fn test_reset_restores_start_values() {
        let mut session = GameSession::new(1, Tuning::default());
        session.stats.lives = 0;
        session.stats.distance = 321.0;
        session.stats.pickups = 9;
        session.stats.elapsed = 40.0;
        session.stats.speed = 10.0;
        session.phase = SessionPhase::Over;
        session.player.make_invincible(39.5);
        session
            .obstacles
            .push(Obstacle::new(1, ObstacleKind::Box, 10.0, 40.0, 50.0, 10.0));
        session.events.push(GameEvent::CollectiblePicked);

        session.reset(Appearance::Other);

        assert_eq!(session.stats(), &SessionStats::new(&Tuning::default()));
        assert_eq!(session.phase(), SessionPhase::Active);
        assert!(session.obstacles().is_empty());
        assert!(!session.player().is_invincible());
        assert_eq!(session.player().appearance, Appearance::Other);
        assert!(session.drain_events().is_empty());
    }

    #[test]
    fn test_start_lives_from_tuning() {
        let tuning = Tuning {
            start_lives: 1,
            ..Default::default()
        };
        let session = GameSession::new(1, tuning);
        assert_eq!(session.stats().lives, 1);
    }
}
