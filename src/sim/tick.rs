//! Per-frame simulation tick
//!
//! Order within a tick: jump → physics → spawn → decorations → obstacles
//! (hits) → collectibles (pickups) → cleanup → distance → speed → terminal
//! check. Spawn gates and invincibility run on accumulated real time; distance
//! accrues per tick.

use serde::{Deserialize, Serialize};

use super::collision::{collect, resolve_obstacles, reward_burst};
use super::state::{GameEvent, GameSession, SessionPhase};

/// Snapshot returned by every `advance`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TickResult {
    pub lives: u8,
    pub distance: f32,
    pub pickups: u32,
    pub elapsed_seconds: f64,
    pub is_over: bool,
}

impl GameSession {
    /// Advance the session by one frame
    ///
    /// `dt` is the real time since the previous frame. Jumping while airborne
    /// and advancing a finished session are silent no-ops.
    pub fn advance(&mut self, dt: f64, jump: bool) -> TickResult {
        if self.phase == SessionPhase::Over {
            return self.result();
        }

        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        self.stats.elapsed += dt;
        let now = self.stats.elapsed;
        let speed = self.stats.speed;

        if jump {
            self.player.jump(&self.tuning);
        }
        self.player.update(now, &self.tuning);

        // Spawn
        let spawned = self
            .spawner
            .maybe_spawn(now, speed, &mut self.rng, &mut self.ids, &self.tuning);
        self.obstacles.extend(spawned.obstacle);
        self.collectibles.extend(spawned.collectible);
        self.decorations.extend(spawned.decoration);

        // Parallax background
        for deco in self.decorations.iter_mut() {
            deco.advance();
        }
        self.decorations.retain(|d| !d.is_off_left());

        // Obstacles
        for obs in self.obstacles.iter_mut() {
            obs.advance();
        }
        if let Some(hit) = resolve_obstacles(&mut self.player, &mut self.obstacles, now) {
            self.stats.lives = self.stats.lives.saturating_sub(1);
            log::debug!("Hit {:?}, {} lives left", hit.kind, self.stats.lives);
            self.events.push(GameEvent::ObstacleHit { kind: hit.kind });

            if let Some(origin) = hit.burst_origin {
                let burst = reward_burst(origin, speed, &mut self.rng, &mut self.ids, &self.tuning);
                log::debug!("Spike {} released {} collectibles", hit.obstacle_id, burst.len());
                self.events.push(GameEvent::RewardBurst { count: burst.len() });
                self.collectibles.extend(burst);
            }
        }

        // Collectibles
        for col in self.collectibles.iter_mut() {
            col.advance();
        }
        let picked = collect(&self.player, &mut self.collectibles);
        self.stats.pickups += picked;
        self.events
            .extend((0..picked).map(|_| GameEvent::CollectiblePicked));

        // Cleanup
        self.obstacles.retain(|o| !o.bounding_box().is_off_left());
        self.collectibles.retain(|c| !c.bounding_box().is_off_left());

        // Progression
        self.stats.distance += speed * self.tuning.distance_per_speed;
        let new_speed = self.tuning.difficulty.speed_at(self.stats.distance);
        if new_speed != speed {
            log::debug!(
                "Speed {} → {} at distance {:.1}",
                speed,
                new_speed,
                self.stats.distance
            );
            self.events
                .push(GameEvent::SpeedTierChanged { speed: new_speed });
        }
        self.stats.speed = new_speed;

        if self.stats.lives == 0 {
            self.phase = SessionPhase::Over;
            log::info!(
                "Session over: distance {:.0}, pickups {}, {:.1}s",
                self.stats.distance,
                self.stats.pickups,
                self.stats.elapsed
            );
            self.events.push(GameEvent::SessionOver {
                distance: self.stats.distance,
                pickups: self.stats.pickups,
            });
        }

        self.result()
    }

    /// Current snapshot without advancing
    pub fn result(&self) -> TickResult {
        TickResult {
            lives: self.stats.lives,
            distance: self.stats.distance,
            pickups: self.stats.pickups,
            elapsed_seconds: self.stats.elapsed,
            is_over: self.phase == SessionPhase::Over,
        }
    }
}
