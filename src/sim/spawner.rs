//! Obstacle, collectible and decoration spawning
//!
//! Both gates are measured in session seconds since they last fired, not in
//! ticks. A gate that has never fired opens on the first tick.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::entity::{Collectible, Decoration, EntityIds, Obstacle, ObstacleKind};
use crate::consts::{FIELD_WIDTH, GROUND_Y};
use crate::tuning::Tuning;

/// Decorations enter slightly past the right edge
const DECORATION_MARGIN: f32 = 50.0;

/// Entities produced by one spawner step
#[derive(Debug, Default)]
pub struct Spawned {
    pub obstacle: Option<Obstacle>,
    pub collectible: Option<Collectible>,
    pub decoration: Option<Decoration>,
}

/// Spawn gate timers
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Spawner {
    last_obstacle: Option<f64>,
    last_decoration: Option<f64>,
}

fn gate_open(last: Option<f64>, now: f64, interval: f64) -> bool {
    last.is_none_or(|t| now - t > interval)
}

impl Spawner {
    /// Fire whichever gates are due at `now`; new entities carry `speed`
    pub fn maybe_spawn<R: Rng>(
        &mut self,
        now: f64,
        speed: f32,
        rng: &mut R,
        ids: &mut EntityIds,
        tuning: &Tuning,
    ) -> Spawned {
        let mut spawned = Spawned::default();

        if gate_open(self.last_obstacle, now, tuning.obstacle_interval_secs) {
            self.last_obstacle = Some(now);
            spawned.obstacle = Some(spawn_obstacle(speed, rng, ids, tuning));
            if rng.random::<f32>() < tuning.collectible_chance {
                let rise = tuning.collectible_rise.sample(rng);
                let pos = Vec2::new(FIELD_WIDTH, GROUND_Y - rise);
                spawned.collectible = Some(Collectible::new(ids.next_id(), pos, speed));
            }
        }

        if gate_open(self.last_decoration, now, tuning.decoration_interval_secs) {
            self.last_decoration = Some(now);
            spawned.decoration = Some(spawn_decoration(speed, rng, tuning));
        }

        spawned
    }
}

/// Weighted draw over the three obstacle kinds
pub fn pick_kind<R: Rng>(rng: &mut R, tuning: &Tuning) -> ObstacleKind {
    let box_w = tuning.box_shape.weight.max(0.0);
    let spike_w = tuning.spike_shape.weight.max(0.0);
    let total = box_w + spike_w + tuning.tall_shape.weight.max(0.0);
    if total <= 0.0 {
        return ObstacleKind::Box;
    }

    let roll = rng.random::<f32>() * total;
    if roll < box_w {
        ObstacleKind::Box
    } else if roll < box_w + spike_w {
        ObstacleKind::Spike
    } else {
        ObstacleKind::Tall
    }
}

fn spawn_obstacle<R: Rng>(
    speed: f32,
    rng: &mut R,
    ids: &mut EntityIds,
    tuning: &Tuning,
) -> Obstacle {
    let kind = pick_kind(rng, tuning);
    let shape = match kind {
        ObstacleKind::Box => &tuning.box_shape,
        ObstacleKind::Spike => &tuning.spike_shape,
        ObstacleKind::Tall => &tuning.tall_shape,
    };
    let height = shape.height.sample(rng);
    Obstacle::new(ids.next_id(), kind, FIELD_WIDTH, shape.width, height, speed)
}

fn spawn_decoration<R: Rng>(speed: f32, rng: &mut R, tuning: &Tuning) -> Decoration {
    let y = tuning.decoration_y.sample(rng);
    let w = tuning.decoration_width.sample(rng);
    let h = tuning.decoration_height.sample(rng);
    Decoration {
        pos: Vec2::new(FIELD_WIDTH + DECORATION_MARGIN, y),
        size: Vec2::new(w, h),
        speed: speed * tuning.decoration_parallax,
    }
}
