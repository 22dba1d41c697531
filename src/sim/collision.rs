//! Collision resolution between the player and scrolling entities
//!
//! Obstacles are tested in spawn order. The first overlap while vulnerable
//! opens the invincibility window, so every later overlap in the same tick
//! (and for the rest of the window) is harmless. Obstacles are never removed
//! by a hit.

use glam::Vec2;
use rand::Rng;

use super::entity::{Collectible, EntityIds, Obstacle, ObstacleKind};
use super::physics::Player;
use crate::tuning::Tuning;

/// Distance between a spike tip and the lowest burst collectible
const BURST_LIFT: f32 = 20.0;

/// A life-losing obstacle hit
#[derive(Debug, Clone, PartialEq)]
pub struct Hit {
    pub obstacle_id: u32,
    pub kind: ObstacleKind,
    /// Set when this hit released a spike's reward burst
    pub burst_origin: Option<Vec2>,
}

/// Test the player against every obstacle; returns the hit, if any
pub fn resolve_obstacles(player: &mut Player, obstacles: &mut [Obstacle], now: f64) -> Option<Hit> {
    let player_box = player.bounding_box();
    let mut hit = None;

    for obs in obstacles.iter_mut() {
        if player.is_invincible() {
            break;
        }
        if !obs.bounding_box().overlaps(&player_box) {
            continue;
        }

        player.make_invincible(now);

        let mut burst_origin = None;
        if obs.kind == ObstacleKind::Spike && !obs.triggered {
            obs.triggered = true;
            burst_origin = Some(obs.top_center());
        }

        hit = Some(Hit {
            obstacle_id: obs.id,
            kind: obs.kind,
            burst_origin,
        });
    }

    hit
}

/// Collectibles released above a spike, stacked upward
pub fn reward_burst<R: Rng>(
    origin: Vec2,
    speed: f32,
    rng: &mut R,
    ids: &mut EntityIds,
    tuning: &Tuning,
) -> Vec<Collectible> {
    let count = tuning.reward_burst.sample(rng) as usize;
    (0..count)
        .map(|i| {
            let y = origin.y - BURST_LIFT - i as f32 * tuning.burst_stack_offset;
            Collectible::new(ids.next_id(), Vec2::new(origin.x, y), speed)
        })
        .collect()
}

/// Remove every collectible overlapping the player; returns how many
pub fn collect(player: &Player, collectibles: &mut Vec<Collectible>) -> u32 {
    let player_box = player.bounding_box();
    let before = collectibles.len();
    collectibles.retain(|c| !c.bounding_box().overlaps(&player_box));
    (before - collectibles.len()) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::GROUND_Y;
    use crate::sim::physics::Appearance;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    /// Obstacle whose box overlaps a grounded player standing at x = 150
    fn obstacle_on_player(id: u32, kind: ObstacleKind) -> Obstacle {
        Obstacle::new(id, kind, 140.0, 25.0, 60.0, 5.0)
    }

    #[test]
    fn test_hit_opens_invincibility() {
        let mut player = Player::new(Appearance::Male);
        let mut obstacles = vec![obstacle_on_player(1, ObstacleKind::Box)];
        let hit = resolve_obstacles(&mut player, &mut obstacles, 2.0).unwrap();
        assert_eq!(hit.obstacle_id, 1);
        assert_eq!(hit.burst_origin, None);
        assert_eq!(player.invincible_since, Some(2.0));
    }

    #[test]
    fn test_one_hit_per_window_across_obstacles() {
        let mut player = Player::new(Appearance::Male);
        let mut obstacles = vec![
            obstacle_on_player(1, ObstacleKind::Box),
            obstacle_on_player(2, ObstacleKind::Spike),
        ];
        let hit = resolve_obstacles(&mut player, &mut obstacles, 0.0).unwrap();
        assert_eq!(hit.obstacle_id, 1);
        // Second overlapping spike was shielded and keeps its burst
        assert!(!obstacles[1].triggered);
        assert!(resolve_obstacles(&mut player, &mut obstacles, 0.5).is_none());
    }

    #[test]
    fn test_spike_bursts_once() {
        let mut player = Player::new(Appearance::Female);
        let mut obstacles = vec![obstacle_on_player(7, ObstacleKind::Spike)];

        let hit = resolve_obstacles(&mut player, &mut obstacles, 0.0).unwrap();
        assert_eq!(hit.burst_origin, Some(Vec2::new(152.0, GROUND_Y - 60.0)));
        assert!(obstacles[0].triggered);

        // Window expires while still overlapping: life lost again, no burst
        player.invincible_since = None;
        let hit = resolve_obstacles(&mut player, &mut obstacles, 1.5).unwrap();
        assert_eq!(hit.kind, ObstacleKind::Spike);
        assert_eq!(hit.burst_origin, None);
    }

    #[test]
    fn test_no_overlap_no_hit() {
        let mut player = Player::new(Appearance::Male);
        let mut obstacles = vec![Obstacle::new(1, ObstacleKind::Tall, 600.0, 40.0, 90.0, 5.0)];
        assert!(resolve_obstacles(&mut player, &mut obstacles, 0.0).is_none());
        assert!(!player.is_invincible());
    }

    #[test]
    fn test_jump_clears_low_obstacle() {
        let mut player = Player::new(Appearance::Male);
        player.y = GROUND_Y - 70.0;
        player.grounded = false;
        let mut obstacles = vec![obstacle_on_player(1, ObstacleKind::Box)];
        assert!(resolve_obstacles(&mut player, &mut obstacles, 0.0).is_none());
    }

    #[test]
    fn test_reward_burst_layout() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(3);
        let mut ids = EntityIds::default();
        let origin = Vec2::new(312.0, GROUND_Y - 60.0);
        for _ in 0..100 {
            let burst = reward_burst(origin, 7.0, &mut rng, &mut ids, &tuning);
            assert!((1..=3).contains(&burst.len()));
            for (i, c) in burst.iter().enumerate() {
                assert_eq!(c.pos.x, 312.0);
                assert_eq!(c.pos.y, origin.y - 20.0 - i as f32 * 14.0);
                assert_eq!(c.speed, 7.0);
            }
        }
    }

    #[test]
    fn test_collect_removes_and_counts_once() {
        let player = Player::new(Appearance::Male);
        let mut collectibles = vec![
            Collectible::new(1, Vec2::new(140.0, GROUND_Y - 40.0), 5.0),
            Collectible::new(2, Vec2::new(150.0, GROUND_Y - 20.0), 5.0),
            Collectible::new(3, Vec2::new(500.0, GROUND_Y - 150.0), 5.0),
        ];
        assert_eq!(collect(&player, &mut collectibles), 2);
        assert_eq!(collectibles.len(), 1);
        assert_eq!(collectibles[0].id, 3);
        // Already removed, nothing to count again
        assert_eq!(collect(&player, &mut collectibles), 0);
    }
}
