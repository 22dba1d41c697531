//! Demo-mode player
//!
//! Jumps when the nearest obstacle ahead is about to reach the player, timed
//! so the flight arc's high section spans the overlap.

use super::state::GameSession;

/// Ticks between take-off and the obstacle reaching the player
const LEAD_TICKS: f32 = 8.0;

/// Decide whether to jump this tick
pub fn should_jump(session: &GameSession) -> bool {
    let player = session.player();
    if !player.grounded || session.is_over() {
        return false;
    }

    let front = player.bounding_box().max().x;
    session
        .obstacles()
        .iter()
        .map(|obs| (obs.x - front, obs.speed))
        .filter(|(gap, _)| *gap >= 0.0)
        .min_by(|a, b| a.0.total_cmp(&b.0))
        .is_some_and(|(gap, speed)| gap <= speed * LEAD_TICKS)
}
