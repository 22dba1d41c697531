//! Scrolling entities and their bounding boxes
//!
//! Positions are screen-relative with y growing downward. Every scrolling
//! entity freezes its speed when spawned.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{COLLECTIBLE_SIZE, GROUND_Y};

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    /// Top-left corner
    pub min: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    /// Strict overlap: boxes that only share an edge do not collide
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        let (a_max, b_max) = (self.max(), other.max());
        self.min.x < b_max.x && a_max.x > other.min.x && self.min.y < b_max.y && a_max.y > other.min.y
    }

    /// Entirely past the left edge of the field
    #[inline]
    pub fn is_off_left(&self) -> bool {
        self.max().x < 0.0
    }
}

/// Monotonic entity ID source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityIds {
    next: u32,
}

impl Default for EntityIds {
    fn default() -> Self {
        Self { next: 1 }
    }
}

impl EntityIds {
    pub fn next_id(&mut self) -> u32 {
        let id = self.next;
        self.next += 1;
        id
    }
}

/// Obstacle types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObstacleKind {
    Box,
    /// Releases a reward burst the first time it is hit
    Spike,
    Tall,
}

/// A ground obstacle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub kind: ObstacleKind,
    /// Left edge
    pub x: f32,
    pub width: f32,
    pub height: f32,
    /// Scroll speed captured at spawn
    pub speed: f32,
    /// Reward burst already released (spikes only)
    pub triggered: bool,
}

impl Obstacle {
    pub fn new(id: u32, kind: ObstacleKind, x: f32, width: f32, height: f32, speed: f32) -> Self {
        Self {
            id,
            kind,
            x,
            width,
            height,
            speed,
            triggered: false,
        }
    }

    /// Standing on the ground line
    pub fn bounding_box(&self) -> Aabb {
        Aabb::new(self.x, GROUND_Y - self.height, self.width, self.height)
    }

    pub fn advance(&mut self) {
        self.x -= self.speed;
    }

    /// Where a reward burst is released: spike tip, centred
    pub fn top_center(&self) -> Vec2 {
        Vec2::new(self.x + (self.width / 2.0).floor(), GROUND_Y - self.height)
    }
}

/// A bonus item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collectible {
    pub id: u32,
    /// Left edge, vertical centre
    pub pos: Vec2,
    pub speed: f32,
}

impl Collectible {
    pub fn new(id: u32, pos: Vec2, speed: f32) -> Self {
        Self { id, pos, speed }
    }

    pub fn bounding_box(&self) -> Aabb {
        let half = COLLECTIBLE_SIZE / 2.0;
        Aabb::new(self.pos.x, self.pos.y - half, COLLECTIBLE_SIZE, COLLECTIBLE_SIZE)
    }

    pub fn advance(&mut self) {
        self.pos.x -= self.speed;
    }
}

/// Cosmetic background element, never collides
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Decoration {
    pub pos: Vec2,
    pub size: Vec2,
    /// Already scaled by parallax
    pub speed: f32,
}

impl Decoration {
    pub fn advance(&mut self) {
        self.pos.x -= self.speed;
    }

    pub fn is_off_left(&self) -> bool {
        self.pos.x + self.size.x < 0.0
    }
}
