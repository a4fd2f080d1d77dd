//! Off-screen geometry for move-in / move-out effects.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::components::visual::Pose;

/// Window edge an entity enters from or leaves through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Edge {
    /// Whichever edge is closest to the entity's resting place.
    #[default]
    Nearest,
    Left,
    Right,
    Top,
    Bottom,
}

impl Edge {
    /// Resolve `Nearest` against the entity's resting bounds.
    /// Ties go left, then right, then top.
    pub fn resolve(self, pose: &Pose, window: Vec2) -> Edge {
        if self != Edge::Nearest {
            return self;
        }
        let center = pose.resting_center();
        let candidates = [
            (Edge::Left, center.x),
            (Edge::Right, window.x - center.x),
            (Edge::Top, center.y),
            (Edge::Bottom, window.y - center.y),
        ];
        candidates
            .into_iter()
            .fold((Edge::Left, f32::INFINITY), |best, (edge, distance)| {
                if distance < best.1 { (edge, distance) } else { best }
            })
            .0
    }
}

/// Offset from the resting position that puts the entity just outside the
/// window through `edge`.
///
/// `resting` is the centre of the entity's bounds and `half` its half
/// extent, both in window coordinates. Only the axis of the edge is
/// non-zero. `Nearest` must be resolved first and yields no offset.
pub fn offscreen_offset(edge: Edge, half: Vec2, resting: Vec2, window: Vec2) -> Vec2 {
    match edge {
        Edge::Left => Vec2::new(-(half.x + resting.x), 0.0),
        Edge::Right => Vec2::new(window.x - resting.x + half.x, 0.0),
        Edge::Top => Vec2::new(0.0, -(half.y + resting.y)),
        Edge::Bottom => Vec2::new(0.0, window.y - resting.y + half.y),
        Edge::Nearest => Vec2::ZERO,
    }
}

/// Resolve `edge` and compute its offset for an entity pose.
pub fn offset_for(edge: Edge, pose: &Pose, window: Vec2) -> Vec2 {
    offscreen_offset(
        edge.resolve(pose, window),
        pose.half_extent(),
        pose.resting_center(),
        window,
    )
}
