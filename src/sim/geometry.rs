//! Geometry queries over a closed ring of points
//!
//! Containment, bounds and frame conversion. All queries are pure.

use glam::{Affine2, Vec2};
use serde::{Deserialize, Serialize};

use crate::angle_between_deg;
use crate::consts::EPSILON;

/// Local-to-world transform of the sheet's owner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    local_to_world: Affine2,
}

impl Default for Frame {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Frame {
    pub const IDENTITY: Self = Self {
        local_to_world: Affine2::IDENTITY,
    };

    pub fn new(local_to_world: Affine2) -> Self {
        Self { local_to_world }
    }

    /// Frame positioned at `translation`, rotated by `angle` radians
    pub fn from_translation_angle(translation: Vec2, angle: f32) -> Self {
        Self::new(Affine2::from_angle_translation(angle, translation))
    }

    #[inline]
    pub fn local_to_world(&self, p: Vec2) -> Vec2 {
        self.local_to_world.transform_point2(p)
    }

    #[inline]
    pub fn world_to_local(&self, p: Vec2) -> Vec2 {
        self.local_to_world.inverse().transform_point2(p)
    }

    /// Whole ring converted to world space
    pub fn ring_to_world(&self, points: &[Vec2]) -> Vec<Vec2> {
        points.iter().map(|&p| self.local_to_world(p)).collect()
    }
}

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl Bounds {
    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    /// True if either axis is narrower than `min_extent`
    pub fn is_smaller_than(&self, min_extent: f32) -> bool {
        self.width() < min_extent || self.height() < min_extent
    }
}

/// Bounding box of a ring; `None` if empty
pub fn bounding_box(points: &[Vec2]) -> Option<Bounds> {
    let (&first, rest) = points.split_first()?;
    let (min, max) = rest
        .iter()
        .fold((first, first), |(min, max), &p| (min.min(p), max.max(p)));
    Some(Bounds { min, max })
}

/// Even-odd containment test (ray casting toward +X)
pub fn point_inside(points: &[Vec2], p: Vec2) -> bool {
    if points.len() < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = points.len() - 1;
    for i in 0..points.len() {
        let (a, b) = (points[i], points[j]);
        if (a.y > p.y) != (b.y > p.y) {
            let x_cross = (b.x - a.x) * (p.y - a.y) / (b.y - a.y) + a.x;
            if p.x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Twice the signed area; positive for counter-clockwise rings
pub fn signed_area2(points: &[Vec2]) -> f32 {
    let n = points.len();
    (0..n)
        .map(|i| points[(i + n - 1) % n].perp_dot(points[i]))
        .sum()
}

/// Angle at `point` between the arms to its two neighbours, in degrees.
///
/// A zero-length arm counts as flat (180) so a vertex sitting on a
/// neighbour never reads as acute.
pub fn vertex_angle(point: Vec2, before: Vec2, after: Vec2) -> f32 {
    let a = before - point;
    let b = after - point;
    if a.length_squared() < EPSILON * EPSILON || b.length_squared() < EPSILON * EPSILON {
        return 180.0;
    }
    angle_between_deg(a, b)
}

/// Index of the point before `i` on a ring of `len` points
#[inline]
pub fn before_index(i: usize, len: usize) -> usize {
    if i == 0 { len - 1 } else { i - 1 }
}

/// Index of the point after `i` on a ring of `len` points
#[inline]
pub fn after_index(i: usize, len: usize) -> usize {
    if i + 1 == len { 0 } else { i + 1 }
}
