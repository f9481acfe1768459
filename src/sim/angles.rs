//! Acute angle flattening
//!
//! Keeps the ring simple after deformation: any vertex whose angle to its
//! neighbours is below the threshold is pulled onto their midpoint.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::{Frame, after_index, before_index, signed_area2, vertex_angle};
use crate::consts::{ANGLE_THRESHOLD_DEG, EPSILON, FLATTEN_STEP, MIN_AREA_RATIO};
use crate::error::{FloeError, Result};
use crate::move_towards;
use crate::settings::IceConfig;

/// Angles within this many degrees of the threshold count as meeting it
pub const ANGLE_TOLERANCE_DEG: f32 = 1e-3;

/// Threshold below which a vertex counts as acute
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AngleLimits {
    pub threshold_deg: f32,
}

impl Default for AngleLimits {
    fn default() -> Self {
        Self {
            threshold_deg: ANGLE_THRESHOLD_DEG,
        }
    }
}

impl From<&IceConfig> for AngleLimits {
    fn from(config: &IceConfig) -> Self {
        Self {
            threshold_deg: config.angle_threshold_deg,
        }
    }
}

impl AngleLimits {
    #[inline]
    fn is_acute(&self, angle: f32) -> bool {
        angle < self.threshold_deg - ANGLE_TOLERANCE_DEG
    }
}

/// What a pass did at one vertex
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VertexFix {
    #[default]
    Kept,
    /// Pulled toward its neighbours' midpoint
    Flattened,
    /// Acute, but flattening would have collapsed the ring
    Refused,
}

/// Flatten acute vertices of a local-space ring, measuring in world space.
///
/// Runs a single [`flatten_pass`]. Only flattened points are written back.
/// Returns the number of flattened vertices.
pub fn flatten_angles(points: &mut [Vec2], frame: &Frame, limits: AngleLimits) -> Result<usize> {
    if points.len() < 3 {
        return Err(FloeError::TooFewPoints {
            count: points.len(),
        });
    }

    let mut world = frame.ring_to_world(points);
    let mut fixes = vec![VertexFix::Kept; points.len()];
    let flattened = flatten_pass(&mut world, limits, &mut fixes);

    let mut refused = 0;
    for (i, fix) in fixes.iter().enumerate() {
        match fix {
            VertexFix::Flattened => points[i] = frame.world_to_local(world[i]),
            VertexFix::Refused => refused += 1,
            VertexFix::Kept => {}
        }
    }
    if refused > 0 {
        log::debug!("{} acute vertices left in place to keep the ring open", refused);
    }
    Ok(flattened)
}

/// One walk of the ring: index 0, then backwards through n-1 down to 1.
///
/// A vertex is only moved if it stays clear of both neighbours and the ring
/// keeps its orientation with at least [`MIN_AREA_RATIO`] of the area it had
/// when the pass started. Afterwards every vertex meets the threshold unless
/// it is marked [`VertexFix::Refused`] or a neighbour was flattened after it
/// was visited (the previous index, or either neighbour of index 0).
///
/// Records the fix per index in `fixes` and returns how many were flattened.
pub fn flatten_pass(
    world: &mut [Vec2],
    limits: AngleLimits,
    fixes: &mut [VertexFix],
) -> usize {
    let n = world.len();
    let start_area = signed_area2(world);
    let orientation = start_area.signum();
    let min_area = start_area.abs() * MIN_AREA_RATIO;
    let mut area = start_area;
    let mut flattened = 0;
    let mut i = 0;

    for _ in 0..n {
        let before = world[before_index(i, n)];
        let after = world[after_index(i, n)];
        if let Some(target) = flattened_position(world[i], before, after, limits) {
            // Only the two edges at `i` change
            let next_area = area - before.perp_dot(world[i]) - world[i].perp_dot(after)
                + before.perp_dot(target)
                + target.perp_dot(after);
            let clear = target.distance_squared(before) > EPSILON * EPSILON
                && target.distance_squared(after) > EPSILON * EPSILON;
            if clear && next_area * orientation >= min_area && min_area > 0.0 {
                world[i] = target;
                area = next_area;
                fixes[i] = VertexFix::Flattened;
                flattened += 1;
            } else {
                fixes[i] = VertexFix::Refused;
            }
        }
        i = before_index(i, n);
    }
    flattened
}

/// New position for an acute vertex, or `None` if it already meets the threshold
fn flattened_position(
    mut point: Vec2,
    before: Vec2,
    after: Vec2,
    limits: AngleLimits,
) -> Option<Vec2> {
    let centre = before.lerp(after, 0.5);
    if !limits.is_acute(vertex_angle(point, before, after)) {
        return None;
    }
    loop {
        point = move_towards(point, centre, FLATTEN_STEP);
        if point.distance_squared(centre) < EPSILON * EPSILON
            || !limits.is_acute(vertex_angle(point, before, after))
        {
            return Some(point);
        }
    }
}
