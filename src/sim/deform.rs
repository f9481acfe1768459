//! Heat deformation
//!
//! A heat event pushes nearby boundary points along the local edge normal,
//! keeping only moves that land inside the pre-event shape, then flattens
//! any acute corners the moves left behind.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::angles::{AngleLimits, flatten_angles};
use super::boundary::Boundary;
use super::geometry::{Frame, point_inside};
use crate::error::Result;
use crate::rotate90;

/// An external heat stimulus, in world space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeatEvent {
    /// Centre of the effect
    pub origin: Vec2,
    /// Points strictly closer than this are affected
    pub radius: f32,
    /// How far each affected point is pushed
    pub displacement: f32,
}

impl HeatEvent {
    pub fn new(origin: Vec2, radius: f32, displacement: f32) -> Self {
        Self {
            origin,
            radius,
            displacement,
        }
    }

    /// Zero or negative radius/displacement has no effect
    pub fn is_effective(&self) -> bool {
        self.origin.is_finite()
            && self.radius.is_finite()
            && self.displacement.is_finite()
            && self.radius > 0.0
            && self.displacement > 0.0
    }
}

/// What a heat event did to the boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HeatOutcome {
    /// Points within range of the origin
    pub selected: usize,
    /// Selected points that were displaced
    pub moved: usize,
    /// Vertices pulled straight by angle correction
    pub flattened: usize,
}

/// Displace selected points inward, then flatten acute angles.
///
/// Returns `None` for an ineffective event, which leaves the boundary
/// untouched. An event that selects nothing still returns an outcome.
pub fn apply_heat(
    boundary: &mut Boundary,
    frame: &Frame,
    event: &HeatEvent,
    limits: AngleLimits,
) -> Result<Option<HeatOutcome>> {
    if !event.is_effective() {
        log::debug!("Ignoring ineffective heat event {:?}", event);
        return Ok(None);
    }

    let selected = boundary.indices_in_range(frame, event.origin, event.radius);
    if selected.is_empty() {
        return Ok(Some(HeatOutcome::default()));
    }

    let moved = displace(boundary, frame, &selected, event.displacement);
    let flattened = flatten_angles(&mut boundary.points, frame, limits)?;

    let outcome = HeatOutcome {
        selected: selected.len(),
        moved,
        flattened,
    };
    log::debug!("Heat at {:?}: {:?}", event.origin, outcome);
    Ok(Some(outcome))
}

/// Move each selected point by `distance` along the normal of the chord
/// between its neighbours.
///
/// Neighbours and the containment test use the shape as it was before this
/// call. A move is kept only if it lands inside that shape; the opposite
/// direction is tried next; otherwise the point stays. Returns the number of
/// points moved.
pub fn displace(boundary: &mut Boundary, frame: &Frame, selected: &[usize], distance: f32) -> usize {
    let world = boundary.world_points(frame);
    let mut moved = 0;

    for &i in selected {
        let point = world[i];
        let offset = world[boundary.before(i)] - world[boundary.after(i)];
        let direction = rotate90(offset).normalize_or_zero();
        if direction == Vec2::ZERO {
            continue;
        }

        let accepted = [direction, -direction]
            .into_iter()
            .map(|d| point + d * distance)
            .find(|&candidate| point_inside(&world, candidate));

        if let Some(candidate) = accepted {
            boundary.points[i] = frame.world_to_local(candidate);
            moved += 1;
        }
    }
    moved
}
