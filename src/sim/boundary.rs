//! Boundary ring and its undeformed snapshot

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::{Frame, after_index, before_index};
use crate::error::{FloeError, Result};

/// The sheet outline: an ordered, closed ring of local-space points plus the
/// shape it regrows toward.
///
/// Point count is fixed at construction. Deformation and regrowth only
/// relocate points.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Boundary {
    pub(crate) points: Vec<Vec2>,
    initial: Vec<Vec2>,
}

impl Boundary {
    /// Build a boundary, snapshotting `points` as the regrowth target
    pub fn new(points: Vec<Vec2>) -> Result<Self> {
        if points.len() < 3 {
            return Err(FloeError::TooFewPoints {
                count: points.len(),
            });
        }
        if let Some(index) = points.iter().position(|p| !p.is_finite()) {
            return Err(FloeError::NonFinitePoint { index });
        }
        let initial = points.clone();
        Ok(Self { points, initial })
    }

    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    /// The undeformed shape
    pub fn initial(&self) -> &[Vec2] {
        &self.initial
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[inline]
    pub fn before(&self, i: usize) -> usize {
        before_index(i, self.points.len())
    }

    #[inline]
    pub fn after(&self, i: usize) -> usize {
        after_index(i, self.points.len())
    }

    /// True when every point sits on its snapshot position
    pub fn is_at_rest(&self) -> bool {
        self.points == self.initial
    }

    /// Largest distance of any point from its snapshot position
    pub fn max_displacement(&self) -> f32 {
        self.points
            .iter()
            .zip(&self.initial)
            .map(|(p, q)| p.distance(*q))
            .fold(0.0, f32::max)
    }

    /// Indices of points whose world position is strictly within `radius` of `origin`
    pub fn indices_in_range(&self, frame: &Frame, origin: Vec2, radius: f32) -> Vec<usize> {
        self.points
            .iter()
            .enumerate()
            .filter(|&(_, &p)| frame.local_to_world(p).distance(origin) < radius)
            .map(|(i, _)| i)
            .collect()
    }

    /// Current ring in world space
    pub fn world_points(&self, frame: &Frame) -> Vec<Vec2> {
        frame.ring_to_world(&self.points)
    }

    /// Points and snapshot together, for regrowth
    pub(crate) fn split_mut(&mut self) -> (&mut [Vec2], &[Vec2]) {
        (&mut self.points, &self.initial)
    }
}
