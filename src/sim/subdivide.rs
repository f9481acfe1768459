//! Edge subdivision
//!
//! The walk step along an edge is `interval / edge_length`, used as an
//! absolute distance. Long edges therefore get a finer step and many more
//! points than short ones; an edge no longer than its step keeps only its
//! start point.

use glam::Vec2;

use crate::consts::EPSILON;
use crate::error::{FloeError, Result};
use crate::move_towards;

/// Step distance used when walking an edge of length `edge_length`
#[inline]
pub fn edge_step(interval: f32, edge_length: f32) -> f32 {
    interval / edge_length
}

/// Insert points along every edge of a closed ring.
///
/// Each edge contributes its start point and the positions stepped toward
/// its end while more than one step remains. The end point comes from the
/// next edge. Zero-length edges contribute nothing.
///
/// This differs from a bare `while distance(current, end) > step` walk,
/// which would drop the start of any edge no longer than one step; here
/// every corner of the input survives.
pub fn subdivide(points: &[Vec2], interval: f32, max_points: usize) -> Result<Vec<Vec2>> {
    if !(interval.is_finite() && interval > 0.0) {
        return Err(FloeError::InvalidInterval(interval));
    }
    if points.len() < 3 {
        return Err(FloeError::TooFewPoints {
            count: points.len(),
        });
    }

    let mut out = Vec::with_capacity(points.len());
    for (i, &start) in points.iter().enumerate() {
        let end = points[(i + 1) % points.len()];
        let length = start.distance(end);
        if length < EPSILON {
            continue;
        }

        let step = edge_step(interval, length);
        let mut current = start;
        let mut remaining = length;
        loop {
            if out.len() >= max_points {
                return Err(FloeError::SubdivisionTooDense { max: max_points });
            }
            out.push(current);
            let next = move_towards(current, end, step);
            let next_remaining = next.distance(end);
            // f32 rounding can stall the walk on very long edges
            if next_remaining <= step || next_remaining >= remaining {
                break;
            }
            current = next;
            remaining = next_remaining;
        }
    }

    if out.len() < 3 {
        return Err(FloeError::TooFewPoints { count: out.len() });
    }
    log::debug!("Subdivided {} points into {}", points.len(), out.len());
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(side: f32) -> Vec<Vec2> {
        vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(side, 0.0),
            Vec2::new(side, side),
            Vec2::new(0.0, side),
        ]
    }

    #[test]
    fn test_square_side_10_interval_1() {
        let pts = subdivide(&square(10.0), 1.0, 100_000).unwrap();
        assert!(pts.len() > 4);

        // Step on every edge is 1 / 10 = 0.1
        let step = edge_step(1.0, 10.0);
        let bottom: Vec<_> = pts.iter().filter(|p| p.y == 0.0).collect();
        assert!(bottom.len() > 2);
        for pair in bottom.windows(2) {
            assert!(pair[0].distance(*pair[1]) <= step + 1e-4);
        }
    }

    #[test]
    fn test_corners_are_preserved_in_order() {
        let sq = square(10.0);
        let pts = subdivide(&sq, 1.0, 100_000).unwrap();
        let positions: Vec<_> = sq
            .iter()
            .map(|c| pts.iter().position(|p| p == c).unwrap())
            .collect();
        assert_eq!(positions[0], 0);
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_short_edges_keep_only_start() {
        // interval larger than length^2: step exceeds the edge
        let pts = subdivide(&square(1.0), 2.0, 1000).unwrap();
        assert_eq!(pts, square(1.0));
    }

    #[test]
    fn test_zero_length_edge_is_dropped() {
        let mut pts = square(1.0);
        pts.insert(1, Vec2::new(0.0, 0.0));
        let out = subdivide(&pts, 2.0, 1000).unwrap();
        assert_eq!(out, square(1.0));
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(matches!(
            subdivide(&square(1.0), 0.0, 1000),
            Err(FloeError::InvalidInterval(_))
        ));
        assert!(matches!(
            subdivide(&square(1.0)[..2], 0.5, 1000),
            Err(FloeError::TooFewPoints { count: 2 })
        ));
        assert!(matches!(
            subdivide(&square(100.0), 0.01, 1000),
            Err(FloeError::SubdivisionTooDense { max: 1000 })
        ));
    }
}
