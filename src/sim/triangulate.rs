//! Polygon triangulation via earcut
//!
//! Re-run after every change to the boundary. Output indices refer to the
//! input point order; triangles wind counter-clockwise.

use earcutr::earcut;
use glam::Vec2;

use crate::error::{FloeError, Result};

/// Triangulate a simple polygon into a flat index list (3 per triangle).
///
/// A ring earcut cannot handle is logged and yields no triangles; the
/// boundary itself is still valid and the next remesh may succeed.
pub fn triangulate(points: &[Vec2]) -> Result<Vec<u32>> {
    let n = points.len();
    if n < 3 {
        return Err(FloeError::TooFewPoints { count: n });
    }

    let coords: Vec<f64> = points
        .iter()
        .flat_map(|p| [f64::from(p.x), f64::from(p.y)])
        .collect();
    let idx = match earcut(&coords, &[], 2) {
        Ok(idx) => idx,
        Err(e) => {
            log::warn!("Triangulation of {} points failed: {:?}", n, e);
            return Ok(Vec::new());
        }
    };

    let mut indices = Vec::with_capacity(idx.len());
    for tri in idx.chunks_exact(3) {
        let (a, b, c) = (tri[0], tri[1], tri[2]);
        // earcut does not promise a winding
        if (points[b] - points[a]).perp_dot(points[c] - points[a]) < 0.0 {
            indices.extend([a as u32, c as u32, b as u32]);
        } else {
            indices.extend([a as u32, b as u32, c as u32]);
        }
    }
    Ok(indices)
}
