//! Floe - a destructible, self-healing 2D ice sheet
//!
//! Core modules:
//! - `sim`: Deterministic simulation (boundary, deformation, regrowth, tick)
//! - `mesh`: Triangulated mesh handed to the renderer
//! - `settings`: Load-time configuration
//! - `error`: Error types

pub mod error;
pub mod mesh;
pub mod settings;
pub mod sim;

pub use error::{FloeError, Result};
pub use mesh::{Mesh, MeshVertex};
pub use settings::IceConfig;

use glam::Vec2;

/// Simulation configuration constants
pub mod consts {
    /// Bounding box extent below which the sheet is disabled (either axis)
    pub const MIN_EXTENT: f32 = 0.3;
    /// Default spacing target for edge subdivision
    pub const SUBDIVISION_INTERVAL: f32 = 0.2;
    /// Vertex angles below this (degrees) get flattened
    pub const ANGLE_THRESHOLD_DEG: f32 = 90.0;
    /// Step used when pulling an acute vertex onto its neighbours' midpoint.
    /// Far larger than any edge, so one step lands on the midpoint.
    pub const FLATTEN_STEP: f32 = 100.0;
    /// Flattening may not shrink the ring below this share of its area
    pub const MIN_AREA_RATIO: f32 = 0.01;
    /// Regrowth distance per point per tick is drawn from [MIN, MAX]
    pub const REGROW_JITTER_MIN: f32 = 0.0;
    pub const REGROW_JITTER_MAX: f32 = 0.01;
    /// Hard cap on boundary size after subdivision
    pub const MAX_POINTS: usize = 65_536;
    /// Distances below this count as coincident
    pub const EPSILON: f32 = 1e-6;
}

/// Move `current` toward `target` by at most `max_distance`, never overshooting
#[inline]
pub fn move_towards(current: Vec2, target: Vec2, max_distance: f32) -> Vec2 {
    let delta = target - current;
    let dist = delta.length();
    if dist <= max_distance || dist == 0.0 {
        target
    } else {
        current + delta / dist * max_distance
    }
}

/// Rotate a vector 90 degrees counter-clockwise
#[inline]
pub fn rotate90(v: Vec2) -> Vec2 {
    Vec2::new(-v.y, v.x)
}

/// Unsigned angle in degrees between two vectors, [0, 180]
#[inline]
pub fn angle_between_deg(a: Vec2, b: Vec2) -> f32 {
    let denom = (a.length_squared() * b.length_squared()).sqrt();
    if denom < consts::EPSILON * consts::EPSILON {
        return 0.0;
    }
    (a.dot(b) / denom).clamp(-1.0, 1.0).acos().to_degrees()
}
