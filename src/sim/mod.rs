//! Deterministic simulation module
//!
//! All boundary logic lives here. This module must be pure and deterministic:
//! - Explicit tick only, no hidden scheduler
//! - Seeded RNG only
//! - Stable point order (the ring never gains or loses points)
//! - No rendering or platform dependencies

pub mod angles;
pub mod boundary;
pub mod deform;
pub mod geometry;
pub mod regrow;
pub mod state;
pub mod subdivide;
pub mod tick;
pub mod triangulate;

pub use angles::{AngleLimits, VertexFix, flatten_angles};
pub use boundary::Boundary;
pub use deform::{HeatEvent, HeatOutcome, apply_heat};
pub use geometry::{Bounds, Frame, bounding_box, point_inside};
pub use regrow::{RegrowJitter, regrow};
pub use state::{Attachment, IceSheet};
pub use subdivide::subdivide;
pub use tick::{TickInput, TickReport, tick};
pub use triangulate::triangulate;
