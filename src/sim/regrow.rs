//! Regrowth toward the undeformed shape

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::boundary::Boundary;
use crate::consts::{REGROW_JITTER_MAX, REGROW_JITTER_MIN};
use crate::move_towards;
use crate::settings::IceConfig;

/// Range of the per-point, per-tick regrowth distance
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegrowJitter {
    pub min: f32,
    pub max: f32,
}

impl Default for RegrowJitter {
    fn default() -> Self {
        Self {
            min: REGROW_JITTER_MIN,
            max: REGROW_JITTER_MAX,
        }
    }
}

impl From<&IceConfig> for RegrowJitter {
    fn from(config: &IceConfig) -> Self {
        Self {
            min: config.regrow_jitter_min,
            max: config.regrow_jitter_max,
        }
    }
}

/// Nudge every displaced point toward its snapshot position by an
/// independent random distance from `jitter`. Never overshoots.
///
/// Returns the number of points that were off their snapshot position.
pub fn regrow<R: Rng>(boundary: &mut Boundary, rng: &mut R, jitter: RegrowJitter) -> usize {
    let (points, initial) = boundary.split_mut();
    let mut displaced = 0;
    for (point, &target) in points.iter_mut().zip(initial) {
        if *point != target {
            let step = rng.random_range(jitter.min..=jitter.max);
            *point = move_towards(*point, target, step);
            displaced += 1;
        }
    }
    displaced
}
