//! Ice sheet configuration
//!
//! Load-time only; a running sheet never re-reads its config.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{FloeError, Result};

/// Per-sheet configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IceConfig {
    // === Setup ===
    /// Insert extra points along each edge before taking the snapshot
    pub subdivide: bool,
    /// Spacing target for subdivision (> 0)
    pub subdivision_interval: f32,
    /// Hard cap on boundary size after subdivision
    pub max_points: usize,

    // === Regrowth ===
    /// Whether displaced points drift back to their original positions
    pub regrows: bool,
    /// Smallest per-tick regrowth distance
    pub regrow_jitter_min: f32,
    /// Largest per-tick regrowth distance
    pub regrow_jitter_max: f32,
    /// Seed for the regrowth jitter RNG
    pub seed: u64,

    // === Shape validity ===
    /// Bounding box extent below which the sheet is disabled
    pub min_extent: f32,
    /// Vertex angles below this (degrees) get flattened
    pub angle_threshold_deg: f32,
}

impl Default for IceConfig {
    fn default() -> Self {
        Self {
            subdivide: false,
            subdivision_interval: SUBDIVISION_INTERVAL,
            max_points: MAX_POINTS,

            regrows: true,
            regrow_jitter_min: REGROW_JITTER_MIN,
            regrow_jitter_max: REGROW_JITTER_MAX,
            seed: 0,

            min_extent: MIN_EXTENT,
            angle_threshold_deg: ANGLE_THRESHOLD_DEG,
        }
    }
}

impl IceConfig {
    /// Default config with extra subdivision at the given interval
    pub fn subdivided(interval: f32) -> Self {
        Self {
            subdivide: true,
            subdivision_interval: interval,
            ..Self::default()
        }
    }

    /// Same config with a different RNG seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Check every field is in range
    pub fn validate(&self) -> Result<()> {
        if !(self.subdivision_interval.is_finite() && self.subdivision_interval > 0.0) {
            return Err(FloeError::InvalidInterval(self.subdivision_interval));
        }
        if self.max_points < 3 {
            return Err(FloeError::InvalidConfig(format!(
                "max_points must be at least 3, got {}",
                self.max_points
            )));
        }
        check_jitter(self.regrow_jitter_min, self.regrow_jitter_max)
            .map_err(FloeError::InvalidConfig)?;
        check_min_extent(self.min_extent).map_err(FloeError::InvalidConfig)?;
        check_angle_threshold(self.angle_threshold_deg).map_err(FloeError::InvalidConfig)?;
        Ok(())
    }

    /// Parse and validate a JSON config; missing fields take defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded ice config from {}", path.display());
        Ok(config)
    }

    /// Save as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), json)?;
        log::info!("Ice config saved to {}", path.as_ref().display());
        Ok(())
    }
}

/// Regrowth range must be non-negative, ordered, and able to make progress
pub(crate) fn check_jitter(min: f32, max: f32) -> std::result::Result<(), String> {
    if !(min.is_finite() && max.is_finite()) || min < 0.0 || min > max || max <= 0.0 {
        return Err(format!("regrow jitter range [{}, {}] is invalid", min, max));
    }
    Ok(())
}

pub(crate) fn check_min_extent(min_extent: f32) -> std::result::Result<(), String> {
    if !(min_extent.is_finite() && min_extent >= 0.0) {
        return Err(format!("min_extent must be non-negative, got {}", min_extent));
    }
    Ok(())
}

pub(crate) fn check_angle_threshold(threshold_deg: f32) -> std::result::Result<(), String> {
    if !(threshold_deg > 0.0 && threshold_deg < 180.0) {
        return Err(format!("angle_threshold_deg must be in (0, 180), got {}", threshold_deg));
    }
    Ok(())
}
