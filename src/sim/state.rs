//! Ice sheet state and core simulation types
//!
//! All state that must be persisted for resume/determinism lives here.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::angles::AngleLimits;
use super::boundary::Boundary;
use super::deform::{self, HeatEvent, HeatOutcome};
use super::geometry::{Bounds, Frame, bounding_box, point_inside};
use super::regrow::{self, RegrowJitter};
use super::subdivide::subdivide;
use super::triangulate::triangulate;
use crate::error::{FloeError, Result};
use crate::mesh::Mesh;
use crate::settings::{IceConfig, check_angle_threshold, check_jitter, check_min_extent};

/// A physical anchor (joint) on the sheet, owned by the host.
///
/// The sheet only ever switches `enabled` off.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    /// Anchor in the sheet's local space
    pub anchor: Vec2,
    pub enabled: bool,
}

impl Attachment {
    pub fn new(anchor: Vec2) -> Self {
        Self {
            anchor,
            enabled: true,
        }
    }
}

/// A destructible, self-healing ice sheet (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IceSheet {
    pub(crate) boundary: Boundary,
    /// Local-to-world transform of the owning body
    pub(crate) frame: Frame,
    /// Regrowth jitter source
    rng: Pcg32,
    jitter: RegrowJitter,
    limits: AngleLimits,
    min_extent: f32,
    /// Regrowth enabled by config
    regrows: bool,
    /// Touched the background; regrowth is off for good
    breached: bool,
    /// A heat event was processed since the last tick
    pub(crate) melted: bool,
    /// False once every attachment has come loose
    any_attachment_enabled: bool,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Rebuilt on every re-triangulation
    #[serde(skip)]
    mesh: Mesh,
    #[serde(skip)]
    mesh_revision: u64,
}

impl IceSheet {
    /// Build a sheet from its outline, subdividing first if the config asks.
    ///
    /// The (possibly subdivided) outline becomes the regrowth target.
    pub fn new(config: &IceConfig, points: &[Vec2], frame: Frame) -> Result<Self> {
        config.validate()?;
        let points = if config.subdivide {
            subdivide(points, config.subdivision_interval, config.max_points)?
        } else {
            points.to_vec()
        };
        let boundary = Boundary::new(points)?;

        let mut sheet = Self {
            boundary,
            frame,
            rng: Pcg32::seed_from_u64(config.seed),
            jitter: RegrowJitter::from(config),
            limits: AngleLimits::from(config),
            min_extent: config.min_extent,
            regrows: config.regrows,
            breached: false,
            melted: false,
            any_attachment_enabled: true,
            time_ticks: 0,
            mesh: Mesh::default(),
            mesh_revision: 0,
        };
        sheet.remesh()?;
        log::info!(
            "Ice sheet ready: {} points, {} triangles",
            sheet.boundary.len(),
            sheet.mesh.triangle_count()
        );
        Ok(sheet)
    }

    pub fn boundary(&self) -> &Boundary {
        &self.boundary
    }

    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    /// Host moved the owning body
    pub fn set_frame(&mut self, frame: Frame) {
        self.frame = frame;
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    /// Increments each time the mesh is rebuilt
    pub fn mesh_revision(&self) -> u64 {
        self.mesh_revision
    }

    pub fn melted_this_tick(&self) -> bool {
        self.melted
    }

    pub fn any_attachment_enabled(&self) -> bool {
        self.any_attachment_enabled
    }

    /// Whether the sheet will regrow on ticks without melting
    pub fn regrows(&self) -> bool {
        self.regrows && !self.breached
    }

    pub fn is_breached(&self) -> bool {
        self.breached
    }

    /// Host reports contact with the background layer: stop regrowing for good
    pub fn mark_breached(&mut self) {
        if !self.breached {
            log::debug!("Ice sheet breached; regrowth stopped");
        }
        self.breached = true;
    }

    /// World-space bounds of the current outline
    pub fn bounds(&self) -> Bounds {
        let world = self.boundary.world_points(&self.frame);
        // Boundary always has at least 3 points
        bounding_box(&world).unwrap_or(Bounds {
            min: Vec2::ZERO,
            max: Vec2::ZERO,
        })
    }

    /// Collision and rendering are off while the sheet is too thin on either axis
    pub fn is_disabled(&self) -> bool {
        self.bounds().is_smaller_than(self.min_extent)
    }

    /// Whether a world-space point lies inside the current outline
    pub fn contains(&self, world: Vec2) -> bool {
        point_inside(&self.boundary.world_points(&self.frame), world)
    }

    /// Apply one heat event now. Marks the sheet melted, suppressing
    /// regrowth on the next tick. Ineffective events change nothing.
    pub fn apply_heat(&mut self, event: &HeatEvent) -> Result<Option<HeatOutcome>> {
        let outcome = deform::apply_heat(&mut self.boundary, &self.frame, event, self.limits)?;
        if let Some(outcome) = outcome {
            self.melted = true;
            if outcome.selected > 0 {
                self.remesh()?;
            }
        }
        Ok(outcome)
    }

    /// One regrowth step. Returns the number of displaced points.
    pub(crate) fn regrow(&mut self) -> usize {
        regrow::regrow(&mut self.boundary, &mut self.rng, self.jitter)
    }

    /// Disable attachments whose anchor fell outside the outline.
    ///
    /// Returns how many were switched off by this call.
    pub fn validate_attachments(&mut self, attachments: &mut [Attachment]) -> usize {
        let world = self.boundary.world_points(&self.frame);
        let mut released = 0;
        for attachment in attachments.iter_mut().filter(|a| a.enabled) {
            let anchor = self.frame.local_to_world(attachment.anchor);
            if !point_inside(&world, anchor) {
                attachment.enabled = false;
                released += 1;
            }
        }
        if released > 0 {
            log::debug!("{} attachment(s) released", released);
        }
        if !attachments.is_empty() && attachments.iter().all(|a| !a.enabled) {
            self.any_attachment_enabled = false;
        }
        released
    }

    /// Re-triangulate the current outline into the mesh
    pub fn remesh(&mut self) -> Result<()> {
        let indices = triangulate(self.boundary.points())?;
        self.mesh = Mesh::new(self.boundary.points(), indices);
        self.mesh_revision += 1;
        Ok(())
    }

    /// Serialize the full simulation state, RNG included
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Resume from [`IceSheet::to_json`] output; the mesh is rebuilt.
    ///
    /// The restored state gets the same checks as a fresh config and outline.
    pub fn from_json(json: &str) -> Result<Self> {
        let mut sheet: Self = serde_json::from_str(json)?;
        sheet.check_restored().map_err(FloeError::CorruptState)?;
        sheet.remesh()?;
        Ok(sheet)
    }

    fn check_restored(&self) -> std::result::Result<(), String> {
        let (points, initial) = (self.boundary.points(), self.boundary.initial());
        if initial.len() != points.len() {
            return Err(format!(
                "{} points but {} in the snapshot",
                points.len(),
                initial.len()
            ));
        }
        if points.len() < 3 {
            return Err(format!("{} points, at least 3 are required", points.len()));
        }
        if let Some(index) = points.iter().chain(initial).position(|p| !p.is_finite()) {
            return Err(format!("point {} is not finite", index % points.len()));
        }
        check_jitter(self.jitter.min, self.jitter.max)?;
        check_min_extent(self.min_extent)?;
        check_angle_threshold(self.limits.threshold_deg)
    }
}
