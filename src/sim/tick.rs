//! Fixed-order simulation tick
//!
//! Advances one ice sheet by one step, deterministically.

use super::deform::HeatEvent;
use super::state::{Attachment, IceSheet};
use crate::error::Result;

/// Inputs for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Heat events queued for this sheet, applied in order
    pub heat: Vec<HeatEvent>,
    /// The sheet touched the background layer this tick
    pub breached: bool,
}

impl TickInput {
    pub fn heat(events: impl IntoIterator<Item = HeatEvent>) -> Self {
        Self {
            heat: events.into_iter().collect(),
            ..Default::default()
        }
    }
}

/// What happened during a tick, for the host's renderer and physics
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    /// Heat events that had an effect (selected or not)
    pub heat_applied: usize,
    /// Regrowth ran this tick
    pub regrew: bool,
    /// Points that were still off their original position when regrowth ran
    pub displaced: usize,
    /// The mesh was rebuilt; re-upload it
    pub remeshed: bool,
    /// Collision and rendering should be off
    pub disabled: bool,
    /// Enabled flag of each attachment after validation, in input order
    pub attachments_enabled: Vec<bool>,
    /// At least one attachment still holds (or there are none)
    pub any_attachment_enabled: bool,
}

/// Advance the sheet by one tick.
///
/// Order: queued heat events, attachment validation, regrowth (skipped if
/// anything melted since the last tick, or the sheet is breached or does
/// not regrow), disabled derivation, melt reset.
pub fn tick(
    sheet: &mut IceSheet,
    input: &TickInput,
    attachments: &mut [Attachment],
) -> Result<TickReport> {
    let revision = sheet.mesh_revision();
    let mut report = TickReport::default();

    if input.breached {
        sheet.mark_breached();
    }

    // Later events see the shape left by earlier ones
    for event in &input.heat {
        if sheet.apply_heat(event)?.is_some() {
            report.heat_applied += 1;
        }
    }

    sheet.validate_attachments(attachments);

    if sheet.regrows() && !sheet.melted {
        report.displaced = sheet.regrow();
        sheet.remesh()?;
        report.regrew = true;
    }

    report.disabled = sheet.is_disabled();
    report.remeshed = sheet.mesh_revision() != revision;
    report.attachments_enabled = attachments.iter().map(|a| a.enabled).collect();
    report.any_attachment_enabled = sheet.any_attachment_enabled();

    sheet.melted = false;
    sheet.time_ticks += 1;
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::IceConfig;
    use crate::sim::geometry::Frame;
    use glam::Vec2;
    use proptest::prelude::*;

    fn square(side: f32) -> Vec<Vec2> {
        vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(side, 0.0),
            Vec2::new(side, side),
            Vec2::new(0.0, side),
        ]
    }

    fn fine_sheet(seed: u64) -> IceSheet {
        let config = IceConfig::subdivided(0.5).with_seed(seed);
        IceSheet::new(&config, &square(2.0), Frame::IDENTITY).unwrap()
    }

    fn bottom_heat() -> HeatEvent {
        HeatEvent::new(Vec2::new(1.0, 0.0), 0.3, 0.1)
    }

    #[test]
    fn test_idle_tick_at_rest() {
        let mut sheet = fine_sheet(1);
        let report = tick(&mut sheet, &TickInput::default(), &mut []).unwrap();
        assert!(report.regrew);
        assert_eq!(report.displaced, 0);
        assert!(report.remeshed);
        assert!(!report.disabled);
        assert!(report.any_attachment_enabled);
        assert!(sheet.boundary().is_at_rest());
        assert_eq!(sheet.time_ticks, 1);
    }

    #[test]
    fn test_melt_suppresses_regrowth_for_one_tick() {
        let mut sheet = fine_sheet(2);
        let report = tick(&mut sheet, &TickInput::heat([bottom_heat()]), &mut []).unwrap();
        assert_eq!(report.heat_applied, 1);
        assert!(!report.regrew);
        assert!(report.remeshed);
        assert!(!sheet.melted_this_tick());
        assert!(!sheet.boundary().is_at_rest());
        let melted_max = sheet.boundary().max_displacement();

        let report = tick(&mut sheet, &TickInput::default(), &mut []).unwrap();
        assert!(report.regrew);
        assert!(report.displaced > 0);
        assert!(sheet.boundary().max_displacement() <= melted_max);
    }

    #[test]
    fn test_heat_between_ticks_suppresses_next_regrowth() {
        let mut sheet = fine_sheet(3);
        sheet.apply_heat(&bottom_heat()).unwrap();
        let report = tick(&mut sheet, &TickInput::default(), &mut []).unwrap();
        assert!(!report.regrew);
        let report = tick(&mut sheet, &TickInput::default(), &mut []).unwrap();
        assert!(report.regrew);
    }

    #[test]
    fn test_events_in_one_tick_compose() {
        let mut once = fine_sheet(4);
        let mut twice = fine_sheet(4);
        tick(&mut once, &TickInput::heat([bottom_heat()]), &mut []).unwrap();
        tick(&mut twice, &TickInput::heat([bottom_heat(), bottom_heat()]), &mut []).unwrap();

        // Index 4 is (1, 0); the second event pushes it further in
        let y_once = once.boundary().points()[4].y;
        let y_twice = twice.boundary().points()[4].y;
        assert!((y_once - 0.1).abs() < 1e-5);
        assert!(y_twice > y_once);
    }

    #[test]
    fn test_ineffective_heat_does_not_block_regrowth() {
        let mut sheet = fine_sheet(5);
        let input = TickInput::heat([HeatEvent::new(Vec2::new(1.0, 0.0), -1.0, 0.1)]);
        let report = tick(&mut sheet, &input, &mut []).unwrap();
        assert_eq!(report.heat_applied, 0);
        assert!(report.regrew);
    }

    #[test]
    fn test_regrowth_restores_original_shape() {
        let mut sheet = fine_sheet(6);
        tick(&mut sheet, &TickInput::heat([bottom_heat()]), &mut []).unwrap();
        let mut ticks = 0;
        while !sheet.boundary().is_at_rest() {
            assert!(ticks < 5_000, "sheet never regrew");
            tick(&mut sheet, &TickInput::default(), &mut []).unwrap();
            ticks += 1;
        }
        assert!(ticks > 1);
    }

    #[test]
    fn test_breach_stops_regrowth_permanently() {
        let mut sheet = fine_sheet(7);
        let input = TickInput {
            heat: vec![bottom_heat()],
            breached: true,
        };
        tick(&mut sheet, &input, &mut []).unwrap();
        let melted = sheet.boundary().points().to_vec();
        for _ in 0..50 {
            let report = tick(&mut sheet, &TickInput::default(), &mut []).unwrap();
            assert!(!report.regrew);
        }
        assert_eq!(sheet.boundary().points(), melted.as_slice());
    }

    #[test]
    fn test_regrowth_disabled_by_config() {
        let config = IceConfig {
            regrows: false,
            ..IceConfig::subdivided(0.5)
        };
        let mut sheet = IceSheet::new(&config, &square(2.0), Frame::IDENTITY).unwrap();
        tick(&mut sheet, &TickInput::heat([bottom_heat()]), &mut []).unwrap();
        let report = tick(&mut sheet, &TickInput::default(), &mut []).unwrap();
        assert!(!report.regrew);
        assert!(!report.remeshed);
    }

    #[test]
    fn test_thin_sheet_disabled_until_regrown() {
        let config = IceConfig::default().with_seed(8);
        let mut sheet = IceSheet::new(&config, &square(1.0), Frame::IDENTITY).unwrap();
        // Squeeze the right edge in to width 0.2
        sheet.boundary.points[1].x = 0.2;
        sheet.boundary.points[2].x = 0.2;

        let report = tick(&mut sheet, &TickInput::default(), &mut []).unwrap();
        assert!(report.disabled);

        let mut enabled = false;
        for _ in 0..10_000 {
            let report = tick(&mut sheet, &TickInput::default(), &mut []).unwrap();
            if sheet.bounds().width() >= 0.3 {
                assert!(!report.disabled);
                enabled = true;
                break;
            }
            assert!(report.disabled);
        }
        assert!(enabled);
    }

    #[test]
    fn test_attachments_released_by_erosion() {
        let mut sheet = fine_sheet(9);
        let mut joints = [
            Attachment::new(Vec2::new(1.0, 0.05)),
            Attachment::new(Vec2::new(1.0, 1.0)),
        ];
        let report = tick(&mut sheet, &TickInput::default(), &mut joints).unwrap();
        assert_eq!(report.attachments_enabled, vec![true, true]);

        let report = tick(&mut sheet, &TickInput::heat([bottom_heat()]), &mut joints).unwrap();
        assert_eq!(report.attachments_enabled, vec![false, true]);
        assert!(report.any_attachment_enabled);

        // Regrowing back over the anchor does not re-enable it
        while !sheet.boundary().is_at_rest() {
            tick(&mut sheet, &TickInput::default(), &mut joints).unwrap();
        }
        assert!(!joints[0].enabled);
    }

    #[test]
    fn test_all_attachments_released() {
        let mut sheet = fine_sheet(10);
        let mut joints = [Attachment::new(Vec2::new(1.0, 0.05))];
        let report = tick(&mut sheet, &TickInput::heat([bottom_heat()]), &mut joints).unwrap();
        assert!(!report.any_attachment_enabled);
        assert!(!sheet.any_attachment_enabled());
    }

    #[test]
    fn test_determinism() {
        // Two sheets with the same seed should produce identical results
        let mut a = fine_sheet(99999);
        let mut b = fine_sheet(99999);
        let inputs = [
            TickInput::heat([bottom_heat()]),
            TickInput::default(),
            TickInput::heat([HeatEvent::new(Vec2::new(2.0, 1.0), 0.6, 0.2)]),
            TickInput::default(),
            TickInput::default(),
        ];
        for input in &inputs {
            tick(&mut a, input, &mut []).unwrap();
            tick(&mut b, input, &mut []).unwrap();
        }
        assert_eq!(a.boundary().points(), b.boundary().points());
        assert_eq!(a.mesh(), b.mesh());
    }

    #[test]
    fn test_resume_from_json() {
        let mut sheet = fine_sheet(11);
        tick(&mut sheet, &TickInput::heat([bottom_heat()]), &mut []).unwrap();
        tick(&mut sheet, &TickInput::default(), &mut []).unwrap();

        let mut resumed = IceSheet::from_json(&sheet.to_json().unwrap()).unwrap();
        assert_eq!(resumed.mesh(), sheet.mesh());
        for _ in 0..10 {
            tick(&mut sheet, &TickInput::default(), &mut []).unwrap();
            tick(&mut resumed, &TickInput::default(), &mut []).unwrap();
        }
        assert_eq!(resumed.boundary().points(), sheet.boundary().points());
        assert_eq!(resumed.time_ticks, sheet.time_ticks);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_point_count_is_invariant(
            seed in any::<u64>(),
            events in prop::collection::vec(
                ((-0.5f32..2.5, -0.5f32..2.5), 0.0f32..1.0, 0.0f32..0.3),
                0..12,
            ),
        ) {
            let mut sheet = fine_sheet(seed);
            let len = sheet.boundary().len();
            for ((x, y), radius, displacement) in events {
                let input = TickInput::heat([HeatEvent::new(Vec2::new(x, y), radius, displacement)]);
                tick(&mut sheet, &input, &mut []).unwrap();
                prop_assert_eq!(sheet.boundary().len(), len);
                prop_assert_eq!(sheet.boundary().initial().len(), len);
                prop_assert_eq!(sheet.mesh().vertices.len(), len);
                tick(&mut sheet, &TickInput::default(), &mut []).unwrap();
                prop_assert_eq!(sheet.boundary().len(), len);
            }
        }
    }
}
