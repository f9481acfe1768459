//! Floe entry point
//!
//! Native demo: melts a square sheet from several sides, then lets it regrow.
//!
//! Usage: `floe [config.json]`

use floe::IceConfig;
use floe::sim::{Attachment, Frame, HeatEvent, IceSheet, TickInput, tick};
use glam::Vec2;

fn main() {
    env_logger::init();
    if let Err(e) = run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

fn run() -> floe::Result<()> {
    log::info!("Floe (native) starting...");

    let config = match std::env::args().nth(1) {
        Some(path) => IceConfig::load(path)?,
        None => IceConfig::subdivided(0.5).with_seed(42),
    };

    let outline = [
        Vec2::new(-2.0, -1.0),
        Vec2::new(2.0, -1.0),
        Vec2::new(2.0, 1.0),
        Vec2::new(-2.0, 1.0),
    ];
    let frame = Frame::from_translation_angle(Vec2::new(5.0, 3.0), 0.25);
    let mut sheet = IceSheet::new(&config, &outline, frame)?;
    let mut joints = [
        Attachment::new(Vec2::new(-1.9, 0.0)),
        Attachment::new(Vec2::new(1.9, 0.0)),
    ];

    // A torch sweeping along the bottom edge, then a blast on the right
    let melts: Vec<HeatEvent> = (0..8)
        .map(|i| {
            let local = Vec2::new(-1.5 + i as f32 * 0.4, -1.0);
            HeatEvent::new(frame.local_to_world(local), 0.6, 0.15)
        })
        .chain(std::iter::once(HeatEvent::new(
            frame.local_to_world(Vec2::new(2.0, 0.0)),
            0.8,
            0.3,
        )))
        .collect();

    for event in melts {
        let report = tick(&mut sheet, &TickInput::heat([event]), &mut joints)?;
        log::info!(
            "tick {}: max displacement {:.3}, joints {:?}, disabled {}",
            sheet.time_ticks,
            sheet.boundary().max_displacement(),
            report.attachments_enabled,
            report.disabled
        );
    }

    let mut regrow_ticks = 0;
    while !sheet.boundary().is_at_rest() && regrow_ticks < 10_000 {
        tick(&mut sheet, &TickInput::default(), &mut joints)?;
        regrow_ticks += 1;
        if regrow_ticks % 25 == 0 {
            log::debug!(
                "regrowing: tick {}, max displacement {:.4}",
                sheet.time_ticks,
                sheet.boundary().max_displacement()
            );
        }
    }

    let mesh = sheet.mesh();
    println!(
        "Regrown in {} ticks: {} vertices, {} triangles, area {:.3}, joints {:?}, any joint held: {}",
        regrow_ticks,
        mesh.vertices.len(),
        mesh.triangle_count(),
        mesh.area(),
        joints.iter().map(|j| j.enabled).collect::<Vec<_>>(),
        sheet.any_attachment_enabled()
    );
    Ok(())
}
