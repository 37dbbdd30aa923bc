//! End-to-end runs against the real noise field and tessellator.

use cellblob_core::seed::Seed;
use cellblob_layout::{Layout, LayoutParams};

const FRAME: f64 = 1.0 / 60.0;

#[test]
fn four_shapes_hundred_frames_stay_sane() {
    let params = LayoutParams::new(1080.0, 1080.0, 4);
    let mut layout = Layout::new(params, 2024).unwrap();
    for i in 1..=100 {
        layout.update(i as f64 * FRAME);
        assert_eq!(layout.points().len(), 4);
        assert_eq!(layout.cells().len(), 4);
    }

    let cells = layout.cells();
    let half_edge = 1080.0 / 2.0;
    for cell in &cells {
        assert!(cell.radius.is_finite(), "radius {} not finite", cell.radius);
        assert!(cell.radius >= 0.0, "radius {} negative", cell.radius);
        assert!(cell.radius <= half_edge, "radius {} exceeds canvas", cell.radius);
        assert!(cell.center_x.is_finite() && cell.center_y.is_finite());
    }
    let disc_area: f64 = cells
        .iter()
        .map(|c| std::f64::consts::PI * c.radius * c.radius)
        .sum();
    assert!(
        disc_area <= 2.0 * 1080.0 * 1080.0,
        "total disc area {disc_area} out of proportion to canvas"
    );
}

#[test]
fn agitation_burst_during_run_is_undone() {
    let mut layout = Layout::new(LayoutParams::default(), 7).unwrap();
    let default_increment = layout.params().noise_increment;
    for i in 1..=30 {
        let now = i as f64 * FRAME;
        if i == 10 {
            layout.trigger_agitation(now);
        }
        layout.update(now);
    }
    assert!(!layout.is_agitated());
    assert!(layout
        .points()
        .iter()
        .all(|p| p.noise_increment() == default_increment));
}

#[test]
fn growing_layout_keeps_alignment() {
    let mut layout = Layout::new(LayoutParams::new(800.0, 600.0, 3), 5).unwrap();
    for i in 1..=60 {
        let now = i as f64 * FRAME;
        if i % 15 == 0 {
            let index = layout.add_shape(400.0, 300.0 + i as f64);
            assert_eq!(index, layout.max_size() - 1);
            assert_eq!(layout.cell(index).unwrap().radius, 0.0);
        }
        layout.update(now);
        assert_eq!(layout.points().len(), layout.max_size());
        assert_eq!(layout.cells().len(), layout.max_size());
        assert_eq!(layout.frames().len(), layout.max_size());
    }
    assert_eq!(layout.max_size(), 7);
}

#[test]
fn seeded_runs_replay_identically() {
    let mut seed = Seed::new(1080.0, 1080.0, 6, 31337);
    seed.params = serde_json::json!({"retarget_duration": 0.5});
    seed.frames = 45;

    let run = |seed: &Seed| {
        let mut layout = Layout::from_seed(seed).unwrap();
        for frame in 1..=seed.frames {
            layout.update(seed.frame_time(frame));
        }
        layout.frames()
    };
    assert_eq!(run(&seed), run(&seed));
}

#[test]
fn invalid_seed_is_rejected() {
    let seed = Seed::new(1080.0, 1080.0, 0, 1);
    assert!(Layout::from_seed(&seed).is_err());
}
