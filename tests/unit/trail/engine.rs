use super::*;
use crate::{
    compile::plan::DrawOp,
    config::model::CompositeMode,
    foundation::{core::Viewport, rng::SequenceRng},
};

fn surface() -> SurfaceDesc {
    Viewport::new(200, 100, 1.0).surface_desc()
}

fn positions(r: &TrailRenderer) -> Vec<(f64, f64)> {
    r.queue().iter().map(|p| (p.x, p.y)).collect()
}

#[test]
fn length_three_keeps_last_three_points() {
    let mut r = TrailRenderer::new(TrailConfig {
        trail_length: 3,
        smoothing: 0.0,
        ..TrailConfig::default()
    });
    for x in [0.0, 10.0, 20.0, 30.0] {
        r.add_point(x, 0.0);
    }
    assert_eq!(positions(&r), vec![(10.0, 0.0), (20.0, 0.0), (30.0, 0.0)]);
}

#[test]
fn two_half_second_frames_expire_a_one_second_fade() {
    let mut r = TrailRenderer::new(TrailConfig {
        auto_fade: true,
        fade_duration: 1.0,
        ..TrailConfig::default()
    });
    r.add_point(5.0, 5.0);
    r.render_frame(0.5, surface());
    assert_eq!(r.queue().len(), 1);
    assert!((r.queue().last().unwrap().life - 0.5).abs() < 1e-12);

    let plan = r.render_frame(0.5, surface());
    assert!(r.queue().is_empty());
    assert!(plan.is_blank());
}

#[test]
fn many_small_steps_covering_fade_duration_empty_the_queue() {
    let mut r = TrailRenderer::new(TrailConfig {
        fade_duration: 0.3,
        ..TrailConfig::default()
    });
    r.add_point(1.0, 1.0);
    r.add_point(2.0, 1.0);
    let mut elapsed = 0.0;
    while elapsed < 0.3 {
        r.render_frame(1.0 / 60.0, surface());
        elapsed += 1.0 / 60.0;
    }
    r.render_frame(1e-9, surface());
    assert!(r.queue().is_empty());
}

#[test]
fn life_is_ignored_without_auto_fade() {
    let mut r = TrailRenderer::new(TrailConfig {
        auto_fade: false,
        ..TrailConfig::default()
    });
    r.add_point(1.0, 1.0);
    for _ in 0..100 {
        r.render_frame(0.05, surface());
    }
    assert_eq!(r.queue().len(), 1);
    assert_eq!(r.queue().last().unwrap().life, 1.0);
}

#[test]
fn line_with_one_point_draws_one_circle() {
    let mut r = TrailRenderer::new(TrailConfig {
        variant: Variant::Line,
        ..TrailConfig::default()
    });
    r.add_point(50.0, 50.0);
    let plan = r.render_frame(0.0, surface());
    assert_eq!(plan.ops.len(), 1);
    assert_eq!(plan.circles().count(), 1);
    assert_eq!(plan.segments().count(), 0);
}

#[test]
fn dots_spacing_gate_collapses_close_inputs() {
    let mut r = TrailRenderer::new(TrailConfig {
        variant: Variant::Dots,
        dot_spacing: 10.0,
        smoothing: 0.0,
        ..TrailConfig::default()
    });
    r.add_point(0.0, 0.0);
    r.add_point(3.0, 4.0);
    assert_eq!(r.queue().len(), 1);
    r.add_point(6.0, 8.0);
    assert_eq!(r.queue().len(), 2);
}

#[test]
fn spacing_gate_only_applies_to_dots() {
    let mut r = TrailRenderer::new(TrailConfig {
        variant: Variant::Line,
        dot_spacing: 10.0,
        ..TrailConfig::default()
    });
    r.add_point(0.0, 0.0);
    r.add_point(1.0, 0.0);
    assert_eq!(r.queue().len(), 2);
}

#[test]
fn particle_spawn_depends_on_displacement() {
    let cfg = TrailConfig {
        variant: Variant::Particles,
        particle_count: 4,
        smoothing: 0.0,
        ..TrailConfig::default()
    };
    let mut r = TrailRenderer::with_rng(cfg, Box::new(SequenceRng::constant(0.5)));
    r.add_point(0.0, 0.0);
    assert_eq!(r.particles().len(), 0);
    r.add_point(1.0, 1.0);
    assert_eq!(r.particles().len(), 0);
    r.add_point(40.0, 1.0);
    assert_eq!(r.particles().len(), 4);
}

#[test]
fn other_variants_never_spawn_particles() {
    let mut r = TrailRenderer::new(TrailConfig {
        variant: Variant::Pixel,
        smoothing: 0.0,
        ..TrailConfig::default()
    });
    r.add_point(0.0, 0.0);
    r.add_point(400.0, 0.0);
    assert!(r.particles().is_empty());
}

#[test]
fn zero_dt_frames_are_idempotent() {
    let mut r = TrailRenderer::new(TrailConfig {
        variant: Variant::Particles,
        smoothing: 0.0,
        ..TrailConfig::default()
    });
    r.add_point(0.0, 0.0);
    r.add_point(30.0, 10.0);
    r.add_point(60.0, 30.0);
    r.render_frame(0.016, surface());

    let a = r.render_frame(0.0, surface());
    let b = r.render_frame(0.0, surface());
    assert!(!a.is_blank());
    assert_eq!(a, b);
}

#[test]
fn zero_length_trail_is_always_blank() {
    let mut r = TrailRenderer::new(TrailConfig {
        trail_length: 0,
        ..TrailConfig::default()
    });
    r.add_point(1.0, 2.0);
    assert!(r.queue().is_empty());
    assert!(r.render_frame(0.016, surface()).is_blank());
}

#[test]
fn invalid_dt_is_treated_as_zero() {
    let mut r = TrailRenderer::new(TrailConfig::default());
    r.add_point(1.0, 2.0);
    r.render_frame(f64::NAN, surface());
    r.render_frame(-5.0, surface());
    assert_eq!(r.queue().last().unwrap().life, 1.0);
}

#[test]
fn zero_fade_duration_expires_on_first_elapsed_frame() {
    let mut r = TrailRenderer::new(TrailConfig {
        fade_duration: 0.0,
        ..TrailConfig::default()
    });
    r.add_point(1.0, 2.0);
    r.render_frame(0.0, surface());
    assert_eq!(r.queue().len(), 1);
    r.render_frame(0.001, surface());
    assert!(r.queue().is_empty());
}

#[test]
fn plan_carries_surface_and_composite_mode() {
    let mut r = TrailRenderer::new(TrailConfig {
        composite: CompositeMode::Additive,
        ..TrailConfig::default()
    });
    r.add_point(3.0, 3.0);
    let plan = r.render_frame(0.0, surface());
    assert_eq!(plan.composite, CompositeMode::Additive);
    assert_eq!(plan.surface, surface());
}

#[test]
fn reconfigure_trims_queue_and_drops_particles() {
    let mut r = TrailRenderer::new(TrailConfig {
        variant: Variant::Particles,
        smoothing: 0.0,
        trail_length: 10,
        ..TrailConfig::default()
    });
    for x in [0.0, 50.0, 100.0, 150.0] {
        r.add_point(x, 0.0);
    }
    assert!(!r.particles().is_empty());

    r.reconfigure(TrailConfig {
        variant: Variant::Dots,
        trail_length: 2,
        ..TrailConfig::default()
    });
    assert_eq!(positions(&r), vec![(100.0, 0.0), (150.0, 0.0)]);
    assert!(r.particles().is_empty());
    assert_eq!(r.config().variant, Variant::Dots);
}

#[test]
fn clear_empties_state() {
    let mut r = TrailRenderer::new(TrailConfig {
        variant: Variant::Particles,
        smoothing: 0.0,
        ..TrailConfig::default()
    });
    r.add_point(0.0, 0.0);
    r.add_point(90.0, 0.0);
    r.clear();
    assert!(r.queue().is_empty());
    assert!(r.particles().is_empty());
    assert!(r.render_frame(0.0, surface()).ops.iter().all(|op| !matches!(op, DrawOp::Circle { .. })));
}
