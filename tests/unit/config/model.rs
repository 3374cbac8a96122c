use super::*;
use serde_json::json;

#[test]
fn empty_object_yields_defaults() {
    let c = TrailConfig::from_json_value(json!({})).unwrap();
    assert_eq!(c, TrailConfig::default());
}

#[test]
fn accepts_camel_case_aliases_and_lowercase_enums() {
    let c = TrailConfig::from_json_value(json!({
        "variant": "particles",
        "fillMode": "gradient",
        "trailLength": 12,
        "fadeDuration": 1.5,
        "autoFade": false,
        "blendMode": "screen",
        "spreadAngle": 90.0,
        "gridSnap": false,
        "fadeOut": false,
    }))
    .unwrap();
    assert_eq!(c.variant, Variant::Particles);
    assert_eq!(c.fill, FillMode::Gradient);
    assert_eq!(c.trail_length, 12);
    assert_eq!(c.fade_duration, 1.5);
    assert!(!c.auto_fade);
    assert_eq!(c.composite, CompositeMode::Screen);
    assert_eq!(c.spread_deg, 90.0);
    assert!(!c.grid_snap);
    assert!(!c.fade_width);
}

#[test]
fn unknown_variant_is_a_serde_error() {
    let err = TrailConfig::from_json_str(r#"{"variant":"sparkles"}"#).unwrap_err();
    assert!(err.to_string().contains("serialization error"));
}

#[test]
fn sanitized_clamps_degenerate_numbers() {
    let c = TrailConfig {
        smoothing: -0.5,
        line_width: -3.0,
        dot_size: f64::NAN,
        fade_duration: f64::INFINITY,
        ..TrailConfig::default()
    }
    .sanitized();
    let d = TrailConfig::default();
    assert_eq!(c.smoothing, 0.0);
    assert_eq!(c.line_width, 0.0);
    assert_eq!(c.dot_size, d.dot_size);
    assert_eq!(c.fade_duration, d.fade_duration);

    let c = TrailConfig {
        smoothing: 3.0,
        ..TrailConfig::default()
    }
    .sanitized();
    assert_eq!(c.smoothing, 1.0);
}

#[test]
fn palette_solid_ignores_position() {
    let p = TrailConfig {
        color: "#102030".to_owned(),
        ..TrailConfig::default()
    }
    .palette();
    assert_eq!(p.at(0.0), Rgb8::new(0x10, 0x20, 0x30));
    assert_eq!(p.at(1.0), Rgb8::new(0x10, 0x20, 0x30));
}

#[test]
fn palette_gradient_interpolates_and_bad_colors_go_black() {
    let p = TrailConfig {
        fill: FillMode::Gradient,
        color: "not a color".to_owned(),
        color_end: "#ffffff".to_owned(),
        ..TrailConfig::default()
    }
    .palette();
    assert_eq!(p.start, Rgb8::BLACK);
    assert_eq!(p.at(0.0), Rgb8::BLACK);
    assert_eq!(p.at(1.0), Rgb8::WHITE);
    let mid = p.at(0.5);
    assert!((f64::from(mid.g) - 127.5).abs() <= 1.0);
}
