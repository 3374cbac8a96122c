use super::*;

const ALL: [Ease; 5] = [
    Ease::Linear,
    Ease::InQuad,
    Ease::OutQuad,
    Ease::InOutQuad,
    Ease::OutCubic,
];

#[test]
fn endpoints_are_fixed() {
    for e in ALL {
        assert!(e.apply(0.0).abs() < 1e-12, "{e:?}");
        assert!((e.apply(1.0) - 1.0).abs() < 1e-12, "{e:?}");
    }
}

#[test]
fn out_quad_matches_closed_form() {
    for t in [0.1, 0.25, 0.5, 0.9] {
        let expected = 1.0 - (1.0 - t) * (1.0 - t);
        assert!((Ease::OutQuad.apply(t) - expected).abs() < 1e-12);
    }
    assert_eq!(Ease::default(), Ease::OutQuad);
}

#[test]
fn input_is_clamped() {
    for e in ALL {
        assert_eq!(e.apply(-3.0), e.apply(0.0));
        assert_eq!(e.apply(7.0), e.apply(1.0));
        assert_eq!(e.apply(f64::NAN), e.apply(0.0));
    }
}

#[test]
fn deserializes_snake_case_names() {
    let e: Ease = serde_json::from_value(serde_json::json!("in_out_quad")).unwrap();
    assert_eq!(e, Ease::InOutQuad);
}
