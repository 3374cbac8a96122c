use super::*;

#[test]
fn lerp_midpoint_black_to_white_is_within_one_of_half() {
    let mid = Rgb8::BLACK.lerp(Rgb8::WHITE, 0.5);
    for ch in [mid.r, mid.g, mid.b] {
        assert!((f64::from(ch) - 127.5).abs() <= 1.0);
    }
}

#[test]
fn lerp_endpoints_and_clamping() {
    let a = Rgb8::new(10, 20, 30);
    let b = Rgb8::new(110, 220, 130);
    assert_eq!(a.lerp(b, 0.0), a);
    assert_eq!(a.lerp(b, 1.0), b);
    assert_eq!(a.lerp(b, 4.0), b);
    assert_eq!(a.lerp(b, f64::NAN), a);
}

#[test]
fn bounds_contains_edges_and_translates() {
    let b = SurfaceBounds {
        left: 10.0,
        top: 20.0,
        width: 100.0,
        height: 50.0,
    };
    assert!(b.contains(Point::new(10.0, 20.0)));
    assert!(b.contains(Point::new(110.0, 70.0)));
    assert!(!b.contains(Point::new(9.9, 30.0)));
    assert!(!b.contains(Point::new(50.0, 70.1)));
    assert_eq!(b.to_local(Point::new(15.0, 25.0)), Point::new(5.0, 5.0));
}

#[test]
fn viewport_surface_desc_scales_backing_store() {
    let d = Viewport::new(300, 200, 2.0).surface_desc();
    assert_eq!((d.width, d.height), (300, 200));
    assert_eq!((d.pixel_width, d.pixel_height), (600, 400));
    assert_eq!(d.scale, 2.0);

    let d = Viewport::new(300, 200, -1.0).surface_desc();
    assert_eq!(d.scale, 1.0);
    assert_eq!(d.pixel_width, 300);
    assert!(Viewport::new(0, 200, 1.0).surface_desc().is_empty());
}

#[test]
fn clamp01_maps_nan_to_zero() {
    assert_eq!(clamp01(f64::NAN), 0.0);
    assert_eq!(clamp01(-2.0), 0.0);
    assert_eq!(clamp01(2.0), 1.0);
    assert_eq!(clamp01(0.25), 0.25);
}
