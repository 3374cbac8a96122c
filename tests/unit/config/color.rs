use super::*;

#[test]
fn parses_hex_forms() {
    assert_eq!(parse_color("#ff0000").unwrap(), Rgb8::new(255, 0, 0));
    assert_eq!(parse_color("#0F8").unwrap(), Rgb8::new(0, 255, 136));
    assert_eq!(parse_color(" #3366ccff ").unwrap(), Rgb8::new(0x33, 0x66, 0xcc));
    assert_eq!(parse_color("#abcd").unwrap(), Rgb8::new(0xaa, 0xbb, 0xcc));
}

#[test]
fn parses_functional_rgb() {
    assert_eq!(parse_color("rgb(10, 20, 30)").unwrap(), Rgb8::new(10, 20, 30));
    assert_eq!(
        parse_color("rgba(255,128,0,0.5)").unwrap(),
        Rgb8::new(255, 128, 0)
    );
    assert_eq!(
        parse_color("RGB(100% 0% 50% / 0.2)").unwrap(),
        Rgb8::new(255, 0, 128)
    );
    assert_eq!(parse_color("rgb(300, -4, 7)").unwrap(), Rgb8::new(255, 0, 7));
}

#[test]
fn parses_functional_hsl() {
    assert_eq!(parse_color("hsl(0, 100%, 50%)").unwrap(), Rgb8::new(255, 0, 0));
    assert_eq!(
        parse_color("hsla(120deg, 100%, 50%, 1)").unwrap(),
        Rgb8::new(0, 255, 0)
    );
    assert_eq!(parse_color("hsl(200, 0%, 100%)").unwrap(), Rgb8::WHITE);
}

#[test]
fn parses_names() {
    assert_eq!(parse_color("White").unwrap(), Rgb8::WHITE);
    assert_eq!(parse_color("orange").unwrap(), Rgb8::new(255, 165, 0));
}

#[test]
fn malformed_input_falls_back_to_black() {
    for bad in ["", "#12", "#gggggg", "rgb(1,2)", "rgb(a,b,c)", "cmyk(1,2,3,4)", "chartreuse-ish"] {
        assert!(parse_color(bad).is_err(), "{bad:?} should not parse");
        assert_eq!(resolve_color(bad), Rgb8::BLACK);
    }
}
