use approx::assert_relative_eq;
use genchart::core::{Color, HistogramPalette, translucent_fill};

#[test]
fn translucent_fill_keeps_rgb_at_one_tenth_alpha() {
    let fill = translucent_fill("#FF0000");
    assert_eq!(fill.to_rgb8(), (255, 0, 0));
    assert_relative_eq!(fill.alpha, 0.1);
    assert_eq!(fill.to_css(), "rgba(255,0,0,0.1)");

    assert_eq!(translucent_fill("#1a2B3c").to_css(), "rgba(26,43,60,0.1)");
}

#[test]
fn translucent_fill_falls_back_for_malformed_input() {
    for input in ["red", "", "#12", "#XYZXYZ", "FF0000"] {
        assert_eq!(translucent_fill(input).to_css(), "rgba(0,0,0,0.1)", "{input}");
    }
}

#[test]
fn derived_palette_uses_fixed_opacities() {
    let palette = HistogramPalette::derived("#FF0000");
    assert_eq!(palette.fill.to_css(), "rgba(255,0,0,0.6)");
    assert_eq!(palette.hover_fill.to_css(), "rgba(255,0,0,0.8)");
    assert_eq!(palette.border.to_css(), "rgba(191,0,0,1)");
    assert_eq!(palette.hover_border, palette.border);
}

#[test]
fn derived_palette_falls_back_to_opaque_black() {
    let palette = HistogramPalette::derived("red");
    for color in [
        palette.fill,
        palette.border,
        palette.hover_fill,
        palette.hover_border,
    ] {
        assert_eq!(color, Color::BLACK);
    }
}

#[test]
fn css_parser_accepts_hex_rgb_and_rgba() {
    assert_eq!(
        Color::from_css("#00FF00").expect("hex"),
        Color::rgb(0.0, 1.0, 0.0)
    );
    assert_eq!(
        Color::from_css("rgb(0, 0, 255)").expect("rgb"),
        Color::rgb(0.0, 0.0, 1.0)
    );
    let translucent = Color::from_css(" rgba(255,255,255,0.5) ").expect("rgba");
    assert_relative_eq!(translucent.alpha, 0.5);
    assert!(Color::from_css("hsl(0,0%,0%)").is_err());
    assert!(Color::from_css("rgba(1,2,3)").is_err());
}
