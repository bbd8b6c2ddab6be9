use colored::{ColoredString, Colorize};

use crate::types::Color;

/// Approximate on-screen color of a QMK HSV triple (every component 0-255).
/// Goes through HSL since that is what colorsys converts from.
pub fn hsv_to_rgb(color: Color) -> (u8, u8, u8) {
    let Color(h, s, v) = color;
    let hue = h as f64 * 360. / 256.;
    let saturation = s as f64 / 255.;
    let value = v as f64 / 255.;

    let lightness = value * (1. - saturation / 2.);
    let hsl_saturation = if lightness <= 0. || lightness >= 1. {
        0.
    } else {
        (value - lightness) / lightness.min(1. - lightness)
    };

    let hsl = colorsys::Hsl::new(hue, hsl_saturation * 100., lightness * 100., None);
    let rgb = colorsys::Rgb::from(hsl);
    (
        rgb.red().round() as u8,
        rgb.green().round() as u8,
        rgb.blue().round() as u8,
    )
}

/// One line per distinct color, painted in that color
pub fn swatch(index: usize, color: Color) -> ColoredString {
    let (r, g, b) = hsv_to_rgb(color);
    let line = format!("{:>3} {:<16} rgb({}, {}, {})", index, color.to_string(), r, g, b);

    if (r as u16 + g as u16 + b as u16) > 384 {
        line.black().on_truecolor(r, g, b)
    } else {
        line.on_truecolor(r, g, b)
    }
}
