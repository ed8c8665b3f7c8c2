//! `rgb` and `hsl` conversions to packed colors.

use crate::{ColorArg, ColorError};
use easel_types::Color;

/// Number of arguments both builtins require.
pub const ARITY: usize = 3;

/// Fail with [`ColorError::Arity`] unless exactly [`ARITY`] arguments were given.
pub fn check_arity(function: &'static str, given: usize) -> Result<(), ColorError> {
    if given == ARITY {
        Ok(())
    } else {
        Err(ColorError::Arity { function, given })
    }
}

fn three(function: &'static str, args: &[ColorArg]) -> Result<[ColorArg; 3], ColorError> {
    check_arity(function, args.len())?;
    Ok([args[0], args[1], args[2]])
}

/// `round(255 * v)`, ties away from zero.
fn scale(v: f64) -> i64 {
    (255.0 * v).round() as i64
}

/// Pack red, green and blue.
///
/// When all three arguments are integers each is masked to 8 bits.
/// Otherwise every argument, integer or not, is read as a fraction of 255.
/// Values are never clamped, so out-of-range inputs wrap.
pub fn rgb(args: &[ColorArg]) -> Result<Color, ColorError> {
    let [r, g, b] = three("rgb", args)?;
    let color = match (r, g, b) {
        (ColorArg::Integer(r), ColorArg::Integer(g), ColorArg::Integer(b)) => {
            Color::from_channels(r, g, b)
        }
        _ => Color::from_channels(scale(r.as_f64()), scale(g.as_f64()), scale(b.as_f64())),
    };
    Ok(color)
}

/// Convert hue, saturation and lightness to a packed color.
///
/// Each argument follows its own tag: an integer hue is in degrees, a real
/// hue is a fraction of the circle; integer saturation and lightness are
/// percentages, real ones are already in `[0, 1]`.
pub fn hsl(args: &[ColorArg]) -> Result<Color, ColorError> {
    let [h, s, l] = three("hsl", args)?;
    let hue = match h {
        ColorArg::Integer(deg) => deg.rem_euclid(360) as f64,
        ColorArg::Real(turns) => turns.rem_euclid(1.0) * 360.0,
    };
    Ok(hsl_to_color(hue, unit(s), unit(l)))
}

fn unit(arg: ColorArg) -> f64 {
    match arg {
        ColorArg::Integer(percent) => percent as f64 / 100.0,
        ColorArg::Real(v) => v,
    }
}

/// HSL to packed RGB with `h` in degrees and `s`, `l` in `[0, 1]`.
///
/// Hue sectors are half-open, `[k*60, (k+1)*60)`; a hue of exactly 360
/// falls back into the first (red) sector.
pub fn hsl_to_color(h: f64, s: f64, l: f64) -> Color {
    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
    let m = l - c / 2.0;

    let (r, g, b) = match ((h / 60.0).floor() as i64).rem_euclid(6) {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    Color::from_channels(scale(r + m), scale(g + m), scale(b + m))
}
