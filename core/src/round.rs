//! Fixed-precision rounding for stored frequencies and weights.

const EPSILON: f64 = 1e-9;

fn scale(places: u32) -> f64 {
    10f64.powi(places as i32)
}

/// Round towards positive infinity at `places` decimals.
///
/// A scaled value within `1e-9` of an integer is taken as exact, otherwise a
/// ratio like `7 / 100` would ceil to `0.0701` on its binary representation error.
pub fn round_up(value: f64, places: u32) -> f64 {
    let factor = scale(places);
    let scaled = value * factor;
    let nearest = scaled.round();
    if (scaled - nearest).abs() < EPSILON {
        nearest / factor
    } else {
        scaled.ceil() / factor
    }
}

/// Round half away from zero at `places` decimals.
pub fn round_half_up(value: f64, places: u32) -> f64 {
    let factor = scale(places);
    (value * factor).round() / factor
}
