//! sRGB transfer functions (IEC 61966-2-1).
//!
//! Piecewise curve with a linear toe and a 2.4 power segment. Inputs are
//! clamped to `[0, 1]`; the endpoints skip the `powf` entirely.

// Decoding threshold on the gamma-encoded side.
const SRGB_LINEAR_THRESHOLD: f64 = 0.04045;
// Encoding threshold on the linear side.
const LINEAR_THRESHOLD: f64 = 0.003_130_8;
const LINEAR_SLOPE: f64 = 12.92;
const SRGB_A: f64 = 0.055;
const SRGB_A_PLUS_1: f64 = 1.055;
const GAMMA: f64 = 2.4;
const INV_GAMMA: f64 = 1.0 / GAMMA;

/// Convert an sRGB gamma-encoded value to linear light.
///
/// NaN maps to 0.
#[inline]
pub fn srgb_to_linear(gamma: f64) -> f64 {
    if gamma.is_nan() || gamma <= 0.0 {
        0.0
    } else if gamma <= SRGB_LINEAR_THRESHOLD {
        gamma / LINEAR_SLOPE
    } else if gamma < 1.0 {
        ((gamma + SRGB_A) / SRGB_A_PLUS_1).powf(GAMMA)
    } else {
        1.0
    }
}

/// Convert a linear-light value to sRGB gamma-encoded.
///
/// NaN maps to 0.
#[inline]
pub fn linear_to_srgb(linear: f64) -> f64 {
    if linear.is_nan() || linear <= 0.0 {
        0.0
    } else if linear <= LINEAR_THRESHOLD {
        linear * LINEAR_SLOPE
    } else if linear < 1.0 {
        SRGB_A_PLUS_1.mul_add(linear.powf(INV_GAMMA), -SRGB_A)
    } else {
        1.0
    }
}
