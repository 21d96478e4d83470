//! Color adjustment filters: Image Negative, Brightness Boost.
//!
//! Both are pointwise and range-relative: the white point is `max_val`, the
//! largest sample of the input raster, not the element type's maximum.
//!
//! ## Supported Formats
//!
//! Every channel is processed, alpha included:
//! - **Grayscale**: (height, width) or (height, width, 1)
//! - **RGB**: (height, width, 3)
//! - **RGBA**: (height, width, 4)

use ndarray::{ArrayD, ArrayViewD};

use crate::filters::core::map_samples;
use crate::raster::Sample;

// ============================================================================
// Negative
// ============================================================================

/// Invert every sample against the raster's white point.
///
/// # Arguments
/// * `input` - Raster of any element type
/// * `max_val` - Largest sample of `input`
///
/// # Returns
/// Raster with `x' = max_val - x`
pub fn negative<T: Sample>(input: &ArrayViewD<T>, max_val: f64, parallel: bool) -> ArrayD<T> {
    map_samples(input, parallel, |x| max_val - x)
}

// ============================================================================
// Brightness
// ============================================================================

/// Shift every sample by `strength`, clamped to `[0, max_val]`.
///
/// # Arguments
/// * `input` - Raster of any element type
/// * `strength` - Signed offset in sample units (-100 to 100)
/// * `max_val` - Largest sample of `input`
///
/// # Returns
/// Raster with `x' = clamp(x + strength, 0, max_val)`
pub fn brightness_boost<T: Sample>(
    input: &ArrayViewD<T>,
    strength: i32,
    max_val: f64,
    parallel: bool,
) -> ArrayD<T> {
    let offset = f64::from(strength);
    map_samples(input, parallel, |x| {
        // f64::max/min drop NaN; the clamp must carry it through.
        if x.is_nan() || max_val.is_nan() {
            return f64::NAN;
        }
        // Lower bound first, then upper: stays total when max_val < 0.
        (x + offset).max(0.0).min(max_val)
    })
}
