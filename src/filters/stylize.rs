//! Stylize filters: Binary Threshold, Posterization, Solarization.
//!
//! These are artistic effect filters. Like the color adjustments they work on
//! every channel independently and treat `max_val` as white.
//!
//! Parameters are integers in sample units; they are compared against the
//! promoted `f64` samples, so float rasters in 0.0-1.0 see every pixel as
//! "below" any threshold above zero.

use ndarray::{ArrayD, ArrayViewD};

use crate::filters::core::map_samples;
use crate::raster::Sample;

// ============================================================================
// Threshold
// ============================================================================

/// Apply binary threshold.
///
/// # Arguments
/// * `input` - Raster of any element type
/// * `threshold` - Samples strictly above this become white (0-255)
/// * `max_val` - Largest sample of `input`
///
/// # Returns
/// Raster containing only `0` and `max_val`
pub fn binary_threshold<T: Sample>(
    input: &ArrayViewD<T>,
    threshold: i32,
    max_val: f64,
    parallel: bool,
) -> ArrayD<T> {
    let t = f64::from(threshold);
    map_samples(input, parallel, |x| if x > t { max_val } else { 0.0 })
}

// ============================================================================
// Posterize
// ============================================================================

/// Reduce each channel to `levels` bands.
///
/// `step = max_val / levels`, `x' = floor(x / step) * step`. The step is
/// fractional in general; integer outputs truncate on the cast back, so
/// `187.5` becomes `187` in a `u8` raster.
///
/// A raster whose `max_val` is 0 has a zero step, giving NaN in float rasters
/// and 0 in integer ones.
///
/// # Arguments
/// * `input` - Raster of any element type
/// * `levels` - Number of bands (2-16)
/// * `max_val` - Largest sample of `input`
pub fn posterize<T: Sample>(
    input: &ArrayViewD<T>,
    levels: u32,
    max_val: f64,
    parallel: bool,
) -> ArrayD<T> {
    let step = max_val / f64::from(levels);
    map_samples(input, parallel, |x| (x / step).floor() * step)
}

// ============================================================================
// Solarize
// ============================================================================

/// Apply solarize effect.
///
/// Samples strictly below the threshold are kept; the rest are inverted
/// against `max_val`, creating a part-negative effect.
///
/// # Arguments
/// * `input` - Raster of any element type
/// * `threshold` - Threshold value (0-255)
/// * `max_val` - Largest sample of `input`
pub fn solarize<T: Sample>(
    input: &ArrayViewD<T>,
    threshold: i32,
    max_val: f64,
    parallel: bool,
) -> ArrayD<T> {
    let t = f64::from(threshold);
    map_samples(input, parallel, |x| if x < t { x } else { max_val - x })
}
