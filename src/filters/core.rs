//! Core utilities shared by the pixel transforms.
//!
//! This module provides the two passes every range-relative filter needs:
//! - the `max_val` reduction over all samples
//! - the pointwise sample map, computed in `f64` and cast back
//!
//! Both passes run on rayon when `parallel` is requested and the crate is
//! built with the `parallel` feature. The reduction always completes before
//! a map begins, so the results do not depend on the execution mode.

use ndarray::{ArrayD, ArrayViewD};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::raster::Sample;

/// `max` that propagates NaN like numpy's reduction does.
#[inline]
fn nan_max(a: f64, b: f64) -> f64 {
    if a.is_nan() || b.is_nan() {
        f64::NAN
    } else {
        a.max(b)
    }
}

/// Largest sample in `input`, promoted to `f64`.
///
/// Returns `f64::NEG_INFINITY` for an empty array; callers validate the
/// shape first.
pub fn max_sample<T: Sample>(input: &ArrayViewD<T>, parallel: bool) -> f64 {
    #[cfg(feature = "parallel")]
    if parallel {
        return input
            .clone()
            .into_par_iter()
            .map(|&v| v.to_f64())
            .reduce(|| f64::NEG_INFINITY, nan_max);
    }
    #[cfg(not(feature = "parallel"))]
    let _ = parallel;

    input
        .iter()
        .fold(f64::NEG_INFINITY, |acc, &v| nan_max(acc, v.to_f64()))
}

/// Apply `f` to every sample and return a new array of the same type.
///
/// # Arguments
/// * `input` - Source raster, left untouched
/// * `parallel` - Spread the work over the rayon pool
/// * `f` - Pointwise formula on the promoted `f64` value
///
/// # Returns
/// New array with the same shape; each result cast back via [`Sample::from_f64`]
pub fn map_samples<T, F>(input: &ArrayViewD<T>, parallel: bool, f: F) -> ArrayD<T>
where
    T: Sample,
    F: Fn(f64) -> f64 + Send + Sync,
{
    #[cfg(feature = "parallel")]
    if parallel {
        let mut output = input.to_owned();
        output.par_mapv_inplace(|v| T::from_f64(f(v.to_f64())));
        return output;
    }
    #[cfg(not(feature = "parallel"))]
    let _ = parallel;

    input.mapv(|v| T::from_f64(f(v.to_f64())))
}
