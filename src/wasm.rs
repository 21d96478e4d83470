//! WebAssembly exports for the Eman filters.
//!
//! These functions are exposed to JavaScript via wasm-bindgen.
//!
//! ## Buffer Layout
//!
//! Images travel as flat, interleaved buffers of `width * height * channels`
//! samples. Two element types are exported:
//! - **u8**: 8-bit per channel, standard for canvas `ImageData`
//! - **f32**: float per channel
//!
//! Every operation takes at most one parameter, so it is passed as an
//! optional `value` and mapped onto the operation's single schema key.

use ndarray::{ArrayD, IxDyn};
use wasm_bindgen::prelude::*;

use crate::error::FilterResult;
use crate::filters::engine::Engine;
use crate::filters::params::ParamBag;
use crate::filters::registry::{list_operations, schema_for};
use crate::raster::Sample;

fn params_for(operation: &str, value: Option<i32>) -> FilterResult<ParamBag> {
    let schema = schema_for(operation)?;
    let mut params = ParamBag::new();
    if let (Some(spec), Some(value)) = (schema.params.first(), value) {
        params.insert(spec.name, i64::from(value));
    }
    Ok(params)
}

fn apply_flat<T: Sample>(
    data: &[T],
    width: usize,
    height: usize,
    channels: usize,
    operation: &str,
    value: Option<i32>,
) -> FilterResult<Vec<T>> {
    let shape = if channels == 1 {
        vec![height, width]
    } else {
        vec![height, width, channels]
    };
    let input = ArrayD::from_shape_vec(IxDyn(&shape), data.to_vec())?;
    let params = params_for(operation, value)?;

    let result = Engine::default().apply(&input.view(), operation, &params)?;
    Ok(result.into_raw_vec_and_offset().0)
}

// ============================================================================
// Registry
// ============================================================================

/// Names of all operations, in menu order.
#[wasm_bindgen]
pub fn list_operations_wasm() -> Vec<String> {
    list_operations().iter().map(|name| name.to_string()).collect()
}

// ============================================================================
// Filters
// ============================================================================

/// Apply an operation to a u8 image.
///
/// # Arguments
/// * `data` - Flat array of samples (length = width * height * channels)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `channels` - Samples per pixel (1, 3 or 4)
/// * `operation` - Operation name, e.g. "Posterization"
/// * `value` - The operation's parameter, omitted for parameterless ones
///
/// # Returns
/// Flat array with the same layout
#[wasm_bindgen]
pub fn apply_filter_u8_wasm(
    data: &[u8],
    width: usize,
    height: usize,
    channels: usize,
    operation: &str,
    value: Option<i32>,
) -> Result<Vec<u8>, JsError> {
    Ok(apply_flat(data, width, height, channels, operation, value)?)
}

/// Apply an operation to an f32 image.
#[wasm_bindgen]
pub fn apply_filter_f32_wasm(
    data: &[f32],
    width: usize,
    height: usize,
    channels: usize,
    operation: &str,
    value: Option<i32>,
) -> Result<Vec<f32>, JsError> {
    Ok(apply_flat(data, width, height, channels, operation, value)?)
}
