//! Filter registry and pixel transforms.
//!
//! ## Supported Formats
//!
//! Every filter accepts 2-D or 3-D rasters of any [`Sample`](crate::raster::Sample)
//! element type:
//!
//! | Format | Shape | Type | Description |
//! |--------|-------|------|-------------|
//! | Grayscale | (H, W) | any | Single channel |
//! | Grayscale | (H, W, 1) | any | Single channel, explicit axis |
//! | RGB | (H, W, 3) | any | Red, green, blue |
//! | RGBA | (H, W, 4+) | any | RGB plus alpha or extra planes |
//!
//! Output always has the input's shape and element type.
//!
//! ## Architecture
//!
//! - **Range-relative** - the white point `max_val` is the brightest sample
//!   of the input, reduced once per call before any sample is transformed
//! - **Promoted arithmetic** - samples are computed as `f64` and cast back
//! - **Copy semantics** - the input raster is only read
//! - **Thread-safe** - no shared state; rayon is used for large rasters
//!
//! ## Operations
//!
//! | Name | Parameters | Module |
//! |------|------------|--------|
//! | Image Negative | - | [`color_adjust`] |
//! | Brightness Boost | `strength` -100..=100 | [`color_adjust`] |
//! | Binary Threshold | `threshold` 0..=255 | [`stylize`] |
//! | Posterization | `levels` 2..=16 | [`stylize`] |
//! | Solarization | `threshold` 0..=255 | [`stylize`] |
//! | Channel Swap (RGB) | - | [`channels`] |

pub mod channels;
pub mod color_adjust;
pub mod core;
pub mod engine;
pub mod params;
pub mod registry;
pub mod stylize;
