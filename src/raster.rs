//! Raster element types and the dynamically typed [`Raster`] container.
//!
//! A raster is an `ndarray` array shaped `(height, width)` for single-channel
//! images or `(height, width, channels)` for multi-channel ones. The element
//! type is whatever the host decoded; transforms compute in `f64` and cast
//! back with [`Sample::from_f64`].

use ndarray::ArrayD;
use num_traits::AsPrimitive;

use crate::error::{FilterError, FilterResult};

/// Numeric element type a raster can hold.
///
/// `from_f64` uses Rust's `as` conversion: fractional values truncate toward
/// zero, out-of-range values saturate at the type bounds and NaN becomes 0
/// for integer types.
pub trait Sample: Copy + PartialOrd + Send + Sync + std::fmt::Debug + 'static {
    /// Name of the element type, numpy style (`"uint8"`, `"float32"`, ...).
    const DTYPE: &'static str;

    fn to_f64(self) -> f64;

    fn from_f64(value: f64) -> Self;
}

macro_rules! impl_sample {
    ($($ty:ty => $name:literal),* $(,)?) => {
        $(
            impl Sample for $ty {
                const DTYPE: &'static str = $name;

                #[inline]
                fn to_f64(self) -> f64 {
                    self.as_()
                }

                #[inline]
                fn from_f64(value: f64) -> Self {
                    value.as_()
                }
            }
        )*
    };
}

impl_sample!(
    u8 => "uint8",
    u16 => "uint16",
    u32 => "uint32",
    u64 => "uint64",
    i8 => "int8",
    i16 => "int16",
    i32 => "int32",
    i64 => "int64",
    f32 => "float32",
    f64 => "float64",
);

/// Check that a shape is `(H, W)` or `(H, W, C)` with at least one sample.
pub fn validate_shape(shape: &[usize]) -> FilterResult<()> {
    match shape.len() {
        0 | 1 => {
            return Err(FilterError::ShapeError(format!(
                "expected at least 2 dimensions, got {}",
                shape.len()
            )))
        }
        2 => {}
        3 => {
            if shape[2] < 1 {
                return Err(FilterError::ShapeError(
                    "channel count must be at least 1".into(),
                ));
            }
        }
        n => {
            return Err(FilterError::ShapeError(format!(
                "expected (height, width) or (height, width, channels), got {n} dimensions"
            )))
        }
    }

    if shape.iter().any(|&len| len == 0) {
        return Err(FilterError::ShapeError(format!(
            "raster {shape:?} has no samples"
        )));
    }

    Ok(())
}

/// Number of channels: 1 for 2-D rasters, the last axis length otherwise.
pub fn channel_count(shape: &[usize]) -> usize {
    if shape.len() == 3 {
        shape[2]
    } else {
        1
    }
}

/// A raster whose element type is only known at runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum Raster {
    U8(ArrayD<u8>),
    U16(ArrayD<u16>),
    U32(ArrayD<u32>),
    U64(ArrayD<u64>),
    I8(ArrayD<i8>),
    I16(ArrayD<i16>),
    I32(ArrayD<i32>),
    I64(ArrayD<i64>),
    F32(ArrayD<f32>),
    F64(ArrayD<f64>),
}

/// Run `$body` with `$arr` bound to the inner array, whatever its type.
macro_rules! with_raster {
    ($raster:expr, $arr:ident => $body:expr) => {
        match $raster {
            Raster::U8($arr) => $body,
            Raster::U16($arr) => $body,
            Raster::U32($arr) => $body,
            Raster::U64($arr) => $body,
            Raster::I8($arr) => $body,
            Raster::I16($arr) => $body,
            Raster::I32($arr) => $body,
            Raster::I64($arr) => $body,
            Raster::F32($arr) => $body,
            Raster::F64($arr) => $body,
        }
    };
}

/// Like `with_raster!`, but rewraps the resulting array in the same variant.
macro_rules! map_raster {
    ($raster:expr, $arr:ident => $body:expr) => {
        match $raster {
            Raster::U8($arr) => Raster::U8($body),
            Raster::U16($arr) => Raster::U16($body),
            Raster::U32($arr) => Raster::U32($body),
            Raster::U64($arr) => Raster::U64($body),
            Raster::I8($arr) => Raster::I8($body),
            Raster::I16($arr) => Raster::I16($body),
            Raster::I32($arr) => Raster::I32($body),
            Raster::I64($arr) => Raster::I64($body),
            Raster::F32($arr) => Raster::F32($body),
            Raster::F64($arr) => Raster::F64($body),
        }
    };
}

pub(crate) use map_raster;

impl Raster {
    pub fn shape(&self) -> &[usize] {
        with_raster!(self, arr => arr.shape())
    }

    pub fn ndim(&self) -> usize {
        self.shape().len()
    }

    pub fn channels(&self) -> usize {
        channel_count(self.shape())
    }

    pub fn dtype(&self) -> &'static str {
        fn name<T: Sample>(_: &ArrayD<T>) -> &'static str {
            T::DTYPE
        }
        with_raster!(self, arr => name(arr))
    }

    /// Largest sample in the raster, promoted to `f64`.
    pub fn max_val(&self) -> FilterResult<f64> {
        with_raster!(self, arr => {
            validate_shape(arr.shape())?;
            Ok(crate::filters::core::max_sample(&arr.view(), false))
        })
    }
}

macro_rules! impl_from_array {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<ArrayD<$ty>> for Raster {
                fn from(arr: ArrayD<$ty>) -> Self {
                    Raster::$variant(arr)
                }
            }
        )*
    };
}

impl_from_array!(
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    f32 => F32,
    f64 => F64,
);
