//! Pixel transform engine.
//!
//! [`Engine::apply`] resolves an operation name plus a [`ParamBag`] into a
//! typed [`Operation`] and runs it over the whole raster. Every call is a
//! pure function of its inputs: the input is only read, `max_val` is reduced
//! fresh, and a new raster of the same shape and element type is returned.
//! Nothing is produced unless every step succeeds.

use ndarray::{ArrayD, ArrayViewD};
use tracing::{debug, trace};

use crate::error::FilterResult;
use crate::filters::channels::swap_red_blue;
use crate::filters::color_adjust::{brightness_boost, negative};
use crate::filters::core::max_sample;
use crate::filters::params::{Operation, ParamBag};
use crate::filters::stylize::{binary_threshold, posterize, solarize};
use crate::raster::{map_raster, validate_shape, Raster, Sample};

/// Execution settings for the engine.
///
/// Results never depend on these; they only pick sequential or rayon
/// execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Allow rayon execution (needs the `parallel` feature).
    pub parallel: bool,
    /// Rasters with fewer samples run sequentially.
    pub parallel_min_samples: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            parallel: true,
            parallel_min_samples: 1 << 16,
        }
    }
}

impl EngineConfig {
    pub fn sequential() -> Self {
        Self {
            parallel: false,
            ..Self::default()
        }
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_parallel_min_samples(mut self, samples: usize) -> Self {
        self.parallel_min_samples = samples;
        self
    }
}

/// Stateless operation runner.
#[derive(Debug, Clone, Copy, Default)]
pub struct Engine {
    config: EngineConfig,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    fn use_parallel(&self, samples: usize) -> bool {
        cfg!(feature = "parallel")
            && self.config.parallel
            && samples >= self.config.parallel_min_samples
    }

    /// Apply the operation called `name` with `params` to a typed raster.
    ///
    /// # Errors
    /// * `UnknownOperation` - `name` is not in the catalog
    /// * `InvalidParameters` - `params` does not match the schema
    /// * `ShapeError` - `input` is not `(H, W)` / `(H, W, C)` or is empty
    pub fn apply<T: Sample>(
        &self,
        input: &ArrayViewD<T>,
        name: &str,
        params: &ParamBag,
    ) -> FilterResult<ArrayD<T>> {
        let op = Operation::from_params(name, params)?;
        self.apply_operation(input, &op)
    }

    /// Apply an already typed operation.
    ///
    /// The operation's values are still checked against its schema.
    pub fn apply_operation<T: Sample>(
        &self,
        input: &ArrayViewD<T>,
        op: &Operation,
    ) -> FilterResult<ArrayD<T>> {
        op.validate()?;
        validate_shape(input.shape())?;

        let parallel = self.use_parallel(input.len());
        trace!(parallel, samples = input.len(), "apply_operation");

        debug!(
            operation = op.name(),
            shape = ?input.shape(),
            dtype = T::DTYPE,
            "Applying operation"
        );

        // Full reduction before any sample is transformed. Channel Swap
        // never reads the range.
        let range = || {
            let max_val = max_sample(input, parallel);
            trace!(max_val, "sample range");
            max_val
        };

        let output = match *op {
            Operation::Negative => negative(input, range(), parallel),
            Operation::BrightnessBoost { strength } => {
                brightness_boost(input, strength, range(), parallel)
            }
            Operation::BinaryThreshold { threshold } => {
                binary_threshold(input, threshold, range(), parallel)
            }
            Operation::Posterization { levels } => posterize(input, levels, range(), parallel),
            Operation::Solarization { threshold } => solarize(input, threshold, range(), parallel),
            Operation::ChannelSwap => swap_red_blue(input, parallel)?,
        };
        Ok(output)
    }

    /// Apply `name` to a dynamically typed raster, keeping its element type.
    pub fn apply_raster(
        &self,
        raster: &Raster,
        name: &str,
        params: &ParamBag,
    ) -> FilterResult<Raster> {
        let op = Operation::from_params(name, params)?;
        self.apply_raster_operation(raster, &op)
    }

    pub fn apply_raster_operation(&self, raster: &Raster, op: &Operation) -> FilterResult<Raster> {
        Ok(map_raster!(raster, arr => self.apply_operation(&arr.view(), op)?))
    }
}

/// Apply `name` with `params` using the default engine configuration.
pub fn apply(raster: &Raster, name: &str, params: &ParamBag) -> FilterResult<Raster> {
    Engine::default().apply_raster(raster, name, params)
}
