//! Eman image filters
//!
//! Operation registry and pixel transforms for the Eman image module, with
//! Python bindings via PyO3 and WASM bindings for JavaScript.
//!
//! ## Image Format
//! Rasters are `ndarray` arrays:
//! - **Grayscale**: (height, width) or (height, width, 1)
//! - **RGB**: (height, width, 3)
//! - **RGBA**: (height, width, 4) - further channels are allowed
//!
//! Any integer or float element type is accepted and preserved. The white
//! point of range-relative filters is the brightest sample of the input,
//! not the type's maximum.
//!
//! ## Usage
//! ```rust
//! use eman_filters::{apply, list_operations, ParamBag, Raster};
//! use ndarray::array;
//!
//! assert_eq!(list_operations()[0], "Image Negative");
//!
//! let image = Raster::from(array![[10u8, 200], [50, 250]].into_dyn());
//! let params = ParamBag::new().with("threshold", 128);
//! let result = apply(&image, "Binary Threshold", &params).unwrap();
//! assert_eq!(result, Raster::from(array![[0u8, 250], [0, 250]].into_dyn()));
//! ```

pub mod error;
pub mod filters;
pub mod module;
pub mod raster;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use error::{FilterError, FilterResult};
pub use filters::engine::{apply, Engine, EngineConfig};
pub use filters::params::{Operation, ParamBag};
pub use filters::registry::{
    list_operations, schema_for, OperationKind, OperationSchema, ParamSpec,
};
pub use module::{EmanModule, ImageModule, ProcessRequest, SUPPORTED_FORMATS};
pub use raster::{Raster, Sample};

// Python bindings (only when python feature is enabled)
#[cfg(feature = "python")]
mod python {
    use numpy::{IntoPyArray, PyArrayDyn, PyArrayMethods};
    use pyo3::exceptions::{PyIOError, PyKeyError, PyTypeError, PyValueError};
    use pyo3::prelude::*;
    use pyo3::types::{PyDict, PyList};

    use crate::error::FilterError;
    use crate::filters::engine::Engine;
    use crate::filters::registry;
    use crate::module::{EmanModule, ImageModule, ProcessRequest, OPERATION_KEY};

    impl From<FilterError> for PyErr {
        fn from(err: FilterError) -> PyErr {
            match err {
                FilterError::UnknownOperation(_) => PyKeyError::new_err(err.to_string()),
                FilterError::Decode(_) => PyIOError::new_err(err.to_string()),
                _ => PyValueError::new_err(err.to_string()),
            }
        }
    }

    // ========================================================================
    // Registry
    // ========================================================================

    /// Names of all operations, in menu order.
    #[pyfunction]
    pub fn list_operations() -> Vec<&'static str> {
        registry::list_operations().to_vec()
    }

    /// Parameter schema of one operation as a dict.
    ///
    /// `{"name": str, "params": [{"name", "label", "min", "max", "default"}]}`
    #[pyfunction]
    pub fn schema_for<'py>(py: Python<'py>, name: &str) -> PyResult<Bound<'py, PyDict>> {
        let schema = registry::schema_for(name)?;

        let params = PyList::empty(py);
        for spec in schema.params {
            let entry = PyDict::new(py);
            entry.set_item("name", spec.name)?;
            entry.set_item("label", spec.label)?;
            entry.set_item("min", spec.min)?;
            entry.set_item("max", spec.max)?;
            entry.set_item("default", spec.default)?;
            params.append(entry)?;
        }

        let dict = PyDict::new(py);
        dict.set_item("name", schema.name)?;
        dict.set_item("params", params)?;
        Ok(dict)
    }

    // ========================================================================
    // Module
    // ========================================================================

    #[pyfunction]
    pub fn get_name() -> String {
        EmanModule::default().name().to_string()
    }

    #[pyfunction]
    pub fn get_supported_formats() -> Vec<&'static str> {
        crate::module::SUPPORTED_FORMATS.to_vec()
    }

    /// Apply the operation named by `params["operation"]` to a numpy image.
    ///
    /// The remaining entries of `params` are the operation's integer
    /// parameters. Returns a new array with the input's shape and dtype.
    #[pyfunction]
    pub fn process_image<'py>(
        py: Python<'py>,
        image: &Bound<'py, PyAny>,
        params: &Bound<'py, PyDict>,
    ) -> PyResult<Bound<'py, PyAny>> {
        let mut operation = None;
        let mut values = Vec::with_capacity(params.len());
        for (key, value) in params.iter() {
            let key: String = key.extract()?;
            if key == OPERATION_KEY {
                operation = Some(value.extract::<String>()?);
            } else {
                values.push((key, value.extract::<i64>()?));
            }
        }
        let request = ProcessRequest::from_pairs(
            operation.as_deref(),
            values.iter().map(|(key, value)| (key.as_str(), *value)),
        )?;

        let engine = Engine::default();

        macro_rules! dispatch {
            ($($ty:ty),*) => {
                $(
                    if let Ok(array) = image.downcast::<PyArrayDyn<$ty>>() {
                        let readonly = array.try_readonly()?;
                        let input = readonly.as_array();
                        let result = py.allow_threads(|| {
                            engine.apply(&input, &request.operation, &request.params)
                        })?;
                        return Ok(result.into_pyarray(py).into_any());
                    }
                )*
            };
        }

        dispatch!(u8, u16, u32, u64, i8, i16, i32, i64, f32, f64);

        Err(PyTypeError::new_err(format!(
            "unsupported image type: {}",
            image.get_type().name()?
        )))
    }

    // ========================================================================
    // Module Registration
    // ========================================================================

    #[pymodule]
    pub fn eman_filters(m: &Bound<'_, PyModule>) -> PyResult<()> {
        // Registry
        m.add_function(wrap_pyfunction!(list_operations, m)?)?;
        m.add_function(wrap_pyfunction!(schema_for, m)?)?;

        // Module contract
        m.add_function(wrap_pyfunction!(get_name, m)?)?;
        m.add_function(wrap_pyfunction!(get_supported_formats, m)?)?;
        m.add_function(wrap_pyfunction!(process_image, m)?)?;

        Ok(())
    }
}

#[cfg(feature = "python")]
pub use python::eman_filters;
