//! Error types for filter operations.

use thiserror::Error;

/// Error type for registry lookups and pixel transforms.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FilterError {
    /// Operation name is not in the catalog.
    #[error("unknown operation: {0:?}")]
    UnknownOperation(String),

    /// Parameter bag does not match the operation's schema.
    #[error("invalid parameters for {operation:?}: {reason}")]
    InvalidParameters { operation: String, reason: String },

    /// Raster has an unusable shape.
    #[error("invalid raster shape: {0}")]
    ShapeError(String),

    /// The host's decoder could not produce a raster.
    #[error("decode failed: {0}")]
    Decode(String),
}

impl FilterError {
    pub(crate) fn invalid_params(operation: &str, reason: impl Into<String>) -> Self {
        FilterError::InvalidParameters {
            operation: operation.to_string(),
            reason: reason.into(),
        }
    }
}

impl From<ndarray::ShapeError> for FilterError {
    fn from(err: ndarray::ShapeError) -> Self {
        FilterError::ShapeError(err.to_string())
    }
}

/// Result type for filter operations.
pub type FilterResult<T> = Result<T, FilterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_operation() {
        let err = FilterError::invalid_params("Posterization", "missing parameter `levels`");
        assert_eq!(
            err.to_string(),
            "invalid parameters for \"Posterization\": missing parameter `levels`"
        );
        assert_eq!(
            FilterError::UnknownOperation("Blur".into()).to_string(),
            "unknown operation: \"Blur\""
        );
    }

    #[test]
    fn test_from_ndarray_shape_error() {
        let err = ndarray::Array2::<u8>::from_shape_vec((2, 2), vec![1, 2, 3]).unwrap_err();
        assert!(matches!(FilterError::from(err), FilterError::ShapeError(_)));
    }
}
