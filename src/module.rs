//! Host plugin contract.
//!
//! The host application discovers image modules, asks them for a name and
//! the file formats its decoder should accept, and forwards processing
//! requests coming from the module's controls. Decoding, display and the
//! control widgets belong to the host.

use crate::error::{FilterError, FilterResult};
use crate::filters::engine::Engine;
use crate::filters::params::ParamBag;
use crate::raster::Raster;

/// File extensions the host's decoder is expected to handle for this module.
pub const SUPPORTED_FORMATS: [&str; 5] = ["png", "jpg", "jpeg", "bmp", "tiff"];

/// Key carrying the operation name in a flat request.
pub const OPERATION_KEY: &str = "operation";

/// One processing request: the selected operation and its parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessRequest {
    pub operation: String,
    pub params: ParamBag,
}

impl ProcessRequest {
    pub fn new(operation: impl Into<String>, params: ParamBag) -> Self {
        Self {
            operation: operation.into(),
            params,
        }
    }

    /// Build a request from a host's flat control map.
    ///
    /// The host pulls the name out of its [`OPERATION_KEY`] entry and passes
    /// the remaining integer entries as `values`. Every pair becomes a
    /// parameter, so stray keys are rejected when the request is applied.
    pub fn from_pairs<'a, I>(operation: Option<&str>, values: I) -> FilterResult<Self>
    where
        I: IntoIterator<Item = (&'a str, i64)>,
    {
        let operation = operation.ok_or_else(|| {
            FilterError::invalid_params("", format!("request has no `{OPERATION_KEY}` entry"))
        })?;
        Ok(Self::new(operation, values.into_iter().collect()))
    }
}

/// An image module as seen by the host.
///
/// The host decodes files itself, using [`supported_formats`] to pick the
/// files it offers. When its decoder fails there is no raster to process;
/// the host reports that through the same error channel as a failed
/// request by building [`FilterError::Decode`] with the decoder's message.
///
/// ```
/// use eman_filters::{FilterError, FilterResult, Raster};
///
/// fn decode(bytes: &[u8]) -> FilterResult<Raster> {
///     Err(FilterError::Decode(format!("{} bytes, no known header", bytes.len())))
/// }
///
/// let err = decode(b"GIF8").unwrap_err();
/// assert_eq!(err.to_string(), "decode failed: 4 bytes, no known header");
/// ```
///
/// [`supported_formats`]: ImageModule::supported_formats
pub trait ImageModule: Send + Sync {
    fn name(&self) -> &str;

    fn supported_formats(&self) -> &[&str];

    /// Transform `image` as described by `request`.
    fn process_image(&self, image: &Raster, request: &ProcessRequest) -> FilterResult<Raster>;
}

/// The Eman filter module.
#[derive(Debug, Clone, Default)]
pub struct EmanModule {
    engine: Engine,
}

impl EmanModule {
    pub fn new(engine: Engine) -> Self {
        Self { engine }
    }
}

impl ImageModule for EmanModule {
    fn name(&self) -> &str {
        "Eman Module"
    }

    fn supported_formats(&self) -> &[&str] {
        &SUPPORTED_FORMATS
    }

    fn process_image(&self, image: &Raster, request: &ProcessRequest) -> FilterResult<Raster> {
        self.engine
            .apply_raster(image, &request.operation, &request.params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_module_identity() {
        let module = EmanModule::default();
        assert_eq!(module.name(), "Eman Module");
        assert_eq!(module.supported_formats(), &["png", "jpg", "jpeg", "bmp", "tiff"]);
    }

    #[test]
    fn test_process_image() {
        let module = EmanModule::default();
        let image = Raster::from(array![[[10u8, 20, 30], [40, 50, 60]]].into_dyn());
        let request = ProcessRequest::new("Channel Swap (RGB)", ParamBag::new());

        let result = module.process_image(&image, &request).unwrap();

        assert_eq!(result, Raster::from(array![[[30u8, 20, 10], [60, 50, 40]]].into_dyn()));
    }

    #[test]
    fn test_process_image_reports_bad_request() {
        let module = EmanModule::default();
        let image = Raster::from(array![[1.0f32, 2.0]].into_dyn());
        let params = ParamBag::new().with("strength", 500);
        let request = ProcessRequest::new("Brightness Boost", params);

        assert!(matches!(
            module.process_image(&image, &request),
            Err(FilterError::InvalidParameters { .. })
        ));
    }

    #[test]
    fn test_request_from_pairs() {
        let request = ProcessRequest::from_pairs(Some("Posterization"), [("levels", 6)]).unwrap();
        assert_eq!(request.operation, "Posterization");
        assert_eq!(request.params, ParamBag::new().with("levels", 6));

        assert!(ProcessRequest::from_pairs(None, [("levels", 6)]).is_err());
    }

    #[test]
    fn test_request_from_pairs_keeps_every_pair() {
        let pairs = [(OPERATION_KEY, 0), ("levels", 6)];
        let request = ProcessRequest::from_pairs(Some("Posterization"), pairs).unwrap();
        assert_eq!(request.params.len(), 2);
        assert_eq!(request.params.get(OPERATION_KEY), Some(0));

        let image = Raster::from(array![[1u8, 2]].into_dyn());
        assert!(matches!(
            EmanModule::default().process_image(&image, &request),
            Err(FilterError::InvalidParameters { .. })
        ));
    }

    /// Host side of a failed decode: no raster reaches the module.
    fn load_and_process(
        module: &dyn ImageModule,
        decoded: Result<Raster, String>,
        request: &ProcessRequest,
    ) -> FilterResult<Raster> {
        let image = decoded.map_err(FilterError::Decode)?;
        module.process_image(&image, request)
    }

    #[test]
    fn test_host_reports_decode_failure() {
        let module = EmanModule::default();
        let request = ProcessRequest::new("Image Negative", ParamBag::new());

        let err =
            load_and_process(&module, Err("truncated PNG chunk".into()), &request).unwrap_err();
        assert_eq!(err, FilterError::Decode("truncated PNG chunk".into()));
        assert_eq!(err.to_string(), "decode failed: truncated PNG chunk");

        let image = Raster::from(array![[0u8, 255]].into_dyn());
        assert_eq!(
            load_and_process(&module, Ok(image), &request).unwrap(),
            Raster::from(array![[255u8, 0]].into_dyn())
        );
    }

    #[test]
    fn test_module_is_object_safe() {
        let modules: Vec<Box<dyn ImageModule>> = vec![Box::new(EmanModule::default())];
        assert_eq!(modules[0].name(), "Eman Module");
    }
}
