//! Parameter bags and typed operations.
//!
//! A [`ParamBag`] is the untyped form a host collects from its controls.
//! [`Operation::from_params`] checks it against the registry schema and turns
//! it into a typed [`Operation`] that carries exactly the values it needs.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{FilterError, FilterResult};
use crate::filters::registry::{schema_for, OperationKind};

/// Named integer parameter values for one invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParamBag(BTreeMap<String, i64>);

impl ParamBag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, name: impl Into<String>, value: i64) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: i64) -> Option<i64> {
        self.0.insert(name.into(), value)
    }

    pub fn get(&self, name: &str) -> Option<i64> {
        self.0.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, i64)> {
        self.0.iter().map(|(name, &value)| (name.as_str(), value))
    }
}

impl<K: Into<String>> FromIterator<(K, i64)> for ParamBag {
    fn from_iter<I: IntoIterator<Item = (K, i64)>>(iter: I) -> Self {
        ParamBag(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// A fully parameterized operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Negative,
    BrightnessBoost { strength: i32 },
    BinaryThreshold { threshold: i32 },
    Posterization { levels: u32 },
    Solarization { threshold: i32 },
    ChannelSwap,
}

impl Operation {
    pub fn kind(&self) -> OperationKind {
        match self {
            Operation::Negative => OperationKind::Negative,
            Operation::BrightnessBoost { .. } => OperationKind::BrightnessBoost,
            Operation::BinaryThreshold { .. } => OperationKind::BinaryThreshold,
            Operation::Posterization { .. } => OperationKind::Posterization,
            Operation::Solarization { .. } => OperationKind::Solarization,
            Operation::ChannelSwap => OperationKind::ChannelSwap,
        }
    }

    pub fn name(&self) -> &'static str {
        self.kind().name()
    }

    /// Build an operation from its catalog name and a parameter bag.
    ///
    /// The bag must hold exactly the schema's keys, each inside its domain.
    /// Nothing is clamped or defaulted.
    ///
    /// # Errors
    /// * [`FilterError::UnknownOperation`] - `name` is not in the catalog
    /// * [`FilterError::InvalidParameters`] - missing, unexpected or out-of-range key
    pub fn from_params(name: &str, params: &ParamBag) -> FilterResult<Self> {
        let schema = schema_for(name)?;

        if let Some((key, _)) = params.iter().find(|(key, _)| schema.param(key).is_none()) {
            return Err(FilterError::invalid_params(
                name,
                format!("unexpected parameter `{key}`"),
            ));
        }

        let value = |key: &str| -> FilterResult<i64> {
            // Every key requested below is declared in the schema.
            let spec = schema.param(key).ok_or_else(|| {
                FilterError::invalid_params(name, format!("no parameter `{key}`"))
            })?;
            let value = params.get(key).ok_or_else(|| {
                FilterError::invalid_params(name, format!("missing parameter `{key}`"))
            })?;
            if !spec.contains(value) {
                return Err(FilterError::invalid_params(
                    name,
                    format!("`{key}` = {value} is outside [{}, {}]", spec.min, spec.max),
                ));
            }
            Ok(value)
        };

        // Domains are far inside i32/u32, so the narrowing casts are exact.
        Ok(match schema.kind {
            OperationKind::Negative => Operation::Negative,
            OperationKind::BrightnessBoost => Operation::BrightnessBoost {
                strength: value("strength")? as i32,
            },
            OperationKind::BinaryThreshold => Operation::BinaryThreshold {
                threshold: value("threshold")? as i32,
            },
            OperationKind::Posterization => Operation::Posterization {
                levels: value("levels")? as u32,
            },
            OperationKind::Solarization => Operation::Solarization {
                threshold: value("threshold")? as i32,
            },
            OperationKind::ChannelSwap => Operation::ChannelSwap,
        })
    }

    /// Parameter bag equivalent to this operation.
    pub fn params(&self) -> ParamBag {
        match *self {
            Operation::Negative | Operation::ChannelSwap => ParamBag::new(),
            Operation::BrightnessBoost { strength } => {
                ParamBag::new().with("strength", strength.into())
            }
            Operation::BinaryThreshold { threshold } | Operation::Solarization { threshold } => {
                ParamBag::new().with("threshold", threshold.into())
            }
            Operation::Posterization { levels } => ParamBag::new().with("levels", levels.into()),
        }
    }

    /// Check the operation's values against its schema domain.
    pub fn validate(&self) -> FilterResult<()> {
        Operation::from_params(self.name(), &self.params()).map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_params_no_parameters() {
        let empty = ParamBag::new();
        assert_eq!(
            Operation::from_params("Image Negative", &empty).unwrap(),
            Operation::Negative
        );
        assert_eq!(
            Operation::from_params("Channel Swap (RGB)", &empty).unwrap(),
            Operation::ChannelSwap
        );
    }

    #[test]
    fn test_from_params_typed_values() {
        let bag = ParamBag::new().with("strength", -100);
        assert_eq!(
            Operation::from_params("Brightness Boost", &bag).unwrap(),
            Operation::BrightnessBoost { strength: -100 }
        );

        let bag = ParamBag::new().with("levels", 16);
        assert_eq!(
            Operation::from_params("Posterization", &bag).unwrap(),
            Operation::Posterization { levels: 16 }
        );

        let bag = ParamBag::new().with("threshold", 0);
        assert_eq!(
            Operation::from_params("Solarization", &bag).unwrap(),
            Operation::Solarization { threshold: 0 }
        );
        assert_eq!(
            Operation::from_params("Binary Threshold", &bag).unwrap(),
            Operation::BinaryThreshold { threshold: 0 }
        );
    }

    #[test]
    fn test_from_params_missing_key() {
        let err = Operation::from_params("Posterization", &ParamBag::new()).unwrap_err();
        assert_eq!(
            err,
            FilterError::InvalidParameters {
                operation: "Posterization".into(),
                reason: "missing parameter `levels`".into(),
            }
        );
    }

    #[test]
    fn test_from_params_unexpected_key() {
        let bag = ParamBag::new().with("strength", 10);
        let err = Operation::from_params("Image Negative", &bag).unwrap_err();
        assert!(matches!(err, FilterError::InvalidParameters { .. }));

        // Right key plus a stray one is still rejected
        let bag = ParamBag::new().with("threshold", 10).with("levels", 4);
        assert!(Operation::from_params("Binary Threshold", &bag).is_err());
    }

    #[test]
    fn test_from_params_out_of_domain_is_not_clamped() {
        let bag = ParamBag::new().with("levels", 1);
        let err = Operation::from_params("Posterization", &bag).unwrap_err();
        assert_eq!(
            err,
            FilterError::InvalidParameters {
                operation: "Posterization".into(),
                reason: "`levels` = 1 is outside [2, 16]".into(),
            }
        );

        let bag = ParamBag::new().with("strength", 101);
        assert!(Operation::from_params("Brightness Boost", &bag).is_err());
        let bag = ParamBag::new().with("threshold", 256);
        assert!(Operation::from_params("Solarization", &bag).is_err());
    }

    #[test]
    fn test_from_params_unknown_operation() {
        assert_eq!(
            Operation::from_params("Sepia", &ParamBag::new()),
            Err(FilterError::UnknownOperation("Sepia".into()))
        );
    }

    #[test]
    fn test_params_round_trip_through_schema() {
        for op in [
            Operation::Negative,
            Operation::BrightnessBoost { strength: 30 },
            Operation::BinaryThreshold { threshold: 128 },
            Operation::Posterization { levels: 4 },
            Operation::Solarization { threshold: 128 },
            Operation::ChannelSwap,
        ] {
            assert_eq!(Operation::from_params(op.name(), &op.params()).unwrap(), op);
            assert_eq!(op.kind().schema().default_params(), op.params());
        }
    }

    #[test]
    fn test_validate_typed_operation() {
        assert!(Operation::Posterization { levels: 0 }.validate().is_err());
        assert!(Operation::BrightnessBoost { strength: -101 }.validate().is_err());
        assert!(Operation::Solarization { threshold: 255 }.validate().is_ok());
    }

    #[test]
    fn test_param_bag_deserializes_from_json() {
        let bag: ParamBag = serde_json::from_str(r#"{"threshold": 128}"#).unwrap();
        assert_eq!(bag, ParamBag::new().with("threshold", 128));
    }
}
