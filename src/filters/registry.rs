//! Operation catalog: names, declaration order and parameter schemas.
//!
//! The catalog is fixed at compile time. Hosts use [`list_operations`] to
//! populate a selection control and [`schema_for`] to build the parameter
//! form of the selected entry; the engine consults the same schemas when it
//! validates a [`ParamBag`](super::params::ParamBag).

use std::fmt;

use serde::Serialize;

use crate::error::{FilterError, FilterResult};
use crate::filters::params::ParamBag;

/// Closed set of supported operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum OperationKind {
    Negative,
    BrightnessBoost,
    BinaryThreshold,
    Posterization,
    Solarization,
    ChannelSwap,
}

impl OperationKind {
    /// All operations in declaration order.
    pub const ALL: [OperationKind; 6] = [
        OperationKind::Negative,
        OperationKind::BrightnessBoost,
        OperationKind::BinaryThreshold,
        OperationKind::Posterization,
        OperationKind::Solarization,
        OperationKind::ChannelSwap,
    ];

    /// Display name, also the lookup key.
    pub const fn name(self) -> &'static str {
        match self {
            OperationKind::Negative => "Image Negative",
            OperationKind::BrightnessBoost => "Brightness Boost",
            OperationKind::BinaryThreshold => "Binary Threshold",
            OperationKind::Posterization => "Posterization",
            OperationKind::Solarization => "Solarization",
            OperationKind::ChannelSwap => "Channel Swap (RGB)",
        }
    }

    pub fn from_name(name: &str) -> FilterResult<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == name)
            .ok_or_else(|| FilterError::UnknownOperation(name.to_string()))
    }

    pub fn schema(self) -> &'static OperationSchema {
        &SCHEMAS[self as usize]
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One integer parameter with its inclusive domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ParamSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub min: i64,
    pub max: i64,
    pub default: i64,
}

impl ParamSpec {
    pub fn contains(&self, value: i64) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

/// Parameter schema of one operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OperationSchema {
    #[serde(skip)]
    pub kind: OperationKind,
    pub name: &'static str,
    pub params: &'static [ParamSpec],
}

impl OperationSchema {
    pub fn param(&self, name: &str) -> Option<&'static ParamSpec> {
        self.params.iter().find(|spec| spec.name == name)
    }

    /// A bag holding every parameter at its default value.
    pub fn default_params(&self) -> ParamBag {
        self.params
            .iter()
            .map(|spec| (spec.name, spec.default))
            .collect()
    }
}

const STRENGTH: ParamSpec = ParamSpec {
    name: "strength",
    label: "Brightness Strength",
    min: -100,
    max: 100,
    default: 30,
};

const THRESHOLD: ParamSpec = ParamSpec {
    name: "threshold",
    label: "Threshold Value",
    min: 0,
    max: 255,
    default: 128,
};

const LEVELS: ParamSpec = ParamSpec {
    name: "levels",
    label: "Number of Levels",
    min: 2,
    max: 16,
    default: 4,
};

const SOLARIZE_THRESHOLD: ParamSpec = ParamSpec {
    label: "Solarization Threshold",
    ..THRESHOLD
};

// Indexed by `OperationKind as usize`.
static SCHEMAS: [OperationSchema; 6] = [
    OperationSchema {
        kind: OperationKind::Negative,
        name: OperationKind::Negative.name(),
        params: &[],
    },
    OperationSchema {
        kind: OperationKind::BrightnessBoost,
        name: OperationKind::BrightnessBoost.name(),
        params: &[STRENGTH],
    },
    OperationSchema {
        kind: OperationKind::BinaryThreshold,
        name: OperationKind::BinaryThreshold.name(),
        params: &[THRESHOLD],
    },
    OperationSchema {
        kind: OperationKind::Posterization,
        name: OperationKind::Posterization.name(),
        params: &[LEVELS],
    },
    OperationSchema {
        kind: OperationKind::Solarization,
        name: OperationKind::Solarization.name(),
        params: &[SOLARIZE_THRESHOLD],
    },
    OperationSchema {
        kind: OperationKind::ChannelSwap,
        name: OperationKind::ChannelSwap.name(),
        params: &[],
    },
];

static NAMES: [&str; 6] = [
    OperationKind::Negative.name(),
    OperationKind::BrightnessBoost.name(),
    OperationKind::BinaryThreshold.name(),
    OperationKind::Posterization.name(),
    OperationKind::Solarization.name(),
    OperationKind::ChannelSwap.name(),
];

/// Names of all supported operations, in declaration order.
pub fn list_operations() -> &'static [&'static str] {
    &NAMES
}

/// Parameter schema for the operation called `name`.
///
/// # Errors
/// [`FilterError::UnknownOperation`] if `name` is not in the catalog.
pub fn schema_for(name: &str) -> FilterResult<&'static OperationSchema> {
    OperationKind::from_name(name).map(OperationKind::schema)
}
