use std::fmt;

use pcqm_normalize::NormalizeError;
use thiserror::Error;

use crate::method::QualityMethod;

/// Which side of a comparison a cloud is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloudRole {
    /// The original cloud (A).
    Reference,
    /// The decoded cloud (B).
    Distorted,
}

impl fmt::Display for CloudRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CloudRole::Reference => f.write_str("reference"),
            CloudRole::Distorted => f.write_str("distorted"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum QualityError {
    #[error("{role} point cloud is empty")]
    EmptyCloud { role: CloudRole },

    #[error("{role} point cloud has a non-finite coordinate at point {index}")]
    NonFinitePoint { role: CloudRole, index: usize },

    #[error("{role} point cloud has {colors} colors for {points} points")]
    ColorCountMismatch {
        role: CloudRole,
        colors: usize,
        points: usize,
    },

    #[error("quality method `{method}` is not implemented")]
    NotImplemented { method: QualityMethod },

    #[error("failed to normalize {role} point cloud")]
    Normalize {
        role: CloudRole,
        #[source]
        source: NormalizeError,
    },
}
