use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Which distortion definition to compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum QualityMethod {
    /// Do not compute any metric.
    Skip,
    /// Symmetric nearest-neighbour distance with per-channel color PSNR.
    #[default]
    Original,
    /// Reserved. Reports "not implemented".
    Tcsvt,
    /// Reserved. Reports "not implemented".
    MaxNearestNeighbor,
}

impl QualityMethod {
    pub fn is_implemented(self) -> bool {
        matches!(self, QualityMethod::Skip | QualityMethod::Original)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            QualityMethod::Skip => "skip",
            QualityMethod::Original => "original",
            QualityMethod::Tcsvt => "tcsvt",
            QualityMethod::MaxNearestNeighbor => "max_nn",
        }
    }
}

impl fmt::Display for QualityMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown quality method `{0}` (expected skip, original, tcsvt or max_nn)")]
pub struct ParseQualityMethodError(pub String);

impl FromStr for QualityMethod {
    type Err = ParseQualityMethodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "skip" => Ok(QualityMethod::Skip),
            "original" => Ok(QualityMethod::Original),
            "tcsvt" => Ok(QualityMethod::Tcsvt),
            "max_nn" | "max-nn" => Ok(QualityMethod::MaxNearestNeighbor),
            _ => Err(ParseQualityMethodError(s.to_string())),
        }
    }
}

/// Settings for one quality-metric comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct QualityParams {
    pub method: QualityMethod,
    /// Fit both clouds into the unit box before measuring distances.
    pub normalize: bool,
}

impl QualityParams {
    pub fn new(method: QualityMethod) -> Self {
        Self {
            method,
            normalize: false,
        }
    }

    pub fn normalized(mut self) -> Self {
        self.normalize = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_original_without_normalization() {
        let params = QualityParams::default();
        assert_eq!(params.method, QualityMethod::Original);
        assert!(!params.normalize);
    }

    #[test]
    fn normalized_sets_flag_only() {
        let params = QualityParams::new(QualityMethod::Skip).normalized();
        assert_eq!(params.method, QualityMethod::Skip);
        assert!(params.normalize);
    }

    #[test]
    fn parse_round_trips_display() {
        for method in [
            QualityMethod::Skip,
            QualityMethod::Original,
            QualityMethod::Tcsvt,
            QualityMethod::MaxNearestNeighbor,
        ] {
            assert_eq!(method.to_string().parse::<QualityMethod>(), Ok(method));
        }
        assert_eq!(" ORIGINAL ".parse::<QualityMethod>(), Ok(QualityMethod::Original));
    }

    #[test]
    fn parse_rejects_unknown() {
        let err = "hausdorff".parse::<QualityMethod>().unwrap_err();
        assert_eq!(err, ParseQualityMethodError("hausdorff".to_string()));
    }

    #[test]
    fn reserved_methods_are_not_implemented() {
        assert!(QualityMethod::Skip.is_implemented());
        assert!(QualityMethod::Original.is_implemented());
        assert!(!QualityMethod::Tcsvt.is_implemented());
        assert!(!QualityMethod::MaxNearestNeighbor.is_implemented());
    }
}
