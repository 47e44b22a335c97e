#![forbid(unsafe_code)]

pub mod box_fit;
pub mod error;

pub use box_fit::{apply_box_fit, fit_in_box, normalize_to_unit_box, BoxFitTransform, FitMode};
pub use error::NormalizeError;
