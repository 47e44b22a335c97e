#![forbid(unsafe_code)]

pub mod color;
pub mod engine;
pub mod error;
pub mod method;
pub mod record;
pub mod report;

pub use color::{psnr, rgb_to_yuv};
pub use engine::compute_quality_metric;
pub use error::{CloudRole, QualityError};
pub use method::{ParseQualityMethodError, QualityMethod, QualityParams};
pub use record::{CompressionStats, QualityMetric};
pub use report::{write_csv_header, write_csv_line, CSV_COLUMN_COUNT, CSV_HEADER};
