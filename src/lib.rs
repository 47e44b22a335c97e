//! Objective quality metrics for point cloud compression.
//!
//! Re-exports the workspace crates under one roof:
//!
//! - [`cloud`]: point clouds and bounding boxes
//! - [`spatial`]: the k-d tree used for nearest-neighbour queries
//! - [`normalize`]: bounding-box fitting
//! - [`metric`]: Hausdorff / RMS / PSNR computation and CSV reporting

#![forbid(unsafe_code)]

pub use pcqm_core as cloud;
pub use pcqm_metric as metric;
pub use pcqm_normalize as normalize;
pub use pcqm_spatial as spatial;

pub use pcqm_core::{Aabb, Colors, PointCloud, PointXYZRGB};
pub use pcqm_metric::{
    compute_quality_metric, CompressionStats, QualityError, QualityMethod, QualityMetric,
    QualityParams,
};
