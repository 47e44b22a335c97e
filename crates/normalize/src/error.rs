use thiserror::Error;

/// Why a cloud could not be fitted into a target box.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NormalizeError {
    #[error("cannot fit an empty point cloud into a box")]
    EmptyCloud,

    #[error("point {index} has a non-finite coordinate")]
    NonFinitePoint { index: usize },

    /// The source cloud is flat along `axis` (0 = x, 1 = y, 2 = z), which
    /// would require an infinite scale factor.
    #[error("point cloud has zero extent along axis {axis}")]
    DegenerateExtent { axis: usize },
}
