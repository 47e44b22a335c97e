/// Figures about the codec run that produced the distorted cloud. These are
/// measured by the caller and only carried through to the report.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CompressionStats {
    pub compressed_size: u64,
    pub byte_count_octree_layer: u64,
    pub byte_count_centroid_layer: u64,
    pub byte_count_color_layer: u64,
    pub encoding_time_ms: f64,
    pub decoding_time_ms: f64,
}

/// Result of comparing a reference cloud (A) against a distorted cloud (B).
///
/// "Left" values are measured from A to B, "right" values from B to A, and
/// the symmetric value is the larger of the two.
#[derive(Debug, Clone, PartialEq)]
pub struct QualityMetric {
    pub in_point_count: usize,
    pub out_point_count: usize,

    pub left_hausdorff: f64,
    pub right_hausdorff: f64,
    pub symm_hausdorff: f64,

    pub left_rms: f64,
    pub right_rms: f64,
    pub symm_rms: f64,

    /// Geometric PSNR of the symmetric RMS error against the squared norm
    /// of the reference bounding-box max corner.
    pub psnr_db: f64,
    /// Y, U, V PSNR from A to B. `None` unless both clouds carry colors.
    pub psnr_yuv: Option<[f64; 3]>,

    /// Largest distance from a reference point to its nearest other
    /// reference point. `None` for a single-point reference.
    pub reference_spacing: Option<f64>,
    /// Wall time spent computing this record.
    pub compute_time_ms: f64,

    pub compression: CompressionStats,
}

impl QualityMetric {
    pub fn with_compression(mut self, compression: CompressionStats) -> Self {
        self.compression = compression;
        self
    }

    /// `bytes` divided by the number of decoded points.
    pub fn per_output_point(&self, bytes: u64) -> f64 {
        bytes as f64 / self.out_point_count as f64
    }
}
