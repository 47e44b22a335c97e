//! Semicolon-delimited report lines, one per compared frame.
//!
//! The column order and the header text are fixed so that the output can be
//! appended to existing result files and read by the same analysis scripts.

use std::io::{self, Write};

use crate::record::QualityMetric;

pub const CSV_COLUMN_COUNT: usize = 16;

/// Header line, including the trailing delimiter and newline.
pub const CSV_HEADER: &str = "compression setting; in point count;out point count;\
compressed_byte_size;compressed_byte_size_per_output_point;\
octree_byte_size_per_voxel;centroid_byte_size_per_voxel;color_byte_size_per_voxel;\
symm_rms;symm_haussdorff;psnr_db;psnr_colors_y;psnr_colors_u;psnr_colors_v;\
encoding_time_ms;decoding_time_ms;\n";

pub fn write_csv_header<W: Write>(out: &mut W) -> io::Result<()> {
    out.write_all(CSV_HEADER.as_bytes())
}

/// Write one report line for `metric`, labelled with `compression_setting`.
///
/// Color PSNR columns are written as `NaN` when the clouds had no colors.
pub fn write_csv_line<W: Write>(
    metric: &QualityMetric,
    compression_setting: &str,
    out: &mut W,
) -> io::Result<()> {
    let stats = &metric.compression;
    let [psnr_y, psnr_u, psnr_v] = metric.psnr_yuv.unwrap_or([f64::NAN; 3]);

    writeln!(
        out,
        "{};{};{};{};{};{};{};{};{};{};{};{};{};{};{};{};",
        compression_setting,
        metric.in_point_count,
        metric.out_point_count,
        stats.compressed_size,
        metric.per_output_point(stats.compressed_size),
        metric.per_output_point(stats.byte_count_octree_layer),
        metric.per_output_point(stats.byte_count_centroid_layer),
        metric.per_output_point(stats.byte_count_color_layer),
        metric.symm_rms,
        metric.symm_hausdorff,
        metric.psnr_db,
        psnr_y,
        psnr_u,
        psnr_v,
        stats.encoding_time_ms,
        stats.decoding_time_ms,
    )
}
