use approx::{assert_abs_diff_eq, relative_eq};
use pcqm::metric::{write_csv_header, write_csv_line, CSV_COLUMN_COUNT};
use pcqm::normalize::{fit_in_box, FitMode};
use pcqm::{
    compute_quality_metric, Aabb, Colors, CompressionStats, PointCloud, QualityMethod,
    QualityParams,
};
use proptest::prelude::*;

/// A 10x10x10 grid with a color gradient.
fn grid_cloud() -> PointCloud {
    let mut x = Vec::new();
    let mut y = Vec::new();
    let mut z = Vec::new();
    let mut r = Vec::new();
    let mut g = Vec::new();
    let mut b = Vec::new();
    for i in 0..10 {
        for j in 0..10 {
            for k in 0..10 {
                // small unique offsets keep coordinates distinct per axis
                let idx = (i * 100 + j * 10 + k) as f32;
                x.push(i as f32 + idx * 1e-5);
                y.push(j as f32 + idx * 1.3e-5);
                z.push(k as f32 + idx * 0.7e-5);
                r.push((i * 25) as u8);
                g.push((j * 25) as u8);
                b.push((k * 25) as u8);
            }
        }
    }
    PointCloud::from_xyz(x, y, z).with_colors(Colors { r, g, b })
}

/// End-to-end: distort → measure → report
#[test]
fn pipeline_measure_and_report() {
    let reference = grid_cloud();

    // Decoded cloud: every other point dropped and the rest shifted by 0.1
    let keep: Vec<usize> = (0..reference.len()).step_by(2).collect();
    let decoded = PointCloud::from_xyz(
        keep.iter().map(|&i| reference.x[i] + 0.1).collect(),
        keep.iter().map(|&i| reference.y[i]).collect(),
        keep.iter().map(|&i| reference.z[i]).collect(),
    )
    .with_colors(Colors {
        r: keep.iter().map(|&i| reference.colors.as_ref().unwrap().r[i]).collect(),
        g: keep.iter().map(|&i| reference.colors.as_ref().unwrap().g[i]).collect(),
        b: keep.iter().map(|&i| reference.colors.as_ref().unwrap().b[i]).collect(),
    });

    let metric = compute_quality_metric(&reference, &decoded, &QualityParams::default())
        .unwrap()
        .expect("original method produces a record")
        .with_compression(CompressionStats {
            compressed_size: 1500,
            byte_count_octree_layer: 500,
            byte_count_centroid_layer: 500,
            byte_count_color_layer: 500,
            encoding_time_ms: 2.0,
            decoding_time_ms: 1.0,
        });

    assert_eq!(metric.in_point_count, 1000);
    assert_eq!(metric.out_point_count, 500);

    // every decoded point is 0.1 away from its source point
    assert_abs_diff_eq!(metric.right_hausdorff, 0.1, epsilon = 1e-4);
    // dropped points are at most one grid step (plus the shift) away
    assert!(metric.left_hausdorff <= 1.2);
    assert!(metric.left_hausdorff >= metric.left_rms);
    assert_eq!(metric.symm_hausdorff, metric.left_hausdorff.max(metric.right_hausdorff));
    assert_eq!(metric.symm_rms, metric.left_rms.max(metric.right_rms));
    assert!(metric.psnr_db.is_finite() && metric.psnr_db > 0.0);

    let [y, u, v] = metric.psnr_yuv.expect("both clouds are colored");
    assert!(y.is_finite() && u.is_finite() && v.is_finite());

    assert!((metric.reference_spacing.unwrap() - 1.0).abs() < 2e-2);

    let mut csv = Vec::new();
    write_csv_header(&mut csv).unwrap();
    write_csv_line(&metric, "drop_half", &mut csv).unwrap();
    let text = String::from_utf8(csv).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 2);
    let cols: Vec<&str> = lines[1].trim_end_matches(';').split(';').collect();
    assert_eq!(cols.len(), CSV_COLUMN_COUNT);
    assert_eq!(cols[0], "drop_half");
    assert_eq!(cols[1], "1000");
    assert_eq!(cols[2], "500");
    assert_eq!(cols[3], "1500");
    assert_eq!(cols[4], "3");
    assert_eq!(cols[5], "1");
}

/// A uniformly scaled and shifted copy is identical once normalized.
#[test]
fn pipeline_normalization_cancels_affine_scaling() {
    let reference = grid_cloud();
    let (scaled, _) = fit_in_box(
        &reference,
        &Aabb::from_corners([-50.0, 10.0, 3.0], [50.0, 20.0, 4.0]),
        FitMode::Anisotropic,
    )
    .unwrap();

    let params = QualityParams::new(QualityMethod::Original).normalized();
    let metric = compute_quality_metric(&reference, &scaled, &params)
        .unwrap()
        .unwrap();

    assert!(metric.symm_hausdorff < 1e-4, "{}", metric.symm_hausdorff);
    assert_eq!(metric.psnr_yuv, Some([f64::INFINITY; 3]));

    // without normalization the clouds are far apart
    let raw = compute_quality_metric(&reference, &scaled, &QualityParams::default())
        .unwrap()
        .unwrap();
    assert!(raw.symm_hausdorff > 1.0);
}

/// Growing distortion lowers the geometric PSNR.
#[test]
fn pipeline_psnr_decreases_with_noise() {
    let reference = grid_cloud();
    let mut last = f64::INFINITY;
    for shift in [0.01f32, 0.05, 0.2] {
        let decoded = reference.map_positions(|p| [p[0], p[1] + shift, p[2]]);
        let metric = compute_quality_metric(&reference, &decoded, &QualityParams::default())
            .unwrap()
            .unwrap();
        assert!(
            metric.psnr_db < last,
            "psnr {} at shift {} not below {}",
            metric.psnr_db,
            shift,
            last
        );
        last = metric.psnr_db;
    }
}

#[test]
fn pipeline_skip_produces_nothing() {
    let reference = grid_cloud();
    let params = QualityParams::new(QualityMethod::Skip);
    assert_eq!(
        compute_quality_metric(&reference, &reference, &params),
        Ok(None)
    );
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Shifting every point by less than half a grid step moves each point
    /// exactly `shift` away from its nearest neighbour, in both directions.
    #[test]
    fn pipeline_small_shift_is_measured_exactly(shift in 0.01f32..0.45f32) {
        let reference = grid_cloud();
        let decoded = reference.map_positions(|p| [p[0], p[1] + shift, p[2]]);
        let metric = compute_quality_metric(&reference, &decoded, &QualityParams::default())
            .unwrap()
            .unwrap();

        let expected = f64::from(shift);
        prop_assert!(relative_eq!(metric.left_hausdorff, expected, epsilon = 1e-4));
        prop_assert!(relative_eq!(metric.right_hausdorff, expected, epsilon = 1e-4));
        prop_assert!(relative_eq!(metric.symm_rms, expected, epsilon = 1e-4));
        prop_assert_eq!(metric.psnr_yuv, Some([f64::INFINITY; 3]));
    }
}
