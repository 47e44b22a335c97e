use std::borrow::Cow;
use std::time::Instant;

use pcqm_core::PointCloud;
use pcqm_normalize::normalize_to_unit_box;
use pcqm_spatial::{KdTree, Neighbor};
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::color::{psnr, rgb_to_yuv};
use crate::error::{CloudRole, QualityError};
use crate::method::{QualityMethod, QualityParams};
use crate::record::{CompressionStats, QualityMetric};

/// Compare `reference` (A) against `distorted` (B).
///
/// Geometry is compared in both directions with nearest-neighbour queries;
/// color is compared from A to B only, after converting both sides to YUV.
/// When `params.normalize` is set both clouds are first fitted into the
/// unit box, each on its own bounding box. The inputs are never modified.
///
/// Returns `Ok(None)` for [`QualityMethod::Skip`].
///
/// Per-point queries run on the rayon pool, but the reductions are done in
/// point order, so the result does not depend on the number of threads.
///
/// # Errors
///
/// - [`QualityError::NotImplemented`] for the reserved methods.
/// - [`QualityError::EmptyCloud`], [`QualityError::NonFinitePoint`] or
///   [`QualityError::ColorCountMismatch`] for unusable input.
/// - [`QualityError::Normalize`] if a cloud cannot be fitted into the unit
///   box (for example a flat cloud).
pub fn compute_quality_metric(
    reference: &PointCloud,
    distorted: &PointCloud,
    params: &QualityParams,
) -> Result<Option<QualityMetric>, QualityError> {
    let method = params.method;
    if !method.is_implemented() {
        warn!(%method, "quality method not yet implemented");
        return Err(QualityError::NotImplemented { method });
    }
    if method == QualityMethod::Skip {
        debug!("quality metric skipped");
        return Ok(None);
    }

    validate(reference, CloudRole::Reference)?;
    validate(distorted, CloudRole::Distorted)?;

    let start = Instant::now();

    let (a, b) = if params.normalize {
        (
            Cow::Owned(normalize(reference, CloudRole::Reference)?),
            Cow::Owned(normalize(distorted, CloudRole::Distorted)?),
        )
    } else {
        (Cow::Borrowed(reference), Cow::Borrowed(distorted))
    };

    // One tree per cloud; the tree over A serves both the self query and
    // the B -> A direction.
    let tree_a = KdTree::build(&a);
    let tree_b = KdTree::build(&b);

    let reference_spacing = max_neighbor_spacing(&a, &tree_a);
    let a_to_b = nearest_stats(&a, &b, &tree_b, true);
    let b_to_a = nearest_stats(&b, &a, &tree_a, false);

    debug!(
        max_dist_sq = a_to_b.max_dist_sq,
        sum_dist_sq = a_to_b.sum_dist_sq,
        "A -> B nearest neighbours"
    );
    debug!(
        max_dist_sq = b_to_a.max_dist_sq,
        sum_dist_sq = b_to_a.sum_dist_sq,
        "B -> A nearest neighbours"
    );

    let n_a = a.len() as f64;
    let n_b = b.len() as f64;

    let left_hausdorff = a_to_b.max_dist_sq.sqrt();
    let right_hausdorff = b_to_a.max_dist_sq.sqrt();
    let left_rms = (a_to_b.sum_dist_sq / n_a).sqrt();
    let right_rms = (b_to_a.sum_dist_sq / n_b).sqrt();
    let symm_hausdorff = left_hausdorff.max(right_hausdorff);
    let symm_rms = left_rms.max(right_rms);

    let peak = a.aabb().max;
    let peak_energy: f64 = peak.iter().map(|&v| f64::from(v) * f64::from(v)).sum();
    let psnr_db = psnr(peak_energy, symm_rms * symm_rms);

    let psnr_yuv = a_to_b.color.map(|color| {
        let mut out = [0.0; 3];
        for c in 0..3 {
            let mse = color.sum_sq_err[c] / n_a;
            out[c] = psnr(color.peak[c] * color.peak[c], mse);
        }
        out
    });

    let compute_time_ms = start.elapsed().as_secs_f64() * 1e3;

    info!(
        elapsed_ms = compute_time_ms,
        left_hausdorff,
        right_hausdorff,
        symm_hausdorff,
        symm_rms,
        psnr_db,
        "quality metric computed"
    );
    if let Some([y, u, v]) = psnr_yuv {
        info!(psnr_y = y, psnr_u = u, psnr_v = v, "A -> B color psnr");
    }

    Ok(Some(QualityMetric {
        in_point_count: reference.len(),
        out_point_count: distorted.len(),
        left_hausdorff,
        right_hausdorff,
        symm_hausdorff,
        left_rms,
        right_rms,
        symm_rms,
        psnr_db,
        psnr_yuv,
        reference_spacing,
        compute_time_ms,
        compression: CompressionStats::default(),
    }))
}

fn validate(cloud: &PointCloud, role: CloudRole) -> Result<(), QualityError> {
    if cloud.is_empty() {
        return Err(QualityError::EmptyCloud { role });
    }
    if let Some(index) = cloud.first_non_finite() {
        return Err(QualityError::NonFinitePoint { role, index });
    }
    if let Some(colors) = &cloud.colors {
        let points = cloud.len();
        let bad = [colors.r.len(), colors.g.len(), colors.b.len()]
            .into_iter()
            .find(|&n| n != points);
        if let Some(colors) = bad {
            return Err(QualityError::ColorCountMismatch {
                role,
                colors,
                points,
            });
        }
    }
    Ok(())
}

fn normalize(cloud: &PointCloud, role: CloudRole) -> Result<PointCloud, QualityError> {
    normalize_to_unit_box(cloud).map_err(|source| QualityError::Normalize { role, source })
}

/// Accumulated error of one query direction.
#[derive(Debug, Clone, Copy, PartialEq)]
struct DirectionStats {
    max_dist_sq: f64,
    sum_dist_sq: f64,
    color: Option<ColorStats>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct ColorStats {
    sum_sq_err: [f64; 3],
    /// Per channel, the query-side YUV value with the largest magnitude.
    peak: [f64; 3],
}

/// For every point of `query`, find its nearest neighbour in `target`
/// (through `target_tree`) and accumulate squared distances. With
/// `with_color` set and both clouds colored, also accumulate the squared
/// YUV difference between each query point and its neighbour.
fn nearest_stats(
    query: &PointCloud,
    target: &PointCloud,
    target_tree: &KdTree,
    with_color: bool,
) -> DirectionStats {
    let neighbors: Vec<(usize, Neighbor)> = (0..query.len())
        .into_par_iter()
        .filter_map(|i| target_tree.nearest(&query.point(i)).map(|nn| (i, nn)))
        .collect();
    debug_assert_eq!(neighbors.len(), query.len());

    let colors = match (&query.colors, &target.colors) {
        (Some(q), Some(t)) if with_color => Some((q, t)),
        _ => None,
    };

    let mut max_dist_sq = 0.0f64;
    let mut sum_dist_sq = 0.0f64;
    let mut color = colors.map(|_| ColorStats {
        sum_sq_err: [0.0; 3],
        peak: [0.0; 3],
    });

    for &(i, nn) in &neighbors {
        let d = f64::from(nn.distance_sq);
        max_dist_sq = max_dist_sq.max(d);
        sum_dist_sq += d;

        if let (Some((q, t)), Some(stats)) = (colors, color.as_mut()) {
            let in_yuv = rgb_to_yuv(q.get(i));
            let out_yuv = rgb_to_yuv(t.get(nn.index));
            for c in 0..3 {
                if in_yuv[c] * in_yuv[c] > stats.peak[c] * stats.peak[c] {
                    stats.peak[c] = in_yuv[c];
                }
                let diff = in_yuv[c] - out_yuv[c];
                stats.sum_sq_err[c] += diff * diff;
            }
        }
    }

    DirectionStats {
        max_dist_sq,
        sum_dist_sq,
        color,
    }
}

/// Largest distance from any point to its nearest *other* point of the same
/// cloud. The first hit of a 2-NN self query is the point itself.
fn max_neighbor_spacing(cloud: &PointCloud, tree: &KdTree) -> Option<f64> {
    if cloud.len() < 2 {
        return None;
    }

    let max_sq = (0..cloud.len())
        .into_par_iter()
        .filter_map(|i| {
            let (_, dists) = tree.knn(&cloud.point(i), 2);
            dists.get(1).copied()
        })
        .reduce(|| 0.0f32, f32::max);

    debug!(max_spacing_sq = max_sq, "reference self spacing");
    Some(f64::from(max_sq).sqrt())
}
