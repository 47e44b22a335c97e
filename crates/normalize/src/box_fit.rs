use nalgebra::{Matrix4, Vector4};
use pcqm_core::{Aabb, PointCloud};

use crate::error::NormalizeError;

/// How the per-axis scale factors of a box fit relate to each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FitMode {
    /// Each axis is scaled independently so the source box fills the
    /// target box exactly.
    #[default]
    Anisotropic,
    /// Procrustes fit: all axes share the smallest of the three scale
    /// factors, so the shape of the cloud is preserved.
    Isotropic,
}

/// Homogeneous 4x4 scale-then-translate transform that maps one
/// axis-aligned box onto another.
///
/// The matrix has the scale factors on its diagonal and the translation in
/// its last column:
///
/// ```text
/// | sx  0   0   tx |
/// | 0   sy  0   ty |
/// | 0   0   sz  tz |
/// | 0   0   0   1  |
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxFitTransform {
    matrix: Matrix4<f32>,
}

impl BoxFitTransform {
    pub fn identity() -> Self {
        Self {
            matrix: Matrix4::identity(),
        }
    }

    pub fn from_scale_translation(scale: [f32; 3], translation: [f32; 3]) -> Self {
        #[rustfmt::skip]
        let matrix = Matrix4::new(
            scale[0], 0.0,      0.0,      translation[0],
            0.0,      scale[1], 0.0,      translation[1],
            0.0,      0.0,      scale[2], translation[2],
            0.0,      0.0,      0.0,      1.0,
        );
        Self { matrix }
    }

    /// Compute the transform that maps `source` onto `target`.
    ///
    /// The source minimum corner always lands exactly on the target minimum
    /// corner. In [`FitMode::Isotropic`] the source maximum only reaches the
    /// target maximum along the most constrained axis.
    ///
    /// # Errors
    ///
    /// Returns [`NormalizeError::EmptyCloud`] if either box is empty and
    /// [`NormalizeError::DegenerateExtent`] if the source box is flat along
    /// an axis.
    pub fn fit(source: &Aabb, target: &Aabb, mode: FitMode) -> Result<Self, NormalizeError> {
        if source.is_empty() || target.is_empty() {
            return Err(NormalizeError::EmptyCloud);
        }

        let src_extent = source.extent();
        let dst_extent = target.extent();

        let mut scale = [0.0f32; 3];
        for axis in 0..3 {
            if src_extent[axis] <= 0.0 {
                return Err(NormalizeError::DegenerateExtent { axis });
            }
            scale[axis] = dst_extent[axis] / src_extent[axis];
        }

        if mode == FitMode::Isotropic {
            let s = scale[0].min(scale[1]).min(scale[2]);
            scale = [s; 3];
        }

        let translation = [
            target.min[0] - scale[0] * source.min[0],
            target.min[1] - scale[1] * source.min[1],
            target.min[2] - scale[2] * source.min[2],
        ];

        Ok(Self::from_scale_translation(scale, translation))
    }

    pub fn matrix(&self) -> &Matrix4<f32> {
        &self.matrix
    }

    pub fn scale(&self) -> [f32; 3] {
        [
            self.matrix[(0, 0)],
            self.matrix[(1, 1)],
            self.matrix[(2, 2)],
        ]
    }

    pub fn translation(&self) -> [f32; 3] {
        [
            self.matrix[(0, 3)],
            self.matrix[(1, 3)],
            self.matrix[(2, 3)],
        ]
    }

    pub fn is_identity(&self, eps: f32) -> bool {
        self.matrix
            .iter()
            .zip(Matrix4::<f32>::identity().iter())
            .all(|(a, b)| (a - b).abs() <= eps)
    }

    /// Apply the transform to a single point: M * [x, y, z, 1]
    pub fn apply_to_point(&self, p: &[f32; 3]) -> [f32; 3] {
        let h = self.matrix * Vector4::new(p[0], p[1], p[2], 1.0);
        [h.x, h.y, h.z]
    }
}

impl Default for BoxFitTransform {
    fn default() -> Self {
        Self::identity()
    }
}

/// Apply a box-fit transform to all points in a cloud, returning a new cloud.
/// Colors are copied unchanged.
pub fn apply_box_fit(cloud: &PointCloud, transform: &BoxFitTransform) -> PointCloud {
    cloud.map_positions(|p| transform.apply_to_point(&p))
}

/// Fit `cloud` into `target`, returning the fitted copy and the transform
/// that produced it. The input cloud is left untouched.
///
/// # Errors
///
/// Fails on an empty cloud, a cloud containing non-finite coordinates, or a
/// cloud that is flat along any axis.
pub fn fit_in_box(
    cloud: &PointCloud,
    target: &Aabb,
    mode: FitMode,
) -> Result<(PointCloud, BoxFitTransform), NormalizeError> {
    if cloud.is_empty() {
        return Err(NormalizeError::EmptyCloud);
    }
    if let Some(index) = cloud.first_non_finite() {
        return Err(NormalizeError::NonFinitePoint { index });
    }

    let transform = BoxFitTransform::fit(&cloud.aabb(), target, mode)?;
    Ok((apply_box_fit(cloud, &transform), transform))
}

/// Anisotropically fit `cloud` into the unit box `[0, 1]^3`.
pub fn normalize_to_unit_box(cloud: &PointCloud) -> Result<PointCloud, NormalizeError> {
    fit_in_box(cloud, &Aabb::unit(), FitMode::Anisotropic).map(|(fitted, _)| fitted)
}
