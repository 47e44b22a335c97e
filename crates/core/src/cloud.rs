use crate::{Aabb, HasColor, HasPosition};

/// A point cloud stored as parallel coordinate arrays with optional
/// per-point RGB colors.
#[derive(Debug, Clone, PartialEq)]
pub struct PointCloud {
    pub x: Vec<f32>,
    pub y: Vec<f32>,
    pub z: Vec<f32>,
    pub colors: Option<Colors>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Colors {
    pub r: Vec<u8>,
    pub g: Vec<u8>,
    pub b: Vec<u8>,
}

impl Colors {
    pub fn len(&self) -> usize {
        self.r.len()
    }

    pub fn is_empty(&self) -> bool {
        self.r.is_empty()
    }

    pub fn get(&self, i: usize) -> [u8; 3] {
        [self.r[i], self.g[i], self.b[i]]
    }

    /// Every point gets the same color.
    pub fn uniform(color: [u8; 3], n: usize) -> Self {
        Self {
            r: vec![color[0]; n],
            g: vec![color[1]; n],
            b: vec![color[2]; n],
        }
    }
}

impl PointCloud {
    pub fn new() -> Self {
        Self {
            x: Vec::new(),
            y: Vec::new(),
            z: Vec::new(),
            colors: None,
        }
    }

    pub fn from_xyz(x: Vec<f32>, y: Vec<f32>, z: Vec<f32>) -> Self {
        assert_eq!(x.len(), y.len(), "x and y must have same length");
        assert_eq!(x.len(), z.len(), "x and z must have same length");

        Self {
            x,
            y,
            z,
            colors: None,
        }
    }

    /// Attach colors to the cloud.
    ///
    /// # Panics
    ///
    /// Panics if any color channel length differs from the point count.
    pub fn with_colors(mut self, colors: Colors) -> Self {
        assert_eq!(colors.r.len(), self.len(), "red channel length mismatch");
        assert_eq!(colors.g.len(), self.len(), "green channel length mismatch");
        assert_eq!(colors.b.len(), self.len(), "blue channel length mismatch");
        self.colors = Some(colors);
        self
    }

    pub fn from_points<P: HasPosition>(points: &[P]) -> Self {
        let mut x = Vec::with_capacity(points.len());
        let mut y = Vec::with_capacity(points.len());
        let mut z = Vec::with_capacity(points.len());

        for p in points {
            let [px, py, pz] = p.position();
            x.push(px);
            y.push(py);
            z.push(pz);
        }

        Self::from_xyz(x, y, z)
    }

    pub fn from_colored_points<P: HasPosition + HasColor>(points: &[P]) -> Self {
        let colors = Colors {
            r: points.iter().map(|p| p.color()[0]).collect(),
            g: points.iter().map(|p| p.color()[1]).collect(),
            b: points.iter().map(|p| p.color()[2]).collect(),
        };
        Self::from_points(points).with_colors(colors)
    }

    pub fn len(&self) -> usize {
        debug_assert_eq!(self.x.len(), self.y.len());
        debug_assert_eq!(self.x.len(), self.z.len());
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn has_colors(&self) -> bool {
        self.colors.is_some()
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::from_xyz(&self.x, &self.y, &self.z)
    }

    pub fn point(&self, i: usize) -> [f32; 3] {
        [self.x[i], self.y[i], self.z[i]]
    }

    /// RGB of point `i`, or `None` for an uncolored cloud.
    pub fn color(&self, i: usize) -> Option<[u8; 3]> {
        self.colors.as_ref().map(|c| c.get(i))
    }

    pub fn iter_points(&self) -> impl Iterator<Item = [f32; 3]> + '_ {
        self.x
            .iter()
            .zip(&self.y)
            .zip(&self.z)
            .map(|((x, y), z)| [*x, *y, *z])
    }

    /// Index of the first point with a NaN or infinite coordinate.
    pub fn first_non_finite(&self) -> Option<usize> {
        self.iter_points()
            .position(|p| !p.iter().all(|v| v.is_finite()))
    }

    /// Build a new cloud by mapping every position through `f`.
    /// Colors are carried over unchanged.
    pub fn map_positions<F>(&self, mut f: F) -> Self
    where
        F: FnMut([f32; 3]) -> [f32; 3],
    {
        let n = self.len();
        let mut x = Vec::with_capacity(n);
        let mut y = Vec::with_capacity(n);
        let mut z = Vec::with_capacity(n);

        for p in self.iter_points() {
            let [px, py, pz] = f(p);
            x.push(px);
            y.push(py);
            z.push(pz);
        }

        Self {
            x,
            y,
            z,
            colors: self.colors.clone(),
        }
    }
}

impl Default for PointCloud {
    fn default() -> Self {
        Self::new()
    }
}
