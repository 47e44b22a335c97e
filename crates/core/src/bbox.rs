#[derive(Debug, Clone, PartialEq)]
pub struct Aabb {
    pub min: [f32; 3],
    pub max: [f32; 3],
    empty: bool,
}

impl Aabb {
    pub fn empty() -> Self {
        Self {
            min: [f32::INFINITY; 3],
            max: [f32::NEG_INFINITY; 3],
            empty: true,
        }
    }

    /// Box spanning the two given corners. Each axis is ordered, so the
    /// corners may be passed in either order.
    pub fn from_corners(a: [f32; 3], b: [f32; 3]) -> Self {
        let mut aabb = Self::empty();
        aabb.expand_with_point(a);
        aabb.expand_with_point(b);
        aabb
    }

    /// The canonical `[0, 1]^3` box that clouds are normalized into.
    pub fn unit() -> Self {
        Self::from_corners([0.0; 3], [1.0; 3])
    }

    pub fn is_empty(&self) -> bool {
        self.empty
    }

    pub fn expand_with_point(&mut self, point: [f32; 3]) {
        if !point.iter().all(|v| v.is_finite()) {
            return;
        }

        if self.empty {
            self.min = point;
            self.max = point;
            self.empty = false;
            return;
        }

        for (axis, &val) in point.iter().enumerate() {
            self.min[axis] = self.min[axis].min(val);
            self.max[axis] = self.max[axis].max(val);
        }
    }

    /// Per-axis `max - min`. Zero for an empty box.
    pub fn extent(&self) -> [f32; 3] {
        if self.empty {
            return [0.0; 3];
        }
        [
            self.max[0] - self.min[0],
            self.max[1] - self.min[1],
            self.max[2] - self.min[2],
        ]
    }

    pub fn from_xyz(x: &[f32], y: &[f32], z: &[f32]) -> Self {
        let n = x.len().min(y.len()).min(z.len());
        let mut aabb = Self::empty();
        for i in 0..n {
            aabb.expand_with_point([x[i], y[i], z[i]]);
        }
        aabb
    }
}
