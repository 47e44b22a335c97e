use kiddo::float::distance::SquaredEuclidean;
use kiddo::immutable::float::kdtree::ImmutableKdTree;
use pcqm_core::PointCloud;
use std::num::NonZero;

/// A single nearest-neighbour hit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    /// Index into the cloud the tree was built from.
    pub index: usize,
    /// Squared Euclidean distance to the query.
    pub distance_sq: f32,
}

/// A KdTree for nearest-neighbour queries on 3D point clouds.
///
/// Built on top of kiddo v5's `ImmutableKdTree`, which uses a cache-optimized
/// layout for faster queries than the mutable variant. The tree is built once
/// and cannot be modified afterwards, so a single tree can be shared by any
/// number of concurrent readers.
///
/// The tree stores `u32` indices mapping back to the original PointCloud.
/// All distances reported by this type are **squared**.
#[derive(Debug, Clone)]
pub struct KdTree {
    tree: ImmutableKdTree<f32, u32, 3, 32>,
    num_points: usize,
}

impl KdTree {
    /// Build a KdTree from a PointCloud.
    ///
    /// Points are extracted into a contiguous `[[f32; 3]]` slice and fed to
    /// kiddo's `ImmutableKdTree` constructor, which builds a balanced,
    /// cache-optimized tree in one pass.
    pub fn build(cloud: &PointCloud) -> Self {
        let points: Vec<[f32; 3]> = cloud.iter_points().collect();
        Self {
            tree: ImmutableKdTree::new_from_slice(&points),
            num_points: points.len(),
        }
    }

    /// Returns the number of points in the tree.
    pub fn len(&self) -> usize {
        self.num_points
    }

    /// Returns true if the tree is empty.
    pub fn is_empty(&self) -> bool {
        self.num_points == 0
    }

    /// Find the `k` nearest neighbours to `query`.
    ///
    /// Returns `(indices, squared_distances)` sorted in ascending order by
    /// distance. A query point that is itself in the tree comes back first,
    /// at distance 0.
    ///
    /// Edge cases:
    /// - Returns empty if `k == 0`, cloud is empty, or query contains NaN.
    /// - If `k > len()`, returns all points.
    pub fn knn(&self, query: &[f32; 3], k: usize) -> (Vec<usize>, Vec<f32>) {
        let Some(nz_k) = NonZero::new(k) else {
            return (Vec::new(), Vec::new());
        };
        if self.is_empty() || !query.iter().all(|v| v.is_finite()) {
            return (Vec::new(), Vec::new());
        }

        let results = self.tree.nearest_n::<SquaredEuclidean>(query, nz_k);

        let mut indices = Vec::with_capacity(results.len());
        let mut distances = Vec::with_capacity(results.len());
        for nn in results {
            indices.push(nn.item as usize);
            distances.push(nn.distance);
        }

        (indices, distances)
    }

    /// Find the single nearest neighbour to `query`.
    ///
    /// Returns `None` if the tree is empty or the query is not finite.
    pub fn nearest(&self, query: &[f32; 3]) -> Option<Neighbor> {
        if self.is_empty() || !query.iter().all(|v| v.is_finite()) {
            return None;
        }

        let nn = self.tree.nearest_one::<SquaredEuclidean>(query);
        Some(Neighbor {
            index: nn.item as usize,
            distance_sq: nn.distance,
        })
    }
}
