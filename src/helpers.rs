#[cfg(test)]
macro_rules! assert_approx_eq {
	($left: expr, $right: expr, $tol: expr) => ({
		match ($left, $right, $tol) {
			(left_val , right_val, tol_val) => {
				let delta = (left_val - right_val).abs();
				if !(delta < tol_val) {
					panic!(
						"assertion failed: `(left ≈ right)` \
						(left: `{}`, right: `{}`) \
						with ∆={:1.1e} (allowed ∆={:e})",
						left_val , right_val, delta, tol_val
					)
				}
			}
		}
	});
	($left: expr, $right: expr) => (assert_approx_eq!(($left), ($right), 1e-15))
}

#[cfg(test)]
pub(crate) mod testing {
	use std::collections::HashSet;

	use crate::{ClusterEngine, ClusterState, Coordinate, Primitive, Scalar};

	/// Every cell of a `height x width` grid appears in exactly one cluster.
	pub fn assert_partition_complete(clusters: &[Vec<Coordinate>], height: usize, width: usize) {
		let mut seen = HashSet::new();
		for (idx, members) in clusters.iter().enumerate() {
			for &coord in members {
				assert!(coord.row < height && coord.col < width, "Cluster {} contains {:?} outside of the grid", idx, coord);
				if !seen.insert(coord) {
					panic!("Coordinate {:?} is assigned more than once (again in cluster {})", coord, idx);
				}
			}
		}
		assert_eq!(seen.len(), height * width, "Partition does not cover the grid");
	}

	/// One more assignment pass against the final centroids does not change the partition.
	pub fn assert_fixed_point<T: Scalar, F: Primitive>(engine: &ClusterEngine<T, F>) {
		let mut should: Vec<Vec<Coordinate>> = vec![Vec::new(); engine.k()];
		for (idx, members) in engine.clustered().iter().enumerate() {
			for &coord in members {
				let (best_idx, _) = ClusterEngine::<T, F>::nearest_centroid(engine.centroids(), engine.sample(coord));
				if best_idx != idx {
					panic!("{:?} moves from cluster {} to {}. Centroids: {:?}", coord, idx, best_idx, engine.centroids());
				}
				should[best_idx].push(coord);
			}
		}
		let state: &ClusterState<F> = engine.state();
		assert_eq!(state.clusters, should);
	}
}
