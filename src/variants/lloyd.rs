use crate::{ClusterConfig, ClusterEngine, ClusterError, ClusterState, grid::Coordinate, primitives::*};
use log::{debug, warn};

pub(crate) struct Lloyd<T, F> where T: Scalar, F: Primitive {
	_p: std::marker::PhantomData<(T, F)>
}
impl<T, F> Lloyd<T, F> where T: Scalar, F: Primitive {
	/// First assignment pass: every cell (row-major) is assigned to its nearest centroid.
	/// The partition is empty at this point, so cells are written into it directly.
	fn assign_cells(data: &ClusterEngine<T, F>, state: &mut ClusterState<F>) {
		let (centroids, clusters) = (&state.centroids, &mut state.clusters);
		clusters.iter_mut().for_each(Vec::clear);
		data.samples.iter().cloned().enumerate()
			.for_each(|(idx, s)| {
				let (best_idx, _) = ClusterEngine::<T, F>::nearest_centroid(centroids, s);
				clusters[best_idx].push(data.grid.coordinate(idx));
			});
	}

	/// Refinement pass: walks the current partition cluster by cluster and reassigns every cell
	/// into a fresh partition, which then replaces the current one.
	/// ## Returns
	/// Amount of cells that ended up in a different cluster than the one they were taken from
	fn reassign_cells(data: &ClusterEngine<T, F>, state: &mut ClusterState<F>) -> usize {
		let mut new_clusters: Vec<Vec<Coordinate>> = vec![Vec::new(); state.k];
		let mut swaps = 0;
		for (prev_idx, members) in state.clusters.iter().enumerate() {
			for &coord in members {
				let (best_idx, _) = ClusterEngine::<T, F>::nearest_centroid(&state.centroids, data.sample(coord));
				if best_idx != prev_idx {
					swaps += 1;
				}
				new_clusters[best_idx].push(coord);
			}
		}
		state.clusters = new_clusters;
		swaps
	}

	/// Recalculate every centroid as the mean of its cluster's values, and the distance sum
	/// of all cells to their (new) centroids.
	fn update_centroids(data: &ClusterEngine<T, F>, state: &mut ClusterState<F>, config: &ClusterConfig<'_, F>, iteration: usize) -> Result<(), ClusterError> {
		for (idx, members) in state.clusters.iter().enumerate() {
			state.centroids[idx] = match data.cluster_mean(members) {
				Some(mean) => mean,
				None => config.empty_cluster_strategy.resolve(idx, iteration, state.centroids[idx])?,
			};
		}
		state.distsum = state.clusters.iter()
			.zip(state.centroids.iter().cloned())
			.flat_map(|(members, c)| members.iter().map(move |&coord| (c - data.sample(coord)).abs()))
			.sum();
		Ok(())
	}

	pub fn calculate<'a, I>(data: &ClusterEngine<T, F>, max_iter: usize, init: I, config: &ClusterConfig<'a, F>) -> Result<ClusterState<F>, ClusterError>
				where for<'c> I: FnOnce(&ClusterEngine<T, F>, &mut ClusterState<F>, &ClusterConfig<'c, F>) -> Result<(), ClusterError> {
		let mut state = ClusterState::new(data.k);

		// Initialize clusters and notify subscriber
		init(data, &mut state, config)?;
		debug!("Initial centroids: {:?}", state.centroids);
		(config.init_done)(&state);

		Self::assign_cells(data, &mut state);
		Self::update_centroids(data, &mut state, config, 0)?;

		for i in 1..=max_iter {
			let swaps = Self::reassign_cells(data, &mut state);
			Self::update_centroids(data, &mut state, config, i)?;
			state.iterations = i;
			state.converged = swaps == 0;
			debug!("Iteration {} - {} cells moved, distsum: {}", i, swaps, state.distsum);

			// Notify subscriber about finished iteration
			(config.iteration_done)(&state, i, swaps);
			if state.converged {
				break;
			}
		}
		if !state.converged {
			warn!("No fixed point reached after {} iterations (distsum: {})", max_iter, state.distsum);
		}
		Ok(state)
	}
}
