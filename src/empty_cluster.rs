use crate::{error::ClusterError, primitives::Primitive};

/// Enum with possible strategies for clusters that end up without any members.
/// These strategies specify what the centroid of such a cluster is set to, when the centroids are
/// recalculated after an assignment pass (the mean of zero values is undefined).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EmptyClusterStrategy {
	/// The centroid keeps the value it had before the assignment pass.
	#[default]
	KeepPrevious,
	/// The centroid is reset to `0.0`.
	Zero,
	/// The calculation is aborted with [`ClusterError::EmptyClusterDuringRefit`].
	Fail,
}
impl EmptyClusterStrategy {
	/// Resolve the new centroid value of an empty cluster.
	/// ## Arguments
	/// - **cluster**: Index of the empty cluster
	/// - **iteration**: Number of the assignment pass that left the cluster empty (`0` = first pass)
	/// - **previous**: Centroid value before the assignment pass
	pub(crate) fn resolve<F: Primitive>(&self, cluster: usize, iteration: usize, previous: F) -> Result<F, ClusterError> {
		match *self {
			EmptyClusterStrategy::KeepPrevious => Ok(previous),
			EmptyClusterStrategy::Zero => Ok(F::zero()),
			EmptyClusterStrategy::Fail => Err(ClusterError::EmptyClusterDuringRefit { cluster, iteration }),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test] fn test_resolve_f32() { test_resolve::<f32>(); }
	#[test] fn test_resolve_f64() { test_resolve::<f64>(); }

	fn test_resolve<F: Primitive>() {
		let previous = F::from(42.5).unwrap();
		assert_eq!(EmptyClusterStrategy::KeepPrevious.resolve(1, 3, previous), Ok(previous));
		assert_eq!(EmptyClusterStrategy::Zero.resolve(1, 3, previous), Ok(F::zero()));
		assert_eq!(
			EmptyClusterStrategy::Fail.resolve(1, 3, previous),
			Err(ClusterError::EmptyClusterDuringRefit { cluster: 1, iteration: 3 })
		);
	}

	#[test]
	fn default_keeps_previous() {
		assert_eq!(EmptyClusterStrategy::default(), EmptyClusterStrategy::KeepPrevious);
	}
}
