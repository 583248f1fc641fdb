use crate::{ClusterConfig, ClusterEngine, ClusterError, ClusterState, primitives::*};
use log::trace;
use rand::distributions::{Distribution, Uniform};
use std::ops::DerefMut;

#[inline(always)] pub fn calculate<'a, T: Scalar, F: Primitive>(engine: &ClusterEngine<T, F>, state: &mut ClusterState<F>, config: &ClusterConfig<'a, F>) -> Result<(), ClusterError> {
	let (min, max) = match (engine.grid.min_value(), engine.grid.max_value()) {
		(Some(min), Some(max)) => (min, max),
		_ => return Err(ClusterError::InvalidDimensions("Grid has to contain at least one cell".to_string())),
	};
	let (min, max): (F, F) = match (to_primitive(min), to_primitive(max)) {
		(Some(min), Some(max)) => (min, max),
		_ => return Err(ClusterError::InvalidInitialization(format!("Value range [{}, {}] is not representable", min, max))),
	};
	trace!("Drawing {} centroids from [{}, {}]", state.k, min, max);

	if min == max { // Degenerate range: every centroid starts on the single value
		state.centroids.iter_mut().for_each(|c| *c = min);
		return Ok(());
	}
	// Interpolate between the bounds, `max - min` may not be representable
	let unit = Uniform::new_inclusive(F::zero(), F::one());
	let mut rnd = config.rnd.borrow_mut();
	state.centroids.iter_mut().for_each(|c| {
		let t = unit.sample(rnd.deref_mut());
		*c = (min * (F::one() - t) + max * t).max(min).min(max);
	});
	Ok(())
}
