use crate::{ClusterConfig, ClusterEngine, ClusterError, ClusterState, primitives::*};

#[inline(always)]
pub fn calculate<T: Scalar, F: Primitive>(
    _engine: &ClusterEngine<T, F>, state: &mut ClusterState<F>, _config: &ClusterConfig<'_, F>, computed: Vec<F>,
) -> Result<(), ClusterError> {
    if computed.len() != state.k {
        return Err(ClusterError::InvalidInitialization(format!(
            "Expected {} precomputed centroids, got {}", state.k, computed.len()
        )));
    }
    if let Some(idx) = computed.iter().position(|c| !c.is_finite()) {
        return Err(ClusterError::InvalidInitialization(format!(
            "Precomputed centroid {} is not finite ({})", idx, computed[idx]
        )));
    }
    state.centroids = computed;
    Ok(())
}
