use crate::{
    empty_cluster::EmptyClusterStrategy,
    error::ClusterError,
    grid::{Coordinate, Grid},
    primitives::*,
};
use num::NumCast;
use rand::prelude::*;
use std::cell::RefCell;

pub type InitDoneCallbackFn<'a, F> = &'a dyn Fn(&ClusterState<F>);
pub type IterationDoneCallbackFn<'a, F> = &'a dyn Fn(&ClusterState<F>, usize, usize);

/// This is a structure holding various configuration options for a clustering run, such as
/// the random number generator to use, or a couple of callbacks, that can be set to get status information from
/// a running calculation.
///
/// For a more detailed information about all possible options, have a look at [`ClusterConfigBuilder`].
pub struct ClusterConfig<'a, F: Primitive> {
    /// Callback that is called, when the initialization phase finished
    /// ## Arguments
    /// - **state**: Current [`ClusterState`] after the initialization
    pub(crate) init_done: InitDoneCallbackFn<'a, F>,
    /// Callback that is called after each refinement pass
    /// ## Arguments
    /// - **state**: Current [`ClusterState`] after the pass (centroids already recalculated)
    /// - **iteration_id**: Number of the current pass
    /// - **swaps**: Amount of cells that changed their cluster during this pass
    pub(crate) iteration_done: IterationDoneCallbackFn<'a, F>,
    /// Random number generator to use
    pub(crate) rnd: Box<RefCell<dyn RngCore>>,
    /// What to do with clusters that end up without members
    pub(crate) empty_cluster_strategy: EmptyClusterStrategy,
}
impl<'a, F: Primitive> Default for ClusterConfig<'a, F> {
    fn default() -> Self {
        Self {
            init_done: &|_| {},
            iteration_done: &|_, _, _| {},
            rnd: Box::new(RefCell::new(rand::thread_rng())),
            empty_cluster_strategy: EmptyClusterStrategy::default(),
        }
    }
}
impl<'a, F: Primitive> ClusterConfig<'a, F> {
    /// Use the [`ClusterConfigBuilder`] to build a [`ClusterConfig`] instance.
    pub fn build() -> ClusterConfigBuilder<'a, F> {
        ClusterConfigBuilder { config: ClusterConfig::default() }
    }
}
impl<'a, F: Primitive> std::fmt::Debug for ClusterConfig<'a, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClusterConfig")
            .field("empty_cluster_strategy", &self.empty_cluster_strategy)
            .finish_non_exhaustive()
    }
}

pub struct ClusterConfigBuilder<'a, F: Primitive> {
    config: ClusterConfig<'a, F>,
}
impl<'a, F: Primitive> ClusterConfigBuilder<'a, F> {
    /// Set the callback that should be called after the centroid initialization, before the first assignment pass.
    pub fn init_done(mut self, init_done: InitDoneCallbackFn<'a, F>) -> Self {
        self.config.init_done = init_done; self
    }
    /// Set the callback that should be called after each refinement pass during a running calculation.
    pub fn iteration_done(mut self, iteration_done: IterationDoneCallbackFn<'a, F>) -> Self {
        self.config.iteration_done = iteration_done; self
    }
    /// Set the random number generator that should be used for the centroid initialization.
    /// Use a seeded generator for deterministically repeatable results.
    pub fn random_generator<R: RngCore + 'static>(mut self, rnd: R) -> Self {
        self.config.rnd = Box::new(RefCell::new(rnd)); self
    }
    /// Set the strategy for clusters without members. For more information,
    /// see documentation of [`EmptyClusterStrategy`].
    /// ## Default
    /// [`EmptyClusterStrategy::KeepPrevious`]
    pub fn empty_cluster_strategy(mut self, strategy: EmptyClusterStrategy) -> Self {
        self.config.empty_cluster_strategy = strategy; self
    }
    /// Return the internally built configuration structure.
    pub fn build(self) -> ClusterConfig<'a, F> { self.config }
}

/// State of a clustering run, as well as its final result.
///
/// ## Generics
/// - **F**: Floating-point type the centroids are calculated in
///
/// ## Fields
/// - **k**: The amount of clusters
/// - **distsum**: Sum of the absolute distances from all cells to their respective centroids
/// - **centroids**: Calculated cluster centers (index `i` belongs to cluster `i`)
/// - **clusters**: Coordinates of the cells assigned to each cluster (the partition)
/// - **iterations**: Amount of refinement passes executed after the first assignment pass
/// - **converged**: Whether the last pass moved no cell (fixed point reached)
#[derive(Clone, Debug, PartialEq)]
pub struct ClusterState<F: Primitive> {
    pub k: usize,
    pub distsum: F,
    pub centroids: Vec<F>,
    pub clusters: Vec<Vec<Coordinate>>,
    pub iterations: usize,
    pub converged: bool,
}
impl<F: Primitive> ClusterState<F> {
    pub(crate) fn new(k: usize) -> Self {
        Self {
            k,
            distsum: F::zero(),
            centroids: vec![F::zero(); k],
            clusters: vec![Vec::new(); k],
            iterations: 0,
            converged: false,
        }
    }

    /// Amount of cells in each cluster
    pub fn centroid_frequency(&self) -> Vec<usize> {
        self.clusters.iter().map(Vec::len).collect()
    }
}

/// Entrypoint of this crate's API-Surface.
///
/// An engine owns a copy of the grid to cluster, the amount of clusters to search for, and the
/// [`ClusterState`] of the last run. The grid's element type **T** can be any primitive number,
/// centroids are always calculated in the floating-point type **F**.
///
/// ## Supported initialization methods
/// - Random values from the grid's value range [`ClusterEngine::init_random_range`]
/// - Precomputed centroids [`ClusterEngine::init_precomputed`]
#[derive(Clone, Debug)]
pub struct ClusterEngine<T: Scalar, F: Primitive> {
    pub(crate) k: usize,
    pub(crate) grid: Grid<T>,
    pub(crate) samples: Vec<F>,
    pub(crate) state: ClusterState<F>,
}
impl<T: Scalar, F: Primitive> ClusterEngine<T, F> {
    /// Create a new instance of the [`ClusterEngine`] structure.
    ///
    /// ## Arguments
    /// - **rows**: The grid, as vector of rows
    /// - **k**: Amount of clusters to search for
    /// - **height**: Amount of rows in **rows**
    /// - **width**: Amount of values in each row
    ///
    /// ## Errors
    /// - [`ClusterError::InvalidDimensions`] if **rows** is not a `height x width` grid
    /// - [`ClusterError::InvalidClusterCount`] unless `1 <= k <= height * width`
    /// - [`ClusterError::InvalidValue`] if a value can not be represented as finite **F**
    pub fn new(rows: Vec<Vec<T>>, k: usize, height: usize, width: usize) -> Result<Self, ClusterError> {
        Self::from_grid(Grid::from_rows(rows, height, width)?, k)
    }

    /// Create a new instance of the [`ClusterEngine`] structure from an already constructed [`Grid`].
    pub fn from_grid(grid: Grid<T>, k: usize) -> Result<Self, ClusterError> {
        if k == 0 || k > grid.len() {
            return Err(ClusterError::InvalidClusterCount { k, cells: grid.len() });
        }
        let samples = Self::convert_samples(&grid)?;
        Ok(Self { k, grid, samples, state: ClusterState::new(k) })
    }

    /// Replace the grid's values. The new grid has to have the same shape as the current one.
    /// Centroids are reset to zero and the partition is cleared, the clustering has to be calculated again.
    ///
    /// ## Errors
    /// - [`ClusterError::InvalidDimensions`] if **rows** differs from the current shape
    /// - [`ClusterError::InvalidValue`] if a value can not be represented as finite **F**
    pub fn set_data(&mut self, rows: Vec<Vec<T>>) -> Result<(), ClusterError> {
        let grid = Grid::from_rows(rows, self.grid.height(), self.grid.width())?;
        self.samples = Self::convert_samples(&grid)?;
        self.grid = grid;
        self.state = ClusterState::new(self.k);
        Ok(())
    }

    fn convert_samples(grid: &Grid<T>) -> Result<Vec<F>, ClusterError> {
        grid.iter()
            .map(|(coord, v)| to_primitive(v).ok_or(ClusterError::InvalidValue { row: coord.row, col: coord.col }))
            .collect()
    }

    /// Index and distance of the centroid nearest to **value**.
    /// Distances are absolute differences, ties are won by the lowest index.
    #[inline(always)]
    pub(crate) fn nearest_centroid(centroids: &[F], value: F) -> (usize, F) {
        let mut distances = centroids.iter().map(|&c| (c - value).abs()).enumerate();
        let first = distances.next().unwrap_or((0, F::infinity()));
        distances.fold(first, |best, candidate| if candidate.1 < best.1 { candidate } else { best })
    }

    #[inline(always)]
    pub(crate) fn sample(&self, coord: Coordinate) -> F {
        self.samples[self.grid.index(coord)]
    }

    /// Arithmetic mean of the values at **members**, `None` for an empty slice.
    pub(crate) fn cluster_mean(&self, members: &[Coordinate]) -> Option<F> {
        if members.is_empty() {
            return None;
        }
        let n = <F as NumCast>::from(members.len())?;
        let sum = members.iter().map(|&c| self.sample(c)).fold(F::zero(), |acc, v| acc + v);
        if sum.is_finite() {
            return Some(sum / n);
        }
        // The plain sum overflowed, sum the scaled down values instead
        Some(members.iter().map(|&c| self.sample(c) / n).fold(F::zero(), |acc, v| acc + v))
    }

    /// Lloyd's k-means algorithm, on the grid's scalar values.
    ///
    /// After the initialization, every cell is assigned to its nearest centroid and the centroids are
    /// recalculated as the mean of their cells. Then the cells are reassigned (cluster by cluster) and
    /// the centroids recalculated, until one pass does not move any cell, or **max_iter** passes were done.
    ///
    /// ## Arguments
    /// - **max_iter**: Limit the maximum amount of refinement passes (just pass a high number for infinite)
    /// - **init**: Initialization-Method to use for the initialization of the **k** centroids
    /// - **config**: [`ClusterConfig`] instance, containing several configuration options for the calculation.
    ///
    /// ## Returns
    /// The final centroids. The full result is available through [`ClusterEngine::state`].
    /// When the calculation fails, the previous result is left untouched.
    ///
    /// ## Example
    /// ```rust
    /// use grid_kmeans::*;
    /// use rand::prelude::*;
    ///
    /// let (height, width, k, max_iter) = (20, 20, 3, 100);
    /// let mut rnd = StdRng::seed_from_u64(1337);
    /// let rows: Vec<Vec<u8>> = (0..height)
    ///     .map(|_| (0..width).map(|_| rnd.gen()).collect())
    ///     .collect();
    ///
    /// let mut engine: ClusterEngine<u8, f32> = ClusterEngine::new(rows, k, height, width).unwrap();
    /// let conf = ClusterConfig::build().random_generator(rnd).build();
    /// let centroids = engine.kmeans_lloyd(max_iter, ClusterEngine::init_random_range, &conf).unwrap();
    ///
    /// assert_eq!(centroids.len(), k);
    /// assert_eq!(engine.clustered().iter().map(Vec::len).sum::<usize>(), height * width);
    /// ```
    pub fn kmeans_lloyd<'a, I>(&mut self, max_iter: usize, init: I, config: &ClusterConfig<'a, F>) -> Result<Vec<F>, ClusterError>
                where for<'c> I: FnOnce(&ClusterEngine<T, F>, &mut ClusterState<F>, &ClusterConfig<'c, F>) -> Result<(), ClusterError> {
        self.state = crate::variants::Lloyd::calculate(self, max_iter, init, config)?;
        Ok(self.state.centroids.clone())
    }

    /// Random-Range initialization method
    ///
    /// ## Description
    /// Determines the grid's smallest and biggest value, and draws each centroid uniformly from
    /// that closed range. If all values of the grid are equal, all centroids are set to that value.
    ///
    /// ## Note
    /// This method is not meant for direct invocation. Pass a reference to it, to an instance-method of [`ClusterEngine`].
    pub fn init_random_range<'a>(engine: &ClusterEngine<T, F>, state: &mut ClusterState<F>, config: &ClusterConfig<'a, F>) -> Result<(), ClusterError> {
        crate::inits::randomrange::calculate(engine, state, config)
    }

    /// Precomputed initialization method
    ///
    /// ## Description
    /// Uses the given **centroids** as initial centroids. Exactly **k** finite values are required.
    pub fn init_precomputed(centroids: Vec<F>)
            -> impl for<'a> FnOnce(&ClusterEngine<T, F>, &mut ClusterState<F>, &ClusterConfig<'a, F>) -> Result<(), ClusterError> {
        move |engine, state, config| crate::inits::precomputed::calculate(engine, state, config, centroids)
    }

    /// Last calculated centroids (all zero before the first run).
    pub fn centroids(&self) -> &[F] {
        &self.state.centroids
    }

    /// Last calculated partition: the coordinates assigned to each cluster.
    pub fn clustered(&self) -> &[Vec<Coordinate>] {
        &self.state.clusters
    }

    /// Complete state of the last run.
    pub fn state(&self) -> &ClusterState<F> {
        &self.state
    }

    /// Cluster index of every cell in row-major order, `None` before the first run.
    pub fn labels(&self) -> Option<Vec<usize>> {
        if self.state.clusters.iter().all(Vec::is_empty) {
            return None;
        }
        let mut labels = vec![0usize; self.grid.len()];
        for (cluster, members) in self.state.clusters.iter().enumerate() {
            for &coord in members {
                labels[self.grid.index(coord)] = cluster;
            }
        }
        Some(labels)
    }

    pub fn grid(&self) -> &Grid<T> {
        &self.grid
    }

    pub fn k(&self) -> usize {
        self.k
    }

    pub fn height(&self) -> usize {
        self.grid.height()
    }

    pub fn width(&self) -> usize {
        self.grid.width()
    }

    /// Amount of refinement passes of the last run.
    pub fn iterations(&self) -> usize {
        self.state.iterations
    }

    /// Whether the last run reached a fixed point (as opposed to hitting its iteration limit).
    pub fn converged(&self) -> bool {
        self.state.converged
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn construction_validates_cluster_count() {
        let rows = vec![vec![1u8, 2], vec![3, 4]];
        assert_eq!(
            ClusterEngine::<u8, f32>::new(rows.clone(), 0, 2, 2).unwrap_err(),
            ClusterError::InvalidClusterCount { k: 0, cells: 4 }
        );
        assert_eq!(
            ClusterEngine::<u8, f32>::new(rows.clone(), 5, 2, 2).unwrap_err(),
            ClusterError::InvalidClusterCount { k: 5, cells: 4 }
        );
        assert!(ClusterEngine::<u8, f32>::new(rows, 4, 2, 2).is_ok());
    }

    #[test]
    fn construction_validates_dimensions() {
        let rows = vec![vec![1u8, 2], vec![3, 4]];
        assert!(matches!(
            ClusterEngine::<u8, f64>::new(rows.clone(), 2, 2, 3),
            Err(ClusterError::InvalidDimensions(_))
        ));
        assert!(matches!(
            ClusterEngine::<u8, f64>::new(rows, 2, 1, 2),
            Err(ClusterError::InvalidDimensions(_))
        ));
        assert!(matches!(
            ClusterEngine::<u8, f64>::new(vec![], 1, 0, 0),
            Err(ClusterError::InvalidDimensions(_))
        ));
    }

    #[test]
    fn construction_validates_values() {
        let rows = vec![vec![1.0f64, 2.0], vec![f64::NAN, 4.0]];
        assert_eq!(
            ClusterEngine::<f64, f64>::new(rows, 2, 2, 2).unwrap_err(),
            ClusterError::InvalidValue { row: 1, col: 0 }
        );
        let rows = vec![vec![1.0f64, 1e300]];
        assert_eq!(
            ClusterEngine::<f64, f32>::new(rows, 1, 1, 2).unwrap_err(),
            ClusterError::InvalidValue { row: 0, col: 1 }
        );
    }

    #[test]
    fn accessors_before_first_run() {
        let engine = ClusterEngine::<i32, f32>::new(vec![vec![1, 2, 3], vec![4, 5, 6]], 3, 2, 3).unwrap();
        assert_eq!(engine.k(), 3);
        assert_eq!(engine.height(), 2);
        assert_eq!(engine.width(), 3);
        assert_eq!(engine.centroids(), &[0.0, 0.0, 0.0]);
        assert_eq!(engine.clustered().len(), 3);
        assert!(engine.clustered().iter().all(Vec::is_empty));
        assert_eq!(engine.labels(), None);
        assert_eq!(engine.iterations(), 0);
        assert!(!engine.converged());
        assert_eq!(engine.grid().cells(), &[1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn nearest_centroid_prefers_lowest_index_on_ties() {
        type E = ClusterEngine<u8, f64>;
        assert_eq!(E::nearest_centroid(&[5.0, 5.0], 5.0), (0, 0.0));
        assert_eq!(E::nearest_centroid(&[4.0, 6.0], 5.0), (0, 1.0));
        assert_eq!(E::nearest_centroid(&[6.0, 4.0], 5.0), (0, 1.0));
        assert_eq!(E::nearest_centroid(&[9.0, 4.0, 6.0], 5.0), (1, 1.0));
        assert_eq!(E::nearest_centroid(&[0.0, 10.0, 7.5], 8.0), (2, 0.5));
    }

    #[test]
    fn cluster_mean() {
        let engine = ClusterEngine::<u8, f32>::new(vec![vec![1, 2], vec![3, 10]], 2, 2, 2).unwrap();
        assert_eq!(engine.cluster_mean(&[]), None);
        assert_eq!(engine.cluster_mean(&[Coordinate::new(1, 1)]), Some(10.0));
        assert_eq!(engine.cluster_mean(&[Coordinate::new(0, 0), Coordinate::new(0, 1), Coordinate::new(1, 0)]), Some(2.0));
        assert_eq!(engine.cluster_mean(&engine.grid().coordinates().collect::<Vec<_>>()), Some(4.0));
    }

    #[test]
    fn cluster_mean_of_huge_values() {
        let mut engine = ClusterEngine::<f32, f32>::new(vec![vec![3e38, 3e38]], 1, 1, 2).unwrap();
        let all = engine.grid().coordinates().collect::<Vec<_>>();
        assert_eq!(engine.cluster_mean(&all), Some(3e38));

        let res = engine.kmeans_lloyd(100, ClusterEngine::init_precomputed(vec![3e38]), &ClusterConfig::default());
        assert_eq!(res, Ok(vec![3e38]));
        assert_eq!(engine.state().distsum, 0.0);
    }

    #[test]
    fn set_data_resets_state() {
        let mut engine = ClusterEngine::<u8, f64>::new(vec![vec![1, 1], vec![10, 10]], 2, 2, 2).unwrap();
        let conf = ClusterConfig::default();
        engine.kmeans_lloyd(100, ClusterEngine::init_precomputed(vec![1.0, 10.0]), &conf).unwrap();
        assert_eq!(engine.centroids(), &[1.0, 10.0]);

        engine.set_data(vec![vec![2, 2], vec![20, 20]]).unwrap();
        assert_eq!(engine.centroids(), &[0.0, 0.0]);
        assert!(engine.clustered().iter().all(Vec::is_empty));
        assert_eq!(engine.grid().cells(), &[2, 2, 20, 20]);

        engine.kmeans_lloyd(100, ClusterEngine::init_precomputed(vec![2.0, 20.0]), &conf).unwrap();
        assert_eq!(engine.centroids(), &[2.0, 20.0]);
    }

    #[test]
    fn set_data_rejects_other_shapes() {
        let mut engine = ClusterEngine::<u8, f64>::new(vec![vec![1, 1], vec![10, 10]], 2, 2, 2).unwrap();
        assert!(matches!(
            engine.set_data(vec![vec![1, 1, 1], vec![10, 10, 10]]),
            Err(ClusterError::InvalidDimensions(_))
        ));
        assert!(matches!(engine.set_data(vec![vec![1, 1]]), Err(ClusterError::InvalidDimensions(_))));
        assert_eq!(engine.grid().cells(), &[1, 1, 10, 10]);
    }

    #[test]
    fn labels_follow_partition() {
        let mut engine = ClusterEngine::<u8, f32>::new(vec![vec![1, 10], vec![10, 1]], 2, 2, 2).unwrap();
        let conf = ClusterConfig::default();
        engine.kmeans_lloyd(100, ClusterEngine::init_precomputed(vec![0.0, 12.0]), &conf).unwrap();
        assert_eq!(engine.labels(), Some(vec![0, 1, 1, 0]));
        assert_eq!(engine.state().centroid_frequency(), vec![2, 2]);
    }

    #[test]
    fn failed_run_keeps_previous_result() {
        let mut engine = ClusterEngine::<u8, f32>::new(vec![vec![1, 1], vec![10, 10]], 2, 2, 2).unwrap();
        let conf = ClusterConfig::default();
        engine.kmeans_lloyd(100, ClusterEngine::init_precomputed(vec![1.0, 10.0]), &conf).unwrap();
        let before = engine.state().clone();

        let res = engine.kmeans_lloyd(100, ClusterEngine::init_precomputed(vec![1.0]), &conf);
        assert!(matches!(res, Err(ClusterError::InvalidInitialization(_))));
        assert_eq!(engine.state(), &before);
    }
}
