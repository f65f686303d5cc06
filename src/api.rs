use crate::distances::DistanceFunction;
use crate::error::Result;
use crate::points::{CentroidList, ClusterAssignment, PointSet, Primitive};
use crate::EuclideanDistance;
use rand::prelude::*;
use std::cell::RefCell;

pub type InitDoneCallbackFn<'a, T> = &'a dyn Fn(&CentroidList<T>);
pub type IterationDoneCallbackFn<'a, T> = &'a dyn Fn(usize, &CentroidList<T>, &ClusterAssignment);

/// Configuration options for a k-means calculation: the random number
/// generator to use for centroid initialization, and a couple of callbacks
/// that can be set to observe a running calculation.
///
/// For details about the individual options, have a look at
/// [`KMeansConfigBuilder`].
pub struct KMeansConfig<'a, T: Primitive> {
    /// Callback that is called when the initialization phase finished
    /// ## Arguments
    /// - **centroids**: The initial [`CentroidList`]
    pub(crate) init_done: InitDoneCallbackFn<'a, T>,
    /// Callback that is called after each assign + update round
    /// ## Arguments
    /// - **round**: Number of the finished round (1-based)
    /// - **centroids**: [`CentroidList`] after the round's update step
    /// - **assignment**: [`ClusterAssignment`] produced by the round's assign step
    pub(crate) iteration_done: IterationDoneCallbackFn<'a, T>,
    /// Random number generator to use
    pub(crate) rnd: Box<RefCell<dyn RngCore>>,
}
impl<'a, T: Primitive> Default for KMeansConfig<'a, T> {
    fn default() -> Self {
        Self {
            init_done: &|_| {},
            iteration_done: &|_, _, _| {},
            rnd: Box::new(RefCell::new(rand::thread_rng())),
        }
    }
}
impl<'a, T: Primitive> KMeansConfig<'a, T> {
    /// Use the [`KMeansConfigBuilder`] to build a [`KMeansConfig`] instance.
    pub fn build() -> KMeansConfigBuilder<'a, T> {
        KMeansConfigBuilder { config: KMeansConfig::default() }
    }
}
impl<'a, T: Primitive> std::fmt::Debug for KMeansConfig<'a, T> {
    fn fmt(&self, _: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { Ok(()) }
}

pub struct KMeansConfigBuilder<'a, T: Primitive> {
    config: KMeansConfig<'a, T>,
}
impl<'a, T: Primitive> KMeansConfigBuilder<'a, T> {
    /// Set the callback that should be called after the centroid initialization,
    /// before the first round starts.
    pub fn init_done(mut self, init_done: InitDoneCallbackFn<'a, T>) -> Self {
        self.config.init_done = init_done; self
    }
    /// Set the callback that should be called after each round of a running
    /// k-means calculation.
    pub fn iteration_done(mut self, iteration_done: IterationDoneCallbackFn<'a, T>) -> Self {
        self.config.iteration_done = iteration_done; self
    }
    /// Set the random number generator used to draw the initial centroids.
    /// Use a seeded generator for deterministically repeatable results.
    pub fn random_generator<R: RngCore + 'static>(mut self, rnd: R) -> Self {
        self.config.rnd = Box::new(RefCell::new(rnd)); self
    }
    /// Return the internally built configuration structure.
    pub fn build(self) -> KMeansConfig<'a, T> { self.config }
}

/// Final state of a k-means calculation, as returned by [`KMeans::run`].
///
/// ## Fields
/// - **k**: The amount of clusters that were requested
/// - **centroids**: Centroid positions after the last update step
/// - **clusters**: The last round's [`ClusterAssignment`] — each cluster holds
///   the [`crate::PointId`]s assigned to the matching centroid index
#[derive(Clone, Debug, PartialEq)]
pub struct KMeansState<T: Primitive> {
    pub k: usize,
    pub centroids: CentroidList<T>,
    pub clusters: ClusterAssignment,
}

/// Entrypoint of this crate's API-surface.
///
/// Create an instance over the [`PointSet`] to analyze and the
/// [`DistanceFunction`] to measure with, then call [`KMeans::run`]. The
/// struct is never mutated by a run, so several runs (e.g. with different k)
/// can reuse the same instance.
///
/// ## Supported initialization methods
/// - Random-Sample (a.k.a. Forgy) [`KMeans::init_random_sample`]
/// - Precomputed centroids [`KMeans::init_precomputed`]
///
/// ## Example
/// ```rust
/// use quakemeans::*;
///
/// let points = PointSet::from_pairs(vec![
///     (0.0f64, 0.0), (0.0, 1.0), (10.0, 10.0), (10.0, 11.0),
/// ]);
/// let kmean = KMeans::new(points, EuclideanDistance);
/// let result = kmean.run(2, 20, KMeans::init_random_sample, &KMeansConfig::default()).unwrap();
///
/// assert_eq!(result.clusters.assigned_total(), 4);
/// ```
pub struct KMeans<T: Primitive, D: DistanceFunction<T> = EuclideanDistance> {
    points: PointSet<T>,
    distance: D,
}

impl<T: Primitive, D: DistanceFunction<T>> KMeans<T, D> {
    /// Create a new instance over the given point set.
    pub fn new(points: PointSet<T>, distance: D) -> Self {
        Self { points, distance }
    }

    /// The clustered point set, for resolving ids back to coordinates.
    pub fn points(&self) -> &PointSet<T> {
        &self.points
    }

    pub(crate) fn distance(&self) -> &D {
        &self.distance
    }

    /// Run the k-means cluster analysis: initialize k centroids once, then
    /// perform exactly `repeats` rounds of nearest-centroid assignment
    /// followed by centroid-mean recomputation.
    ///
    /// There is no convergence detection: a run always performs the full
    /// round count. Rounds past the point of stabilization recompute the
    /// same partition and are harmless.
    ///
    /// ## Arguments
    /// - **k**: Amount of clusters to search for (`1 <= k <= |points|`)
    /// - **repeats**: Amount of assign + update rounds to run (`>= 1`)
    /// - **init**: Initialization method for the k starting centroids
    /// - **config**: [`KMeansConfig`] instance (RNG, callbacks)
    ///
    /// ## Returns
    /// The final [`KMeansState`], or
    /// [`QuakeMeansError::InvalidParameter`](crate::QuakeMeansError::InvalidParameter)
    /// when a precondition is violated.
    pub fn run<'a, F>(&self, k: usize, repeats: usize, init: F, config: &KMeansConfig<'a, T>) -> Result<KMeansState<T>>
            where for<'c> F: FnOnce(&KMeans<T, D>, usize, &KMeansConfig<'c, T>) -> Result<CentroidList<T>> {
        crate::engine::Engine::calculate(self, k, repeats, init, config)
    }

    /// Random sample initialization method (a.k.a. Forgy).
    ///
    /// ## Description
    /// Repeatedly draws a uniformly random id from the point set, skipping
    /// ids that were already chosen, until k distinct ids were drawn. The
    /// chosen points' coordinates become the initial centroids. Duplicate
    /// coordinate values are possible when the data itself contains
    /// duplicate points; duplicate source ids are not.
    ///
    /// ## Note
    /// This method is not meant for direct invocation. Pass a reference to
    /// it to [`KMeans::run`].
    pub fn init_random_sample<'a>(kmean: &KMeans<T, D>, k: usize, config: &KMeansConfig<'a, T>) -> Result<CentroidList<T>> {
        crate::inits::randomsample::calculate(kmean, k, config)
    }

    /// Precomputed initialization method.
    ///
    /// ## Description
    /// Uses the passed [`CentroidList`] as-is for the initial centroids.
    /// This is the hook for deterministic runs: pin the starting centroids
    /// and the whole calculation becomes reproducible.
    pub fn init_precomputed(centroids: CentroidList<T>)
            -> impl for<'c> FnOnce(&KMeans<T, D>, usize, &KMeansConfig<'c, T>) -> Result<CentroidList<T>> {
        move |kmean, k, _| crate::inits::precomputed::calculate(kmean, k, centroids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::QuakeMeansError;
    use std::cell::Cell;

    fn square_corners() -> PointSet<f64> {
        PointSet::from_pairs(vec![(0.0, 0.0), (0.0, 1.0), (10.0, 10.0), (10.0, 11.0)])
    }

    #[test]
    fn two_well_separated_clusters_are_found() {
        let kmean = KMeans::new(square_corners(), EuclideanDistance);
        let init = CentroidList::from_rows(2, vec![0.0, 0.0, 10.0, 10.0]).unwrap();
        let res = kmean.run(2, 20, KMeans::init_precomputed(init), &KMeansConfig::default()).unwrap();

        assert_eq!(res.k, 2);
        assert_eq!(res.clusters.cluster(0), &[1, 2]);
        assert_eq!(res.clusters.cluster(1), &[3, 4]);
        assert_eq!(res.centroids.centroid(0), &[0.0, 0.5]);
        assert_eq!(res.centroids.centroid(1), &[10.0, 10.5]);
    }

    #[test]
    fn k_of_one_converges_to_the_global_mean() {
        let kmean = KMeans::new(square_corners(), EuclideanDistance);
        let rnd = rand::rngs::StdRng::seed_from_u64(1);
        let conf = KMeansConfig::build().random_generator(rnd).build();
        let res = kmean.run(1, 5, KMeans::init_random_sample, &conf).unwrap();

        assert_eq!(res.clusters.cluster(0), &[1, 2, 3, 4]);
        assert_eq!(res.centroids.centroid(0), &[5.0, 5.5]);
    }

    #[test]
    fn random_init_produces_a_full_partition() {
        let kmean = KMeans::new(square_corners(), EuclideanDistance);
        let rnd = rand::rngs::StdRng::seed_from_u64(42);
        let conf = KMeansConfig::build().random_generator(rnd).build();
        let res = kmean.run(3, 10, KMeans::init_random_sample, &conf).unwrap();

        let mut all: Vec<_> = res.clusters.iter().flatten().cloned().collect();
        all.sort_unstable();
        assert_eq!(all, vec![1, 2, 3, 4]);
    }

    #[test]
    fn rejects_out_of_range_parameters() {
        let kmean = KMeans::new(square_corners(), EuclideanDistance);
        let conf = KMeansConfig::default();
        for (k, repeats) in [(0usize, 10usize), (5, 10), (2, 0)] {
            match kmean.run(k, repeats, KMeans::init_random_sample, &conf) {
                Err(QuakeMeansError::InvalidParameter { .. }) => {}
                other => panic!("k={} repeats={} should be rejected, got {:?}", k, repeats, other),
            }
        }
    }

    #[test]
    fn rejects_an_empty_point_set() {
        let kmean = KMeans::new(PointSet::<f64>::new(2).unwrap(), EuclideanDistance);
        assert!(matches!(
            kmean.run(1, 1, KMeans::init_random_sample, &KMeansConfig::default()),
            Err(QuakeMeansError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn callbacks_fire_once_per_round() {
        let kmean = KMeans::new(square_corners(), EuclideanDistance);
        let init_calls = Cell::new(0usize);
        let round_calls = Cell::new(0usize);
        let init_cb = |_: &CentroidList<f64>| init_calls.set(init_calls.get() + 1);
        let round_cb = |round: usize, _: &CentroidList<f64>, assignment: &ClusterAssignment| {
            round_calls.set(round_calls.get() + 1);
            assert_eq!(round, round_calls.get());
            assert_eq!(assignment.assigned_total(), 4);
        };
        let conf = KMeansConfig::build()
            .init_done(&init_cb)
            .iteration_done(&round_cb)
            .random_generator(rand::rngs::StdRng::seed_from_u64(7))
            .build();

        kmean.run(2, 13, KMeans::init_random_sample, &conf).unwrap();
        assert_eq!(init_calls.get(), 1);
        assert_eq!(round_calls.get(), 13);
    }
}
