use crate::distances::DistanceFunction;
use crate::error::{QuakeMeansError, Result};
use crate::points::{CentroidList, ClusterAssignment, PointSet, Primitive};
use crate::{KMeans, KMeansConfig, KMeansState};
use log::debug;

/// The fixed-round k-means loop: one initialization, then exactly `repeats`
/// rounds of assignment + centroid recomputation.
pub(crate) struct Engine<T> {
    _p: std::marker::PhantomData<T>,
}

impl<T: Primitive> Engine<T> {
    /// Assign every point to its nearest centroid.
    ///
    /// Points are visited in ascending id order. When several centroids are
    /// exactly equidistant, the lowest centroid index wins — centroid
    /// recomputation relies on this being reproducible for a given centroid
    /// state, so the comparison below is strictly `<`.
    fn assign<D: DistanceFunction<T>>(data: &KMeans<T, D>, centroids: &CentroidList<T>) -> ClusterAssignment {
        let mut assignment = ClusterAssignment::with_k(centroids.k());
        for (id, point) in data.points().iter() {
            let mut best_idx = 0;
            let mut best_dist = data.distance().distance(point, centroids.centroid(0));
            for (ci, centroid) in centroids.iter().enumerate().skip(1) {
                let dist = data.distance().distance(point, centroid);
                if dist < best_dist {
                    best_dist = dist;
                    best_idx = ci;
                }
            }
            assignment.push(best_idx, id);
        }
        assignment
    }

    /// Recompute each centroid as the component-wise mean of its assigned
    /// points, returning a fresh [`CentroidList`].
    ///
    /// A cluster that attracted no points this round keeps its previous
    /// centroid value. Dividing by an empty cluster's size would poison the
    /// centroid with NaN and corrupt every following distance comparison.
    fn update(assignment: &ClusterAssignment, points: &PointSet<T>, previous: &CentroidList<T>) -> CentroidList<T> {
        let dims = previous.dims();
        let mut coords = Vec::with_capacity(previous.k() * dims);
        for (ci, members) in assignment.iter().enumerate() {
            if members.is_empty() {
                coords.extend_from_slice(previous.centroid(ci));
                continue;
            }
            let mut sums = vec![T::zero(); dims];
            for &id in members {
                for (sum, &v) in sums.iter_mut().zip(points.point(id)) {
                    *sum += v;
                }
            }
            let count = T::from(members.len()).unwrap();
            coords.extend(sums.into_iter().map(|sum| sum / count));
        }
        CentroidList::from_raw(dims, coords)
    }

    pub fn calculate<'a, D, F>(
        data: &KMeans<T, D>, k: usize, repeats: usize, init: F, config: &KMeansConfig<'a, T>,
    ) -> Result<KMeansState<T>>
    where
        D: DistanceFunction<T>,
        for<'c> F: FnOnce(&KMeans<T, D>, usize, &KMeansConfig<'c, T>) -> Result<CentroidList<T>>,
    {
        let point_cnt = data.points().len();
        if k < 1 || k > point_cnt {
            return Err(QuakeMeansError::invalid(format!(
                "k ({}) must be within 1..={} (number of points)", k, point_cnt
            )));
        }
        if repeats < 1 {
            return Err(QuakeMeansError::invalid("repeats must be at least 1"));
        }

        // Initialize centroids and notify subscriber
        let mut centroids = init(data, k, config)?;
        debug_assert_eq!(centroids.k(), k);
        debug_assert_eq!(centroids.dims(), data.points().dims());
        (config.init_done)(&centroids);

        let mut assignment = ClusterAssignment::with_k(k);
        for round in 1..=repeats {
            assignment = Self::assign(data, &centroids);
            centroids = Self::update(&assignment, data.points(), &centroids);
            debug!("round {}/{} done, cluster sizes: {:?}",
                round, repeats, assignment.iter().map(|c| c.len()).collect::<Vec<_>>());

            // Notify subscriber about finished round
            (config.iteration_done)(round, &centroids, &assignment);
        }

        Ok(KMeansState { k, centroids, clusters: assignment })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EuclideanDistance;
    use rand::prelude::*;

    fn assert_partition(assignment: &ClusterAssignment, point_cnt: usize) {
        let mut seen = vec![false; point_cnt + 1];
        for cluster in assignment.iter() {
            for &id in cluster {
                assert!(!seen[id], "id {} assigned twice", id);
                seen[id] = true;
            }
        }
        assert!(seen.iter().skip(1).all(|&s| s), "not all ids assigned");
    }

    #[test]
    fn assignment_partitions_all_ids() {
        let mut rnd = StdRng::seed_from_u64(1337);
        let points = PointSet::from_pairs((0..200).map(|_| {
            (rnd.gen_range(-180.0..180.0), rnd.gen_range(-90.0..90.0))
        }));
        let kmean = KMeans::new(points, EuclideanDistance);
        // The invariant has to hold after every round, not just the last one.
        let round_check = |_: usize, _: &CentroidList<f64>, assignment: &ClusterAssignment| {
            assert_partition(assignment, 200);
        };
        let conf = KMeansConfig::build()
            .random_generator(StdRng::seed_from_u64(7))
            .iteration_done(&round_check)
            .build();
        let res = Engine::calculate(&kmean, 8, 15, KMeans::init_random_sample, &conf).unwrap();
        assert_partition(&res.clusters, 200);
    }

    #[test]
    fn ties_go_to_the_lowest_centroid_index() {
        // Point 1 sits exactly halfway between both centroids.
        let points = PointSet::from_pairs(vec![(5.0, 0.0)]);
        let kmean = KMeans::new(points, EuclideanDistance);
        let centroids = CentroidList::from_rows(2, vec![0.0, 0.0, 10.0, 0.0]).unwrap();

        let assignment = Engine::assign(&kmean, &centroids);
        assert_eq!(assignment.cluster(0), &[1]);
        assert!(assignment.cluster(1).is_empty());
    }

    #[test]
    fn update_computes_component_wise_means() {
        let points = PointSet::from_pairs(vec![(0.0, 0.0), (2.0, 4.0), (4.0, 8.0), (10.0, 10.0)]);
        let previous = CentroidList::from_rows(2, vec![1.0, 1.0, 9.0, 9.0]).unwrap();
        let mut assignment = ClusterAssignment::with_k(2);
        for id in [1, 2, 3] {
            assignment.push(0, id);
        }
        assignment.push(1, 4);

        let updated = Engine::update(&assignment, &points, &previous);
        assert_eq!(updated.centroid(0), &[2.0, 4.0]);
        assert_eq!(updated.centroid(1), &[10.0, 10.0]);
    }

    #[test]
    fn an_empty_cluster_keeps_its_previous_centroid() {
        // The second centroid is placed so far out that no point can reach it.
        let points = PointSet::from_pairs(vec![(1.0, 0.0), (2.0, 0.0), (3.0, 0.0)]);
        let kmean = KMeans::new(points, EuclideanDistance);
        let init = CentroidList::from_rows(2, vec![2.0, 0.0, 1337.0, 0.0]).unwrap();

        let assignment = Engine::assign(&kmean, &init);
        assert!(assignment.cluster(1).is_empty());

        let updated = Engine::update(&assignment, kmean.points(), &init);
        assert_eq!(updated.centroid(0), &[2.0, 0.0]);
        assert_eq!(updated.centroid(1), &[1337.0, 0.0]);
        assert!(updated.iter().flatten().all(|v: &f64| v.is_finite()));

        // The full run must survive the degenerate cluster as well.
        let res = kmean
            .run(2, 3, KMeans::init_precomputed(init), &KMeansConfig::default())
            .unwrap();
        assert_eq!(res.centroids.centroid(1), &[1337.0, 0.0]);
    }

    #[test]
    fn stable_partitions_stay_stable() {
        let points = PointSet::from_pairs(vec![(0.0, 0.0), (0.0, 1.0), (10.0, 10.0), (10.0, 11.0)]);
        let kmean = KMeans::new(points, EuclideanDistance);
        let init = CentroidList::from_rows(2, vec![0.0, 0.0, 10.0, 10.0]).unwrap();
        let conf = KMeansConfig::default();

        let short = kmean.run(2, 20, KMeans::init_precomputed(init.clone()), &conf).unwrap();
        // Re-running from the stabilized centroids changes nothing, no matter
        // how many extra rounds are spent.
        let resumed_once = kmean
            .run(2, 1, KMeans::init_precomputed(short.centroids.clone()), &conf)
            .unwrap();
        let resumed_long = kmean
            .run(2, 50, KMeans::init_precomputed(short.centroids.clone()), &conf)
            .unwrap();
        assert_eq!(short.clusters, resumed_once.clusters);
        assert_eq!(short.clusters, resumed_long.clusters);
        assert_eq!(short.centroids, resumed_long.centroids);
    }
}
