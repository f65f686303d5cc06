use crate::distances::DistanceFunction;
use crate::error::{QuakeMeansError, Result};
use crate::points::{CentroidList, Primitive};
use crate::{KMeans, KMeansConfig};
use rand::Rng;
use std::collections::HashSet;

/// Draw k distinct point ids uniformly at random and copy their coordinates
/// into the initial centroids.
///
/// Draws are rejected until k distinct ids were hit, which is why `k` must
/// not exceed the number of points — the loop could never finish otherwise.
pub(crate) fn calculate<'a, T, D>(kmean: &KMeans<T, D>, k: usize, config: &KMeansConfig<'a, T>) -> Result<CentroidList<T>>
where
    T: Primitive,
    D: DistanceFunction<T>,
{
    let points = kmean.points();
    if k < 1 || k > points.len() {
        return Err(QuakeMeansError::invalid(format!(
            "k ({}) must be within 1..={} (number of points)", k, points.len()
        )));
    }

    let rnd = &mut *config.rnd.borrow_mut();
    let mut chosen = HashSet::with_capacity(k);
    let mut coords = Vec::with_capacity(k * points.dims());
    while chosen.len() < k {
        let id = rnd.gen_range(1..=points.len());
        if chosen.insert(id) {
            coords.extend_from_slice(points.point(id));
        }
    }
    Ok(CentroidList::from_raw(points.dims(), coords))
}
