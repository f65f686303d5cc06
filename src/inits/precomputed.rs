use crate::distances::DistanceFunction;
use crate::error::{QuakeMeansError, Result};
use crate::points::{CentroidList, Primitive};
use crate::KMeans;

/// Use caller-supplied centroids as the initial [`CentroidList`], after
/// checking that they match the requested k and the point set's
/// dimensionality.
pub(crate) fn calculate<T, D>(kmean: &KMeans<T, D>, k: usize, centroids: CentroidList<T>) -> Result<CentroidList<T>>
where
    T: Primitive,
    D: DistanceFunction<T>,
{
    if centroids.k() != k {
        return Err(QuakeMeansError::invalid(format!(
            "{} precomputed centroids passed, but k is {}", centroids.k(), k
        )));
    }
    if centroids.dims() != kmean.points().dims() {
        return Err(QuakeMeansError::DimensionMismatch {
            expected: kmean.points().dims(),
            got: centroids.dims(),
        });
    }
    Ok(centroids)
}
