mod euclidean;
mod lonwrap;

pub use euclidean::EuclideanDistance;
pub use lonwrap::LonWrapDistance;

use crate::points::Primitive;

/// Distance measure between two equal-dimension points.
///
/// Implementations must be pure and deterministic; the assignment step calls
/// them `k * n` times per round. A dimension mismatch is a programming error
/// and panics instead of being propagated.
pub trait DistanceFunction<T: Primitive> {
    fn distance(&self, a: &[T], b: &[T]) -> T;
}
