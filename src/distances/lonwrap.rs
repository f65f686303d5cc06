use crate::points::Primitive;
use crate::DistanceFunction;

/// Euclidean distance with a wrap-aware first component.
///
/// Treats component 0 as a longitude in degrees and measures it around the
/// shorter way across the ±180° meridian, so epicenters on opposite sides of
/// the antimeridian end up close instead of a near-360° apart. All other
/// components are measured like plain [`crate::EuclideanDistance`].
pub struct LonWrapDistance;

impl<T: Primitive> DistanceFunction<T> for LonWrapDistance {
    #[inline(always)]
    fn distance(&self, a: &[T], b: &[T]) -> T {
        assert_eq!(a.len(), b.len(), "dimension mismatch: {} vs {}", a.len(), b.len());
        let full_circle = T::from(360.0).unwrap();
        let mut total = T::zero();
        for (i, (&av, &bv)) in a.iter().zip(b.iter()).enumerate() {
            let mut d = (av - bv).abs();
            if i == 0 {
                let wrapped = full_circle - d;
                if wrapped < d {
                    d = wrapped;
                }
            }
            total += d * d;
        }
        total.sqrt()
    }
}
