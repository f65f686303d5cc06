use crate::points::Primitive;
use crate::DistanceFunction;

/// Planar Euclidean distance.
///
/// This is the default metric. Applied to raw longitude/latitude it
/// distorts near the poles and splits clusters that straddle the ±180°
/// meridian; see [`crate::LonWrapDistance`] for the wrap-aware alternative.
pub struct EuclideanDistance;

impl<T: Primitive> DistanceFunction<T> for EuclideanDistance {
    #[inline(always)]
    fn distance(&self, a: &[T], b: &[T]) -> T {
        assert_eq!(a.len(), b.len(), "dimension mismatch: {} vs {}", a.len(), b.len());
        a.iter()
            .zip(b.iter())
            .map(|(&av, &bv)| av - bv)
            .map(|d| d * d)
            .sum::<T>()
            .sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_hand_computed_values_f64() {
        let d = EuclideanDistance;
        assert_eq!(d.distance(&[0.0f64, 0.0], &[3.0, 4.0]), 5.0);
        assert_eq!(d.distance(&[-1.0f64, 3.0, -6.0, 2.0], &[4.0, 8.0, -1.0, 7.0]), 10.0);
        assert_eq!(d.distance(&[1.0f64, 7.0], &[6.0, -3.0]), 11.180339887498949);
    }

    #[test]
    fn matches_hand_computed_values_f32() {
        let d = EuclideanDistance;
        assert_approx_eq!(d.distance(&[0.0f32, 0.0], &[3.0, 4.0]), 5.0f32, 1e-6);
        assert_approx_eq!(d.distance(&[1.0f32, 7.0], &[6.0, -3.0]), 11.180339f32, 1e-5);
    }

    #[test]
    fn distance_to_self_is_zero() {
        let d = EuclideanDistance;
        assert_eq!(d.distance(&[148.88f64, -3.04], &[148.88, -3.04]), 0.0);
    }

    #[test]
    #[should_panic(expected = "dimension mismatch")]
    fn mismatched_dimensions_panic() {
        EuclideanDistance.distance(&[0.0f64, 0.0], &[1.0, 2.0, 3.0]);
    }
}
