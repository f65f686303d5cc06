use crate::error::{QuakeMeansError, Result};
use num::{Float, NumCast};
use std::fmt::{Debug, Display};
use std::iter::Sum;
use std::ops::AddAssign;

/// Primitive float types the clustering calculations can run on.
pub trait Primitive:
    Float + NumCast + AddAssign + Sum + Default + Display + Debug + Send + Sync + 'static
{
}
impl Primitive for f32 {}
impl Primitive for f64 {}

/// Identifier of a point within a [`PointSet`].
///
/// Ids are handed out sequentially starting at 1, in ingestion order, so the
/// id doubles as the row number of the source dataset.
pub type PointId = usize;

/// An immutable set of equal-dimension points, keyed by [`PointId`].
///
/// Coordinates are stored row-major, the same layout the engine iterates in:
/// `[<point1>,<point2>,...]`. The uniform-dimensionality invariant is
/// enforced at ingestion; everything downstream relies on it.
#[derive(Clone, Debug, PartialEq)]
pub struct PointSet<T: Primitive> {
    dims: usize,
    coords: Vec<T>,
}

impl<T: Primitive> PointSet<T> {
    /// Create an empty set of `dims`-dimensional points.
    pub fn new(dims: usize) -> Result<Self> {
        if dims == 0 {
            return Err(QuakeMeansError::invalid("dimensionality must be at least 1"));
        }
        Ok(Self { dims, coords: Vec::new() })
    }

    /// Append a point, returning its assigned id.
    pub fn push(&mut self, point: &[T]) -> Result<PointId> {
        if point.len() != self.dims {
            return Err(QuakeMeansError::DimensionMismatch { expected: self.dims, got: point.len() });
        }
        self.coords.extend_from_slice(point);
        Ok(self.len())
    }

    /// Build a 2-dimensional set from `(longitude, latitude)` pairs.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (T, T)>) -> Self {
        let mut coords = Vec::new();
        for (lon, lat) in pairs {
            coords.push(lon);
            coords.push(lat);
        }
        Self { dims: 2, coords }
    }

    pub fn dims(&self) -> usize {
        self.dims
    }

    pub fn len(&self) -> usize {
        self.coords.len() / self.dims
    }

    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    /// All ids of this set, in ascending order.
    pub fn ids(&self) -> std::ops::RangeInclusive<PointId> {
        1..=self.len()
    }

    /// Coordinates of the point with the given id.
    ///
    /// Panics when the id is outside `1..=len()`; ids always originate from
    /// this set, so an unknown id is a programming error.
    pub fn point(&self, id: PointId) -> &[T] {
        assert!(id >= 1 && id <= self.len(), "unknown point id {}", id);
        let offset = (id - 1) * self.dims;
        &self.coords[offset..offset + self.dims]
    }

    pub fn get(&self, id: PointId) -> Option<&[T]> {
        if id >= 1 && id <= self.len() {
            Some(self.point(id))
        } else {
            None
        }
    }

    /// Iterate `(id, coordinates)` in id order.
    pub fn iter(&self) -> impl Iterator<Item = (PointId, &[T])> {
        self.coords.chunks_exact(self.dims).enumerate().map(|(i, p)| (i + 1, p))
    }
}

/// An ordered list of exactly k centroids; the index is the cluster's
/// identity for the whole run.
///
/// Stored row-major like [`PointSet`]. The engine replaces the whole list by
/// value after every round instead of mutating it in place.
#[derive(Clone, Debug, PartialEq)]
pub struct CentroidList<T: Primitive> {
    dims: usize,
    coords: Vec<T>,
}

impl<T: Primitive> CentroidList<T> {
    /// Build a list from row-major coordinates (`k * dims` values).
    pub fn from_rows(dims: usize, coords: Vec<T>) -> Result<Self> {
        if dims == 0 || coords.is_empty() || coords.len() % dims != 0 {
            return Err(QuakeMeansError::invalid(format!(
                "centroid coordinates ({}) must be a non-empty multiple of dims ({})",
                coords.len(),
                dims
            )));
        }
        Ok(Self { dims, coords })
    }

    pub(crate) fn from_raw(dims: usize, coords: Vec<T>) -> Self {
        debug_assert!(dims > 0 && coords.len() % dims == 0);
        Self { dims, coords }
    }

    pub fn k(&self) -> usize {
        self.coords.len() / self.dims
    }

    pub fn dims(&self) -> usize {
        self.dims
    }

    /// Coordinates of the centroid at the given cluster index.
    pub fn centroid(&self, idx: usize) -> &[T] {
        &self.coords[idx * self.dims..(idx + 1) * self.dims]
    }

    /// Iterate centroids in cluster-index order.
    pub fn iter(&self) -> impl Iterator<Item = &[T]> {
        self.coords.chunks_exact(self.dims)
    }
}

/// A partition of all [`PointId`]s into k clusters.
///
/// Cluster `i` belongs to centroid index `i`. Every id of the clustered
/// [`PointSet`] appears in exactly one cluster; clusters may be empty.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClusterAssignment {
    clusters: Vec<Vec<PointId>>,
}

impl ClusterAssignment {
    pub(crate) fn with_k(k: usize) -> Self {
        Self { clusters: vec![Vec::new(); k] }
    }

    pub(crate) fn push(&mut self, cluster: usize, id: PointId) {
        self.clusters[cluster].push(id);
    }

    pub fn k(&self) -> usize {
        self.clusters.len()
    }

    /// Ids assigned to the given cluster index, in ascending id order.
    pub fn cluster(&self, idx: usize) -> &[PointId] {
        &self.clusters[idx]
    }

    /// Iterate clusters in cluster-index order.
    pub fn iter(&self) -> impl Iterator<Item = &[PointId]> {
        self.clusters.iter().map(|c| c.as_slice())
    }

    /// Total number of assigned ids across all clusters.
    pub fn assigned_total(&self) -> usize {
        self.clusters.iter().map(|c| c.len()).sum()
    }
}
