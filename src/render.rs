//! Plotting support for the rendering collaborator.
//!
//! The crate does not draw anything itself. It provides the pieces a
//! renderer needs to put a finished clustering onto a world-map backdrop:
//! the per-cluster color palette, an equirectangular projection from
//! longitude/latitude to centered screen coordinates, and [`draw`], which
//! walks a [`ClusterAssignment`] and emits one colored dot per epicenter
//! through the [`Canvas`] trait.

use crate::error::{QuakeMeansError, Result};
use crate::points::{ClusterAssignment, PointSet};

/// Per-cluster colors, in cluster-index order.
///
/// This caps the usable k at [`MAX_CLUSTERS`] on the rendering side; the
/// clustering engine itself does not care.
pub const PALETTE: [&str; 30] = [
    "dark red", "dark green", "dark blue", "dark orange",
    "dark orchid", "dark goldenrod", "dark violet",
    "pink", "magenta", "sky blue", "plum", "dark salmon",
    "goldenrod", "chartreuse", "dark sea green", "cornsilk",
    "dark olive green", "bisque", "blanched almond",
    "dark cyan", "royal blue", "papaya whip", "peach puff",
    "misty rose", "mint cream", "lavender blush", "hot pink",
    "dark khaki", "cornflower blue", "chocolate",
];

/// Largest k the palette can color.
pub const MAX_CLUSTERS: usize = PALETTE.len();

/// Equirectangular projection onto a `width` x `height` canvas whose origin
/// is at the center (longitude 0, latitude 0), x growing east and y growing
/// north. A 2:1 canvas (e.g. 1800x900) keeps degrees square.
#[derive(Clone, Copy, Debug)]
pub struct Projection {
    w_factor: f64,
    h_factor: f64,
}

impl Projection {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            w_factor: (width as f64 / 2.0) / 180.0,
            h_factor: (height as f64 / 2.0) / 90.0,
        }
    }

    /// Map an epicenter to centered screen coordinates.
    pub fn to_screen(&self, lon: f64, lat: f64) -> (f64, f64) {
        (lon * self.w_factor, lat * self.h_factor)
    }
}

/// Drawing surface the rendering collaborator implements.
pub trait Canvas {
    /// Paint one dot of the given palette color at centered screen
    /// coordinates.
    fn dot(&mut self, color: &'static str, x: f64, y: f64);
}

/// Emit every clustered epicenter as a colored dot onto `canvas`.
///
/// Cluster index i is painted with `PALETTE[i]`, so `clusters.k()` must not
/// exceed [`MAX_CLUSTERS`].
pub fn draw<C: Canvas>(
    canvas: &mut C, points: &PointSet<f64>, clusters: &ClusterAssignment, projection: &Projection,
) -> Result<()> {
    if clusters.k() > MAX_CLUSTERS {
        return Err(QuakeMeansError::invalid(format!(
            "k ({}) exceeds the palette's {} colors", clusters.k(), MAX_CLUSTERS
        )));
    }
    for (ci, members) in clusters.iter().enumerate() {
        let color = PALETTE[ci];
        for &id in members {
            let point = points.point(id);
            let (x, y) = projection.to_screen(point[0], point[1]);
            canvas.dot(color, x, y);
        }
    }
    Ok(())
}
