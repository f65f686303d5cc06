//! Ingestion of USGS earthquake catalog exports.
//!
//! The USGS FDSN event service (<https://earthquake.usgs.gov/fdsnws/event/1/>)
//! serves catalog queries as CSV with a fixed column order:
//! `time,latitude,longitude,depth,mag,...`. This module turns such an export
//! into a [`PointSet`] of `(longitude, latitude)` epicenters. Fetching the
//! CSV over the network is the caller's concern; anything readable line by
//! line can be parsed.

use crate::error::{QuakeMeansError, Result};
use crate::points::PointSet;
use log::info;
use std::io::BufRead;

/// Column indices of the USGS event CSV.
const COL_LATITUDE: usize = 1;
const COL_LONGITUDE: usize = 2;

/// Parse a USGS event CSV export into a [`PointSet`] of epicenters.
///
/// The first line is skipped as the header. Each remaining non-empty row
/// contributes one `(longitude, latitude)` point, both rounded to 2 decimal
/// places; ids are assigned sequentially from 1 in row order.
///
/// The latitude and longitude columns precede the only quoted field of the
/// format (`place`), so splitting rows on plain commas is safe here.
pub fn parse_usgs_csv<R: BufRead>(reader: R) -> Result<PointSet<f64>> {
    let mut points = PointSet::new(2)?;
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        if idx == 0 || line.trim().is_empty() {
            continue;
        }
        let line_no = idx + 1;
        let fields: Vec<&str> = line.split(',').collect();
        if fields.len() <= COL_LONGITUDE {
            return Err(QuakeMeansError::MalformedRecord { line: line_no });
        }
        let lat: f64 = fields[COL_LATITUDE]
            .trim()
            .parse()
            .map_err(|_| QuakeMeansError::MalformedRecord { line: line_no })?;
        let lon: f64 = fields[COL_LONGITUDE]
            .trim()
            .parse()
            .map_err(|_| QuakeMeansError::MalformedRecord { line: line_no })?;
        points.push(&[round2(lon), round2(lat)])?;
    }
    info!("parsed {} epicenters", points.len());
    Ok(points)
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}
