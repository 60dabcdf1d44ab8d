//! Spatial hotspot density estimation.
//!
//! Bins occurrence coordinates into a fixed grid and normalizes counts to a
//! 0–1 relative density for the hotspot probability map. Points outside the
//! caller's bounds are excluded rather than clamped; clamping would fabricate
//! density along the edges.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::models::{GeoBounds, GeoPoint};

/// One cell of the density grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridCell {
    /// Column index, `0..grid_width`.
    pub x: usize,
    /// Row index, `0..grid_height`.
    pub y: usize,
    pub raw_count: usize,
    /// `raw_count / max_raw_count`, in `[0, 1]`; 0 everywhere for an empty
    /// grid.
    pub density: f64,
}

/// Bin `points` into a `grid_width` × `grid_height` grid over `bounds` and
/// normalize counts to relative density.
///
/// Returned as rows: `grid[y][x]`. Non-finite coordinates and points outside
/// `bounds` are dropped silently, consistent with the pipeline's tolerant
/// posture. Degenerate dimensions or inverted bounds are caller errors.
pub fn build_density_grid(
    points: &[GeoPoint],
    bounds: &GeoBounds,
    grid_width: usize,
    grid_height: usize,
) -> CoreResult<Vec<Vec<GridCell>>> {
    if grid_width == 0 || grid_height == 0 {
        return Err(CoreError::InvalidGridDimensions {
            width: grid_width,
            height: grid_height,
        });
    }
    if !bounds.is_valid() {
        return Err(CoreError::InvalidBounds {
            lat_min: bounds.lat_min,
            lat_max: bounds.lat_max,
            lon_min: bounds.lon_min,
            lon_max: bounds.lon_max,
        });
    }

    let lat_span = bounds.lat_max - bounds.lat_min;
    let lon_span = bounds.lon_max - bounds.lon_min;

    let mut counts = vec![vec![0usize; grid_width]; grid_height];
    for point in points {
        if !point.is_finite() || !bounds.contains(point) {
            continue;
        }
        let x = ((point.lon - bounds.lon_min) / lon_span * grid_width as f64).floor() as usize;
        let y = ((point.lat - bounds.lat_min) / lat_span * grid_height as f64).floor() as usize;
        // Containment is half-open, so the indices are always in range; the
        // guard keeps float rounding at the very edge from slipping past.
        if x < grid_width && y < grid_height {
            counts[y][x] += 1;
        }
    }

    let max_count = counts
        .iter()
        .flat_map(|row| row.iter())
        .copied()
        .max()
        .unwrap_or(0);
    // max(1, ..) defines the all-empty grid: every density is 0, not 0/0.
    let denominator = max_count.max(1) as f64;

    let grid = counts
        .into_iter()
        .enumerate()
        .map(|(y, row)| {
            row.into_iter()
                .enumerate()
                .map(|(x, raw_count)| GridCell {
                    x,
                    y,
                    raw_count,
                    density: raw_count as f64 / denominator,
                })
                .collect()
        })
        .collect();

    Ok(grid)
}
