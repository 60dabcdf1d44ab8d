//! Shared coordinate mapping for chart producers.
//!
//! Every chart in the rendering layer needs the same primitive: a numeric
//! series linear-mapped into a pixel box. Keeping it in one place gives all
//! charts the same edge-case behavior; in particular a zero-width domain maps
//! to the vertical midpoint instead of dividing by zero. No chart-specific
//! logic belongs here.

use serde::{Deserialize, Serialize};

/// A point in the target pixel/unit box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: f64,
    pub y: f64,
}

/// Linear-map `series` into `[0, width] × [0, height]`.
///
/// Values are spaced evenly along x in series order; y is the value's
/// position within `[domain_min, domain_max]`. When the domain is degenerate
/// (`domain_max == domain_min`) every value maps to `height / 2` — a
/// documented fallback, not an error. `invert_y` flips the vertical axis for
/// screen-space renderers where larger values should sit higher.
pub fn to_coordinates(
    series: &[f64],
    domain_min: f64,
    domain_max: f64,
    width: f64,
    height: f64,
    invert_y: bool,
) -> Vec<Coordinate> {
    if series.is_empty() {
        return Vec::new();
    }

    let step_x = if series.len() > 1 {
        width / (series.len() - 1) as f64
    } else {
        0.0
    };
    let range = domain_max - domain_min;

    series
        .iter()
        .enumerate()
        .map(|(i, &value)| {
            let y = if range == 0.0 {
                height / 2.0
            } else {
                let norm = ((value - domain_min) / range) * height;
                if invert_y {
                    height - norm
                } else {
                    norm
                }
            };
            Coordinate {
                x: i as f64 * step_x,
                y,
            }
        })
        .collect()
}

/// Render coordinates as an SVG path string: `"M x,y L x,y …"`.
///
/// Empty input produces an empty string, which SVG treats as no path.
pub fn to_svg_path(coordinates: &[Coordinate]) -> String {
    let mut path = String::new();
    for (i, c) in coordinates.iter().enumerate() {
        if i == 0 {
            path.push_str(&format!("M {},{}", c.x, c.y));
        } else {
            path.push_str(&format!(" L {},{}", c.x, c.y));
        }
    }
    path
}
