//! Per-chart analytics derived from normalized samples.
//!
//! Each service is a pure function from samples (plus explicit caller
//! configuration) to one chart-ready structure. Services never consult each
//! other's outputs and never mutate their inputs, so callers may run them in
//! any order or in parallel.

pub mod aggregation;
pub mod events;
pub mod geometry;
pub mod hotspots;
pub mod lunar;
pub mod risk;

pub use aggregation::{aggregate_monthly, MonthlyAggregate, MonthlyBucket};
pub use events::{detect_events, Event};
pub use geometry::{to_coordinates, to_svg_path, Coordinate};
pub use hotspots::{build_density_grid, GridCell};
pub use lunar::{correlate_with_metric, lunar_phase, PhasePoint};
pub use risk::{classify_condition, latest_by_region, risk_forecast, ConditionStatus, RegionSnapshot, RiskPoint};
