//! # Ocean Analytics Core
//!
//! Pure transformation engine for marine environmental monitoring dashboards.
//!
//! This crate turns irregular, sparsely-populated sensor records (oceanographic
//! readings, species-abundance counts, occurrence coordinates) into the derived
//! structures a rendering layer needs: monthly anomaly grids, committed
//! threshold-crossing events, spatial hotspot densities, lunar-correlation
//! curves and normalized chart coordinates.
//!
//! ## Architecture
//!
//! The crate is organized into several logical modules:
//!
//! - [`models`]: Value objects shared across the pipeline (records, samples,
//!   geographic types) and tolerant timestamp handling
//! - [`parsing`]: Ingest boundary turning raw JSON into [`models::RawRecord`]s
//! - [`preprocessing`]: Normalization of raw records into canonical samples
//! - [`services`]: Per-chart analytics (aggregation, event detection, density
//!   grids, lunar correlation, geometry mapping, derived indicators)
//!
//! Data flows one way: raw records are normalized once, then each service
//! derives its own output from the shared samples. Every function is a pure,
//! synchronous transform over already-materialized slices; there is no I/O,
//! no global state, and identical inputs always produce identical outputs.
//!
//! ## Input tolerance
//!
//! Sensor feeds are partially corrupt as a matter of course. Rows with
//! unparsable timestamps or coordinates are skipped (logged at debug level),
//! missing numeric fields follow an explicit per-call policy, and empty
//! inputs yield explicit "no data" sentinels instead of NaN. Only caller
//! contract violations (e.g. a zero-width grid) return [`error::CoreError`].

pub mod error;
pub mod models;
pub mod parsing;
pub mod preprocessing;
pub mod services;

pub use error::{CoreError, CoreResult};
