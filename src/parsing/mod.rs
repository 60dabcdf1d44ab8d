//! Ingest boundary: raw JSON from the data layer into typed records.

pub mod records;

pub use records::{records_from_json_str, records_from_values};
