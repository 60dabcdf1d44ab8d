//! Shared value objects and time handling.

pub mod record;
pub mod time;

pub use record::*;
pub use time::*;
