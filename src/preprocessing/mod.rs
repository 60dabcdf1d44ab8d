//! Normalization of raw records into canonical samples.

pub mod normalizer;

pub use normalizer::normalize;
