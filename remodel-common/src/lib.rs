//! Shared helpers for decoding binary containers
//!
//! All offset arithmetic in the remodel crates goes through [`math`] so that
//! corrupt offsets surface as errors instead of overflowing.

pub mod math;
pub mod utils;
