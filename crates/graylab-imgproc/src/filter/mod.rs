//! Filter operations
//!
//! This module provides the sliding-window filter engine: mean, median, min,
//! max and weighted (gaussian) aggregates over square neighbourhoods, plus the
//! fixed 3x3 edge operators built on the same windowing.

/// Filter kernels
pub mod kernels;

/// Sliding-window filters
pub(crate) mod window;
pub use window::*;

/// Edge operators
mod edge;
pub use edge::*;
