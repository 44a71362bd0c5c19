//! Fare, tip and display calculations.
//!
//! Everything here is a pure function over [`rust_decimal::Decimal`].

pub mod common;
pub mod fare;
pub mod tip;

pub use fare::{compute_fare, elapsed_minutes};
pub use tip::{tip_amount, total_amount};
