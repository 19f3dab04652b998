//! Time-bound pricing for parking sessions.
//!
//! A price rule carries an initial-hour rate and an additional-hour rate and
//! applies to sessions whose entry falls within its date range. Resolution
//! prefers ranges containing the entry (most recent start wins on overlap)
//! and falls back to the most recent rule started before the entry. The fee
//! itself is a pure tiered computation over exact decimals.

pub mod models;
pub mod services;

pub use services::PricingService;
