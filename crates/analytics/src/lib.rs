//! # Price Statistics Engine
//!
//! Reduces an asset's price history over a time window to a small summary:
//! first/last timestamps and oldest/newest/min/max prices.
//!
//! ## Architectural Principles
//!
//! - **Pure logic:** No I/O and no knowledge of where records come from.
//!   It depends only on `core-types`.
//! - **Stateless calculation:** `StatsEngine` takes records in and hands a
//!   `TimeRangeStats` back. An empty input is a valid, empty summary.
//!
//! ## Public API
//!
//! - `StatsEngine`: The struct that contains the calculation logic.

// Declare the modules that constitute this crate.
pub mod engine;

// Re-export the key components to create a clean, public-facing API.
pub use engine::StatsEngine;
