//! # Record Store Crate
//!
//! Read-only access to the historical price files, one file per asset.
//!
//! ## Architectural Principles
//!
//! - **Adapter:** All file-format details (naming, CSV layout, tolerance of
//!   malformed rows) stay in this crate. Callers only see `PriceRecord`s.
//! - **Stateless reads:** No handle is held between calls. Each `fetch` opens
//!   and reads the asset's file, so one store can serve concurrent requests.
//! - **Two failure modes:** a missing file (`StoreError::NotFound`) is kept
//!   distinct from any other read failure (`StoreError::Read`). An empty
//!   result is a success.
//!
//! ## Public API
//!
//! - `connect`: Validates the data directory and returns a `CsvRecordStore`.
//! - `RecordStore`: The trait the query layer is written against.
//! - `CsvRecordStore` / `InMemoryRecordStore`: file-backed and in-memory implementations.
//! - `StoreError`: The specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod connection;
pub mod error;
pub mod repository;

// Re-export the key components to create a clean, public-facing API.
pub use connection::connect;
pub use error::StoreError;
pub use repository::{CsvRecordStore, InMemoryRecordStore, RecordStore};
