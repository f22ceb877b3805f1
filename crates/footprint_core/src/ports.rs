//! crates/footprint_core/src/ports.rs
//!
//! Defines the service contracts (traits) for the application's core logic.
//! These traits form the boundary of the hexagonal architecture, allowing the core
//! to be independent of the concrete store the ledger lives in.

use crate::domain::{FootprintRecord, NewFootprint};
use async_trait::async_trait;

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// The storage error family for all port operations.
/// This abstracts away the specific errors from external services (e.g., database, network).
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    /// The payload failed the store's schema validation.
    #[error("Invalid record: {0}")]
    Invalid(String),
    /// The store could not be reached, or did not answer in time.
    #[error("Store unavailable: {0}")]
    Unavailable(String),
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

/// The append-only ledger of past footprint calculations.
///
/// There is no update or delete: records are written once and read
/// back by recency only.
#[async_trait]
pub trait LedgerService: Send + Sync {
    /// Persists a calculation, assigning its id and creation timestamp.
    async fn save(&self, footprint: NewFootprint) -> PortResult<FootprintRecord>;

    /// Returns up to `limit` records, newest first. An empty ledger yields an empty list.
    async fn list_recent(&self, limit: usize) -> PortResult<Vec<FootprintRecord>>;
}
