//! services/api/src/lib.rs
//!
//! The footprint HTTP service: configuration, ledger adapters and the axum router.

pub mod adapters;
pub mod config;
pub mod error;
pub mod web;
