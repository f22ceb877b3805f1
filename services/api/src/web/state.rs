//! services/api/src/web/state.rs
//!
//! Defines the application's shared state.

use crate::config::Config;
use footprint_core::ports::{LedgerService, PortError, PortResult};
use std::future::Future;
use std::sync::Arc;

//=========================================================================================
// AppState (Shared Across All Requests)
//=========================================================================================

/// The shared application state, created once at startup and passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub ledger: Arc<dyn LedgerService>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(ledger: Arc<dyn LedgerService>, config: Arc<Config>) -> Self {
        Self { ledger, config }
    }

    /// Runs a ledger call, giving up once the configured timeout elapses.
    pub async fn bounded<T, F>(&self, call: F) -> PortResult<T>
    where
        F: Future<Output = PortResult<T>>,
    {
        tokio::time::timeout(self.config.ledger_timeout, call)
            .await
            .map_err(|_| {
                PortError::Unavailable(format!(
                    "ledger did not answer within {:?}",
                    self.config.ledger_timeout
                ))
            })?
    }
}
