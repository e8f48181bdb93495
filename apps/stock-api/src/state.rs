//! Shared application state.

use stock_db::Ledger;

/// State handed to every handler.
///
/// Cloned per request; the ledger's pool and notifier are shared.
#[derive(Debug, Clone)]
pub struct AppState {
    pub ledger: Ledger,
}

impl AppState {
    pub fn new(ledger: Ledger) -> Self {
        AppState { ledger }
    }
}
