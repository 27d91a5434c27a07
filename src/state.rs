use crate::config::Config;
use crate::ledger::Ledger;
use tokio::sync::RwLock;

pub struct AppState {
    pub config: Config,
    /// Search and stats take the read side; ingest and delete the write side.
    pub ledger: RwLock<Ledger>,
}

impl AppState {
    pub fn new(config: Config, ledger: Ledger) -> Self {
        Self {
            config,
            ledger: RwLock::new(ledger),
        }
    }
}
