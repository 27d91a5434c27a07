pub mod api;
pub mod config;
pub mod ledger;
pub mod models;
pub mod service;
pub mod state;
pub mod validation;

#[cfg(test)]
pub mod tests;

// Re-export specific items for convenience
pub use api::error::ApiError;
pub use api::route::{create_router, BroadcastRequest, SearchRequest, TransactionRequest};
pub use ledger::{BootstrapOptions, Ledger, LedgerError, SearchQuery};
pub use models::{IndexSource, LedgerStats, RiskLevel, SearchHit, Transaction};
pub use validation::{validate_ingest, ValidationError};
