//! In-memory transaction ledger.
//!
//! Holds every record for the lifetime of the process. The ledger itself has
//! no interior locking; callers sharing it across tasks wrap it in a lock
//! (see `state::AppState`).

pub mod error;
pub mod generator;
pub mod snapshot;

use std::path::PathBuf;

use chrono::Utc;
use rand::Rng;
use tracing::{debug, info};

use crate::models::{
    classify, principal_bank, HitMetadata, IndexSource, LedgerStats, SearchHit, Transaction, ADMIN_USER,
    ALL_BANKS, KNOWN_BANKS,
};
use crate::validation::validate_ingest;

pub use error::{LedgerError, SnapshotError};
pub use generator::{DEFAULT_FRAUD_COUNT, DEFAULT_LEGITIMATE_COUNT};

/// Maximum number of rows returned by `Ledger::search`.
pub const SEARCH_LIMIT: usize = 30;

/// Placeholder relevance given to every hit.
pub const PLACEHOLDER_SCORE: f64 = 0.5;

/// How the ledger is populated at startup.
#[derive(Debug, Clone)]
pub struct BootstrapOptions {
    /// Snapshot to load, or to write after generation. `None` generates
    /// without persisting anything.
    pub snapshot_path: Option<PathBuf>,
    pub legitimate_count: usize,
    pub fraud_count: usize,
}

impl Default for BootstrapOptions {
    fn default() -> Self {
        Self {
            snapshot_path: None,
            legitimate_count: DEFAULT_LEGITIMATE_COUNT,
            fraud_count: DEFAULT_FRAUD_COUNT,
        }
    }
}

/// Search parameters. `Default` gives an unfiltered admin search.
#[derive(Debug, Clone)]
pub struct SearchQuery {
    pub query: String,
    pub bank_filter: String,
    pub min_amount: f64,
    pub user_id: String,
}

impl Default for SearchQuery {
    fn default() -> Self {
        Self {
            query: String::new(),
            bank_filter: ALL_BANKS.to_string(),
            min_amount: 0.0,
            user_id: ADMIN_USER.to_string(),
        }
    }
}

impl SearchQuery {
    pub fn text(query: &str) -> Self {
        Self {
            query: query.to_string(),
            ..Self::default()
        }
    }

    pub fn as_user(mut self, user_id: &str) -> Self {
        self.user_id = user_id.to_string();
        self
    }

    pub fn in_bank(mut self, bank: &str) -> Self {
        self.bank_filter = bank.to_string();
        self
    }

    pub fn min_amount(mut self, min_amount: f64) -> Self {
        self.min_amount = min_amount;
        self
    }

    /// Bank restriction after access control. Recognised non-admin principals
    /// are pinned to their own bank whatever filter they asked for.
    fn effective_bank(&self) -> &str {
        if self.user_id != ADMIN_USER {
            if let Some(bank) = principal_bank(&self.user_id) {
                return bank;
            }
        }
        &self.bank_filter
    }
}

#[derive(Debug, Default)]
pub struct Ledger {
    transactions: Vec<Transaction>,
    ingested: u64,
}

fn now_secs() -> f64 {
    Utc::now().timestamp_micros() as f64 / 1_000_000.0
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(transactions: Vec<Transaction>) -> Self {
        Self {
            transactions,
            ingested: 0,
        }
    }

    /// Load the snapshot if one exists, otherwise generate a fresh corpus
    /// and persist it so the next startup reuses it.
    ///
    /// A snapshot that exists but cannot be read or parsed is an error; it
    /// is never silently replaced.
    pub fn initialize<R: Rng + ?Sized>(
        options: &BootstrapOptions,
        rng: &mut R,
    ) -> Result<Self, LedgerError> {
        if let Some(path) = &options.snapshot_path {
            if path.exists() {
                let records = snapshot::load(path).map_err(|source| LedgerError::Bootstrap {
                    path: path.clone(),
                    source,
                })?;
                return Ok(Self::from_records(records));
            }
        }

        info!(
            "Generating demo dataset ({} legitimate, {} fraud)",
            options.legitimate_count, options.fraud_count
        );
        let records = generator::generate_corpus(
            rng,
            options.legitimate_count,
            options.fraud_count,
            now_secs(),
        );

        if let Some(path) = &options.snapshot_path {
            snapshot::save(path, &records).map_err(|source| LedgerError::SnapshotWrite {
                path: path.clone(),
                source,
            })?;
            info!("Saved demo dataset to {}", path.display());
        }

        Ok(Self::from_records(records))
    }

    /// Ingest a new record at the front of the ledger and return its id.
    pub fn add(
        &mut self,
        description: &str,
        amount: f64,
        bank: &str,
        user_id: &str,
        is_fraud: u8,
    ) -> Result<String, LedgerError> {
        let is_fraud = validate_ingest(description, amount, bank, user_id, i64::from(is_fraud))?;

        let (risk_level, index_source) = classify(is_fraud, amount);
        let now = Utc::now();
        let id = format!("user_{}", now.timestamp_millis());

        let transaction = Transaction {
            id: id.clone(),
            description: description.to_string(),
            amount,
            bank: bank.to_string(),
            user_id: user_id.to_string(),
            is_fraud,
            timestamp: now.timestamp_micros() as f64 / 1_000_000.0,
            risk_level,
            index_source,
        };

        self.transactions.insert(0, transaction);
        self.ingested += 1;
        info!("Stored transaction {} in {} ({})", id, bank, risk_level);

        Ok(id)
    }

    /// Filter, rank by recency and cap at `SEARCH_LIMIT`.
    pub fn search(&self, query: &SearchQuery) -> Vec<SearchHit> {
        let bank = query.effective_bank();
        let is_admin = query.user_id == ADMIN_USER;
        let needle = query.query.to_lowercase();

        let mut matches: Vec<&Transaction> = self
            .transactions
            .iter()
            .filter(|t| bank == ALL_BANKS || t.bank == bank)
            .filter(|t| t.amount >= query.min_amount)
            .filter(|t| needle.is_empty() || t.description.to_lowercase().contains(&needle))
            .filter(|t| is_admin || t.index_source != IndexSource::KnownThreats)
            .collect();

        // Stable, so equal timestamps keep ledger order.
        matches.sort_by(|a, b| b.timestamp.total_cmp(&a.timestamp));
        matches.truncate(SEARCH_LIMIT);

        debug!(
            "Search '{}' by {} in {}: {} hits",
            query.query,
            query.user_id,
            bank,
            matches.len()
        );

        matches
            .into_iter()
            .map(|t| SearchHit {
                id: t.id.clone(),
                score: PLACEHOLDER_SCORE,
                risk_level: t.risk_level,
                metadata: HitMetadata {
                    description: t.description.clone(),
                    amount: t.amount,
                    bank: t.bank.clone(),
                    user_id: t.user_id.clone(),
                    timestamp: t.timestamp,
                },
                index_source: t.index_source,
            })
            .collect()
    }

    /// Remove every record with this id. Reports success even when nothing
    /// matched.
    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.transactions.len();
        self.transactions.retain(|t| t.id != id);
        let removed = before - self.transactions.len();
        info!("Deleted {} record(s) with id {}", removed, id);
        true
    }

    /// Totals plus a per-bank breakdown over `KNOWN_BANKS` only; records
    /// from any other bank count toward `total` but no bucket.
    pub fn stats(&self) -> LedgerStats {
        let total = self.transactions.len();
        let threats = self.transactions.iter().filter(|t| t.is_threat()).count();

        let by_bank = KNOWN_BANKS
            .iter()
            .map(|bank| {
                let count = self.transactions.iter().filter(|t| t.bank == *bank).count();
                (bank.to_string(), count)
            })
            .collect();

        LedgerStats {
            total,
            threats,
            legitimate: total - threats,
            by_bank,
        }
    }

    pub fn records(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Number of successful `add` calls since construction.
    pub fn ingested_count(&self) -> u64 {
        self.ingested
    }
}
