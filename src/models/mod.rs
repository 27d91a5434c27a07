// Transaction record held by the ledger, plus the shapes handed back by
// search and stats. Field names double as the snapshot and wire format.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Banks with a dedicated bucket in `LedgerStats::by_bank`.
pub const KNOWN_BANKS: [&str; 3] = ["Bank A", "Bank B", "Bank C"];

/// Privileged principal: sees every bank and every threat record.
pub const ADMIN_USER: &str = "admin";

/// Bank filter value meaning "no bank restriction".
pub const ALL_BANKS: &str = "All";

/// Bank a non-admin principal is pinned to, if the principal is recognised.
pub fn principal_bank(user_id: &str) -> Option<&'static str> {
    match user_id {
        "Alice" => Some("Bank A"),
        "Bob" => Some("Bank B"),
        "Charlie" => Some("Bank C"),
        _ => None,
    }
}

/// Display tier chosen once, at record creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    #[serde(rename = "🚫 BLOCKED (Known Threat Pattern)")]
    Blocked,
    #[serde(rename = "⚠️ MEDIUM RISK (Unusual Pattern)")]
    MediumRisk,
    #[serde(rename = "✅ LOW RISK (Verified Pattern)")]
    LowRisk,
}

impl RiskLevel {
    pub fn label(&self) -> &'static str {
        match self {
            RiskLevel::Blocked => "🚫 BLOCKED (Known Threat Pattern)",
            RiskLevel::MediumRisk => "⚠️ MEDIUM RISK (Unusual Pattern)",
            RiskLevel::LowRisk => "✅ LOW RISK (Verified Pattern)",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Access-control tag. `KnownThreats` records are admin-only in search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexSource {
    KnownThreats,
    #[default]
    SecureHistory,
}

/// Derive the tier and tag for a new record.
///
/// A flagged record is always blocked; the medium tier is only reachable
/// through a small legitimate amount, never through the fraud flag.
pub fn classify(is_fraud: u8, amount: f64) -> (RiskLevel, IndexSource) {
    if is_fraud == 1 {
        (RiskLevel::Blocked, IndexSource::KnownThreats)
    } else if amount < 5.0 {
        (RiskLevel::MediumRisk, IndexSource::SecureHistory)
    } else {
        (RiskLevel::LowRisk, IndexSource::SecureHistory)
    }
}

fn default_user() -> String {
    "system".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub description: String,
    pub amount: f64,
    pub bank: String,
    #[serde(default = "default_user")]
    pub user_id: String,
    pub is_fraud: u8,
    /// Seconds since the Unix epoch, fractional.
    pub timestamp: f64,
    pub risk_level: RiskLevel,
    #[serde(default)]
    pub index_source: IndexSource,
}

impl Transaction {
    pub fn is_threat(&self) -> bool {
        self.is_fraud == 1
    }
}

// Search result row

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HitMetadata {
    pub description: String,
    pub amount: f64,
    pub bank: String,
    pub user_id: String,
    pub timestamp: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub id: String,
    pub score: f64,
    pub risk_level: RiskLevel,
    pub metadata: HitMetadata,
    pub index_source: IndexSource,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerStats {
    pub total: usize,
    pub threats: usize,
    pub legitimate: usize,
    pub by_bank: BTreeMap<String, usize>,
}
