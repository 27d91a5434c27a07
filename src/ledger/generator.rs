//! Synthetic demo corpus.
//!
//! All randomness comes from the caller's `Rng`, so a seeded `StdRng`
//! reproduces the same corpus for a given `now`.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::models::{classify, Transaction, KNOWN_BANKS};

pub const DEFAULT_LEGITIMATE_COUNT: usize = 170;
pub const DEFAULT_FRAUD_COUNT: usize = 30;

/// Generated timestamps fall within this many seconds before `now`.
pub const HISTORY_WINDOW_SECS: u32 = 86_400;

const LEGITIMATE_USERS: [&str; 4] = ["Alice", "Bob", "Charlie", "admin"];
const FRAUD_USER: &str = "system";

const LEGITIMATE_TEMPLATES: [(&str, f64); 15] = [
    ("Coffee at Starbucks", 4.50),
    ("Grocery shopping at Walmart", 87.32),
    ("Gas station fill-up", 45.00),
    ("Online shopping Amazon", 156.78),
    ("Restaurant dinner", 67.90),
    ("Movie tickets", 28.00),
    ("Gym membership", 49.99),
    ("Phone bill payment", 85.00),
    ("Electric utility", 120.50),
    ("Rent payment", 1500.00),
    ("Car insurance", 275.00),
    ("Netflix subscription", 15.99),
    ("Spotify premium", 9.99),
    ("Pharmacy prescription", 34.50),
    ("Pet store supplies", 56.80),
];

const FRAUD_TEMPLATES: [(&str, f64); 8] = [
    ("Unauthorized card testing", 1.00),
    ("Suspicious offshore transfer", 9500.00),
    ("Stolen card purchase", 2500.00),
    ("Card verification attempt", 0.50),
    ("Unusual foreign transaction", 7800.00),
    ("Multiple small charges", 2.99),
    ("High-risk merchant", 5600.00),
    ("Suspicious ATM withdrawal", 3000.00),
];

fn pick<'a, T, R: Rng + ?Sized>(rng: &mut R, items: &'a [T]) -> &'a T {
    &items[rng.gen_range(0..items.len())]
}

fn past_timestamp<R: Rng + ?Sized>(rng: &mut R, now: f64) -> f64 {
    now - f64::from(rng.gen_range(0..=HISTORY_WINDOW_SECS))
}

/// Build `legitimate` + `fraud` records and shuffle them.
///
/// Tiers go through the same `classify` policy as ingest, so a sub-5
/// legitimate template lands in the medium tier.
pub fn generate_corpus<R: Rng + ?Sized>(
    rng: &mut R,
    legitimate: usize,
    fraud: usize,
    now: f64,
) -> Vec<Transaction> {
    let mut data = Vec::with_capacity(legitimate + fraud);

    for i in 0..legitimate {
        let (description, amount) = *pick(rng, &LEGITIMATE_TEMPLATES);
        let bank = *pick(rng, &KNOWN_BANKS);
        let user_id = *pick(rng, &LEGITIMATE_USERS);
        let (risk_level, index_source) = classify(0, amount);
        data.push(Transaction {
            id: format!("demo_{}", i),
            description: description.to_string(),
            amount,
            bank: bank.to_string(),
            user_id: user_id.to_string(),
            is_fraud: 0,
            timestamp: past_timestamp(rng, now),
            risk_level,
            index_source,
        });
    }

    for i in 0..fraud {
        let (description, amount) = *pick(rng, &FRAUD_TEMPLATES);
        let bank = *pick(rng, &KNOWN_BANKS);
        let (risk_level, index_source) = classify(1, amount);
        data.push(Transaction {
            id: format!("demo_threat_{}", i),
            description: description.to_string(),
            amount,
            bank: bank.to_string(),
            user_id: FRAUD_USER.to_string(),
            is_fraud: 1,
            timestamp: past_timestamp(rng, now),
            risk_level,
            index_source,
        });
    }

    data.shuffle(rng);
    data
}
