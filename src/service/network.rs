use rand::Rng;
use std::collections::BTreeMap;

use crate::models::KNOWN_BANKS;

#[derive(Debug, Clone, PartialEq)]
pub struct FederatedRound {
    pub round_id: String,
    pub new_accuracy: f64,
}

/// Pretend each other bank found 2 to 8 matching patterns.
pub fn broadcast_impact<R: Rng + ?Sized>(rng: &mut R, source_bank: &str) -> BTreeMap<String, u32> {
    KNOWN_BANKS
        .iter()
        .filter(|bank| **bank != source_bank)
        .map(|bank| (bank.to_string(), rng.gen_range(2..=8)))
        .collect()
}

pub fn federated_round<R: Rng + ?Sized>(rng: &mut R) -> FederatedRound {
    let accuracy: f64 = rng.gen_range(0.90..=0.98);
    FederatedRound {
        round_id: format!("FL-{}", rng.gen_range(1000..=9999)),
        new_accuracy: (accuracy * 1000.0).round() / 1000.0,
    }
}
