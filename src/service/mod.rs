//! Mock "intelligence" collaborators for the demo front end.
//!
//! Nothing here is a real model: outputs are canned text, simple rules or
//! random numbers, shaped to match what the dashboard expects.

pub mod analysis;
pub mod network;

pub use analysis::{fraud_report, quick_threat_check, ThreatAssessment};
pub use network::{broadcast_impact, federated_round, FederatedRound};
