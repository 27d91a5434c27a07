// Runtime configuration, read from the environment (and `.env` if present):
// - bind address/port
// - snapshot location and demo corpus size
// - simulated latency of the mock endpoints

use dotenv::dotenv;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::ledger::{BootstrapOptions, DEFAULT_FRAUD_COUNT, DEFAULT_LEGITIMATE_COUNT};

pub const DEFAULT_SNAPSHOT_PATH: &str = "demo_data.json";

#[derive(Debug, Clone)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub snapshot_path: Option<PathBuf>,
    pub legitimate_count: usize,
    pub fraud_count: usize,
    pub demo_seed: Option<u64>,
    pub mock_latency: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_host: "0.0.0.0".to_string(),
            server_port: 8000,
            snapshot_path: Some(PathBuf::from(DEFAULT_SNAPSHOT_PATH)),
            legitimate_count: DEFAULT_LEGITIMATE_COUNT,
            fraud_count: DEFAULT_FRAUD_COUNT,
            demo_seed: None,
            mock_latency: Duration::from_millis(1000),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();
        let defaults = Self::default();

        let server_host = env::var("SERVER_HOST").unwrap_or(defaults.server_host);
        let server_port = env::var("PORT")
            .or_else(|_| env::var("SERVER_PORT"))
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.server_port);
        let snapshot_path = match env::var("SNAPSHOT_PATH") {
            Ok(v) if v.trim().is_empty() => None,
            Ok(v) => Some(PathBuf::from(v)),
            Err(_) => defaults.snapshot_path,
        };
        let legitimate_count = env::var("DEMO_LEGITIMATE_COUNT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.legitimate_count);
        let fraud_count = env::var("DEMO_FRAUD_COUNT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.fraud_count);
        let demo_seed = env::var("DEMO_SEED").ok().and_then(|v| v.parse().ok());
        let mock_latency = env::var("MOCK_LATENCY_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .map(Duration::from_millis)
            .unwrap_or(defaults.mock_latency);

        Self {
            server_host,
            server_port,
            snapshot_path,
            legitimate_count,
            fraud_count,
            demo_seed,
            mock_latency,
        }
    }

    pub fn bootstrap_options(&self) -> BootstrapOptions {
        BootstrapOptions {
            snapshot_path: self.snapshot_path.clone(),
            legitimate_count: self.legitimate_count,
            fraud_count: self.fraud_count,
        }
    }

    /// Delay for the heavier mock endpoints (federated round, analysis):
    /// one and a half times `mock_latency`.
    pub fn extended_mock_latency(&self) -> Duration {
        self.mock_latency.mul_f64(1.5)
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}
