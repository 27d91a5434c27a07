use sentinel_ledger::{
    api::{
        self,
        response::{DeleteResponse, IngestResponse, SearchResponse, StreamingStatsResponse},
    },
    config::Config,
    ledger::{BootstrapOptions, Ledger},
    state::AppState,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use reqwest::StatusCode;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::time::sleep;
use tracing::{error, info, Level};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Setup tracing
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .init();

    info!("Starting API integration tests...");

    // 1. Setup: seeded, in-memory corpus, no snapshot on disk
    let config = Config {
        snapshot_path: None,
        mock_latency: Duration::ZERO,
        ..Config::default()
    };
    let mut rng = StdRng::seed_from_u64(17);
    let ledger = Ledger::initialize(&BootstrapOptions::default(), &mut rng)?;
    info!("✅ Generated {} demo transactions", ledger.len());

    let app_state = Arc::new(AppState::new(config, ledger));

    // 2. Start API server in a background task
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
    let port = 3333;
    let server_addr = format!("127.0.0.1:{}", port);
    info!("Starting test server on {}", server_addr);

    let listener = tokio::net::TcpListener::bind(&server_addr).await?;
    let server_handle = tokio::spawn(async move {
        let app = api::create_router(app_state);
        tokio::select! {
            result = axum::serve(listener, app) => {
                if let Err(e) = result {
                    error!("Server error: {}", e);
                }
            }
            _ = shutdown_rx => {
                info!("Server shutdown received");
            }
        }
    });

    // Give the server time to start
    sleep(Duration::from_millis(200)).await;

    let client = reqwest::Client::new();
    let base_url = format!("http://{}", server_addr);

    // 3. Health
    info!("\n===== Testing / =====");
    let response = client.get(format!("{}/", base_url)).send().await?;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await?;
    assert_eq!(body["status"], "online");
    info!("✅ Service is online");

    // 4. Stats before ingest
    let before: StreamingStatsResponse = client
        .get(format!("{}/streaming-stats", base_url))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(before.recent_transactions, 200);
    assert_eq!(before.threats + before.legitimate, before.recent_transactions);
    info!("✅ Stats report {} transactions", before.recent_transactions);

    // 5. Ingest a threat
    info!("\n===== Testing /secure-ingest =====");
    let response = client
        .post(format!("{}/secure-ingest", base_url))
        .json(&json!({
            "description": "Unauthorized card testing",
            "amount": 1.0,
            "bank": "Bank A",
            "user_id": "system",
            "is_fraud": 1,
        }))
        .send()
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    let stored: IngestResponse = response.json().await?;
    assert!(stored.id.starts_with("user_"));
    info!("✅ Stored transaction {}", stored.id);

    // 5.1 Invalid ingest
    let response = client
        .post(format!("{}/secure-ingest", base_url))
        .json(&json!({ "description": "Bad", "amount": -3.0 }))
        .send()
        .await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    info!("✅ Negative amount rejected correctly");

    // 6. Search as admin and as a bank user
    info!("\n===== Testing /secure-search =====");
    let response = client
        .post(format!("{}/secure-search", base_url))
        .json(&json!({ "query": "card", "user_id": "admin" }))
        .send()
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    let total_count = response
        .headers()
        .get("X-Total-Count")
        .ok_or("Missing X-Total-Count header")?
        .to_str()?
        .parse::<usize>()?;
    let admin_view: SearchResponse = response.json().await?;
    assert_eq!(total_count, admin_view.count);
    assert!(admin_view.results.iter().any(|hit| hit.id == stored.id));
    info!("✅ Admin sees the new threat ({} hits)", admin_view.count);

    let bob_view: SearchResponse = client
        .post(format!("{}/secure-search", base_url))
        .json(&json!({ "query": "card", "user_id": "Bob", "bank_filter": "Bank A" }))
        .send()
        .await?
        .json()
        .await?;
    assert!(bob_view.results.iter().all(|hit| hit.metadata.bank == "Bank B"));
    assert!(bob_view.results.iter().all(|hit| hit.id != stored.id));
    info!("✅ Bob is pinned to Bank B and cannot see threats");

    // 7. Mock endpoints
    info!("\n===== Testing mock endpoints =====");
    let response = client
        .post(format!("{}/secure-broadcast", base_url))
        .json(&json!({ "source_bank": "Bank A", "description": "card testing" }))
        .send()
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await?;
    assert!(body["impact_report"].get("Bank A").is_none());
    info!("✅ Broadcast skipped the source bank");

    for path in ["federated-round", "secure-train"] {
        let response = client.post(format!("{}/{}", base_url, path)).send().await?;
        assert_eq!(response.status(), StatusCode::OK);
        info!("✅ /{} responded", path);
    }

    for path in ["network-stats", "system-health"] {
        let response = client.get(format!("{}/{}", base_url, path)).send().await?;
        assert_eq!(response.status(), StatusCode::OK);
        info!("✅ /{} responded", path);
    }

    let body: Value = client
        .post(format!("{}/rag-analysis", base_url))
        .json(&json!({ "query": "card" }))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(body["status"], "success");
    info!("✅ Analysis report generated");

    let body: Value = client
        .post(format!("{}/quick-threat-check", base_url))
        .json(&json!({ "description": "Stolen card purchase", "amount": 2500.0 }))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(body["status"], "success");
    info!("✅ Threat check returned an assessment");

    // 8. Delete, then confirm it is gone
    info!("\n===== Testing /secure-delete =====");
    let deleted: DeleteResponse = client
        .delete(format!("{}/secure-delete/{}", base_url, stored.id))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(deleted.status, "deleted");

    let after: SearchResponse = client
        .post(format!("{}/secure-search", base_url))
        .json(&json!({ "query": "" }))
        .send()
        .await?
        .json()
        .await?;
    assert!(after.results.iter().all(|hit| hit.id != stored.id));
    info!("✅ Deleted transaction no longer appears");

    // Shutdown the server
    info!("\n===== Shutting down test server =====");
    let _ = shutdown_tx.send(());
    let _ = server_handle.await;

    info!("All API tests completed successfully!");
    Ok(())
}
