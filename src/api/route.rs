use crate::{
    api::{
        error::ApiError,
        response::{
            with_total_count, AnalysisReport, AnalysisResponse, BroadcastResponse,
            DeleteResponse, FederatedRoundResponse, IngestResponse, SearchResponse,
            StreamingStatsResponse, ThreatCheckResponse,
        },
    },
    ledger::SearchQuery,
    models::{ADMIN_USER, ALL_BANKS, KNOWN_BANKS},
    service,
    state::AppState,
    validation::validate_ingest,
};
use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;

fn default_bank() -> String {
    "Bank A".to_string()
}

fn default_user() -> String {
    ADMIN_USER.to_string()
}

fn default_bank_filter() -> String {
    ALL_BANKS.to_string()
}

// POST /secure-ingest and /quick-threat-check body
#[derive(Debug, Serialize, Deserialize)]
pub struct TransactionRequest {
    pub description: String,
    pub amount: f64,
    #[serde(default = "default_bank")]
    pub bank: String,
    #[serde(default = "default_user")]
    pub user_id: String,
    #[serde(default)]
    pub is_fraud: i64,
}

// POST /secure-search and /rag-analysis body
#[derive(Debug, Serialize, Deserialize)]
pub struct SearchRequest {
    pub query: String,
    #[serde(default = "default_bank_filter")]
    pub bank_filter: String,
    #[serde(default)]
    pub min_amount: f64,
    #[serde(default = "default_user")]
    pub user_id: String,
}

impl From<&SearchRequest> for SearchQuery {
    fn from(req: &SearchRequest) -> Self {
        SearchQuery {
            query: req.query.clone(),
            bank_filter: req.bank_filter.clone(),
            min_amount: req.min_amount,
            user_id: req.user_id.clone(),
        }
    }
}

// POST /secure-broadcast body
#[derive(Debug, Serialize, Deserialize)]
pub struct BroadcastRequest {
    pub source_bank: String,
    pub description: String,
}

// Create router with all routes
pub fn create_router(app_state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/secure-ingest", post(ingest_transaction))
        .route("/secure-search", post(search_transactions))
        .route("/secure-delete/{txn_id}", delete(delete_transaction))
        .route("/secure-broadcast", post(broadcast_threat))
        .route("/federated-round", post(federated_round))
        .route("/secure-train", post(train_index))
        .route("/network-stats", get(network_stats))
        .route("/system-health", get(system_health))
        .route("/streaming-stats", get(streaming_stats))
        .route("/rag-analysis", post(fraud_analysis))
        .route("/quick-threat-check", post(quick_threat_check))
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}

// GET / handler
async fn root() -> Json<Value> {
    Json(json!({
        "status": "online",
        "system": "Sentinel AI - Demo Mode",
        "version": env!("CARGO_PKG_VERSION"),
        "mode": "demo",
        "note": "Lightweight in-memory ledger",
    }))
}

// POST /secure-ingest handler
async fn ingest_transaction(
    State(state): State<Arc<AppState>>,
    Json(req): Json<TransactionRequest>,
) -> Result<Json<IngestResponse>, ApiError> {
    let is_fraud = validate_ingest(
        &req.description,
        req.amount,
        &req.bank,
        &req.user_id,
        req.is_fraud,
    )?;

    let id = state.ledger.write().await.add(
        &req.description,
        req.amount,
        &req.bank,
        &req.user_id,
        is_fraud,
    )?;

    Ok(Json(IngestResponse {
        status: "stored".to_string(),
        id,
        message: format!("Transaction stored in {}", req.bank),
    }))
}

// POST /secure-search handler
async fn search_transactions(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SearchRequest>,
) -> Response {
    let results = state.ledger.read().await.search(&SearchQuery::from(&req));
    let count = results.len();

    with_total_count(
        SearchResponse {
            results,
            count,
            query: req.query,
        },
        count,
    )
}

// DELETE /secure-delete/{txn_id} handler
async fn delete_transaction(
    State(state): State<Arc<AppState>>,
    Path(txn_id): Path<String>,
) -> Json<DeleteResponse> {
    // Deleting an unknown id still reports success.
    state.ledger.write().await.delete(&txn_id);

    Json(DeleteResponse {
        status: "deleted".to_string(),
        id: txn_id,
    })
}

// POST /secure-broadcast handler
async fn broadcast_threat(
    State(state): State<Arc<AppState>>,
    Json(req): Json<BroadcastRequest>,
) -> Json<BroadcastResponse> {
    info!("Broadcasting threat from {}: {}", req.source_bank, req.description);
    tokio::time::sleep(state.config.mock_latency).await;

    let impact = service::broadcast_impact(&mut rand::thread_rng(), &req.source_bank);
    let total: u32 = impact.values().sum();

    Json(BroadcastResponse {
        status: "Broadcast Complete".to_string(),
        source_bank: req.source_bank,
        threat_pattern: req.description,
        impact_report: impact,
        total_protected: total,
        message: format!("Protected {} transactions across the network", total),
    })
}

// POST /federated-round handler
async fn federated_round(State(state): State<Arc<AppState>>) -> Json<FederatedRoundResponse> {
    tokio::time::sleep(state.config.extended_mock_latency()).await;

    let round = service::federated_round(&mut rand::thread_rng());
    info!("Federated round {} reached accuracy {}", round.round_id, round.new_accuracy);

    Json(FederatedRoundResponse {
        status: "Updated".to_string(),
        round_id: round.round_id,
        new_accuracy: round.new_accuracy,
        participants: KNOWN_BANKS.iter().map(|b| b.to_string()).collect(),
        message: "Global model updated successfully".to_string(),
    })
}

// POST /secure-train handler
async fn train_index(State(state): State<Arc<AppState>>) -> Json<Value> {
    tokio::time::sleep(state.config.mock_latency).await;

    Json(json!({
        "status": "Trained",
        "message": "Indexes optimized successfully",
    }))
}

// GET /network-stats handler
async fn network_stats() -> Json<Value> {
    Json(json!({
        "network": {
            "Bank A": {"normal_patterns": 45, "known_threats": 12},
            "Bank B": {"normal_patterns": 38, "known_threats": 9},
            "Bank C": {"normal_patterns": 52, "known_threats": 15},
        },
        "total_banks": KNOWN_BANKS.len(),
        "architecture": "Demo Mode - In-Memory",
    }))
}

// GET /system-health handler
async fn system_health() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "mode": "demo",
        "indexes": {
            "secure_history": "active (in-memory)",
            "known_threats": "active (in-memory)",
        },
        "features": {
            "demo_mode": "enabled",
            "real_time_updates": "polling",
            "ml_detection": "basic",
        },
    }))
}

// GET /streaming-stats handler
async fn streaming_stats(State(state): State<Arc<AppState>>) -> Json<StreamingStatsResponse> {
    let stats = state.ledger.read().await.stats();

    Json(StreamingStatsResponse {
        recent_transactions: stats.total,
        legitimate: stats.legitimate,
        threats: stats.threats,
        by_bank: stats.by_bank,
        time_window: "demo dataset".to_string(),
        timestamp: Utc::now().timestamp_micros() as f64 / 1_000_000.0,
    })
}

// POST /rag-analysis handler
async fn fraud_analysis(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SearchRequest>,
) -> Json<AnalysisResponse> {
    tokio::time::sleep(state.config.extended_mock_latency()).await;

    let results = state.ledger.read().await.search(&SearchQuery::from(&req));
    let analysis = service::fraud_report(&req.query, &req.bank_filter, &results);

    Json(AnalysisResponse {
        status: "success".to_string(),
        report: AnalysisReport {
            analysis,
            retrieved_count: results.len(),
        },
    })
}

// POST /quick-threat-check handler
async fn quick_threat_check(
    State(state): State<Arc<AppState>>,
    Json(req): Json<TransactionRequest>,
) -> impl IntoResponse {
    tokio::time::sleep(state.config.mock_latency).await;

    let assessment = service::quick_threat_check(&req.description, req.amount, &req.bank);
    info!(
        "Threat check for '{}' scored {}",
        req.description, assessment.risk_score
    );

    Json(ThreatCheckResponse {
        status: "success".to_string(),
        assessment: assessment.report,
    })
}
