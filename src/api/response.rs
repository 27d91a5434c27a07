use axum::{
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::SearchHit;

#[derive(Debug, Serialize, Deserialize)]
pub struct IngestResponse {
    pub status: String,
    pub id: String,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SearchResponse {
    pub results: Vec<SearchHit>,
    pub count: usize,
    pub query: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub status: String,
    pub id: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BroadcastResponse {
    pub status: String,
    pub source_bank: String,
    pub threat_pattern: String,
    pub impact_report: BTreeMap<String, u32>,
    pub total_protected: u32,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FederatedRoundResponse {
    pub status: String,
    pub round_id: String,
    pub new_accuracy: f64,
    pub participants: Vec<String>,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StreamingStatsResponse {
    pub recent_transactions: usize,
    pub legitimate: usize,
    pub threats: usize,
    pub by_bank: BTreeMap<String, usize>,
    pub time_window: String,
    pub timestamp: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub analysis: String,
    pub retrieved_count: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AnalysisResponse {
    pub status: String,
    pub report: AnalysisReport,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ThreatCheckResponse {
    pub status: String,
    pub assessment: String,
}

/// JSON body plus an `X-Total-Count` header.
pub fn with_total_count<T: Serialize>(body: T, count: usize) -> Response {
    let json = match serde_json::to_string(&body) {
        Ok(json) => json,
        Err(_) => return StatusCode::INTERNAL_SERVER_ERROR.into_response(),
    };

    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    headers.insert("X-Total-Count", HeaderValue::from(count));

    (StatusCode::OK, headers, json).into_response()
}
