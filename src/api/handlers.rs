//! API Request Handlers

use axum::{
    extract::{rejection::JsonRejection, Json, State},
    http::StatusCode,
};
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

use super::types::*;
use crate::core::scanner::TokenScanner;
use crate::models::errors::AppError;

/// Shared application state
pub struct AppState {
    pub scanner: Arc<TokenScanner>,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(scanner: Arc<TokenScanner>) -> Self {
        Self {
            scanner,
            start_time: Instant::now(),
        }
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}

type ApiFailure = (StatusCode, Json<ApiResponse<()>>);

fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}

fn failure(err: &AppError, start: Instant) -> ApiFailure {
    let status =
        StatusCode::from_u16(err.code.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (
        status,
        Json(ApiResponse::error(ApiError::from(err), elapsed_ms(start))),
    )
}

// ============================================
// Health Check
// ============================================

pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<ApiResponse<HealthData>> {
    let start = Instant::now();

    let data = HealthData {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.uptime_seconds(),
        chains: state
            .scanner
            .supported_chains()
            .iter()
            .map(|c| c.to_string())
            .collect(),
    };

    Json(ApiResponse::success(data, elapsed_ms(start)))
}

// ============================================
// Token Scan
// ============================================

pub async fn scan_token(
    State(state): State<Arc<AppState>>,
    body: Result<Json<ScanRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<ScanData>>, ApiFailure> {
    let start = Instant::now();

    let Json(req) = body.map_err(|rejection| {
        failure(&AppError::bad_request(rejection.body_text()), start)
    })?;

    info!("🔍 Scan request: {} on {}", req.token_address, req.chain);

    let result = state
        .scanner
        .scan(&req.token_address, &req.chain)
        .await
        .map_err(|e| {
            warn!("❌ Rejected scan request: {}", e);
            failure(&e, start)
        })?;

    let data = ScanData::new(
        req.token_address.trim().to_string(),
        req.chain.trim().to_lowercase(),
        result,
        req.mode,
    );

    Ok(Json(ApiResponse::success(data, elapsed_ms(start))))
}
