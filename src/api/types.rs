//! API Request/Response Types

use serde::{Deserialize, Serialize};

use crate::core::explain::explain;
use crate::models::errors::AppError;
use crate::models::types::{AggregatedRiskResult, AudienceMode, RiskCheckResult, RiskLevel};

/// API Response wrapper
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiError>,
    pub latency_ms: f64,
    pub timestamp: i64,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T, latency_ms: f64) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            latency_ms,
            timestamp: chrono::Utc::now().timestamp(),
        }
    }
}

impl ApiResponse<()> {
    pub fn error(error: ApiError, latency_ms: f64) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error),
            latency_ms,
            timestamp: chrono::Utc::now().timestamp(),
        }
    }
}

/// API Error
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
}

impl From<&AppError> for ApiError {
    fn from(err: &AppError) -> Self {
        Self {
            code: err.code_str().to_string(),
            message: err.message.clone(),
        }
    }
}

// ============================================
// Token Scan
// ============================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanRequest {
    pub token_address: String,
    pub chain: String,
    /// Attach rendered explanations for this audience
    #[serde(default)]
    pub mode: Option<AudienceMode>,
}

/// One check outcome, optionally with its rendered explanation
#[derive(Debug, Serialize)]
pub struct ScanCheck {
    pub id: String,
    pub label: String,
    pub level: RiskLevel,
    pub details: String,
    pub color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

impl ScanCheck {
    fn from_result(result: RiskCheckResult, mode: Option<AudienceMode>) -> Self {
        let explanation = mode.map(|mode| explain(&result, mode));
        Self {
            color: result.level.color_code().to_string(),
            id: result.id,
            label: result.label,
            level: result.level,
            details: result.details,
            explanation,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ScanData {
    pub token_address: String,
    pub chain: String,
    pub overall: RiskLevel,
    pub color: String,
    pub checks: Vec<ScanCheck>,
}

impl ScanData {
    pub fn new(
        token_address: String,
        chain: String,
        result: AggregatedRiskResult,
        mode: Option<AudienceMode>,
    ) -> Self {
        Self {
            token_address,
            chain,
            overall: result.overall,
            color: result.overall.color_code().to_string(),
            checks: result
                .checks
                .into_iter()
                .map(|check| ScanCheck::from_result(check, mode))
                .collect(),
        }
    }
}

// ============================================
// Health Check
// ============================================

#[derive(Debug, Serialize)]
pub struct HealthData {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub chains: Vec<String>,
}
