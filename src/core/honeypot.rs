//! Honeypot Check
//!
//! Asks an external trade-simulation service whether the token can be sold
//! after buying, then maps its risk taxonomy onto the traffic light.
//!
//! The service's schema is not guaranteed, so the payload is decoded into a
//! [`HoneypotReport`] field by field: a missing or mistyped field only drops
//! that field. Anything that prevents a clean signal ends up yellow.

use alloy_primitives::Address;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

use crate::models::types::{RiskCheckResult, RiskLevel};
use crate::providers::http::HttpFetcher;
use crate::utils::constants::truncate;

pub const LABEL: &str = "Honeypot Simulation";

pub const ID_FLAGGED: &str = "honeypot-flagged";
pub const ID_RISK_HIGH: &str = "honeypot-risk-high";
pub const ID_RISK_MEDIUM: &str = "honeypot-risk-medium";
pub const ID_RISK_LOW: &str = "honeypot-risk-low";
pub const ID_UNRECOGNIZED: &str = "honeypot-unrecognized";
pub const ID_UNAVAILABLE: &str = "honeypot-unavailable";

/// Flags listed in details, most severe first
const MAX_FLAGS: usize = 3;
/// Per-flag description cap
const MAX_FLAG_CHARS: usize = 120;
/// Cap for raw bodies and errors embedded in details
const MAX_BODY_CHARS: usize = 200;

/// One warning flag raised by the simulation
#[derive(Debug, Clone, PartialEq)]
pub struct HoneypotFlag {
    pub severity: f64,
    pub description: String,
}

/// Everything the check understands from a simulation payload
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HoneypotReport {
    pub is_honeypot: Option<bool>,
    /// Normalized risk category, e.g. "very high"
    pub risk: Option<String>,
    /// Numeric risk score (0-100)
    pub risk_score: Option<f64>,
    pub buy_tax: Option<f64>,
    pub sell_tax: Option<f64>,
    pub transfer_tax: Option<f64>,
    pub flags: Vec<HoneypotFlag>,
    pub token_name: Option<String>,
    pub token_symbol: Option<String>,
}

impl HoneypotReport {
    /// Decode a payload permissively
    pub fn from_value(value: &Value) -> Self {
        let text = |path: &str| {
            value
                .pointer(path)
                .and_then(Value::as_str)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };
        let number = |path: &str| value.pointer(path).and_then(as_number);

        let mut flags: Vec<HoneypotFlag> = value
            .pointer("/summary/flags")
            .and_then(Value::as_array)
            .map(|items| items.iter().filter_map(parse_flag).collect())
            .unwrap_or_default();
        flags.sort_by(|a, b| b.severity.total_cmp(&a.severity));

        Self {
            is_honeypot: value
                .pointer("/honeypotResult/isHoneypot")
                .and_then(Value::as_bool),
            risk: text("/summary/risk").map(|r| normalize_category(&r)),
            risk_score: number("/summary/riskLevel"),
            buy_tax: number("/simulationResult/buyTax"),
            sell_tax: number("/simulationResult/sellTax"),
            transfer_tax: number("/simulationResult/transferTax"),
            flags,
            token_name: text("/token/name"),
            token_symbol: text("/token/symbol"),
        }
    }

    /// Resolve level and outcome id. Worst signal wins.
    pub fn classify(&self) -> (RiskLevel, &'static str) {
        if self.is_honeypot == Some(true) {
            return (RiskLevel::Red, ID_FLAGGED);
        }

        let level = self
            .risk
            .as_deref()
            .and_then(category_level)
            .or_else(|| self.risk_score.map(score_level));

        match level {
            Some(RiskLevel::Red) => (RiskLevel::Red, ID_RISK_HIGH),
            Some(RiskLevel::Yellow) => (RiskLevel::Yellow, ID_RISK_MEDIUM),
            Some(RiskLevel::Green) => (RiskLevel::Green, ID_RISK_LOW),
            None => (RiskLevel::Yellow, ID_UNRECOGNIZED),
        }
    }

    /// Best-effort technical summary. `None` when the payload carried nothing usable.
    pub fn describe(&self) -> Option<String> {
        let mut parts = Vec::new();

        match (&self.token_name, &self.token_symbol) {
            (Some(name), Some(symbol)) => parts.push(format!("Token: {} ({})", name, symbol)),
            (Some(name), None) => parts.push(format!("Token: {}", name)),
            (None, Some(symbol)) => parts.push(format!("Token: {}", symbol)),
            (None, None) => {}
        }

        if self.is_honeypot == Some(true) {
            parts.push("Simulation flagged this token as a honeypot".to_string());
        }

        match (&self.risk, self.risk_score) {
            (Some(risk), Some(score)) => parts.push(format!("Risk: {} (score {})", risk, score)),
            (Some(risk), None) => parts.push(format!("Risk: {}", risk)),
            (None, Some(score)) => parts.push(format!("Risk score: {}", score)),
            (None, None) => {}
        }

        let taxes: Vec<String> = [
            ("buy", self.buy_tax),
            ("sell", self.sell_tax),
            ("transfer", self.transfer_tax),
        ]
        .iter()
        .filter_map(|(kind, tax)| tax.map(|t| format!("{} {:.2}%", kind, t)))
        .collect();
        if !taxes.is_empty() {
            parts.push(format!("Taxes: {}", taxes.join(", ")));
        }

        if !self.flags.is_empty() {
            let top: Vec<String> = self
                .flags
                .iter()
                .take(MAX_FLAGS)
                .map(|f| truncate(&f.description, MAX_FLAG_CHARS))
                .collect();
            parts.push(format!("Flags: {}", top.join("; ")));
        }

        if parts.is_empty() {
            None
        } else {
            Some(parts.join(" | "))
        }
    }
}

/// Numbers sometimes arrive as strings
fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn parse_flag(value: &Value) -> Option<HoneypotFlag> {
    if let Some(text) = value.as_str() {
        return Some(HoneypotFlag {
            severity: 0.0,
            description: text.to_string(),
        });
    }

    let description = ["description", "flag"]
        .iter()
        .find_map(|key| value.get(*key).and_then(Value::as_str))
        .filter(|s| !s.trim().is_empty())?;

    let severity = value
        .get("severityIndex")
        .and_then(as_number)
        .or_else(|| value.get("severity").and_then(severity_rank))
        .unwrap_or(0.0);

    Some(HoneypotFlag {
        severity,
        description: description.trim().to_string(),
    })
}

/// `severity` may be numeric or a category word
fn severity_rank(value: &Value) -> Option<f64> {
    if let Some(n) = as_number(value) {
        return Some(n);
    }
    let rank = match normalize_category(value.as_str()?).as_str() {
        "critical" | "honeypot" => 4.0,
        "very high" | "high" => 3.0,
        "medium" | "warning" => 2.0,
        "low" => 1.0,
        _ => 0.0,
    };
    Some(rank)
}

/// Lowercase, `_`/`-` as spaces, collapsed whitespace
fn normalize_category(raw: &str) -> String {
    raw.to_lowercase()
        .replace(['_', '-'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn category_level(category: &str) -> Option<RiskLevel> {
    match category {
        "honeypot" | "very high" | "high" => Some(RiskLevel::Red),
        "medium" => Some(RiskLevel::Yellow),
        "low" | "very low" => Some(RiskLevel::Green),
        _ => None,
    }
}

fn score_level(score: f64) -> RiskLevel {
    if score >= 90.0 {
        RiskLevel::Red
    } else if score >= 60.0 {
        RiskLevel::Yellow
    } else if score < 20.0 {
        RiskLevel::Green
    } else {
        RiskLevel::Yellow
    }
}

fn generic_details(level: RiskLevel) -> &'static str {
    match level {
        RiskLevel::Green => "The simulation reported low risk but gave no further details.",
        RiskLevel::Yellow => {
            "The simulation did not return a recognizable risk assessment; treat the result as neutral."
        }
        RiskLevel::Red => "The simulation reported high risk but gave no further details.",
    }
}

/// Map a decoded payload to a check result
pub fn evaluate_payload(value: &Value) -> RiskCheckResult {
    let report = HoneypotReport::from_value(value);
    let (level, id) = report.classify();
    let details = report
        .describe()
        .unwrap_or_else(|| generic_details(level).to_string());
    RiskCheckResult::new(id, LABEL, level, details)
}

fn unavailable(details: String) -> RiskCheckResult {
    RiskCheckResult::yellow(ID_UNAVAILABLE, LABEL, details)
}

/// Build the simulation request URL
pub fn request_url(api_url: &str, token: Address, provider_chain_id: u64) -> String {
    let separator = if api_url.contains('?') { '&' } else { '?' };
    format!(
        "{}{}address={}&chainID={}",
        api_url, separator, token, provider_chain_id
    )
}

/// Run the honeypot check. Never fails: every error becomes a yellow result.
pub async fn check_honeypot(
    http: &dyn HttpFetcher,
    api_url: &str,
    provider_chain_id: u64,
    token: Address,
    timeout: Duration,
) -> RiskCheckResult {
    let url = request_url(api_url, token, provider_chain_id);

    // Hard cap even if the fetcher ignores its timeout argument
    let response = match tokio::time::timeout(timeout, http.get(&url, timeout)).await {
        Ok(Ok(response)) => response,
        Ok(Err(e)) => {
            warn!("⚠️ Honeypot simulation unavailable for {}: {}", token, e);
            let reason = if e.is_timeout() {
                format!("timed out after {}ms", timeout.as_millis())
            } else {
                "request failed".to_string()
            };
            return unavailable(format!(
                "Could not complete the honeypot simulation ({}): {}. Treat this check as neutral.",
                reason,
                truncate(&e.to_string(), MAX_BODY_CHARS)
            ));
        }
        Err(_) => {
            warn!("⏱️ Honeypot simulation for {} exceeded {}ms", token, timeout.as_millis());
            return unavailable(format!(
                "Could not complete the honeypot simulation: no answer within {}ms. Treat this check as neutral.",
                timeout.as_millis()
            ));
        }
    };

    if !response.is_success() {
        warn!("⚠️ Honeypot simulation answered HTTP {} for {}", response.status, token);
        return unavailable(format!(
            "Honeypot simulation service answered HTTP {}: {}. Treat this check as neutral.",
            response.status,
            truncate(response.body.trim(), MAX_BODY_CHARS)
        ));
    }

    let value: Value = match serde_json::from_str(&response.body) {
        Ok(value) => value,
        Err(e) => {
            warn!("⚠️ Honeypot simulation returned non-JSON body for {}: {}", token, e);
            return unavailable(format!(
                "Honeypot simulation service returned a body that is not JSON: {}. Treat this check as neutral.",
                truncate(response.body.trim(), MAX_BODY_CHARS)
            ));
        }
    };

    let result = evaluate_payload(&value);
    debug!("🍯 Honeypot verdict for {}: {} ({})", token, result.level, result.id);
    result
}

/// Result used when the whole check overruns its deadline
pub fn timed_out(deadline: Duration) -> RiskCheckResult {
    unavailable(format!(
        "Honeypot check did not finish within {}ms. Treat this check as neutral.",
        deadline.as_millis()
    ))
}
