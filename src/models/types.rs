//! Type definitions for token risk evaluation
//! Core data structures shared by the checks, the aggregator and the renderers

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::models::errors::AppError;
use crate::utils::constants::{CHAIN_ID_BSC, CHAIN_ID_ETHEREUM};

/// Traffic-light risk level.
///
/// Declaration order is the severity order: `Red > Yellow > Green`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Green,
    Yellow,
    Red,
}

impl RiskLevel {
    pub const ALL: [RiskLevel; 3] = [RiskLevel::Green, RiskLevel::Yellow, RiskLevel::Red];

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Green => "green",
            RiskLevel::Yellow => "yellow",
            RiskLevel::Red => "red",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            RiskLevel::Green => "🟢",
            RiskLevel::Yellow => "🟡",
            RiskLevel::Red => "🔴",
        }
    }

    /// Get color code for UI
    pub fn color_code(&self) -> &'static str {
        match self {
            RiskLevel::Green => "#22c55e",
            RiskLevel::Yellow => "#eab308",
            RiskLevel::Red => "#ef4444",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of exactly one check invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskCheckResult {
    /// Machine id of the outcome variant, e.g. `owner-renounced`
    pub id: String,
    /// Check family name shown to users, e.g. "Contract Ownership"
    pub label: String,
    pub level: RiskLevel,
    /// Technical explanation, never empty
    pub details: String,
}

impl RiskCheckResult {
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        level: RiskLevel,
        details: impl Into<String>,
    ) -> Self {
        let details = details.into();
        let details = if details.trim().is_empty() {
            "No technical details were reported for this check.".to_string()
        } else {
            details
        };

        Self {
            id: id.into(),
            label: label.into(),
            level,
            details,
        }
    }

    pub fn green(id: &str, label: &str, details: impl Into<String>) -> Self {
        Self::new(id, label, RiskLevel::Green, details)
    }

    pub fn yellow(id: &str, label: &str, details: impl Into<String>) -> Self {
        Self::new(id, label, RiskLevel::Yellow, details)
    }

    pub fn red(id: &str, label: &str, details: impl Into<String>) -> Self {
        Self::new(id, label, RiskLevel::Red, details)
    }
}

/// Full response of one scan: the overall verdict plus every check outcome
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregatedRiskResult {
    pub overall: RiskLevel,
    pub checks: Vec<RiskCheckResult>,
}

impl AggregatedRiskResult {
    /// Pretty print the verdict for terminals
    pub fn summary(&self) -> String {
        let mut output = format!(
            "\n{} Overall: {}\n",
            self.overall.emoji(),
            self.overall.as_str().to_uppercase()
        );
        for check in &self.checks {
            output.push_str(&format!(
                "   {} {} [{}]\n      {}\n",
                check.level.emoji(),
                check.label,
                check.id,
                check.details
            ));
        }
        output
    }
}

/// Supported chains
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Chain {
    Eth,
    Bsc,
}

impl Chain {
    pub const ALL: [Chain; 2] = [Chain::Eth, Chain::Bsc];

    /// Numeric EVM chain id
    pub fn chain_id(&self) -> u64 {
        match self {
            Chain::Eth => CHAIN_ID_ETHEREUM,
            Chain::Bsc => CHAIN_ID_BSC,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Chain::Eth => "eth",
            Chain::Bsc => "bsc",
        }
    }
}

impl FromStr for Chain {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "eth" => Ok(Chain::Eth),
            "bsc" => Ok(Chain::Bsc),
            _ => Err(AppError::unsupported_chain(s)),
        }
    }
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Audience register for explanations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudienceMode {
    Beginner,
    Pro,
}

impl FromStr for AudienceMode {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "beginner" => Ok(AudienceMode::Beginner),
            "pro" => Ok(AudienceMode::Pro),
            other => Err(AppError::bad_request(format!(
                "Unknown mode '{}'. Use 'beginner' or 'pro'",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_risk_level_ordering() {
        assert!(RiskLevel::Red > RiskLevel::Yellow);
        assert!(RiskLevel::Yellow > RiskLevel::Green);
        assert_eq!(
            RiskLevel::ALL.iter().max().copied(),
            Some(RiskLevel::Red)
        );
    }

    #[test]
    fn test_risk_level_serde() {
        assert_eq!(serde_json::to_string(&RiskLevel::Yellow).unwrap(), "\"yellow\"");
        let level: RiskLevel = serde_json::from_str("\"red\"").unwrap();
        assert_eq!(level, RiskLevel::Red);
    }

    #[test]
    fn test_empty_details_are_replaced() {
        let result = RiskCheckResult::yellow("x", "X", "   ");
        assert!(!result.details.trim().is_empty());
    }

    #[test]
    fn test_chain_parsing() {
        assert_eq!("eth".parse::<Chain>().unwrap(), Chain::Eth);
        assert_eq!(" BSC ".parse::<Chain>().unwrap(), Chain::Bsc);
        let err = "solana".parse::<Chain>().unwrap_err();
        assert!(err.is_input_error());
        assert_eq!(Chain::Bsc.chain_id(), 56);
    }

    #[test]
    fn test_audience_mode_parsing() {
        assert_eq!("Beginner".parse::<AudienceMode>().unwrap(), AudienceMode::Beginner);
        assert_eq!("pro".parse::<AudienceMode>().unwrap(), AudienceMode::Pro);
        assert!("expert".parse::<AudienceMode>().is_err());
    }

    #[test]
    fn test_summary_lists_checks() {
        let result = AggregatedRiskResult {
            overall: RiskLevel::Yellow,
            checks: vec![RiskCheckResult::yellow("owner-eoa", "Contract Ownership", "Owner is a wallet")],
        };
        let summary = result.summary();
        assert!(summary.contains("YELLOW"));
        assert!(summary.contains("owner-eoa"));
    }
}
