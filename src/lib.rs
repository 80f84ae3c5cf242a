//! Ruster Guard Library
//!
//! Traffic-light risk evaluation for EVM token contracts:
//! - Ownership analysis (renounced, trusted, wallet or contract owner)
//! - Honeypot analysis via an external trade-simulation service
//! - Liquidity depth of the token's primary V2 pool
//!
//! Checks run concurrently and degrade to neutral results on failure; the
//! worst level wins. Explanations are rendered for beginners or pros.

pub mod api;
pub mod core;
pub mod models;
pub mod providers;
pub mod utils;

pub use crate::core::{aggregate, explain, parse_token_address, CheckFamily, TokenScanner};
pub use models::{
    AggregatedRiskResult, AppError, AppResult, AudienceMode, Chain, ChainConfig, ErrorCode,
    RiskCheckResult, RiskLevel, ScanConfig,
};
pub use providers::{ChainReader, HttpFetcher, RpcProvider, ReqwestFetcher};
