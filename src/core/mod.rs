//! Core Module - Risk Evaluation
//!
//! The three checks, the aggregation policy, the explanation renderer and the
//! scanner that runs them together.

pub mod aggregator;
pub mod explain;
pub mod honeypot;
pub mod liquidity;
pub mod ownership;
pub mod scanner;

pub use aggregator::{aggregate, overall_level};
pub use explain::{explain, CheckFamily};
pub use honeypot::check_honeypot;
pub use liquidity::check_liquidity;
pub use ownership::check_ownership;
pub use scanner::TokenScanner;

use alloy_primitives::Address;

use crate::models::errors::{AppError, AppResult};

/// Parse a user-supplied token address: `0x` followed by exactly 40 hex digits
pub fn parse_token_address(input: &str) -> AppResult<Address> {
    let trimmed = input.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .ok_or_else(|| AppError::invalid_address(input))?;

    if digits.len() != 40 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(AppError::invalid_address(input));
    }

    let mut bytes = [0u8; 20];
    hex::decode_to_slice(digits, &mut bytes).map_err(|_| AppError::invalid_address(input))?;
    Ok(Address::from(bytes))
}
