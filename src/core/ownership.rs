//! Ownership Check
//!
//! Reads the token's `owner()` and classifies who can exercise owner privileges:
//! nobody (renounced), a known trusted owner, a wallet or another contract.
//! Unreadable ownership is reported as a gap, not penalized.

use alloy_primitives::Address;
use std::time::Duration;
use tracing::{debug, warn};

use crate::core::parse_token_address;
use crate::models::config::ChainConfig;
use crate::models::errors::{AppResult, ErrorCode};
use crate::models::types::RiskCheckResult;
use crate::providers::chain::{ownerCall, read_view, ChainReader};
use crate::utils::constants::RENOUNCED_OWNERS;

pub const LABEL: &str = "Contract Ownership";

pub const ID_INVALID_ADDRESS: &str = "owner-invalid-address";
pub const ID_UNKNOWN: &str = "owner-unknown";
pub const ID_RENOUNCED: &str = "owner-renounced";
pub const ID_TRUSTED: &str = "owner-trusted";
pub const ID_EOA: &str = "owner-eoa";
pub const ID_CONTRACT: &str = "owner-contract";

/// Run the ownership check. Never fails: every error becomes a result.
pub async fn check_ownership(
    reader: &dyn ChainReader,
    chain: &ChainConfig,
    token: &str,
) -> RiskCheckResult {
    let token = match parse_token_address(token) {
        Ok(address) => address,
        Err(e) => {
            return RiskCheckResult::red(
                ID_INVALID_ADDRESS,
                LABEL,
                format!("{}. An unreadable address cannot be evaluated and is treated as disqualifying.", e.message),
            )
        }
    };

    match evaluate(reader, chain, token).await {
        Ok(result) => {
            debug!("🔐 Ownership of {}: {} ({})", token, result.level, result.id);
            result
        }
        Err(e) => {
            warn!("⚠️ Ownership check for {} degraded: {}", token, e);
            unknown(format!(
                "Ownership could not be evaluated because a chain read failed ({}). \
                 This is a gap in the analysis, not a clean bill of health.",
                e
            ))
        }
    }
}

async fn evaluate(
    reader: &dyn ChainReader,
    chain: &ChainConfig,
    token: Address,
) -> AppResult<RiskCheckResult> {
    let owner = match read_view(reader, token, ownerCall {}).await {
        Ok(ret) => ret.owner,
        // A revert or garbage answer says something about the contract
        Err(e) if matches!(e.code, ErrorCode::RpcError | ErrorCode::RpcInvalidResponse) => {
            debug!("owner() unreadable on {}: {}", token, e);
            return Ok(unknown(format!(
                "No readable owner() function on this contract ({}). It may use a \
                 non-standard access-control scheme, so ownership risk is unknown rather than absent.",
                e.message
            )));
        }
        Err(e) => return Err(e),
    };

    if RENOUNCED_OWNERS.contains(&owner) {
        return Ok(RiskCheckResult::green(
            ID_RENOUNCED,
            LABEL,
            format!(
                "Ownership is renounced: owner() returns {}. No wallet can call owner-only functions.",
                owner
            ),
        ));
    }

    if chain.is_trusted_owner(&owner) {
        return Ok(RiskCheckResult::green(
            ID_TRUSTED,
            LABEL,
            format!(
                "Owner {} is on the trusted-owner list for {}.",
                owner, chain.name
            ),
        ));
    }

    if reader.has_code(owner).await? {
        Ok(RiskCheckResult::green(
            ID_CONTRACT,
            LABEL,
            format!(
                "Owner {} is a contract (timelock, multisig or governance). Immediate risk is lower \
                 than a single wallet, but inspect that controlling contract before trusting it.",
                owner
            ),
        ))
    } else {
        Ok(RiskCheckResult::yellow(
            ID_EOA,
            LABEL,
            format!(
                "Owner {} is a plain wallet (no bytecode). Whoever holds its key can use owner-only \
                 functions at any time; verify this address manually: {}/address/{}",
                owner, chain.explorer_url, owner
            ),
        ))
    }
}

fn unknown(details: String) -> RiskCheckResult {
    RiskCheckResult::green(ID_UNKNOWN, LABEL, details)
}

/// Result used when the whole check overruns its deadline
pub fn timed_out(deadline: Duration) -> RiskCheckResult {
    unknown(format!(
        "Ownership check did not finish within {}ms. Ownership risk is unknown, not absent.",
        deadline.as_millis()
    ))
}
