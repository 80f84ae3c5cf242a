//! Constants Module - Single Source of Truth
//!
//! Chain metadata, canonical contract addresses and default tuning values.
//! Other modules look these up instead of hardcoding addresses.

use alloy_primitives::{address, Address};

// ============================================
// APPLICATION CONSTANTS
// ============================================

/// Application name
pub const APP_NAME: &str = "RusterGuard";

/// Application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// User-Agent for outgoing HTTP requests
pub const USER_AGENT: &str = "RusterGuard/0.1.0";

// ============================================
// TIMEOUTS
// ============================================

/// Default timeout for a single JSON-RPC request (milliseconds)
pub const DEFAULT_RPC_TIMEOUT_MS: u64 = 5_000;

/// Default hard cap for the honeypot simulation API (milliseconds)
pub const DEFAULT_HONEYPOT_TIMEOUT_MS: u64 = 6_500;

/// Default deadline for one whole check, all of its calls included (milliseconds)
pub const DEFAULT_CHECK_DEADLINE_MS: u64 = 9_000;

// ============================================
// CHAIN IDS
// ============================================

/// Ethereum Mainnet
pub const CHAIN_ID_ETHEREUM: u64 = 1;
/// BNB Smart Chain
pub const CHAIN_ID_BSC: u64 = 56;

// ============================================
// SPECIAL ADDRESSES
// ============================================

/// Zero address (renounced ownership)
pub const ZERO_ADDRESS: Address = Address::ZERO;

/// Conventional burn address
pub const DEAD_ADDRESS: Address = address!("000000000000000000000000000000000000dEaD");

/// Owner values that mean nobody can exercise owner privileges
pub const RENOUNCED_OWNERS: [Address; 2] = [ZERO_ADDRESS, DEAD_ADDRESS];

// ============================================
// DEX FACTORIES (Uniswap V2 compatible)
// ============================================

/// Uniswap V2 factory on Ethereum
pub const UNISWAP_V2_FACTORY: Address = address!("5C69bEe701ef814a2B6a3EDD4B1652CB9cc5aA6f");

/// PancakeSwap V2 factory on BSC
pub const PANCAKESWAP_V2_FACTORY: Address = address!("cA143Ce32Fe78f1f7019d7d551a6402fC5350c73");

// ============================================
// BASE ASSETS
// ============================================

/// Whether a base asset is the chain's wrapped native coin or a USD stablecoin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BaseAssetKind {
    Native,
    Stable,
}

/// Static description of a base asset
#[derive(Debug, Clone, Copy)]
pub struct BaseAssetInfo {
    pub symbol: &'static str,
    pub address: Address,
    pub decimals: u8,
    pub kind: BaseAssetKind,
}

/// Base assets for Ethereum, in lookup priority order (wrapped native first)
pub const ETHEREUM_BASE_ASSETS: [BaseAssetInfo; 4] = [
    BaseAssetInfo {
        symbol: "WETH",
        address: address!("C02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2"),
        decimals: 18,
        kind: BaseAssetKind::Native,
    },
    BaseAssetInfo {
        symbol: "USDC",
        address: address!("A0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48"),
        decimals: 6,
        kind: BaseAssetKind::Stable,
    },
    BaseAssetInfo {
        symbol: "USDT",
        address: address!("dAC17F958D2ee523a2206206994597C13D831ec7"),
        decimals: 6,
        kind: BaseAssetKind::Stable,
    },
    BaseAssetInfo {
        symbol: "DAI",
        address: address!("6B175474E89094C44Da98b954EedeAC495271d0F"),
        decimals: 18,
        kind: BaseAssetKind::Stable,
    },
];

/// Base assets for BSC, in lookup priority order (wrapped native first)
pub const BSC_BASE_ASSETS: [BaseAssetInfo; 4] = [
    BaseAssetInfo {
        symbol: "WBNB",
        address: address!("bb4CdB9CBd36B01bD1cBaEBF2De08d9173bc095c"),
        decimals: 18,
        kind: BaseAssetKind::Native,
    },
    BaseAssetInfo {
        symbol: "USDT",
        address: address!("55d398326f99059fF775485246999027B3197955"),
        decimals: 18,
        kind: BaseAssetKind::Stable,
    },
    BaseAssetInfo {
        symbol: "BUSD",
        address: address!("e9e7CEA3DedcA5984780Bafc599bD69ADd087D56"),
        decimals: 18,
        kind: BaseAssetKind::Stable,
    },
    BaseAssetInfo {
        symbol: "USDC",
        address: address!("8AC76a51cc950d9822D68b83fE1Ad97B32Cd580d"),
        decimals: 18,
        kind: BaseAssetKind::Stable,
    },
];

/// Get base assets for a chain
pub fn get_base_assets(chain_id: u64) -> &'static [BaseAssetInfo] {
    match chain_id {
        CHAIN_ID_ETHEREUM => &ETHEREUM_BASE_ASSETS,
        CHAIN_ID_BSC => &BSC_BASE_ASSETS,
        _ => &[],
    }
}

/// Get the V2 pool factory for a chain
pub fn get_pool_factory(chain_id: u64) -> Option<Address> {
    match chain_id {
        CHAIN_ID_ETHEREUM => Some(UNISWAP_V2_FACTORY),
        CHAIN_ID_BSC => Some(PANCAKESWAP_V2_FACTORY),
        _ => None,
    }
}

// ============================================
// LIQUIDITY THRESHOLDS
// ============================================

/// Stablecoin reserve below this is red (USD)
pub const STABLE_RED_BELOW: f64 = 2_000.0;
/// Stablecoin reserve below this is yellow (USD)
pub const STABLE_YELLOW_BELOW: f64 = 10_000.0;
/// Native reserve below this is red (ETH / BNB)
pub const NATIVE_RED_BELOW: f64 = 5.0;
/// Native reserve below this is yellow (ETH / BNB)
pub const NATIVE_YELLOW_BELOW: f64 = 30.0;

/// Decimals assumed when a token does not answer `decimals()`
pub const DEFAULT_TOKEN_DECIMALS: u8 = 18;

// ============================================
// EXTERNAL SERVICES
// ============================================

/// Honeypot simulation API endpoint
pub const DEFAULT_HONEYPOT_API_URL: &str = "https://api.honeypot.is/v2/IsHoneypot";

/// Get public RPC URL for a chain (used when no endpoint is configured)
pub fn get_public_rpc(chain_id: u64) -> Option<&'static str> {
    match chain_id {
        CHAIN_ID_ETHEREUM => Some("https://eth.llamarpc.com"),
        CHAIN_ID_BSC => Some("https://bsc-dataseed.binance.org"),
        _ => None,
    }
}

// ============================================
// CHAIN METADATA
// ============================================

/// Get chain name
pub fn get_chain_name(chain_id: u64) -> &'static str {
    match chain_id {
        CHAIN_ID_ETHEREUM => "Ethereum",
        CHAIN_ID_BSC => "BNB Smart Chain",
        _ => "Unknown",
    }
}

/// Get block explorer URL
pub fn get_explorer_url(chain_id: u64) -> &'static str {
    match chain_id {
        CHAIN_ID_BSC => "https://bscscan.com",
        _ => "https://etherscan.io",
    }
}

// ============================================
// FORMATTING HELPERS
// ============================================

/// Shorten an address for display: `0x1234…abcd`
pub fn short_address(address: &Address) -> String {
    let full = address.to_string();
    if full.len() <= 12 {
        return full;
    }
    format!("{}…{}", &full[..6], &full[full.len() - 4..])
}

/// Truncate a string to at most `max` characters, marking the cut
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let cut: String = text.chars().take(max).collect();
    format!("{}…", cut)
}
