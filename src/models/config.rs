//! Configuration module for Ruster Guard
//!
//! Addresses and chain metadata come from utils/constants.rs; everything an
//! operator may want to change can be overridden through environment variables.

use alloy_primitives::Address;
use std::collections::{HashMap, HashSet};
use std::time::Duration;
use tracing::{info, warn};

use crate::models::types::Chain;
use crate::utils::constants::{
    get_base_assets, get_chain_name, get_explorer_url, get_pool_factory,
    get_public_rpc, BaseAssetKind, DEFAULT_CHECK_DEADLINE_MS, DEFAULT_HONEYPOT_API_URL,
    DEFAULT_HONEYPOT_TIMEOUT_MS, DEFAULT_RPC_TIMEOUT_MS, NATIVE_RED_BELOW, NATIVE_YELLOW_BELOW,
    STABLE_RED_BELOW, STABLE_YELLOW_BELOW,
};

/// Counter-asset a token may be paired against
#[derive(Debug, Clone, PartialEq)]
pub struct BaseAsset {
    pub symbol: String,
    pub address: Address,
    pub decimals: u8,
    pub kind: BaseAssetKind,
}

/// Reserve thresholds for the liquidity check.
/// A reserve strictly below `*_red_below` is red, strictly below `*_yellow_below` is yellow.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LiquidityThresholds {
    pub stable_red_below: f64,
    pub stable_yellow_below: f64,
    pub native_red_below: f64,
    pub native_yellow_below: f64,
}

impl Default for LiquidityThresholds {
    fn default() -> Self {
        Self {
            stable_red_below: STABLE_RED_BELOW,
            stable_yellow_below: STABLE_YELLOW_BELOW,
            native_red_below: NATIVE_RED_BELOW,
            native_yellow_below: NATIVE_YELLOW_BELOW,
        }
    }
}

impl LiquidityThresholds {
    /// (red_below, yellow_below) for a base asset kind
    pub fn for_kind(&self, kind: BaseAssetKind) -> (f64, f64) {
        match kind {
            BaseAssetKind::Stable => (self.stable_red_below, self.stable_yellow_below),
            BaseAssetKind::Native => (self.native_red_below, self.native_yellow_below),
        }
    }
}

/// Chain-specific configuration (factory, base assets, RPC, trusted owners)
#[derive(Debug, Clone)]
pub struct ChainConfig {
    pub chain: Chain,
    pub name: String,
    /// Chain id as understood by the honeypot simulation service
    pub provider_chain_id: u64,
    pub rpc_url: String,
    pub explorer_url: String,
    pub factory: Address,
    /// Ordered by lookup priority
    pub base_assets: Vec<BaseAsset>,
    pub trusted_owners: HashSet<Address>,
}

impl ChainConfig {
    /// Built-in configuration for a chain, without environment overrides
    pub fn builtin(chain: Chain) -> Self {
        let chain_id = chain.chain_id();
        let base_assets = get_base_assets(chain_id)
            .iter()
            .map(|info| BaseAsset {
                symbol: info.symbol.to_string(),
                address: info.address,
                decimals: info.decimals,
                kind: info.kind,
            })
            .collect();

        Self {
            chain,
            name: get_chain_name(chain_id).to_string(),
            provider_chain_id: chain_id,
            rpc_url: get_public_rpc(chain_id).unwrap_or_default().to_string(),
            explorer_url: get_explorer_url(chain_id).to_string(),
            factory: get_pool_factory(chain_id).unwrap_or_default(),
            base_assets,
            trusted_owners: HashSet::new(),
        }
    }

    /// Check if an address is on this chain's trusted-owner allow-list
    #[inline]
    pub fn is_trusted_owner(&self, address: &Address) -> bool {
        self.trusted_owners.contains(address)
    }

    /// Env var holding the RPC URL for a chain
    fn rpc_env_key(chain: Chain) -> &'static str {
        match chain {
            Chain::Eth => "ETH_HTTP_URL",
            Chain::Bsc => "BSC_HTTP_URL",
        }
    }

    /// Env var holding the trusted-owner list for a chain
    fn trusted_owners_env_key(chain: Chain) -> &'static str {
        match chain {
            Chain::Eth => "TRUSTED_OWNERS_ETH",
            Chain::Bsc => "TRUSTED_OWNERS_BSC",
        }
    }

    /// Built-in configuration with environment overrides applied
    pub fn from_env(chain: Chain) -> Self {
        let mut config = Self::builtin(chain);

        if let Ok(url) = std::env::var(Self::rpc_env_key(chain)) {
            if !url.trim().is_empty() {
                config.rpc_url = url.trim().to_string();
            }
        }

        if let Ok(list) = std::env::var(Self::trusted_owners_env_key(chain)) {
            config.trusted_owners = parse_address_list(&list);
            info!(
                "🔐 {} trusted owner(s) configured for {}",
                config.trusted_owners.len(),
                config.name
            );
        }

        config
    }
}

/// Parse a comma-separated address list, skipping (and logging) bad entries
pub fn parse_address_list(list: &str) -> HashSet<Address> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .filter_map(|s| match s.parse::<Address>() {
            Ok(addr) => Some(addr),
            Err(_) => {
                warn!("⚠️ Ignoring invalid trusted owner address: {}", s);
                None
            }
        })
        .collect()
}

/// Configuration for a token scan
#[derive(Debug, Clone)]
pub struct ScanConfig {
    pub chains: HashMap<Chain, ChainConfig>,
    /// Honeypot simulation endpoint (queried with `address` and `chainID`)
    pub honeypot_api_url: String,
    /// Hard cap for the honeypot HTTP call
    pub honeypot_timeout: Duration,
    /// Timeout for each JSON-RPC request
    pub rpc_timeout: Duration,
    /// Deadline for one whole check
    pub check_deadline: Duration,
    pub thresholds: LiquidityThresholds,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            chains: Chain::ALL
                .iter()
                .map(|&chain| (chain, ChainConfig::builtin(chain)))
                .collect(),
            honeypot_api_url: DEFAULT_HONEYPOT_API_URL.to_string(),
            honeypot_timeout: Duration::from_millis(DEFAULT_HONEYPOT_TIMEOUT_MS),
            rpc_timeout: Duration::from_millis(DEFAULT_RPC_TIMEOUT_MS),
            check_deadline: Duration::from_millis(DEFAULT_CHECK_DEADLINE_MS),
            thresholds: LiquidityThresholds::default(),
        }
    }
}

impl ScanConfig {
    /// Load configuration from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            chains: Chain::ALL
                .iter()
                .map(|&chain| (chain, ChainConfig::from_env(chain)))
                .collect(),
            honeypot_api_url: std::env::var("HONEYPOT_API_URL")
                .ok()
                .filter(|u| !u.trim().is_empty())
                .unwrap_or(defaults.honeypot_api_url),
            honeypot_timeout: env_millis("HONEYPOT_TIMEOUT_MS").unwrap_or(defaults.honeypot_timeout),
            rpc_timeout: env_millis("RPC_TIMEOUT_MS").unwrap_or(defaults.rpc_timeout),
            check_deadline: env_millis("CHECK_DEADLINE_MS").unwrap_or(defaults.check_deadline),
            thresholds: defaults.thresholds,
        }
    }

    /// Get config for a chain
    pub fn chain(&self, chain: Chain) -> Option<&ChainConfig> {
        self.chains.get(&chain)
    }
}

/// Read a millisecond duration from the environment; zero and garbage are ignored
fn env_millis(key: &str) -> Option<Duration> {
    let raw = std::env::var(key).ok()?;
    match raw.trim().parse::<u64>() {
        Ok(ms) if ms > 0 => Some(Duration::from_millis(ms)),
        _ => {
            warn!("⚠️ Ignoring invalid {}='{}'", key, raw);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::constants::DEAD_ADDRESS;

    #[test]
    fn test_default_config_has_both_chains() {
        let config = ScanConfig::default();
        for chain in Chain::ALL {
            let chain_config = config.chain(chain).unwrap();
            assert_eq!(chain_config.chain, chain);
            assert!(!chain_config.base_assets.is_empty());
            assert!(!chain_config.rpc_url.is_empty());
            assert_ne!(chain_config.factory, Address::ZERO);
        }
        assert!(config.honeypot_timeout < config.check_deadline);
    }

    #[test]
    fn test_thresholds_for_kind() {
        let t = LiquidityThresholds::default();
        assert_eq!(t.for_kind(BaseAssetKind::Stable), (2_000.0, 10_000.0));
        assert_eq!(t.for_kind(BaseAssetKind::Native), (5.0, 30.0));
    }

    #[test]
    fn test_parse_address_list_skips_garbage() {
        let list = format!(" {} , not-an-address, ,{}", DEAD_ADDRESS, Address::ZERO);
        let parsed = parse_address_list(&list);
        assert_eq!(parsed.len(), 2);
        assert!(parsed.contains(&DEAD_ADDRESS));
    }

    #[test]
    fn test_trusted_owner_lookup() {
        let mut config = ChainConfig::builtin(Chain::Bsc);
        assert!(!config.is_trusted_owner(&DEAD_ADDRESS));
        config.trusted_owners.insert(DEAD_ADDRESS);
        assert!(config.is_trusted_owner(&DEAD_ADDRESS));
    }
}
