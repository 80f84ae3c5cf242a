//! Liquidity / LP-Health Check
//!
//! Finds the token's primary V2 pool by asking the chain's factory for a pair
//! against each base asset in priority order, then grades the base-side reserve.
//! The first usable pool wins; pools are never combined.

use alloy_primitives::Address;
use std::time::Duration;
use tracing::{debug, warn};

use crate::models::config::{BaseAsset, ChainConfig, LiquidityThresholds};
use crate::models::errors::{AppError, AppResult};
use crate::models::types::{RiskCheckResult, RiskLevel};
use crate::providers::chain::{
    decimalsCall, getPairCall, getReservesCall, read_view, symbolCall, token0Call, token1Call,
    ChainReader,
};
use crate::utils::constants::{short_address, BaseAssetKind, DEFAULT_TOKEN_DECIMALS};

pub const LABEL: &str = "Liquidity Pool";

pub const ID_NOT_FOUND: &str = "lp-not-found";
pub const ID_LOW: &str = "lp-low";
pub const ID_THIN: &str = "lp-thin";
pub const ID_HEALTHY: &str = "lp-healthy";

const DISCLAIMER: &str =
    "LP lock status and LP holder concentration are not evaluated by this check.";

/// Reserves of the pool that was picked, in human units
#[derive(Debug, Clone)]
pub struct PoolSnapshot {
    pub pair: Address,
    pub base: BaseAsset,
    pub base_reserve: f64,
    pub token_reserve: f64,
    pub token_symbol: Option<String>,
}

/// Run the liquidity check. Never fails: any read error counts as "no pool".
pub async fn check_liquidity(
    reader: &dyn ChainReader,
    chain: &ChainConfig,
    thresholds: &LiquidityThresholds,
    token: Address,
) -> RiskCheckResult {
    match find_primary_pool(reader, chain, token).await {
        Ok(Some(pool)) => {
            let result = grade_pool(&pool, thresholds);
            debug!(
                "💧 Pool {} for {}: {:.2} {} ({})",
                pool.pair, token, pool.base_reserve, pool.base.symbol, result.id
            );
            result
        }
        Ok(None) => not_found(chain, None),
        Err(e) => {
            warn!("⚠️ Liquidity scan for {} aborted: {}", token, e);
            not_found(chain, Some(&e))
        }
    }
}

/// Ordered first-match scan over the chain's base assets
pub async fn find_primary_pool(
    reader: &dyn ChainReader,
    chain: &ChainConfig,
    token: Address,
) -> AppResult<Option<PoolSnapshot>> {
    for base in &chain.base_assets {
        if base.address == token {
            continue;
        }

        let pair = read_view(
            reader,
            chain.factory,
            getPairCall {
                tokenA: token,
                tokenB: base.address,
            },
        )
        .await?
        .pair;

        if pair == Address::ZERO {
            debug!("No {} pool for {}", base.symbol, token);
            continue;
        }

        let token0 = read_view(reader, pair, token0Call {}).await?.token;
        let token1 = read_view(reader, pair, token1Call {}).await?.token;
        let reserves = read_view(reader, pair, getReservesCall {}).await?;
        let reserve0 = reserves.reserve0.saturating_to::<u128>();
        let reserve1 = reserves.reserve1.saturating_to::<u128>();

        let (token_raw, base_raw) = if token0 == token {
            (reserve0, reserve1)
        } else if token1 == token {
            (reserve1, reserve0)
        } else {
            warn!(
                "⚠️ Pool {} returned by factory does not contain {}, skipping",
                pair, token
            );
            continue;
        };

        let token_decimals = match read_view(reader, token, decimalsCall {}).await {
            Ok(ret) => ret.decimals,
            Err(e) => {
                debug!("decimals() unreadable on {}, assuming {}: {}", token, DEFAULT_TOKEN_DECIMALS, e);
                DEFAULT_TOKEN_DECIMALS
            }
        };
        let token_symbol = read_view(reader, token, symbolCall {})
            .await
            .ok()
            .map(|ret| ret.symbol)
            .filter(|s| !s.trim().is_empty());

        return Ok(Some(PoolSnapshot {
            pair,
            base: base.clone(),
            base_reserve: to_units(base_raw, base.decimals),
            token_reserve: to_units(token_raw, token_decimals),
            token_symbol,
        }));
    }

    Ok(None)
}

/// Raw integer amount to human units
pub fn to_units(raw: u128, decimals: u8) -> f64 {
    raw as f64 / 10f64.powi(i32::from(decimals))
}

/// Classify a pool by its base-side reserve
pub fn grade_pool(pool: &PoolSnapshot, thresholds: &LiquidityThresholds) -> RiskCheckResult {
    let (red_below, yellow_below) = thresholds.for_kind(pool.base.kind);
    let unit = match pool.base.kind {
        BaseAssetKind::Stable => "USD",
        BaseAssetKind::Native => pool.base.symbol.as_str(),
    };

    let (level, id, verdict) = if pool.base_reserve < red_below {
        (
            RiskLevel::Red,
            ID_LOW,
            format!("below the {} {} minimum, exits can move the price sharply", red_below, unit),
        )
    } else if pool.base_reserve < yellow_below {
        (
            RiskLevel::Yellow,
            ID_THIN,
            format!("below the {} {} comfort level, liquidity is thin", yellow_below, unit),
        )
    } else {
        (
            RiskLevel::Green,
            ID_HEALTHY,
            format!("at or above {} {}", yellow_below, unit),
        )
    };

    let token_symbol = pool.token_symbol.as_deref().unwrap_or("TOKEN");
    let details = format!(
        "Primary pool {} pairs the token with {}. Reserves: {:.2} {} / {:.2} {}. Base-side reserve is {}. {}",
        short_address(&pool.pair),
        pool.base.symbol,
        pool.token_reserve,
        token_symbol,
        pool.base_reserve,
        pool.base.symbol,
        verdict,
        DISCLAIMER
    );

    RiskCheckResult::new(id, LABEL, level, details)
}

fn not_found(chain: &ChainConfig, error: Option<&AppError>) -> RiskCheckResult {
    let bases: Vec<&str> = chain.base_assets.iter().map(|b| b.symbol.as_str()).collect();
    let mut details = format!(
        "No primary liquidity pool found on {} against {}. Without a pool there may be no way to sell: exit risk.",
        chain.name,
        bases.join(", ")
    );
    if let Some(e) = error {
        details.push_str(&format!(" Pool lookup failed: {}.", e));
    }
    RiskCheckResult::red(ID_NOT_FOUND, LABEL, details)
}

/// Result used when the whole check overruns its deadline
pub fn timed_out(chain: &ChainConfig, deadline: Duration) -> RiskCheckResult {
    let mut result = not_found(chain, None);
    result.details.push_str(&format!(
        " The pool lookup did not finish within {}ms.",
        deadline.as_millis()
    ));
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::types::Chain;
    use crate::providers::mock::StaticChainReader;
    use alloy_primitives::address;

    const TOKEN: Address = address!("1111111111111111111111111111111111111111");
    const PAIR: Address = address!("3333333333333333333333333333333333333333");
    const OTHER: Address = address!("4444444444444444444444444444444444444444");

    fn eth() -> ChainConfig {
        ChainConfig::builtin(Chain::Eth)
    }

    fn usdc(chain: &ChainConfig) -> BaseAsset {
        chain.base_assets.iter().find(|b| b.symbol == "USDC").cloned().unwrap()
    }

    fn weth(chain: &ChainConfig) -> BaseAsset {
        chain.base_assets[0].clone()
    }

    /// Token with 18 decimals paired with USDC (6 decimals)
    fn stable_pool(chain: &ChainConfig, usd: u128) -> StaticChainReader {
        let base = usdc(chain);
        StaticChainReader::new()
            .with_factory(chain.factory)
            .with_pair(chain.factory, TOKEN, base.address, PAIR)
            .with_pool(PAIR, TOKEN, base.address, 1_000_000 * 10u128.pow(18), usd * 10u128.pow(6))
            .with_decimals(TOKEN, 18)
            .with_symbol(TOKEN, "TKN")
    }

    async fn run(reader: &StaticChainReader, chain: &ChainConfig) -> RiskCheckResult {
        check_liquidity(reader, chain, &LiquidityThresholds::default(), TOKEN).await
    }

    #[tokio::test]
    async fn test_stable_threshold_bands() {
        let chain = eth();
        let cases = [
            (1_500, RiskLevel::Red, ID_LOW),
            (1_999, RiskLevel::Red, ID_LOW),
            (2_000, RiskLevel::Yellow, ID_THIN),
            (5_000, RiskLevel::Yellow, ID_THIN),
            (9_999, RiskLevel::Yellow, ID_THIN),
            (10_000, RiskLevel::Green, ID_HEALTHY),
            (50_000, RiskLevel::Green, ID_HEALTHY),
        ];
        for (usd, level, id) in cases {
            let result = run(&stable_pool(&chain, usd), &chain).await;
            assert_eq!(result.level, level, "reserve {}", usd);
            assert_eq!(result.id, id);
            assert!(result.details.contains("USDC"));
            assert!(result.details.contains("TKN"));
            assert!(result.details.contains(&short_address(&PAIR)));
            assert!(result.details.contains(DISCLAIMER));
        }
    }

    #[tokio::test]
    async fn test_native_threshold_bands() {
        let chain = eth();
        let base = weth(&chain);
        let cases = [
            (2, RiskLevel::Red),
            (4, RiskLevel::Red),
            (5, RiskLevel::Yellow),
            (10, RiskLevel::Yellow),
            (29, RiskLevel::Yellow),
            (30, RiskLevel::Green),
            (100, RiskLevel::Green),
        ];
        for (eth_amount, level) in cases {
            // Token sits on the token1 side this time
            let reader = StaticChainReader::new()
                .with_factory(chain.factory)
                .with_pair(chain.factory, TOKEN, base.address, PAIR)
                .with_pool(PAIR, base.address, TOKEN, eth_amount * 10u128.pow(18), 5_000);
            let result = run(&reader, &chain).await;
            assert_eq!(result.level, level, "reserve {} WETH", eth_amount);
            assert!(result.details.contains("WETH"));
        }
    }

    #[tokio::test]
    async fn test_first_pool_in_priority_order_wins() {
        let chain = eth();
        let base = weth(&chain);
        let other_pair = address!("5555555555555555555555555555555555555555");
        // Tiny WETH pool is found before a deep USDC pool
        let reader = stable_pool(&chain, 1_000_000)
            .with_pair(chain.factory, TOKEN, base.address, other_pair)
            .with_pool(other_pair, TOKEN, base.address, 1_000, 10u128.pow(18));
        let result = run(&reader, &chain).await;
        assert_eq!(result.level, RiskLevel::Red);
        assert!(result.details.contains("WETH"));
    }

    #[tokio::test]
    async fn test_no_pool_is_red() {
        let chain = eth();
        let reader = StaticChainReader::new().with_factory(chain.factory);
        let result = run(&reader, &chain).await;
        assert_eq!(result.level, RiskLevel::Red);
        assert_eq!(result.id, ID_NOT_FOUND);
        assert!(result.details.contains("WETH, USDC, USDT, DAI"));
    }

    #[tokio::test]
    async fn test_mismatched_pool_is_skipped() {
        let chain = eth();
        let base = usdc(&chain);
        let reader = StaticChainReader::new()
            .with_factory(chain.factory)
            .with_pair(chain.factory, TOKEN, base.address, PAIR)
            .with_pool(PAIR, OTHER, base.address, 1, 1);
        let result = run(&reader, &chain).await;
        assert_eq!(result.id, ID_NOT_FOUND);
    }

    #[tokio::test]
    async fn test_missing_decimals_defaults_to_18() {
        let chain = eth();
        let base = usdc(&chain);
        let reader = StaticChainReader::new()
            .with_factory(chain.factory)
            .with_pair(chain.factory, TOKEN, base.address, PAIR)
            .with_pool(PAIR, TOKEN, base.address, 3 * 10u128.pow(18), 20_000 * 10u128.pow(6));
        let pool = find_primary_pool(&reader, &chain, TOKEN).await.unwrap().unwrap();
        assert!((pool.token_reserve - 3.0).abs() < 1e-9);
        assert!((pool.base_reserve - 20_000.0).abs() < 1e-6);
        assert_eq!(pool.token_symbol, None);
    }

    #[tokio::test]
    async fn test_rpc_failure_degrades_to_not_found() {
        let chain = eth();
        let reader = StaticChainReader::new().offline();
        let result = run(&reader, &chain).await;
        assert_eq!(result.level, RiskLevel::Red);
        assert_eq!(result.id, ID_NOT_FOUND);
        assert!(result.details.contains("Pool lookup failed"));
    }

    #[test]
    fn test_to_units() {
        assert_eq!(to_units(1_500_000_000, 6), 1_500.0);
        assert_eq!(to_units(0, 18), 0.0);
    }

    #[test]
    fn test_timed_out_is_red() {
        let result = timed_out(&eth(), Duration::from_millis(50));
        assert_eq!(result.level, RiskLevel::Red);
        assert!(result.details.contains("50ms"));
    }
}
