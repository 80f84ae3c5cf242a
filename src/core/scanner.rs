//! Token Scanner
//! Validates input, fans the three checks out concurrently and aggregates them

use futures_util::future::join3;
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{info, warn};

use crate::core::aggregator::aggregate;
use crate::core::honeypot::{self, check_honeypot};
use crate::core::liquidity::{self, check_liquidity};
use crate::core::ownership::{self, check_ownership};
use crate::core::parse_token_address;
use crate::models::config::ScanConfig;
use crate::models::errors::{AppError, AppResult};
use crate::models::types::{AggregatedRiskResult, Chain, RiskCheckResult};
use crate::providers::chain::ChainReader;
use crate::providers::http::{HttpFetcher, ReqwestFetcher};
use crate::providers::rpc::RpcProvider;

/// Stateless scanner: every scan is a function of one address and chain
pub struct TokenScanner {
    config: ScanConfig,
    readers: HashMap<Chain, Arc<dyn ChainReader>>,
    http: Arc<dyn HttpFetcher>,
}

impl TokenScanner {
    /// Create a scanner from explicit collaborators
    pub fn new(
        config: ScanConfig,
        readers: HashMap<Chain, Arc<dyn ChainReader>>,
        http: Arc<dyn HttpFetcher>,
    ) -> Self {
        Self {
            config,
            readers,
            http,
        }
    }

    /// Create a scanner talking to the configured RPC nodes and the honeypot API
    pub fn from_config(config: ScanConfig) -> AppResult<Self> {
        let mut readers: HashMap<Chain, Arc<dyn ChainReader>> = HashMap::new();

        for (chain, chain_config) in &config.chains {
            match RpcProvider::new(chain_config, config.rpc_timeout) {
                Ok(provider) => {
                    info!("✅ Initialized RPC for {} ({})", chain_config.name, provider.masked_url());
                    readers.insert(*chain, Arc::new(provider));
                }
                Err(e) => warn!("⚠️ Failed to initialize RPC for {}: {}", chain_config.name, e),
            }
        }

        if readers.is_empty() {
            return Err(AppError::invalid_config("No chain has a usable RPC endpoint"));
        }

        let http = Arc::new(ReqwestFetcher::new()?);
        Ok(Self::new(config, readers, http))
    }

    /// Chains this scanner can evaluate
    pub fn supported_chains(&self) -> Vec<Chain> {
        Chain::ALL
            .into_iter()
            .filter(|chain| self.readers.contains_key(chain) && self.config.chain(*chain).is_some())
            .collect()
    }

    /// Scan a token given raw request strings
    pub async fn scan(&self, token: &str, chain: &str) -> AppResult<AggregatedRiskResult> {
        let chain: Chain = chain.parse()?;
        self.scan_on(token, chain).await
    }

    /// Scan a token on a known chain.
    ///
    /// Only input errors are returned as `Err`. Once input is valid every
    /// downstream failure shows up inside the affected check's result.
    pub async fn scan_on(&self, token: &str, chain: Chain) -> AppResult<AggregatedRiskResult> {
        let address = parse_token_address(token)?;
        let chain_config = self
            .config
            .chain(chain)
            .ok_or_else(|| AppError::unsupported_chain(chain.as_str()))?;
        let reader: &dyn ChainReader = self
            .readers
            .get(&chain)
            .ok_or_else(|| AppError::unsupported_chain(chain.as_str()))?
            .as_ref();

        let start = Instant::now();
        let deadline = self.config.check_deadline;
        info!("🔍 Scanning {} on {}", address, chain_config.name);

        let (owner, honeypot, liquidity) = join3(
            supervise(
                "ownership",
                deadline,
                check_ownership(reader, chain_config, token),
                || ownership::timed_out(deadline),
            ),
            supervise(
                "honeypot",
                deadline,
                check_honeypot(
                    self.http.as_ref(),
                    &self.config.honeypot_api_url,
                    chain_config.provider_chain_id,
                    address,
                    self.config.honeypot_timeout,
                ),
                || honeypot::timed_out(deadline),
            ),
            supervise(
                "liquidity",
                deadline,
                check_liquidity(reader, chain_config, &self.config.thresholds, address),
                || liquidity::timed_out(chain_config, deadline),
            ),
        )
        .await;

        let result = aggregate(vec![owner, honeypot, liquidity]);
        info!(
            "{} {} on {}: {} in {}ms",
            result.overall.emoji(),
            address,
            chain_config.name,
            result.overall,
            start.elapsed().as_millis()
        );
        Ok(result)
    }
}

/// Bound a check by `deadline`, substituting its neutral result when it overruns
async fn supervise<F>(
    name: &str,
    deadline: Duration,
    check: F,
    fallback: impl FnOnce() -> RiskCheckResult,
) -> RiskCheckResult
where
    F: Future<Output = RiskCheckResult>,
{
    match tokio::time::timeout(deadline, check).await {
        Ok(result) => result,
        Err(_) => {
            warn!("⏱️ {} check exceeded {}ms, using fallback", name, deadline.as_millis());
            fallback()
        }
    }
}
