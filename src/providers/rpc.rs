//! RPC Client Module - JSON-RPC over HTTP
//!
//! One [`RpcProvider`] per chain. It implements [`ChainReader`] with plain
//! `eth_call` / `eth_getCode` requests. There are no retries and no fallback
//! endpoints: a failing node surfaces as an error and the calling check decides
//! how to degrade.
//!
//! Uses constants from utils/constants.rs

use alloy_primitives::{Address, Bytes};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_ENCODING, CONTENT_TYPE, USER_AGENT};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

use crate::models::config::ChainConfig;
use crate::models::errors::{AppError, AppResult, ErrorCode};
use crate::providers::chain::ChainReader;
use crate::utils::constants::USER_AGENT as USER_AGENT_CONST;

/// RPC Provider for one EVM chain
#[derive(Clone)]
pub struct RpcProvider {
    url: String,
    /// HTTP client with custom headers (gzip enabled)
    client: reqwest::Client,
    chain_id: u64,
    /// Network name for logging
    network_name: String,
}

impl RpcProvider {
    /// Create a provider for the chain described by `config`
    pub fn new(config: &ChainConfig, timeout: Duration) -> AppResult<Self> {
        if config.rpc_url.trim().is_empty() {
            return Err(AppError::invalid_config(format!(
                "No RPC URL configured for {}",
                config.name
            )));
        }

        Ok(Self {
            url: config.rpc_url.clone(),
            client: Self::build_client(timeout)?,
            chain_id: config.chain.chain_id(),
            network_name: config.name.clone(),
        })
    }

    /// Build HTTP client with custom headers
    fn build_client(timeout: Duration) -> AppResult<reqwest::Client> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_CONST));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT_ENCODING, HeaderValue::from_static("gzip"));

        reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .gzip(true)
            .build()
            .map_err(|e| AppError::invalid_config(format!("Failed to build HTTP client: {}", e)))
    }

    /// Execute a single JSON-RPC call
    pub async fn request<T: for<'de> Deserialize<'de>>(
        &self,
        method: &str,
        params: serde_json::Value,
    ) -> AppResult<T> {
        let payload = serde_json::json!({
            "jsonrpc": "2.0",
            "method": method,
            "params": params,
            "id": 1
        });

        debug!("📡 {} on {}", method, self.network_name);

        let response = self
            .client
            .post(&self.url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if status.as_u16() == 429 {
            warn!("⏳ Rate limited (HTTP 429) on {}", self.network_name);
            return Err(AppError::new(
                ErrorCode::RpcRateLimited,
                format!("{} rate limited (HTTP 429)", self.network_name),
            ));
        }
        if !status.is_success() {
            return Err(AppError::rpc_connection_failed(format!(
                "{} answered HTTP {}",
                self.network_name, status
            )));
        }

        let json: RpcResponse<T> = response.json().await.map_err(|e| {
            AppError::rpc_invalid_response(format!("Failed to parse {} response: {}", method, e))
        })?;

        if let Some(error) = json.error {
            return Err(error.into_app_error());
        }

        json.result
            .ok_or_else(|| AppError::rpc_invalid_response(format!("No result in {} response", method)))
    }

    fn transport_error(&self, err: reqwest::Error) -> AppError {
        if err.is_timeout() {
            AppError::rpc_timeout(format!("{} did not answer in time", self.network_name))
        } else {
            AppError::with_source(
                ErrorCode::RpcConnectionFailed,
                format!("Request to {} failed", self.network_name),
                err,
            )
        }
    }

    /// Execute eth_call against the latest block
    pub async fn eth_call(&self, to: Address, data: &Bytes) -> AppResult<Bytes> {
        let raw: String = self.request("eth_call", call_params(to, data)).await?;
        decode_hex_result(&raw)
    }

    /// Get bytecode at the latest block
    pub async fn get_code(&self, address: Address) -> AppResult<Bytes> {
        let raw: String = self.request("eth_getCode", code_params(address)).await?;
        decode_hex_result(&raw)
    }

    /// Get RPC URL (masked for logging)
    pub fn masked_url(&self) -> String {
        mask_url(&self.url)
    }

    /// Get chain ID
    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }
}

#[async_trait]
impl ChainReader for RpcProvider {
    async fn call(&self, to: Address, data: Bytes) -> AppResult<Bytes> {
        self.eth_call(to, &data).await
    }

    async fn has_code(&self, address: Address) -> AppResult<bool> {
        Ok(!self.get_code(address).await?.is_empty())
    }
}

/// Decode a `0x`-prefixed hex string returned by the node
fn decode_hex_result(raw: &str) -> AppResult<Bytes> {
    let digits = raw.strip_prefix("0x").unwrap_or(raw);
    hex::decode(digits)
        .map(Bytes::from)
        .map_err(|e| AppError::rpc_invalid_response(format!("Invalid hex in RPC result: {}", e)))
}

/// Hide API keys embedded in provider URLs (`.../v2/<key>`, `.../v3/<key>`)
fn mask_url(url: &str) -> String {
    for marker in ["/v2/", "/v3/"] {
        if let Some((base, key)) = url.split_once(marker) {
            if !key.is_empty() {
                return format!("{}{}***HIDDEN***", base, marker);
            }
        }
    }
    url.to_string()
}

/// JSON-RPC response structure
#[derive(Debug, Deserialize)]
struct RpcResponse<T> {
    result: Option<T>,
    error: Option<RpcError>,
}

/// JSON-RPC error structure
#[derive(Debug, Clone, Deserialize)]
pub struct RpcError {
    pub code: i64,
    pub message: String,
}

impl RpcError {
    /// Check if this is a rate limit error (code -32005 or message)
    pub fn is_rate_limit(&self) -> bool {
        self.code == -32005 || self.message.to_lowercase().contains("rate limit")
    }

    fn into_app_error(self) -> AppError {
        let code = if self.is_rate_limit() {
            ErrorCode::RpcRateLimited
        } else {
            ErrorCode::RpcError
        };
        AppError::new(code, format!("RPC error: {} (code: {})", self.message, self.code))
    }
}

fn call_params(to: Address, data: &Bytes) -> serde_json::Value {
    serde_json::json!([{ "to": to, "data": data }, "latest"])
}

fn code_params(address: Address) -> serde_json::Value {
    serde_json::json!([address, "latest"])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::types::Chain;

    #[test]
    fn test_decode_hex_result() {
        assert_eq!(decode_hex_result("0x").unwrap(), Bytes::new());
        assert_eq!(decode_hex_result("0x6080").unwrap(), Bytes::from(vec![0x60, 0x80]));
        let err = decode_hex_result("0xzz").unwrap_err();
        assert_eq!(err.code, ErrorCode::RpcInvalidResponse);
    }

    #[test]
    fn test_request_params_are_hex_strings() {
        let to = Address::repeat_byte(0x11);
        let params = call_params(to, &Bytes::from(vec![0x8d, 0xa5, 0xcb, 0x5b]));
        assert_eq!(params[0]["to"], "0x1111111111111111111111111111111111111111");
        assert_eq!(params[0]["data"], "0x8da5cb5b");
        assert_eq!(params[1], "latest");

        let params = code_params(Address::ZERO);
        assert_eq!(params[0], "0x0000000000000000000000000000000000000000");
        assert_eq!(params[1], "latest");
    }

    #[test]
    fn test_masked_url() {
        assert_eq!(
            mask_url("https://eth-mainnet.g.alchemy.com/v2/secret"),
            "https://eth-mainnet.g.alchemy.com/v2/***HIDDEN***"
        );
        assert_eq!(mask_url("https://bsc-dataseed.bnbchain.org"), "https://bsc-dataseed.bnbchain.org");
    }

    #[test]
    fn test_rpc_error_classification() {
        let limited = RpcError { code: -32005, message: "Too many requests".into() };
        assert_eq!(limited.into_app_error().code, ErrorCode::RpcRateLimited);

        let reverted = RpcError { code: 3, message: "execution reverted".into() };
        assert!(!reverted.is_rate_limit());
        assert_eq!(reverted.into_app_error().code, ErrorCode::RpcError);
    }

    #[test]
    fn test_provider_requires_url() {
        let mut config = ChainConfig::builtin(Chain::Eth);
        config.rpc_url = String::new();
        let err = RpcProvider::new(&config, Duration::from_secs(1)).err().unwrap();
        assert_eq!(err.code, ErrorCode::ConfigInvalidValue);

        let provider = RpcProvider::new(&ChainConfig::builtin(Chain::Bsc), Duration::from_secs(1)).unwrap();
        assert_eq!(provider.chain_id(), 56);
    }

    #[tokio::test]
    async fn test_unreachable_node() {
        let mut config = ChainConfig::builtin(Chain::Eth);
        config.rpc_url = "http://127.0.0.1:9".into();
        let provider = RpcProvider::new(&config, Duration::from_millis(500)).unwrap();
        let err = provider.has_code(Address::ZERO).await.unwrap_err();
        assert!(matches!(err.code, ErrorCode::RpcConnectionFailed | ErrorCode::RpcTimeout));
    }
}
