//! In-memory collaborators
//!
//! Canned [`ChainReader`] and [`HttpFetcher`] implementations for tests and
//! offline runs. Return data is ABI-encoded with the same `sol!` declarations
//! the checks decode with.

use alloy_primitives::{Address, Bytes, Uint};
use alloy_sol_types::SolCall;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use crate::models::errors::{AppError, AppResult, ErrorCode};
use crate::providers::chain::{
    decimalsCall, getPairCall, getReservesCall, ownerCall, symbolCall, token0Call, token1Call,
    ChainReader,
};
use crate::providers::http::{HttpFetcher, HttpResponse};

/// How long a "hanging" collaborator sleeps before answering
const HANG_FOR: Duration = Duration::from_secs(3600);

/// Canned response for one call
#[derive(Debug, Clone)]
enum Canned {
    Data(Bytes),
    Fail(ErrorCode, String),
    Hang,
}

impl Canned {
    async fn resolve<T>(self, ok: impl FnOnce(Bytes) -> T) -> AppResult<T> {
        match self {
            Canned::Data(bytes) => Ok(ok(bytes)),
            Canned::Fail(code, msg) => Err(AppError::new(code, msg)),
            Canned::Hang => {
                tokio::time::sleep(HANG_FOR).await;
                Err(AppError::rpc_timeout("mock hung"))
            }
        }
    }
}

/// Chain reader answering from fixed tables.
///
/// Lookups try the exact calldata first, then the `(address, selector)` pair.
/// Anything unmapped behaves like a revert, or like a dead node after
/// [`StaticChainReader::offline`].
#[derive(Debug, Default)]
pub struct StaticChainReader {
    by_calldata: HashMap<(Address, Bytes), Canned>,
    by_selector: HashMap<(Address, [u8; 4]), Canned>,
    code: HashMap<Address, Canned>,
    offline: bool,
}

impl StaticChainReader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every unmapped call fails with a connection error
    pub fn offline(mut self) -> Self {
        self.offline = true;
        self
    }

    /// Raw return data for any call with this selector
    pub fn with_raw(mut self, to: Address, selector: [u8; 4], data: Bytes) -> Self {
        self.by_selector.insert((to, selector), Canned::Data(data));
        self
    }

    /// Fail any call with this selector
    pub fn with_failure(mut self, to: Address, selector: [u8; 4], code: ErrorCode) -> Self {
        self.by_selector
            .insert((to, selector), Canned::Fail(code, format!("mock failure ({})", code.as_str())));
        self
    }

    /// Never answer calls with this selector
    pub fn with_hang(mut self, to: Address, selector: [u8; 4]) -> Self {
        self.by_selector.insert((to, selector), Canned::Hang);
        self
    }

    /// `owner()` on `token` returns `owner`
    pub fn with_owner(self, token: Address, owner: Address) -> Self {
        let data = ownerCall::abi_encode_returns(&(owner,));
        self.with_raw(token, ownerCall::SELECTOR, data.into())
    }

    /// Bytecode is deployed at `address`
    pub fn with_code(mut self, address: Address) -> Self {
        self.code.insert(address, Canned::Data(Bytes::from_static(&[0x60, 0x80])));
        self
    }

    /// `eth_getCode` for `address` fails
    pub fn with_code_failure(mut self, address: Address) -> Self {
        self.code
            .insert(address, Canned::Fail(ErrorCode::RpcConnectionFailed, "mock getCode failure".into()));
        self
    }

    /// `getPair` on `factory` answers the zero address unless a pair is registered
    pub fn with_factory(self, factory: Address) -> Self {
        let data = getPairCall::abi_encode_returns(&(Address::ZERO,));
        self.with_raw(factory, getPairCall::SELECTOR, data.into())
    }

    /// Factory maps `(token, base)` to `pair`
    pub fn with_pair(mut self, factory: Address, token: Address, base: Address, pair: Address) -> Self {
        let calldata = Bytes::from(getPairCall { tokenA: token, tokenB: base }.abi_encode());
        let data = getPairCall::abi_encode_returns(&(pair,));
        self.by_calldata.insert((factory, calldata), Canned::Data(data.into()));
        self
    }

    /// Pair `pair` holds `token0`/`token1` with raw reserves `reserve0`/`reserve1`
    pub fn with_pool(
        self,
        pair: Address,
        token0: Address,
        token1: Address,
        reserve0: u128,
        reserve1: u128,
    ) -> Self {
        let reserves = getReservesCall::abi_encode_returns(&(
            Uint::<112, 2>::from(reserve0),
            Uint::<112, 2>::from(reserve1),
            0u32,
        ));
        self.with_raw(pair, token0Call::SELECTOR, token0Call::abi_encode_returns(&(token0,)).into())
            .with_raw(pair, token1Call::SELECTOR, token1Call::abi_encode_returns(&(token1,)).into())
            .with_raw(pair, getReservesCall::SELECTOR, reserves.into())
            .with_code(pair)
    }

    /// `decimals()` on `token`
    pub fn with_decimals(self, token: Address, decimals: u8) -> Self {
        let data = decimalsCall::abi_encode_returns(&(decimals,));
        self.with_raw(token, decimalsCall::SELECTOR, data.into())
    }

    /// `symbol()` on `token`
    pub fn with_symbol(self, token: Address, symbol: &str) -> Self {
        let data = symbolCall::abi_encode_returns(&(symbol.to_string(),));
        self.with_raw(token, symbolCall::SELECTOR, data.into())
    }

    fn lookup_call(&self, to: Address, data: &Bytes) -> Canned {
        if let Some(canned) = self.by_calldata.get(&(to, data.clone())) {
            return canned.clone();
        }
        if data.len() >= 4 {
            let mut selector = [0u8; 4];
            selector.copy_from_slice(&data[..4]);
            if let Some(canned) = self.by_selector.get(&(to, selector)) {
                return canned.clone();
            }
        }
        self.unmapped()
    }

    fn unmapped(&self) -> Canned {
        if self.offline {
            Canned::Fail(ErrorCode::RpcConnectionFailed, "node unreachable".into())
        } else {
            Canned::Fail(ErrorCode::RpcError, "execution reverted".into())
        }
    }
}

#[async_trait]
impl ChainReader for StaticChainReader {
    async fn call(&self, to: Address, data: Bytes) -> AppResult<Bytes> {
        self.lookup_call(to, &data).resolve(|bytes| bytes).await
    }

    async fn has_code(&self, address: Address) -> AppResult<bool> {
        let canned = match self.code.get(&address) {
            Some(canned) => canned.clone(),
            None if self.offline => self.unmapped(),
            None => Canned::Data(Bytes::new()),
        };
        canned.resolve(|bytes| !bytes.is_empty()).await
    }
}

/// HTTP fetcher returning one canned answer and remembering requested URLs
#[derive(Debug)]
pub struct StaticFetcher {
    response: Canned,
    status: u16,
    requests: Mutex<Vec<String>>,
}

impl StaticFetcher {
    /// Answer every request with `status` and `body`
    pub fn respond(status: u16, body: impl Into<String>) -> Self {
        Self {
            response: Canned::Data(Bytes::from(body.into().into_bytes())),
            status,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Answer every request with `200 OK` and a JSON document
    pub fn json(value: serde_json::Value) -> Self {
        Self::respond(200, value.to_string())
    }

    /// Fail every request with `code`
    pub fn fail(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            response: Canned::Fail(code, message.into()),
            status: 0,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Never answer
    pub fn hang() -> Self {
        Self {
            response: Canned::Hang,
            status: 0,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// URLs requested so far
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl HttpFetcher for StaticFetcher {
    async fn get(&self, url: &str, _timeout: Duration) -> AppResult<HttpResponse> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(url.to_string());
        }
        let status = self.status;
        self.response
            .clone()
            .resolve(|bytes| HttpResponse {
                status,
                body: String::from_utf8_lossy(&bytes).into_owned(),
            })
            .await
    }
}
