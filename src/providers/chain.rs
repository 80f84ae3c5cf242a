//! Chain read seam
//!
//! The checks never talk to a node directly. They go through [`ChainReader`],
//! which only knows how to run an `eth_call` and whether an address holds code.
//! Typed view calls are declared with `sol!` and run through [`read_view`].

use alloy_primitives::{Address, Bytes};
use alloy_sol_types::{sol, SolCall};
use async_trait::async_trait;

use crate::models::errors::{AppError, AppResult};

// Minimal read-only surface: ownership, V2 factory/pair and token metadata
sol! {
    // Ownable
    function owner() external view returns (address owner);

    // Uniswap V2 style factory
    function getPair(address tokenA, address tokenB) external view returns (address pair);

    // Uniswap V2 style pair
    function token0() external view returns (address token);
    function token1() external view returns (address token);
    function getReserves() external view returns (uint112 reserve0, uint112 reserve1, uint32 blockTimestampLast);

    // ERC20 metadata
    function decimals() external view returns (uint8 decimals);
    function symbol() external view returns (string symbol);
}

/// Read access to an EVM chain
#[async_trait]
pub trait ChainReader: Send + Sync {
    /// Execute a read-only call against `to` and return the raw return data
    async fn call(&self, to: Address, data: Bytes) -> AppResult<Bytes>;

    /// Whether bytecode is deployed at `address`
    async fn has_code(&self, address: Address) -> AppResult<bool>;
}

/// Run a typed view call and decode its return values.
///
/// Empty return data (no such function, or the target is a wallet) is an error,
/// as is anything that does not decode as the declared return type.
pub async fn read_view<C>(reader: &dyn ChainReader, to: Address, call: C) -> AppResult<C::Return>
where
    C: SolCall + Send + Sync,
{
    let output = reader.call(to, Bytes::from(call.abi_encode())).await?;

    if output.is_empty() {
        return Err(AppError::rpc_invalid_response(format!(
            "{} on {} returned no data",
            C::SIGNATURE,
            to
        )));
    }

    C::abi_decode_returns(&output, true).map_err(|e| {
        AppError::rpc_invalid_response(format!(
            "Cannot decode {} from {}: {}",
            C::SIGNATURE,
            to,
            e
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::errors::ErrorCode;
    use crate::providers::mock::StaticChainReader;
    use alloy_primitives::address;

    const TOKEN: Address = address!("1111111111111111111111111111111111111111");

    #[test]
    fn test_selectors() {
        // Well-known selectors
        assert_eq!(ownerCall::SELECTOR, [0x8d, 0xa5, 0xcb, 0x5b]);
        assert_eq!(getPairCall::SELECTOR, [0xe6, 0xa4, 0x39, 0x05]);
        assert_eq!(getReservesCall::SELECTOR, [0x09, 0x02, 0xf1, 0xac]);
        assert_eq!(decimalsCall::SELECTOR, [0x31, 0x3c, 0xe5, 0x67]);
    }

    #[tokio::test]
    async fn test_read_view_decodes() {
        let owner = address!("2222222222222222222222222222222222222222");
        let reader = StaticChainReader::new().with_owner(TOKEN, owner);

        let ret = read_view(&reader, TOKEN, ownerCall {}).await.unwrap();
        assert_eq!(ret.owner, owner);
    }

    #[tokio::test]
    async fn test_read_view_missing_function() {
        let reader = StaticChainReader::new();
        let err = read_view(&reader, TOKEN, ownerCall {}).await.err().unwrap();
        assert_eq!(err.code, ErrorCode::RpcError);
    }

    #[tokio::test]
    async fn test_read_view_empty_output() {
        let reader = StaticChainReader::new().with_raw(TOKEN, ownerCall::SELECTOR, Bytes::new());
        let err = read_view(&reader, TOKEN, ownerCall {}).await.err().unwrap();
        assert_eq!(err.code, ErrorCode::RpcInvalidResponse);
    }
}
