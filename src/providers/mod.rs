//! Providers Module - External Data Sources
//!
//! Chain reads (JSON-RPC) and third-party HTTP, each behind a small trait so
//! the checks can run against canned data.

pub mod chain;
pub mod http;
pub mod mock;
pub mod rpc;

pub use chain::{read_view, ChainReader};
pub use http::{HttpFetcher, HttpResponse, ReqwestFetcher};
pub use mock::{StaticChainReader, StaticFetcher};
pub use rpc::RpcProvider;
