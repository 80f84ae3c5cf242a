//! Ruster Guard API Module
//! REST API for traffic-light token risk scans

pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod types;

pub use routes::create_router;
pub use types::*;
