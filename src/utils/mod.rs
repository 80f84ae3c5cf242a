//! Utils Module - Shared constants and formatting helpers

pub mod constants;

pub use constants::*;
