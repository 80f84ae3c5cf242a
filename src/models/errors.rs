//! Centralized Error Handling Module
//!
//! Every failure carries a unique error code so logs stay greppable.
//!
//! Error codes follow pattern: CATEGORY_SPECIFIC_ERROR
//! - RPC_xxx: chain read errors
//! - HTTP_xxx: third-party HTTP errors
//! - API_xxx: API errors
//! - CFG_xxx: configuration / unsupported input errors
//! - TOKEN_xxx: token input errors

use std::fmt;

/// Application-wide error type
#[derive(Debug)]
pub struct AppError {
    /// Unique error code for logging/monitoring
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Optional underlying error
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new AppError
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Create AppError with source error
    pub fn with_source(
        code: ErrorCode,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            code,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Get error code as string (for logging)
    pub fn code_str(&self) -> &'static str {
        self.code.as_str()
    }

    /// True for errors caused by the caller's input
    pub fn is_input_error(&self) -> bool {
        matches!(
            self.code,
            ErrorCode::TokenInvalidAddress | ErrorCode::ConfigUnsupportedChain
        )
    }

    /// True for errors caused by a timeout anywhere downstream
    pub fn is_timeout(&self) -> bool {
        matches!(self.code, ErrorCode::RpcTimeout | ErrorCode::ExternalTimeout)
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code.as_str(), self.message)
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Unique error codes for monitoring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // ============================================
    // RPC Errors
    // ============================================
    /// RPC connection failed
    RpcConnectionFailed,
    /// RPC request timeout
    RpcTimeout,
    /// RPC rate limited (HTTP 429)
    RpcRateLimited,
    /// RPC returned error response (includes reverts)
    RpcError,
    /// Invalid or undecodable RPC response
    RpcInvalidResponse,

    // ============================================
    // Third-party HTTP Errors
    // ============================================
    /// Body is not the expected JSON document
    HttpInvalidBody,
    /// External service timeout
    ExternalTimeout,
    /// Network failure talking to an external service
    ExternalUnreachable,

    // ============================================
    // API Errors
    // ============================================
    /// Invalid request format
    ApiBadRequest,

    // ============================================
    // Configuration / Input Errors
    // ============================================
    /// Invalid configuration value
    ConfigInvalidValue,
    /// Unsupported chain
    ConfigUnsupportedChain,
    /// Invalid token address
    TokenInvalidAddress,

    // ============================================
    // Generic Errors
    // ============================================
    /// Unknown error
    Unknown,
}

impl ErrorCode {
    /// Get string representation of error code
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RpcConnectionFailed => "RPC_CONNECTION_FAILED",
            Self::RpcTimeout => "RPC_TIMEOUT",
            Self::RpcRateLimited => "RPC_RATE_LIMITED",
            Self::RpcError => "RPC_ERROR",
            Self::RpcInvalidResponse => "RPC_INVALID_RESPONSE",

            Self::HttpInvalidBody => "HTTP_INVALID_BODY",
            Self::ExternalTimeout => "EXTERNAL_TIMEOUT",
            Self::ExternalUnreachable => "EXTERNAL_UNREACHABLE",

            Self::ApiBadRequest => "API_BAD_REQUEST",

            Self::ConfigInvalidValue => "CFG_INVALID_VALUE",
            Self::ConfigUnsupportedChain => "CFG_UNSUPPORTED_CHAIN",
            Self::TokenInvalidAddress => "TOKEN_INVALID_ADDRESS",

            Self::Unknown => "UNKNOWN_ERROR",
        }
    }

    /// Get HTTP status code for API responses
    pub fn http_status(&self) -> u16 {
        match self {
            Self::ApiBadRequest
            | Self::TokenInvalidAddress
            | Self::ConfigUnsupportedChain
            | Self::ConfigInvalidValue => 400,
            Self::RpcRateLimited => 429,
            Self::RpcTimeout | Self::ExternalTimeout => 504,
            Self::HttpInvalidBody | Self::ExternalUnreachable => 502,
            _ => 500,
        }
    }
}

// ============================================
// Convenience constructors
// ============================================

impl AppError {
    /// RPC connection failed
    pub fn rpc_connection_failed(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::RpcConnectionFailed, msg)
    }

    /// RPC timeout
    pub fn rpc_timeout(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::RpcTimeout, msg)
    }

    /// RPC error response
    pub fn rpc_error(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::RpcError, msg)
    }

    /// Undecodable RPC payload
    pub fn rpc_invalid_response(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::RpcInvalidResponse, msg)
    }

    /// External service timeout
    pub fn external_timeout(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::ExternalTimeout, msg)
    }

    /// Invalid token address
    pub fn invalid_address(address: &str) -> Self {
        Self::new(
            ErrorCode::TokenInvalidAddress,
            format!("Invalid token address: '{}'", address),
        )
    }

    /// Unsupported chain
    pub fn unsupported_chain(chain: &str) -> Self {
        Self::new(
            ErrorCode::ConfigUnsupportedChain,
            format!("Unsupported chain: '{}'. Supported: eth, bsc", chain),
        )
    }

    /// Invalid configuration value
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigInvalidValue, msg)
    }

    /// API bad request
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::ApiBadRequest, msg)
    }
}

// ============================================
// Result type alias
// ============================================

/// Application Result type
pub type AppResult<T> = Result<T, AppError>;

// ============================================
// Conversion from common error types
// ============================================

impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        Self::new(ErrorCode::Unknown, err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::with_source(ErrorCode::Unknown, "IO error", err)
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::new(ErrorCode::ExternalTimeout, "Request timeout")
        } else if err.is_connect() {
            Self::with_source(ErrorCode::ExternalUnreachable, "Connection failed", err)
        } else {
            Self::new(ErrorCode::Unknown, err.to_string())
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(ErrorCode::HttpInvalidBody, "JSON parse error", err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = AppError::rpc_timeout("Connection timed out");
        assert_eq!(err.code, ErrorCode::RpcTimeout);
        assert_eq!(err.code_str(), "RPC_TIMEOUT");
        assert!(err.is_timeout());
        assert!(err.to_string().starts_with("[RPC_TIMEOUT]"));
    }

    #[test]
    fn test_input_errors() {
        assert!(AppError::invalid_address("0x123").is_input_error());
        assert!(AppError::unsupported_chain("sol").is_input_error());
        assert!(!AppError::rpc_error("reverted").is_input_error());
    }

    #[test]
    fn test_http_status() {
        assert_eq!(ErrorCode::TokenInvalidAddress.http_status(), 400);
        assert_eq!(ErrorCode::ConfigUnsupportedChain.http_status(), 400);
        assert_eq!(ErrorCode::RpcRateLimited.http_status(), 429);
        assert_eq!(ErrorCode::ExternalTimeout.http_status(), 504);
        assert_eq!(ErrorCode::Unknown.http_status(), 500);
    }

    #[test]
    fn test_json_error_conversion() {
        let err: AppError = serde_json::from_str::<serde_json::Value>("<html>")
            .unwrap_err()
            .into();
        assert_eq!(err.code, ErrorCode::HttpInvalidBody);
        assert!(std::error::Error::source(&err).is_some());
    }
}
