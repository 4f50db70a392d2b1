//! Error handling for the application

use thiserror::Error;

/// Route/metrics-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RouteError {
    #[error("No trade routes available")]
    EmptyRoutes,

    #[error("Trade route has zero input amount")]
    ZeroInputAmount,

    #[error("Trade route output amount too large")]
    OutputOverflow,
}

/// Quote-provider errors
#[derive(Error, Debug)]
pub enum QuoteError {
    #[error("Router returned error: {0}")]
    Upstream(String),

    #[error("Invalid amount in router response: {0}")]
    InvalidAmount(String),

    #[error("Router request failed: {0}")]
    Transport(String),
}

/// Wallet/RPC errors
#[derive(Error, Debug)]
pub enum WalletError {
    #[error("RPC request failed: {0}")]
    Transport(String),

    #[error("RPC error response: {0}")]
    Rpc(String),

    #[error("Coin metadata not found for {0}")]
    MissingMetadata(String),

    #[error("Invalid balance value: {0}")]
    InvalidBalance(String),
}

/// General application error
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Route error: {0}")]
    RouteError(String),

    #[error("Quote error: {0}")]
    QuoteError(String),

    #[error("Wallet error: {0}")]
    WalletError(String),

    #[error("Transaction error: {0}")]
    TransactionError(String),
}

impl From<RouteError> for AppError {
    fn from(err: RouteError) -> Self {
        AppError::RouteError(err.to_string())
    }
}

impl From<QuoteError> for AppError {
    fn from(err: QuoteError) -> Self {
        AppError::QuoteError(err.to_string())
    }
}

impl From<WalletError> for AppError {
    fn from(err: WalletError) -> Self {
        AppError::WalletError(err.to_string())
    }
}
