//! Routing-service collaborators
//!
//! Route discovery and transaction construction are delegated to an
//! external routing service; these traits keep the pure trade logic
//! testable without network access or a live router.

pub mod aftermath;
pub mod types;

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;

use crate::shared::errors::QuoteError;
use crate::trade::types::TradeRoute;

pub use aftermath::AftermathClient;

/// A quote with the untouched router payload alongside the parsed route.
///
/// The raw payload is echoed back verbatim when building the transaction,
/// the same way the widget hands the SDK its own route object.
#[derive(Debug, Clone)]
pub struct Quote {
    pub route: TradeRoute,
    pub raw: Value,
}

/// Submittable transaction produced by the router
#[derive(Debug, Clone)]
pub struct BuiltTransaction {
    /// Base64-encoded transaction block for an external signer
    pub tx_bytes: String,
}

/// Best-execution route discovery
#[async_trait]
pub trait QuoteProvider: Send + Sync {
    /// Quote a swap of `coin_in_amount` (smallest units) from
    /// `coin_in_type` to `coin_out_type`.
    ///
    /// An upstream error descriptor surfaces as `QuoteError::Upstream`;
    /// no metrics are computable from it.
    async fn get_trade_route(
        &self,
        coin_in_type: &str,
        coin_out_type: &str,
        coin_in_amount: u128,
    ) -> Result<Quote, QuoteError>;

    /// USD price per coin type, for the quote-drift display
    async fn get_coins_to_price(
        &self,
        coins: &[String],
    ) -> Result<HashMap<String, types::CoinPriceWire>, QuoteError>;
}

/// Transaction construction for a previously fetched quote
#[async_trait]
pub trait TransactionBuilder: Send + Sync {
    async fn build_swap_transaction(
        &self,
        quote: &Quote,
        wallet_address: &str,
        slippage: f64,
    ) -> Result<BuiltTransaction, QuoteError>;
}
