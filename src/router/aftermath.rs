//! HTTP client for an Aftermath-style router API

use std::collections::HashMap;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use tracing::{debug, info, warn};

use crate::shared::errors::QuoteError;
use crate::shared::utils::generate_id;

use super::types::{BuildTransactionWire, CoinPriceWire, CompleteRouteWire, RouteResponseWire};
use super::{BuiltTransaction, Quote, QuoteProvider, TransactionBuilder};

const DEFAULT_BASE_URL: &str = "https://aftermath.finance/api";

/// Router API client
pub struct AftermathClient {
    http_client: Client,
    base_url: String,
}

impl AftermathClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http_client: Client::new(),
            base_url: base_url.into(),
        }
    }

    async fn post_json(&self, path: &str, body: Value) -> Result<Value, QuoteError> {
        let url = format!("{}/{}", self.base_url, path);
        let request_id = generate_id();
        debug!(%url, %request_id, "router request");

        let response = self
            .http_client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| QuoteError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            warn!(%url, %status, %request_id, "router request failed");
            return Err(QuoteError::Transport(format!(
                "{} returned HTTP {}",
                url, status
            )));
        }

        response
            .json()
            .await
            .map_err(|e| QuoteError::Transport(e.to_string()))
    }
}

impl Default for AftermathClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[async_trait]
impl QuoteProvider for AftermathClient {
    async fn get_trade_route(
        &self,
        coin_in_type: &str,
        coin_out_type: &str,
        coin_in_amount: u128,
    ) -> Result<Quote, QuoteError> {
        let body = json!({
            "coinInType": coin_in_type,
            "coinOutType": coin_out_type,
            "coinInAmount": coin_in_amount.to_string(),
        });

        let raw = self.post_json("router/trade-route", body).await?;
        let wire: RouteResponseWire = serde_json::from_value(raw.clone())
            .map_err(|e| QuoteError::Transport(format!("malformed route response: {}", e)))?;

        let route_wire: CompleteRouteWire = match wire {
            RouteResponseWire::Route(route) => *route,
            RouteResponseWire::Error(err) => return Err(QuoteError::Upstream(err.error)),
        };

        let route = route_wire.into_trade_route()?;
        info!(
            coin_in_amount,
            coin_out_amount = route.coin_out_amount,
            sub_routes = route.sub_routes.len(),
            "fetched trade route"
        );

        Ok(Quote { route, raw })
    }

    async fn get_coins_to_price(
        &self,
        coins: &[String],
    ) -> Result<HashMap<String, CoinPriceWire>, QuoteError> {
        let body = json!({ "coins": coins });
        let raw = self.post_json("price/coins-to-price", body).await?;
        serde_json::from_value(raw)
            .map_err(|e| QuoteError::Transport(format!("malformed price response: {}", e)))
    }
}

#[async_trait]
impl TransactionBuilder for AftermathClient {
    async fn build_swap_transaction(
        &self,
        quote: &Quote,
        wallet_address: &str,
        slippage: f64,
    ) -> Result<BuiltTransaction, QuoteError> {
        let body = json!({
            "walletAddress": wallet_address,
            "completeRoute": quote.raw,
            "slippage": slippage,
            "isSponsoredTx": false,
        });

        let raw = self.post_json("router/transactions/trade", body).await?;
        let wire: BuildTransactionWire = serde_json::from_value(raw)
            .map_err(|e| QuoteError::Transport(format!("malformed transaction response: {}", e)))?;

        if !wire.success {
            let message = wire
                .error
                .unwrap_or_else(|| "Failed to generate transaction".to_string());
            return Err(QuoteError::Upstream(message));
        }

        let transaction = wire
            .transaction
            .ok_or_else(|| QuoteError::Upstream("router omitted transaction bytes".to_string()))?;

        info!(bytes = transaction.tx_bytes.len(), "built swap transaction");
        Ok(BuiltTransaction {
            tx_bytes: transaction.tx_bytes,
        })
    }
}
