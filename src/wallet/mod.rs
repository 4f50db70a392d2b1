//! Wallet collaborators: balance queries and transaction submission
//!
//! Signing stays outside this crate. Execution takes caller-provided
//! base64 signatures; the default flow dry-runs the transaction bytes
//! instead.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, info};

use crate::shared::errors::WalletError;

/// Coin metadata as reported by the chain
#[derive(Debug, Clone, Deserialize)]
pub struct CoinMetadata {
    pub symbol: String,
    pub decimals: u8,
    #[serde(default)]
    pub name: Option<String>,
}

/// One owned coin object in a `suix_getCoins` page
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoinWire {
    pub balance: String,
    #[serde(default)]
    pub coin_object_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CoinPageWire {
    data: Vec<CoinWire>,
    has_next_page: bool,
    #[serde(default)]
    next_cursor: Option<String>,
}

/// Outcome of a dry run
#[derive(Debug, Clone)]
pub struct DryRunOutcome {
    pub status: String,
    pub error: Option<String>,
}

/// Read access to on-chain balances and coin metadata
#[async_trait]
pub trait BalanceReader: Send + Sync {
    /// Total raw balance of `coin_type` owned by `owner`, smallest units
    async fn get_total_balance(&self, owner: &str, coin_type: &str) -> Result<u128, WalletError>;

    async fn get_coin_metadata(&self, coin_type: &str) -> Result<CoinMetadata, WalletError>;
}

/// JSON-RPC client for a Sui fullnode
pub struct SuiRpcClient {
    http_client: Client,
    url: String,
}

impl SuiRpcClient {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            http_client: Client::new(),
            url: url.into(),
        }
    }

    async fn rpc_call(&self, method: &str, params: Value) -> Result<Value, WalletError> {
        debug!(%method, "rpc call");
        let body = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": method,
            "params": params,
        });

        let response = self
            .http_client
            .post(&self.url)
            .json(&body)
            .send()
            .await
            .map_err(|e| WalletError::Transport(e.to_string()))?;

        let envelope: Value = response
            .json()
            .await
            .map_err(|e| WalletError::Transport(e.to_string()))?;

        if let Some(err) = envelope.get("error") {
            let message = err
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("unknown rpc error");
            return Err(WalletError::Rpc(format!("{}: {}", method, message)));
        }

        envelope
            .get("result")
            .cloned()
            .ok_or_else(|| WalletError::Rpc(format!("{}: missing result", method)))
    }

    /// Dry-run transaction bytes without a signature
    pub async fn dry_run_transaction(&self, tx_bytes: &str) -> Result<DryRunOutcome, WalletError> {
        let result = self
            .rpc_call("sui_dryRunTransactionBlock", json!([tx_bytes]))
            .await?;

        let status = result
            .pointer("/effects/status/status")
            .and_then(Value::as_str)
            .unwrap_or("unknown")
            .to_string();
        let error = result
            .pointer("/effects/status/error")
            .and_then(Value::as_str)
            .map(str::to_string);

        Ok(DryRunOutcome { status, error })
    }

    /// Submit signed transaction bytes; returns the transaction digest
    pub async fn execute_transaction(
        &self,
        tx_bytes: &str,
        signatures: &[String],
    ) -> Result<String, WalletError> {
        let result = self
            .rpc_call(
                "sui_executeTransactionBlock",
                json!([
                    tx_bytes,
                    signatures,
                    { "showEffects": true },
                    "WaitForLocalExecution"
                ]),
            )
            .await?;

        let digest = result
            .get("digest")
            .and_then(Value::as_str)
            .ok_or_else(|| WalletError::Rpc("execute: missing digest".to_string()))?
            .to_string();

        info!(%digest, "transaction executed");
        Ok(digest)
    }
}

#[async_trait]
impl BalanceReader for SuiRpcClient {
    async fn get_total_balance(&self, owner: &str, coin_type: &str) -> Result<u128, WalletError> {
        let mut total: u128 = 0;
        let mut cursor: Option<String> = None;

        loop {
            let result = self
                .rpc_call("suix_getCoins", json!([owner, coin_type, cursor, 50]))
                .await?;
            let page: CoinPageWire = serde_json::from_value(result)
                .map_err(|e| WalletError::Rpc(format!("malformed coin page: {}", e)))?;

            total = total
                .checked_add(sum_coin_balances(&page.data)?)
                .ok_or_else(|| WalletError::InvalidBalance("balance overflow".to_string()))?;

            cursor = match advance_cursor(&page) {
                Ok(Some(next)) => Some(next),
                Ok(None) => break,
                Err(err) => return Err(err),
            };
        }

        debug!(%owner, %coin_type, total, "summed coin balances");
        Ok(total)
    }

    async fn get_coin_metadata(&self, coin_type: &str) -> Result<CoinMetadata, WalletError> {
        let result = self
            .rpc_call("suix_getCoinMetadata", json!([coin_type]))
            .await?;
        if result.is_null() {
            return Err(WalletError::MissingMetadata(coin_type.to_string()));
        }
        serde_json::from_value(result)
            .map_err(|e| WalletError::Rpc(format!("malformed coin metadata: {}", e)))
    }
}

/// Next cursor to fetch, or `None` when the last page has been read.
///
/// A page claiming more data without a cursor would re-fetch the same
/// page forever, double-counting its balances; treat it as a broken
/// response instead.
fn advance_cursor(page: &CoinPageWire) -> Result<Option<String>, WalletError> {
    if !page.has_next_page {
        return Ok(None);
    }
    match &page.next_cursor {
        Some(cursor) => Ok(Some(cursor.clone())),
        None => Err(WalletError::Rpc(
            "coin page reports more data but no cursor".to_string(),
        )),
    }
}

/// Sum the raw balances of one page of coin objects
fn sum_coin_balances(coins: &[CoinWire]) -> Result<u128, WalletError> {
    coins.iter().try_fold(0u128, |sum, coin| {
        let balance = coin
            .balance
            .parse::<u128>()
            .map_err(|_| WalletError::InvalidBalance(coin.balance.clone()))?;
        sum.checked_add(balance)
            .ok_or_else(|| WalletError::InvalidBalance("balance overflow".to_string()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coin(balance: &str) -> CoinWire {
        CoinWire {
            balance: balance.to_string(),
            coin_object_id: None,
        }
    }

    #[test]
    fn test_sums_coin_balances() {
        let coins = vec![coin("1000"), coin("2500"), coin("1")];
        assert_eq!(sum_coin_balances(&coins).unwrap(), 3501);
        assert_eq!(sum_coin_balances(&[]).unwrap(), 0);
    }

    #[test]
    fn test_sums_beyond_u64() {
        let coins = vec![
            coin("18446744073709551615"),
            coin("18446744073709551615"),
        ];
        assert_eq!(sum_coin_balances(&coins).unwrap(), 2 * (u64::MAX as u128));
    }

    #[test]
    fn test_rejects_malformed_balance() {
        let coins = vec![coin("1000"), coin("not-a-number")];
        assert!(matches!(
            sum_coin_balances(&coins),
            Err(WalletError::InvalidBalance(_))
        ));
    }

    fn page(has_next_page: bool, next_cursor: Option<&str>) -> CoinPageWire {
        CoinPageWire {
            data: vec![coin("1000")],
            has_next_page,
            next_cursor: next_cursor.map(str::to_string),
        }
    }

    #[test]
    fn test_advance_cursor_follows_pages() {
        assert_eq!(advance_cursor(&page(false, None)).unwrap(), None);
        assert_eq!(
            advance_cursor(&page(true, Some("0xdef"))).unwrap(),
            Some("0xdef".to_string())
        );
        // Trailing cursor on the last page is ignored.
        assert_eq!(advance_cursor(&page(false, Some("0xdef"))).unwrap(), None);
    }

    #[test]
    fn test_advance_cursor_rejects_cursorless_continuation() {
        // Looping on this page would re-count its balances forever.
        assert!(matches!(
            advance_cursor(&page(true, None)),
            Err(WalletError::Rpc(_))
        ));
    }

    #[test]
    fn test_decodes_coin_page() {
        let body = r#"{
            "data": [
                {"balance": "1000000000", "coinObjectId": "0xabc"},
                {"balance": "500"}
            ],
            "hasNextPage": true,
            "nextCursor": "0xdef"
        }"#;
        let page: CoinPageWire = serde_json::from_str(body).unwrap();
        assert_eq!(page.data.len(), 2);
        assert!(page.has_next_page);
        assert_eq!(page.next_cursor.as_deref(), Some("0xdef"));
        assert_eq!(sum_coin_balances(&page.data).unwrap(), 1_000_000_500);
    }
}
