// src/app.rs
use anyhow::{anyhow, bail, Context, Result};
use bigdecimal::ToPrimitive;
use tracing::{info, warn};

use crate::config::{Config, TokenCfg};
use crate::numeric::DecimalFormatter;
use crate::router::{AftermathClient, Quote, QuoteProvider, TransactionBuilder};
use crate::shared::types::Token;
use crate::shared::utils::calculate_percentage_change;
use crate::trade::calculate_trade_metrics;
use crate::wallet::{BalanceReader, SuiRpcClient};

const FALLBACK_DECIMALS: u8 = 9;

#[derive(Debug, Clone)]
pub struct AppCfg {
    pub rpc_url: String,
    pub router_url: String,
    pub wallet_address: Option<String>,
    pub from_symbol: String,
    pub to_symbol: String,
    /// User amount input, possibly comma-grouped, or "max" to spend the
    /// full source balance
    pub amount: String,
    /// Slippage tolerance as a percentage
    pub slippage_percent: f64,
    pub simulate_only: bool,
    /// Externally produced base64 signatures for execution
    pub signatures: Vec<String>,
    pub tokens: Vec<TokenCfg>,
}

impl AppCfg {
    pub fn from_config(cfg: Config, override_simulate: bool) -> Result<Self> {
        Ok(Self {
            rpc_url: cfg.rpc.url,
            router_url: cfg.router.url,
            wallet_address: cfg.wallet.address,
            from_symbol: "SUI".to_string(),
            to_symbol: "CETUS".to_string(),
            amount: String::new(),
            slippage_percent: cfg.trade.slippage_percent,
            simulate_only: if override_simulate {
                true
            } else {
                cfg.trade.simulate_only.unwrap_or(true)
            },
            signatures: Vec::new(),
            tokens: cfg.tokens,
        })
    }

    fn find_token(&self, symbol: &str) -> Result<&TokenCfg> {
        self.tokens
            .iter()
            .find(|t| t.symbol.eq_ignore_ascii_case(symbol))
            .ok_or_else(|| {
                let known: Vec<&str> = self.tokens.iter().map(|t| t.symbol.as_str()).collect();
                anyhow!("Unknown token {}; configured tokens: {}", symbol, known.join(", "))
            })
    }
}

/// Resolve a configured token against on-chain metadata, falling back to
/// 9 decimals the way the widget does when metadata is unavailable.
async fn resolve_token(rpc: &SuiRpcClient, cfg: &TokenCfg) -> Token {
    let decimals = match cfg.decimals {
        Some(decimals) => decimals,
        None => match rpc.get_coin_metadata(&cfg.coin_type).await {
            Ok(metadata) => metadata.decimals,
            Err(err) => {
                warn!(%err, coin_type = %cfg.coin_type, "coin metadata unavailable, assuming {} decimals", FALLBACK_DECIMALS);
                FALLBACK_DECIMALS
            }
        },
    };
    Token::new(cfg.coin_type.clone(), cfg.symbol.clone(), decimals)
}

/// Parse the user amount and scale it to smallest units
fn scale_amount_to_units(
    formatter: &DecimalFormatter,
    amount: &str,
    decimals: u8,
) -> Result<u128> {
    let raw = formatter.parse_formatted_value(amount);
    let decimal = formatter
        .parse_decimal(&raw)
        .ok_or_else(|| anyhow!("Invalid amount: {}", amount))?;
    let units = formatter
        .decimal_to_units(&decimal, decimals)
        .ok_or_else(|| anyhow!("Amount out of range: {}", amount))?;
    if units == 0 {
        bail!("Amount must be greater than zero");
    }
    Ok(units)
}

/// USD drift between the two sides of the quote, when prices are known
fn usd_drift(
    formatter: &DecimalFormatter,
    amount_in_units: u128,
    amount_out_units: u128,
    from_token: &Token,
    to_token: &Token,
    from_price: f64,
    to_price: f64,
) -> Option<String> {
    let from_value = formatter
        .units_to_decimal(amount_in_units, from_token.decimals)
        .to_f64()?
        * from_price;
    let to_value = formatter
        .units_to_decimal(amount_out_units, to_token.decimals)
        .to_f64()?
        * to_price;
    if from_value == 0.0 {
        return None;
    }

    let diff = calculate_percentage_change(from_value, to_value);
    let sign = if diff > 0.0 { "+" } else { "" };
    Some(format!("{}{:.2}%", sign, diff))
}

pub async fn run(app_cfg: AppCfg) -> Result<()> {
    info!(
        from = %app_cfg.from_symbol,
        to = %app_cfg.to_symbol,
        "starting swap flow"
    );

    let formatter = DecimalFormatter::default();
    let rpc = SuiRpcClient::new(app_cfg.rpc_url.clone());
    let router = AftermathClient::new(app_cfg.router_url.clone());

    let from_cfg = app_cfg.find_token(&app_cfg.from_symbol)?;
    let to_cfg = app_cfg.find_token(&app_cfg.to_symbol)?;
    let from_token = resolve_token(&rpc, from_cfg).await;
    let to_token = resolve_token(&rpc, to_cfg).await;

    // Balances are display-only; skip them without a wallet address.
    let mut from_balance: Option<u128> = None;
    if let Some(address) = &app_cfg.wallet_address {
        let raw = rpc
            .get_total_balance(address, &from_token.coin_type)
            .await
            .context("fetch source balance")?;
        let raw_to = rpc
            .get_total_balance(address, &to_token.coin_type)
            .await
            .context("fetch destination balance")?;
        info!(
            "balances: {} {} / {} {}",
            formatter.format_with_commas(formatter.units_to_decimal(raw, from_token.decimals)),
            from_token.symbol,
            formatter.format_with_commas(formatter.units_to_decimal(raw_to, to_token.decimals)),
            to_token.symbol,
        );
        from_balance = Some(raw);
    }

    let amount_units = if app_cfg.amount.eq_ignore_ascii_case("max") {
        let balance = from_balance
            .ok_or_else(|| anyhow!("--amount max requires a wallet address"))?;
        if balance == 0 {
            bail!("No {} balance to spend", from_token.symbol);
        }
        balance
    } else {
        scale_amount_to_units(&formatter, &app_cfg.amount, from_token.decimals)?
    };

    info!(
        "quoting {} {} -> {}",
        formatter.format_with_commas(formatter.units_to_decimal(amount_units, from_token.decimals)),
        from_token.symbol,
        to_token.symbol,
    );

    let quote = router
        .get_trade_route(&from_token.coin_type, &to_token.coin_type, amount_units)
        .await
        .context("fetch trade route")?;

    report_quote(&formatter, &quote, &from_token, &to_token, &router).await?;

    let Some(address) = &app_cfg.wallet_address else {
        info!("no wallet address configured; quote is informational only");
        return Ok(());
    };

    let slippage_fraction = app_cfg.slippage_percent / 100.0;
    let built = router
        .build_swap_transaction(&quote, address, slippage_fraction)
        .await
        .context("build swap transaction")?;

    if app_cfg.simulate_only {
        let outcome = rpc
            .dry_run_transaction(&built.tx_bytes)
            .await
            .context("dry-run transaction")?;
        match outcome.error {
            Some(error) => bail!("Dry run failed ({}): {}", outcome.status, error),
            None => info!(status = %outcome.status, "dry run complete"),
        }
    } else if app_cfg.signatures.is_empty() {
        info!("transaction bytes (sign externally, then re-run with --signature):");
        info!("{}", built.tx_bytes);
    } else {
        let digest = rpc
            .execute_transaction(&built.tx_bytes, &app_cfg.signatures)
            .await
            .context("execute transaction")?;
        info!(%digest, "swap executed");
    }

    Ok(())
}

async fn report_quote(
    formatter: &DecimalFormatter,
    quote: &Quote,
    from_token: &Token,
    to_token: &Token,
    router: &AftermathClient,
) -> Result<()> {
    let metrics = calculate_trade_metrics(&quote.route, to_token.decimals, formatter)
        .context("compute trade metrics")?;

    let to_amount = formatter.format_with_commas(
        formatter.units_to_decimal(quote.route.coin_out_amount, to_token.decimals),
    );
    info!(
        "you receive: {} {} (best route via {})",
        to_amount,
        to_token.symbol,
        metrics.best_route.provider.as_deref().unwrap_or("aggregate"),
    );
    info!(
        "route dispersion: {} / min receive after fees: {} {}",
        metrics.slippage, metrics.min_receive, to_token.symbol,
    );

    // USD drift uses spot prices; failures here degrade the display only.
    let coins = vec![from_token.coin_type.clone(), to_token.coin_type.clone()];
    match router.get_coins_to_price(&coins).await {
        Ok(prices) => {
            if let (Some(from_price), Some(to_price)) = (
                prices.get(&from_token.coin_type),
                prices.get(&to_token.coin_type),
            ) {
                if let Some(drift) = usd_drift(
                    formatter,
                    quote.route.coin_in_amount,
                    quote.route.coin_out_amount,
                    from_token,
                    to_token,
                    from_price.price,
                    to_price.price,
                ) {
                    info!("usd value change: {}", drift);
                }
            }
        }
        Err(err) => warn!(%err, "price lookup failed, skipping usd drift"),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_amount_handles_grouped_input() {
        let f = DecimalFormatter::default();
        assert_eq!(
            scale_amount_to_units(&f, "1,234.5", 9).unwrap(),
            1_234_500_000_000
        );
        assert_eq!(scale_amount_to_units(&f, "0.000000001", 9).unwrap(), 1);
    }

    #[test]
    fn test_scale_amount_truncates_excess_precision() {
        let f = DecimalFormatter::default();
        // Digits beyond the token's 9 decimals are dropped, not rounded.
        assert_eq!(
            scale_amount_to_units(&f, "1.9999999999", 9).unwrap(),
            1_999_999_999
        );
    }

    #[test]
    fn test_scale_amount_rejects_bad_input() {
        let f = DecimalFormatter::default();
        assert!(scale_amount_to_units(&f, "abc", 9).is_err());
        assert!(scale_amount_to_units(&f, "0", 9).is_err());
        assert!(scale_amount_to_units(&f, "-1", 9).is_err());
    }

    #[test]
    fn test_usd_drift_formatting() {
        let f = DecimalFormatter::default();
        let sui = Token::new("0x2::sui::SUI", "SUI", 9);
        let cetus = Token::new("0xc8::cetus::CETUS", "CETUS", 9);

        // 1 SUI at $2 -> 18 CETUS at $0.10: $2.00 -> $1.80 = -10%.
        let drift = usd_drift(
            &f,
            1_000_000_000,
            18_000_000_000,
            &sui,
            &cetus,
            2.0,
            0.10,
        );
        assert_eq!(drift.as_deref(), Some("-10.00%"));

        // Zero input value yields no drift figure.
        let drift = usd_drift(&f, 0, 18_000_000_000, &sui, &cetus, 2.0, 0.10);
        assert_eq!(drift, None);
    }
}
