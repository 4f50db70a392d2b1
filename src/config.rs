use anyhow::{Context, Result};
use serde::Deserialize;
use std::{fs, path::Path};

#[derive(Debug, Clone, Deserialize)]
pub struct RpcCfg {
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RouterCfg {
    pub url: String,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct WalletCfg {
    /// Owner address for balance display; balances are skipped without it
    pub address: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TradeCfg {
    /// Slippage tolerance as a percentage, e.g. 0.5
    pub slippage_percent: f64,
    pub simulate_only: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokenCfg {
    pub symbol: String,
    /// Fully-qualified coin type, e.g. "0x2::sui::SUI"
    pub coin_type: String,
    /// Overrides on-chain metadata when set
    pub decimals: Option<u8>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub rpc: RpcCfg,
    pub router: RouterCfg,
    #[serde(default)]
    pub wallet: WalletCfg,
    pub trade: TradeCfg,
    pub tokens: Vec<TokenCfg>,
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let s = fs::read_to_string(path.as_ref())?;
        let cfg: Self = toml::from_str(&s).context("parse Config.toml")?;
        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_full_config() {
        let raw = r#"
            [rpc]
            url = "https://fullnode.mainnet.sui.io:443"

            [router]
            url = "https://aftermath.finance/api"

            [wallet]
            address = "0x123"

            [trade]
            slippage_percent = 0.5
            simulate_only = true

            [[tokens]]
            symbol = "SUI"
            coin_type = "0x2::sui::SUI"
            decimals = 9

            [[tokens]]
            symbol = "CETUS"
            coin_type = "0x06864a6f921804860930db6ddbe2e16acdf8504495ea7481637a1c8b9a8fe54b::cetus::CETUS"
        "#;

        let cfg: Config = toml::from_str(raw).unwrap();
        assert_eq!(cfg.trade.slippage_percent, 0.5);
        assert_eq!(cfg.trade.simulate_only, Some(true));
        assert_eq!(cfg.wallet.address.as_deref(), Some("0x123"));
        assert_eq!(cfg.tokens.len(), 2);
        assert_eq!(cfg.tokens[0].symbol, "SUI");
        assert_eq!(cfg.tokens[0].decimals, Some(9));
        assert!(cfg.tokens[1].decimals.is_none());
    }

    #[test]
    fn test_wallet_section_optional() {
        let raw = r#"
            [rpc]
            url = "https://fullnode.mainnet.sui.io:443"

            [router]
            url = "https://aftermath.finance/api"

            [trade]
            slippage_percent = 1.0

            [[tokens]]
            symbol = "SUI"
            coin_type = "0x2::sui::SUI"
        "#;

        let cfg: Config = toml::from_str(raw).unwrap();
        assert!(cfg.wallet.address.is_none());
        assert!(cfg.trade.simulate_only.is_none());
    }
}
