use anyhow::Result;
use clap::Parser;
use suiswap::{app, config};

#[derive(Parser, Debug)]
#[command(version, about = "Sui DEX swap client with route quoting and trade metrics")]
struct Args {
    /// Path to config file
    #[arg(long)]
    config: Option<String>,

    /// Sui fullnode RPC URL
    #[arg(long)]
    rpc_url: Option<String>,

    /// Router API base URL
    #[arg(long)]
    router_url: Option<String>,

    /// Wallet address for balances and transaction building
    #[arg(long)]
    wallet_address: Option<String>,

    /// Source token symbol
    #[arg(long, default_value = "SUI")]
    from: String,

    /// Destination token symbol
    #[arg(long, default_value = "CETUS")]
    to: String,

    /// Amount to swap in source-token units, or "max" for the full balance
    #[arg(long)]
    amount: String,

    /// Slippage tolerance in percent
    #[arg(long)]
    slippage: Option<f64>,

    /// Only dry-run the transaction without executing
    #[arg(long)]
    simulate_only: bool,

    /// Swap source and destination tokens before quoting
    #[arg(long)]
    reverse: bool,

    /// Base64 signature for execution; may be passed multiple times
    #[arg(long = "signature")]
    signatures: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();
    let args = Args::parse();

    // Priority: CLI args > config file > defaults
    let mut app_cfg = if let Some(config_path) = &args.config {
        let cfg = config::Config::from_file(config_path)?;
        app::AppCfg::from_config(cfg, args.simulate_only)?
    } else {
        let rpc_url = args
            .rpc_url
            .clone()
            .unwrap_or_else(|| "https://fullnode.mainnet.sui.io:443".to_string());
        let router_url = args
            .router_url
            .clone()
            .unwrap_or_else(|| "https://aftermath.finance/api".to_string());
        app::AppCfg {
            rpc_url,
            router_url,
            wallet_address: None,
            from_symbol: "SUI".to_string(),
            to_symbol: "CETUS".to_string(),
            amount: String::new(),
            slippage_percent: 0.5,
            simulate_only: true,
            signatures: Vec::new(),
            tokens: default_tokens(),
        }
    };

    if let Some(rpc_url) = args.rpc_url {
        app_cfg.rpc_url = rpc_url;
    }
    if let Some(router_url) = args.router_url {
        app_cfg.router_url = router_url;
    }
    if let Some(wallet_address) = args.wallet_address {
        app_cfg.wallet_address = Some(wallet_address);
    }
    if let Some(slippage) = args.slippage {
        app_cfg.slippage_percent = slippage;
    }
    if args.simulate_only {
        app_cfg.simulate_only = true;
    }
    if !args.signatures.is_empty() {
        app_cfg.simulate_only = false;
        app_cfg.signatures = args.signatures;
    }

    app_cfg.amount = args.amount;
    app_cfg.from_symbol = args.from;
    app_cfg.to_symbol = args.to;
    if args.reverse {
        std::mem::swap(&mut app_cfg.from_symbol, &mut app_cfg.to_symbol);
    }

    app::run(app_cfg).await
}

fn default_tokens() -> Vec<config::TokenCfg> {
    vec![
        config::TokenCfg {
            symbol: "SUI".to_string(),
            coin_type: "0x2::sui::SUI".to_string(),
            decimals: Some(9),
        },
        config::TokenCfg {
            symbol: "CETUS".to_string(),
            coin_type:
                "0x06864a6f921804860930db6ddbe2e16acdf8504495ea7481637a1c8b9a8fe54b::cetus::CETUS"
                    .to_string(),
            decimals: Some(9),
        },
    ]
}
