//! Sui DEX swap client
//!
//! Orchestrates a token swap around external collaborators: a routing
//! service for best-execution quotes and transaction construction, and a
//! fullnode for balances and submission. The crate's own logic is the
//! decimal-safe amount formatting and the trade-metrics computation.

pub mod app;
pub mod config;
pub mod numeric;
pub mod router;
pub mod shared;
pub mod trade;
pub mod wallet;

// Re-export main types for convenience
pub use numeric::{DecimalFormatter, FormatConfig};
pub use router::{AftermathClient, Quote, QuoteProvider, TransactionBuilder};
pub use trade::{calculate_trade_metrics, SubRoute, TradeMetrics, TradeRoute};
pub use wallet::{BalanceReader, SuiRpcClient};
