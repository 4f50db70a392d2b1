//! Trade route modeling and metrics

pub mod metrics;
pub mod types;

pub use metrics::calculate_trade_metrics;
pub use types::{SubRoute, TradeMetrics, TradeRoute};
