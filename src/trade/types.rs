//! Trade route and metrics types

use serde::{Deserialize, Serialize};

/// One candidate liquidity path within a quote
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubRoute {
    /// Output amount in smallest units
    pub output_amount: u128,
    /// Instantaneous exchange rate quoted by this path
    pub spot_price: f64,
    /// Venue label reported by the router, if any
    pub provider: Option<String>,
}

/// Immutable snapshot of one quote from the routing service.
///
/// Produced once per quote request and superseded by the next quote;
/// nothing here is mutated after construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeRoute {
    /// Total input amount in smallest units
    pub coin_in_amount: u128,
    /// Total output amount across all sub-routes, smallest units
    pub coin_out_amount: u128,
    /// Candidate paths; the router guarantees at least one
    pub sub_routes: Vec<SubRoute>,
    /// Spot price of the best sub-route as quoted by the router
    pub spot_price: f64,
    /// Net trade fee as a fraction in [0, 1)
    pub net_fee_percentage: f64,
    /// When the quote was fetched
    pub fetched_at: chrono::DateTime<chrono::Utc>,
}

/// Derived, read-only metrics for one quote
#[derive(Debug, Clone, PartialEq)]
pub struct TradeMetrics {
    /// The sub-route with the greatest output amount
    pub best_route: SubRoute,
    /// Signed percentage with 4 fractional digits and a trailing `%`.
    ///
    /// Measures the aggregate blended price against the best single
    /// sub-route's spot price (route dispersion), not quoted-vs-filled
    /// execution slippage.
    pub slippage: String,
    /// Guaranteed minimum output after fees, smallest units
    pub min_receive_units: u128,
    /// `min_receive_units` normalized to display decimals
    pub min_receive: String,
}
