//! Best-route selection and user-facing risk metrics

use crate::numeric::DecimalFormatter;
use crate::shared::errors::RouteError;

use super::types::{TradeMetrics, TradeRoute};

/// Select the best sub-route of a quote and derive slippage and the
/// minimum-receive guarantee after fees.
///
/// `decimals` is the destination token's decimal exponent, used to
/// normalize the minimum-receive amount for display.
pub fn calculate_trade_metrics(
    route: &TradeRoute,
    decimals: u8,
    formatter: &DecimalFormatter,
) -> Result<TradeMetrics, RouteError> {
    let first = route.sub_routes.first().ok_or(RouteError::EmptyRoutes)?;
    if route.coin_in_amount == 0 {
        return Err(RouteError::ZeroInputAmount);
    }

    // Strictly-greater comparison keeps the first-seen sub-route on ties.
    let best_route = route.sub_routes.iter().fold(first, |best, candidate| {
        if candidate.output_amount > best.output_amount {
            candidate
        } else {
            best
        }
    });

    // Integers are promoted to floating point only for this ratio; the
    // amounts themselves never pass through f64.
    let expected_price = route.coin_out_amount as f64 / route.coin_in_amount as f64;
    let actual_price = best_route.spot_price;
    let slippage = (expected_price - actual_price) / expected_price * 100.0;

    let fee_multiplier = fee_multiplier(route.net_fee_percentage);
    let min_receive_units = best_route
        .output_amount
        .checked_mul(u128::from(fee_multiplier))
        .ok_or(RouteError::OutputOverflow)?
        / 10_000;
    let min_receive = formatter.format_units(min_receive_units, decimals);

    Ok(TradeMetrics {
        best_route: best_route.clone(),
        slippage: format!("{:.4}%", slippage),
        min_receive_units,
        min_receive,
    })
}

/// Basis-point multiplier for the net fee, clamped to [0, 10000].
///
/// The router's contract bounds the fee to [0, 1); out-of-range values
/// are clamped rather than rejected.
fn fee_multiplier(net_fee_percentage: f64) -> u32 {
    let multiplier = ((1.0 - net_fee_percentage) * 10_000.0).round();
    multiplier.clamp(0.0, 10_000.0) as u32
}
