//! Wire types for the routing service API

use serde::Deserialize;

use crate::shared::errors::QuoteError;
use crate::trade::types::{SubRoute, TradeRoute};

/// A coin amount as the router serializes it: amounts travel as decimal
/// strings because they routinely exceed what a JSON number can carry.
#[derive(Debug, Clone, Deserialize)]
pub struct CoinAmountWire {
    #[serde(rename = "type")]
    pub coin_type: String,
    pub amount: String,
}

/// One candidate path in the router response
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubRouteWire {
    pub coin_out: CoinAmountWire,
    pub spot_price: f64,
    #[serde(default)]
    pub protocol_name: Option<String>,
}

/// Complete trade route as returned by the router
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteRouteWire {
    pub coin_in: CoinAmountWire,
    pub coin_out: CoinAmountWire,
    pub spot_price: f64,
    pub net_trade_fee_percentage: f64,
    pub routes: Vec<SubRouteWire>,
}

/// Error descriptor the router returns instead of a route
#[derive(Debug, Clone, Deserialize)]
pub struct RouterErrorWire {
    pub error: String,
}

/// Route-or-error response body.
///
/// The error variant is listed first so a bare `{"error": ...}` body
/// never half-matches the route shape.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RouteResponseWire {
    Error(RouterErrorWire),
    Route(Box<CompleteRouteWire>),
}

/// Transaction-construction response: a success flag carrying either
/// submittable transaction bytes or an error message.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildTransactionWire {
    pub success: bool,
    #[serde(default)]
    pub transaction: Option<TransactionBytesWire>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionBytesWire {
    /// Base64-encoded transaction block, ready for an external signer
    pub tx_bytes: String,
}

/// USD price info per coin type
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoinPriceWire {
    pub price: f64,
    #[serde(default)]
    pub price_change24_hours_percentage: f64,
}

fn parse_amount(wire: &CoinAmountWire) -> Result<u128, QuoteError> {
    wire.amount
        .parse::<u128>()
        .map_err(|_| QuoteError::InvalidAmount(wire.amount.clone()))
}

impl CompleteRouteWire {
    /// Convert the wire payload into the domain quote snapshot
    pub fn into_trade_route(self) -> Result<TradeRoute, QuoteError> {
        let coin_in_amount = parse_amount(&self.coin_in)?;
        let coin_out_amount = parse_amount(&self.coin_out)?;

        let sub_routes = self
            .routes
            .iter()
            .map(|route| {
                Ok(SubRoute {
                    output_amount: parse_amount(&route.coin_out)?,
                    spot_price: route.spot_price,
                    provider: route.protocol_name.clone(),
                })
            })
            .collect::<Result<Vec<_>, QuoteError>>()?;

        Ok(TradeRoute {
            coin_in_amount,
            coin_out_amount,
            sub_routes,
            spot_price: self.spot_price,
            net_fee_percentage: self.net_trade_fee_percentage,
            fetched_at: chrono::Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decodes_route_payload() {
        let body = r#"{
            "coinIn": {"type": "0x2::sui::SUI", "amount": "1000000000"},
            "coinOut": {"type": "0xc8::cetus::CETUS", "amount": "18446744073709551616"},
            "spotPrice": 18.44,
            "netTradeFeePercentage": 0.003,
            "routes": [
                {"coinOut": {"type": "0xc8::cetus::CETUS", "amount": "18446744073709551616"},
                 "spotPrice": 18.44,
                 "protocolName": "Cetus"}
            ]
        }"#;

        let wire: RouteResponseWire = serde_json::from_str(body).unwrap();
        let route = match wire {
            RouteResponseWire::Route(route) => route.into_trade_route().unwrap(),
            RouteResponseWire::Error(err) => panic!("unexpected error: {}", err.error),
        };

        assert_eq!(route.coin_in_amount, 1_000_000_000);
        // Amount above u64::MAX survives the string encoding.
        assert_eq!(route.coin_out_amount, 18_446_744_073_709_551_616);
        assert_eq!(route.sub_routes.len(), 1);
        assert_eq!(route.sub_routes[0].provider.as_deref(), Some("Cetus"));
        assert_eq!(route.net_fee_percentage, 0.003);
    }

    #[test]
    fn test_decodes_error_descriptor() {
        let body = r#"{"error": "Not enough liquidity"}"#;
        let wire: RouteResponseWire = serde_json::from_str(body).unwrap();
        match wire {
            RouteResponseWire::Error(err) => assert_eq!(err.error, "Not enough liquidity"),
            RouteResponseWire::Route(_) => panic!("expected error descriptor"),
        }
    }

    #[test]
    fn test_rejects_malformed_amount() {
        let wire = CoinAmountWire {
            coin_type: "0x2::sui::SUI".to_string(),
            amount: "1.5".to_string(),
        };
        assert!(matches!(
            parse_amount(&wire),
            Err(QuoteError::InvalidAmount(_))
        ));
    }
}
