//! Common types used across the application

use serde::{Deserialize, Serialize};

/// Token representation
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    /// Fully-qualified coin type, e.g. "0x2::sui::SUI"
    pub coin_type: String,
    pub symbol: String,
    pub decimals: u8,
    pub name: Option<String>,
}

impl Token {
    pub fn new(coin_type: impl Into<String>, symbol: impl Into<String>, decimals: u8) -> Self {
        Self {
            coin_type: coin_type.into(),
            symbol: symbol.into(),
            decimals,
            name: None,
        }
    }
}
