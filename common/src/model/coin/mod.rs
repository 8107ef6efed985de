//! Coin identities and trading pairs

use std::fmt;

use crate::error::{Error, Result};

/// Identifier clients use to name the native coin instead of a creator key
pub const NATIVE_COIN_IDENTIFIER: &str = "DESO";

/// One side of a trading pair
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CoinSide {
    /// The chain's native coin, denominated in nanos
    Native,
    /// A DAO coin, identified by its creator's public key or username
    DaoCoin(String),
}

impl CoinSide {
    pub fn dao_coin(creator: impl Into<String>) -> Self {
        CoinSide::DaoCoin(creator.into())
    }

    /// Parses a request identifier. `"DESO"` and the empty string name the
    /// native coin.
    pub fn from_identifier(identifier: &str) -> Self {
        let identifier = identifier.trim();
        if identifier.is_empty() || identifier == NATIVE_COIN_IDENTIFIER {
            CoinSide::Native
        } else {
            CoinSide::DaoCoin(identifier.to_string())
        }
    }

    pub fn identifier(&self) -> &str {
        match self {
            CoinSide::Native => NATIVE_COIN_IDENTIFIER,
            CoinSide::DaoCoin(creator) => creator,
        }
    }

    pub fn is_native(&self) -> bool {
        matches!(self, CoinSide::Native)
    }
}

impl fmt::Display for CoinSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.identifier())
    }
}

/// The coin an order buys and the coin it sells
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CoinPair {
    pub buying: CoinSide,
    pub selling: CoinSide,
}

impl CoinPair {
    /// Builds a pair, rejecting one that trades the native coin for itself.
    pub fn new(buying: CoinSide, selling: CoinSide) -> Result<Self> {
        if buying.is_native() && selling.is_native() {
            return Err(Error::ValidationError(
                "a pair cannot buy and sell the native coin".to_string(),
            ));
        }
        Ok(Self { buying, selling })
    }

    pub fn from_identifiers(buying: &str, selling: &str) -> Result<Self> {
        Self::new(CoinSide::from_identifier(buying), CoinSide::from_identifier(selling))
    }
}

impl fmt::Display for CoinPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.buying, self.selling)
    }
}
