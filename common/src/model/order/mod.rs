//! DAO-coin limit-order models

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::exchange::{base_units_to_sell, U256};
use crate::model::Pkid;
#[cfg(feature = "utoipa")]
use crate::utoipa::ToSchema;

/// Order side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
pub enum OrderOperationType {
    /// Sell the selling coin, quantity denominated in the selling coin
    #[serde(rename = "ASK")]
    Ask,
    /// Buy the buying coin, quantity denominated in the buying coin
    #[serde(rename = "BID")]
    Bid,
}

impl OrderOperationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderOperationType::Ask => "ASK",
            OrderOperationType::Bid => "BID",
        }
    }

    /// On-chain encoding
    pub fn as_u8(&self) -> u8 {
        match self {
            OrderOperationType::Ask => 1,
            OrderOperationType::Bid => 2,
        }
    }
}

impl FromStr for OrderOperationType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "ASK" => Ok(OrderOperationType::Ask),
            "BID" => Ok(OrderOperationType::Bid),
            other => Err(Error::UnknownEnumValue(format!("unknown operation type '{}'", other))),
        }
    }
}

impl TryFrom<u8> for OrderOperationType {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            1 => Ok(OrderOperationType::Ask),
            2 => Ok(OrderOperationType::Bid),
            other => Err(Error::UnknownEnumValue(format!("unknown operation type {}", other))),
        }
    }
}

impl fmt::Display for OrderOperationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Order fill policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FillType {
    /// Rests on the book until filled or cancelled
    GoodTillCancelled,
    /// Fills what it can immediately, the rest is cancelled
    ImmediateOrCancel,
    /// Fills entirely immediately or not at all
    FillOrKill,
}

impl FillType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FillType::GoodTillCancelled => "GOOD_TILL_CANCELLED",
            FillType::ImmediateOrCancel => "IMMEDIATE_OR_CANCEL",
            FillType::FillOrKill => "FILL_OR_KILL",
        }
    }

    /// On-chain encoding
    pub fn as_u8(&self) -> u8 {
        match self {
            FillType::GoodTillCancelled => 1,
            FillType::ImmediateOrCancel => 2,
            FillType::FillOrKill => 3,
        }
    }
}

impl FromStr for FillType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "GOOD_TILL_CANCELLED" => Ok(FillType::GoodTillCancelled),
            "IMMEDIATE_OR_CANCEL" => Ok(FillType::ImmediateOrCancel),
            "FILL_OR_KILL" => Ok(FillType::FillOrKill),
            other => Err(Error::UnknownEnumValue(format!("unknown fill type '{}'", other))),
        }
    }
}

impl TryFrom<u8> for FillType {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            1 => Ok(FillType::GoodTillCancelled),
            2 => Ok(FillType::ImmediateOrCancel),
            3 => Ok(FillType::FillOrKill),
            other => Err(Error::UnknownEnumValue(format!("unknown fill type {}", other))),
        }
    }
}

impl fmt::Display for FillType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Hash of the transaction that placed an order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OrderId(pub [u8; 32]);

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

/// An open limit order as recorded on chain
///
/// The operation and fill types are kept as raw bytes since historical
/// entries may carry values this node does not recognize.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DaoCoinLimitOrderEntry {
    pub order_id: OrderId,
    pub transactor_pkid: Pkid,
    /// Zero PKID for the native coin
    pub buying_dao_coin_creator_pkid: Pkid,
    /// Zero PKID for the native coin
    pub selling_dao_coin_creator_pkid: Pkid,
    pub scaled_exchange_rate_coins_to_sell_per_coin_to_buy: U256,
    pub quantity_to_fill_in_base_units: U256,
    pub operation_type: u8,
    pub fill_type: u8,
    pub block_height: u32,
}

impl DaoCoinLimitOrderEntry {
    pub fn operation(&self) -> Result<OrderOperationType> {
        OrderOperationType::try_from(self.operation_type)
    }

    pub fn fill(&self) -> Result<FillType> {
        FillType::try_from(self.fill_type)
    }

    pub fn is_same_pair(&self, buying: &Pkid, selling: &Pkid) -> bool {
        self.buying_dao_coin_creator_pkid == *buying && self.selling_dao_coin_creator_pkid == *selling
    }

    /// Base units of the selling coin this order can still consume.
    pub fn base_units_to_sell(&self) -> Result<U256> {
        match self.operation()? {
            OrderOperationType::Ask => Ok(self.quantity_to_fill_in_base_units),
            OrderOperationType::Bid => base_units_to_sell(
                self.scaled_exchange_rate_coins_to_sell_per_coin_to_buy,
                self.quantity_to_fill_in_base_units,
            ),
        }
    }
}
