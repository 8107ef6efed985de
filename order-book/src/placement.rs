//! Limit-order placement inputs and result

use chain_view::ConstructedTransaction;
use common::error::{Error, Result};
use common::exchange::{
    compute_base_unit_quantity, format_float_as_decimal_string, scaled_exchange_rate_from_float,
    scaled_exchange_rate_from_price, U256,
};
use common::model::{CoinPair, OrderOperationType};
use serde::{Deserialize, Serialize};
#[cfg(feature = "utoipa")]
use utoipa::ToSchema;

/// A request to place a limit order, before any identifier is resolved
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LimitOrderPlacement {
    /// Public key or username of the transactor
    pub transactor: String,
    /// Creator public key of the coin to buy, or `"DESO"`
    pub buying_coin: String,
    /// Creator public key of the coin to sell, or `"DESO"`
    pub selling_coin: String,
    pub operation_type: String,
    pub fill_type: String,
    /// Decimal price; takes precedence over the float rate
    pub price: Option<String>,
    pub exchange_rate_coins_to_sell_per_coin_to_buy: Option<f64>,
    /// Decimal quantity; takes precedence over the float quantity
    pub quantity: Option<String>,
    pub quantity_to_fill: Option<f64>,
    pub min_fee_rate_nanos_per_kb: u64,
}

impl LimitOrderPlacement {
    /// Scaled rate from the decimal price, or the deprecated float rate when
    /// no price is given.
    pub fn scaled_exchange_rate(&self, pair: &CoinPair, operation: OrderOperationType) -> Result<U256> {
        match non_empty(&self.price) {
            Some(price) => scaled_exchange_rate_from_price(pair, price, operation),
            None => match self.exchange_rate_coins_to_sell_per_coin_to_buy {
                Some(rate) => scaled_exchange_rate_from_float(pair, rate),
                None => Err(Error::ValidationError(
                    "either Price or ExchangeRateCoinsToSellPerCoinToBuy is required".to_string(),
                )),
            },
        }
    }

    /// Quantity in base units from the decimal quantity, or the deprecated
    /// float quantity when none is given. Zero is rejected.
    pub fn quantity_in_base_units(&self, pair: &CoinPair, operation: OrderOperationType) -> Result<U256> {
        let quantity = match non_empty(&self.quantity) {
            Some(quantity) => compute_base_unit_quantity(pair, operation, quantity)?,
            None => match self.quantity_to_fill {
                Some(quantity) => {
                    let formatted = format_float_as_decimal_string(quantity)?;
                    compute_base_unit_quantity(pair, operation, &formatted)?
                }
                None => {
                    return Err(Error::ValidationError(
                        "either Quantity or QuantityToFill is required".to_string(),
                    ))
                }
            },
        };

        if quantity.is_zero() {
            return Err(Error::ValidationError("quantity must be greater than zero".to_string()));
        }
        Ok(quantity)
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// The unsigned limit-order transaction returned to the client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
#[serde(rename_all = "PascalCase")]
pub struct DaoCoinLimitOrderResponse {
    pub total_input_nanos: u64,
    pub change_amount_nanos: u64,
    pub fee_nanos: u64,
    pub transaction_hex: String,
}

impl From<ConstructedTransaction> for DaoCoinLimitOrderResponse {
    fn from(txn: ConstructedTransaction) -> Self {
        Self {
            total_input_nanos: txn.total_input_nanos,
            change_amount_nanos: txn.change_amount_nanos,
            fee_nanos: txn.fee_nanos,
            transaction_hex: txn.transaction_hex,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::model::CoinSide;

    fn pair() -> CoinPair {
        CoinPair::new(CoinSide::dao_coin("creator"), CoinSide::Native).unwrap()
    }

    #[test]
    fn test_price_takes_precedence_over_float() {
        let placement = LimitOrderPlacement {
            price: Some("2".to_string()),
            exchange_rate_coins_to_sell_per_coin_to_buy: Some(9.0),
            ..Default::default()
        };
        let from_price = placement.scaled_exchange_rate(&pair(), OrderOperationType::Bid).unwrap();
        let expected = scaled_exchange_rate_from_price(&pair(), "2", OrderOperationType::Bid).unwrap();
        assert_eq!(from_price, expected);
    }

    #[test]
    fn test_float_rate_used_when_price_empty() {
        let placement = LimitOrderPlacement {
            price: Some("  ".to_string()),
            exchange_rate_coins_to_sell_per_coin_to_buy: Some(2.0),
            ..Default::default()
        };
        let rate = placement.scaled_exchange_rate(&pair(), OrderOperationType::Ask).unwrap();
        assert_eq!(rate, scaled_exchange_rate_from_float(&pair(), 2.0).unwrap());
    }

    #[test]
    fn test_missing_rate_rejected() {
        let placement = LimitOrderPlacement::default();
        assert!(matches!(
            placement.scaled_exchange_rate(&pair(), OrderOperationType::Bid),
            Err(Error::ValidationError(_))
        ));
    }

    #[test]
    fn test_quantity_from_float_and_zero() {
        let placement = LimitOrderPlacement {
            quantity_to_fill: Some(2.5),
            ..Default::default()
        };
        // ask selling native fills nanos
        assert_eq!(
            placement.quantity_in_base_units(&pair(), OrderOperationType::Ask).unwrap(),
            U256::from(2_500_000_000u64)
        );

        let zero = LimitOrderPlacement {
            quantity: Some("0.0".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            zero.quantity_in_base_units(&pair(), OrderOperationType::Ask),
            Err(Error::ValidationError(_))
        ));
    }
}
