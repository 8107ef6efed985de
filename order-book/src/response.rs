//! Rendering of stored orders for API responses

use common::error::Result;
use common::exchange::{
    exchange_rate_as_float, price_string_from_scaled_rate, quantity_as_float,
    quantity_string_from_base_units,
};
use common::model::{CoinPair, CoinSide, DaoCoinLimitOrderEntry, OrderOperationType};
use serde::{Deserialize, Serialize};
#[cfg(feature = "utoipa")]
use utoipa::ToSchema;

/// An open order as shown to clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
#[serde(rename_all = "PascalCase")]
pub struct DaoCoinLimitOrderEntryResponse {
    pub transactor_public_key_base58_check: String,
    /// `"DESO"` for the native coin
    #[serde(rename = "BuyingDAOCoinCreatorPublicKeyBase58Check")]
    pub buying_dao_coin_creator_public_key_base58_check: String,
    /// `"DESO"` for the native coin
    #[serde(rename = "SellingDAOCoinCreatorPublicKeyBase58Check")]
    pub selling_dao_coin_creator_public_key_base58_check: String,
    /// Decimal price in the orientation the order was placed with
    pub price: String,
    /// Decimal quantity of the coin the operation fills
    pub quantity: String,
    /// Deprecated float form of the stored rate
    pub exchange_rate_coins_to_sell_per_coin_to_buy: f64,
    /// Deprecated float form of the quantity
    pub quantity_to_fill: f64,
    pub operation_type: OrderOperationType,
    #[serde(rename = "OrderID")]
    pub order_id: String,
}

/// Renders one stored order. `buying` and `selling` are the order's coins as
/// client identifiers.
pub fn build_order_response(
    transactor_public_key_base58_check: &str,
    buying: &CoinSide,
    selling: &CoinSide,
    order: &DaoCoinLimitOrderEntry,
) -> Result<DaoCoinLimitOrderEntryResponse> {
    let operation = order.operation()?;
    let pair = CoinPair::new(buying.clone(), selling.clone())?;
    let rate = order.scaled_exchange_rate_coins_to_sell_per_coin_to_buy;
    let quantity = order.quantity_to_fill_in_base_units;

    Ok(DaoCoinLimitOrderEntryResponse {
        transactor_public_key_base58_check: transactor_public_key_base58_check.to_string(),
        buying_dao_coin_creator_public_key_base58_check: buying.identifier().to_string(),
        selling_dao_coin_creator_public_key_base58_check: selling.identifier().to_string(),
        price: price_string_from_scaled_rate(&pair, rate, operation)?,
        quantity: quantity_string_from_base_units(&pair, operation, quantity),
        exchange_rate_coins_to_sell_per_coin_to_buy: exchange_rate_as_float(&pair, rate)?,
        quantity_to_fill: quantity_as_float(&pair, operation, quantity)?,
        operation_type: operation,
        order_id: order.order_id.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::error::Error;
    use common::exchange::scaled_exchange_rate_from_price;
    use common::model::{OrderId, Pkid};
    use common::U256;

    fn entry(operation_type: u8, rate: U256, quantity: U256) -> DaoCoinLimitOrderEntry {
        DaoCoinLimitOrderEntry {
            order_id: OrderId([1u8; 32]),
            transactor_pkid: Pkid::new([2u8; 33]),
            buying_dao_coin_creator_pkid: Pkid::ZERO,
            selling_dao_coin_creator_pkid: Pkid::new([3u8; 33]),
            scaled_exchange_rate_coins_to_sell_per_coin_to_buy: rate,
            quantity_to_fill_in_base_units: quantity,
            operation_type,
            fill_type: 1,
            block_height: 1,
        }
    }

    #[test]
    fn test_bid_buying_native() {
        let buying = CoinSide::Native;
        let selling = CoinSide::dao_coin("creator");
        let pair = CoinPair::new(buying.clone(), selling.clone()).unwrap();
        let rate = scaled_exchange_rate_from_price(&pair, "2.5", OrderOperationType::Bid).unwrap();
        let order = entry(2, rate, U256::from(3_000_000_000u64));

        let response = build_order_response("transactor", &buying, &selling, &order).unwrap();
        assert_eq!(response.price, format!("2.5{}", "0".repeat(37)));
        assert_eq!(response.quantity, "3.0");
        assert_eq!(response.exchange_rate_coins_to_sell_per_coin_to_buy, 2.5);
        assert_eq!(response.quantity_to_fill, 3.0);
        assert_eq!(response.operation_type, OrderOperationType::Bid);
        assert_eq!(response.buying_dao_coin_creator_public_key_base58_check, "DESO");
        assert_eq!(response.order_id, "01".repeat(32));
    }

    #[test]
    fn test_ask_price_shown_as_entered() {
        let buying = CoinSide::Native;
        let selling = CoinSide::dao_coin("creator");
        let pair = CoinPair::new(buying.clone(), selling.clone()).unwrap();
        let rate = scaled_exchange_rate_from_price(&pair, "0.5", OrderOperationType::Ask).unwrap();
        let order = entry(1, rate, U256::exp10(18));

        let response = build_order_response("transactor", &buying, &selling, &order).unwrap();
        assert_eq!(response.price, "0.5".to_string() + &"0".repeat(37));
        assert_eq!(response.quantity, "1.0");
        // stored rate is the inverse of the ask price
        assert_eq!(response.exchange_rate_coins_to_sell_per_coin_to_buy, 2.0);
    }

    #[test]
    fn test_unknown_operation_type_fails() {
        let order = entry(7, U256::exp10(38), U256::one());
        let result = build_order_response(
            "transactor",
            &CoinSide::Native,
            &CoinSide::dao_coin("creator"),
            &order,
        );
        assert!(matches!(result, Err(Error::UnknownEnumValue(_))));
    }

    #[test]
    fn test_zero_rate_ask_fails() {
        let order = entry(1, U256::zero(), U256::one());
        let result = build_order_response(
            "transactor",
            &CoinSide::dao_coin("a"),
            &CoinSide::dao_coin("b"),
            &order,
        );
        assert!(matches!(result, Err(Error::Underflow(_))));
    }

    #[test]
    fn test_serialized_field_names() {
        let buying = CoinSide::dao_coin("a");
        let selling = CoinSide::dao_coin("b");
        let order = entry(2, U256::exp10(38), U256::exp10(18));
        let response = build_order_response("t", &buying, &selling, &order).unwrap();

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["BuyingDAOCoinCreatorPublicKeyBase58Check"], "a");
        assert_eq!(json["SellingDAOCoinCreatorPublicKeyBase58Check"], "b");
        assert_eq!(json["TransactorPublicKeyBase58Check"], "t");
        assert_eq!(json["OperationType"], "BID");
        assert_eq!(json["Price"], "1.0");
        assert!(json.get("OrderID").is_some());
    }
}
