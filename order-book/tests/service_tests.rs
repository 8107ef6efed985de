use std::sync::Arc;

use chain_view::InMemoryUniversalView;
use common::error::Error;
use common::exchange::scaled_exchange_rate_from_price;
use common::model::{
    CoinPair, CoinSide, DaoCoinLimitOrderEntry, Network, OrderId, OrderOperationType, Pkid,
    PublicKey,
};
use common::U256;
use order_book::{LimitOrderPlacement, OrderBookService};

const KEYS: [&str; 3] = [
    "0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798",
    "02c6047f9441ed7d6d3045406e95c07cd85c778e4b8cef3ca7abac09b95c709ee5",
    "02f9308a019258c31049344f85f89d5229b531c845836f99b08601f113bce036f9",
];
const BASE58: [&str; 3] = [
    "BC1YLgbVFc5DfB5NtFtrZZ7AhqNqEknVFkq8GqG721es666NmqS9hbB",
    "BC1YLhB5ZisuPHVxSohGoEryNHSpkWacYWjZ3fZhqjdNbGuM4VcrLSC",
    "BC1YLhZcgjh12MphuB5oU792XtGUHUrseWUZKMHMTZdtYfszZgBeBUz",
];

fn key(index: usize) -> PublicKey {
    PublicKey::from_bytes(&hex::decode(KEYS[index]).unwrap()).unwrap()
}

fn pkid(index: usize) -> Pkid {
    Pkid::from(key(index))
}

fn setup() -> (Arc<InMemoryUniversalView>, OrderBookService) {
    let view = Arc::new(InMemoryUniversalView::new());
    let service = OrderBookService::new(view.clone(), view.clone(), Network::Mainnet);
    (view, service)
}

fn order(
    id: u8,
    transactor: Pkid,
    buying: Pkid,
    selling: Pkid,
    operation_type: u8,
    rate: U256,
    quantity: U256,
) -> DaoCoinLimitOrderEntry {
    DaoCoinLimitOrderEntry {
        order_id: OrderId([id; 32]),
        transactor_pkid: transactor,
        buying_dao_coin_creator_pkid: buying,
        selling_dao_coin_creator_pkid: selling,
        scaled_exchange_rate_coins_to_sell_per_coin_to_buy: rate,
        quantity_to_fill_in_base_units: quantity,
        operation_type,
        fill_type: 1,
        block_height: id as u32,
    }
}

fn bid_for_native(price: &str, quantity: &str) -> LimitOrderPlacement {
    LimitOrderPlacement {
        transactor: BASE58[0].to_string(),
        buying_coin: "DESO".to_string(),
        selling_coin: BASE58[1].to_string(),
        operation_type: "BID".to_string(),
        fill_type: "GOOD_TILL_CANCELLED".to_string(),
        price: Some(price.to_string()),
        quantity: Some(quantity.to_string()),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_listing_returns_both_directions_and_skips_bad_entries() {
    let (view, service) = setup();
    let creator = CoinSide::dao_coin(BASE58[1]);

    let dao_for_native = CoinPair::new(creator.clone(), CoinSide::Native).unwrap();
    let bid_rate = scaled_exchange_rate_from_price(&dao_for_native, "0.5", OrderOperationType::Bid).unwrap();
    view.insert_order(order(1, pkid(2), pkid(1), Pkid::ZERO, 2, bid_rate, U256::exp10(18)));
    view.insert_order(order(2, pkid(2), pkid(1), Pkid::ZERO, 9, bid_rate, U256::exp10(18)));

    let native_for_dao = CoinPair::new(CoinSide::Native, creator).unwrap();
    let ask_rate = scaled_exchange_rate_from_price(&native_for_dao, "2", OrderOperationType::Ask).unwrap();
    view.insert_order(order(3, pkid(2), Pkid::ZERO, pkid(1), 1, ask_rate, U256::exp10(18)));

    let orders = service.get_dao_coin_limit_orders(BASE58[1], "DESO").await.unwrap();
    assert_eq!(orders.len(), 2);

    assert_eq!(orders[0].order_id, OrderId([1; 32]).to_string());
    assert_eq!(orders[0].transactor_public_key_base58_check, BASE58[2]);
    assert_eq!(orders[0].buying_dao_coin_creator_public_key_base58_check, BASE58[1]);
    assert_eq!(orders[0].selling_dao_coin_creator_public_key_base58_check, "DESO");
    assert_eq!(orders[0].price, format!("0.5{}", "0".repeat(37)));
    assert_eq!(orders[0].quantity, "1.0");

    assert_eq!(orders[1].order_id, OrderId([3; 32]).to_string());
    assert_eq!(orders[1].operation_type, OrderOperationType::Ask);
    assert_eq!(orders[1].price, "2.0");
    assert_eq!(orders[1].quantity, "1.0");
}

#[tokio::test]
async fn test_listing_rejects_native_pair() {
    let (_view, service) = setup();
    let result = service.get_dao_coin_limit_orders("DESO", "DESO").await;
    assert!(matches!(result, Err(Error::ValidationError(_))));
}

#[tokio::test]
async fn test_listing_rejects_bad_key() {
    let (_view, service) = setup();
    let result = service.get_dao_coin_limit_orders("not-a-key", "DESO").await;
    assert!(matches!(result, Err(Error::InvalidPublicKey(_))));
}

#[tokio::test]
async fn test_transactor_listing_names_native_coin() {
    let (view, service) = setup();
    view.insert_order(order(4, pkid(0), Pkid::ZERO, pkid(1), 1, U256::exp10(38), U256::exp10(18)));
    view.insert_order(order(5, pkid(1), Pkid::ZERO, pkid(2), 1, U256::exp10(38), U256::exp10(18)));

    let orders = service.get_transactor_dao_coin_limit_orders(BASE58[0]).await.unwrap();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].transactor_public_key_base58_check, BASE58[0]);
    assert_eq!(orders[0].buying_dao_coin_creator_public_key_base58_check, "DESO");
    assert_eq!(orders[0].selling_dao_coin_creator_public_key_base58_check, BASE58[1]);
}

#[tokio::test]
async fn test_transactor_listing_accepts_username() {
    let (view, service) = setup();
    view.register_username("alice", key(0));
    view.insert_order(order(6, pkid(0), pkid(1), Pkid::ZERO, 2, U256::exp10(29), U256::exp10(18)));

    let orders = service.get_transactor_dao_coin_limit_orders("Alice").await.unwrap();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].transactor_public_key_base58_check, BASE58[0]);
}

#[tokio::test]
async fn test_create_order_with_exact_balance() {
    let (view, service) = setup();
    view.set_native_balance(key(0), 1_000_000_000);
    // 2 creator coins per native coin for 1.5 native coins
    view.set_dao_coin_balance(pkid(0), pkid(1), U256::from(3u64) * U256::exp10(18));

    let response = service
        .create_dao_coin_limit_order(&bid_for_native("2", "1.5"))
        .await
        .unwrap();
    assert!(response.fee_nanos > 0);
    assert_eq!(response.total_input_nanos, 1_000_000_000);
    assert!(!response.transaction_hex.is_empty());
}

#[tokio::test]
async fn test_create_order_counts_open_orders_on_same_pair() {
    let (view, service) = setup();
    view.set_native_balance(key(0), 1_000_000_000);
    view.set_dao_coin_balance(pkid(0), pkid(1), U256::from(3u64) * U256::exp10(18));
    view.insert_order(order(7, pkid(0), Pkid::ZERO, pkid(1), 1, U256::exp10(38), U256::one()));
    // a different pair does not count
    view.insert_order(order(8, pkid(0), pkid(2), pkid(1), 1, U256::exp10(38), U256::exp10(30)));

    let result = service.create_dao_coin_limit_order(&bid_for_native("2", "1.5")).await;
    assert!(matches!(result, Err(Error::InsufficientBalance(_))));
}

#[tokio::test]
async fn test_create_order_rejects_unknown_operation() {
    let (_view, service) = setup();
    let mut placement = bid_for_native("2", "1.5");
    placement.operation_type = "HOLD".to_string();
    let result = service.create_dao_coin_limit_order(&placement).await;
    assert!(matches!(result, Err(Error::UnknownEnumValue(_))));
}

#[tokio::test]
async fn test_create_order_rejects_zero_quantity() {
    let (_view, service) = setup();
    let result = service.create_dao_coin_limit_order(&bid_for_native("2", "0")).await;
    assert!(matches!(result, Err(Error::ValidationError(_))));
}

#[tokio::test]
async fn test_create_order_rejects_same_coin() {
    let (_view, service) = setup();
    let mut placement = bid_for_native("2", "1");
    placement.buying_coin = BASE58[1].to_string();
    let result = service.create_dao_coin_limit_order(&placement).await;
    assert!(matches!(result, Err(Error::ValidationError(_))));
}

#[tokio::test]
async fn test_create_order_rejects_tiny_price_selling_native() {
    let (view, service) = setup();
    view.set_native_balance(key(0), u64::MAX);
    let placement = LimitOrderPlacement {
        transactor: BASE58[0].to_string(),
        buying_coin: BASE58[1].to_string(),
        selling_coin: "DESO".to_string(),
        operation_type: "BID".to_string(),
        fill_type: "FILL_OR_KILL".to_string(),
        price: Some("0.000000000000000000000000000000000001".to_string()),
        quantity: Some("1".to_string()),
        ..Default::default()
    };
    let result = service.create_dao_coin_limit_order(&placement).await;
    assert!(matches!(result, Err(Error::Underflow(_))));
}
