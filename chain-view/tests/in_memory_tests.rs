use chain_view::{
    DaoCoinLimitOrderTxn, ExchangeRateState, GlobalParams, InMemoryUniversalView, NewMessageTxn, NodeStatus,
    TransactionConstructor, UniversalView,
};
use common::error::Error;
use common::model::{
    AccessGroupId, DaoCoinLimitOrderEntry, DmThreadKey, FillType, GroupKeyName, NewMessageEntry,
    NewMessageType, OrderId, OrderOperationType, Pkid, PublicKey,
};
use common::U256;

const KEYS: [&str; 4] = [
    "0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798",
    "02c6047f9441ed7d6d3045406e95c07cd85c778e4b8cef3ca7abac09b95c709ee5",
    "02f9308a019258c31049344f85f89d5229b531c845836f99b08601f113bce036f9",
    "02e493dbf1c10d80f3581e4904930b1404cc6c13900ee0758474fa94abe8c4cd13",
];

fn key(index: usize) -> PublicKey {
    PublicKey::from_bytes(&hex::decode(KEYS[index]).unwrap()).unwrap()
}

fn group(index: usize, name: &str) -> AccessGroupId {
    AccessGroupId::new(key(index), GroupKeyName::from_name(name).unwrap())
}

fn message(from: AccessGroupId, to: AccessGroupId, timestamp_nanos: u64) -> NewMessageEntry {
    NewMessageEntry {
        sender_access_group_owner_public_key: from.owner_public_key,
        sender_access_group_key_name: from.key_name,
        sender_access_group_public_key: from.owner_public_key,
        recipient_access_group_owner_public_key: to.owner_public_key,
        recipient_access_group_key_name: to.key_name,
        recipient_access_group_public_key: to.owner_public_key,
        encrypted_text: format!("msg-{}", timestamp_nanos).into_bytes(),
        timestamp_nanos,
        extra_data: Vec::new(),
    }
}

fn order(id: u8, transactor: Pkid, buying: Pkid, selling: Pkid) -> DaoCoinLimitOrderEntry {
    DaoCoinLimitOrderEntry {
        order_id: OrderId([id; 32]),
        transactor_pkid: transactor,
        buying_dao_coin_creator_pkid: buying,
        selling_dao_coin_creator_pkid: selling,
        scaled_exchange_rate_coins_to_sell_per_coin_to_buy: U256::exp10(38),
        quantity_to_fill_in_base_units: U256::from(100u64),
        operation_type: 2,
        fill_type: 1,
        block_height: id as u32,
    }
}

#[tokio::test]
async fn test_pkid_defaults_to_public_key() {
    let view = InMemoryUniversalView::new();
    let pkid = view.get_pkid_for_public_key(&key(0)).await.unwrap();
    assert_eq!(pkid, Pkid::from(key(0)));
    assert_eq!(view.get_public_key_for_pkid(&pkid).await.unwrap(), key(0));

    view.set_pkid(key(1), Pkid::from(key(2)));
    assert_eq!(view.get_pkid_for_public_key(&key(1)).await.unwrap(), Pkid::from(key(2)));
}

#[tokio::test]
async fn test_unknown_pkid_not_found() {
    let view = InMemoryUniversalView::new();
    let result = view.get_public_key_for_pkid(&Pkid::ZERO).await;
    assert!(matches!(result, Err(Error::NotFound(_))));
}

#[tokio::test]
async fn test_username_lookup_is_case_insensitive() {
    let view = InMemoryUniversalView::new();
    view.register_username("Alice", key(0));
    assert_eq!(view.get_public_key_for_username("alice").await.unwrap(), Some(key(0)));
    assert_eq!(view.get_public_key_for_username("bob").await.unwrap(), None);
}

#[tokio::test]
async fn test_orders_by_pair_and_transactor() {
    let view = InMemoryUniversalView::new();
    let alice = Pkid::from(key(0));
    let creator = Pkid::from(key(1));

    view.insert_order(order(1, alice, creator, Pkid::ZERO));
    view.insert_order(order(2, alice, Pkid::ZERO, creator));
    view.insert_order(order(3, Pkid::from(key(2)), creator, Pkid::ZERO));

    let buying_creator = view.get_dao_coin_limit_orders(&creator, &Pkid::ZERO).await.unwrap();
    assert_eq!(buying_creator.len(), 2);
    assert_eq!(buying_creator[0].order_id, OrderId([1; 32]));

    let by_alice = view.get_transactor_dao_coin_limit_orders(&alice).await.unwrap();
    assert_eq!(by_alice.len(), 2);
}

#[tokio::test]
async fn test_balances_default_to_zero() {
    let view = InMemoryUniversalView::new();
    assert_eq!(view.get_native_balance_nanos(&key(0)).await.unwrap(), 0);
    assert!(view
        .get_dao_coin_balance(&Pkid::from(key(0)), &Pkid::from(key(1)))
        .await
        .unwrap()
        .is_zero());

    view.set_dao_coin_balance(Pkid::from(key(0)), Pkid::from(key(1)), U256::from(42u64));
    assert_eq!(
        view.get_dao_coin_balance(&Pkid::from(key(0)), &Pkid::from(key(1))).await.unwrap(),
        U256::from(42u64)
    );
}

#[tokio::test]
async fn test_dm_pagination_is_newest_first_and_exclusive() {
    let view = InMemoryUniversalView::new();
    let alice = group(0, "default");
    let bob = group(1, "default");
    for ts in [10, 20, 30, 40] {
        view.insert_dm_message(message(alice, bob, ts));
    }
    view.insert_dm_message(message(bob, alice, 25));

    // bob's perspective reaches the same thread
    let thread = DmThreadKey::new(bob, alice);
    let page = view.get_paginated_dm_messages(&thread, 40, 3).await.unwrap();
    let stamps: Vec<u64> = page.iter().map(|m| m.timestamp_nanos).collect();
    assert_eq!(stamps, vec![30, 25, 20]);
}

#[tokio::test]
async fn test_dm_threads_are_seen_from_user_side() {
    let view = InMemoryUniversalView::new();
    view.insert_dm_message(message(group(0, "default"), group(1, "default"), 5));
    view.insert_dm_message(message(group(2, "default"), group(0, "default"), 6));

    let threads = view.get_dm_threads(&key(0)).await.unwrap();
    assert_eq!(threads.len(), 2);
    assert!(threads.iter().all(|t| t.user_group.owner_public_key == key(0)));
    assert!(view.get_dm_threads(&key(3)).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_group_chat_threads_include_owned_and_joined() {
    let view = InMemoryUniversalView::new();
    let owned = group(0, "builders");
    let joined = group(1, "readers");
    view.set_access_group(owned, key(2));
    view.set_access_group(joined, key(3));
    view.add_group_member(key(0), joined);
    view.add_group_member(key(0), joined);

    let groups = view.get_group_chat_threads(&key(0)).await.unwrap();
    assert_eq!(groups.len(), 2);
    assert!(groups.contains(&owned));
    assert!(groups.contains(&joined));
}

#[tokio::test]
async fn test_node_status_defaults_ready() {
    let view = InMemoryUniversalView::new();
    assert!(view.node_status().await.unwrap().is_ready());

    view.set_node_status(NodeStatus {
        block_tip_height: 5,
        is_fully_current: true,
        has_processed_first_transaction_bundle: false,
    })
    .await;
    assert!(!view.node_status().await.unwrap().is_ready());
}

#[tokio::test]
async fn test_exchange_rate_state() {
    let view = InMemoryUniversalView::new();
    assert_eq!(view.usd_cents_per_bitcoin().await.unwrap(), 0);
    assert_eq!(
        view.global_params().await.unwrap().deflation_bomb_block_height,
        u64::MAX
    );

    view.set_exchange_rate_state(ExchangeRateState {
        usd_cents_per_bitcoin: 3_000_000,
        nanos_purchased: 42,
        usd_cents_per_unit_reserve_rate: 1_000,
        buy_fee_basis_points: 150,
    })
    .await;
    assert_eq!(view.usd_cents_per_bitcoin().await.unwrap(), 3_000_000);
    assert_eq!(view.nanos_purchased().await.unwrap(), 42);
    assert_eq!(view.usd_cents_per_unit_reserve_rate().await.unwrap(), 1_000);
    assert_eq!(view.buy_fee_basis_points().await.unwrap(), 150);
}

#[tokio::test]
async fn test_limit_order_txn_charges_fee() {
    let view = InMemoryUniversalView::new();
    view.set_native_balance(key(0), 1_000_000);
    let txn = DaoCoinLimitOrderTxn {
        transactor_public_key: key(0),
        buying_dao_coin_creator_pkid: Pkid::from(key(1)),
        selling_dao_coin_creator_pkid: Pkid::ZERO,
        scaled_exchange_rate_coins_to_sell_per_coin_to_buy: U256::exp10(38),
        quantity_to_fill_in_base_units: U256::from(10u64),
        operation_type: OrderOperationType::Bid,
        fill_type: FillType::GoodTillCancelled,
        cancel_order_id: None,
    };

    let constructed = view.create_dao_coin_limit_order_txn(&txn, 0).await.unwrap();
    assert!(constructed.fee_nanos > 0);
    assert_eq!(constructed.total_input_nanos, 1_000_000);
    assert_eq!(constructed.change_amount_nanos, 1_000_000 - constructed.fee_nanos);
    assert!(!constructed.transaction_hex.is_empty());
}

#[tokio::test]
async fn test_message_txn_requires_fee_balance() {
    let view = InMemoryUniversalView::new();
    view.set_global_params(GlobalParams {
        minimum_network_fee_nanos_per_kb: 5_000,
        ..GlobalParams::default()
    })
    .await;
    let txn = NewMessageTxn {
        message: message(group(0, "default"), group(1, "default"), 1),
        message_type: NewMessageType::Dm,
    };

    let result = view.create_new_message_txn(&txn, 0).await;
    assert!(matches!(result, Err(Error::InsufficientBalance(_))));
}
