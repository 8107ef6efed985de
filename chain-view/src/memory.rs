//! In-memory chain view for the development server and tests

use async_trait::async_trait;
use common::error::{Error, IntoError, Result};
use common::model::{
    AccessGroupId, DaoCoinLimitOrderEntry, DmThreadKey, NewMessageEntry, OrderId, Pkid, PublicKey,
};
use common::U256;
use dashmap::DashMap;
use serde::Serialize;
use serde_json::json;
use tokio::sync::RwLock;
use tracing::debug;

use crate::constructor::{
    ConstructedTransaction, DaoCoinLimitOrderTxn, NewMessageTxn, TransactionConstructor,
};
use crate::view::{GlobalParams, NodeStatus, UniversalView};

/// Chain state held in concurrent maps
#[derive(Default)]
pub struct InMemoryUniversalView {
    /// PKIDs by owning public key
    pub pkids: DashMap<PublicKey, Pkid>,
    /// Owning public keys by PKID
    pub public_keys: DashMap<Pkid, PublicKey>,
    /// Profile owners by lowercase username
    pub usernames: DashMap<String, PublicKey>,
    pub orders: DashMap<OrderId, DaoCoinLimitOrderEntry>,
    pub native_balances: DashMap<PublicKey, u64>,
    /// DAO-coin balances by (holder, creator)
    pub dao_coin_balances: DashMap<(Pkid, Pkid), U256>,
    pub access_groups: DashMap<AccessGroupId, PublicKey>,
    /// Group chats each member belongs to
    pub group_memberships: DashMap<PublicKey, Vec<AccessGroupId>>,
    /// DM messages by canonical thread
    pub dm_messages: DashMap<(AccessGroupId, AccessGroupId), Vec<NewMessageEntry>>,
    pub group_chat_messages: DashMap<AccessGroupId, Vec<NewMessageEntry>>,
    status: RwLock<NodeStatus>,
    params: RwLock<GlobalParams>,
    exchange: RwLock<ExchangeRateState>,
}

/// Exchange-rate inputs kept in global state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExchangeRateState {
    pub usd_cents_per_bitcoin: u64,
    pub nanos_purchased: u64,
    pub usd_cents_per_unit_reserve_rate: u64,
    pub buy_fee_basis_points: u64,
}

impl InMemoryUniversalView {
    /// Create an empty view reporting a fully synced node
    pub fn new() -> Self {
        Self {
            status: RwLock::new(NodeStatus {
                block_tip_height: 0,
                is_fully_current: true,
                has_processed_first_transaction_bundle: true,
            }),
            ..Self::default()
        }
    }

    /// Assign a PKID to a public key, replacing any previous owner mapping
    pub fn set_pkid(&self, public_key: PublicKey, pkid: Pkid) {
        self.pkids.insert(public_key, pkid);
        self.public_keys.insert(pkid, public_key);
    }

    pub fn register_username(&self, username: &str, public_key: PublicKey) {
        self.usernames.insert(username.to_lowercase(), public_key);
    }

    pub fn insert_order(&self, order: DaoCoinLimitOrderEntry) {
        debug!(order_id = %order.order_id, "Inserting limit order");
        self.orders.insert(order.order_id, order);
    }

    pub fn set_native_balance(&self, public_key: PublicKey, balance_nanos: u64) {
        self.native_balances.insert(public_key, balance_nanos);
    }

    pub fn set_dao_coin_balance(&self, holder: Pkid, creator: Pkid, balance: U256) {
        self.dao_coin_balances.insert((holder, creator), balance);
    }

    pub fn set_access_group(&self, group: AccessGroupId, group_public_key: PublicKey) {
        self.access_groups.insert(group, group_public_key);
    }

    pub fn add_group_member(&self, member: PublicKey, group: AccessGroupId) {
        let mut groups = self.group_memberships.entry(member).or_default();
        if !groups.contains(&group) {
            groups.push(group);
        }
    }

    pub fn insert_dm_message(&self, message: NewMessageEntry) {
        let thread = DmThreadKey::new(message.sender_group(), message.recipient_group());
        self.dm_messages.entry(thread.canonical()).or_default().push(message);
    }

    pub fn insert_group_chat_message(&self, message: NewMessageEntry) {
        self.group_chat_messages
            .entry(message.recipient_group())
            .or_default()
            .push(message);
    }

    pub async fn set_node_status(&self, status: NodeStatus) {
        *self.status.write().await = status;
    }

    pub async fn set_global_params(&self, params: GlobalParams) {
        *self.params.write().await = params;
    }

    pub async fn set_exchange_rate_state(&self, state: ExchangeRateState) {
        *self.exchange.write().await = state;
    }

    async fn build_transaction(
        &self,
        transactor: &PublicKey,
        txn_type: &str,
        metadata: serde_json::Value,
        min_fee_rate_nanos_per_kb: u64,
    ) -> Result<ConstructedTransaction> {
        let params = *self.params.read().await;
        let fee_rate = min_fee_rate_nanos_per_kb.max(params.minimum_network_fee_nanos_per_kb);

        let unsigned = UnsignedTransaction {
            txn_type,
            public_key: transactor.to_string(),
            metadata,
        };
        let bytes = serde_json::to_vec(&unsigned)?;
        let size = u64::try_from(bytes.len()).map_err(|e| e.into_error("transaction size"))?;
        let fee_nanos = size
            .checked_mul(fee_rate)
            .ok_or_else(|| Error::Overflow(format!("fee for {} bytes at {} nanos/KB", size, fee_rate)))?
            .div_ceil(1_000);

        let balance = self.native_balances.get(transactor).map(|b| *b).unwrap_or(0);
        if balance < fee_nanos {
            return Err(Error::InsufficientBalance(format!(
                "fee of {} nanos exceeds balance of {} nanos",
                fee_nanos, balance
            )));
        }

        Ok(ConstructedTransaction {
            transaction_hex: hex::encode(bytes),
            total_input_nanos: balance,
            change_amount_nanos: balance - fee_nanos,
            fee_nanos,
        })
    }
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct UnsignedTransaction<'a> {
    txn_type: &'a str,
    public_key: String,
    metadata: serde_json::Value,
}

fn newest_before(
    messages: &[NewMessageEntry],
    start_timestamp_nanos: u64,
    max_messages: usize,
) -> Vec<NewMessageEntry> {
    let mut older: Vec<NewMessageEntry> = messages
        .iter()
        .filter(|m| m.timestamp_nanos < start_timestamp_nanos)
        .cloned()
        .collect();
    older.sort_by(|a, b| b.timestamp_nanos.cmp(&a.timestamp_nanos));
    older.truncate(max_messages);
    older
}

#[async_trait]
impl UniversalView for InMemoryUniversalView {
    async fn get_pkid_for_public_key(&self, public_key: &PublicKey) -> Result<Pkid> {
        Ok(self
            .pkids
            .get(public_key)
            .map(|p| *p)
            .unwrap_or_else(|| Pkid::from(*public_key)))
    }

    async fn get_public_key_for_pkid(&self, pkid: &Pkid) -> Result<PublicKey> {
        if let Some(public_key) = self.public_keys.get(pkid) {
            return Ok(*public_key);
        }
        PublicKey::from_bytes(pkid.as_bytes())
            .map_err(|_| Error::NotFound(format!("no public key for PKID {}", pkid)))
    }

    async fn get_public_key_for_username(&self, username: &str) -> Result<Option<PublicKey>> {
        Ok(self.usernames.get(&username.to_lowercase()).map(|p| *p))
    }

    async fn get_dao_coin_limit_orders(
        &self,
        buying: &Pkid,
        selling: &Pkid,
    ) -> Result<Vec<DaoCoinLimitOrderEntry>> {
        let mut orders: Vec<DaoCoinLimitOrderEntry> = self
            .orders
            .iter()
            .filter(|entry| entry.value().is_same_pair(buying, selling))
            .map(|entry| entry.value().clone())
            .collect();
        orders.sort_by_key(|o| (o.block_height, o.order_id));
        Ok(orders)
    }

    async fn get_transactor_dao_coin_limit_orders(
        &self,
        transactor: &Pkid,
    ) -> Result<Vec<DaoCoinLimitOrderEntry>> {
        let mut orders: Vec<DaoCoinLimitOrderEntry> = self
            .orders
            .iter()
            .filter(|entry| entry.value().transactor_pkid == *transactor)
            .map(|entry| entry.value().clone())
            .collect();
        orders.sort_by_key(|o| (o.block_height, o.order_id));
        Ok(orders)
    }

    async fn get_native_balance_nanos(&self, public_key: &PublicKey) -> Result<u64> {
        Ok(self.native_balances.get(public_key).map(|b| *b).unwrap_or(0))
    }

    async fn get_dao_coin_balance(&self, holder: &Pkid, creator: &Pkid) -> Result<U256> {
        Ok(self
            .dao_coin_balances
            .get(&(*holder, *creator))
            .map(|b| *b)
            .unwrap_or_default())
    }

    async fn get_access_group_public_key(&self, group: &AccessGroupId) -> Result<Option<PublicKey>> {
        Ok(self.access_groups.get(group).map(|k| *k))
    }

    async fn get_dm_threads(&self, user: &PublicKey) -> Result<Vec<DmThreadKey>> {
        let threads = self
            .dm_messages
            .iter()
            .filter_map(|entry| {
                let (first, second) = *entry.key();
                if first.owner_public_key == *user {
                    Some(DmThreadKey::new(first, second))
                } else if second.owner_public_key == *user {
                    Some(DmThreadKey::new(second, first))
                } else {
                    None
                }
            })
            .collect();
        Ok(threads)
    }

    async fn get_group_chat_threads(&self, user: &PublicKey) -> Result<Vec<AccessGroupId>> {
        let mut groups: Vec<AccessGroupId> = self
            .access_groups
            .iter()
            .map(|entry| *entry.key())
            .filter(|group| group.owner_public_key == *user)
            .collect();
        if let Some(memberships) = self.group_memberships.get(user) {
            groups.extend(memberships.iter().copied());
        }
        groups.sort();
        groups.dedup();
        Ok(groups)
    }

    async fn get_paginated_dm_messages(
        &self,
        thread: &DmThreadKey,
        start_timestamp_nanos: u64,
        max_messages: usize,
    ) -> Result<Vec<NewMessageEntry>> {
        Ok(self
            .dm_messages
            .get(&thread.canonical())
            .map(|messages| newest_before(&messages, start_timestamp_nanos, max_messages))
            .unwrap_or_default())
    }

    async fn get_paginated_group_chat_messages(
        &self,
        group: &AccessGroupId,
        start_timestamp_nanos: u64,
        max_messages: usize,
    ) -> Result<Vec<NewMessageEntry>> {
        Ok(self
            .group_chat_messages
            .get(group)
            .map(|messages| newest_before(&messages, start_timestamp_nanos, max_messages))
            .unwrap_or_default())
    }

    async fn node_status(&self) -> Result<NodeStatus> {
        Ok(*self.status.read().await)
    }

    async fn global_params(&self) -> Result<GlobalParams> {
        Ok(*self.params.read().await)
    }

    async fn usd_cents_per_bitcoin(&self) -> Result<u64> {
        Ok(self.exchange.read().await.usd_cents_per_bitcoin)
    }

    async fn nanos_purchased(&self) -> Result<u64> {
        Ok(self.exchange.read().await.nanos_purchased)
    }

    async fn usd_cents_per_unit_reserve_rate(&self) -> Result<u64> {
        Ok(self.exchange.read().await.usd_cents_per_unit_reserve_rate)
    }

    async fn buy_fee_basis_points(&self) -> Result<u64> {
        Ok(self.exchange.read().await.buy_fee_basis_points)
    }
}

#[async_trait]
impl TransactionConstructor for InMemoryUniversalView {
    async fn create_dao_coin_limit_order_txn(
        &self,
        order: &DaoCoinLimitOrderTxn,
        min_fee_rate_nanos_per_kb: u64,
    ) -> Result<ConstructedTransaction> {
        let metadata = json!({
            "BuyingDAOCoinCreatorPKID": order.buying_dao_coin_creator_pkid.to_string(),
            "SellingDAOCoinCreatorPKID": order.selling_dao_coin_creator_pkid.to_string(),
            "ScaledExchangeRateCoinsToSellPerCoinToBuy": order.scaled_exchange_rate_coins_to_sell_per_coin_to_buy.to_string(),
            "QuantityToFillInBaseUnits": order.quantity_to_fill_in_base_units.to_string(),
            "OperationType": order.operation_type.as_u8(),
            "FillType": order.fill_type.as_u8(),
            "CancelOrderID": order.cancel_order_id.map(|id| id.to_string()),
        });
        self.build_transaction(
            &order.transactor_public_key,
            "DAO_COIN_LIMIT_ORDER",
            metadata,
            min_fee_rate_nanos_per_kb,
        )
        .await
    }

    async fn create_new_message_txn(
        &self,
        message: &NewMessageTxn,
        min_fee_rate_nanos_per_kb: u64,
    ) -> Result<ConstructedTransaction> {
        let entry = &message.message;
        let metadata = json!({
            "SenderAccessGroupOwnerPublicKey": entry.sender_access_group_owner_public_key.to_string(),
            "SenderAccessGroupKeyName": entry.sender_access_group_key_name.to_hex(),
            "SenderAccessGroupPublicKey": entry.sender_access_group_public_key.to_string(),
            "RecipientAccessGroupOwnerPublicKey": entry.recipient_access_group_owner_public_key.to_string(),
            "RecipientAccessGroupKeyName": entry.recipient_access_group_key_name.to_hex(),
            "RecipientAccessGroupPublicKey": entry.recipient_access_group_public_key.to_string(),
            "EncryptedText": hex::encode(&entry.encrypted_text),
            "TimestampNanos": entry.timestamp_nanos,
            "NewMessageType": format!("{:?}", message.message_type),
        });
        self.build_transaction(
            &entry.sender_access_group_owner_public_key,
            "NEW_MESSAGE",
            metadata,
            min_fee_rate_nanos_per_kb,
        )
        .await
    }
}
