//! Universal view trait

use async_trait::async_trait;
use common::error::Result;
use common::model::{
    AccessGroupId, DaoCoinLimitOrderEntry, DmThreadKey, NewMessageEntry, Pkid, PublicKey,
};
use common::U256;

/// Sync state of the node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NodeStatus {
    pub block_tip_height: u32,
    /// Blockchain caught up with its peers
    pub is_fully_current: bool,
    /// The mempool has processed the first bundle of unmined transactions
    pub has_processed_first_transaction_bundle: bool,
}

impl NodeStatus {
    pub fn is_ready(&self) -> bool {
        self.is_fully_current && self.has_processed_first_transaction_bundle
    }
}

/// Chain-wide parameters set by governance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlobalParams {
    pub create_profile_fee_nanos: u64,
    pub minimum_network_fee_nanos_per_kb: u64,
    /// Height after which diamonds are worth a tenth of their launch value
    pub deflation_bomb_block_height: u64,
}

impl Default for GlobalParams {
    fn default() -> Self {
        Self {
            create_profile_fee_nanos: 0,
            minimum_network_fee_nanos_per_kb: 1_000,
            deflation_bomb_block_height: u64::MAX,
        }
    }
}

/// Read interface over the indexed chain state plus mempool
#[async_trait]
pub trait UniversalView: Send + Sync {
    /// PKID currently owned by a public key. Keys without a profile map to
    /// themselves.
    async fn get_pkid_for_public_key(&self, public_key: &PublicKey) -> Result<Pkid>;

    /// Public key currently owning a PKID
    async fn get_public_key_for_pkid(&self, pkid: &Pkid) -> Result<PublicKey>;

    /// Public key of the profile registered under a username, if any
    async fn get_public_key_for_username(&self, username: &str) -> Result<Option<PublicKey>>;

    /// Open orders buying `buying` and selling `selling`. The zero PKID is
    /// the native coin.
    async fn get_dao_coin_limit_orders(
        &self,
        buying: &Pkid,
        selling: &Pkid,
    ) -> Result<Vec<DaoCoinLimitOrderEntry>>;

    /// Every open order placed by a transactor
    async fn get_transactor_dao_coin_limit_orders(
        &self,
        transactor: &Pkid,
    ) -> Result<Vec<DaoCoinLimitOrderEntry>>;

    /// Spendable native balance in nanos
    async fn get_native_balance_nanos(&self, public_key: &PublicKey) -> Result<u64>;

    /// DAO-coin balance in base units of the coin created by `creator`
    async fn get_dao_coin_balance(&self, holder: &Pkid, creator: &Pkid) -> Result<U256>;

    /// Current public key of an access group, if it exists
    async fn get_access_group_public_key(&self, group: &AccessGroupId) -> Result<Option<PublicKey>>;

    /// Every DM thread a user's access groups participate in
    async fn get_dm_threads(&self, user: &PublicKey) -> Result<Vec<DmThreadKey>>;

    /// Every group chat a user owns or is a member of
    async fn get_group_chat_threads(&self, user: &PublicKey) -> Result<Vec<AccessGroupId>>;

    /// Messages of a DM thread strictly older than `start_timestamp_nanos`,
    /// newest first, at most `max_messages`
    async fn get_paginated_dm_messages(
        &self,
        thread: &DmThreadKey,
        start_timestamp_nanos: u64,
        max_messages: usize,
    ) -> Result<Vec<NewMessageEntry>>;

    /// Messages of a group chat strictly older than `start_timestamp_nanos`,
    /// newest first, at most `max_messages`
    async fn get_paginated_group_chat_messages(
        &self,
        group: &AccessGroupId,
        start_timestamp_nanos: u64,
        max_messages: usize,
    ) -> Result<Vec<NewMessageEntry>>;

    async fn node_status(&self) -> Result<NodeStatus>;

    async fn global_params(&self) -> Result<GlobalParams>;

    /// Bitcoin price applied by the mempool
    async fn usd_cents_per_bitcoin(&self) -> Result<u64>;

    /// Native nanos sold by the bitcoin burn so far
    async fn nanos_purchased(&self) -> Result<u64>;

    /// Floor price of the native coin recorded in global state
    async fn usd_cents_per_unit_reserve_rate(&self) -> Result<u64>;

    /// Fee charged when buying the native coin, in basis points
    async fn buy_fee_basis_points(&self) -> Result<u64>;
}
