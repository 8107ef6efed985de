//! Transaction construction trait and its inputs

use async_trait::async_trait;
use common::error::Result;
use common::model::{
    FillType, NewMessageEntry, NewMessageType, OrderId, OrderOperationType, Pkid, PublicKey,
};
use common::U256;

/// Inputs of a DAO-coin limit-order transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DaoCoinLimitOrderTxn {
    pub transactor_public_key: PublicKey,
    /// Zero PKID for the native coin
    pub buying_dao_coin_creator_pkid: Pkid,
    /// Zero PKID for the native coin
    pub selling_dao_coin_creator_pkid: Pkid,
    pub scaled_exchange_rate_coins_to_sell_per_coin_to_buy: U256,
    pub quantity_to_fill_in_base_units: U256,
    pub operation_type: OrderOperationType,
    pub fill_type: FillType,
    pub cancel_order_id: Option<OrderId>,
}

/// Inputs of a new-message transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMessageTxn {
    pub message: NewMessageEntry,
    pub message_type: NewMessageType,
}

/// An unsigned transaction ready to be signed by the client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstructedTransaction {
    pub transaction_hex: String,
    pub total_input_nanos: u64,
    pub change_amount_nanos: u64,
    pub fee_nanos: u64,
}

/// Builds typed transactions and prices their fees
#[async_trait]
pub trait TransactionConstructor: Send + Sync {
    async fn create_dao_coin_limit_order_txn(
        &self,
        order: &DaoCoinLimitOrderTxn,
        min_fee_rate_nanos_per_kb: u64,
    ) -> Result<ConstructedTransaction>;

    async fn create_new_message_txn(
        &self,
        message: &NewMessageTxn,
        min_fee_rate_nanos_per_kb: u64,
    ) -> Result<ConstructedTransaction>;
}
