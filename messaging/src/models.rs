//! Messaging request and response models

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[cfg(feature = "utoipa")]
use utoipa::ToSchema;

/// A DM or group-chat message to be wrapped in a new-message transaction
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
#[serde(rename_all = "PascalCase", default)]
pub struct SendMessageRequest {
    /// Must match the key that signs the transaction
    pub sender_access_group_owner_public_key_base58_check: String,
    pub sender_access_group_public_key_base58_check: String,
    pub sender_access_group_key_name: String,
    pub recipient_access_group_owner_public_key_base58_check: String,
    pub recipient_access_group_public_key_base58_check: String,
    pub recipient_access_group_key_name: String,
    /// Hex-encoded ciphertext
    pub encrypted_message_text: String,
    #[serde(rename = "MinFeeRateNanosPerKB")]
    pub min_fee_rate_nanos_per_kb: u64,
    pub extra_data: BTreeMap<String, String>,
}

/// Unsigned new-message transaction and its timestamp
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
#[serde(rename_all = "PascalCase")]
pub struct SendMessageResponse {
    pub tstamp_nanos: u64,
    pub total_input_nanos: u64,
    pub change_amount_nanos: u64,
    pub fee_nanos: u64,
    pub transaction_hex: String,
}

/// Lists the threads of one owner
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
#[serde(rename_all = "PascalCase", default)]
pub struct GetUserThreadsRequest {
    pub owner_public_key_base58_check: String,
}

/// One side of a thread
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
#[serde(rename_all = "PascalCase")]
pub struct AccessGroupInfo {
    pub owner_public_key_base58_check: String,
    /// Empty when the group's key is unknown to the node
    pub access_group_public_key_base58_check: String,
    /// Hex-encoded group name
    pub access_group_key_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
#[serde(rename_all = "PascalCase")]
pub struct DmMessageInfo {
    /// Hex-encoded ciphertext
    pub encrypted_text: String,
    pub timestamp_nanos: u64,
}

/// A message together with the groups it travelled between
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
#[serde(rename_all = "PascalCase")]
pub struct ThreadMessage {
    pub sender_info: AccessGroupInfo,
    pub recipient_info: AccessGroupInfo,
    pub message_info: DmMessageInfo,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
#[serde(rename_all = "PascalCase")]
pub struct GetUserDmResponse {
    /// Latest message of each DM thread, newest first
    pub dm_threads: Vec<ThreadMessage>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
#[serde(rename_all = "PascalCase")]
pub struct GetUserGroupChatResponse {
    /// Latest message of each group chat, newest first
    pub group_chat_threads: Vec<ThreadMessage>,
}

/// One page of a DM thread seen from the user's group
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
#[serde(rename_all = "PascalCase", default)]
pub struct GetPaginatedMessagesForDmThreadRequest {
    pub user_group_owner_public_key_base58_check: String,
    pub user_group_key_name: String,
    pub party_group_owner_public_key_base58_check: String,
    pub party_group_key_name: String,
    /// Only messages strictly older than this are returned. Zero means now.
    pub start_time_stamp: u64,
    pub max_messages_to_fetch: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
#[serde(rename_all = "PascalCase")]
pub struct GetPaginatedMessagesForDmResponse {
    pub sender_info: AccessGroupInfo,
    pub recipient_info: AccessGroupInfo,
    /// Newest first
    pub message_info: Vec<DmMessageInfo>,
}

/// One page of a group chat
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
#[serde(rename_all = "PascalCase", default)]
pub struct GetPaginatedMessagesForGroupChatThreadRequest {
    pub access_group_owner_public_key_base58_check: String,
    pub access_group_key_name: String,
    /// Only messages strictly older than this are returned. Zero means now.
    pub start_time_stamp: u64,
    pub max_messages_to_fetch: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
#[serde(rename_all = "PascalCase")]
pub struct GetPaginatedMessagesForGroupChatThreadResponse {
    /// Newest first
    pub group_chat_messages: Vec<ThreadMessage>,
}
