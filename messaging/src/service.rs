//! Messaging service over the chain view

use std::sync::Arc;

use chain_view::{NewMessageTxn, TransactionConstructor, UniversalView};
use chrono::Utc;
use common::error::{Error, ErrorExt, Result};
use common::model::{AccessGroupId, DmThreadKey, Network, NewMessageEntry, NewMessageType};
use tracing::{debug, info};

use crate::models::{
    AccessGroupInfo, DmMessageInfo, GetPaginatedMessagesForDmResponse,
    GetPaginatedMessagesForDmThreadRequest, GetPaginatedMessagesForGroupChatThreadRequest,
    GetPaginatedMessagesForGroupChatThreadResponse, GetUserDmResponse, GetUserGroupChatResponse,
    SendMessageRequest, SendMessageResponse, ThreadMessage,
};
use crate::validate::{decode_and_validate_public_key, validate_access_group_public_key_and_name};

/// Sends and reads access-group messages
pub struct MessagingService {
    view: Arc<dyn UniversalView>,
    constructor: Arc<dyn TransactionConstructor>,
    network: Network,
}

impl MessagingService {
    /// Create a new messaging service
    pub fn new(
        view: Arc<dyn UniversalView>,
        constructor: Arc<dyn TransactionConstructor>,
        network: Network,
    ) -> Self {
        Self {
            view,
            constructor,
            network,
        }
    }

    /// Builds a direct-message transaction between two different owners
    pub async fn send_dm_message(&self, request: &SendMessageRequest) -> Result<SendMessageResponse> {
        self.send_message(request, NewMessageType::Dm).await
    }

    /// Builds a message transaction addressed to a group chat
    pub async fn send_group_chat_message(
        &self,
        request: &SendMessageRequest,
    ) -> Result<SendMessageResponse> {
        self.send_message(request, NewMessageType::GroupChat).await
    }

    async fn send_message(
        &self,
        request: &SendMessageRequest,
        message_type: NewMessageType,
    ) -> Result<SendMessageResponse> {
        let sender = validate_access_group_public_key_and_name(
            &request.sender_access_group_owner_public_key_base58_check,
            &request.sender_access_group_key_name,
        )
        .with_context(|| "invalid sender access group")?;
        let recipient = validate_access_group_public_key_and_name(
            &request.recipient_access_group_owner_public_key_base58_check,
            &request.recipient_access_group_key_name,
        )
        .with_context(|| "invalid recipient access group")?;

        if message_type == NewMessageType::Dm && sender.owner_public_key == recipient.owner_public_key {
            return Err(Error::ValidationError(format!(
                "dm sender and recipient cannot be the same: {}",
                request.sender_access_group_owner_public_key_base58_check
            )));
        }

        let sender_group_key =
            decode_and_validate_public_key(&request.sender_access_group_public_key_base58_check)
                .with_context(|| "invalid SenderAccessGroupPublicKeyBase58Check")?;
        let recipient_group_key =
            decode_and_validate_public_key(&request.recipient_access_group_public_key_base58_check)
                .with_context(|| "invalid RecipientAccessGroupPublicKeyBase58Check")?;

        let encrypted_text = hex::decode(request.encrypted_message_text.trim()).map_err(|e| {
            Error::InvalidFormat(format!("EncryptedMessageText is not hex: {}", e))
        })?;
        if encrypted_text.is_empty() {
            return Err(Error::ValidationError(
                "EncryptedMessageText cannot be empty".to_string(),
            ));
        }

        let timestamp_nanos = now_nanos()?;
        let message = NewMessageEntry {
            sender_access_group_owner_public_key: sender.owner_public_key,
            sender_access_group_key_name: sender.key_name,
            sender_access_group_public_key: sender_group_key,
            recipient_access_group_owner_public_key: recipient.owner_public_key,
            recipient_access_group_key_name: recipient.key_name,
            recipient_access_group_public_key: recipient_group_key,
            encrypted_text,
            timestamp_nanos,
            extra_data: request
                .extra_data
                .iter()
                .map(|(key, value)| (key.clone(), value.as_bytes().to_vec()))
                .collect(),
        };

        let constructed = self
            .constructor
            .create_new_message_txn(
                &NewMessageTxn {
                    message,
                    message_type,
                },
                request.min_fee_rate_nanos_per_kb,
            )
            .await?;

        info!(
            message_type = ?message_type,
            sender = %sender.key_name,
            recipient = %recipient.key_name,
            fee_nanos = constructed.fee_nanos,
            "Constructed new message"
        );
        Ok(SendMessageResponse {
            tstamp_nanos: timestamp_nanos,
            total_input_nanos: constructed.total_input_nanos,
            change_amount_nanos: constructed.change_amount_nanos,
            fee_nanos: constructed.fee_nanos,
            transaction_hex: constructed.transaction_hex,
        })
    }

    /// Latest message of every DM thread the owner takes part in, newest
    /// first. Threads without messages are left out.
    pub async fn get_user_dm_threads_ordered_by_timestamp(
        &self,
        owner: &str,
    ) -> Result<GetUserDmResponse> {
        let owner = decode_and_validate_public_key(owner)
            .with_context(|| "invalid OwnerPublicKeyBase58Check")?;

        let threads = self.view.get_dm_threads(&owner).await?;
        let mut latest = Vec::with_capacity(threads.len());
        for thread in &threads {
            if let Some(message) = self
                .view
                .get_paginated_dm_messages(thread, u64::MAX, 1)
                .await?
                .into_iter()
                .next()
            {
                latest.push(message);
            }
        }
        debug!("Found {} DM threads, {} with messages", threads.len(), latest.len());

        Ok(GetUserDmResponse {
            dm_threads: self.newest_first(latest),
        })
    }

    /// Latest message of every group chat the owner owns or belongs to,
    /// newest first. Chats without messages are left out.
    pub async fn get_user_group_chat_threads_ordered_by_timestamp(
        &self,
        owner: &str,
    ) -> Result<GetUserGroupChatResponse> {
        let owner = decode_and_validate_public_key(owner)
            .with_context(|| "invalid OwnerPublicKeyBase58Check")?;

        let groups = self.view.get_group_chat_threads(&owner).await?;
        let mut latest = Vec::with_capacity(groups.len());
        for group in &groups {
            if let Some(message) = self
                .view
                .get_paginated_group_chat_messages(group, u64::MAX, 1)
                .await?
                .into_iter()
                .next()
            {
                latest.push(message);
            }
        }
        debug!("Found {} group chats, {} with messages", groups.len(), latest.len());

        Ok(GetUserGroupChatResponse {
            group_chat_threads: self.newest_first(latest),
        })
    }

    /// One page of a DM thread, newest first
    pub async fn get_paginated_messages_for_dm_thread(
        &self,
        request: &GetPaginatedMessagesForDmThreadRequest,
    ) -> Result<GetPaginatedMessagesForDmResponse> {
        let max_messages = max_messages_to_fetch(request.max_messages_to_fetch)?;
        let user_group = validate_access_group_public_key_and_name(
            &request.user_group_owner_public_key_base58_check,
            &request.user_group_key_name,
        )
        .with_context(|| "invalid user access group")?;
        let party_group = validate_access_group_public_key_and_name(
            &request.party_group_owner_public_key_base58_check,
            &request.party_group_key_name,
        )
        .with_context(|| "invalid party access group")?;

        if user_group.owner_public_key == party_group.owner_public_key {
            return Err(Error::ValidationError(format!(
                "dm user and party cannot be the same: {}",
                request.user_group_owner_public_key_base58_check
            )));
        }

        let thread = DmThreadKey::new(user_group, party_group);
        let messages = self
            .view
            .get_paginated_dm_messages(&thread, start_timestamp(request.start_time_stamp), max_messages)
            .await?;

        Ok(GetPaginatedMessagesForDmResponse {
            sender_info: self.group_info(&user_group).await?,
            recipient_info: self.group_info(&party_group).await?,
            message_info: messages.iter().map(message_info).collect(),
        })
    }

    /// One page of a group chat, newest first
    pub async fn get_paginated_messages_for_group_chat_thread(
        &self,
        request: &GetPaginatedMessagesForGroupChatThreadRequest,
    ) -> Result<GetPaginatedMessagesForGroupChatThreadResponse> {
        let max_messages = max_messages_to_fetch(request.max_messages_to_fetch)?;
        let group = validate_access_group_public_key_and_name(
            &request.access_group_owner_public_key_base58_check,
            &request.access_group_key_name,
        )
        .with_context(|| "invalid access group")?;

        let messages = self
            .view
            .get_paginated_group_chat_messages(&group, start_timestamp(request.start_time_stamp), max_messages)
            .await?;

        Ok(GetPaginatedMessagesForGroupChatThreadResponse {
            group_chat_messages: messages.iter().map(|m| self.thread_message(m)).collect(),
        })
    }

    /// The group as stored by the view, with an empty key when unknown
    async fn group_info(&self, group: &AccessGroupId) -> Result<AccessGroupInfo> {
        let group_public_key = self
            .view
            .get_access_group_public_key(group)
            .await?
            .map(|key| key.to_base58_check(self.network))
            .unwrap_or_default();
        Ok(AccessGroupInfo {
            owner_public_key_base58_check: group.owner_public_key.to_base58_check(self.network),
            access_group_public_key_base58_check: group_public_key,
            access_group_key_name: group.key_name.to_hex(),
        })
    }

    fn newest_first(&self, mut messages: Vec<NewMessageEntry>) -> Vec<ThreadMessage> {
        messages.sort_by(|a, b| b.timestamp_nanos.cmp(&a.timestamp_nanos));
        messages.iter().map(|m| self.thread_message(m)).collect()
    }

    fn thread_message(&self, message: &NewMessageEntry) -> ThreadMessage {
        ThreadMessage {
            sender_info: AccessGroupInfo {
                owner_public_key_base58_check: message
                    .sender_access_group_owner_public_key
                    .to_base58_check(self.network),
                access_group_public_key_base58_check: message
                    .sender_access_group_public_key
                    .to_base58_check(self.network),
                access_group_key_name: message.sender_access_group_key_name.to_hex(),
            },
            recipient_info: AccessGroupInfo {
                owner_public_key_base58_check: message
                    .recipient_access_group_owner_public_key
                    .to_base58_check(self.network),
                access_group_public_key_base58_check: message
                    .recipient_access_group_public_key
                    .to_base58_check(self.network),
                access_group_key_name: message.recipient_access_group_key_name.to_hex(),
            },
            message_info: message_info(message),
        }
    }
}

fn message_info(message: &NewMessageEntry) -> DmMessageInfo {
    DmMessageInfo {
        encrypted_text: hex::encode(&message.encrypted_text),
        timestamp_nanos: message.timestamp_nanos,
    }
}

fn max_messages_to_fetch(requested: i64) -> Result<usize> {
    if requested < 1 {
        return Err(Error::ValidationError(format!(
            "MaxMessagesToFetch cannot be less than 1: {}",
            requested
        )));
    }
    usize::try_from(requested)
        .map_err(|_| Error::ValidationError(format!("MaxMessagesToFetch is too large: {}", requested)))
}

fn start_timestamp(requested: u64) -> u64 {
    if requested == 0 {
        u64::MAX
    } else {
        requested
    }
}

fn now_nanos() -> Result<u64> {
    Utc::now()
        .timestamp_nanos_opt()
        .and_then(|nanos| u64::try_from(nanos).ok())
        .ok_or_else(|| Error::Internal("system clock is outside the nanosecond range".to_string()))
}
