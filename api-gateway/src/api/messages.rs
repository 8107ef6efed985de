//! Access-group messaging handlers

use std::sync::Arc;

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use messaging::{
    GetPaginatedMessagesForDmResponse, GetPaginatedMessagesForDmThreadRequest,
    GetPaginatedMessagesForGroupChatThreadRequest, GetPaginatedMessagesForGroupChatThreadResponse,
    GetUserDmResponse, GetUserGroupChatResponse, GetUserThreadsRequest, SendMessageRequest,
    SendMessageResponse,
};

use crate::api::parse_body;
use crate::error::ApiError;
use crate::AppState;

/// Build an unsigned direct-message transaction
#[utoipa::path(
    post,
    path = "/api/v0/send-dm-message",
    request_body = SendMessageRequest,
    responses(
        (status = 200, description = "Unsigned transaction", body = SendMessageResponse),
        (status = 400, description = "Invalid access groups or message")
    ),
    tag = "messages"
)]
pub async fn send_dm_message(
    State(state): State<Arc<AppState>>,
    body: Result<Json<SendMessageRequest>, JsonRejection>,
) -> Result<Json<SendMessageResponse>, ApiError> {
    let request = parse_body(body)?;
    Ok(Json(state.messaging.send_dm_message(&request).await?))
}

/// Build an unsigned group-chat message transaction
#[utoipa::path(
    post,
    path = "/api/v0/send-group-chat-message",
    request_body = SendMessageRequest,
    responses(
        (status = 200, description = "Unsigned transaction", body = SendMessageResponse),
        (status = 400, description = "Invalid access groups or message")
    ),
    tag = "messages"
)]
pub async fn send_group_chat_message(
    State(state): State<Arc<AppState>>,
    body: Result<Json<SendMessageRequest>, JsonRejection>,
) -> Result<Json<SendMessageResponse>, ApiError> {
    let request = parse_body(body)?;
    Ok(Json(state.messaging.send_group_chat_message(&request).await?))
}

/// Latest message of each DM thread, newest first
#[utoipa::path(
    post,
    path = "/api/v0/get-user-dm-threads-ordered-by-timestamp",
    request_body = GetUserThreadsRequest,
    responses(
        (status = 200, description = "DM threads", body = GetUserDmResponse),
        (status = 400, description = "Invalid owner public key")
    ),
    tag = "messages"
)]
pub async fn get_user_dm_threads_ordered_by_timestamp(
    State(state): State<Arc<AppState>>,
    body: Result<Json<GetUserThreadsRequest>, JsonRejection>,
) -> Result<Json<GetUserDmResponse>, ApiError> {
    let request = parse_body(body)?;
    let threads = state
        .messaging
        .get_user_dm_threads_ordered_by_timestamp(&request.owner_public_key_base58_check)
        .await?;
    Ok(Json(threads))
}

/// One page of a DM thread
#[utoipa::path(
    post,
    path = "/api/v0/get-paginated-messages-for-dm-thread",
    request_body = GetPaginatedMessagesForDmThreadRequest,
    responses(
        (status = 200, description = "Messages, newest first", body = GetPaginatedMessagesForDmResponse),
        (status = 400, description = "Invalid thread or page size")
    ),
    tag = "messages"
)]
pub async fn get_paginated_messages_for_dm_thread(
    State(state): State<Arc<AppState>>,
    body: Result<Json<GetPaginatedMessagesForDmThreadRequest>, JsonRejection>,
) -> Result<Json<GetPaginatedMessagesForDmResponse>, ApiError> {
    let request = parse_body(body)?;
    Ok(Json(state.messaging.get_paginated_messages_for_dm_thread(&request).await?))
}

/// Latest message of each group chat, newest first
#[utoipa::path(
    post,
    path = "/api/v0/get-user-group-chat-threads-ordered-by-timestamp",
    request_body = GetUserThreadsRequest,
    responses(
        (status = 200, description = "Group chats", body = GetUserGroupChatResponse),
        (status = 400, description = "Invalid owner public key")
    ),
    tag = "messages"
)]
pub async fn get_user_group_chat_threads_ordered_by_timestamp(
    State(state): State<Arc<AppState>>,
    body: Result<Json<GetUserThreadsRequest>, JsonRejection>,
) -> Result<Json<GetUserGroupChatResponse>, ApiError> {
    let request = parse_body(body)?;
    let threads = state
        .messaging
        .get_user_group_chat_threads_ordered_by_timestamp(&request.owner_public_key_base58_check)
        .await?;
    Ok(Json(threads))
}

/// One page of a group chat
#[utoipa::path(
    post,
    path = "/api/v0/get-paginated-messages-for-group-chat-thread",
    request_body = GetPaginatedMessagesForGroupChatThreadRequest,
    responses(
        (status = 200, description = "Messages, newest first", body = GetPaginatedMessagesForGroupChatThreadResponse),
        (status = 400, description = "Invalid group or page size")
    ),
    tag = "messages"
)]
pub async fn get_paginated_messages_for_group_chat_thread(
    State(state): State<Arc<AppState>>,
    body: Result<Json<GetPaginatedMessagesForGroupChatThreadRequest>, JsonRejection>,
) -> Result<Json<GetPaginatedMessagesForGroupChatThreadResponse>, ApiError> {
    let request = parse_body(body)?;
    Ok(Json(
        state
            .messaging
            .get_paginated_messages_for_group_chat_thread(&request)
            .await?,
    ))
}
