//! HTTP gateway exposing the node's DAO-coin exchange and messaging API

pub mod api;
pub mod config;
pub mod error;

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use chain_view::{TransactionConstructor, UniversalView};
use messaging::MessagingService;
use order_book::OrderBookService;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{dao_coin, messages, node};
use crate::config::AppConfig;

/// API documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Node routes
        api::node::index,
        api::node::health_check,
        api::node::get_app_state,
        api::node::get_exchange_rate,
        // DAO coin routes
        api::dao_coin::get_dao_coin_limit_orders,
        api::dao_coin::get_transactor_dao_coin_limit_orders,
        api::dao_coin::create_dao_coin_limit_order,
        // Messaging routes
        api::messages::send_dm_message,
        api::messages::send_group_chat_message,
        api::messages::get_user_dm_threads_ordered_by_timestamp,
        api::messages::get_paginated_messages_for_dm_thread,
        api::messages::get_user_group_chat_threads_ordered_by_timestamp,
        api::messages::get_paginated_messages_for_group_chat_thread,
    ),
    components(
        schemas(
            // Node API
            api::node::GetAppStateRequest,
            api::node::GetAppStateResponse,
            api::node::GetExchangeRateResponse,

            // DAO coin API
            api::dao_coin::GetDaoCoinLimitOrdersRequest,
            api::dao_coin::GetDaoCoinLimitOrdersResponse,
            api::dao_coin::GetTransactorDaoCoinLimitOrdersRequest,
            api::dao_coin::DaoCoinLimitOrderCreationRequest,
            order_book::DaoCoinLimitOrderEntryResponse,
            order_book::DaoCoinLimitOrderResponse,
            common::model::OrderOperationType,
            common::model::FillType,

            // Messaging API
            messaging::SendMessageRequest,
            messaging::SendMessageResponse,
            messaging::GetUserThreadsRequest,
            messaging::GetUserDmResponse,
            messaging::GetUserGroupChatResponse,
            messaging::GetPaginatedMessagesForDmThreadRequest,
            messaging::GetPaginatedMessagesForDmResponse,
            messaging::GetPaginatedMessagesForGroupChatThreadRequest,
            messaging::GetPaginatedMessagesForGroupChatThreadResponse,
            messaging::ThreadMessage,
            messaging::AccessGroupInfo,
            messaging::DmMessageInfo,
        )
    ),
    tags(
        (name = "node", description = "Node status endpoints"),
        (name = "dao-coin", description = "DAO coin limit order endpoints"),
        (name = "messages", description = "Access group messaging endpoints")
    ),
    info(
        title = "Node Gateway API",
        version = "0.1.0",
        description = "DAO coin exchange and access group messaging API of a blockchain node"
    )
)]
pub struct ApiDoc;

/// App state shared across handlers
pub struct AppState {
    /// Chain state reads
    pub view: Arc<dyn UniversalView>,
    /// DAO-coin limit orders
    pub order_book: OrderBookService,
    /// Access-group messaging
    pub messaging: MessagingService,
    pub config: AppConfig,
}

impl AppState {
    pub fn new(
        view: Arc<dyn UniversalView>,
        constructor: Arc<dyn TransactionConstructor>,
        config: AppConfig,
    ) -> Self {
        Self {
            order_book: OrderBookService::new(view.clone(), constructor.clone(), config.network),
            messaging: MessagingService::new(view.clone(), constructor, config.network),
            view,
            config,
        }
    }
}

/// Every route of the gateway with its middleware
pub fn router(state: Arc<AppState>, log_level: Level) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        // Node routes
        .route("/", get(node::index))
        .route("/health-check", get(node::health_check))
        .route("/get-app-state", post(node::get_app_state))
        .route("/get-exchange-rate", post(node::get_exchange_rate))

        // DAO coin routes
        .route("/get-dao-coin-limit-orders", post(dao_coin::get_dao_coin_limit_orders))
        .route(
            "/get-transactor-dao-coin-limit-orders",
            post(dao_coin::get_transactor_dao_coin_limit_orders),
        )
        .route("/create-dao-coin-limit-order", post(dao_coin::create_dao_coin_limit_order))

        // Messaging routes
        .route("/send-dm-message", post(messages::send_dm_message))
        .route("/send-group-chat-message", post(messages::send_group_chat_message))
        .route(
            "/get-user-dm-threads-ordered-by-timestamp",
            post(messages::get_user_dm_threads_ordered_by_timestamp),
        )
        .route(
            "/get-paginated-messages-for-dm-thread",
            post(messages::get_paginated_messages_for_dm_thread),
        )
        .route(
            "/get-user-group-chat-threads-ordered-by-timestamp",
            post(messages::get_user_group_chat_threads_ordered_by_timestamp),
        )
        .route(
            "/get-paginated-messages-for-group-chat-thread",
            post(messages::get_paginated_messages_for_group_chat_thread),
        );

    let swagger_ui = SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi());
    let body_limit = state.config.max_request_body_bytes;

    Router::new()
        .route("/", get(node::index))
        .nest("/api/v0", api_routes)
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
        .merge(swagger_ui)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(log_level))
                .on_request(DefaultOnRequest::new().level(log_level))
                .on_response(DefaultOnResponse::new().level(log_level)),
        )
}
