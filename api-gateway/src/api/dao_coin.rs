//! DAO-coin exchange handlers
//!
//! Handlers for the limit-order book:
//! - List the open orders between two coins
//! - List the open orders of one transactor
//! - Build an unsigned limit-order transaction

use std::sync::Arc;

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use order_book::{DaoCoinLimitOrderEntryResponse, DaoCoinLimitOrderResponse, LimitOrderPlacement};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::api::parse_body;
use crate::error::ApiError;
use crate::AppState;

/// Order book between two coins
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct GetDaoCoinLimitOrdersRequest {
    /// Creator public key, or `"DESO"`
    #[serde(rename = "DAOCoin1CreatorPublicKeyBase58Check")]
    pub dao_coin1_creator_public_key_base58_check: String,
    /// Creator public key, or `"DESO"`
    #[serde(rename = "DAOCoin2CreatorPublicKeyBase58Check")]
    pub dao_coin2_creator_public_key_base58_check: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub struct GetDaoCoinLimitOrdersResponse {
    pub orders: Vec<DaoCoinLimitOrderEntryResponse>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "PascalCase", default)]
pub struct GetTransactorDaoCoinLimitOrdersRequest {
    pub transactor_public_key_base58_check: String,
}

/// A new limit order
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "PascalCase", default)]
pub struct DaoCoinLimitOrderCreationRequest {
    pub transactor_public_key_base58_check_or_username: String,
    /// Creator public key or username, or `"DESO"`
    #[serde(rename = "BuyingDAOCoinCreatorPublicKeyBase58CheckOrUsername")]
    pub buying_dao_coin_creator_public_key_base58_check_or_username: String,
    /// Creator public key or username, or `"DESO"`
    #[serde(rename = "SellingDAOCoinCreatorPublicKeyBase58CheckOrUsername")]
    pub selling_dao_coin_creator_public_key_base58_check_or_username: String,
    /// Deprecated, used only when `Price` is empty
    pub exchange_rate_coins_to_sell_per_coin_to_buy: Option<f64>,
    pub price: Option<String>,
    /// Deprecated, used only when `Quantity` is empty
    pub quantity_to_fill: Option<f64>,
    pub quantity: Option<String>,
    /// `"ASK"` or `"BID"`
    pub operation_type: String,
    /// `"GOOD_TILL_CANCELLED"`, `"IMMEDIATE_OR_CANCEL"` or `"FILL_OR_KILL"`
    pub fill_type: String,
    #[serde(rename = "MinFeeRateNanosPerKB")]
    pub min_fee_rate_nanos_per_kb: u64,
}

impl From<DaoCoinLimitOrderCreationRequest> for LimitOrderPlacement {
    fn from(request: DaoCoinLimitOrderCreationRequest) -> Self {
        Self {
            transactor: request.transactor_public_key_base58_check_or_username,
            buying_coin: request.buying_dao_coin_creator_public_key_base58_check_or_username,
            selling_coin: request.selling_dao_coin_creator_public_key_base58_check_or_username,
            operation_type: request.operation_type,
            fill_type: request.fill_type,
            price: request.price,
            exchange_rate_coins_to_sell_per_coin_to_buy: request
                .exchange_rate_coins_to_sell_per_coin_to_buy,
            quantity: request.quantity,
            quantity_to_fill: request.quantity_to_fill,
            min_fee_rate_nanos_per_kb: request.min_fee_rate_nanos_per_kb,
        }
    }
}

/// Get the open orders between two coins, in both directions
#[utoipa::path(
    post,
    path = "/api/v0/get-dao-coin-limit-orders",
    request_body = GetDaoCoinLimitOrdersRequest,
    responses(
        (status = 200, description = "Open orders", body = GetDaoCoinLimitOrdersResponse),
        (status = 400, description = "Invalid coin identifiers")
    ),
    tag = "dao-coin"
)]
pub async fn get_dao_coin_limit_orders(
    State(state): State<Arc<AppState>>,
    body: Result<Json<GetDaoCoinLimitOrdersRequest>, JsonRejection>,
) -> Result<Json<GetDaoCoinLimitOrdersResponse>, ApiError> {
    let request = parse_body(body)?;
    let orders = state
        .order_book
        .get_dao_coin_limit_orders(
            &request.dao_coin1_creator_public_key_base58_check,
            &request.dao_coin2_creator_public_key_base58_check,
        )
        .await?;
    Ok(Json(GetDaoCoinLimitOrdersResponse { orders }))
}

/// Get the open orders of one transactor
#[utoipa::path(
    post,
    path = "/api/v0/get-transactor-dao-coin-limit-orders",
    request_body = GetTransactorDaoCoinLimitOrdersRequest,
    responses(
        (status = 200, description = "Open orders", body = GetDaoCoinLimitOrdersResponse),
        (status = 400, description = "Invalid transactor public key")
    ),
    tag = "dao-coin"
)]
pub async fn get_transactor_dao_coin_limit_orders(
    State(state): State<Arc<AppState>>,
    body: Result<Json<GetTransactorDaoCoinLimitOrdersRequest>, JsonRejection>,
) -> Result<Json<GetDaoCoinLimitOrdersResponse>, ApiError> {
    let request = parse_body(body)?;
    let orders = state
        .order_book
        .get_transactor_dao_coin_limit_orders(&request.transactor_public_key_base58_check)
        .await?;
    Ok(Json(GetDaoCoinLimitOrdersResponse { orders }))
}

/// Build an unsigned DAO-coin limit-order transaction
#[utoipa::path(
    post,
    path = "/api/v0/create-dao-coin-limit-order",
    request_body = DaoCoinLimitOrderCreationRequest,
    responses(
        (status = 200, description = "Unsigned transaction", body = DaoCoinLimitOrderResponse),
        (status = 400, description = "Invalid order or insufficient balance")
    ),
    tag = "dao-coin"
)]
pub async fn create_dao_coin_limit_order(
    State(state): State<Arc<AppState>>,
    body: Result<Json<DaoCoinLimitOrderCreationRequest>, JsonRejection>,
) -> Result<Json<DaoCoinLimitOrderResponse>, ApiError> {
    let placement = LimitOrderPlacement::from(parse_body(body)?);
    let response = state.order_book.create_dao_coin_limit_order(&placement).await?;
    Ok(Json(response))
}
