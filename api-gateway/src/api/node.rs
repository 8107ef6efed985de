//! Node status handlers

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use common::error::Error;
use common::model::Network;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};
use utoipa::ToSchema;

use crate::api::parse_body;
use crate::error::ApiError;
use crate::AppState;

/// Plain-text liveness banner
pub const INDEX_TEXT: &str = "Your node is running!\n";

const SATOSHIS_PER_BITCOIN: u128 = 100_000_000;

/// Nanos a diamond of each level is worth at launch
const DIAMOND_LEVEL_NANOS: [(i64, u64); 6] = [
    (1, 50_000),
    (2, 500_000),
    (3, 5_000_000),
    (4, 50_000_000),
    (5, 500_000_000),
    (6, 5_000_000_000),
];

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "PascalCase", default)]
pub struct GetAppStateRequest {
    pub public_key_base58_check: String,
}

/// Node-level settings a client needs at startup
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub struct GetAppStateResponse {
    pub min_satoshis_burned_for_profile_creation: u64,
    pub is_testnet: bool,
    pub support_email: String,
    pub show_processing_spinners: bool,
    pub create_profile_fee_nanos: u64,
    pub comp_profile_creation: bool,
    pub amplitude_key: String,
    pub amplitude_domain: String,
    pub has_starter_bit_clout_seed: bool,
    #[serde(rename = "HasTwilioAPIKey")]
    pub has_twilio_api_key: bool,
    pub has_wyre_integration: bool,
    /// Nanos per diamond level at the current tip
    pub diamond_level_map: BTreeMap<i64, u64>,
    pub past_deflation_bomb: bool,
}

/// Native-coin pricing against bitcoin and USD
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct GetExchangeRateResponse {
    #[serde(rename = "SatoshisPerDeSoExchangeRate")]
    pub satoshis_per_unit: u64,
    #[serde(rename = "NanosSold")]
    pub nanos_sold: u64,
    #[serde(rename = "USDCentsPerBitcoinExchangeRate")]
    pub usd_cents_per_bitcoin: u64,
    #[serde(rename = "USDCentsPerDeSoExchangeRate")]
    pub usd_cents_per_unit: u64,
    #[serde(rename = "USDCentsPerDeSoReserveExchangeRate")]
    pub usd_cents_per_unit_reserve: u64,
    #[serde(rename = "BuyDeSoFeeBasisPoints")]
    pub buy_fee_basis_points: u64,
}

/// Liveness banner
#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "The node is up", body = String)),
    tag = "node"
)]
pub async fn index() -> &'static str {
    INDEX_TEXT
}

/// Readiness check: ready once the chain is fully current and the first
/// transaction bundle has been processed
#[utoipa::path(
    get,
    path = "/api/v0/health-check",
    responses(
        (status = 200, description = "The node is synced", body = String),
        (status = 503, description = "The node is still syncing")
    ),
    tag = "node"
)]
pub async fn health_check(State(state): State<Arc<AppState>>) -> Result<&'static str, ApiError> {
    let status = state.view.node_status().await?;
    if !status.is_fully_current {
        return Err(ApiError::ServiceUnavailable(format!(
            "Waiting for blockchain to sync. Height: {}",
            status.block_tip_height
        )));
    }
    if !status.has_processed_first_transaction_bundle {
        return Err(ApiError::ServiceUnavailable("Waiting on mempool to sync".to_string()));
    }
    Ok("200")
}

/// Node configuration and chain parameters
#[utoipa::path(
    post,
    path = "/api/v0/get-app-state",
    request_body = GetAppStateRequest,
    responses((status = 200, description = "App state", body = GetAppStateResponse)),
    tag = "node"
)]
pub async fn get_app_state(
    State(state): State<Arc<AppState>>,
    body: Result<Json<GetAppStateRequest>, JsonRejection>,
) -> Result<Json<GetAppStateResponse>, ApiError> {
    let request = parse_body(body)?;
    debug!("App state requested by '{}'", request.public_key_base58_check);

    let params = state.view.global_params().await?;
    let status = state.view.node_status().await?;
    let past_deflation_bomb =
        u64::from(status.block_tip_height) > params.deflation_bomb_block_height;
    let config = &state.config;
    Ok(Json(GetAppStateResponse {
        min_satoshis_burned_for_profile_creation: config.min_satoshis_burned_for_profile_creation,
        is_testnet: config.network == Network::Testnet,
        support_email: config.support_email.clone(),
        show_processing_spinners: config.show_processing_spinners,
        create_profile_fee_nanos: params.create_profile_fee_nanos,
        comp_profile_creation: config.comp_profile_creation,
        amplitude_key: config.amplitude_key.clone(),
        amplitude_domain: config.amplitude_domain.clone(),
        has_starter_bit_clout_seed: config.has_starter_seed,
        has_twilio_api_key: config.has_twilio_api_key,
        has_wyre_integration: config.has_wyre_integration,
        diamond_level_map: diamond_level_map(past_deflation_bomb),
        past_deflation_bomb,
    }))
}

/// Current native-coin exchange rates. Reserve rate and fee fall back to
/// zero when global state cannot be read.
#[utoipa::path(
    post,
    path = "/api/v0/get-exchange-rate",
    responses((status = 200, description = "Exchange rates", body = GetExchangeRateResponse)),
    tag = "node"
)]
pub async fn get_exchange_rate(
    State(state): State<Arc<AppState>>,
) -> Result<Json<GetExchangeRateResponse>, ApiError> {
    let usd_cents_per_bitcoin = state.view.usd_cents_per_bitcoin().await?;
    let nanos_sold = state.view.nanos_purchased().await?;
    let usd_cents_per_unit = state.config.usd_cents_per_unit;
    let satoshis_per_unit = satoshis_per_unit(usd_cents_per_unit, usd_cents_per_bitcoin)?;

    let usd_cents_per_unit_reserve = state
        .view
        .usd_cents_per_unit_reserve_rate()
        .await
        .unwrap_or_else(|e| {
            error!("Failed to read reserve exchange rate: {}", e);
            0
        });
    let buy_fee_basis_points = state.view.buy_fee_basis_points().await.unwrap_or_else(|e| {
        error!("Failed to read buy fee basis points: {}", e);
        0
    });

    Ok(Json(GetExchangeRateResponse {
        satoshis_per_unit,
        nanos_sold,
        usd_cents_per_bitcoin,
        usd_cents_per_unit,
        usd_cents_per_unit_reserve,
        buy_fee_basis_points,
    }))
}

/// Satoshis buying one whole native coin. Zero until a bitcoin price is known.
fn satoshis_per_unit(usd_cents_per_unit: u64, usd_cents_per_bitcoin: u64) -> Result<u64, Error> {
    if usd_cents_per_bitcoin == 0 {
        return Ok(0);
    }
    let satoshis =
        u128::from(usd_cents_per_unit) * SATOSHIS_PER_BITCOIN / u128::from(usd_cents_per_bitcoin);
    u64::try_from(satoshis).map_err(|_| {
        Error::Overflow(format!(
            "satoshis per unit at {} cents per unit and {} cents per bitcoin",
            usd_cents_per_unit, usd_cents_per_bitcoin
        ))
    })
}

/// Diamonds are worth a tenth of their launch value past the deflation bomb
fn diamond_level_map(past_deflation_bomb: bool) -> BTreeMap<i64, u64> {
    let divisor = if past_deflation_bomb { 10 } else { 1 };
    DIAMOND_LEVEL_NANOS
        .iter()
        .map(|&(level, nanos)| (level, nanos / divisor))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_satoshis_per_unit() {
        // 150 USD at 30,000 USD per bitcoin
        assert_eq!(satoshis_per_unit(15_000, 3_000_000).unwrap(), 500_000);
        assert_eq!(satoshis_per_unit(15_000, 0).unwrap(), 0);
        assert!(matches!(satoshis_per_unit(u64::MAX, 1), Err(Error::Overflow(_))));
    }

    #[test]
    fn test_diamond_levels_drop_after_deflation_bomb() {
        assert_eq!(diamond_level_map(false)[&1], 50_000);
        assert_eq!(diamond_level_map(true)[&1], 5_000);
        assert_eq!(diamond_level_map(true)[&6], 500_000_000);
    }
}
