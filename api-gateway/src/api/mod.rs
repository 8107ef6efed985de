//! API handlers
//!
//! This module contains all the API endpoint handlers organized by resource.
//! Each handler follows a consistent pattern:
//! - Parse the JSON body, rejecting malformed input with 400
//! - Call the appropriate service method
//! - Return the service's PascalCase response as JSON

pub mod dao_coin;
pub mod messages;
pub mod node;

use axum::extract::rejection::JsonRejection;
use axum::Json;

use crate::error::ApiError;

/// Unwraps a JSON body, turning any rejection into a bad request.
pub(crate) fn parse_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    body.map(|Json(value)| value)
        .map_err(|e| ApiError::BadRequest(format!("Problem parsing request body: {}", e.body_text())))
}
