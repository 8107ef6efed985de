//! Conversions between user-facing prices and stored scaled rates.

use super::format::parse_float;
use super::normalize::quantity_scaling_factor;
use super::resolve::invert_scaled;
use super::{
    compute_scaled_rate, denormalize_scaled_rate, format_float_as_decimal_string,
    format_scaled_as_decimal_string, one_e38, orient_rate, parse_decimal_to_scaled, U256,
};
use crate::error::Result;
use crate::model::{CoinPair, OrderOperationType};

/// Converts a decimal price into the stored scaled rate for `pair`.
///
/// Asks are quoted as "selling coin per buying coin" and are inverted before
/// normalization.
pub fn scaled_exchange_rate_from_price(
    pair: &CoinPair,
    price: &str,
    operation: OrderOperationType,
) -> Result<U256> {
    let raw = parse_decimal_to_scaled(price)?;
    let oriented = orient_rate(operation, raw)?;
    compute_scaled_rate(pair, oriented)
}

/// Converts a float exchange rate into the stored scaled rate for `pair`.
/// No inversion is applied.
pub fn scaled_exchange_rate_from_float(pair: &CoinPair, rate: f64) -> Result<U256> {
    let formatted = format_float_as_decimal_string(rate)?;
    let raw = parse_decimal_to_scaled(&formatted)?;
    compute_scaled_rate(pair, raw)
}

/// Renders a stored scaled rate as the price a user entered for `operation`.
pub fn price_string_from_scaled_rate(
    pair: &CoinPair,
    scaled_rate: U256,
    operation: OrderOperationType,
) -> Result<String> {
    let rate = denormalize_scaled_rate(pair, scaled_rate);
    let oriented = match operation {
        OrderOperationType::Ask => invert_scaled(rate)?,
        OrderOperationType::Bid => rate,
    };
    Ok(format_scaled_as_decimal_string(oriented, one_e38()))
}

/// Stored scaled rate as a float, without orientation.
pub fn exchange_rate_as_float(pair: &CoinPair, scaled_rate: U256) -> Result<f64> {
    let rate = denormalize_scaled_rate(pair, scaled_rate);
    parse_float(&format_scaled_as_decimal_string(rate, one_e38()))
}

/// Renders a base-unit quantity in whole coins of the coin it denominates.
pub fn quantity_string_from_base_units(
    pair: &CoinPair,
    operation: OrderOperationType,
    quantity_in_base_units: U256,
) -> String {
    format_scaled_as_decimal_string(
        quantity_in_base_units,
        quantity_scaling_factor(pair, operation),
    )
}

/// Base-unit quantity as a float of whole coins.
pub fn quantity_as_float(
    pair: &CoinPair,
    operation: OrderOperationType,
    quantity_in_base_units: U256,
) -> Result<f64> {
    parse_float(&quantity_string_from_base_units(pair, operation, quantity_in_base_units))
}
