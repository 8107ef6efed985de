//! Scaled exchange-rate arithmetic for the DAO-coin limit-order book
//!
//! Exchange rates are carried as unsigned 256-bit integers equal to the
//! decimal rate multiplied by 10^38. Quantities are carried in the base units
//! of the coin they refer to: 10^9 nanos per native coin, 10^18 base units per
//! DAO coin. Every helper returns an explicit error instead of substituting
//! zero for a failed computation.
//!
//! The module is split the way the computation flows:
//!
//! - [`convert`] parses decimal strings into scaled integers
//! - [`normalize`] compensates for the native/DAO-coin base-unit mismatch
//! - [`resolve`] decides inversion and quantity denomination from the order side
//! - [`format`] renders scaled integers and floats back into decimal strings
//! - [`rates`] composes the above into the conversions the API needs

pub mod convert;
pub mod format;
pub mod normalize;
pub mod rates;
pub mod resolve;

use std::fmt::Display;
use std::sync::OnceLock;

pub use primitive_types::{U256, U512};

use crate::error::Error;

pub use convert::{parse_decimal_to_scaled, scale_decimal_string};
pub use format::{count_decimal_digits, format_float_as_decimal_string, format_scaled_as_decimal_string};
pub use normalize::{base_units_to_sell, compute_base_unit_quantity, compute_scaled_rate, denormalize_scaled_rate};
pub use rates::{
    exchange_rate_as_float, price_string_from_scaled_rate, quantity_as_float,
    quantity_string_from_base_units, scaled_exchange_rate_from_float,
    scaled_exchange_rate_from_price,
};
pub use resolve::{invert_rate_for_ask, is_quantity_in_native_units, orient_rate};

/// Decimal places carried by a scaled exchange rate
pub const EXCHANGE_RATE_DECIMALS: usize = 38;

/// Base units ("nanos") per whole native coin
pub const NANOS_PER_UNIT: u64 = 1_000_000_000;

/// Decimal places of a DAO coin's base unit
pub const DAO_COIN_DECIMALS: usize = 18;

static ONE_E38: OnceLock<U256> = OnceLock::new();
static ONE_E76: OnceLock<U512> = OnceLock::new();
static BASE_UNITS_PER_COIN: OnceLock<U256> = OnceLock::new();
static DENOMINATION_SCALING_FACTOR: OnceLock<U256> = OnceLock::new();

/// 10^38, the precision of a scaled exchange rate
pub fn one_e38() -> U256 {
    *ONE_E38.get_or_init(|| U256::exp10(EXCHANGE_RATE_DECIMALS))
}

/// 10^76, the numerator used when inverting a scaled rate
pub fn one_e76() -> U512 {
    *ONE_E76.get_or_init(|| U512::exp10(2 * EXCHANGE_RATE_DECIMALS))
}

/// Nanos per native coin as a 256-bit value
pub fn nanos_per_unit() -> U256 {
    U256::from(NANOS_PER_UNIT)
}

/// Base units per DAO coin (10^18)
pub fn base_units_per_coin() -> U256 {
    *BASE_UNITS_PER_COIN.get_or_init(|| U256::exp10(DAO_COIN_DECIMALS))
}

/// Ratio of DAO-coin base units to native nanos (10^18 / 10^9)
pub fn denomination_scaling_factor() -> U256 {
    *DENOMINATION_SCALING_FACTOR.get_or_init(|| base_units_per_coin() / nanos_per_unit())
}

pub(crate) fn overflow(operation: &str, value: impl Display) -> Error {
    Error::Overflow(format!("{}: {} exceeds 256 bits", operation, value))
}

pub(crate) fn underflow(operation: &str, value: impl Display) -> Error {
    Error::Underflow(format!("{}: {} rounds to zero", operation, value))
}
