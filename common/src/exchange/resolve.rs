//! Order-side dependent decisions: rate orientation and quantity units.

use super::{one_e76, overflow, underflow, U256, U512};
use crate::error::Result;
use crate::model::{CoinPair, OrderOperationType};

/// Whether the quantity of an order is denominated in native nanos.
///
/// A bid fills a quantity of the coin being bought, an ask a quantity of the
/// coin being sold. Only the native coin uses nanos.
pub fn is_quantity_in_native_units(pair: &CoinPair, operation: OrderOperationType) -> bool {
    match operation {
        OrderOperationType::Bid => pair.buying.is_native(),
        OrderOperationType::Ask => pair.selling.is_native(),
    }
}

/// Inverts a 10^38-scaled rate: `10^76 / rate`.
pub fn invert_rate_for_ask(raw_scaled_rate: U256) -> Result<U256> {
    let inverted = invert_scaled(U512::from(raw_scaled_rate))?;
    U256::try_from(inverted).map_err(|_| overflow("inverting exchange rate", raw_scaled_rate))
}

/// Orients a raw rate for storage. Asks quote the inverse of the stored rate.
pub fn orient_rate(operation: OrderOperationType, raw_scaled_rate: U256) -> Result<U256> {
    match operation {
        OrderOperationType::Ask => invert_rate_for_ask(raw_scaled_rate),
        OrderOperationType::Bid => Ok(raw_scaled_rate),
    }
}

pub(crate) fn invert_scaled(scaled_rate: U512) -> Result<U512> {
    if scaled_rate.is_zero() {
        return Err(underflow("inverting exchange rate", "zero rate"));
    }
    let inverted = one_e76() / scaled_rate;
    if inverted.is_zero() {
        return Err(underflow("inverting exchange rate", scaled_rate));
    }
    Ok(inverted)
}
