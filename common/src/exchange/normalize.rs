//! Base-unit normalization between native nanos and DAO-coin base units.

use super::resolve::is_quantity_in_native_units;
use super::{
    base_units_per_coin, denomination_scaling_factor, nanos_per_unit, one_e38, overflow,
    scale_decimal_string, underflow, U256, U512,
};
use crate::error::Result;
use crate::model::{CoinPair, OrderOperationType};

/// Adjusts a raw 10^38-scaled rate for the base-unit mismatch of `pair`.
///
/// Buying the native coin multiplies by the denomination scaling factor,
/// selling it divides. Pairs of two DAO coins pass through unchanged.
pub fn compute_scaled_rate(pair: &CoinPair, raw_scaled_rate: U256) -> Result<U256> {
    if pair.buying.is_native() {
        raw_scaled_rate
            .checked_mul(denomination_scaling_factor())
            .ok_or_else(|| overflow("normalizing exchange rate for native buy", raw_scaled_rate))
    } else if pair.selling.is_native() {
        let normalized = raw_scaled_rate / denomination_scaling_factor();
        if normalized.is_zero() {
            return Err(underflow("normalizing exchange rate for native sell", raw_scaled_rate));
        }
        Ok(normalized)
    } else {
        Ok(raw_scaled_rate)
    }
}

/// Undoes [`compute_scaled_rate`] for display.
///
/// The result is widened so the native-sell multiplication cannot overflow.
pub fn denormalize_scaled_rate(pair: &CoinPair, scaled_rate: U256) -> U512 {
    let scaled_rate = U512::from(scaled_rate);
    let factor = U512::from(denomination_scaling_factor());
    if pair.buying.is_native() {
        scaled_rate / factor
    } else if pair.selling.is_native() {
        scaled_rate * factor
    } else {
        scaled_rate
    }
}

/// Base units per whole coin of the quantity being filled.
pub fn quantity_scaling_factor(pair: &CoinPair, operation: OrderOperationType) -> U256 {
    if is_quantity_in_native_units(pair, operation) {
        nanos_per_unit()
    } else {
        base_units_per_coin()
    }
}

/// Converts a human-entered quantity into base units of the coin it
/// denominates: nanos for the native coin, 10^-18 units for a DAO coin.
pub fn compute_base_unit_quantity(
    pair: &CoinPair,
    operation: OrderOperationType,
    quantity: &str,
) -> Result<U256> {
    scale_decimal_string(quantity, quantity_scaling_factor(pair, operation))
}

/// Base units of the selling coin an order locks up:
/// `scaled_rate * quantity / 10^38`.
pub fn base_units_to_sell(scaled_rate: U256, quantity_in_base_units: U256) -> Result<U256> {
    let product = U512::from(scaled_rate) * U512::from(quantity_in_base_units);
    let selling = product / U512::from(one_e38());
    let selling = U256::try_from(selling)
        .map_err(|_| overflow("computing base units to sell", selling))?;

    if selling.is_zero() && !scaled_rate.is_zero() && !quantity_in_base_units.is_zero() {
        return Err(underflow(
            "computing base units to sell",
            format!("{} * {}", scaled_rate, quantity_in_base_units),
        ));
    }
    Ok(selling)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::exchange::parse_decimal_to_scaled;
    use crate::model::CoinSide;

    fn native_buy() -> CoinPair {
        CoinPair::new(CoinSide::Native, CoinSide::dao_coin("alice")).unwrap()
    }

    fn native_sell() -> CoinPair {
        CoinPair::new(CoinSide::dao_coin("alice"), CoinSide::Native).unwrap()
    }

    fn dao_pair() -> CoinPair {
        CoinPair::new(CoinSide::dao_coin("alice"), CoinSide::dao_coin("bob")).unwrap()
    }

    #[test]
    fn test_native_buy_multiplies() {
        let raw = parse_decimal_to_scaled("1.5").unwrap();
        let scaled = compute_scaled_rate(&native_buy(), raw).unwrap();
        assert_eq!(scaled, U256::from(15u64) * U256::exp10(37 + 9));
    }

    #[test]
    fn test_native_sell_divides() {
        let raw = parse_decimal_to_scaled("2").unwrap();
        let scaled = compute_scaled_rate(&native_sell(), raw).unwrap();
        assert_eq!(scaled, U256::from(2u64) * U256::exp10(29));
    }

    #[test]
    fn test_dao_pair_unchanged() {
        let raw = parse_decimal_to_scaled("3.25").unwrap();
        assert_eq!(compute_scaled_rate(&dao_pair(), raw).unwrap(), raw);
    }

    #[test]
    fn test_native_sell_tiny_rate_underflows() {
        // 1e-30 scales to 1e8, which divides to zero
        let raw = parse_decimal_to_scaled(&format!("0.{}1", "0".repeat(29))).unwrap();
        assert!(matches!(compute_scaled_rate(&native_sell(), raw), Err(Error::Underflow(_))));
    }

    #[test]
    fn test_native_sell_36_decimal_rate_underflows() {
        let raw = parse_decimal_to_scaled("0.000000000000000000000000000000000001").unwrap();
        assert_eq!(raw, U256::from(100u64));
        assert!(matches!(compute_scaled_rate(&native_sell(), raw), Err(Error::Underflow(_))));
    }

    #[test]
    fn test_native_buy_rate_near_limit_overflows() {
        let limit = U256::MAX / denomination_scaling_factor();
        assert!(compute_scaled_rate(&native_buy(), limit).is_ok());
        assert!(matches!(
            compute_scaled_rate(&native_buy(), limit + U256::one()),
            Err(Error::Overflow(_))
        ));
    }

    #[test]
    fn test_ask_selling_native_quantity_in_nanos() {
        let quantity = compute_base_unit_quantity(&native_sell(), OrderOperationType::Ask, "2.5").unwrap();
        assert_eq!(quantity, U256::from(2_500_000_000u64));
    }

    #[test]
    fn test_native_buy_huge_rate_overflows() {
        let raw = parse_decimal_to_scaled(&format!("1{}", "0".repeat(31))).unwrap();
        assert!(matches!(compute_scaled_rate(&native_buy(), raw), Err(Error::Overflow(_))));
    }

    #[test]
    fn test_denormalize_inverts_normalize() {
        for pair in [native_buy(), native_sell(), dao_pair()] {
            let raw = parse_decimal_to_scaled("42.125").unwrap();
            let scaled = compute_scaled_rate(&pair, raw).unwrap();
            assert_eq!(denormalize_scaled_rate(&pair, scaled), U512::from(raw));
        }
    }

    #[test]
    fn test_quantity_units_follow_operation() {
        let pair = native_buy();
        assert_eq!(
            compute_base_unit_quantity(&pair, OrderOperationType::Bid, "2.5").unwrap(),
            U256::from(2_500_000_000u64)
        );
        assert_eq!(
            compute_base_unit_quantity(&pair, OrderOperationType::Ask, "2.5").unwrap(),
            U256::from(25u64) * U256::exp10(17)
        );
    }

    #[test]
    fn test_base_units_to_sell() {
        let rate = parse_decimal_to_scaled("0.5").unwrap();
        let selling = base_units_to_sell(rate, U256::from(1_000u64)).unwrap();
        assert_eq!(selling, U256::from(500u64));
    }

    #[test]
    fn test_base_units_to_sell_underflow() {
        let rate = parse_decimal_to_scaled("0.1").unwrap();
        assert!(matches!(base_units_to_sell(rate, U256::from(5u64)), Err(Error::Underflow(_))));
        assert_eq!(base_units_to_sell(rate, U256::zero()).unwrap(), U256::zero());
    }

    #[test]
    fn test_base_units_to_sell_overflow() {
        assert!(matches!(base_units_to_sell(U256::MAX, U256::MAX), Err(Error::Overflow(_))));
    }
}
