//! Decimal string to scaled integer conversion.

use super::{count_decimal_digits, one_e38, overflow, underflow, U256};
use crate::error::{Error, Result};

/// Scales a plain decimal numeral by `scaling_factor`, a power of ten.
///
/// Accepts `"12"`, `"12.5"`, `".5"` and `"12."`. Signs, exponents and
/// separators are rejected. Fractional digits beyond the factor's precision
/// are truncated; a nonzero input that truncates to zero is an `Underflow`.
pub fn scale_decimal_string(input: &str, scaling_factor: U256) -> Result<U256> {
    let trimmed = input.trim();
    let (whole_str, fraction_str) = trimmed.split_once('.').unwrap_or((trimmed, ""));

    if whole_str.is_empty() && fraction_str.is_empty() {
        return Err(Error::InvalidFormat(format!("'{}' is not a decimal number", input)));
    }
    if !whole_str.bytes().all(|b| b.is_ascii_digit())
        || !fraction_str.bytes().all(|b| b.is_ascii_digit())
    {
        return Err(Error::InvalidFormat(format!("'{}' is not a decimal number", input)));
    }

    let precision = count_decimal_digits(scaling_factor).saturating_sub(1);
    if scaling_factor != U256::exp10(precision) {
        return Err(Error::Internal(format!(
            "scaling factor {} is not a power of ten",
            scaling_factor
        )));
    }

    let whole = if whole_str.is_empty() {
        U256::zero()
    } else {
        U256::from_dec_str(whole_str).map_err(|_| overflow("parsing whole part", whole_str))?
    };
    let scaled_whole = whole
        .checked_mul(scaling_factor)
        .ok_or_else(|| overflow("scaling decimal", input))?;

    let kept = &fraction_str[..fraction_str.len().min(precision)];
    let scaled_fraction = if kept.is_empty() {
        U256::zero()
    } else {
        // kept has at most `precision` digits so this stays below the factor
        let digits = U256::from_dec_str(kept).map_err(|_| overflow("parsing fraction", kept))?;
        digits * U256::exp10(precision - kept.len())
    };

    let scaled = scaled_whole
        .checked_add(scaled_fraction)
        .ok_or_else(|| overflow("scaling decimal", input))?;

    let has_nonzero_digit = trimmed.bytes().any(|b| (b'1'..=b'9').contains(&b));
    if scaled.is_zero() && has_nonzero_digit {
        return Err(underflow("scaling decimal", input));
    }
    Ok(scaled)
}

/// Parses a decimal exchange rate into a 10^38-scaled integer.
///
/// A rate that scales to zero, including a literal zero, is rejected with
/// `Underflow`.
pub fn parse_decimal_to_scaled(input: &str) -> Result<U256> {
    let scaled = scale_decimal_string(input, one_e38())?;
    if scaled.is_zero() {
        return Err(underflow("scaled exchange rate", input));
    }
    Ok(scaled)
}
