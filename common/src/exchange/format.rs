//! Rendering of scaled integers and floats as decimal strings.

use super::U512;
use crate::error::{Error, Result};

/// Significant digits an f64 reliably carries
const FLOAT_PRECISION_DIGITS: usize = 15;

/// Number of base-10 digits in `value`. Zero has zero digits.
pub fn count_decimal_digits(value: impl Into<U512>) -> usize {
    let ten = U512::from(10u8);
    let mut remaining: U512 = value.into();
    let mut digits = 0;
    while !remaining.is_zero() {
        remaining /= ten;
        digits += 1;
    }
    digits
}

/// Renders `value / scaling_factor` as `"<whole>.<fraction>"`.
///
/// The fraction is left-padded to the factor's precision. A zero fraction is
/// rendered as a single `"0"`, so ten whole units print as `"10.0"`.
/// `scaling_factor` must be a nonzero power of ten.
pub fn format_scaled_as_decimal_string(
    value: impl Into<U512>,
    scaling_factor: impl Into<U512>,
) -> String {
    let value = value.into();
    let scaling_factor = scaling_factor.into();
    let whole = value / scaling_factor;
    let fraction = value % scaling_factor;

    if fraction.is_zero() {
        return format!("{}.0", whole);
    }

    let precision = count_decimal_digits(scaling_factor).saturating_sub(1);
    format!("{}.{:0>width$}", whole, fraction.to_string(), width = precision)
}

/// Renders a non-negative float with at most 15 significant integer digits.
///
/// Floats with 15 or fewer integer digits are printed with enough fractional
/// digits to total 15. Larger floats keep their leading 15 digits, zero the
/// rest and end in `".0"`.
pub fn format_float_as_decimal_string(value: f64) -> Result<String> {
    if !value.is_finite() || value < 0.0 {
        return Err(Error::InvalidFormat(format!(
            "{} is not a finite non-negative number",
            value
        )));
    }
    // normalizes -0.0
    let value = if value == 0.0 { 0.0 } else { value };

    let whole = value.trunc();
    let whole_digits = if whole == 0.0 {
        String::new()
    } else {
        format!("{:.0}", whole)
    };

    if whole_digits.len() <= FLOAT_PRECISION_DIGITS {
        let decimals = FLOAT_PRECISION_DIGITS - whole_digits.len();
        return Ok(format!("{:.*}", decimals, value));
    }

    Ok(format!(
        "{}{}.0",
        &whole_digits[..FLOAT_PRECISION_DIGITS],
        "0".repeat(whole_digits.len() - FLOAT_PRECISION_DIGITS)
    ))
}

/// Parses a rendered decimal string back into an f64.
pub(crate) fn parse_float(input: &str) -> Result<f64> {
    input
        .parse::<f64>()
        .map_err(|e| Error::InvalidFormat(format!("'{}' is not a float: {}", input, e)))
}
