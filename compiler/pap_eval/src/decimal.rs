//! Exact decimal arithmetic.
//!
//! Addition, subtraction and multiplication are exact. Division is the only
//! operation that can produce an infinite expansion, so its result is rounded
//! to the scale and rounding mode of an [`ArithmeticContext`]. The context is
//! passed explicitly to every operation that needs it; there is no global
//! precision setting.

use std::cmp::Ordering;
use std::str::FromStr;

use bigdecimal::num_bigint::BigInt;
use bigdecimal::{BigDecimal, RoundingMode, Signed, ToPrimitive, Zero};

use crate::errors::{self, EvalError};

/// Fractional digits kept by division unless configured otherwise.
pub const DEFAULT_DIVISION_SCALE: i64 = 20;

/// Scale and rounding applied to division results.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ArithmeticContext {
    pub scale: i64,
    pub rounding: RoundingMode,
}

impl Default for ArithmeticContext {
    fn default() -> Self {
        ArithmeticContext {
            scale: DEFAULT_DIVISION_SCALE,
            rounding: RoundingMode::HalfUp,
        }
    }
}

impl ArithmeticContext {
    pub fn add(self, left: &BigDecimal, right: &BigDecimal) -> BigDecimal {
        left + right
    }

    pub fn sub(self, left: &BigDecimal, right: &BigDecimal) -> BigDecimal {
        left - right
    }

    pub fn mul(self, left: &BigDecimal, right: &BigDecimal) -> BigDecimal {
        left * right
    }

    /// `left / right` rounded to this context's scale.
    pub fn div(self, left: &BigDecimal, right: &BigDecimal) -> Result<BigDecimal, EvalError> {
        divide(left, right, self.scale, self.rounding)
    }
}

/// `left / right` rounded once to `scale` fractional digits.
///
/// The quotient is computed on the unscaled integers, so every requested
/// digit is exact whatever the magnitude of the result.
pub fn divide(
    left: &BigDecimal,
    right: &BigDecimal,
    scale: i64,
    rounding: RoundingMode,
) -> Result<BigDecimal, EvalError> {
    if right.is_zero() {
        return Err(errors::division_by_zero());
    }
    let (mut numerator, left_scale) = left.as_bigint_and_exponent();
    let (mut denominator, right_scale) = right.as_bigint_and_exponent();
    // left / right = (numerator / denominator) * 10^(right_scale - left_scale)
    let shift = scale.saturating_add(right_scale).saturating_sub(left_scale);
    let power = |exponent: i64| {
        u32::try_from(exponent.unsigned_abs())
            .map(|exponent| BigInt::from(10).pow(exponent))
            .map_err(|_| errors::internal(format!("division scale {scale} is out of range")))
    };
    if shift >= 0 {
        numerator *= power(shift)?;
    } else {
        denominator *= power(shift)?;
    }
    let quotient = round_quotient(&numerator, &denominator, rounding);
    Ok(BigDecimal::new(quotient, scale))
}

/// `numerator / denominator` as an integer, rounded by `rounding`.
fn round_quotient(numerator: &BigInt, denominator: &BigInt, rounding: RoundingMode) -> BigInt {
    let truncated = numerator / denominator;
    let remainder: BigInt = numerator % denominator;
    if remainder.is_zero() {
        return truncated;
    }
    let negative = numerator.is_negative() != denominator.is_negative();
    let half = (remainder.abs() * 2_u32).cmp(&denominator.abs());
    let away_from_zero = match rounding {
        RoundingMode::Up => true,
        RoundingMode::Down => false,
        RoundingMode::Ceiling => !negative,
        RoundingMode::Floor => negative,
        RoundingMode::HalfUp => half != Ordering::Less,
        RoundingMode::HalfDown => half == Ordering::Greater,
        RoundingMode::HalfEven => {
            half == Ordering::Greater
                || (half == Ordering::Equal && !(&truncated % 2_u32).is_zero())
        }
    };
    match (away_from_zero, negative) {
        (false, _) => truncated,
        (true, false) => truncated + 1,
        (true, true) => truncated - 1,
    }
}

pub fn parse_decimal(text: &str) -> Result<BigDecimal, EvalError> {
    BigDecimal::from_str(text.trim()).map_err(|_| errors::invalid_decimal(text))
}

/// Rounding mode by the numeric codes PAP programs use
/// (`BigDecimal.ROUND_UP` = 0 ... `BigDecimal.ROUND_HALF_EVEN` = 6).
pub fn rounding_mode(code: i64) -> Option<RoundingMode> {
    Some(match code {
        0 => RoundingMode::Up,
        1 => RoundingMode::Down,
        2 => RoundingMode::Ceiling,
        3 => RoundingMode::Floor,
        4 => RoundingMode::HalfUp,
        5 => RoundingMode::HalfDown,
        6 => RoundingMode::HalfEven,
        _ => return None,
    })
}

pub fn is_integral(value: &BigDecimal) -> bool {
    value.with_scale(0) == *value
}

/// The value as a list position, if it is a non-negative integer.
pub fn to_index(value: &BigDecimal) -> Option<usize> {
    if is_integral(value) {
        value.to_usize()
    } else {
        None
    }
}

/// The value as an `i64`, if it is an integer in range.
pub fn to_integer(value: &BigDecimal) -> Option<i64> {
    if is_integral(value) {
        value.to_i64()
    } else {
        None
    }
}

/// Plain notation without trailing fractional zeros: `1.50` prints as `1.5`,
/// `1E+3` as `1000`. Numerically equal values have the same canonical string.
pub fn canonical_string(value: &BigDecimal) -> String {
    plain_string(&value.normalized())
}

/// Plain notation keeping the value's scale: `1.50` stays `1.50`.
pub fn plain_string(value: &BigDecimal) -> String {
    let (digits, scale) = value.as_bigint_and_exponent();
    let digits = digits.to_string();
    let (sign, digits) = match digits.strip_prefix('-') {
        Some(unsigned) => ("-", unsigned),
        None => ("", digits.as_str()),
    };
    match usize::try_from(scale) {
        Ok(0) => format!("{sign}{digits}"),
        Ok(scale) if digits.len() > scale => {
            let (integer, fraction) = digits.split_at(digits.len() - scale);
            format!("{sign}{integer}.{fraction}")
        }
        Ok(scale) => format!("{sign}0.{}{digits}", "0".repeat(scale - digits.len())),
        // Negative scale: the digits are followed by zeros.
        Err(_) => {
            let zeros = usize::try_from(scale.unsigned_abs()).unwrap_or(0);
            if digits == "0" {
                "0".to_owned()
            } else {
                format!("{sign}{digits}{}", "0".repeat(zeros))
            }
        }
    }
}
