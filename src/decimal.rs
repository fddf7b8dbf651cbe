/*
    Decimal parsing and rendering
*/

use std::str::FromStr;

use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::{Signed, Zero};

use crate::{CodecError, RealNum, Result};

/// Largest decimal exponent accepted by `parse_decimal`.
/// Keeps the exact rational of an input like `1e-999999999` from
/// allocating a gigantic power of ten.
pub const MAX_DECIMAL_EXPONENT: i64 = 1_000_000;

/// Notation used by `format_rational`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Notation {
    /// `123.456`
    #[default]
    Plain,
    /// `1.23456e+2`
    Scientific,
}

/// Parses a decimal string into an exact value.
///
/// Accepts plain (`-12.5`) and exponent (`1.25e-3`) notation, and the
/// case-insensitive tokens `inf`, `+inf`, `infinity`, `-inf`, `-infinity`
/// and `nan`. A zero written with a leading `-` is negative zero.
pub fn parse_decimal(text: &str) -> Result<RealNum> {
    let raw = text.trim();
    match raw.to_ascii_lowercase().as_str() {
        "inf" | "+inf" | "infinity" | "+infinity" => return Ok(RealNum::Infinity(false)),
        "-inf" | "-infinity" => return Ok(RealNum::Infinity(true)),
        "nan" | "+nan" | "-nan" => return Ok(RealNum::Nan),
        "" => return Err(CodecError::MalformedInput("empty decimal input".into())),
        _ => {}
    }

    let dec = BigDecimal::from_str(raw)
        .map_err(|e| CodecError::MalformedInput(format!("unable to parse decimal `{raw}`: {e}")))?;

    // value = int * 10^(-scale)
    let (int, scale) = dec.into_bigint_and_exponent();
    if scale.abs() > MAX_DECIMAL_EXPONENT {
        return Err(CodecError::MalformedInput(format!(
            "decimal exponent out of range: `{raw}`"
        )));
    }

    if int.is_zero() {
        return Ok(RealNum::zero(raw.starts_with('-')));
    }

    let ten = BigInt::from(10u8);
    let value = if scale >= 0 {
        BigRational::new(int, num_traits::pow(ten, scale as usize))
    } else {
        BigRational::from_integer(int * num_traits::pow(ten, (-scale) as usize))
    };

    Ok(RealNum::finite(value))
}

/// Renders a rational as a decimal string with at most `precision`
/// fraction digits. Digits past `precision` are truncated, not rounded,
/// and trailing zeros are never emitted.
pub fn format_rational(value: &BigRational, precision: usize, notation: Notation) -> String {
    if value.is_zero() {
        return "0".to_string();
    }

    let sign = if value.is_negative() { "-" } else { "" };
    let abs = value.abs();
    let repr = match notation {
        Notation::Plain => plain_digits(&abs, precision),
        Notation::Scientific => {
            let k = floor_log10(&abs);
            let scaled = if k >= 0 {
                abs / BigRational::from_integer(num_traits::pow(BigInt::from(10u8), k as usize))
            } else {
                abs * BigRational::from_integer(num_traits::pow(BigInt::from(10u8), (-k) as usize))
            };
            format!("{}e{:+}", plain_digits(&scaled, precision), k)
        }
    };

    format!("{sign}{repr}")
}

// Integer part, then up to `precision` fraction digits of a
// non-negative rational.
fn plain_digits(abs: &BigRational, precision: usize) -> String {
    let (int, mut rem) = abs.numer().div_rem(abs.denom());
    let mut digits = String::new();
    for _ in 0..precision {
        if rem.is_zero() {
            break;
        }
        rem *= 10u8;
        let (d, r) = rem.div_rem(abs.denom());
        digits.push_str(&d.to_string());
        rem = r;
    }

    let digits = digits.trim_end_matches('0');
    if digits.is_empty() {
        int.to_string()
    } else {
        format!("{int}.{digits}")
    }
}

// Returns `k` such that `10^k <= abs < 10^(k+1)`; `abs` must be positive.
fn floor_log10(abs: &BigRational) -> i64 {
    let ten = BigRational::from_integer(BigInt::from(10u8));
    let mut k = abs.numer().to_string().len() as i64 - abs.denom().to_string().len() as i64;
    let pow = |k: i64| {
        if k >= 0 {
            num_traits::pow(ten.clone(), k as usize)
        } else {
            num_traits::pow(ten.clone(), (-k) as usize).recip()
        }
    };

    // the digit-count estimate is off by at most one
    while &pow(k) > abs {
        k -= 1;
    }
    while &pow(k + 1) <= abs {
        k += 1;
    }
    k
}
