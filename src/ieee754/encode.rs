/*
    Encoding exact values into bit layouts
*/

use num_bigint::BigUint;
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};
use tracing::debug;

use super::rounding::{overflow_to_infinity, round_requires_increment};
use super::*;
use crate::{CodecError, RealNum, Result};

/// The result of an encoding: the bits and the exceptions raised
/// while producing them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Encoding {
    bits: BitLayout,
    flags: Exceptions,
}

impl Encoding {
    fn new(bits: BitLayout, flags: Exceptions) -> Self {
        Self { bits, flags }
    }

    /// The encoded bits.
    pub fn bits(&self) -> &BitLayout {
        &self.bits
    }

    /// Consumes the encoding, returning the bits.
    pub fn into_bits(self) -> BitLayout {
        self.bits
    }

    /// The exceptions raised by the encoding.
    pub fn flags(&self) -> Exceptions {
        self.flags
    }
}

/// Encodes `value` in `format` with the default context:
/// round-to-nearest-even, subnormals kept, non-finite inputs rejected.
pub fn encode(value: &RealNum, format: &FloatFormat) -> Result<BitLayout> {
    encode_with(value, format, &EncodeContext::default()).map(Encoding::into_bits)
}

/// Parses a decimal string and encodes it with the default context.
pub fn encode_str(text: &str, format: &FloatFormat) -> Result<BitLayout> {
    encode(&text.parse()?, format)
}

/// Encodes `value` in `format` under the rounding context `ctx`.
///
/// Finite inputs always succeed: values too large overflow to infinity
/// (or the largest finite value, for directed rounding toward zero) and
/// values too small underflow to a signed zero. Infinities and NaN are
/// only accepted when `ctx` allows non-finite inputs.
pub fn encode_with(value: &RealNum, format: &FloatFormat, ctx: &EncodeContext) -> Result<Encoding> {
    match value {
        RealNum::Finite { sign, magnitude } => {
            let sign = *sign != magnitude.is_negative();
            encode_finite(sign, &magnitude.abs(), format, ctx)
        }
        RealNum::Infinity(s) if ctx.allows_nonfinite() => {
            Ok(Encoding::new(infinity(*s, format)?, Exceptions::default()))
        }
        RealNum::Nan if ctx.allows_nonfinite() => {
            Ok(Encoding::new(quiet_nan(false, format)?, Exceptions::default()))
        }
        _ => Err(CodecError::UnrepresentableInput(format!(
            "non-finite input cannot be encoded in {} without non-finite support",
            format
        ))),
    }
}

/// Re-encodes the value of `bits` (a layout of format `from`) in format `to`.
///
/// Finite values are rounded under `ctx`; infinities stay infinities and
/// NaNs become the quiet NaN of `to`. Converting a signaling NaN raises
/// the `invalid` flag.
pub fn convert(
    bits: &BitLayout,
    from: &FloatFormat,
    to: &FloatFormat,
    ctx: &EncodeContext,
) -> Result<Encoding> {
    decode(bits, from)?.round(to, ctx)
}

impl DecodedValue {
    /// Rounds this value into `format` under `ctx`.
    pub fn round(&self, format: &FloatFormat, ctx: &EncodeContext) -> Result<Encoding> {
        match self.value() {
            Some(v) => {
                let magnitude = v.to_rational().abs();
                encode_finite(self.sign(), &magnitude, format, ctx)
            }
            None if self.class() == Classification::Infinity => {
                Ok(Encoding::new(infinity(self.sign(), format)?, Exceptions::default()))
            }
            None => {
                let signaling = self.is_signaling_nan().unwrap_or(false);
                let flags = Exceptions::default().with_invalid(signaling);
                Ok(Encoding::new(quiet_nan(self.sign(), format)?, flags))
            }
        }
    }
}

fn pack(sign: bool, exponent: u64, significand: BigUint, format: &FloatFormat) -> Result<BitLayout> {
    RawFields {
        sign,
        exponent,
        significand,
    }
    .pack(format)
}

fn infinity(sign: bool, format: &FloatFormat) -> Result<BitLayout> {
    pack(sign, format.max_exponent_field(), BigUint::zero(), format)
}

// Largest finite magnitude: all-ones significand below the reserved exponent.
fn max_finite(sign: bool, format: &FloatFormat) -> Result<BitLayout> {
    let m = format.significand_width();
    let significand = (BigUint::one() << m) - 1_u8;
    pack(sign, format.max_exponent_field() - 1, significand, format)
}

// Quiet NaN: only the top significand bit is set.
fn quiet_nan(sign: bool, format: &FloatFormat) -> Result<BitLayout> {
    let m = format.significand_width();
    if m == 0 {
        return Err(CodecError::UnrepresentableInput(format!(
            "{} has no NaN encoding",
            format
        )));
    }
    pack(sign, format.max_exponent_field(), BigUint::one() << (m - 1), format)
}

fn overflow(sign: bool, format: &FloatFormat, ctx: &EncodeContext, carry: bool) -> Result<Encoding> {
    let flags = Exceptions::default()
        .with_overflow(true)
        .with_inexact(true)
        .with_carry(carry);
    let bits = if overflow_to_infinity(sign, ctx.rm()) {
        infinity(sign, format)?
    } else {
        max_finite(sign, format)?
    };

    debug!(format = %format, sign, result = %bits, "overflow");
    Ok(Encoding::new(bits, flags))
}

// Returns `e` such that `2^e <= num/den < 2^(e+1)`; both must be positive.
fn floor_log2(num: &BigUint, den: &BigUint) -> i64 {
    let k = num.bits() as i64 - den.bits() as i64;

    // num/den lies in (2^(k-1), 2^(k+1))
    let at_least = if k >= 0 {
        *num >= den << k as usize
    } else {
        num << (-k) as usize >= *den
    };

    if at_least {
        k
    } else {
        k - 1
    }
}

// Encodes `(-1)^sign * magnitude` for a non-negative `magnitude`.
fn encode_finite(
    sign: bool,
    magnitude: &BigRational,
    format: &FloatFormat,
    ctx: &EncodeContext,
) -> Result<Encoding> {
    if magnitude.is_zero() {
        return Ok(Encoding::new(
            pack(sign, 0, BigUint::zero(), format)?,
            Exceptions::default(),
        ));
    }

    let num = magnitude.numer().magnitude();
    let den = magnitude.denom().magnitude();
    let m = format.significand_width();
    let e = floor_log2(num, den);

    // beyond the largest binade, no rounding can bring the value back
    if e > format.emax() {
        return overflow(sign, format, ctx, false);
    }

    // quantum exponent: subnormals share the exponent of the smallest normal
    let tiny = e < format.emin();
    let mut q = i64::max(e, format.emin()) - m as i64;

    // c = floor(magnitude / 2^q) with exact remainder `rem / d`
    let (n, d) = if q <= 0 {
        (num << (-q) as usize, den.clone())
    } else {
        (num.clone(), den << q as usize)
    };
    let (mut c, rem) = n.div_rem(&d);

    // rounding information from the discarded part
    let twice: BigUint = &rem << 1_usize;
    let half_bit = twice >= d;
    let sticky_bit = if half_bit { twice > d } else { !rem.is_zero() };
    let inexact = !rem.is_zero();

    let increment = round_requires_increment(sign, c.is_odd(), half_bit, sticky_bit, ctx.rm());
    if increment {
        c += 1_u8;
    }

    // significand overflow carries into the exponent
    if c.bits() > format.prec() as u64 {
        c >>= 1_usize;
        q += 1;
        debug!(format = %format, "significand carry into exponent");
    }

    let implicit = BigUint::one() << m;
    let (exponent, significand) = if c >= implicit {
        ((q + m as i64 + format.bias()) as u64, c - implicit)
    } else {
        (0, c)
    };

    if exponent >= format.max_exponent_field() {
        return overflow(sign, format, ctx, increment);
    }

    let mut flags = Exceptions::default()
        .with_inexact(inexact)
        .with_underflow(tiny && inexact)
        .with_carry(increment);

    if exponent == 0 && !significand.is_zero() && ctx.ftz() {
        debug!(format = %format, sign, "subnormal result flushed to zero");
        flags = flags.with_underflow(true).with_inexact(true);
        return Ok(Encoding::new(pack(sign, 0, BigUint::zero(), format)?, flags));
    }

    if exponent == 0 && significand.is_zero() {
        debug!(format = %format, sign, "underflow to zero");
    }

    Ok(Encoding::new(pack(sign, exponent, significand, format)?, flags))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn floor_log2_bounds() {
        let f = |n: u32, d: u32| floor_log2(&BigUint::from(n), &BigUint::from(d));
        assert_eq!(f(1, 1), 0);
        assert_eq!(f(3, 2), 0);
        assert_eq!(f(2, 1), 1);
        assert_eq!(f(7, 1), 2);
        assert_eq!(f(1, 3), -2);
        assert_eq!(f(1, 4), -2);
        assert_eq!(f(1, 10), -4);
        assert_eq!(f(255, 256), -1);
    }
}
