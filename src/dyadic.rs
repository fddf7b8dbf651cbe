/*
    Exact dyadic rationals
*/

use std::cmp::Ordering;
use std::fmt;

use num_bigint::{BigInt, BigUint, Sign};
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};
use serde::{Deserialize, Serialize};

/// An exact rational number whose denominator is a power of two,
/// stored as `numer * 2^exp`.
///
/// Every finite value of a binary floating-point format is a `Dyadic`.
/// The representation is always reduced: either the value is zero
/// (and `exp == 0`) or `numer` is odd. Two equal values therefore have
/// identical fields.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Dyadic {
    numer: BigInt,
    exp: i64,
}

/// A numerator/denominator pair of decimal integer strings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fraction {
    pub num: String,
    pub den: String,
}

impl Dyadic {
    /// Creates `numer * 2^exp`, reducing it.
    pub fn new(numer: BigInt, exp: i64) -> Self {
        if numer.is_zero() {
            return Self::zero();
        }

        // `numer` is non-zero, so it has a lowest set bit
        let tz = numer.trailing_zeros().unwrap_or(0);
        Self {
            numer: numer >> tz,
            exp: exp + tz as i64,
        }
    }

    /// Creates `(-1)^sign * magnitude * 2^exp`.
    pub fn from_parts(sign: bool, magnitude: BigUint, exp: i64) -> Self {
        let s = if sign { Sign::Minus } else { Sign::Plus };
        Self::new(BigInt::from_biguint(s, magnitude), exp)
    }

    /// The value zero.
    pub fn zero() -> Self {
        Self {
            numer: BigInt::zero(),
            exp: 0,
        }
    }

    /// Returns true if this value is zero.
    pub fn is_zero(&self) -> bool {
        self.numer.is_zero()
    }

    /// Returns true if this value is strictly negative.
    pub fn is_negative(&self) -> bool {
        self.numer.is_negative()
    }

    /// The reduced (odd, or zero) numerator.
    pub fn numer(&self) -> &BigInt {
        &self.numer
    }

    /// The power of two scaling the numerator.
    pub fn exp(&self) -> i64 {
        self.exp
    }

    /// Returns the value as a fraction `num / den` in lowest terms,
    /// with `den` a positive power of two.
    pub fn to_num_den(&self) -> (BigInt, BigInt) {
        if self.exp >= 0 {
            (&self.numer << self.exp as usize, BigInt::one())
        } else {
            (self.numer.clone(), BigInt::one() << (-self.exp) as usize)
        }
    }

    /// Returns the value as a `BigRational`.
    pub fn to_rational(&self) -> BigRational {
        let (n, d) = self.to_num_den();
        BigRational::new_raw(n, d)
    }

    /// Returns the value as a pair of decimal integer strings.
    pub fn to_fraction(&self) -> Fraction {
        let (n, d) = self.to_num_den();
        Fraction {
            num: n.to_string(),
            den: d.to_string(),
        }
    }

    /// Returns the exact decimal expansion of this value.
    ///
    /// Since `2^-k = 5^k / 10^k`, the expansion of a dyadic rational
    /// always terminates after `-exp` fraction digits.
    pub fn to_decimal_string(&self) -> String {
        if self.exp >= 0 {
            return (&self.numer << self.exp as usize).to_string();
        }

        let k = (-self.exp) as usize;
        let digits = (self.numer.abs() * num_traits::pow(BigInt::from(5u8), k)).to_string();
        let (int_part, frac_part) = if digits.len() > k {
            let (i, f) = digits.split_at(digits.len() - k);
            (i.to_string(), f.to_string())
        } else {
            ("0".to_string(), format!("{}{}", "0".repeat(k - digits.len()), digits))
        };

        let sign = if self.is_negative() { "-" } else { "" };
        format!("{sign}{int_part}.{frac_part}")
    }
}

impl Default for Dyadic {
    fn default() -> Self {
        Self::zero()
    }
}

impl PartialOrd for Dyadic {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Dyadic {
    fn cmp(&self, other: &Self) -> Ordering {
        // align to the smaller exponent and compare numerators
        let e = i64::min(self.exp, other.exp);
        let a = &self.numer << (self.exp - e) as usize;
        let b = &other.numer << (other.exp - e) as usize;
        a.cmp(&b)
    }
}

impl From<Dyadic> for BigRational {
    fn from(d: Dyadic) -> Self {
        d.to_rational()
    }
}

impl fmt::Display for Dyadic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (n, d) = self.to_num_den();
        if d.is_one() {
            write!(f, "{n}")
        } else {
            write!(f, "{n}/{d}")
        }
    }
}
