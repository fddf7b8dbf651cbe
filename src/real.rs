/*
    Encoder input values
*/

use std::str::FromStr;

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{Signed, Zero};

use crate::{decimal, CodecError, Dyadic, Number};

/// A value to be encoded into a binary format.
///
/// Finite values keep their sign apart from the magnitude so that
/// negative zero can be requested explicitly.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RealNum {
    // signed exact rational
    // => (sign, |value|)
    Finite { sign: bool, magnitude: BigRational },
    // infinity (+/-)
    Infinity(bool),
    // not-a-number
    Nan,
}

impl RealNum {
    /// Creates a finite value from a signed rational.
    /// A zero input is positive zero.
    pub fn finite(value: BigRational) -> Self {
        Self::Finite {
            sign: value.is_negative(),
            magnitude: value.abs(),
        }
    }

    /// Returns a zero with a particular sign.
    pub fn zero(sign: bool) -> Self {
        Self::Finite {
            sign,
            magnitude: BigRational::zero(),
        }
    }

    /// Returns the sign of this value. NaN is positive.
    pub fn sign(&self) -> bool {
        match self {
            RealNum::Finite { sign, .. } => *sign,
            RealNum::Infinity(s) => *s,
            RealNum::Nan => false,
        }
    }

    /// Returns the exact value as a signed rational.
    /// The result is wrapped in an option since only finite
    /// values are rational.
    pub fn to_rational(&self) -> Option<BigRational> {
        match self {
            RealNum::Finite { sign: true, magnitude } => Some(-magnitude.clone()),
            RealNum::Finite { sign: false, magnitude } => Some(magnitude.clone()),
            _ => None,
        }
    }
}

impl Number for RealNum {
    fn is_zero(&self) -> bool {
        matches!(self, RealNum::Finite { magnitude, .. } if magnitude.is_zero())
    }

    fn is_infinity(&self) -> bool {
        matches!(self, RealNum::Infinity(_))
    }

    fn is_nan(&self) -> bool {
        matches!(self, RealNum::Nan)
    }

    fn is_negative(&self) -> bool {
        self.sign()
    }
}

impl From<BigRational> for RealNum {
    fn from(value: BigRational) -> Self {
        Self::finite(value)
    }
}

impl From<BigInt> for RealNum {
    fn from(value: BigInt) -> Self {
        Self::finite(BigRational::from_integer(value))
    }
}

impl From<i64> for RealNum {
    fn from(value: i64) -> Self {
        Self::from(BigInt::from(value))
    }
}

impl From<Dyadic> for RealNum {
    fn from(value: Dyadic) -> Self {
        Self::finite(value.to_rational())
    }
}

impl FromStr for RealNum {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        decimal::parse_decimal(s)
    }
}
