/*
    Format parameters
*/

use std::fmt;
use std::str::FromStr;

use super::*;
use crate::{CodecError, Result};

// Checks the format parameters, reporting the first violation.
fn check_format(e: usize, m: usize) -> Result<()> {
    if e < 1 {
        return Err(CodecError::InvalidFormat(format!(
            "invalid exponent width, must be E >= 1: {}",
            e
        )));
    }

    let total = 1 + e + m;
    if total > MAX_TOTAL_BITS {
        return Err(CodecError::InvalidFormat(format!(
            "invalid total width, must be 1 + E + M <= {}: {}",
            MAX_TOTAL_BITS, total
        )));
    }

    // exact values span about `bias + M` bits; `e - 1 < 64` keeps the bias in range
    let fits = e - 1 < 64 && ((1_u64 << (e - 1)) - 1) + m as u64 + 1 <= MAX_VALUE_BITS;
    if !fits {
        return Err(CodecError::InvalidFormat(format!(
            "exact values of E{}M{} need more than {} bits",
            e, m, MAX_VALUE_BITS
        )));
    }

    Ok(())
}

// Constructors
impl FloatFormat {
    /// Creates a format with `e` exponent bits and `m` significand bits.
    pub fn custom(e: usize, m: usize) -> Result<Self> {
        check_format(e, m)?;
        Ok(Self {
            exponent_width: e,
            significand_width: m,
            name: None,
        })
    }

    const fn named(e: usize, m: usize, name: &'static str) -> Self {
        Self {
            exponent_width: e,
            significand_width: m,
            name: Some(name),
        }
    }

    /// IEEE-754 binary16 (E=5, M=10).
    pub const fn fp16() -> Self {
        Self::named(5, 10, "FP16")
    }

    /// bfloat16 (E=8, M=7).
    pub const fn bf16() -> Self {
        Self::named(8, 7, "BF16")
    }

    /// NVIDIA TensorFloat-32 (E=8, M=10).
    pub const fn tf32() -> Self {
        Self::named(8, 10, "TF32")
    }

    /// IEEE-754 binary32 (E=8, M=23).
    pub const fn fp32() -> Self {
        Self::named(8, 23, "FP32")
    }

    /// IEEE-754 binary64 (E=11, M=52).
    pub const fn fp64() -> Self {
        Self::named(11, 52, "FP64")
    }

    /// Looks up a preset by name, ignoring case.
    /// Accepts `FP16`/`half`, `BF16`/`bfloat16`, `TF32`/`tensorfloat32`,
    /// `FP32`/`single` and `FP64`/`double`.
    pub fn preset(name: &str) -> Result<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "fp16" | "half" | "binary16" => Ok(Self::fp16()),
            "bf16" | "bfloat16" => Ok(Self::bf16()),
            "tf32" | "tensorfloat32" | "tensorfloat-32" => Ok(Self::tf32()),
            "fp32" | "single" | "binary32" => Ok(Self::fp32()),
            "fp64" | "double" | "binary64" => Ok(Self::fp64()),
            _ => Err(CodecError::InvalidFormat(format!("unknown format preset: {name}"))),
        }
    }
}

// Format parameters
impl FloatFormat {
    /// Bitwidth of the exponent field (`E`).
    #[inline]
    pub const fn exponent_width(&self) -> usize {
        self.exponent_width
    }

    /// Bitwidth of the significand field (`M`).
    #[inline]
    pub const fn significand_width(&self) -> usize {
        self.significand_width
    }

    /// Bitwidth of the representation: `1 + E + M`.
    #[inline]
    pub const fn total_bits(&self) -> usize {
        1 + self.exponent_width + self.significand_width
    }

    /// Number of hex digits in the canonical hex form.
    #[inline]
    pub const fn hex_digits(&self) -> usize {
        (self.total_bits() + 3) / 4
    }

    /// Number of (binary) digits when the significand is expressed
    /// as an integer. This is just `M + 1`.
    #[inline]
    pub const fn prec(&self) -> usize {
        self.significand_width + 1
    }

    /// The exponent field bias: `2^(E-1) - 1`.
    #[inline]
    pub const fn bias(&self) -> i64 {
        (1_i64 << (self.exponent_width - 1)) - 1
    }

    /// The all-ones exponent field, reserved for infinities and NaNs.
    #[inline]
    pub const fn max_exponent_field(&self) -> u64 {
        (1_u64 << self.exponent_width) - 1
    }

    /// The smallest exponent field of a normal number.
    #[inline]
    pub const fn min_normal_exponent_field(&self) -> u64 {
        1
    }

    /// Exponent of the largest finite value when it is in the
    /// form `(-1)^s 2^e m` where `m` is a fraction between 1 and 2.
    #[inline]
    pub const fn emax(&self) -> i64 {
        self.max_exponent_field() as i64 - 1 - self.bias()
    }

    /// Exponent of the smallest normal value when it is in the
    /// form `(-1)^s 2^e m` where `m` is a fraction between 1 and 2.
    /// This is just `1 - bias`.
    #[inline]
    pub const fn emin(&self) -> i64 {
        1 - self.bias()
    }

    /// The preset name, if this format is a preset.
    pub fn name(&self) -> Option<&'static str> {
        self.name
    }
}

// Formats are equal when their layouts are, whatever their names.
impl PartialEq for FloatFormat {
    fn eq(&self, other: &Self) -> bool {
        self.exponent_width == other.exponent_width
            && self.significand_width == other.significand_width
    }
}

impl Eq for FloatFormat {}

impl std::hash::Hash for FloatFormat {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.exponent_width.hash(state);
        self.significand_width.hash(state);
    }
}

impl fmt::Display for FloatFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name {
            Some(name) => write!(f, "{name}"),
            None => write!(f, "E{}M{}", self.exponent_width, self.significand_width),
        }
    }
}

// Parses a preset name or `E<e>M<m>`
impl FromStr for FloatFormat {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self> {
        let lower = s.trim().to_ascii_lowercase();
        let custom = lower
            .strip_prefix('e')
            .and_then(|rest| rest.split_once('m'))
            .and_then(|(e, m)| Some((e.parse::<usize>().ok()?, m.parse::<usize>().ok()?)));

        match custom {
            Some((e, m)) => Self::custom(e, m),
            None => Self::preset(&lower),
        }
    }
}
