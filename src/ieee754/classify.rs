/*
    Classification of raw fields
*/

use num_traits::Zero;

use super::*;

/// Determines what a triple of raw fields represents in `format`.
///
/// The sign never affects the class.
pub fn classify(raw: &RawFields, format: &FloatFormat) -> Classification {
    let max = format.max_exponent_field();
    match (raw.exponent, raw.significand.is_zero()) {
        (0, true) => Classification::Zero,
        (0, false) => Classification::Subnormal,
        (e, true) if e == max => Classification::Infinity,
        (e, false) if e == max => Classification::Nan,
        _ => Classification::Normal,
    }
}

impl Classification {
    /// Returns true for zeros, subnormals and normals.
    pub fn is_finite(&self) -> bool {
        matches!(
            self,
            Classification::Zero | Classification::Subnormal | Classification::Normal
        )
    }

    /// The upper-case name used in reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            Classification::Zero => "ZERO",
            Classification::Subnormal => "SUBNORMAL",
            Classification::Normal => "NORMAL",
            Classification::Infinity => "INFINITY",
            Classification::Nan => "NAN",
        }
    }
}

impl std::fmt::Display for Classification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
