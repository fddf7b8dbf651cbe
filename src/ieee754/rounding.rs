/*
    Rounding
*/

use super::*;

impl RoundingMode {
    /// Returns true if this mode rounds to the nearest value,
    /// only using a direction to break ties.
    pub fn is_nearest(&self) -> bool {
        matches!(self, RoundingMode::NearestEven | RoundingMode::NearestAway)
    }

    /// Returns true if an inexact magnitude of a value with
    /// the given sign moves away from zero under this directed mode.
    /// Nearest modes and `ToOdd` decide per value and return false.
    pub fn rounds_away(&self, sign: bool) -> bool {
        match self {
            RoundingMode::ToPositive => !sign,
            RoundingMode::ToNegative => sign,
            RoundingMode::AwayZero => true,
            _ => false,
        }
    }
}

// Implementing EncodeContext
impl EncodeContext {
    /// Creates a new encoding context with `rm` set to
    /// `RoundingMode::NearestEven`, `ftz` set to false,
    /// and non-finite inputs rejected.
    pub fn new() -> Self {
        Self {
            rm: RoundingMode::NearestEven,
            ftz: false,
            nonfinite: false,
        }
    }

    /// Sets the rounding mode.
    pub fn rounding_mode(mut self, rm: RoundingMode) -> Self {
        self.rm = rm;
        self
    }

    /// Sets the flush-to-zero option: subnormal results become signed zeros.
    pub fn flush_subnormals(mut self, ftz: bool) -> Self {
        self.ftz = ftz;
        self
    }

    /// Allows infinities and NaN as inputs to `encode`.
    pub fn nonfinite(mut self, enabled: bool) -> Self {
        self.nonfinite = enabled;
        self
    }

    /// The rounding mode.
    pub fn rm(&self) -> RoundingMode {
        self.rm
    }

    /// Returns true if subnormal results are flushed to zero.
    pub fn ftz(&self) -> bool {
        self.ftz
    }

    /// Returns true if non-finite inputs are accepted.
    pub fn allows_nonfinite(&self) -> bool {
        self.nonfinite
    }
}

impl Default for EncodeContext {
    fn default() -> Self {
        Self::new()
    }
}

// Returns true if the rounding information implies the significand,
// as viewed as integer, should be incremented by 1.
//  `half_bit`: the discarded part is at least half an ulp
//  `sticky_bit`: the discarded part is not exactly 0 or exactly half an ulp
pub(crate) fn round_requires_increment(
    sign: bool,
    lsb: bool,
    half_bit: bool,
    sticky_bit: bool,
    rm: RoundingMode,
) -> bool {
    let inexact = half_bit || sticky_bit;
    match rm {
        // tie => increment if lsb since we want it to be 0
        RoundingMode::NearestEven => half_bit && (sticky_bit || lsb),
        // tie => increment
        RoundingMode::NearestAway => half_bit,
        // LSB needs to be 1 if not exact
        RoundingMode::ToOdd => inexact && !lsb,
        _ => inexact && rm.rounds_away(sign),
    }
}

// Assuming overflow has occured, return true if
// the result should be rounded to +/- infinity
// (rather than +/- MAX_FLOAT).
pub(crate) fn overflow_to_infinity(sign: bool, rm: RoundingMode) -> bool {
    rm.is_nearest() || rm.rounds_away(sign)
}
