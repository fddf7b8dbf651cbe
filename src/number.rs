/*
    Defines a number
*/

/// A value read out of (or headed into) a binary format.
///
/// A `Number` classifies a value the way IEEE-754 does:
/// zeros, finite numbers, infinities, and values that are not numbers.
/// This is just a bare-bones query interface; no arithmetic is provided.
pub trait Number {
    /// Returns true if this `Number` encodes a zero.
    fn is_zero(&self) -> bool;

    /// Returns true if this `Number` encodes an infinity.
    fn is_infinity(&self) -> bool;

    /// Returns true if this `Number` does not encode a number.
    fn is_nan(&self) -> bool;

    /// Returns true if this `Number` encodes a finite number.
    fn is_finite(&self) -> bool {
        !self.is_infinity() && !self.is_nan()
    }

    /// Returns true if this `Number` encodes a rational number.
    /// Every finite value of a binary format is rational.
    fn is_rational(&self) -> bool {
        self.is_finite()
    }

    /// Returns true if the sign of this `Number` is negative.
    /// Zeros and NaNs carry a sign too.
    fn is_negative(&self) -> bool;
}
