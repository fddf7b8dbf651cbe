/*
    Rounding modes
*/

/// Possible rounding modes.
///
/// Converting an exact value into a binary format is a
/// "fit-to-representation" operation `R -> F`; the mode decides which
/// of the two representable neighbors a value between them takes.
///
/// The first two modes round to the nearest representable value and only
/// differ in how ties are broken; the rest are directed roundings.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum RoundingMode {
    /// Round to nearest, ties to even.
    #[default]
    NearestEven,
    /// Round to nearest, ties away from zero.
    NearestAway,
    /// Round toward +infinity.
    ToPositive,
    /// Round toward -infinity.
    ToNegative,
    /// Round toward zero (truncation).
    ToZero,
    /// Round away from zero.
    AwayZero,
    /// Round to odd: inexact results take the neighbor with an odd last digit.
    ToOdd,
}
