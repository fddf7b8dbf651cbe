/*
    IEEE-754 style binary formats of arbitrary width
*/

use bitvec::prelude::Lsb0;
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

use crate::RoundingMode;

mod classify;
mod decode;
mod encode;
mod enumerate;
mod exceptions;
mod format;
mod layout;
mod rounding;
mod util;

pub use classify::classify;
pub use decode::{decode, decode_bit_string, decode_hex, DecodedReport, DecodedValue};
pub use encode::{convert, encode, encode_str, encode_with, Encoding};
pub use enumerate::{ClassCounts, Enumeration, Iter, DEFAULT_SAMPLE_SIZE, EXHAUSTIVE_BITS};

pub(crate) type BitVec = bitvec::prelude::BitVec<u32, Lsb0>;

/// Largest total bitwidth accepted for a format.
pub const MAX_TOTAL_BITS: usize = 4096;

/// Largest number of bits the exact value of any pattern may need.
///
/// The widest numerator or denominator of a format is about `bias + M`
/// bits (smallest subnormal, largest finite value), so a format is only
/// accepted when `bias + M + 1 <= MAX_VALUE_BITS`. This caps the exponent
/// width at 17 (with `M = 0`); the IEEE-754 presets are far below it.
pub const MAX_VALUE_BITS: u64 = 1 << 16;

/** Description of a binary floating-point layout.
 *
 * A format is fixed by the width `E` of the exponent field and the
 * width `M` of the (fractional) significand field. Together with
 * the sign bit the layout is `1 + E + M` bits wide:
 *
 *  - sign: the most significant bit,
 *  - exponent: the next `E` bits, biased by `2^(E-1) - 1`,
 *  - significand: the low `M` bits, with an implicit leading 1
 *    for normal numbers.
 *
 * The standard presets and custom formats share this one type.
 */
#[derive(Copy, Clone, Debug)]
pub struct FloatFormat {
    exponent_width: usize,
    significand_width: usize,
    name: Option<&'static str>,
}

/// Bit-level view over one value of some format.
///
/// Bit `i` of the underlying vector has weight `2^i`, so the sign bit is
/// the last one and the significand occupies the lowest `M` bits.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct BitLayout {
    bits: BitVec,
}

/// The three fields of a packed value.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RawFields {
    /// Sign bit (true is negative).
    pub sign: bool,
    /// Biased exponent field, less than `2^E`.
    pub exponent: u64,
    /// Significand field without the implicit bit, less than `2^M`.
    pub significand: BigUint,
}

/// Classification of an encoded value.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Classification {
    Zero,
    Subnormal,
    Normal,
    Infinity,
    Nan,
}

/** Exception flags as specified by the IEEE-754 standard.
 *
 * Besides the encoded bits, converting an exact value into a format
 * may raise exceptions depending on certain conditions:
 *
 *  - invalid: a signaling NaN was converted (quieted);
 *  - overflow: result exceeded in magnitude what would have been the rounded result
 *      had the exponent range been unbounded;
 *  - underflow: non-zero result that is tiny (below the smallest normal
 *      magnitude before rounding) and inexact, or flushed to zero;
 *  - inexact: result differs from the exact input;
 *  - carry: the significand was incremented while rounding.
 *
 */
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Exceptions {
    invalid: bool,
    overflow: bool,
    underflow: bool,
    inexact: bool,
    carry: bool,
}

/// Rounding context for encoding.
///
/// Encoding defaults to round-to-nearest-even, keeps subnormal
/// results, and rejects non-finite inputs.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct EncodeContext {
    rm: RoundingMode,
    ftz: bool,
    nonfinite: bool,
}
