/*
    Enumeration of bit patterns
*/

use std::ops::Add;

use num_bigint::BigUint;
use rayon::prelude::*;
use tracing::debug;

use super::util::u64_to_bitvec;
use super::*;
use crate::{CodecError, Result};

/// Formats at most this wide are enumerated exhaustively by default.
pub const EXHAUSTIVE_BITS: usize = 16;

/// Default number of patterns enumerated for wider formats.
pub const DEFAULT_SAMPLE_SIZE: u64 = 1 << 16;

/// A finite, ascending range of bit patterns `0 .. len` of one format.
///
/// The range itself is immutable; every call to `iter` starts over.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Enumeration {
    format: FloatFormat,
    end: u64,
}

/// Iterator over the bit patterns of an `Enumeration`.
#[derive(Clone, Debug)]
pub struct Iter {
    total_bits: usize,
    next: u64,
    end: u64,
}

/// Number of patterns in each classification.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ClassCounts {
    pub zero: u64,
    pub subnormal: u64,
    pub normal: u64,
    pub infinity: u64,
    pub nan: u64,
}

impl Enumeration {
    /// Creates the range `0 .. min(limit, 2^total_bits)`.
    ///
    /// Without a `limit`, formats of up to `EXHAUSTIVE_BITS` bits are
    /// enumerated completely and wider ones are cut at `DEFAULT_SAMPLE_SIZE`.
    pub fn new(format: &FloatFormat, limit: Option<u64>) -> Self {
        let total = format.total_bits();
        let limit = limit.unwrap_or(if total <= EXHAUSTIVE_BITS {
            u64::MAX
        } else {
            DEFAULT_SAMPLE_SIZE
        });
        let end = if total < 64 {
            u64::min(limit, 1_u64 << total)
        } else {
            limit
        };

        debug!(format = %format, patterns = end, "enumeration");
        Self {
            format: *format,
            end,
        }
    }

    /// The format being enumerated.
    pub fn format(&self) -> &FloatFormat {
        &self.format
    }

    /// Number of patterns in the range.
    pub fn len(&self) -> u64 {
        self.end
    }

    /// Returns true if the range is empty.
    pub fn is_empty(&self) -> bool {
        self.end == 0
    }

    /// Returns an iterator over the patterns in ascending order.
    pub fn iter(&self) -> Iter {
        Iter {
            total_bits: self.format.total_bits(),
            next: 0,
            end: self.end,
        }
    }

    /// Decodes every pattern of the range in parallel.
    /// The results are in ascending pattern order.
    pub fn par_decode(&self) -> Result<Vec<DecodedValue>> {
        let end = usize::try_from(self.end).map_err(|_| {
            CodecError::UnrepresentableInput(format!("{} patterns do not fit in memory", self.end))
        })?;
        let format = self.format;
        let total = format.total_bits();

        (0..end)
            .into_par_iter()
            .map(|i| {
                let bits = BitLayout {
                    bits: u64_to_bitvec(i as u64, total),
                };
                decode(&bits, &format)
            })
            .collect()
    }

    /// Counts the classifications of the range, in parallel.
    pub fn class_counts(&self) -> ClassCounts {
        let format = self.format;
        (0..self.end)
            .into_par_iter()
            .map(|i| classify(&fields_of(i, &format), &format))
            .fold(ClassCounts::default, |acc, c| acc.with(c))
            .reduce(ClassCounts::default, |a, b| a + b)
    }
}

impl<'a> IntoIterator for &'a Enumeration {
    type Item = BitLayout;
    type IntoIter = Iter;

    fn into_iter(self) -> Iter {
        self.iter()
    }
}

// Splits the pattern with unsigned value `i` without building a layout.
fn fields_of(i: u64, format: &FloatFormat) -> RawFields {
    let total = format.total_bits();
    let m = format.significand_width();
    let sign = total <= 64 && (i >> (total - 1)) & 1 == 1;
    let (exponent, significand) = if m >= 64 {
        (0, i)
    } else {
        let e = (i >> m) & format.max_exponent_field();
        (e, i & ((1_u64 << m) - 1))
    };

    RawFields {
        sign,
        exponent,
        significand: BigUint::from(significand),
    }
}

impl Iterator for Iter {
    type Item = BitLayout;

    fn next(&mut self) -> Option<BitLayout> {
        if self.next >= self.end {
            return None;
        }
        let i = self.next;
        self.next += 1;
        Some(BitLayout {
            bits: u64_to_bitvec(i, self.total_bits),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.end - self.next;
        match usize::try_from(n) {
            Ok(n) => (n, Some(n)),
            Err(_) => (usize::MAX, None),
        }
    }
}

impl DoubleEndedIterator for Iter {
    fn next_back(&mut self) -> Option<BitLayout> {
        if self.next >= self.end {
            return None;
        }
        self.end -= 1;
        Some(BitLayout {
            bits: u64_to_bitvec(self.end, self.total_bits),
        })
    }
}

impl ClassCounts {
    /// Returns the counts with one more pattern of class `c`.
    pub fn with(mut self, c: Classification) -> Self {
        match c {
            Classification::Zero => self.zero += 1,
            Classification::Subnormal => self.subnormal += 1,
            Classification::Normal => self.normal += 1,
            Classification::Infinity => self.infinity += 1,
            Classification::Nan => self.nan += 1,
        }
        self
    }

    /// Returns the count of class `c`.
    pub fn get(&self, c: Classification) -> u64 {
        match c {
            Classification::Zero => self.zero,
            Classification::Subnormal => self.subnormal,
            Classification::Normal => self.normal,
            Classification::Infinity => self.infinity,
            Classification::Nan => self.nan,
        }
    }

    /// Total number of patterns counted.
    pub fn total(&self) -> u64 {
        self.zero + self.subnormal + self.normal + self.infinity + self.nan
    }
}

impl Add for ClassCounts {
    type Output = ClassCounts;

    fn add(self, other: ClassCounts) -> ClassCounts {
        ClassCounts {
            zero: self.zero + other.zero,
            subnormal: self.subnormal + other.subnormal,
            normal: self.normal + other.normal,
            infinity: self.infinity + other.infinity,
            nan: self.nan + other.nan,
        }
    }
}
