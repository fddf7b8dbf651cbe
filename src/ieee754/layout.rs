/*
    Bit layouts and their text forms
*/

use std::fmt;

use num_bigint::BigUint;

use super::util::*;
use super::*;
use crate::{CodecError, Result};

// Strips an optional radix prefix (e.g. `0x` or `0X`).
fn strip_radix<'a>(text: &'a str, lower: &str, upper: &str) -> &'a str {
    text.strip_prefix(lower)
        .or_else(|| text.strip_prefix(upper))
        .unwrap_or(text)
}

fn check_width(total_bits: usize) -> Result<()> {
    if total_bits == 0 || total_bits > MAX_TOTAL_BITS {
        return Err(CodecError::MalformedInput(format!(
            "bit width must be between 1 and {}: {}",
            MAX_TOTAL_BITS, total_bits
        )));
    }
    Ok(())
}

// Constructors
impl BitLayout {
    /// Parses a hexadecimal string into exactly `total_bits` bits.
    ///
    /// The digits are read most significant first and are implicitly
    /// left-padded with zeros. An optional `0x` prefix is accepted.
    /// Any set bit beyond `total_bits` is rejected rather than dropped.
    pub fn from_hex(text: &str, total_bits: usize) -> Result<Self> {
        check_width(total_bits)?;
        let digits = strip_radix(text.trim(), "0x", "0X");
        if digits.is_empty() {
            return Err(CodecError::MalformedInput("empty hex input".into()));
        }
        if let Some(c) = digits.chars().find(|c| !c.is_ascii_hexdigit()) {
            return Err(CodecError::MalformedInput(format!("invalid hex digit: {c:?}")));
        }

        // only ASCII hex digits remain, so parsing cannot fail
        let value = BigUint::parse_bytes(digits.as_bytes(), 16)
            .ok_or_else(|| CodecError::MalformedInput(format!("invalid hex input: {text}")))?;
        Self::from_biguint(&value, total_bits)
    }

    /// Parses a string of `0`/`1` characters, most significant bit first.
    /// The string must hold exactly `total_bits` digits; an optional
    /// `0b` prefix is accepted.
    pub fn from_bit_string(text: &str, total_bits: usize) -> Result<Self> {
        check_width(total_bits)?;
        let digits = strip_radix(text.trim(), "0b", "0B");
        if let Some(c) = digits.chars().find(|c| *c != '0' && *c != '1') {
            return Err(CodecError::MalformedInput(format!("invalid binary digit: {c:?}")));
        }
        if digits.len() != total_bits {
            return Err(CodecError::MalformedInput(format!(
                "expected {} bits, received {}",
                total_bits,
                digits.len()
            )));
        }

        let mut bits = BitVec::with_capacity(total_bits);
        for c in digits.bytes().rev() {
            bits.push(c == b'1');
        }
        Ok(Self { bits })
    }

    /// Creates the layout whose unsigned integer interpretation is `value`.
    /// Fails if `value` needs more than `total_bits` bits.
    pub fn from_biguint(value: &BigUint, total_bits: usize) -> Result<Self> {
        check_width(total_bits)?;
        if value.bits() > total_bits as u64 {
            return Err(CodecError::MalformedInput(format!(
                "value 0x{:X} does not fit in {} bits",
                value, total_bits
            )));
        }
        Ok(Self {
            bits: biguint_to_bitvec(value, total_bits),
        })
    }

    /// Creates the layout whose unsigned integer interpretation is `index`.
    /// Fails if `index` needs more than `total_bits` bits.
    pub fn from_index(index: u64, total_bits: usize) -> Result<Self> {
        check_width(total_bits)?;
        if total_bits < 64 && index >> total_bits != 0 {
            return Err(CodecError::MalformedInput(format!(
                "index {} does not fit in {} bits",
                index, total_bits
            )));
        }
        Ok(Self {
            bits: u64_to_bitvec(index, total_bits),
        })
    }
}

// Views
impl BitLayout {
    /// Number of bits in this layout.
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// Always false: a layout holds at least one bit.
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Returns bit `i`, counting from the most significant bit.
    pub fn bit(&self, i: usize) -> Option<bool> {
        let n = self.bits.len();
        if i < n {
            Some(self.bits[n - 1 - i])
        } else {
            None
        }
    }

    /// Returns the unsigned integer interpretation of the bits.
    pub fn to_biguint(&self) -> BigUint {
        bits_to_biguint(&self.bits)
    }

    /// Returns the bits as uppercase hex, zero-padded to
    /// `ceil(len / 4)` digits.
    pub fn to_hex(&self) -> String {
        let width = (self.bits.len() + 3) / 4;
        format!("{:0width$X}", self.to_biguint(), width = width)
    }

    /// Returns the bits as a `0`/`1` string, most significant bit first.
    pub fn to_bit_string(&self) -> String {
        self.bits
            .iter()
            .by_vals()
            .rev()
            .map(|b| if b { '1' } else { '0' })
            .collect()
    }

    /// Splits the layout into sign, exponent and significand fields.
    pub fn split_fields(&self, format: &FloatFormat) -> Result<RawFields> {
        let n = format.total_bits();
        if self.bits.len() != n {
            return Err(CodecError::MalformedInput(format!(
                "expected a layout of {} bits for {}, received {}",
                n,
                format,
                self.bits.len()
            )));
        }

        let m = format.significand_width();
        Ok(RawFields {
            sign: self.bits[n - 1],
            exponent: bits_to_u64(&self.bits[m..n - 1]),
            significand: bits_to_biguint(&self.bits[..m]),
        })
    }
}

impl RawFields {
    /// Packs the fields into a layout of the given format.
    /// Fails if a field is too wide for the format.
    pub fn pack(&self, format: &FloatFormat) -> Result<BitLayout> {
        let e = format.exponent_width();
        let m = format.significand_width();
        if self.exponent > format.max_exponent_field() {
            return Err(CodecError::MalformedInput(format!(
                "exponent field {} does not fit in {} bits",
                self.exponent, e
            )));
        }
        if self.significand.bits() > m as u64 {
            return Err(CodecError::MalformedInput(format!(
                "significand field 0x{:X} does not fit in {} bits",
                self.significand, m
            )));
        }

        let mut bits = biguint_to_bitvec(&self.significand, m);
        bits.extend_from_bitslice(&u64_to_bitvec(self.exponent, e));
        bits.push(self.sign);
        Ok(BitLayout { bits })
    }
}

impl fmt::Display for BitLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for BitLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BitLayout({}; {} bits)", self.to_hex(), self.bits.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_padding_and_prefix() {
        let b = BitLayout::from_hex("3c00", 16).unwrap();
        assert_eq!(b.to_hex(), "3C00");
        assert_eq!(BitLayout::from_hex("0x1", 16).unwrap().to_hex(), "0001");
        assert_eq!(BitLayout::from_hex("00003C00", 16).unwrap(), b);
        // 19 bits => 5 digits, top digit may only use 3 bits
        assert_eq!(BitLayout::from_hex("7FFFF", 19).unwrap().to_bit_string(), "1".repeat(19));
    }

    #[test]
    fn hex_rejects_lost_bits() {
        assert!(BitLayout::from_hex("10000", 16).is_err());
        assert!(BitLayout::from_hex("FFFFF", 19).is_err());
        assert!(BitLayout::from_hex("3G00", 16).is_err());
        assert!(BitLayout::from_hex("", 16).is_err());
        assert!(BitLayout::from_hex("0x", 16).is_err());
    }

    #[test]
    fn bit_strings() {
        let b = BitLayout::from_bit_string("0b0011110000000000", 16).unwrap();
        assert_eq!(b.to_hex(), "3C00");
        assert_eq!(b.bit(0), Some(false));
        assert_eq!(b.bit(2), Some(true));
        assert_eq!(b.bit(16), None);
        assert!(BitLayout::from_bit_string("0011", 5).is_err());
        assert!(BitLayout::from_bit_string("00112", 5).is_err());
    }

    #[test]
    fn split_and_pack() {
        let f = FloatFormat::fp16();
        let b = BitLayout::from_hex("BC01", 16).unwrap();
        let raw = b.split_fields(&f).unwrap();
        assert!(raw.sign);
        assert_eq!(raw.exponent, 15);
        assert_eq!(raw.significand, BigUint::from(1_u32));
        assert_eq!(raw.pack(&f).unwrap(), b);
        assert!(b.split_fields(&FloatFormat::fp32()).is_err());

        let bad = RawFields {
            sign: false,
            exponent: 32,
            significand: BigUint::default(),
        };
        assert!(bad.pack(&f).is_err());
    }

    #[test]
    fn index_view() {
        let b = BitLayout::from_index(0x7C00, 16).unwrap();
        assert_eq!(b.to_hex(), "7C00");
        assert!(BitLayout::from_index(1 << 16, 16).is_err());
        assert_eq!(BitLayout::from_index(u64::MAX, 80).unwrap().to_hex(), "0000FFFFFFFFFFFFFFFF");
    }
}
