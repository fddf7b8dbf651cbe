/*
    Decoding bit layouts into exact values
*/

use num_bigint::BigUint;
use num_rational::BigRational;
use serde::{Deserialize, Serialize, Serializer};
use tracing::trace;

use super::*;
use crate::{Dyadic, Fraction, Number, Result};

/// The result of decoding one bit pattern.
///
/// Holds the raw fields, their classification and, for finite classes,
/// the exact value of the pattern.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodedValue {
    format: FloatFormat,
    layout: BitLayout,
    fields: RawFields,
    class: Classification,
    value: Option<Dyadic>,
}

/// Serializable summary of a `DecodedValue`.
///
/// `fraction` is present exactly when the value is finite.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodedReport {
    pub hex: String,
    pub bits: String,
    #[serde(rename = "type")]
    pub class: Classification,
    pub sign: u8,
    pub exponent: u64,
    pub significand: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fraction: Option<Fraction>,
}

/// Decodes `bits` as a value of `format`.
///
/// Fails only if the layout width differs from the format's width.
pub fn decode(bits: &BitLayout, format: &FloatFormat) -> Result<DecodedValue> {
    let fields = bits.split_fields(format)?;
    let class = classify(&fields, format);
    let m = format.significand_width();

    // value = (-1)^s * c * 2^exp
    let value = match class {
        Classification::Zero => Some(Dyadic::zero()),
        Classification::Subnormal => {
            let exp = format.emin() - m as i64;
            Some(Dyadic::from_parts(fields.sign, fields.significand.clone(), exp))
        }
        Classification::Normal => {
            let c = &fields.significand + (BigUint::from(1_u8) << m);
            let exp = fields.exponent as i64 - format.bias() - m as i64;
            Some(Dyadic::from_parts(fields.sign, c, exp))
        }
        Classification::Infinity | Classification::Nan => None,
    };

    trace!(hex = %bits, format = %format, class = %class, "decoded");
    Ok(DecodedValue {
        format: *format,
        layout: bits.clone(),
        fields,
        class,
        value,
    })
}

/// Parses a hex string of the format's width and decodes it.
pub fn decode_hex(text: &str, format: &FloatFormat) -> Result<DecodedValue> {
    decode(&BitLayout::from_hex(text, format.total_bits())?, format)
}

/// Parses a binary string of the format's width and decodes it.
pub fn decode_bit_string(text: &str, format: &FloatFormat) -> Result<DecodedValue> {
    decode(&BitLayout::from_bit_string(text, format.total_bits())?, format)
}

// Getters
impl DecodedValue {
    /// The format the value was decoded in.
    pub fn format(&self) -> &FloatFormat {
        &self.format
    }

    /// The decoded bit pattern.
    pub fn layout(&self) -> &BitLayout {
        &self.layout
    }

    /// The raw sign, exponent and significand fields.
    pub fn fields(&self) -> &RawFields {
        &self.fields
    }

    /// The classification of the pattern.
    pub fn class(&self) -> Classification {
        self.class
    }

    /// The sign bit.
    pub fn sign(&self) -> bool {
        self.fields.sign
    }

    /// The exact value. The result is wrapped in an option since
    /// only finite patterns have a value.
    pub fn value(&self) -> Option<&Dyadic> {
        self.value.as_ref()
    }

    /// The exact value as a rational, for finite patterns.
    pub fn to_rational(&self) -> Option<BigRational> {
        self.value.as_ref().map(Dyadic::to_rational)
    }

    /// Returns `stored - source`: the error made by storing `source`
    /// as this value. Absent for infinities and NaNs.
    pub fn error_from(&self, source: &BigRational) -> Option<BigRational> {
        self.to_rational().map(|v| v - source)
    }

    /// Returns true if this value is a signaling NaN, i.e. a NaN whose
    /// most significant significand bit is clear.
    /// The result is wrapped in an option since only NaNs can be signaling.
    pub fn is_signaling_nan(&self) -> Option<bool> {
        match self.class {
            Classification::Nan => {
                let m = self.format.significand_width();
                Some(!self.fields.significand.bit(m as u64 - 1))
            }
            _ => None,
        }
    }

    /// Builds the serializable report of this value.
    pub fn to_report(&self) -> DecodedReport {
        DecodedReport {
            hex: self.layout.to_hex(),
            bits: self.layout.to_bit_string(),
            class: self.class,
            sign: u8::from(self.fields.sign),
            exponent: self.fields.exponent,
            significand: self.fields.significand.to_string(),
            fraction: self.value.as_ref().map(Dyadic::to_fraction),
        }
    }

    /// Renders the report as JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.to_report())
    }
}

impl Serialize for DecodedValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_report().serialize(serializer)
    }
}

impl Number for DecodedValue {
    fn is_zero(&self) -> bool {
        self.class == Classification::Zero
    }

    fn is_infinity(&self) -> bool {
        self.class == Classification::Infinity
    }

    fn is_nan(&self) -> bool {
        self.class == Classification::Nan
    }

    fn is_negative(&self) -> bool {
        self.fields.sign
    }
}
