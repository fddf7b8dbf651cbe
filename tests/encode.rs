use float_codec::ieee754::*;
use float_codec::*;
use num_bigint::{BigInt, BigUint};
use num_rational::BigRational;

fn presets() -> [FloatFormat; 5] {
    [
        FloatFormat::fp16(),
        FloatFormat::bf16(),
        FloatFormat::tf32(),
        FloatFormat::fp32(),
        FloatFormat::fp64(),
    ]
}

// 2^k as an exact rational
fn pow2(k: i64) -> BigRational {
    let one = BigInt::from(1);
    if k >= 0 {
        BigRational::from_integer(one << k as usize)
    } else {
        BigRational::new(one, BigInt::from(1) << (-k) as usize)
    }
}

fn fields(bits: &BitLayout, f: &FloatFormat) -> RawFields {
    bits.split_fields(f).unwrap()
}

#[test]
fn ties_to_even() {
    for f in presets() {
        let m = f.significand_width() as i64;
        let half_ulp = pow2(-m - 1);
        let one = BigRational::from_integer(BigInt::from(1));

        // 1 + ulp/2 is a tie between 1 (even) and 1 + ulp (odd)
        let x = RealNum::finite(&one + &half_ulp);
        let r = fields(&encode(&x, &f).unwrap(), &f);
        assert_eq!(r.significand, BigUint::from(0_u8), "{f}: 1 + ulp/2");
        assert_eq!(r.exponent as i64, f.bias(), "{f}: 1 + ulp/2");

        // 1 + 3ulp/2 is a tie between 1 + ulp (odd) and 1 + 2ulp (even)
        let x = RealNum::finite(&one + &half_ulp * BigInt::from(3));
        let r = fields(&encode(&x, &f).unwrap(), &f);
        assert_eq!(r.significand, BigUint::from(2_u8), "{f}: 1 + 3ulp/2");

        // just above the tie rounds up
        let x = RealNum::finite(&one + &half_ulp + pow2(-m - 40));
        let r = fields(&encode(&x, &f).unwrap(), &f);
        assert_eq!(r.significand, BigUint::from(1_u8), "{f}: above the tie");
    }
}

#[test]
fn significand_carry_into_exponent() {
    for f in presets() {
        let m = f.significand_width() as i64;
        // (2 - ulp/2) is a tie between 2 - ulp (odd) and 2 (even)
        let x = RealNum::finite(BigRational::from_integer(BigInt::from(2)) - pow2(-m - 1));
        let enc = encode_with(&x, &f, &EncodeContext::default()).unwrap();
        let r = fields(enc.bits(), &f);
        assert_eq!(r.exponent as i64, f.bias() + 1, "{f}: carry");
        assert_eq!(r.significand, BigUint::from(0_u8), "{f}: carry");
        assert!(enc.flags().carry() && enc.flags().inexact());
    }
}

#[test]
fn overflow_policy() {
    let f = FloatFormat::fp16();
    let ctx = EncodeContext::default();

    // 65520 lies halfway between 65504 and 2^16: the even neighbor overflows
    let enc = encode_with(&"65520".parse().unwrap(), &f, &ctx).unwrap();
    assert_eq!(enc.bits().to_hex(), "7C00");
    assert!(enc.flags().overflow() && enc.flags().inexact());

    let enc = encode_with(&"-1e300".parse().unwrap(), &f, &ctx).unwrap();
    assert_eq!(enc.bits().to_hex(), "FC00");

    // directed rounding toward zero saturates at the largest finite value
    let ctx = EncodeContext::new().rounding_mode(RoundingMode::ToZero);
    let enc = encode_with(&"1e300".parse().unwrap(), &f, &ctx).unwrap();
    assert_eq!(enc.bits().to_hex(), "7BFF");
    assert!(enc.flags().overflow());

    let ctx = EncodeContext::new().rounding_mode(RoundingMode::ToPositive);
    assert_eq!(encode_with(&"-1e300".parse().unwrap(), &f, &ctx).unwrap().bits().to_hex(), "FBFF");
    assert_eq!(encode_with(&"1e300".parse().unwrap(), &f, &ctx).unwrap().bits().to_hex(), "7C00");
}

#[test]
fn underflow_policy() {
    let f = FloatFormat::fp32();
    let ctx = EncodeContext::default();

    let enc = encode_with(&"1e-50".parse().unwrap(), &f, &ctx).unwrap();
    assert_eq!(enc.bits().to_hex(), "00000000");
    assert!(enc.flags().underflow() && enc.flags().inexact());

    let enc = encode_with(&"-1e-50".parse().unwrap(), &f, &ctx).unwrap();
    assert_eq!(enc.bits().to_hex(), "80000000");

    // smallest subnormal is exact: no underflow
    let enc = encode_with(&RealNum::finite(pow2(-149)), &f, &ctx).unwrap();
    assert_eq!(enc.bits().to_hex(), "00000001");
    assert!(!enc.flags().any());

    // a subnormal that rounds up becomes the smallest normal
    let x = RealNum::finite(pow2(-126) - pow2(-151));
    let enc = encode_with(&x, &f, &ctx).unwrap();
    assert_eq!(enc.bits().to_hex(), "00800000");
    assert!(enc.flags().underflow());

    // rounding up toward +inf gives the smallest subnormal
    let ctx = EncodeContext::new().rounding_mode(RoundingMode::ToPositive);
    assert_eq!(encode_with(&"1e-50".parse().unwrap(), &f, &ctx).unwrap().bits().to_hex(), "00000001");
}

#[test]
fn flush_to_zero() {
    let f = FloatFormat::fp16();
    let ctx = EncodeContext::new().flush_subnormals(true);

    let enc = encode_with(&RealNum::finite(pow2(-20)), &f, &ctx).unwrap();
    assert_eq!(enc.bits().to_hex(), "0000");
    assert!(enc.flags().underflow());

    let enc = encode_with(&RealNum::finite(-pow2(-20)), &f, &ctx).unwrap();
    assert_eq!(enc.bits().to_hex(), "8000");

    // normals are untouched
    let enc = encode_with(&RealNum::finite(pow2(-14)), &f, &ctx).unwrap();
    assert_eq!(enc.bits().to_hex(), "0400");
    assert!(!enc.flags().any());
}

#[test]
fn rounding_modes() {
    let f = FloatFormat::fp16();
    // 1 + 1/3 ulp and its negation
    let x = BigRational::from_integer(BigInt::from(1)) + BigRational::new(BigInt::from(1), BigInt::from(3 << 10));
    let pos = RealNum::finite(x.clone());
    let neg = RealNum::finite(-x);

    let cases = [
        (RoundingMode::NearestEven, "3C00", "BC00"),
        (RoundingMode::NearestAway, "3C00", "BC00"),
        (RoundingMode::ToPositive, "3C01", "BC00"),
        (RoundingMode::ToNegative, "3C00", "BC01"),
        (RoundingMode::ToZero, "3C00", "BC00"),
        (RoundingMode::AwayZero, "3C01", "BC01"),
        (RoundingMode::ToOdd, "3C01", "BC01"),
    ];
    for (rm, p, n) in cases {
        let ctx = EncodeContext::new().rounding_mode(rm);
        assert_eq!(encode_with(&pos, &f, &ctx).unwrap().bits().to_hex(), p, "{rm:?}");
        assert_eq!(encode_with(&neg, &f, &ctx).unwrap().bits().to_hex(), n, "{rm:?}");
    }

    // ties away from zero
    let tie = RealNum::finite(BigRational::from_integer(BigInt::from(1)) + pow2(-11));
    let ctx = EncodeContext::new().rounding_mode(RoundingMode::NearestAway);
    assert_eq!(encode_with(&tie, &f, &ctx).unwrap().bits().to_hex(), "3C01");
}

#[test]
fn signed_zero() {
    let f = FloatFormat::fp32();
    assert_eq!(encode_str("0", &f).unwrap().to_hex(), "00000000");
    assert_eq!(encode_str("-0", &f).unwrap().to_hex(), "80000000");
    assert_eq!(encode(&RealNum::zero(true), &f).unwrap().to_hex(), "80000000");
    assert_eq!(encode(&RealNum::from(BigInt::from(0)), &f).unwrap().to_hex(), "00000000");
}

#[test]
fn nonfinite_inputs() {
    let f = FloatFormat::fp16();
    assert!(matches!(encode_str("inf", &f), Err(CodecError::UnrepresentableInput(_))));
    assert!(matches!(encode_str("nan", &f), Err(CodecError::UnrepresentableInput(_))));

    let ctx = EncodeContext::new().nonfinite(true);
    assert_eq!(encode_with(&RealNum::Infinity(true), &f, &ctx).unwrap().bits().to_hex(), "FC00");
    assert_eq!(encode_with(&RealNum::Nan, &f, &ctx).unwrap().bits().to_hex(), "7E00");

    // no significand bits, no NaN
    let e3m0 = FloatFormat::custom(3, 0).unwrap();
    assert!(matches!(
        encode_with(&RealNum::Nan, &e3m0, &ctx),
        Err(CodecError::UnrepresentableInput(_))
    ));
    assert_eq!(encode_with(&RealNum::Infinity(false), &e3m0, &ctx).unwrap().bits().to_hex(), "7");
}

#[test]
fn malformed_decimals() {
    let f = FloatFormat::fp32();
    for s in ["", "1,5", "one", "0x3F800000"] {
        assert!(matches!(encode_str(s, &f), Err(CodecError::MalformedInput(_))), "{s:?}");
    }
}

#[test]
fn conversions() {
    let ctx = EncodeContext::default();
    let fp32 = FloatFormat::fp32();
    let fp16 = FloatFormat::fp16();
    let bf16 = FloatFormat::bf16();

    let pi = encode_str("3.14159265358979", &fp32).unwrap();
    assert_eq!(convert(&pi, &fp32, &bf16, &ctx).unwrap().bits().to_hex(), "4049");
    assert_eq!(convert(&pi, &fp32, &fp16, &ctx).unwrap().bits().to_hex(), "4248");

    // widening is exact
    let h = BitLayout::from_hex("0001", 16).unwrap();
    let wide = convert(&h, &fp16, &fp32, &ctx).unwrap();
    assert_eq!(wide.bits().to_hex(), "33800000");
    assert!(!wide.flags().any());

    let inf = BitLayout::from_hex("FF800000", 32).unwrap();
    assert_eq!(convert(&inf, &fp32, &fp16, &ctx).unwrap().bits().to_hex(), "FC00");

    // signaling NaN is quieted and raises invalid
    let snan = BitLayout::from_hex("7F800001", 32).unwrap();
    let enc = convert(&snan, &fp32, &fp16, &ctx).unwrap();
    assert_eq!(enc.bits().to_hex(), "7E00");
    assert!(enc.flags().invalid());

    let qnan = BitLayout::from_hex("FFC00000", 32).unwrap();
    let enc = convert(&qnan, &fp32, &fp16, &ctx).unwrap();
    assert_eq!(enc.bits().to_hex(), "FE00");
    assert!(!enc.flags().invalid());

    assert!(convert(&h, &fp32, &fp16, &ctx).is_err());
}

#[test]
fn conversion_error() {
    let f = FloatFormat::fp16();
    let source: RealNum = "0.1".parse().unwrap();
    let stored = decode(&encode(&source, &f).unwrap(), &f).unwrap();
    let err = stored.error_from(&source.to_rational().unwrap()).unwrap();
    // 0x2E66 = 1638/16384, so the error is 1638/16384 - 1/10
    assert_eq!(err, BigRational::new(BigInt::from(-1), BigInt::from(40960)));

    let inf = decode_hex("7C00", &f).unwrap();
    assert!(inf.error_from(&source.to_rational().unwrap()).is_none());
}

#[test]
fn width_invariance() {
    for (e, m) in [(1, 0), (1, 2), (2, 1), (3, 0), (4, 3), (5, 2), (6, 9), (15, 112), (8, 4087)] {
        let f = FloatFormat::custom(e, m).unwrap();
        for s in ["0", "-0", "1", "-1.5", "0.1", "1e-300", "1e300", "123456789.125"] {
            let bits = encode_str(s, &f).unwrap();
            assert_eq!(bits.len(), f.total_bits(), "{f}: {s}");
            assert_eq!(bits.to_hex().len(), f.hex_digits(), "{f}: {s}");
        }
    }
}
