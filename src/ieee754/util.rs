use bitvec::slice::BitSlice;
use num_bigint::BigUint;

use super::*;

// Converts a `BitSlice` (bit `i` has weight `2^i`) to `BigUint`
pub(crate) fn bits_to_biguint(bits: &BitSlice<u32, Lsb0>) -> BigUint {
    let mut i = BigUint::default();
    for b in bits.iter().by_vals().rev() {
        i <<= 1_usize;
        if b {
            i.set_bit(0, true);
        }
    }
    i
}

// Converts a `BitSlice` of at most 64 bits to `u64`
pub(crate) fn bits_to_u64(bits: &BitSlice<u32, Lsb0>) -> u64 {
    bits.iter()
        .by_vals()
        .rev()
        .fold(0, |acc, b| (acc << 1) | u64::from(b))
}

// Converts a `BigUint` to a `BitVec` of exactly `width` bits,
// dropping any bits above `width`.
pub(crate) fn biguint_to_bitvec(i: &BigUint, width: usize) -> BitVec {
    let mut bv = BitVec::from_vec(i.to_u32_digits());
    bv.resize(width, false);
    bv
}

// Converts a `u64` to a `BitVec` of exactly `width` bits.
pub(crate) fn u64_to_bitvec(i: u64, width: usize) -> BitVec {
    let mut bv = BitVec::from_vec(vec![i as u32, (i >> 32) as u32]);
    bv.resize(width, false);
    bv
}
