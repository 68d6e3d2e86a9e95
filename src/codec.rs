//! Big-endian conversions between byte strings and integers.
//!
//! All wire and hash inputs in the protocol are big-endian. Two integer
//! encodings exist side by side: the minimum-length form (no leading zero
//! byte) feeds the hash oracles, and the zero-padded fixed-width form is
//! used on the wire. Concatenation is always bytewise with no separators.

use num_bigint::BigUint;

/// Interprets `bytes` as an unsigned big-endian integer.
#[inline]
pub fn bytes_to_int(bytes: &[u8]) -> BigUint {
    BigUint::from_bytes_be(bytes)
}

/// Minimum-length big-endian encoding of `value`, with no leading zero
/// byte.
#[inline]
pub fn int_bytes(value: &BigUint) -> Vec<u8> {
    value.to_bytes_be()
}

/// Big-endian encoding of `value` left-padded with zeros to exactly
/// `width` bytes. Returns `None` when the value does not fit.
pub fn int_bytes_padded(value: &BigUint, width: usize) -> Option<Vec<u8>> {
    let bytes = value.to_bytes_be();
    if bytes.len() > width {
        return None;
    }
    let mut out = vec![0u8; width];
    out[width - bytes.len()..].copy_from_slice(&bytes);
    Some(out)
}

/// Writes `value` into `out` as zero-padded big-endian bytes.
///
/// Panics if the value does not fit; callers only pass residues already
/// reduced below the 2048-bit modulus.
pub fn copy_padded_be(value: &BigUint, out: &mut [u8]) {
    let bytes = value.to_bytes_be();
    let pad = out.len() - bytes.len();
    out[..pad].fill(0);
    out[pad..].copy_from_slice(&bytes);
}

/// 8-byte big-endian encoding of `n`.
#[inline]
pub fn u64_be(n: u64) -> [u8; 8] {
    n.to_be_bytes()
}

/// 4-byte big-endian encoding of `n`.
#[inline]
pub fn u32_be(n: u32) -> [u8; 4] {
    n.to_be_bytes()
}
