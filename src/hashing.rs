//! SHA-256 over concatenated byte fields, and the base-residue derivation
//! built on it.
//!
//! There is no domain separation beyond field positioning; every consumer
//! relies on fixed-width or minimum-length framing of its inputs.

use num_bigint::BigUint;
use sha2::{Digest, Sha256};

use crate::codec;
use crate::config::MODULUS;

/// SHA-256 over the bytewise concatenation of `parts`.
pub fn sha256(parts: &[&[u8]]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update(part);
    }
    hasher.finalize().into()
}

/// Derives the base residue x from the mint inputs.
///
/// x = SHA-256(minterId || challenge || u64BE(iterations)) mod N. The
/// 72-byte preimage framing is fixed; the digest is read as a big-endian
/// 256-bit integer, so the result is always far below the 2048-bit
/// modulus. Collisions with 0 or 1 are cryptographically negligible and
/// get no special casing.
pub fn derive_base(minter_id: &[u8; 32], challenge: &[u8; 32], iterations: u64) -> BigUint {
    let digest = sha256(&[minter_id, challenge, &codec::u64_be(iterations)]);
    codec::bytes_to_int(&digest) % &*MODULUS
}
