//! Protocol constants shared by the minter and the verifier.
//!
//! Every value here is consensus-critical: the modulus, the version byte,
//! the wire widths, and the prime-search parameters must match bit-for-bit
//! across implementations or artifacts stop verifying.

use std::sync::LazyLock;

use num_bigint::BigUint;

/// Protocol version byte, first byte of the canonical serialization.
pub const VERSION: u8 = 0x01;

/// Width of the minter identity and challenge fields, in bytes.
pub const FIELD_LEN: usize = 32;

/// Width of a zero-padded residue on the wire (2048 bits).
pub const RESIDUE_LEN: usize = 256;

/// Total canonical serialization length:
/// version + minterId + challenge + iterations + y + proof.
pub const SERIALIZED_LEN: usize = 1 + FIELD_LEN + FIELD_LEN + 8 + RESIDUE_LEN + RESIDUE_LEN;

/// Upper bound on the byte length of y and proof in the JSON envelope.
pub const ENVELOPE_VALUE_MAX: usize = 512;

/// Iterations per progress/cancellation batch.
pub const PROGRESS_CHUNK: u64 = 1000;

/// Iterations between cooperative yields to the host scheduler.
pub const YIELD_INTERVAL: u64 = 50_000;

/// Rounds of deterministic Miller–Rabin in the hash-to-prime oracle.
pub const MILLER_RABIN_ROUNDS: u32 = 40;

/// Trial-division table for the prime candidate scan. Candidates are
/// always odd, so 2 is absent.
pub const SMALL_PRIMES: [u32; 15] = [3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53];

/// The RSA-2048 challenge number, used as an untrusted-setup group: its
/// factorization is unknown, so group-order shortcuts are believed
/// infeasible.
const RSA_2048_DECIMAL: &str = "25195908475657893494027183240048398571429282126204032027777137836043662020707595556264018525880784406918290641249515082189298559149176184502808489120072844992687392807287776735971418347270261896375014971824691165077613379859095700097330459748808428401797429100642458691817195118746121515172654632282216869987549182422433637259085141865462043576798423387184774447920739934236584823824281198163815010674810451660377306056201619676256133844143603833904414952634432190114657544454178424020924616515723350778707749817125772467962926386356373289912154831438167899885040445364023527381951378636564391212010397122822120720357";

/// The 2048-bit modulus N. Parsed once; identical in every process.
pub static MODULUS: LazyLock<BigUint> = LazyLock::new(|| {
    BigUint::parse_bytes(RSA_2048_DECIMAL.as_bytes(), 10)
        .expect("RSA-2048 literal is valid decimal")
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modulus_is_2048_bits() {
        assert_eq!(MODULUS.bits(), 2048);
    }

    #[test]
    fn modulus_is_odd() {
        assert!(MODULUS.bit(0));
    }

    #[test]
    fn serialized_len_is_585() {
        assert_eq!(SERIALIZED_LEN, 585);
    }
}
