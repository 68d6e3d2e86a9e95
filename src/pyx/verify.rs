//! This module implements the [`Pyx::verify`] function.
//!
//! Verification re-derives everything the minter derived (the base
//! residue x and the proof prime L) and then checks the Wesolowski
//! identity with three modular exponentiations. Its cost is independent
//! of the iteration count except for the log-scale exponent sizes.

use num_bigint::BigUint;

use crate::arith;
use crate::config::MODULUS;
use crate::hashing;
use crate::prime;
use crate::pyx::Pyx;
use crate::pyx::error::{DecodeError, VerificationError};

impl Pyx {
    /// Checks π^L · x^(2^T mod L) ≡ y (mod N).
    ///
    /// Structural defects are reported as [`VerificationError::Malformed`];
    /// a failed identity as [`VerificationError::ProofMismatch`].
    /// Cryptographic failure is an ordinary result, never a panic.
    pub fn verify(&self) -> Result<(), VerificationError> {
        let modulus = &*MODULUS;

        if self.iterations == 0 {
            return Err(VerificationError::Malformed(DecodeError::ZeroIterations));
        }
        if self.y >= *modulus {
            return Err(VerificationError::Malformed(DecodeError::ResidueOutOfRange(
                "y",
            )));
        }
        if self.proof >= *modulus {
            return Err(VerificationError::Malformed(DecodeError::ResidueOutOfRange(
                "proof",
            )));
        }

        let x = hashing::derive_base(&self.minter_id, &self.challenge, self.iterations);
        let l = prime::derive_prime(&self.y);

        // r = 2^T mod L
        let r = arith::modexp(
            &BigUint::from(2u32),
            &BigUint::from(self.iterations),
            &l,
        );

        let lhs = arith::mulmod(
            &arith::modexp(&self.proof, &l, modulus),
            &arith::modexp(&x, &r, modulus),
            modulus,
        );

        if lhs == self.y {
            Ok(())
        } else {
            Err(VerificationError::ProofMismatch)
        }
    }
}
