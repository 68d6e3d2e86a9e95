//! Errors surfaced by minting, decoding, and verification.
//!
//! Three failure domains, one enum each. Cryptographic failure during
//! verification is an ordinary result; only an invariant violation inside
//! the arithmetic façade may panic, and that indicates a bug.

use std::fmt::{Display, Formatter};

/// Errors that can abort a mint before an artifact exists.
#[derive(Debug, PartialEq, Eq)]
pub enum MintError {
    /// The iteration count must be at least 1.
    InvalidIterations,

    /// The caller cancelled between iteration batches. All derived state
    /// has been discarded; no partial artifact is emitted.
    Cancelled,
}

impl Display for MintError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            MintError::InvalidIterations => {
                write!(f, "Iteration count must be at least 1")
            }
            MintError::Cancelled => write!(f, "Mint cancelled by the caller"),
        }
    }
}

/// Structural failures while decoding a pyx from its canonical bytes or
/// from the JSON envelope.
#[derive(Debug, PartialEq, Eq)]
pub enum DecodeError {
    /// The canonical serialization has a fixed total length.
    Length { expected: usize, actual: usize },

    /// The leading version byte is not one this implementation speaks.
    UnsupportedVersion(u8),

    /// A pyx over zero iterations cannot exist.
    ZeroIterations,

    /// A fixed-width envelope field decoded to the wrong number of bytes.
    FieldLength {
        field: &'static str,
        expected: usize,
        actual: usize,
    },

    /// An envelope value exceeds its decoded-size cap.
    Oversized {
        field: &'static str,
        limit: usize,
        actual: usize,
    },

    /// A residue is not reduced below the modulus.
    ResidueOutOfRange(&'static str),

    /// The envelope carries a pyx id that does not match the one
    /// recomputed from the canonical serialization.
    PyxIdMismatch,
}

impl Display for DecodeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            DecodeError::Length { expected, actual } => {
                write!(f, "Expected {} serialized bytes, got {}", expected, actual)
            }
            DecodeError::UnsupportedVersion(version) => {
                write!(f, "Unsupported version byte: {:#04x}", version)
            }
            DecodeError::ZeroIterations => {
                write!(f, "Iteration count must be at least 1")
            }
            DecodeError::FieldLength {
                field,
                expected,
                actual,
            } => write!(
                f,
                "Field {} must decode to {} bytes, got {}",
                field, expected, actual
            ),
            DecodeError::Oversized {
                field,
                limit,
                actual,
            } => write!(
                f,
                "Field {} exceeds {} decoded bytes: {}",
                field, limit, actual
            ),
            DecodeError::ResidueOutOfRange(field) => {
                write!(f, "Residue {} is not reduced below the modulus", field)
            }
            DecodeError::PyxIdMismatch => {
                write!(f, "Envelope pyx id does not match the canonical bytes")
            }
        }
    }
}

/// Outcome classification of a failed verification.
#[derive(Debug, PartialEq, Eq)]
pub enum VerificationError {
    /// The identity π^L · x^r ≡ y (mod N) does not hold.
    ProofMismatch,

    /// The pyx failed a structural check before any group arithmetic ran.
    Malformed(DecodeError),
}

impl Display for VerificationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            VerificationError::ProofMismatch => {
                write!(f, "Proof does not satisfy the verification identity")
            }
            VerificationError::Malformed(inner) => write!(f, "Malformed pyx: {}", inner),
        }
    }
}
