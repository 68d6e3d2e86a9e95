//! The transmissible artifact binding a mint together.
//!
//! A `Pyx` carries the minter identity, the challenge, the iteration
//! count, the evaluation result y, and the proof π. Fields are immutable
//! once set; the identifier is a pure function of the canonical
//! serialization and is memoized on first use.

use std::fmt::{Display, Formatter};
use std::sync::OnceLock;

use base64::{Engine, prelude::BASE64_URL_SAFE_NO_PAD};
use num_bigint::BigUint;

use crate::codec;
use crate::config::{FIELD_LEN, MODULUS, SERIALIZED_LEN, VERSION};
use crate::hashing;
use crate::pyx::error::DecodeError;

pub mod error;
mod mint;
mod verify;

/// A minted delay-function artifact.
///
/// Holds everything a verifier needs: the inputs that pin down the base
/// residue x, the claimed result y of the T squarings, and the Wesolowski
/// proof π. The canonical byte layout is fixed at [`SERIALIZED_LEN`]
/// bytes; the pyx id is the SHA-256 of those bytes.
#[derive(Debug, Clone)]
pub struct Pyx {
    version: u8,
    minter_id: [u8; FIELD_LEN],
    challenge: [u8; FIELD_LEN],
    iterations: u64,
    y: BigUint,
    proof: BigUint,
    /// Memoized SHA-256 of the canonical serialization.
    id: OnceLock<[u8; 32]>,
}

impl PartialEq for Pyx {
    /// Field-wise equality; the memoized id cache does not participate.
    fn eq(&self, other: &Self) -> bool {
        self.version == other.version
            && self.minter_id == other.minter_id
            && self.challenge == other.challenge
            && self.iterations == other.iterations
            && self.y == other.y
            && self.proof == other.proof
    }
}

impl Eq for Pyx {}

impl Pyx {
    /// Assembles a pyx from already-computed values, enforcing the
    /// structural invariants: at least one iteration and both residues
    /// reduced below the modulus.
    pub fn from_parts(
        minter_id: [u8; FIELD_LEN],
        challenge: [u8; FIELD_LEN],
        iterations: u64,
        y: BigUint,
        proof: BigUint,
    ) -> Result<Self, DecodeError> {
        if iterations == 0 {
            return Err(DecodeError::ZeroIterations);
        }
        if y >= *MODULUS {
            return Err(DecodeError::ResidueOutOfRange("y"));
        }
        if proof >= *MODULUS {
            return Err(DecodeError::ResidueOutOfRange("proof"));
        }
        Ok(Self {
            version: VERSION,
            minter_id,
            challenge,
            iterations,
            y,
            proof,
            id: OnceLock::new(),
        })
    }

    pub fn version(&self) -> u8 {
        self.version
    }

    pub fn minter_id(&self) -> &[u8; FIELD_LEN] {
        &self.minter_id
    }

    pub fn challenge(&self) -> &[u8; FIELD_LEN] {
        &self.challenge
    }

    pub fn iterations(&self) -> u64 {
        self.iterations
    }

    /// The evaluation result y = x^(2^T) mod N.
    pub fn y(&self) -> &BigUint {
        &self.y
    }

    /// The proof π = x^⌊2^T / L⌋ mod N.
    pub fn proof(&self) -> &BigUint {
        &self.proof
    }

    /// Emits the canonical byte layout:
    ///
    /// ```text
    /// [version: 1][minterId: 32][challenge: 32][iterations: u64 BE]
    /// [y: 256, zero-padded BE][proof: 256, zero-padded BE]
    /// ```
    pub fn serialize(&self) -> [u8; SERIALIZED_LEN] {
        let mut out = [0u8; SERIALIZED_LEN];
        out[0] = self.version;
        out[1..33].copy_from_slice(&self.minter_id);
        out[33..65].copy_from_slice(&self.challenge);
        out[65..73].copy_from_slice(&codec::u64_be(self.iterations));
        codec::copy_padded_be(&self.y, &mut out[73..329]);
        codec::copy_padded_be(&self.proof, &mut out[329..585]);
        out
    }

    /// Parses the canonical byte layout back into a pyx.
    pub fn deserialize(bytes: &[u8]) -> Result<Self, DecodeError> {
        if bytes.len() != SERIALIZED_LEN {
            return Err(DecodeError::Length {
                expected: SERIALIZED_LEN,
                actual: bytes.len(),
            });
        }

        let version = bytes[0];
        if version != VERSION {
            return Err(DecodeError::UnsupportedVersion(version));
        }

        let mut minter_id = [0u8; FIELD_LEN];
        minter_id.copy_from_slice(&bytes[1..33]);
        let mut challenge = [0u8; FIELD_LEN];
        challenge.copy_from_slice(&bytes[33..65]);

        let mut iterations_be = [0u8; 8];
        iterations_be.copy_from_slice(&bytes[65..73]);
        let iterations = u64::from_be_bytes(iterations_be);

        let y = codec::bytes_to_int(&bytes[73..329]);
        let proof = codec::bytes_to_int(&bytes[329..585]);

        Self::from_parts(minter_id, challenge, iterations, y, proof)
    }

    /// SHA-256 of the canonical serialization. Computed once and cached;
    /// the fields it covers never change after construction.
    pub fn pyx_id(&self) -> [u8; 32] {
        *self
            .id
            .get_or_init(|| hashing::sha256(&[&self.serialize()]))
    }
}

impl Display for Pyx {
    /// Formats the pyx as an S-expression-like string for human-readable
    /// output.
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "(pyx")?;
        writeln!(f, "  (version {})", self.version)?;
        writeln!(
            f,
            "  (minter-id \"{}\")",
            BASE64_URL_SAFE_NO_PAD.encode(self.minter_id)
        )?;
        writeln!(
            f,
            "  (challenge \"{}\")",
            BASE64_URL_SAFE_NO_PAD.encode(self.challenge)
        )?;
        writeln!(f, "  (iterations {})", self.iterations)?;
        writeln!(
            f,
            "  (y \"{}\")",
            BASE64_URL_SAFE_NO_PAD.encode(codec::int_bytes(&self.y))
        )?;
        writeln!(
            f,
            "  (proof \"{}\")",
            BASE64_URL_SAFE_NO_PAD.encode(codec::int_bytes(&self.proof))
        )?;
        write!(
            f,
            "  (pyx-id \"{}\"))",
            BASE64_URL_SAFE_NO_PAD.encode(self.pyx_id())
        )
    }
}
