//! A verifiable delay function over the RSA-2048 group, using the
//! Wesolowski non-interactive proof scheme.
//!
//! A minter is forced through T sequential modular squarings, work that
//! cannot be parallelized, and then emits a compact proof that any
//! verifier can check in time independent of T. The result travels as a
//! [`Pyx`]: minter identity, challenge, iteration count, the evaluation
//! result y, and the proof π, with a canonical 585-byte serialization.
//!
//! Proof generation is deliberately steady-state: one extra pass of T
//! iterations with O(1) memory, instead of the checkpointed sub-linear
//! alternatives.

pub mod arith;
pub mod codec;
pub mod config;
pub mod envelope;
pub mod hashing;
pub mod prime;
pub mod pyx;
pub mod vdf;

pub use crate::config::MODULUS;
pub use crate::envelope::PyxEnvelope;
pub use crate::pyx::Pyx;
pub use crate::pyx::error::{DecodeError, MintError, VerificationError};
pub use crate::vdf::{MintObserver, NullObserver};
