//! This module implements the [`Pyx::mint`] entry points.
//!
//! Minting chains the whole pipeline: derive the base residue from the
//! inputs, run the T sequential squarings, derive the proof prime from
//! the result, then stream out the proof in a second pass of T
//! iterations. The two passes dominate wall-clock time and split the
//! progress window evenly between them.

use std::sync::OnceLock;

use crate::config::VERSION;
use crate::hashing;
use crate::prime;
use crate::pyx::Pyx;
use crate::pyx::error::MintError;
use crate::vdf::{self, MintObserver, NullObserver, Ticker};

impl Pyx {
    /// Performs the full sequential workload and returns the artifact.
    pub fn mint(
        minter_id: [u8; 32],
        challenge: [u8; 32],
        iterations: u64,
    ) -> Result<Self, MintError> {
        Self::mint_observed(minter_id, challenge, iterations, &mut NullObserver)
    }

    /// Mints while reporting progress through `observer`.
    ///
    /// The observer sees 0 before any work, then a monotonically
    /// non-decreasing percentage at batch boundaries: evaluation covers
    /// 0..=50, proving 50..=100. Returning `false` from the observer (or
    /// panicking inside it) cancels the mint; no partial artifact
    /// escapes.
    pub fn mint_observed(
        minter_id: [u8; 32],
        challenge: [u8; 32],
        iterations: u64,
        observer: &mut dyn MintObserver,
    ) -> Result<Self, MintError> {
        if iterations == 0 {
            return Err(MintError::InvalidIterations);
        }

        let x = hashing::derive_base(&minter_id, &challenge, iterations);

        let mut ticker = Ticker::new(observer, 0, 50, iterations);
        ticker.report(0)?;
        let y = vdf::evaluate(&x, iterations, &mut ticker)?;

        let l = prime::derive_prime(&y);

        let mut ticker = Ticker::new(observer, 50, 50, iterations);
        let proof = vdf::prove(&x, iterations, &l, &mut ticker)?;

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
}
