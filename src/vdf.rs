//! The two sequential engines at the heart of the scheme.
//!
//! Evaluation performs the T squarings that constitute the delay;
//! proving replays T iterations of the long division of 2^T by L,
//! feeding the quotient bits MSB-first into a square-then-multiply
//! schedule. Both loops are strictly sequential along the T axis: the
//! delay property of the whole construction rests on that, so neither
//! may ever be parallelized. Work is batched so that progress reporting,
//! cooperative yielding, and cancellation all happen between batches,
//! never inside one.

use std::panic::{AssertUnwindSafe, catch_unwind};

use num_bigint::BigUint;
use num_traits::One;

use crate::arith;
use crate::config::{MODULUS, PROGRESS_CHUNK, YIELD_INTERVAL};
use crate::pyx::error::MintError;

/// Receiver for mint progress, and the cancellation seam.
///
/// `on_progress` fires between iteration batches with the overall mint
/// percentage: monotonically non-decreasing, 0 first and 100 last on a
/// successful mint. Returning `false` cancels the mint; the next batch
/// never starts and all derived state is dropped.
pub trait MintObserver {
    fn on_progress(&mut self, percent: u8) -> bool {
        let _ = percent;
        true
    }
}

/// Observer that never reports and never cancels.
pub struct NullObserver;

impl MintObserver for NullObserver {}

/// Batches one phase's iterations into progress reports, cooperative
/// yields, and cancellation checks.
///
/// A phase owns a window of the overall percentage: evaluation maps its
/// T iterations onto 0..=50, proving onto 50..=100.
pub(crate) struct Ticker<'a> {
    observer: &'a mut dyn MintObserver,
    floor: u64,
    span: u64,
    total: u64,
    done: u64,
    since_yield: u64,
}

impl<'a> Ticker<'a> {
    pub(crate) fn new(observer: &'a mut dyn MintObserver, floor: u8, span: u8, total: u64) -> Self {
        Self {
            observer,
            floor: u64::from(floor),
            span: u64::from(span),
            total,
            done: 0,
            since_yield: 0,
        }
    }

    /// Delivers `percent` to the observer.
    ///
    /// The callback must not be able to corrupt an in-flight mint: a
    /// panic is contained here and treated as cancellation.
    pub(crate) fn report(&mut self, percent: u8) -> Result<(), MintError> {
        let keep_going =
            catch_unwind(AssertUnwindSafe(|| self.observer.on_progress(percent))).unwrap_or(false);
        if keep_going {
            Ok(())
        } else {
            Err(MintError::Cancelled)
        }
    }

    /// Records a completed batch: yields to the host scheduler at the
    /// configured interval, then reports progress and checks for
    /// cancellation.
    fn advance(&mut self, batch: u64) -> Result<(), MintError> {
        self.done += batch;
        self.since_yield += batch;
        if self.since_yield >= YIELD_INTERVAL {
            self.since_yield = 0;
            std::thread::yield_now();
        }
        let percent = self.floor + self.span * self.done / self.total;
        self.report(percent as u8)
    }
}

/// Evaluation engine: y = x^(2^T) mod N by exactly `iterations`
/// sequential squarings.
pub(crate) fn evaluate(
    x: &BigUint,
    iterations: u64,
    ticker: &mut Ticker<'_>,
) -> Result<BigUint, MintError> {
    let modulus = &*MODULUS;
    let mut y = x.clone();
    let mut remaining = iterations;
    while remaining > 0 {
        let batch = remaining.min(PROGRESS_CHUNK);
        for _ in 0..batch {
            y = arith::sqrmod(&y, modulus);
        }
        remaining -= batch;
        ticker.advance(batch)?;
    }
    Ok(y)
}

/// Streaming proof engine: π = x^⌊2^T / L⌋ mod N in one pass.
///
/// The quotient of 2^T by L is never materialized. Each iteration doubles
/// a remainder held modulo L; whether the doubled value overflows L is
/// exactly the next most-significant quotient bit, which drives one step
/// of Horner's rule on the proof accumulator. State is O(1): two residues
/// modulo N, one below L. After T iterations the remainder equals
/// 2^T mod L, the r of the verification identity.
pub(crate) fn prove(
    x: &BigUint,
    iterations: u64,
    l: &BigUint,
    ticker: &mut Ticker<'_>,
) -> Result<BigUint, MintError> {
    let modulus = &*MODULUS;
    let mut remainder = BigUint::one();
    let mut proof = BigUint::one();
    let mut remaining = iterations;
    while remaining > 0 {
        let batch = remaining.min(PROGRESS_CHUNK);
        for _ in 0..batch {
            remainder <<= 1;
            let quotient_bit = remainder >= *l;
            if quotient_bit {
                remainder -= l;
            }
            proof = arith::sqrmod(&proof, modulus);
            if quotient_bit {
                proof = arith::mulmod(&proof, x, modulus);
            }
        }
        remaining -= batch;
        ticker.advance(batch)?;
    }
    Ok(proof)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hashing;

    fn run_evaluate(x: &BigUint, iterations: u64) -> BigUint {
        let mut observer = NullObserver;
        let mut ticker = Ticker::new(&mut observer, 0, 50, iterations);
        evaluate(x, iterations, &mut ticker).expect("null observer never cancels")
    }

    fn run_prove(x: &BigUint, iterations: u64, l: &BigUint) -> BigUint {
        let mut observer = NullObserver;
        let mut ticker = Ticker::new(&mut observer, 50, 50, iterations);
        prove(x, iterations, l, &mut ticker).expect("null observer never cancels")
    }

    #[test]
    fn evaluation_matches_direct_exponentiation() {
        let x = hashing::derive_base(&[0x07; 32], &[0x0B; 32], 1);
        for t in 1..=64u64 {
            let exponent = BigUint::one() << t;
            let direct = arith::modexp(&x, &exponent, &MODULUS);
            assert_eq!(run_evaluate(&x, t), direct, "t = {t}");
        }
    }

    #[test]
    fn streaming_proof_matches_direct_exponentiation_small_t() {
        let x = hashing::derive_base(&[0x11; 32], &[0x22; 32], 3);
        for l in [97u32, 1021, 1_000_003] {
            let l = BigUint::from(l);
            for t in 1..=20u64 {
                let quotient = (BigUint::one() << t) / &l;
                let direct = arith::modexp(&x, &quotient, &MODULUS);
                assert_eq!(run_prove(&x, t, &l), direct, "t = {t}, l = {l}");
            }
        }
    }

    #[test]
    fn streaming_proof_matches_direct_exponentiation_large_t() {
        let x = hashing::derive_base(&[0x33; 32], &[0x44; 32], 5000);
        let l = crate::prime::derive_prime(&x);
        let quotient = (BigUint::one() << 5000u64) / &l;
        let direct = arith::modexp(&x, &quotient, &MODULUS);
        assert_eq!(run_prove(&x, 5000, &l), direct);
    }

    #[test]
    fn cancelling_observer_stops_evaluation() {
        struct CancelImmediately;
        impl MintObserver for CancelImmediately {
            fn on_progress(&mut self, _percent: u8) -> bool {
                false
            }
        }

        let x = hashing::derive_base(&[0x55; 32], &[0x66; 32], 5000);
        let mut observer = CancelImmediately;
        let mut ticker = Ticker::new(&mut observer, 0, 50, 5000);
        assert!(matches!(
            evaluate(&x, 5000, &mut ticker),
            Err(MintError::Cancelled)
        ));
    }

    #[test]
    fn panicking_observer_is_treated_as_cancellation() {
        struct PanickingObserver;
        impl MintObserver for PanickingObserver {
            fn on_progress(&mut self, _percent: u8) -> bool {
                panic!("observer exploded");
            }
        }

        let x = hashing::derive_base(&[0x77; 32], &[0x88; 32], 2000);
        let mut observer = PanickingObserver;
        let mut ticker = Ticker::new(&mut observer, 0, 50, 2000);
        assert!(matches!(
            evaluate(&x, 2000, &mut ticker),
            Err(MintError::Cancelled)
        ));
    }
}
