//! Modular arithmetic over the fixed 2048-bit group.
//!
//! A thin façade over `num_bigint`: every residue stays in `[0, n)` and no
//! operation here touches secret material, so constant-time behavior is not
//! a requirement. The evaluation and proof loops funnel all of their heavy
//! work through these three functions.

use num_bigint::BigUint;

/// `a * b mod n`. Inputs must already be reduced modulo `n`.
#[inline]
pub fn mulmod(a: &BigUint, b: &BigUint, n: &BigUint) -> BigUint {
    (a * b) % n
}

/// `a^2 mod n`. The single hot operation of the evaluation engine.
#[inline]
pub fn sqrmod(a: &BigUint, n: &BigUint) -> BigUint {
    (a * a) % n
}

/// `base^exp mod n` by binary exponentiation.
#[inline]
pub fn modexp(base: &BigUint, exp: &BigUint, n: &BigUint) -> BigUint {
    base.modpow(exp, n)
}
