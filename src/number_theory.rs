//! Classical helpers producing the constants of the modular arithmetic circuits.

use crate::errors::{CircuitError, CircuitResult};
use num_traits::{PrimInt, Signed};

/// Greatest common divisor.
///
/// ```
/// use qarith::number_theory::gcd;
/// assert_eq!(gcd(12, 18), 6);
/// assert_eq!(gcd(0, 5), 5);
/// ```
pub fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        let r = a % b;
        a = b;
        b = r;
    }
    a
}

/// Extended euclidean algorithm: returns `(g, s, t)` with `g = gcd(a, b) = s*a + t*b` and
/// `g >= 0`. Iterative, so the stack depth does not grow with the inputs.
///
/// ```
/// use qarith::number_theory::extended_gcd;
/// let (g, s, t) = extended_gcd(240i64, 46);
/// assert_eq!(g, 2);
/// assert_eq!(s * 240 + t * 46, 2);
/// ```
pub fn extended_gcd<T: PrimInt + Signed>(a: T, b: T) -> (T, T, T) {
    let (mut old_r, mut r) = (a, b);
    let (mut old_s, mut s) = (T::one(), T::zero());
    let (mut old_t, mut t) = (T::zero(), T::one());
    while !r.is_zero() {
        let q = old_r / r;
        (old_r, r) = (r, old_r - q * r);
        (old_s, s) = (s, old_s - q * s);
        (old_t, t) = (t, old_t - q * t);
    }
    if old_r.is_negative() {
        (-old_r, -old_s, -old_t)
    } else {
        (old_r, old_s, old_t)
    }
}

/// The inverse of `a` modulo `n`: `(a * inverse) % n == 1 % n`.
///
/// ```
/// use qarith::number_theory::modular_inverse;
/// assert_eq!(modular_inverse(3, 5).unwrap(), 2);
/// assert!(modular_inverse(6, 9).is_err());
/// ```
pub fn modular_inverse(a: u64, n: u64) -> CircuitResult<u64> {
    let undefined = CircuitError::ModularInverseUndefined {
        value: a,
        modulus: n,
    };
    if n == 0 {
        return Err(undefined);
    }
    let (g, s, _) = extended_gcd(i128::from(a % n), i128::from(n));
    if g != 1 {
        return Err(undefined);
    }
    Ok(s.rem_euclid(i128::from(n)) as u64)
}

/// `base^exp mod modulus` by square and multiply.
///
/// ```
/// use qarith::number_theory::mod_pow;
/// assert_eq!(mod_pow(7, 4, 15), 1);
/// assert_eq!(mod_pow(2, 10, 1000), 24);
/// ```
pub fn mod_pow(base: u64, mut exp: u64, modulus: u64) -> u64 {
    if modulus == 1 {
        return 0;
    }
    let m = u128::from(modulus);
    let mut base = u128::from(base) % m;
    let mut acc = 1u128;
    while exp > 0 {
        if exp & 1 == 1 {
            acc = acc * base % m;
        }
        base = base * base % m;
        exp >>= 1;
    }
    acc as u64
}
