// Big Integer Operations
// Wrapper around num-bigint for the modular arithmetic behind RSA

use num_bigint::{BigInt, BigUint, RandBigInt, Sign};
use num_integer::Integer;
use num_traits::{One, Signed, Zero};
use rand::thread_rng;

use crate::error::{Result, StegoRsaError};

/// Create a big integer from u64
pub fn from_u64(n: u64) -> BigUint {
    BigUint::from(n)
}

/// Create a big integer from bytes (big-endian)
pub fn from_bytes(bytes: &[u8]) -> BigUint {
    BigUint::from_bytes_be(bytes)
}

/// Convert big integer to bytes (big-endian)
pub fn to_bytes(n: &BigUint) -> Vec<u8> {
    n.to_bytes_be()
}

/// Modular exponentiation: base^exp mod modulus
/// Uses square-and-multiply, O(log exp) multiplications
pub fn mod_pow(base: &BigUint, exp: &BigUint, modulus: &BigUint) -> BigUint {
    if modulus.is_one() {
        return BigUint::zero();
    }

    let mut result = BigUint::one();
    let mut base = base % modulus;
    let mut exp = exp.clone();

    while !exp.is_zero() {
        if exp.is_odd() {
            result = (&result * &base) % modulus;
        }
        base = (&base * &base) % modulus;
        exp >>= 1;
    }

    result
}

/// Extended Euclidean Algorithm over signed integers
/// Returns (gcd, x, y) such that a*x + b*y = gcd(a, b)
pub fn extended_gcd(a: &BigInt, b: &BigInt) -> (BigInt, BigInt, BigInt) {
    if b.is_zero() {
        return (a.clone(), BigInt::one(), BigInt::zero());
    }

    let (gcd, x1, y1) = extended_gcd(b, &(a % b));
    let x = y1.clone();
    let y = x1 - (a / b) * y1;

    (gcd, x, y)
}

/// Compute modular inverse: a^(-1) mod m
/// Fails with NoInverseExists when gcd(a, m) != 1
pub fn mod_inverse(a: &BigUint, m: &BigUint) -> Result<BigUint> {
    let a_signed = BigInt::from_biguint(Sign::Plus, a.clone());
    let m_signed = BigInt::from_biguint(Sign::Plus, m.clone());

    let (gcd, x, _) = extended_gcd(&a_signed, &m_signed);
    if !gcd.is_one() {
        return Err(StegoRsaError::NoInverseExists);
    }

    // x may be negative; lift into [0, m)
    let mut inv = x % &m_signed;
    if inv.is_negative() {
        inv += &m_signed;
    }

    Ok(inv.to_biguint().unwrap_or_else(BigUint::zero))
}

/// Greatest common divisor
pub fn gcd(a: &BigUint, b: &BigUint) -> BigUint {
    a.gcd(b)
}

/// Miller-Rabin primality test
/// Returns true if n is probably prime, with false-positive probability
/// at most 4^(-rounds)
pub fn is_probable_prime(n: &BigUint, rounds: u32) -> bool {
    let two = BigUint::from(2u8);
    let three = BigUint::from(3u8);

    if n < &two {
        return false;
    }
    if n == &two || n == &three {
        return true;
    }
    if n.is_even() {
        return false;
    }

    // Write n-1 as q * 2^s with q odd
    let mut q = n - 1u8;
    let mut s = 0u32;
    while q.is_even() {
        q >>= 1;
        s += 1;
    }

    // Witness loop
    let mut rng = thread_rng();
    let n_minus_one = n - 1u8;
    let n_minus_two = n - &two;

    'witness: for _ in 0..rounds {
        // Pick random witness a in [2, n-2]
        let a = rng.gen_biguint_range(&two, &n_minus_two);

        let mut x = mod_pow(&a, &q, n);
        if x.is_one() || x == n_minus_one {
            continue;
        }

        for _ in 1..s {
            x = mod_pow(&x, &two, n);
            if x == n_minus_one {
                continue 'witness;
            }
        }

        // No square reached n-1: composite
        return false;
    }

    true
}

/// Rounds of Miller-Rabin used for prime search. 4^-40 false-positive bound.
pub const PRIME_TEST_ROUNDS: u32 = 40;

/// Sample a random odd integer of exactly `bits` bits (top bit set)
pub fn random_odd_biguint(bits: u64) -> BigUint {
    let mut rng = thread_rng();
    let mut candidate = rng.gen_biguint(bits);
    candidate.set_bit(bits - 1, true);
    candidate.set_bit(0, true);
    candidate
}

/// Search for a random prime of exactly `bits` bits, testing at most
/// `max_attempts` candidates before giving up with KeyGenerationFailed.
/// No prime has fewer than 2 bits, so `bits < 2` fails immediately.
pub fn random_prime(bits: u64, max_attempts: u32) -> Result<BigUint> {
    if bits < 2 {
        return Err(StegoRsaError::KeyGenerationFailed { attempts: 0 });
    }
    for _ in 0..max_attempts {
        let candidate = random_odd_biguint(bits);
        if is_probable_prime(&candidate, PRIME_TEST_ROUNDS) {
            return Ok(candidate);
        }
    }
    Err(StegoRsaError::KeyGenerationFailed {
        attempts: max_attempts,
    })
}
