// RSA Key Generation
// Builds key pairs from random primes with bounded retry loops

use num_bigint::BigUint;
use num_traits::One;

use super::bigint::{from_u64, gcd, mod_inverse, random_odd_biguint, random_prime};
use crate::error::{Result, StegoRsaError};

/// Candidates tried per prime search before giving up.
const MAX_PRIME_ATTEMPTS: u32 = 10_000;

/// Whole key-generation attempts (fresh primes each time) before giving up.
const MAX_KEYGEN_ATTEMPTS: u32 = 16;

/// Candidates tried when sampling a public exponent.
const MAX_EXPONENT_ATTEMPTS: u32 = 1_000;

/// RSA Public Key: the shareable (n, e) projection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RsaPublicKey {
    pub n: BigUint, // Modulus
    pub e: BigUint, // Public exponent
}

/// RSA Private Key
/// p, q, and d must never leave the holder except through a KeySink
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RsaPrivateKey {
    pub n: BigUint, // Modulus (same as public)
    pub p: BigUint, // First prime factor
    pub q: BigUint, // Second prime factor
    pub e: BigUint, // Public exponent
    pub d: BigUint, // Private exponent
}

/// RSA Key Pair (both public and private keys)
#[derive(Debug, Clone)]
pub struct RsaKeyPair {
    pub public_key: RsaPublicKey,
    pub private_key: RsaPrivateKey,
}

/// Write-only store for private key material.
/// Decouples key generation from wherever keys end up (file, memory, vault).
pub trait KeySink {
    fn store_private(&mut self, key: &RsaPrivateKey) -> Result<()>;
}

impl RsaPublicKey {
    /// Bit length of the modulus
    pub fn bit_length(&self) -> u64 {
        self.n.bits()
    }
}

impl RsaPrivateKey {
    /// Bit length of the modulus
    pub fn bit_length(&self) -> u64 {
        self.n.bits()
    }

    /// The shareable projection of this key
    pub fn to_public(&self) -> RsaPublicKey {
        RsaPublicKey {
            n: self.n.clone(),
            e: self.e.clone(),
        }
    }
}

impl RsaKeyPair {
    pub fn public(&self) -> &RsaPublicKey {
        &self.public_key
    }

    /// Persist the private half into a caller-controlled sink
    pub fn persist(&self, sink: &mut dyn KeySink) -> Result<()> {
        sink.store_private(&self.private_key)
    }
}

/// Generate an RSA key pair with primes of p_bits and q_bits and a sampled
/// public exponent of e_bits bits.
///
/// Every internal loop is bounded: prime search, exponent search, and the
/// outer retry on degenerate prime combinations all fail with
/// KeyGenerationFailed once their budget is spent.
pub fn generate_keypair(p_bits: u64, q_bits: u64, e_bits: u64) -> Result<RsaKeyPair> {
    generate_with(p_bits, q_bits, |phi| sample_exponent(e_bits, phi))
}

/// Generate an RSA key pair with the fixed exponent e = 65537.
/// Regenerates primes in the rare case gcd(65537, phi) != 1.
pub fn generate_default_keypair(p_bits: u64, q_bits: u64) -> Result<RsaKeyPair> {
    generate_with(p_bits, q_bits, |phi| {
        let e = from_u64(65537);
        if gcd(&e, phi).is_one() {
            Ok(e)
        } else {
            Err(StegoRsaError::NoInverseExists)
        }
    })
}

fn generate_with<F>(p_bits: u64, q_bits: u64, mut choose_e: F) -> Result<RsaKeyPair>
where
    F: FnMut(&BigUint) -> Result<BigUint>,
{
    // 16-bit primes guarantee n.bits() >= 31, so the cipher always gets a
    // modulus wide enough for at least one plaintext byte per block
    if p_bits < 16 || q_bits < 16 {
        return Err(StegoRsaError::KeyGenerationFailed { attempts: 0 });
    }

    for _ in 0..MAX_KEYGEN_ATTEMPTS {
        // Step 1: two distinct random primes
        let p = random_prime(p_bits, MAX_PRIME_ATTEMPTS)?;
        let q = random_prime(q_bits, MAX_PRIME_ATTEMPTS)?;
        if p == q {
            continue;
        }

        // Step 2: n = p * q, phi = (p-1)(q-1)
        let n = &p * &q;
        let phi = (&p - 1u8) * (&q - 1u8);

        // Step 3: public exponent coprime with phi
        let e = match choose_e(&phi) {
            Ok(e) => e,
            Err(StegoRsaError::NoInverseExists)
            | Err(StegoRsaError::KeyGenerationFailed { .. }) => continue,
            Err(other) => return Err(other),
        };

        // Step 4: d = e^(-1) mod phi. A failure here means the exponent
        // draw was unusable with these primes; retry with fresh ones.
        let d = match mod_inverse(&e, &phi) {
            Ok(d) => d,
            Err(StegoRsaError::NoInverseExists) => continue,
            Err(other) => return Err(other),
        };

        let public_key = RsaPublicKey {
            n: n.clone(),
            e: e.clone(),
        };
        let private_key = RsaPrivateKey { n, p, q, e, d };

        return Ok(RsaKeyPair {
            public_key,
            private_key,
        });
    }

    Err(StegoRsaError::KeyGenerationFailed {
        attempts: MAX_KEYGEN_ATTEMPTS,
    })
}

/// Sample odd candidates of e_bits bits until one is coprime with phi.
fn sample_exponent(e_bits: u64, phi: &BigUint) -> Result<BigUint> {
    if e_bits < 2 {
        return Err(StegoRsaError::KeyGenerationFailed { attempts: 0 });
    }
    for _ in 0..MAX_EXPONENT_ATTEMPTS {
        let e = random_odd_biguint(e_bits);
        if gcd(&e, phi).is_one() {
            return Ok(e);
        }
    }
    Err(StegoRsaError::KeyGenerationFailed {
        attempts: MAX_EXPONENT_ATTEMPTS,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rsa::bigint::{is_probable_prime, mod_pow};
    use num_bigint::RandBigInt;
    use rand::thread_rng;

    #[test]
    fn test_key_generation() {
        let keypair = generate_default_keypair(128, 128).unwrap();
        assert!(keypair.public_key.n > from_u64(0));
        assert!(keypair.private_key.d > from_u64(0));
        assert_eq!(keypair.public_key.e, from_u64(65537));
    }

    #[test]
    fn test_key_properties() {
        let keypair = generate_default_keypair(128, 128).unwrap();
        let private = &keypair.private_key;

        // n = p * q
        assert_eq!(private.n, &private.p * &private.q);
        assert_ne!(private.p, private.q);
        assert!(is_probable_prime(&private.p, 20));
        assert!(is_probable_prime(&private.q, 20));

        // e * d ≡ 1 (mod phi)
        let phi = (&private.p - 1u8) * (&private.q - 1u8);
        assert_eq!((&private.e * &private.d) % &phi, from_u64(1));
        assert!(gcd(&private.e, &phi).is_one());
    }

    #[test]
    fn test_sampled_exponent() {
        let keypair = generate_keypair(96, 96, 17).unwrap();
        let private = &keypair.private_key;
        assert_eq!(private.e.bits(), 17);

        let phi = (&private.p - 1u8) * (&private.q - 1u8);
        assert_eq!((&private.e * &private.d) % &phi, from_u64(1));
    }

    #[test]
    fn test_uneven_prime_sizes() {
        let keypair = generate_default_keypair(96, 160).unwrap();
        let private = &keypair.private_key;
        assert_eq!(private.p.bits(), 96);
        assert_eq!(private.q.bits(), 160);
    }

    #[test]
    fn test_encrypt_decrypt_identity_on_sampled_m() {
        // (m^e)^d mod n == m for random m in [0, n)
        let keypair = generate_default_keypair(128, 128).unwrap();
        let public = &keypair.public_key;
        let private = &keypair.private_key;

        let mut rng = thread_rng();
        for _ in 0..8 {
            let m = rng.gen_biguint_below(&public.n);
            let c = mod_pow(&m, &public.e, &public.n);
            let recovered = mod_pow(&c, &private.d, &private.n);
            assert_eq!(recovered, m);
        }
    }

    #[test]
    fn test_degenerate_parameters_fail() {
        assert!(matches!(
            generate_default_keypair(4, 128),
            Err(StegoRsaError::KeyGenerationFailed { .. })
        ));
        // 8-bit primes would yield a modulus too narrow for one block
        assert!(matches!(
            generate_default_keypair(8, 8),
            Err(StegoRsaError::KeyGenerationFailed { .. })
        ));
        assert!(matches!(
            generate_default_keypair(16, 8),
            Err(StegoRsaError::KeyGenerationFailed { .. })
        ));
    }

    #[test]
    fn test_public_projection_hides_private_members() {
        let keypair = generate_default_keypair(128, 128).unwrap();
        let public = keypair.private_key.to_public();
        assert_eq!(public.n, keypair.private_key.n);
        assert_eq!(public.e, keypair.private_key.e);
        assert_eq!(&public, keypair.public());
    }

    #[test]
    fn test_key_sink() {
        struct MemorySink(Option<RsaPrivateKey>);
        impl KeySink for MemorySink {
            fn store_private(&mut self, key: &RsaPrivateKey) -> Result<()> {
                self.0 = Some(key.clone());
                Ok(())
            }
        }

        let keypair = generate_default_keypair(96, 96).unwrap();
        let mut sink = MemorySink(None);
        keypair.persist(&mut sink).unwrap();
        assert_eq!(sink.0.unwrap(), keypair.private_key);
    }
}
