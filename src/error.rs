// Error types for the stego/RSA pipeline
// One enum covers everything from key generation through image decoding

use std::io;
use thiserror::Error;

/// Errors that can occur during key generation, encryption, or
/// steganographic encoding/decoding.
#[derive(Debug, Error)]
pub enum StegoRsaError {
    /// gcd(a, m) != 1, so a has no inverse mod m. During key generation
    /// this means the candidate exponent is unusable with these primes.
    #[error("no modular inverse exists (operand not coprime with modulus)")]
    NoInverseExists,

    /// Prime or exponent search exhausted its retry budget.
    #[error("key generation failed after {attempts} attempts")]
    KeyGenerationFailed { attempts: u32 },

    /// A plaintext block encoded to an integer >= n.
    #[error("plaintext block does not fit below the modulus")]
    PlaintextTooLarge,

    /// The carrier image cannot hold the header plus payload.
    #[error("payload too large: need {needed} bits, carrier holds {available}")]
    PayloadTooLarge { needed: usize, available: usize },

    /// The 30-bit length header read from an image is impossible, or the
    /// extracted payload is not shaped like serialized ciphertext blocks.
    /// Wrong key, wrong image, or corruption.
    #[error("corrupt payload header (wrong image, wrong key, or corrupted data)")]
    CorruptHeader,

    /// The carrier file is not a well-formed P6 PPM image.
    #[error("invalid carrier image: {0}")]
    InvalidImage(String),

    /// A persisted key file could not be parsed.
    #[error("invalid key file: {0}")]
    InvalidKeyFile(String),

    /// A persisted ciphertext file could not be parsed.
    #[error("invalid ciphertext file: {0}")]
    InvalidCiphertext(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, StegoRsaError>;
