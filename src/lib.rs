//! # stego_rsa
//!
//! Hides RSA-encrypted messages in the least significant bits of P6 PPM
//! images. Three layers:
//!
//! - `rsa` — big-integer arithmetic, Miller-Rabin primality, key
//!   generation, and a textbook block cipher.
//! - `stego` — the carrier image format and the LSB bitstream codec with a
//!   30-bit length header, plus the combined encode/decode pipeline.
//! - `util` — file formats: PPM images, `field=decimal` key files,
//!   space-joined decimal ciphertext files.
//!
//! # Quick start
//!
//! ```rust,ignore
//! use stego_rsa::rsa::generate_default_keypair;
//! use stego_rsa::stego::{encode_message, decode_message, PpmImage};
//!
//! let keypair = generate_default_keypair(256, 256)?;
//! let cover = PpmImage::from_bytes(&std::fs::read("cover.ppm")?)?;
//! let stego = encode_message(&cover, b"secret", keypair.public())?;
//! let recovered = decode_message(&stego, &keypair.private_key)?;
//! assert_eq!(recovered, b"secret");
//! ```

pub mod error;
pub mod rsa;
pub mod stego;
pub mod util;

pub use error::{Result, StegoRsaError};
pub use rsa::{generate_default_keypair, generate_keypair, KeySink, RsaKeyPair, RsaPrivateKey, RsaPublicKey};
pub use stego::{decode_message, encode_message, PpmImage};
