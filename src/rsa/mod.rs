// RSA Module - Main module file
// Exports key generation and the block cipher

pub mod bigint;
pub mod cipher;
pub mod keygen;

pub use cipher::{decrypt_block, decrypt_message, encrypt_block, encrypt_message};
pub use keygen::{
    generate_default_keypair, generate_keypair, KeySink, RsaKeyPair, RsaPrivateKey, RsaPublicKey,
};
