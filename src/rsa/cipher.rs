// RSA Block Cipher
// Textbook RSA over fixed-size plaintext chunks, no padding scheme:
// the block size bound guarantees every chunk encodes below the modulus

use num_bigint::BigUint;

use super::bigint::{from_bytes, mod_pow, to_bytes};
use super::keygen::{RsaPrivateKey, RsaPublicKey};
use crate::error::{Result, StegoRsaError};

/// Plaintext bytes per block: floor(bit_len(n) / 8) - 1.
/// Any byte string of this length encodes to an integer < n.
/// Zero for a modulus under 16 bits: such a key cannot carry data.
pub fn block_size(n: &BigUint) -> usize {
    ((n.bits() as usize) / 8).saturating_sub(1)
}

/// Encrypt a single block: m^e mod n. Requires 0 <= m < n.
pub fn encrypt_block(m: &BigUint, public_key: &RsaPublicKey) -> Result<BigUint> {
    if m >= &public_key.n {
        return Err(StegoRsaError::PlaintextTooLarge);
    }
    Ok(mod_pow(m, &public_key.e, &public_key.n))
}

/// Decrypt a single block: c^d mod n.
pub fn decrypt_block(c: &BigUint, private_key: &RsaPrivateKey) -> BigUint {
    mod_pow(c, &private_key.d, &private_key.n)
}

/// Encrypt a byte string: split into block_size(n) chunks, encode each
/// big-endian, encrypt independently. Block order is significant and
/// preserved.
///
/// A modulus below 16 bits has a zero block size and cannot carry even a
/// single plaintext byte; that fails with PlaintextTooLarge rather than
/// reaching `chunks(0)`.
pub fn encrypt_message(plaintext: &[u8], public_key: &RsaPublicKey) -> Result<Vec<BigUint>> {
    let chunk_len = block_size(&public_key.n);
    if chunk_len == 0 {
        return Err(StegoRsaError::PlaintextTooLarge);
    }
    plaintext
        .chunks(chunk_len)
        .map(|chunk| encrypt_block(&from_bytes(chunk), public_key))
        .collect()
}

/// Decrypt a block sequence back into the original byte string.
///
/// Big-endian integer decoding drops leading zero bytes, so each block is
/// re-padded to the full chunk length; `msg_len` trims the final block back
/// to the true message size.
pub fn decrypt_message(
    blocks: &[BigUint],
    private_key: &RsaPrivateKey,
    msg_len: usize,
) -> Vec<u8> {
    let chunk_len = block_size(&private_key.n);
    let mut plaintext = Vec::with_capacity(msg_len);

    for block in blocks {
        let m = decrypt_block(block, private_key);
        let bytes = to_bytes(&m);

        let remaining = msg_len - plaintext.len();
        let this_len = remaining.min(chunk_len);

        // Left-pad with the zeros big-endian decoding swallowed
        let mut chunk = vec![0u8; this_len];
        if bytes.len() <= this_len {
            chunk[this_len - bytes.len()..].copy_from_slice(&bytes);
        } else {
            // a wrong key can decrypt to an integer wider than the chunk
            chunk.copy_from_slice(&bytes[bytes.len() - this_len..]);
        }
        plaintext.extend_from_slice(&chunk);
    }

    plaintext.truncate(msg_len);
    plaintext
}
