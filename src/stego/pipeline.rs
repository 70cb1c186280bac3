// Combined encode/decode pipeline
// Plaintext -> RSA block cipher -> serialized bitstream -> LSB embed,
// and the reverse

use num_bigint::BigUint;

use super::codec;
use super::image::PpmImage;
use crate::error::{Result, StegoRsaError};
use crate::rsa::cipher::{self, block_size};
use crate::rsa::keygen::{RsaPrivateKey, RsaPublicKey};

/// Bits used for the plaintext byte-length prefix inside the payload.
/// Without it, trailing zero bytes of the final chunk would be lost to
/// big-endian integer decoding.
const LENGTH_PREFIX_BITS: usize = 32;

/// Encrypt `plaintext` with `public_key` and embed the result in a copy of
/// `image`.
///
/// Payload layout: a 32-bit big-endian plaintext byte count, then each
/// ciphertext block as exactly bit_len(n) bits, big-endian, zero-padded.
/// The fixed per-block width is what makes decoding unambiguous.
pub fn encode_message(
    image: &PpmImage,
    plaintext: &[u8],
    public_key: &RsaPublicKey,
) -> Result<PpmImage> {
    let blocks = cipher::encrypt_message(plaintext, public_key)?;
    let block_width = public_key.n.bits() as usize;

    let mut payload = Vec::with_capacity(LENGTH_PREFIX_BITS + blocks.len() * block_width);
    push_fixed_width(&mut payload, &BigUint::from(plaintext.len()), LENGTH_PREFIX_BITS);
    for block in &blocks {
        push_fixed_width(&mut payload, block, block_width);
    }

    codec::embed(image, &payload)
}

/// Extract and decrypt a message embedded by [`encode_message`].
///
/// Fails with `CorruptHeader` when the extracted payload is not shaped as a
/// length prefix plus a whole number of blocks matching that length.
pub fn decode_message(image: &PpmImage, private_key: &RsaPrivateKey) -> Result<Vec<u8>> {
    let payload = codec::extract(image)?;
    if payload.len() < LENGTH_PREFIX_BITS {
        return Err(StegoRsaError::CorruptHeader);
    }

    let (prefix, block_bits) = payload.split_at(LENGTH_PREFIX_BITS);
    let msg_len = bits_to_usize(prefix);

    let block_width = private_key.n.bits() as usize;
    if block_bits.len() % block_width != 0 {
        return Err(StegoRsaError::CorruptHeader);
    }

    // a modulus this small can never have carried a message
    let chunk_len = block_size(&private_key.n);
    if chunk_len == 0 {
        return Err(StegoRsaError::CorruptHeader);
    }
    let expected_blocks = msg_len.div_ceil(chunk_len);
    if block_bits.len() / block_width != expected_blocks {
        return Err(StegoRsaError::CorruptHeader);
    }

    let blocks: Vec<BigUint> = block_bits
        .chunks(block_width)
        .map(bits_to_biguint)
        .collect();

    Ok(cipher::decrypt_message(&blocks, private_key, msg_len))
}

/// Append `value` to `bits` as exactly `width` bits, big-endian.
fn push_fixed_width(bits: &mut Vec<u8>, value: &BigUint, width: usize) {
    for i in (0..width).rev() {
        bits.push(value.bit(i as u64) as u8);
    }
}

fn bits_to_biguint(bits: &[u8]) -> BigUint {
    let mut value = BigUint::from(0u8);
    for &bit in bits {
        value = (value << 1) | BigUint::from(bit);
    }
    value
}

fn bits_to_usize(bits: &[u8]) -> usize {
    bits.iter().fold(0usize, |acc, &bit| (acc << 1) | bit as usize)
}
