// LSB bitstream codec
// Embeds a length-prefixed bitstream into the least significant bits of a
// carrier image's channel bytes, in fixed row-major R,G,B order

use super::image::PpmImage;
use crate::error::{Result, StegoRsaError};

/// Bits in the big-endian length header written ahead of the payload.
pub const HEADER_BITS: usize = 30;

/// Embed a payload bitstream (one bit per element, values 0 or 1) into a
/// copy of the carrier. Channel bytes beyond the bitstream keep their
/// original values, so distortion is at most ±1 per modified channel.
pub fn embed(image: &PpmImage, payload: &[u8]) -> Result<PpmImage> {
    let capacity = image.capacity_bits();
    let needed = HEADER_BITS + payload.len();
    if needed > capacity {
        return Err(StegoRsaError::PayloadTooLarge {
            needed,
            available: capacity,
        });
    }
    if payload.len() >= 1 << HEADER_BITS {
        return Err(StegoRsaError::PayloadTooLarge {
            needed,
            available: (1 << HEADER_BITS) - 1,
        });
    }

    let mut stego = image.clone();

    for (i, byte) in stego.data.iter_mut().take(needed).enumerate() {
        let bit = if i < HEADER_BITS {
            // header: payload length, big-endian, MSB first
            ((payload.len() >> (HEADER_BITS - 1 - i)) & 1) as u8
        } else {
            payload[i - HEADER_BITS]
        };
        *byte = (*byte & !1) | bit;
    }

    Ok(stego)
}

/// Read the 30-bit length header, then that many payload bits, from the
/// same fixed scan order. A length exceeding the remaining capacity means
/// the image carries no valid payload.
pub fn extract(image: &PpmImage) -> Result<Vec<u8>> {
    let capacity = image.capacity_bits();
    if capacity < HEADER_BITS {
        return Err(StegoRsaError::CorruptHeader);
    }

    let mut len = 0usize;
    for byte in &image.data[..HEADER_BITS] {
        len = (len << 1) | (byte & 1) as usize;
    }

    if HEADER_BITS + len > capacity {
        return Err(StegoRsaError::CorruptHeader);
    }

    Ok(image.data[HEADER_BITS..HEADER_BITS + len]
        .iter()
        .map(|byte| byte & 1)
        .collect())
}

/// Expand bytes into bits, MSB first.
pub fn bytes_to_bits(data: &[u8]) -> Vec<u8> {
    let mut bits = Vec::with_capacity(data.len() * 8);
    for &byte in data {
        for i in (0..8).rev() {
            bits.push((byte >> i) & 1);
        }
    }
    bits
}

/// Pack bits (MSB first) back into bytes.
pub fn bits_to_bytes(bits: &[u8]) -> Vec<u8> {
    let mut out = vec![0u8; (bits.len() + 7) / 8];
    for (i, &bit) in bits.iter().enumerate() {
        out[i / 8] |= bit << (7 - (i % 8));
    }
    out
}
