// Steganography Module - Main module file
// Carrier image, LSB codec, and the combined encrypt-and-embed pipeline

pub mod codec;
pub mod image;
pub mod pipeline;

pub use codec::{bits_to_bytes, bytes_to_bits, embed, extract, HEADER_BITS};
pub use image::PpmImage;
pub use pipeline::{decode_message, encode_message};
