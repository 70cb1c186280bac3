// File Operations
// Reading and writing carrier images, key files, and ciphertext files

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use num_bigint::BigUint;
use num_traits::Num;

use crate::error::{Result, StegoRsaError};
use crate::rsa::keygen::{KeySink, RsaPrivateKey, RsaPublicKey};
use crate::stego::image::PpmImage;

/// Read entire file into memory
pub fn read_file(path: &Path) -> Result<Vec<u8>> {
    let mut file = File::open(path)?;
    let mut data = Vec::new();
    file.read_to_end(&mut data)?;
    Ok(data)
}

/// Write data to file
pub fn write_file(path: &Path, data: &[u8]) -> Result<()> {
    let mut file = File::create(path)?;
    file.write_all(data)?;
    Ok(())
}

/// Load a P6 PPM carrier image from disk
pub fn load_image(path: &Path) -> Result<PpmImage> {
    PpmImage::from_bytes(&read_file(path)?)
}

/// Write a P6 PPM image to disk
pub fn save_image(path: &Path, image: &PpmImage) -> Result<()> {
    write_file(path, &image.to_bytes())
}

/// Serialize a private key as newline-separated `field=decimal` pairs.
fn private_key_text(key: &RsaPrivateKey) -> String {
    format!(
        "n={}\np={}\nq={}\ne={}\nd={}\n",
        key.n, key.p, key.q, key.e, key.d
    )
}

/// Save a private key (n, p, q, e, d) to a file
pub fn save_private_key(path: &Path, key: &RsaPrivateKey) -> Result<()> {
    write_file(path, private_key_text(key).as_bytes())
}

/// Save a public key (n, e) to a file, same `field=decimal` format
pub fn save_public_key(path: &Path, key: &RsaPublicKey) -> Result<()> {
    write_file(path, format!("n={}\ne={}\n", key.n, key.e).as_bytes())
}

/// Load a private key written by [`save_private_key`]
pub fn load_private_key(path: &Path) -> Result<RsaPrivateKey> {
    let text = String::from_utf8(read_file(path)?)
        .map_err(|_| StegoRsaError::InvalidKeyFile("not valid UTF-8".to_string()))?;

    Ok(RsaPrivateKey {
        n: parse_key_field(&text, "n")?,
        p: parse_key_field(&text, "p")?,
        q: parse_key_field(&text, "q")?,
        e: parse_key_field(&text, "e")?,
        d: parse_key_field(&text, "d")?,
    })
}

/// Load a public key written by [`save_public_key`]
pub fn load_public_key(path: &Path) -> Result<RsaPublicKey> {
    let text = String::from_utf8(read_file(path)?)
        .map_err(|_| StegoRsaError::InvalidKeyFile("not valid UTF-8".to_string()))?;

    Ok(RsaPublicKey {
        n: parse_key_field(&text, "n")?,
        e: parse_key_field(&text, "e")?,
    })
}

fn parse_key_field(text: &str, field: &str) -> Result<BigUint> {
    for line in text.lines() {
        if let Some(value) = line.strip_prefix(field).and_then(|r| r.strip_prefix('=')) {
            return BigUint::from_str_radix(value.trim(), 10).map_err(|_| {
                StegoRsaError::InvalidKeyFile(format!("bad decimal value for {}", field))
            });
        }
    }
    Err(StegoRsaError::InvalidKeyFile(format!(
        "missing field {}",
        field
    )))
}

/// Save ciphertext blocks as space-joined decimal strings
pub fn save_ciphertext(path: &Path, blocks: &[BigUint]) -> Result<()> {
    let text = blocks
        .iter()
        .map(|b| b.to_string())
        .collect::<Vec<_>>()
        .join(" ");
    write_file(path, text.as_bytes())
}

/// Load ciphertext blocks written by [`save_ciphertext`]
pub fn load_ciphertext(path: &Path) -> Result<Vec<BigUint>> {
    let text = String::from_utf8(read_file(path)?)
        .map_err(|_| StegoRsaError::InvalidCiphertext("not valid UTF-8".to_string()))?;

    text.split_whitespace()
        .map(|token| {
            BigUint::from_str_radix(token, 10).map_err(|_| {
                StegoRsaError::InvalidCiphertext(format!("bad decimal block {:?}", token))
            })
        })
        .collect()
}

/// [`KeySink`] that writes private keys to a fixed path.
pub struct FileKeySink {
    path: std::path::PathBuf,
}

impl FileKeySink {
    pub fn new(path: impl Into<std::path::PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl KeySink for FileKeySink {
    fn store_private(&mut self, key: &RsaPrivateKey) -> Result<()> {
        save_private_key(&self.path, key)
    }
}
