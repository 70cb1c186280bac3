// P6 PPM carrier image
// Parse, serialize, and capacity for the binary RGB raster format

use crate::error::{Result, StegoRsaError};

/// A binary (P6) PPM image: text header, then raw interleaved RGB bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PpmImage {
    pub width: usize,
    pub height: usize,
    pub max_val: u16,
    /// width * height * 3 channel bytes, row-major, R G B per pixel
    pub data: Vec<u8>,
}

impl PpmImage {
    /// Create an image from raw channel bytes.
    pub fn new(width: usize, height: usize, max_val: u16, data: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(StegoRsaError::InvalidImage(
                "zero width or height".to_string(),
            ));
        }
        let expected = width * height * 3;
        if data.len() != expected {
            return Err(StegoRsaError::InvalidImage(format!(
                "expected {} channel bytes, got {}",
                expected,
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            max_val,
            data,
        })
    }

    /// Bits this carrier can hold: one per channel byte.
    pub fn capacity_bits(&self) -> usize {
        self.width * self.height * 3
    }

    /// Parse a P6 PPM from raw file bytes.
    ///
    /// Header tokens may be separated by any whitespace; `#` comments are
    /// skipped. Pixel data starts after the single whitespace byte that
    /// terminates the max-value token.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let mut pos = 0;

        let magic = next_token(bytes, &mut pos)
            .ok_or_else(|| StegoRsaError::InvalidImage("missing magic number".to_string()))?;
        if magic != b"P6" {
            return Err(StegoRsaError::InvalidImage(format!(
                "not a P6 image (magic {:?})",
                String::from_utf8_lossy(&magic)
            )));
        }

        let width: usize = parse_header_number(bytes, &mut pos, "width")?;
        let height: usize = parse_header_number(bytes, &mut pos, "height")?;
        let max_val: u16 = parse_header_number(bytes, &mut pos, "max value")?;

        if width == 0 || height == 0 {
            return Err(StegoRsaError::InvalidImage(
                "zero width or height".to_string(),
            ));
        }
        if max_val == 0 || max_val > 255 {
            return Err(StegoRsaError::InvalidImage(format!(
                "unsupported max value {} (want 1-255, one byte per channel)",
                max_val
            )));
        }

        let expected = width * height * 3;
        let pixels = &bytes[pos..];
        if pixels.len() < expected {
            return Err(StegoRsaError::InvalidImage(format!(
                "truncated pixel data: expected {} bytes, got {}",
                expected,
                pixels.len()
            )));
        }

        Ok(Self {
            width,
            height,
            max_val,
            data: pixels[..expected].to_vec(),
        })
    }

    /// Serialize back to P6 file bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        let header = format!("P6\n{} {}\n{}\n", self.width, self.height, self.max_val);
        let mut out = Vec::with_capacity(header.len() + self.data.len());
        out.extend_from_slice(header.as_bytes());
        out.extend_from_slice(&self.data);
        out
    }
}

/// Read the next whitespace-delimited header token, skipping `#` comments.
/// Advances `pos` past the single whitespace byte terminating the token.
fn next_token(bytes: &[u8], pos: &mut usize) -> Option<Vec<u8>> {
    // skip whitespace and comment lines
    loop {
        while *pos < bytes.len() && bytes[*pos].is_ascii_whitespace() {
            *pos += 1;
        }
        if *pos < bytes.len() && bytes[*pos] == b'#' {
            while *pos < bytes.len() && bytes[*pos] != b'\n' {
                *pos += 1;
            }
        } else {
            break;
        }
    }

    if *pos >= bytes.len() {
        return None;
    }

    let start = *pos;
    while *pos < bytes.len() && !bytes[*pos].is_ascii_whitespace() {
        *pos += 1;
    }
    let token = bytes[start..*pos].to_vec();

    // consume exactly one whitespace terminator so pixel data is untouched
    if *pos < bytes.len() {
        *pos += 1;
    }

    Some(token)
}

fn parse_header_number<T: std::str::FromStr>(
    bytes: &[u8],
    pos: &mut usize,
    what: &str,
) -> Result<T> {
    let token = next_token(bytes, pos)
        .ok_or_else(|| StegoRsaError::InvalidImage(format!("missing {}", what)))?;
    std::str::from_utf8(&token)
        .ok()
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| {
            StegoRsaError::InvalidImage(format!(
                "bad {}: {:?}",
                what,
                String::from_utf8_lossy(&token)
            ))
        })
}
