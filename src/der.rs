//! Minimal DER reader/writer for the RSA public key SEQUENCE.
//!
//! Only what PKCS#1 `RSAPublicKey` needs: SEQUENCE and INTEGER tags, and
//! definite lengths of at most two length octets.
//!
//! Length encoding:
//! - `len < 0x80`:            `len`
//! - `0x80 <= len <= 0xFF`:   `0x81 len`
//! - `0x100 <= len <= 0xFFFF`: `0x82 hi lo`

use crate::errors::KeyError;

pub const TAG_INTEGER: u8 = 0x02;
pub const TAG_SEQUENCE: u8 = 0x30;

const LONG_FORM: u8 = 0x80;
const MAX_LENGTH_OCTETS: usize = 2;

/// Append the DER length octets for `len`.
pub fn write_length(out: &mut Vec<u8>, len: usize) -> Result<(), KeyError> {
    if len < 0x80 {
        out.push(len as u8);
    } else if len <= 0xFF {
        out.extend_from_slice(&[0x81, len as u8]);
    } else if len <= 0xFFFF {
        out.extend_from_slice(&[0x82, (len >> 8) as u8, (len & 0xFF) as u8]);
    } else {
        return Err(KeyError::MalformedKey(format!(
            "length {len} needs more than {MAX_LENGTH_OCTETS} length octets"
        )));
    }
    Ok(())
}

/// Append a tag-length-value triple.
pub fn write_tlv(out: &mut Vec<u8>, tag: u8, value: &[u8]) -> Result<(), KeyError> {
    out.push(tag);
    write_length(out, value.len())?;
    out.extend_from_slice(value);
    Ok(())
}

/// Append an INTEGER holding the unsigned big-endian `magnitude`.
///
/// Leading zero bytes are dropped, zero encodes as a single `0x00`, and a
/// `0x00` pad is inserted when the first value byte has its high bit set so
/// the integer never reads as negative.
pub fn write_unsigned_integer(out: &mut Vec<u8>, magnitude: &[u8]) -> Result<(), KeyError> {
    let start = magnitude.iter().position(|&b| b != 0).unwrap_or(magnitude.len());
    let trimmed = &magnitude[start..];

    let mut value = Vec::with_capacity(trimmed.len() + 1);
    if trimmed.first().map_or(true, |&b| b & 0x80 != 0) {
        value.push(0x00);
    }
    value.extend_from_slice(trimmed);
    write_tlv(out, TAG_INTEGER, &value)
}

/// Forward-only cursor over DER bytes. Every failure names the field being read.
pub struct DerReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> DerReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    fn read_byte(&mut self, field: &str) -> Result<u8, KeyError> {
        let byte = *self
            .data
            .get(self.pos)
            .ok_or_else(|| KeyError::MalformedKey(format!("{field}: unexpected end of data")))?;
        self.pos += 1;
        Ok(byte)
    }

    /// Consume one byte and require it to be `tag`.
    pub fn expect_tag(&mut self, tag: u8, field: &str) -> Result<(), KeyError> {
        let found = self.read_byte(field)?;
        if found != tag {
            return Err(KeyError::MalformedKey(format!(
                "{field}: expected tag 0x{tag:02x}, found 0x{found:02x}"
            )));
        }
        Ok(())
    }

    /// Read short- or long-form length octets.
    pub fn read_length(&mut self, field: &str) -> Result<usize, KeyError> {
        let first = self.read_byte(field)?;
        if first & LONG_FORM == 0 {
            return Ok(first as usize);
        }

        let count = (first & !LONG_FORM) as usize;
        if count == 0 {
            return Err(KeyError::MalformedKey(format!("{field}: indefinite length")));
        }
        if count > MAX_LENGTH_OCTETS {
            return Err(KeyError::MalformedKey(format!(
                "{field}: unsupported length of {count} octets"
            )));
        }

        let mut len = 0usize;
        for _ in 0..count {
            len = (len << 8) | self.read_byte(field)? as usize;
        }
        Ok(len)
    }

    /// Take the next `len` bytes.
    pub fn take(&mut self, len: usize, field: &str) -> Result<&'a [u8], KeyError> {
        if len > self.remaining() {
            return Err(KeyError::MalformedKey(format!(
                "{field}: declared {len} bytes but only {} remain",
                self.remaining()
            )));
        }
        let slice = &self.data[self.pos..self.pos + len];
        self.pos += len;
        Ok(slice)
    }

    /// Read a full TLV with the given tag and return its value bytes.
    pub fn read_tlv(&mut self, tag: u8, field: &str) -> Result<&'a [u8], KeyError> {
        self.expect_tag(tag, field)?;
        let len = self.read_length(field)?;
        self.take(len, field)
    }

    /// Read a non-negative INTEGER and return its magnitude (sign pad removed).
    pub fn read_unsigned_integer(&mut self, field: &str) -> Result<&'a [u8], KeyError> {
        let value = self.read_tlv(TAG_INTEGER, field)?;
        match value.first() {
            None => Err(KeyError::MalformedKey(format!("{field}: empty integer"))),
            Some(&b) if b & 0x80 != 0 => {
                Err(KeyError::MalformedKey(format!("{field}: negative integer")))
            }
            Some(_) => {
                let start = value.iter().position(|&b| b != 0).unwrap_or(value.len());
                Ok(&value[start..])
            }
        }
    }
}
