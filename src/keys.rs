//! Structured public key material.
//!
//! Coordinates and RSA components travel as decimal strings so every
//! language on the other side of the bridge can hold them without a
//! big-integer library.

use rsa::BigUint;
use serde::{Deserialize, Serialize};

use crate::algorithms::KeyKind;
use crate::errors::KeyError;

/// Width of a P-256 field element in bytes.
pub const P256_COORDINATE_LEN: usize = 32;

/// Affine coordinates of a P-256 public key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "uniffi-bindgen", derive(uniffi::Record))]
pub struct EcPublicKey {
    /// decimal x coordinate
    pub x: String,
    /// decimal y coordinate
    pub y: String,
}

/// RSA public key components.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "uniffi-bindgen", derive(uniffi::Record))]
pub struct RsaPublicKey {
    /// decimal modulus
    pub n: String,
    /// decimal public exponent
    pub e: String,
}

/// An algorithm-tagged public key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum KeyMaterial {
    Ec(EcPublicKey),
    Rsa(RsaPublicKey),
}

impl EcPublicKey {
    pub fn new(x: impl Into<String>, y: impl Into<String>) -> Self {
        Self { x: x.into(), y: y.into() }
    }

    /// Build from big-endian unsigned coordinate bytes.
    pub fn from_coordinates(x: &[u8], y: &[u8]) -> Self {
        Self {
            x: BigUint::from_bytes_be(x).to_string(),
            y: BigUint::from_bytes_be(y).to_string(),
        }
    }

    /// Both coordinates as 32-byte big-endian arrays.
    pub fn coordinates(&self) -> Result<([u8; P256_COORDINATE_LEN], [u8; P256_COORDINATE_LEN]), KeyError> {
        let x = fixed_width("x", &parse_decimal("x", &self.x)?)?;
        let y = fixed_width("y", &parse_decimal("y", &self.y)?)?;
        Ok((x, y))
    }

    /// Both coordinates parse and fit the P-256 field width.
    ///
    /// Curve membership is checked separately by [`crate::verify::validate_point`].
    pub fn validate(&self) -> Result<(), KeyError> {
        self.coordinates().map(|_| ())
    }
}

impl RsaPublicKey {
    pub fn new(n: impl Into<String>, e: impl Into<String>) -> Self {
        Self { n: n.into(), e: e.into() }
    }

    /// Build from big-endian unsigned modulus and exponent bytes.
    pub fn from_components(modulus: &[u8], exponent: &[u8]) -> Self {
        Self {
            n: BigUint::from_bytes_be(modulus).to_string(),
            e: BigUint::from_bytes_be(exponent).to_string(),
        }
    }

    /// Minimal big-endian magnitudes of the modulus and exponent.
    pub fn components(&self) -> Result<(Vec<u8>, Vec<u8>), KeyError> {
        let n = positive_magnitude("n", &self.n)?;
        let e = positive_magnitude("e", &self.e)?;
        Ok((n, e))
    }

    /// Both components parse and are positive.
    pub fn validate(&self) -> Result<(), KeyError> {
        self.components().map(|_| ())
    }
}

impl KeyMaterial {
    pub fn kind(&self) -> KeyKind {
        match self {
            KeyMaterial::Ec(_) => KeyKind::Ec,
            KeyMaterial::Rsa(_) => KeyKind::Rsa,
        }
    }

    pub fn validate(&self) -> Result<(), KeyError> {
        match self {
            KeyMaterial::Ec(key) => key.validate(),
            KeyMaterial::Rsa(key) => key.validate(),
        }
    }
}

impl From<EcPublicKey> for KeyMaterial {
    fn from(key: EcPublicKey) -> Self {
        KeyMaterial::Ec(key)
    }
}

impl From<RsaPublicKey> for KeyMaterial {
    fn from(key: RsaPublicKey) -> Self {
        KeyMaterial::Rsa(key)
    }
}

/// Parse a non-negative decimal integer. Only ASCII digits are accepted.
pub(crate) fn parse_decimal(field: &str, value: &str) -> Result<BigUint, KeyError> {
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(KeyError::InvalidCoordinates(format!(
            "{field} is not a non-negative decimal integer"
        )));
    }
    BigUint::parse_bytes(value.as_bytes(), 10).ok_or_else(|| {
        KeyError::InvalidCoordinates(format!("{field} is not a non-negative decimal integer"))
    })
}

/// Big-endian bytes with leading zeros removed; empty for zero.
pub(crate) fn magnitude(value: &BigUint) -> Vec<u8> {
    let bytes = value.to_bytes_be();
    let start = bytes.iter().position(|&b| b != 0).unwrap_or(bytes.len());
    bytes[start..].to_vec()
}

fn positive_magnitude(field: &str, value: &str) -> Result<Vec<u8>, KeyError> {
    let bytes = magnitude(&parse_decimal(field, value)?);
    if bytes.is_empty() {
        return Err(KeyError::InvalidCoordinates(format!("{field} must be positive")));
    }
    Ok(bytes)
}

fn fixed_width(field: &str, value: &BigUint) -> Result<[u8; P256_COORDINATE_LEN], KeyError> {
    let bytes = magnitude(value);
    if bytes.len() > P256_COORDINATE_LEN {
        return Err(KeyError::InvalidCoordinates(format!(
            "{field} is {} bytes, wider than the {P256_COORDINATE_LEN}-byte field",
            bytes.len()
        )));
    }
    let mut out = [0u8; P256_COORDINATE_LEN];
    out[P256_COORDINATE_LEN - bytes.len()..].copy_from_slice(&bytes);
    Ok(out)
}
