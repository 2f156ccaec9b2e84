//! Key algorithm tags and the signature schemes they resolve to.
//!
//! The tag strings and platform algorithm names below are what the Android
//! (JCA / `KeyProperties`) and iOS (`SecKeyAlgorithm`) adapters hand to their
//! providers. They MUST stay byte-identical to the platform constants.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::KeyError;

// --- Algorithm tags ---

/// Elliptic-curve keys (P-256)
pub const ALGORITHM_EC: &str = "EC";

/// RSA keys
pub const ALGORITHM_RSA: &str = "RSA";

// --- Canonical scheme identifiers ---

pub const SCHEME_ECDSA_SHA256: &str = "ECDSA with SHA-256 digest, X9.62 message format";

pub const SCHEME_RSA_PKCS1V15_SHA256: &str = "RSA PKCS#1 v1.5 with SHA-256 digest";

// --- JCA signature names (Android) ---

pub const JCA_ECDSA_SHA256: &str = "SHA256withECDSA";

pub const JCA_RSA_SHA256: &str = "SHA256withRSA";

// --- SecKeyAlgorithm raw values (iOS) ---

pub const SEC_ECDSA_MESSAGE_X962_SHA256: &str = "algid:sign:ECDSA:message-X962:SHA256";

pub const SEC_RSA_MESSAGE_PKCS1V15_SHA256: &str = "algid:sign:RSA:message-PKCS1v15:SHA256";

/// Algorithm family of a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "uniffi-bindgen", derive(uniffi::Enum))]
pub enum KeyKind {
    #[serde(rename = "EC")]
    Ec,
    #[serde(rename = "RSA")]
    Rsa,
}

impl KeyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            KeyKind::Ec => ALGORITHM_EC,
            KeyKind::Rsa => ALGORITHM_RSA,
        }
    }

    /// The only scheme this crate signs and verifies with for keys of this kind.
    pub fn signature_scheme(&self) -> SignatureScheme {
        match self {
            KeyKind::Ec => SignatureScheme::EcdsaSha256,
            KeyKind::Rsa => SignatureScheme::RsaPkcs1v15Sha256,
        }
    }
}

impl fmt::Display for KeyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for KeyKind {
    type Err = KeyError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag {
            ALGORITHM_EC => Ok(KeyKind::Ec),
            ALGORITHM_RSA => Ok(KeyKind::Rsa),
            other => Err(KeyError::UnsupportedAlgorithm(other.to_string())),
        }
    }
}

/// Digest + signature scheme pair used for signing and verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignatureScheme {
    /// ECDSA over P-256 with SHA-256, DER (X9.62) encoded signatures.
    EcdsaSha256,
    /// RSASSA-PKCS1-v1_5 with SHA-256.
    RsaPkcs1v15Sha256,
}

impl SignatureScheme {
    pub fn identifier(&self) -> &'static str {
        match self {
            SignatureScheme::EcdsaSha256 => SCHEME_ECDSA_SHA256,
            SignatureScheme::RsaPkcs1v15Sha256 => SCHEME_RSA_PKCS1V15_SHA256,
        }
    }

    pub fn jca_name(&self) -> &'static str {
        match self {
            SignatureScheme::EcdsaSha256 => JCA_ECDSA_SHA256,
            SignatureScheme::RsaPkcs1v15Sha256 => JCA_RSA_SHA256,
        }
    }

    pub fn sec_key_algorithm(&self) -> &'static str {
        match self {
            SignatureScheme::EcdsaSha256 => SEC_ECDSA_MESSAGE_X962_SHA256,
            SignatureScheme::RsaPkcs1v15Sha256 => SEC_RSA_MESSAGE_PKCS1V15_SHA256,
        }
    }

    pub fn key_kind(&self) -> KeyKind {
        match self {
            SignatureScheme::EcdsaSha256 => KeyKind::Ec,
            SignatureScheme::RsaPkcs1v15Sha256 => KeyKind::Rsa,
        }
    }
}

impl fmt::Display for SignatureScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.identifier())
    }
}

/// Resolve an algorithm tag (`"EC"`, `"RSA"`) to its signature scheme.
///
/// Whether the provider actually supports the scheme for a given key is the
/// caller's check (see [`crate::keystore::KeyStore::supports`]).
pub fn resolve(tag: &str) -> Result<SignatureScheme, KeyError> {
    tag.parse::<KeyKind>().map(|kind| kind.signature_scheme())
}
