//! Boundary to the platform keystore and biometric prompt.
//!
//! Android Keystore and the iOS Secure Enclave implement [`KeyStore`] on the
//! native side; [`crate::memory::MemoryKeyStore`] is the in-process version.
//! Private keys never cross this boundary, only raw public key exports and
//! signatures do.

use serde::{Deserialize, Serialize};

use crate::algorithms::{KeyKind, SignatureScheme};
use crate::errors::ProviderError;

/// Alias used when a key spec does not name one.
pub const DEFAULT_KEY_ALIAS: &str = "default_signature_alias";

/// Default key size in bits (P-256).
pub const DEFAULT_KEY_SIZE: u32 = 256;

/// Parameters for key generation. Every field has a default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct KeySpec {
    pub algorithm: KeyKind,
    pub alias: String,
    /// key size in bits
    pub size: u32,
}

impl Default for KeySpec {
    fn default() -> Self {
        Self {
            algorithm: KeyKind::Ec,
            alias: DEFAULT_KEY_ALIAS.to_string(),
            size: DEFAULT_KEY_SIZE,
        }
    }
}

impl KeySpec {
    pub fn ec(alias: impl Into<String>) -> Self {
        Self {
            algorithm: KeyKind::Ec,
            alias: alias.into(),
            size: DEFAULT_KEY_SIZE,
        }
    }

    pub fn rsa(alias: impl Into<String>, size: u32) -> Self {
        Self {
            algorithm: KeyKind::Rsa,
            alias: alias.into(),
            size,
        }
    }
}

/// Strings shown by the biometric prompt. Absent fields keep the platform default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignaturePrompt {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub cancel: Option<String>,
}

impl SignaturePrompt {
    /// Title and subtitle joined by a newline, as shown in the iOS reason string.
    pub fn reason(&self) -> String {
        [self.title.as_deref(), self.subtitle.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// A public key as exported by the platform, before decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedKey {
    pub kind: KeyKind,
    /// SEC1 uncompressed point or PKCS#1 DER sequence
    pub raw: Vec<u8>,
}

/// Platform keystore holding private keys by alias.
pub trait KeyStore: Send + Sync {
    /// Generate (or replace) the key pair named by `spec.alias` and export its public half.
    fn generate(&self, spec: &KeySpec) -> Result<ExportedKey, ProviderError>;

    /// Export the public half of `alias`, or `None` if no such key exists.
    fn export_public(&self, alias: &str) -> Result<Option<ExportedKey>, ProviderError>;

    fn contains(&self, alias: &str) -> bool;

    /// Remove `alias`; true if a key was removed.
    fn delete(&self, alias: &str) -> bool;

    /// Whether the provider can use `scheme` with this particular key.
    fn supports(&self, _alias: &str, _scheme: SignatureScheme) -> bool {
        true
    }

    /// Authenticate the user with `prompt` and sign `data` with the private key of `alias`.
    fn sign(
        &self,
        alias: &str,
        scheme: SignatureScheme,
        data: &[u8],
        prompt: &SignaturePrompt,
    ) -> Result<Vec<u8>, ProviderError>;
}
