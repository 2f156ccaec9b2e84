//! In-process keystore for tests, desktop builds and single-process demos.
//!
//! Keys live in a `Mutex<HashMap>` keyed by alias. Exports use the same raw
//! formats the platforms produce (SEC1 uncompressed point, PKCS#1 DER), so
//! everything above this store runs the real codec path.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use elliptic_curve::sec1::ToEncodedPoint;
use p256::ecdsa::signature::RandomizedSigner;
use p256::ecdsa::{Signature as EcdsaSignature, SigningKey};
use rand::rngs::OsRng;
use rsa::pkcs1::EncodeRsaPublicKey;
use rsa::{Pkcs1v15Sign, RsaPrivateKey};
use sha2::{Digest, Sha256};

use crate::algorithms::{KeyKind, SignatureScheme};
use crate::errors::ProviderError;
use crate::keystore::{ExportedKey, KeySpec, KeyStore, SignaturePrompt};

const EC_KEY_BITS: u32 = 256;
const RSA_MIN_KEY_BITS: u32 = 1024;

/// Largest modulus [`crate::verify::PublicVerifier`] accepts.
pub const RSA_MAX_KEY_BITS: u32 = 4096;

/// Called before every signature; stands in for the biometric prompt.
pub type Authenticator = dyn Fn(&str, &SignaturePrompt) -> Result<(), ProviderError> + Send + Sync;

enum StoredKey {
    Ec(SigningKey),
    Rsa(RsaPrivateKey),
}

impl StoredKey {
    fn kind(&self) -> KeyKind {
        match self {
            StoredKey::Ec(_) => KeyKind::Ec,
            StoredKey::Rsa(_) => KeyKind::Rsa,
        }
    }

    fn export(&self) -> Result<ExportedKey, ProviderError> {
        let raw = match self {
            StoredKey::Ec(key) => p256::PublicKey::from(key.verifying_key())
                .to_encoded_point(false)
                .as_bytes()
                .to_vec(),
            StoredKey::Rsa(key) => key
                .to_public_key()
                .to_pkcs1_der()
                .map_err(|e| ProviderError::KeyStore(e.to_string()))?
                .as_bytes()
                .to_vec(),
        };
        Ok(ExportedKey { kind: self.kind(), raw })
    }
}

/// Software keystore implementing [`KeyStore`].
pub struct MemoryKeyStore {
    keys: Mutex<HashMap<String, StoredKey>>,
    authenticator: Box<Authenticator>,
}

impl Default for MemoryKeyStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryKeyStore {
    /// Create an empty store that approves every signature request.
    pub fn new() -> Self {
        Self::with_authenticator(|_, _| Ok(()))
    }

    /// Create an empty store that runs `authenticator` before signing.
    pub fn with_authenticator<F>(authenticator: F) -> Self
    where
        F: Fn(&str, &SignaturePrompt) -> Result<(), ProviderError> + Send + Sync + 'static,
    {
        Self {
            keys: Mutex::new(HashMap::new()),
            authenticator: Box::new(authenticator),
        }
    }

    fn keys(&self) -> MutexGuard<'_, HashMap<String, StoredKey>> {
        self.keys.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl KeyStore for MemoryKeyStore {
    fn generate(&self, spec: &KeySpec) -> Result<ExportedKey, ProviderError> {
        let key = match spec.algorithm {
            KeyKind::Ec => {
                if spec.size != EC_KEY_BITS {
                    return Err(ProviderError::InvalidParameters(format!(
                        "EC keys must be {EC_KEY_BITS} bits, got {}",
                        spec.size
                    )));
                }
                StoredKey::Ec(SigningKey::random(&mut OsRng))
            }
            KeyKind::Rsa => {
                if !(RSA_MIN_KEY_BITS..=RSA_MAX_KEY_BITS).contains(&spec.size) {
                    return Err(ProviderError::InvalidParameters(format!(
                        "RSA keys must be {RSA_MIN_KEY_BITS} to {RSA_MAX_KEY_BITS} bits, got {}",
                        spec.size
                    )));
                }
                let key = RsaPrivateKey::new(&mut OsRng, spec.size as usize)
                    .map_err(|e| ProviderError::KeyStore(e.to_string()))?;
                StoredKey::Rsa(key)
            }
        };

        let exported = key.export()?;
        self.keys().insert(spec.alias.clone(), key);
        Ok(exported)
    }

    fn export_public(&self, alias: &str) -> Result<Option<ExportedKey>, ProviderError> {
        self.keys().get(alias).map(StoredKey::export).transpose()
    }

    fn contains(&self, alias: &str) -> bool {
        self.keys().contains_key(alias)
    }

    fn delete(&self, alias: &str) -> bool {
        self.keys().remove(alias).is_some()
    }

    fn supports(&self, alias: &str, scheme: SignatureScheme) -> bool {
        self.keys()
            .get(alias)
            .is_some_and(|key| key.kind() == scheme.key_kind())
    }

    fn sign(
        &self,
        alias: &str,
        scheme: SignatureScheme,
        data: &[u8],
        prompt: &SignaturePrompt,
    ) -> Result<Vec<u8>, ProviderError> {
        (self.authenticator)(alias, prompt)?;

        let keys = self.keys();
        let key = keys
            .get(alias)
            .ok_or_else(|| ProviderError::KeyNotFound(alias.to_string()))?;

        match (key, scheme) {
            (StoredKey::Ec(key), SignatureScheme::EcdsaSha256) => {
                let signature: EcdsaSignature = key.sign_with_rng(&mut OsRng, data);
                Ok(signature.to_der().as_bytes().to_vec())
            }
            (StoredKey::Rsa(key), SignatureScheme::RsaPkcs1v15Sha256) => {
                let digest = Sha256::digest(data);
                key.sign(Pkcs1v15Sign::new::<Sha256>(), &digest)
                    .map_err(|e| ProviderError::KeyStore(e.to_string()))
            }
            (key, scheme) => Err(ProviderError::KeyStore(format!(
                "{} key cannot sign with {scheme}",
                key.kind()
            ))),
        }
    }
}
