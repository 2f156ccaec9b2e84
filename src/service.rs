//! The operations exposed by the native signature modules.
//!
//! `SignatureService` owns no key material; it translates between the
//! keystore's raw exports and [`KeyMaterial`], resolves the signature scheme
//! for each key, and verifies signatures in software. Keystore and
//! authentication errors pass through unchanged.

use std::sync::Arc;

use crate::codec;
use crate::errors::{KeyError, ProviderError, SignatureError};
use crate::keys::KeyMaterial;
use crate::keystore::{ExportedKey, KeySpec, KeyStore, SignaturePrompt};
use crate::verify::{self, PublicVerifier};

pub struct SignatureService {
    store: Arc<dyn KeyStore>,
}

impl SignatureService {
    pub fn new(store: Arc<dyn KeyStore>) -> Self {
        Self { store }
    }

    /// Generate a key pair under `spec.alias` and return its public key.
    pub fn generate_keys(&self, spec: &KeySpec) -> Result<KeyMaterial, SignatureError> {
        if spec.alias.is_empty() {
            return Err(ProviderError::InvalidParameters("alias must not be empty".into()).into());
        }
        tracing::info!(alias = %spec.alias, algorithm = %spec.algorithm, size = spec.size, "generating key pair");

        let exported = self.store.generate(spec)?;
        if exported.kind != spec.algorithm {
            return Err(KeyError::UnsupportedAlgorithm(format!(
                "requested {} key, keystore produced {}",
                spec.algorithm, exported.kind
            ))
            .into());
        }
        Ok(codec::decode(&exported.raw, exported.kind)?)
    }

    /// Public key stored under `alias`, or `None` if there is none.
    pub fn get_public_key(&self, alias: &str) -> Result<Option<KeyMaterial>, SignatureError> {
        match self.store.export_public(alias)? {
            Some(exported) => Ok(Some(codec::decode(&exported.raw, exported.kind)?)),
            None => Ok(None),
        }
    }

    pub fn is_key_present(&self, alias: &str) -> bool {
        self.store.contains(alias)
    }

    /// Delete `alias`; true if a key was removed.
    pub fn delete_key(&self, alias: &str) -> bool {
        let deleted = self.store.delete(alias);
        tracing::info!(alias, deleted, "delete key");
        deleted
    }

    /// Sign `data` with the key under `alias`, prompting the user first.
    pub fn sign(
        &self,
        data: &[u8],
        alias: &str,
        prompt: &SignaturePrompt,
    ) -> Result<Vec<u8>, SignatureError> {
        let exported = self.require_key(alias)?;
        let scheme = exported.kind.signature_scheme();
        if !self.store.supports(alias, scheme) {
            tracing::warn!(alias, %scheme, "keystore does not support scheme for key");
            return Err(KeyError::UnsupportedAlgorithm(scheme.to_string()).into());
        }
        Ok(self.store.sign(alias, scheme, data, prompt)?)
    }

    /// Verify `signature` over `data` with the public key stored under `alias`.
    pub fn verify(&self, data: &[u8], signature: &[u8], alias: &str) -> Result<bool, SignatureError> {
        let exported = self.require_key(alias)?;
        let verifier = PublicVerifier::from_raw(exported.kind, &exported.raw)?;
        if !self.store.supports(alias, verifier.scheme()) {
            return Err(KeyError::UnsupportedAlgorithm(verifier.scheme().to_string()).into());
        }
        Ok(verifier.verify(data, signature))
    }

    /// Verify `signature` over `data` with a caller-supplied public key.
    pub fn verify_with_key(
        &self,
        data: &[u8],
        signature: &[u8],
        key: &KeyMaterial,
    ) -> Result<bool, SignatureError> {
        Ok(verify::verify_with_key(data, signature, key)?)
    }

    fn require_key(&self, alias: &str) -> Result<ExportedKey, SignatureError> {
        self.store
            .export_public(alias)?
            .ok_or_else(|| ProviderError::KeyNotFound(alias.to_string()).into())
    }
}
