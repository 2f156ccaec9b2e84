//! Reconstruction of verifiable public keys and software signature verification.
//!
//! Keys supplied by callers are untrusted. EC points are checked against the
//! P-256 curve equation before use; the codec alone only checks shape.
//!
//! Schemes:
//! - ECDSA P-256 / SHA-256, signature as X9.62 DER `SEQUENCE { r, s }`
//! - RSASSA-PKCS1-v1_5 / SHA-256

use p256::ecdsa::signature::Verifier;
use p256::ecdsa::{Signature as EcdsaSignature, VerifyingKey as EcdsaVerifyingKey};
use rsa::{BigUint, Pkcs1v15Sign};
use sha2::{Digest, Sha256};

use crate::algorithms::{KeyKind, SignatureScheme};
use crate::codec;
use crate::errors::KeyError;
use crate::keys::{EcPublicKey, KeyMaterial};

/// A public key ready for signature verification.
#[derive(Debug, Clone)]
pub enum PublicVerifier {
    Ec(EcdsaVerifyingKey),
    Rsa(rsa::RsaPublicKey),
}

impl PublicVerifier {
    /// Build from raw platform bytes (SEC1 point or PKCS#1 sequence).
    pub fn from_raw(kind: KeyKind, raw: &[u8]) -> Result<Self, KeyError> {
        match kind {
            KeyKind::Ec => {
                codec::decode_ec(raw)?;
                let key = EcdsaVerifyingKey::from_sec1_bytes(raw).map_err(|_| {
                    KeyError::InvalidCoordinates("point is not on the P-256 curve".into())
                })?;
                Ok(PublicVerifier::Ec(key))
            }
            KeyKind::Rsa => {
                let (n, e) = codec::decode_rsa(raw)?.components()?;
                let n = BigUint::from_bytes_be(&n);
                let e = BigUint::from_bytes_be(&e);
                let key = rsa::RsaPublicKey::new(n, e).map_err(|err| {
                    KeyError::UnsupportedAlgorithm(format!("RSA key rejected by provider: {err}"))
                })?;
                Ok(PublicVerifier::Rsa(key))
            }
        }
    }

    /// Re-encode caller-supplied key material and build a verifier from it.
    pub fn from_key_material(key: &KeyMaterial) -> Result<Self, KeyError> {
        let raw = codec::encode(key)?;
        Self::from_raw(key.kind(), &raw)
    }

    pub fn scheme(&self) -> SignatureScheme {
        match self {
            PublicVerifier::Ec(_) => SignatureScheme::EcdsaSha256,
            PublicVerifier::Rsa(_) => SignatureScheme::RsaPkcs1v15Sha256,
        }
    }

    /// Verify `signature` over `data`. Unparseable signatures are simply invalid.
    pub fn verify(&self, data: &[u8], signature: &[u8]) -> bool {
        match self {
            PublicVerifier::Ec(key) => match EcdsaSignature::from_der(signature) {
                Ok(sig) => key.verify(data, &sig).is_ok(),
                Err(_) => false,
            },
            PublicVerifier::Rsa(key) => {
                let digest = Sha256::digest(data);
                key.verify(Pkcs1v15Sign::new::<Sha256>(), &digest, signature)
                    .is_ok()
            }
        }
    }
}

/// Check that the coordinates name a valid, non-identity P-256 point.
pub fn validate_point(key: &EcPublicKey) -> Result<(), KeyError> {
    let raw = codec::encode_ec(key)?;
    PublicVerifier::from_raw(KeyKind::Ec, &raw).map(|_| ())
}

/// Verify a signature against a caller-supplied public key.
pub fn verify_with_key(data: &[u8], signature: &[u8], key: &KeyMaterial) -> Result<bool, KeyError> {
    let verifier = PublicVerifier::from_key_material(key)?;
    Ok(verifier.verify(data, signature))
}
