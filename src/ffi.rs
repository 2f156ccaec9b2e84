//! FFI wrapper functions for UniFFI export.
//!
//! Provides hex-string boundaries for raw key bytes, signatures and data, and
//! concrete EC/RSA record types instead of the `KeyMaterial` sum type.
//!
//! These are the only versions visible to Swift/Kotlin via UniFFI bindings.
//! The original functions remain available for direct Rust consumers.

use crate::algorithms::resolve;
use crate::codec::{decode_ec, decode_rsa, encode_ec, encode_rsa};
use crate::errors::SignatureError;
use crate::keys::{EcPublicKey, KeyMaterial, RsaPublicKey};
use crate::verify::verify_with_key;

/// Decode a hex SEC1 uncompressed point into decimal coordinates.
#[uniffi::export]
pub fn decode_ec_public_key_hex(raw_hex: &str) -> Result<EcPublicKey, SignatureError> {
    let raw = hex::decode(raw_hex)?;
    Ok(decode_ec(&raw)?)
}

/// Decode a hex PKCS#1 RSAPublicKey sequence into decimal components.
#[uniffi::export]
pub fn decode_rsa_public_key_hex(raw_hex: &str) -> Result<RsaPublicKey, SignatureError> {
    let raw = hex::decode(raw_hex)?;
    Ok(decode_rsa(&raw)?)
}

/// Encode decimal EC coordinates as a hex SEC1 uncompressed point.
#[uniffi::export]
pub fn encode_ec_public_key_hex(key: EcPublicKey) -> Result<String, SignatureError> {
    Ok(hex::encode(encode_ec(&key)?))
}

/// Encode decimal RSA components as a hex PKCS#1 sequence.
#[uniffi::export]
pub fn encode_rsa_public_key_hex(key: RsaPublicKey) -> Result<String, SignatureError> {
    Ok(hex::encode(encode_rsa(&key)?))
}

/// Canonical scheme identifier for an algorithm tag (`"EC"` or `"RSA"`).
#[uniffi::export]
pub fn resolve_signature_algorithm(tag: &str) -> Result<String, SignatureError> {
    Ok(resolve(tag)?.identifier().to_string())
}

/// Verify a hex signature over hex data with caller-supplied EC coordinates.
#[uniffi::export]
pub fn verify_with_ec_key_hex(
    data_hex: &str,
    signature_hex: &str,
    key: EcPublicKey,
) -> Result<bool, SignatureError> {
    verify_hex(data_hex, signature_hex, KeyMaterial::Ec(key))
}

/// Verify a hex signature over hex data with caller-supplied RSA components.
#[uniffi::export]
pub fn verify_with_rsa_key_hex(
    data_hex: &str,
    signature_hex: &str,
    key: RsaPublicKey,
) -> Result<bool, SignatureError> {
    verify_hex(data_hex, signature_hex, KeyMaterial::Rsa(key))
}

fn verify_hex(data_hex: &str, signature_hex: &str, key: KeyMaterial) -> Result<bool, SignatureError> {
    let data = hex::decode(data_hex)?;
    let signature = hex::decode(signature_hex)?;
    Ok(verify_with_key(&data, &signature, &key)?)
}
