//! # sigkey-core
//!
//! Shared public-key core for the hardware-backed signature bridge.
//!
//! The platform halves (Android Keystore, iOS Secure Enclave) generate keys
//! and sign behind a biometric prompt. Everything they have in common lives
//! here and reaches them through UniFFI-generated Swift/Kotlin bindings:
//! - **Codec**: SEC1 uncompressed points and PKCS#1 DER sequences <->
//!   decimal-string key material
//! - **Algorithm resolution**: key tag -> digest + signature scheme
//! - **Verification**: untrusted key material -> validated verifying key
//!
//! ## Security Design
//!
//! - Decode and encode never fall back to a zero or truncated key
//! - Caller-supplied EC points are checked against P-256 before use
//! - Codec errors stay distinguishable from keystore/authentication errors

pub mod algorithms;
pub mod codec;
pub mod der;
pub mod errors;
pub mod keys;
pub mod keystore;
pub mod memory;
pub mod service;
pub mod verify;

#[cfg(feature = "uniffi-bindgen")]
pub mod ffi;

#[cfg(feature = "uniffi-bindgen")]
uniffi::setup_scaffolding!();

// Re-export core types
pub use algorithms::{resolve, KeyKind, SignatureScheme};
pub use codec::{decode, encode};
pub use errors::{KeyError, ProviderError, SignatureError};
pub use keys::{EcPublicKey, KeyMaterial, RsaPublicKey};
pub use keystore::{ExportedKey, KeySpec, KeyStore, SignaturePrompt};
pub use memory::MemoryKeyStore;
pub use service::SignatureService;
pub use verify::{validate_point, verify_with_key, PublicVerifier};
