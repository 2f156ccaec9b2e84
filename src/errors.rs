//! Error types for sigkey-core.
//!
//! `KeyError` covers the pure codec and resolver. `ProviderError` belongs to
//! the external keystore/biometric boundary and is only ever passed through.
//! `SignatureError` is what the service and FFI layers return.

use thiserror::Error;

/// Failures of the pure public-key codec and algorithm resolver.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KeyError {
    #[error("Malformed key: {0}")]
    MalformedKey(String),

    #[error("Invalid key coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("Unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),
}

/// Failures raised by the keystore or authentication collaborator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    #[error("Key not found: {0}")]
    KeyNotFound(String),

    #[error("Key store error: {0}")]
    KeyStore(String),

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Authentication canceled by the user")]
    AuthenticationCanceled,

    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),
}

#[derive(Error, Debug)]
#[cfg_attr(feature = "uniffi-bindgen", derive(uniffi::Error))]
#[cfg_attr(feature = "uniffi-bindgen", uniffi(flat_error))]
pub enum SignatureError {
    #[error(transparent)]
    Key(#[from] KeyError),

    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error("Invalid hex encoding: {0}")]
    Hex(#[from] hex::FromHexError),
}

impl SignatureError {
    /// True when the failure came from the codec or resolver rather than the keystore.
    pub fn is_codec_error(&self) -> bool {
        matches!(self, SignatureError::Key(_))
    }

    /// Error code reported to the JavaScript layer by the native bridges.
    pub fn code(&self) -> &'static str {
        match self {
            SignatureError::Key(KeyError::MalformedKey(_)) => "KEY_EXPORT_ERROR",
            SignatureError::Key(KeyError::InvalidCoordinates(_)) => "INVALID_KEY",
            SignatureError::Key(KeyError::UnsupportedAlgorithm(_)) => "NO_SUCH_ALGORITHM",
            SignatureError::Provider(ProviderError::KeyNotFound(_))
            | SignatureError::Provider(ProviderError::KeyStore(_)) => "KEY_STORE_ERROR",
            SignatureError::Provider(ProviderError::AuthenticationFailed(_)) => "SIGNATURE_ERROR",
            SignatureError::Provider(ProviderError::AuthenticationCanceled) => {
                "AUTHENTICATION_CANCELED"
            }
            SignatureError::Provider(ProviderError::InvalidParameters(_))
            | SignatureError::Hex(_) => "INVALID_PARAMETERS",
        }
    }
}
