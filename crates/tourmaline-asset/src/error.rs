//! Asset error types.

/// Signed-URL verification failures.
///
/// Every variant displays as the uniform message `invalid signature`: the
/// caller-facing surface must not act as an oracle distinguishing a forged
/// signature from an expired or malformed one. The variants exist for
/// internal diagnostics only.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SignatureError {
    /// The supplied signature was not valid URL-safe base64.
    #[error("invalid signature")]
    InvalidEncoding,

    /// The expiry parameter was not a decimal Unix-seconds timestamp.
    #[error("invalid signature")]
    InvalidExpiry,

    /// The recomputed HMAC did not match the supplied signature.
    #[error("invalid signature")]
    Mismatch,

    /// The request arrived at or after the signed expiry instant.
    #[error("invalid signature")]
    Expired,
}

/// Errors from the asset byte store.
#[derive(Debug, thiserror::Error)]
pub enum AssetStoreError {
    /// No asset exists under the given name.
    #[error("asset not found: {name}")]
    NotFound { name: String },

    /// The asset name is empty, absolute, or escapes the store root.
    #[error("invalid asset name: {name}")]
    InvalidName { name: String },

    /// The number of bytes transferred did not equal the declared length.
    /// The partial artifact has been discarded.
    #[error("wrote {actual} bytes, expected {expected}")]
    LengthMismatch { expected: u64, actual: u64 },

    /// Underlying OS I/O error.
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}
