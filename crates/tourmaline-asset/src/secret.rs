//! Tenant signing secret.

use std::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop};

/// Opaque symmetric secret used to sign and verify asset URLs.
///
/// The secret is an arbitrary byte string supplied by tenant
/// configuration. It is zeroized on drop and its `Debug` output is
/// redacted -- the raw bytes never appear in logs, errors, or URLs.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct SigningSecret(Vec<u8>);

impl SigningSecret {
    /// Wraps raw secret bytes.
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    /// Returns the secret bytes for HMAC keying.
    pub(crate) fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for SigningSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SigningSecret(<redacted>)")
    }
}

impl From<&str> for SigningSecret {
    fn from(secret: &str) -> Self {
        Self::new(secret.as_bytes().to_vec())
    }
}

impl From<String> for SigningSecret {
    fn from(secret: String) -> Self {
        Self::new(secret.into_bytes())
    }
}
