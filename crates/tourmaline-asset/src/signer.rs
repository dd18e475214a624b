//! Signed asset URL issuance and verification.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE;
use chrono::{DateTime, TimeDelta, Utc};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use crate::error::SignatureError;
use crate::secret::SigningSecret;

type HmacSha256 = Hmac<Sha256>;

/// Lifetime of a signed URL, in seconds.
pub const SIGNED_URL_TTL_SECS: i64 = 15 * 60;

/// Issues and verifies asset URLs for one tenant.
///
/// All state is supplied at construction -- the signer reads no globals and
/// takes the current instant as a parameter, so issuance and verification
/// are pure functions of their inputs.
#[derive(Debug, Clone)]
pub struct AssetSigner {
    /// Base URL assets are fetched from, without a trailing slash.
    url_prefix: String,
    /// Base URL uploads are posted to, without a trailing slash.
    post_prefix: String,
    /// Tenant signing secret.
    secret: SigningSecret,
    /// Whether the store is public (no signatures at all).
    public: bool,
}

/// Upload-target descriptor for a direct-upload flow.
///
/// Issuance is unconditional: the caller must have authorized the upload
/// before asking for the descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostFileRequest {
    /// Target the client posts the file to.
    pub action: String,
}

impl AssetSigner {
    /// Creates a signer for one tenant's asset store.
    pub fn new(
        url_prefix: impl Into<String>,
        post_prefix: impl Into<String>,
        secret: SigningSecret,
        public: bool,
    ) -> Self {
        Self {
            url_prefix: url_prefix.into(),
            post_prefix: post_prefix.into(),
            secret,
            public,
        }
    }

    /// Returns whether download URLs must carry a signature.
    pub fn signature_required(&self) -> bool {
        !self.public
    }

    /// Returns the bare, unsigned URL for `name`.
    ///
    /// Only meaningful for public stores: any holder of the name can read
    /// the asset indefinitely.
    pub fn public_url(&self, name: &str) -> String {
        format!("{}/{}", self.url_prefix, name)
    }

    /// Issues a download URL for `name`, valid for [`SIGNED_URL_TTL_SECS`]
    /// from `now`.
    ///
    /// Public stores get the bare URL. Otherwise the URL carries an
    /// `expiredAt` Unix-seconds timestamp and a URL-safe base64
    /// `signature` over `name || expiredAt` under the tenant secret.
    pub fn signed_url(&self, name: &str, now: DateTime<Utc>) -> String {
        if !self.signature_required() {
            return self.public_url(name);
        }

        let expired_at = (now + TimeDelta::seconds(SIGNED_URL_TTL_SECS)).timestamp();
        let expired_at = expired_at.to_string();
        let signature = URL_SAFE.encode(self.compute_signature(name, &expired_at));

        format!(
            "{}/{}?expiredAt={}&signature={}",
            self.url_prefix, name, expired_at, signature
        )
    }

    /// Verifies an inbound signed request for `name`.
    ///
    /// The request is valid iff the signature decodes, the recomputed HMAC
    /// matches it, and `now` is strictly before the signed expiry. The
    /// HMAC comparison is constant-time.
    ///
    /// # Errors
    ///
    /// All variants display uniformly as "invalid signature"; see
    /// [`SignatureError`].
    pub fn verify(
        &self,
        name: &str,
        expired_at: &str,
        signature: &str,
        now: DateTime<Utc>,
    ) -> Result<(), SignatureError> {
        let supplied = URL_SAFE.decode(signature).map_err(|err| {
            tracing::warn!(%err, asset = name, "failed to decode asset url signature");
            SignatureError::InvalidEncoding
        })?;

        let expiry_secs: i64 = expired_at
            .parse()
            .map_err(|_| SignatureError::InvalidExpiry)?;
        let expiry =
            DateTime::from_timestamp(expiry_secs, 0).ok_or(SignatureError::InvalidExpiry)?;

        let expected = self.compute_signature(name, expired_at);
        if expected.as_slice().ct_eq(&supplied).unwrap_u8() == 0 {
            return Err(SignatureError::Mismatch);
        }

        if now >= expiry {
            return Err(SignatureError::Expired);
        }

        Ok(())
    }

    /// Builds the upload-target descriptor for `name`.
    pub fn post_file_request(&self, name: &str) -> PostFileRequest {
        PostFileRequest {
            action: [self.post_prefix.as_str(), "files", name].join("/"),
        }
    }

    /// Computes `HMAC-SHA256(secret, name || expired_at)`.
    fn compute_signature(&self, name: &str, expired_at: &str) -> Vec<u8> {
        let mut mac = HmacSha256::new_from_slice(self.secret.as_bytes())
            .expect("HMAC accepts keys of any length");
        mac.update(name.as_bytes());
        mac.update(expired_at.as_bytes());
        mac.finalize().into_bytes().to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn signer() -> AssetSigner {
        AssetSigner::new(
            "https://assets.example.com",
            "https://api.example.com",
            SigningSecret::from("tenant-secret"),
            false,
        )
    }

    fn issue_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    /// Pulls `expiredAt` and `signature` out of an issued URL.
    fn parse_query(url: &str) -> (String, String) {
        let query = url.split_once('?').expect("signed url has a query").1;
        let mut expired_at = None;
        let mut signature = None;
        for pair in query.split('&') {
            let (key, value) = pair.split_once('=').expect("key=value");
            match key {
                "expiredAt" => expired_at = Some(value.to_string()),
                "signature" => signature = Some(value.to_string()),
                other => panic!("unexpected query parameter: {other}"),
            }
        }
        (expired_at.unwrap(), signature.unwrap())
    }

    #[test]
    fn signed_url_shape() {
        let url = signer().signed_url("avatar.png", issue_time());
        assert!(url.starts_with("https://assets.example.com/avatar.png?expiredAt="));

        let (expired_at, _) = parse_query(&url);
        let expected_expiry = issue_time().timestamp() + SIGNED_URL_TTL_SECS;
        assert_eq!(expired_at, expected_expiry.to_string());
    }

    #[test]
    fn round_trip_verifies_before_expiry() {
        let signer = signer();
        let url = signer.signed_url("avatar.png", issue_time());
        let (expired_at, signature) = parse_query(&url);

        // One second before expiry: still valid.
        let just_before = issue_time() + TimeDelta::seconds(SIGNED_URL_TTL_SECS - 1);
        assert_eq!(
            signer.verify("avatar.png", &expired_at, &signature, just_before),
            Ok(())
        );
    }

    #[test]
    fn rejected_at_and_after_expiry() {
        let signer = signer();
        let url = signer.signed_url("avatar.png", issue_time());
        let (expired_at, signature) = parse_query(&url);

        // Expiry is exclusive: exactly at the instant is already invalid.
        let at_expiry = issue_time() + TimeDelta::seconds(SIGNED_URL_TTL_SECS);
        assert_eq!(
            signer.verify("avatar.png", &expired_at, &signature, at_expiry),
            Err(SignatureError::Expired)
        );

        let after = at_expiry + TimeDelta::hours(1);
        assert_eq!(
            signer.verify("avatar.png", &expired_at, &signature, after),
            Err(SignatureError::Expired)
        );
    }

    #[test]
    fn rejected_for_different_name() {
        let signer = signer();
        let url = signer.signed_url("avatar.png", issue_time());
        let (expired_at, signature) = parse_query(&url);

        assert_eq!(
            signer.verify("other.png", &expired_at, &signature, issue_time()),
            Err(SignatureError::Mismatch)
        );
    }

    #[test]
    fn rejected_under_different_secret() {
        let url = signer().signed_url("avatar.png", issue_time());
        let (expired_at, signature) = parse_query(&url);

        let other = AssetSigner::new(
            "https://assets.example.com",
            "https://api.example.com",
            SigningSecret::from("rotated-secret"),
            false,
        );
        assert_eq!(
            other.verify("avatar.png", &expired_at, &signature, issue_time()),
            Err(SignatureError::Mismatch)
        );
    }

    #[test]
    fn rejected_for_tampered_expiry() {
        let signer = signer();
        let url = signer.signed_url("avatar.png", issue_time());
        let (expired_at, signature) = parse_query(&url);

        // Pushing the expiry out invalidates the signature.
        let pushed_out: i64 = expired_at.parse::<i64>().unwrap() + 3600;
        assert_eq!(
            signer.verify(
                "avatar.png",
                &pushed_out.to_string(),
                &signature,
                issue_time()
            ),
            Err(SignatureError::Mismatch)
        );
    }

    #[test]
    fn every_bit_flip_is_rejected() {
        let signer = signer();
        let url = signer.signed_url("avatar.png", issue_time());
        let (expired_at, signature) = parse_query(&url);

        let decoded = URL_SAFE.decode(&signature).unwrap();
        for byte in 0..decoded.len() {
            for bit in 0..8 {
                let mut tampered = decoded.clone();
                tampered[byte] ^= 1 << bit;
                let tampered = URL_SAFE.encode(&tampered);
                assert_eq!(
                    signer.verify("avatar.png", &expired_at, &tampered, issue_time()),
                    Err(SignatureError::Mismatch),
                    "flipping bit {bit} of byte {byte} must not verify"
                );
            }
        }
    }

    #[test]
    fn malformed_signature_encoding() {
        assert_eq!(
            signer().verify("avatar.png", "1748779200", "not base64!!", issue_time()),
            Err(SignatureError::InvalidEncoding)
        );
    }

    #[test]
    fn malformed_expiry() {
        let signer = signer();
        let url = signer.signed_url("avatar.png", issue_time());
        let (_, signature) = parse_query(&url);

        assert_eq!(
            signer.verify("avatar.png", "soon", &signature, issue_time()),
            Err(SignatureError::InvalidExpiry)
        );
    }

    #[test]
    fn all_failures_display_identically() {
        for err in [
            SignatureError::InvalidEncoding,
            SignatureError::InvalidExpiry,
            SignatureError::Mismatch,
            SignatureError::Expired,
        ] {
            assert_eq!(err.to_string(), "invalid signature");
        }
    }

    #[test]
    fn public_store_issues_bare_urls() {
        let public = AssetSigner::new(
            "https://assets.example.com",
            "https://api.example.com",
            SigningSecret::from("unused"),
            true,
        );

        assert!(!public.signature_required());
        assert_eq!(
            public.signed_url("avatar.png", issue_time()),
            "https://assets.example.com/avatar.png"
        );
    }

    #[test]
    fn post_file_request_target() {
        let request = signer().post_file_request("uploads/avatar.png");
        assert_eq!(
            request.action,
            "https://api.example.com/files/uploads/avatar.png"
        );
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Issue-then-verify succeeds for any name and secret at any
            /// instant strictly before expiry.
            #[test]
            fn round_trip_always_verifies(
                name in "[a-zA-Z0-9._/-]{1,40}",
                secret in prop::collection::vec(any::<u8>(), 1..64),
                skew in 0i64..SIGNED_URL_TTL_SECS,
            ) {
                let signer = AssetSigner::new(
                    "https://assets.example.com",
                    "https://api.example.com",
                    SigningSecret::new(secret),
                    false,
                );
                let issued = issue_time();
                let url = signer.signed_url(&name, issued);
                let (expired_at, signature) = parse_query(&url);

                let now = issued + TimeDelta::seconds(skew);
                prop_assert_eq!(
                    signer.verify(&name, &expired_at, &signature, now),
                    Ok(())
                );
            }
        }
    }
}
