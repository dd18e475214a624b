//! # Tourmaline
//!
//! Trust-boundary layer for a multi-tenant record/asset backend.
//!
//! Tourmaline answers three questions the API layer asks on every
//! request, each as a pure decision over caller-supplied inputs:
//!
//! - **May this actor read or write this record?** -- record ACLs
//!   evaluated as a monotonic union of role and direct grants.
//! - **May the holder of this URL fetch this asset?** -- HMAC-signed,
//!   expiring capability URLs under a tenant secret.
//! - **Is this password acceptable here?** -- a tenant-configured chain of
//!   strength checks with typed, diagnostic-carrying violations.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                         Tourmaline                          │
//! │  ┌─────────┐   ┌───────────┐   ┌──────────┐   ┌──────────┐ │
//! │  │  Types  │ → │    ACL    │   │  Asset   │   │  Audit   │ │
//! │  │ (model) │   │ (records) │   │ (URLs)   │   │ (passwd) │ │
//! │  └─────────┘   └───────────┘   └──────────┘   └──────────┘ │
//! │                      ▲              ▲              ▲        │
//! │                      └──────── Config ─────────────┘        │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Denial is a value, never a fault: an unauthorized record access is
//! `false`, a bad signature is a typed error displaying uniformly as
//! "invalid signature", a weak password is an enumerable violation. None
//! of the decisions read clocks or globals -- the current instant and all
//! tenant state are parameters.
//!
//! # Quick Start
//!
//! ```
//! use chrono::Utc;
//! use tourmaline::{
//!     AccessLevel, Accessible, AclEntry, AssetSigner, Identity, PasswordPolicy, RecordAcl,
//!     SigningSecret,
//! };
//!
//! // Record access
//! let acl: RecordAcl = vec![AclEntry::role("editor", AccessLevel::Write)].into();
//! let actor = Identity::new("user-17").with_role("editor");
//! assert!(acl.accessible(&actor, AccessLevel::Write));
//!
//! // Signed asset URLs
//! let signer = AssetSigner::new(
//!     "https://assets.example.com",
//!     "https://api.example.com",
//!     SigningSecret::from("tenant-secret"),
//!     false,
//! );
//! let url = signer.signed_url("avatar.png", Utc::now());
//! assert!(url.contains("signature="));
//!
//! // Password policy
//! let policy = PasswordPolicy::new().with_min_length(8);
//! assert!(policy.validate("correct horse battery", None).is_ok());
//! ```

// Re-export the data model
pub use tourmaline_types::{
    AccessLevel, AclEntry, Data, Identity, Record, RecordAcl, RecordId, TRANSIENT_FIELD_PREFIX,
    TRANSIENT_KEY,
};

// Re-export ACL evaluation
pub use tourmaline_acl::{Accessible, EmptyAclPolicy, accessible, accessible_with_default};

// Re-export asset signing and the byte store
pub use tourmaline_asset::{
    AssetSigner, AssetStoreError, FileStore, PostFileRequest, SIGNED_URL_TTL_SECS, SignatureError,
    SigningSecret,
};

// Re-export the password policy engine
pub use tourmaline_audit::{
    EntropyEstimator, GUESSABILITY_MAX, GuessabilityEstimator, PasswordPolicy, PolicyViolation,
};

// Re-export configuration
pub use tourmaline_config::{AclConfig, AssetConfig, ConfigLoader, TourmalineConfig};
