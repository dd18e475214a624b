//! # tourmaline-asset: Signed Asset URLs and the Asset Byte Store
//!
//! Produces and checks tamper-evident, time-bounded capability URLs for
//! anonymous asset reads, builds upload-target descriptors for
//! authenticated upload flows, and provides the file-backed byte store the
//! serving layer streams from.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────┐
//! │        API layer         │
//! │ (authorization decided)  │
//! └──────┬──────────┬────────┘
//!        │          │
//!        ▼          ▼
//! ┌───────────┐  ┌───────────┐
//! │AssetSigner│  │ FileStore │
//! │ sign /    │  │ open /    │
//! │ verify    │  │ put       │
//! └───────────┘  └───────────┘
//! ```
//!
//! ## Wire format
//!
//! A signed URL carries two query parameters:
//!
//! - `expiredAt` -- expiry as a decimal Unix-seconds string
//! - `signature` -- URL-safe base64 of `HMAC-SHA256(secret, name || expiredAt)`
//!
//! Verification recomputes the HMAC under the tenant secret, compares in
//! constant time, and requires the current instant to be strictly before
//! the expiry. All verification failures read identically to callers
//! ("invalid signature") so the wire response never distinguishes a forged
//! signature from an expired one.
//!
//! ## Examples
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use tourmaline_asset::{AssetSigner, SigningSecret};
//!
//! let signer = AssetSigner::new(
//!     "https://assets.example.com",
//!     "https://api.example.com",
//!     SigningSecret::from("tenant-secret"),
//!     false,
//! );
//!
//! let now = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
//! let url = signer.signed_url("avatar.png", now);
//! assert!(url.starts_with("https://assets.example.com/avatar.png?expiredAt="));
//! ```

mod error;
mod secret;
mod signer;
mod store;

pub use error::{AssetStoreError, SignatureError};
pub use secret::SigningSecret;
pub use signer::{AssetSigner, PostFileRequest, SIGNED_URL_TTL_SECS};
pub use store::FileStore;
