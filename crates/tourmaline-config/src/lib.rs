//! Configuration management for Tourmaline
//!
//! Provides hierarchical configuration loading from multiple sources:
//! 1. Environment variables (TML_* prefix, highest precedence)
//! 2. tourmaline.local.toml (gitignored, local overrides)
//! 3. tourmaline.toml (git-tracked, project config)
//! 4. Built-in defaults (lowest precedence)
//!
//! The loaded configuration carries everything the trust boundary needs
//! per tenant: the asset store and its signing secret, the password
//! policy, and the empty-ACL default. Secrets and policy are passed
//! explicitly into the subsystems from here -- nothing reads process-wide
//! state.

use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tourmaline_acl::EmptyAclPolicy;
use tourmaline_asset::{AssetSigner, FileStore, SigningSecret};
use tourmaline_audit::PasswordPolicy;

mod error;
mod loader;

pub use error::ConfigError;
pub use loader::ConfigLoader;

/// Main Tourmaline configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TourmalineConfig {
    pub asset: AssetConfig,
    pub password: PasswordPolicy,
    pub acl: AclConfig,
}

/// Asset store and signed-URL configuration.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetConfig {
    /// Directory the file store roots its blobs under.
    pub storage_dir: PathBuf,
    /// Base URL assets are fetched from.
    pub url_prefix: String,
    /// Base URL uploads are posted to.
    pub post_prefix: String,
    /// Tenant signing secret for asset URLs.
    pub secret: String,
    /// Public stores issue bare, unsigned URLs.
    pub public: bool,
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            storage_dir: PathBuf::from(".tourmaline/assets"),
            url_prefix: "http://127.0.0.1:3000/assets".to_string(),
            post_prefix: "http://127.0.0.1:3000".to_string(),
            secret: String::new(),
            public: false,
        }
    }
}

// Manual Debug: the signing secret must never reach logs via the config.
impl fmt::Debug for AssetConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AssetConfig")
            .field("storage_dir", &self.storage_dir)
            .field("url_prefix", &self.url_prefix)
            .field("post_prefix", &self.post_prefix)
            .field("secret", &"<redacted>")
            .field("public", &self.public)
            .finish()
    }
}

impl AssetConfig {
    /// Builds the URL signer for this tenant.
    pub fn signer(&self) -> AssetSigner {
        AssetSigner::new(
            self.url_prefix.clone(),
            self.post_prefix.clone(),
            SigningSecret::from(self.secret.clone()),
            self.public,
        )
    }

    /// Builds the file-backed byte store.
    pub fn file_store(&self) -> FileStore {
        FileStore::new(self.storage_dir.clone())
    }
}

/// ACL evaluation configuration.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AclConfig {
    /// Policy applied to records whose ACL carries no grants.
    pub empty_acl: EmptyAclPolicy,
}

impl TourmalineConfig {
    /// Load configuration from default locations
    pub fn load() -> Result<Self> {
        ConfigLoader::new().load()
    }

    /// Load configuration from specific project directory
    pub fn load_from_dir(project_dir: impl AsRef<Path>) -> Result<Self> {
        ConfigLoader::new().with_project_dir(project_dir).load()
    }

    /// Checks cross-field constraints that serde cannot express.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Validation`] when a non-public asset store has no
    /// signing secret -- issuing unsigned URLs from a private store would
    /// silently disable the signature check.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.asset.public && self.asset.secret.is_empty() {
            return Err(ConfigError::Validation(
                "asset.secret must be set when asset.public is false".to_string(),
            ));
        }
        Ok(())
    }

    /// Resolve relative paths to absolute
    pub fn resolve_paths(&mut self, base_dir: impl AsRef<Path>) {
        let base = base_dir.as_ref();
        if self.asset.storage_dir.is_relative() {
            self.asset.storage_dir = base.join(&self.asset.storage_dir);
        }
    }
}
