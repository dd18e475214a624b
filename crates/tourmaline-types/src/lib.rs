//! # tourmaline-types: Core types for `Tourmaline`
//!
//! This crate contains shared types used across the `Tourmaline` trust
//! boundary:
//! - Access levels ([`AccessLevel`])
//! - ACL grants ([`AclEntry`], [`RecordAcl`])
//! - Actors ([`Identity`])
//! - Records ([`RecordId`], [`Record`], [`Data`])
//!
//! Everything here is plain data: no I/O, no clocks, no global state. The
//! evaluation logic that consumes these types lives in `tourmaline-acl`.

use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Field map for record data.
///
/// Records carry dynamic, schema-less fields, so the JSON object model is
/// the value currency (mirroring what crosses the API boundary).
pub type Data = serde_json::Map<String, Value>;

// ============================================================================
// Access Level
// ============================================================================

/// Capability level required to act on a record.
///
/// Levels are totally ordered: `Read < Write`. A `Write` grant satisfies
/// any requirement a `Read` grant satisfies -- there are no other levels.
///
/// # Examples
///
/// ```
/// use tourmaline_types::AccessLevel;
///
/// assert!(AccessLevel::Read < AccessLevel::Write);
/// assert!(AccessLevel::Write >= AccessLevel::Read);
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum AccessLevel {
    /// Permission to read the record.
    #[default]
    Read,
    /// Permission to modify the record. Implies [`AccessLevel::Read`].
    Write,
}

impl AccessLevel {
    /// Returns whether a grant at this level satisfies a requirement at
    /// `required`.
    pub fn satisfies(self, required: AccessLevel) -> bool {
        self >= required
    }
}

impl Display for AccessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccessLevel::Read => write!(f, "read"),
            AccessLevel::Write => write!(f, "write"),
        }
    }
}

// ============================================================================
// ACL Entries
// ============================================================================

/// A single grant in a record's ACL.
///
/// Entries are a closed sum: a grant is scoped either to a named role or to
/// one specific user. Entries only ever *grant* -- there is no deny variant,
/// and absence of a matching entry simply contributes nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "scope", rename_all = "snake_case")]
pub enum AclEntry {
    /// Grants `level` to every actor holding `role`.
    Role {
        /// Role name the grant is scoped to.
        role: String,
        /// Granted capability level.
        level: AccessLevel,
    },
    /// Grants `level` to the single actor whose id equals `user_id`.
    Direct {
        /// Identity the grant is scoped to.
        user_id: String,
        /// Granted capability level.
        level: AccessLevel,
    },
}

impl AclEntry {
    /// Creates a role-scoped grant.
    pub fn role(role: impl Into<String>, level: AccessLevel) -> Self {
        AclEntry::Role {
            role: role.into(),
            level,
        }
    }

    /// Creates a direct (single-identity) grant.
    pub fn direct(user_id: impl Into<String>, level: AccessLevel) -> Self {
        AclEntry::Direct {
            user_id: user_id.into(),
            level,
        }
    }

    /// Returns the capability level this entry grants.
    pub fn level(&self) -> AccessLevel {
        match self {
            AclEntry::Role { level, .. } | AclEntry::Direct { level, .. } => *level,
        }
    }
}

/// A record's authorization policy: an unordered union of grants.
///
/// Evaluation order is irrelevant -- any one matching, sufficiently-leveled
/// entry grants access, and no entry can revoke a grant made by another.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordAcl(Vec<AclEntry>);

impl RecordAcl {
    /// Creates an empty ACL.
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Returns the grants in this ACL.
    pub fn entries(&self) -> &[AclEntry] {
        &self.0
    }

    /// Adds a grant.
    pub fn push(&mut self, entry: AclEntry) {
        self.0.push(entry);
    }

    /// Returns whether the ACL carries no grants at all.
    ///
    /// The policy applied to an empty ACL is a deployment decision; see
    /// `EmptyAclPolicy` in `tourmaline-acl`.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the number of grants.
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl From<Vec<AclEntry>> for RecordAcl {
    fn from(entries: Vec<AclEntry>) -> Self {
        Self(entries)
    }
}

impl FromIterator<AclEntry> for RecordAcl {
    fn from_iter<I: IntoIterator<Item = AclEntry>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a RecordAcl {
    type Item = &'a AclEntry;
    type IntoIter = std::slice::Iter<'a, AclEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

// ============================================================================
// Identity
// ============================================================================

/// The actor on whose behalf an operation runs.
///
/// Owned by the caller and read-only to evaluation: the trust boundary never
/// mutates an identity, it only matches grants against it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Stable user id.
    pub id: String,
    /// Roles held by the user. Order is irrelevant; treated as a set.
    #[serde(default)]
    pub roles: Vec<String>,
}

impl Identity {
    /// Creates an identity with no roles.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            roles: Vec::new(),
        }
    }

    /// Adds a role.
    #[must_use]
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.roles.push(role.into());
        self
    }

    /// Returns whether the actor holds `role`.
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }
}

// ============================================================================
// Records
// ============================================================================

/// Identifies a record by type and key, e.g. `note/0`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct RecordId {
    /// Record type (collection name).
    pub record_type: String,
    /// Key unique within the record type.
    pub key: String,
}

impl RecordId {
    /// Creates a record id.
    pub fn new(record_type: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            record_type: record_type.into(),
            key: key.into(),
        }
    }
}

impl Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.record_type, self.key)
    }
}

/// Reserved key selecting the whole transient map.
pub const TRANSIENT_KEY: &str = "_transient";

/// Reserved key prefix selecting a single transient field.
pub const TRANSIENT_FIELD_PREFIX: &str = "_transient_";

/// A record as consumed by the trust boundary.
///
/// `data` is the persisted field set. `transient` is a parallel field set
/// populated per-request and never persisted -- it is skipped on
/// serialization and addressed through the reserved `_transient` key
/// namespace in [`Record::get`] / [`Record::set`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Record {
    /// Record identifier.
    pub id: RecordId,
    /// Persisted fields.
    #[serde(default)]
    pub data: Data,
    /// Per-request fields, never persisted.
    #[serde(skip)]
    pub transient: Data,
    /// Authorization policy attached to the record.
    #[serde(default)]
    pub acl: RecordAcl,
}

impl Record {
    /// Creates an empty record with the given id.
    pub fn new(id: RecordId) -> Self {
        Self {
            id,
            data: Data::new(),
            transient: Data::new(),
            acl: RecordAcl::new(),
        }
    }

    /// Attaches an ACL.
    #[must_use]
    pub fn with_acl(mut self, acl: RecordAcl) -> Self {
        self.acl = acl;
        self
    }

    /// Gets a field value by key.
    ///
    /// The `_transient` key returns the whole transient map as an object;
    /// `_transient_<field>` returns the single transient field `<field>`.
    /// Every other key addresses `data`. Returns an owned value -- transient
    /// map reads materialize a fresh object.
    pub fn get(&self, key: &str) -> Option<Value> {
        if key == TRANSIENT_KEY {
            Some(Value::Object(self.transient.clone()))
        } else if let Some(field) = key.strip_prefix(TRANSIENT_FIELD_PREFIX) {
            self.transient.get(field).cloned()
        } else {
            self.data.get(key).cloned()
        }
    }

    /// Sets a field value by key.
    ///
    /// The `_transient` key replaces the whole transient map (a non-object
    /// value is discarded); `_transient_<field>` sets the single transient
    /// field `<field>` without disturbing the rest of the map or touching
    /// `data`. Every other key writes to `data`.
    pub fn set(&mut self, key: &str, value: Value) {
        if key == TRANSIENT_KEY {
            if let Value::Object(map) = value {
                self.transient = map;
            }
        } else if let Some(field) = key.strip_prefix(TRANSIENT_FIELD_PREFIX) {
            self.transient.insert(field.to_string(), value);
        } else {
            self.data.insert(key.to_string(), value);
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn access_level_ordering() {
        assert!(AccessLevel::Read < AccessLevel::Write);
        assert!(AccessLevel::Write.satisfies(AccessLevel::Read));
        assert!(AccessLevel::Write.satisfies(AccessLevel::Write));
        assert!(AccessLevel::Read.satisfies(AccessLevel::Read));
        assert!(!AccessLevel::Read.satisfies(AccessLevel::Write));
    }

    #[test]
    fn access_level_serde_round_trip() {
        assert_eq!(
            serde_json::to_string(&AccessLevel::Write).unwrap(),
            "\"write\""
        );
        let level: AccessLevel = serde_json::from_str("\"read\"").unwrap();
        assert_eq!(level, AccessLevel::Read);
    }

    #[test]
    fn entry_constructors() {
        let entry = AclEntry::role("admin", AccessLevel::Write);
        assert_eq!(entry.level(), AccessLevel::Write);

        let entry = AclEntry::direct("user1", AccessLevel::Read);
        assert_eq!(entry.level(), AccessLevel::Read);
    }

    #[test]
    fn identity_roles() {
        let actor = Identity::new("user1").with_role("admin").with_role("ops");
        assert!(actor.has_role("admin"));
        assert!(actor.has_role("ops"));
        assert!(!actor.has_role("nobody"));
    }

    #[test]
    fn record_id_display() {
        assert_eq!(RecordId::new("note", "0").to_string(), "note/0");
    }

    #[test]
    fn get_transient_field() {
        let mut record = Record::new(RecordId::new("note", "0"));
        record
            .transient
            .insert("content".to_string(), json!("hello world"));

        assert_eq!(record.get("content"), None);
        assert_eq!(
            record.get("_transient"),
            Some(json!({"content": "hello world"}))
        );
        assert_eq!(record.get("_transient_content"), Some(json!("hello world")));
    }

    #[test]
    fn set_whole_transient_map() {
        let mut record = Record::new(RecordId::new("note", "0"));
        record.set("_transient", json!({"content": "hello world"}));

        assert_eq!(record.data.get("content"), None);
        assert_eq!(record.transient.get("content"), Some(&json!("hello world")));
    }

    #[test]
    fn set_individual_transient_field() {
        let mut record = Record::new(RecordId::new("note", "0"));
        record
            .transient
            .insert("existing".to_string(), json!("should be here"));

        record.set("_transient_content", json!("hello world"));

        assert_eq!(record.data.get("content"), None);
        assert_eq!(record.transient.get("content"), Some(&json!("hello world")));
        assert_eq!(
            record.transient.get("existing"),
            Some(&json!("should be here"))
        );
    }

    #[test]
    fn set_transient_non_object_is_discarded() {
        let mut record = Record::new(RecordId::new("note", "0"));
        record
            .transient
            .insert("existing".to_string(), json!("kept"));

        record.set("_transient", json!(42));

        assert_eq!(record.transient.get("existing"), Some(&json!("kept")));
    }

    #[test]
    fn set_plain_field_goes_to_data() {
        let mut record = Record::new(RecordId::new("note", "0"));
        record.set("title", json!("groceries"));

        assert_eq!(record.data.get("title"), Some(&json!("groceries")));
        assert!(record.transient.is_empty());
    }

    #[test]
    fn record_serialization_skips_transient() {
        let mut record = Record::new(RecordId::new("note", "0"));
        record.set("title", json!("persisted"));
        record.set("_transient_tmp", json!("per-request"));

        let serialized = serde_json::to_string(&record).unwrap();
        assert!(serialized.contains("persisted"));
        assert!(!serialized.contains("per-request"));

        let round_tripped: Record = serde_json::from_str(&serialized).unwrap();
        assert!(round_tripped.transient.is_empty());
        assert_eq!(round_tripped.data.get("title"), Some(&json!("persisted")));
    }

    #[test]
    fn acl_serde_round_trip() {
        let acl: RecordAcl = vec![
            AclEntry::role("admin", AccessLevel::Write),
            AclEntry::direct("user1", AccessLevel::Read),
        ]
        .into();

        let serialized = serde_json::to_value(&acl).unwrap();
        assert_eq!(
            serialized,
            json!([
                {"scope": "role", "role": "admin", "level": "write"},
                {"scope": "direct", "user_id": "user1", "level": "read"},
            ])
        );

        let parsed: RecordAcl = serde_json::from_value(serialized).unwrap();
        assert_eq!(parsed, acl);
    }
}
