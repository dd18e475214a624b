//! ACL evaluation engine.
//!
//! Evaluates an access request by matching each grant in the record's ACL
//! against the actor. Any one matching grant at a sufficient level admits
//! the request; there is no deny entry and no precedence between grants.

use serde::{Deserialize, Serialize};
use tourmaline_types::{AccessLevel, AclEntry, Identity, Record, RecordAcl};

// ============================================================================
// Public API
// ============================================================================

/// Evaluates whether `actor` may act on a record guarded by `acl` at
/// `level`.
///
/// A grant admits the actor iff it matches (role grant: the actor holds the
/// role; direct grant: the ids are equal) **and** its level satisfies the
/// requested level under `Read < Write`. Grants form a union -- one match is
/// enough, and non-matching grants never subtract.
///
/// Pure function over its inputs: no side effects, safe to call
/// concurrently.
///
/// # Postcondition
///
/// An empty ACL admits nobody. Callers wanting a different empty-ACL
/// default use [`accessible_with_default`].
pub fn accessible(acl: &RecordAcl, actor: &Identity, level: AccessLevel) -> bool {
    let admitted = acl.entries().iter().any(|entry| grants(entry, actor, level));
    tracing::trace!(
        actor = %actor.id,
        requested = %level,
        admitted,
        "acl decision"
    );
    admitted
}

/// Evaluates access with a configured policy for records whose ACL is
/// empty.
///
/// Records created without any grant are ambiguous: deployments differ on
/// whether they are private or world-readable. The choice is made
/// explicitly via [`EmptyAclPolicy`] instead of being baked in.
pub fn accessible_with_default(
    acl: &RecordAcl,
    actor: &Identity,
    level: AccessLevel,
    empty_acl: EmptyAclPolicy,
) -> bool {
    if acl.is_empty() {
        return empty_acl.admits(level);
    }
    accessible(acl, actor, level)
}

/// Returns whether a single grant admits the actor at the requested level.
fn grants(entry: &AclEntry, actor: &Identity, level: AccessLevel) -> bool {
    let matches_actor = match entry {
        AclEntry::Role { role, .. } => actor.has_role(role),
        AclEntry::Direct { user_id, .. } => *user_id == actor.id,
    };
    matches_actor && entry.level().satisfies(level)
}

// ============================================================================
// Empty-ACL Policy
// ============================================================================

/// Deployment policy for records carrying an empty ACL.
///
/// The default is [`EmptyAclPolicy::DenyAll`]: a record nobody was granted
/// access to admits nobody.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EmptyAclPolicy {
    /// An empty ACL admits nobody.
    #[default]
    DenyAll,
    /// An empty ACL admits reads from anyone, but no writes.
    AllowRead,
    /// An empty ACL admits both reads and writes from anyone.
    AllowAll,
}

impl EmptyAclPolicy {
    /// Returns whether this policy admits a request at `level`.
    pub fn admits(self, level: AccessLevel) -> bool {
        match self {
            EmptyAclPolicy::DenyAll => false,
            EmptyAclPolicy::AllowRead => level == AccessLevel::Read,
            EmptyAclPolicy::AllowAll => true,
        }
    }
}

// ============================================================================
// Extension trait
// ============================================================================

/// Access evaluation over anything that carries an ACL.
pub trait Accessible {
    /// Returns whether `actor` is admitted at `level`.
    fn accessible(&self, actor: &Identity, level: AccessLevel) -> bool;
}

impl Accessible for RecordAcl {
    fn accessible(&self, actor: &Identity, level: AccessLevel) -> bool {
        accessible(self, actor, level)
    }
}

impl Accessible for Record {
    fn accessible(&self, actor: &Identity, level: AccessLevel) -> bool {
        accessible(&self.acl, actor, level)
    }
}

// ============================================================================
// Tests
// ============================================================================
