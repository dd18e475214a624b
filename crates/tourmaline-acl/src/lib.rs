//! # tourmaline-acl: Record ACL Evaluation
//!
//! Decides whether an actor may act on a record at a requested capability
//! level, given the record's attached ACL.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  Access Request                              │
//! │  (RecordAcl + Identity + AccessLevel)        │
//! └─────────────────┬───────────────────────────┘
//!                   │
//!                   ▼
//! ┌─────────────────────────────────────────────┐
//! │  Evaluator                                   │
//! │  ├─ Match each grant against the actor       │
//! │  ├─ Require grant level >= requested level   │
//! │  └─ Union semantics: any one grant suffices  │
//! └─────────────────┬───────────────────────────┘
//!                   │
//!                   ▼
//! ┌─────────────────────────────────────────────┐
//! │  bool                                        │
//! │  - denial is an outcome, not an error        │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Semantics
//!
//! A record's ACL is a monotonic union of grants, not a priority list: no
//! entry can revoke a grant made by another, and evaluation order is
//! irrelevant. An actor with no matching entry is simply not admitted --
//! that is a normal boolean outcome the caller turns into a 403-equivalent,
//! never a fault.
//!
//! ## Examples
//!
//! ```
//! use tourmaline_acl::{Accessible, accessible};
//! use tourmaline_types::{AccessLevel, AclEntry, Identity, RecordAcl};
//!
//! let acl: RecordAcl = vec![
//!     AclEntry::role("admin", AccessLevel::Write),
//!     AclEntry::direct("reviewer-7", AccessLevel::Read),
//! ]
//! .into();
//!
//! let admin = Identity::new("user1").with_role("admin");
//! let reviewer = Identity::new("reviewer-7");
//!
//! assert!(accessible(&acl, &admin, AccessLevel::Write));
//! assert!(acl.accessible(&reviewer, AccessLevel::Read));
//! assert!(!acl.accessible(&reviewer, AccessLevel::Write));
//! ```

pub mod evaluator;

pub use evaluator::{Accessible, EmptyAclPolicy, accessible, accessible_with_default};
