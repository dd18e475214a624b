//! # tourmaline-audit: Password Policy Engine
//!
//! Validates candidate passwords against a tenant-configured strength
//! policy: length, character classes, excluded keywords and profile
//! fields, and a guessability score.
//!
//! ## Check order
//!
//! Checks run in a fixed order and stop at the first violation:
//!
//! 1. Minimum length
//! 2. Uppercase required
//! 3. Lowercase required
//! 4. Digit required
//! 5. Symbol required
//! 6. Excluded keywords (literal, case-insensitive containment)
//! 7. Excluded profile fields (string-valued fields re-run as keywords)
//! 8. Guessability level (0 weakest .. 4 strongest)
//!
//! A check whose requirement is unconfigured (flag false, list empty,
//! level 0) is skipped entirely, not evaluated-and-ignored. A violation is
//! a value carrying a stable kind plus a structured context map for the
//! API-error layer -- validation never panics and never treats an absent
//! requirement as a fault.
//!
//! ## Examples
//!
//! ```
//! use tourmaline_audit::{PasswordPolicy, PolicyViolation};
//!
//! let policy = PasswordPolicy::new()
//!     .with_min_length(8)
//!     .with_digit_required(true);
//!
//! assert_eq!(
//!     policy.validate("hunter", None),
//!     Err(PolicyViolation::TooShort { min_length: 8, pw_length: 6 })
//! );
//! assert_eq!(policy.validate("correct horse 1", None), Ok(()));
//! ```
//!
//! ## Guessability
//!
//! The strength score is produced by a [`GuessabilityEstimator`] -- an
//! injected capability, so a dedicated estimator can replace the built-in
//! [`EntropyEstimator`] without touching the engine's control flow.

mod guessability;
mod policy;
mod violation;

pub use guessability::{EntropyEstimator, GUESSABILITY_MAX, GuessabilityEstimator};
pub use policy::PasswordPolicy;
pub use violation::PolicyViolation;
