//! The password policy and its check chain.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tourmaline_types::Data;

use crate::guessability::{EntropyEstimator, GUESSABILITY_MAX, GuessabilityEstimator};
use crate::violation::PolicyViolation;

/// Selects every string-valued field in take-all mode.
const ALL_FIELDS: &str = "*";

/// Tenant-configured password requirements.
///
/// Immutable per validation call. Every requirement is individually
/// disabled by its zero value -- flag false, empty list, level 0 -- and a
/// disabled check is skipped entirely.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PasswordPolicy {
    /// Minimum password length, in characters.
    pub min_length: usize,
    /// Require at least one uppercase character.
    pub uppercase_required: bool,
    /// Require at least one lowercase character.
    pub lowercase_required: bool,
    /// Require at least one decimal digit.
    pub digit_required: bool,
    /// Require at least one symbol (non-alphanumeric, non-whitespace).
    pub symbol_required: bool,
    /// Keywords the password must not contain, case-insensitively.
    pub excluded_keywords: Vec<String>,
    /// User-profile fields whose values the password must not contain.
    /// The literal `"*"` selects every string-valued field.
    pub excluded_fields: Vec<String>,
    /// Minimum guessability level (0 disables, 4 strictest).
    pub min_guessable_level: u8,
}

impl PasswordPolicy {
    /// Creates a policy with nothing required.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the minimum length.
    #[must_use]
    pub fn with_min_length(mut self, min_length: usize) -> Self {
        self.min_length = min_length;
        self
    }

    /// Requires (or not) an uppercase character.
    #[must_use]
    pub fn with_uppercase_required(mut self, required: bool) -> Self {
        self.uppercase_required = required;
        self
    }

    /// Requires (or not) a lowercase character.
    #[must_use]
    pub fn with_lowercase_required(mut self, required: bool) -> Self {
        self.lowercase_required = required;
        self
    }

    /// Requires (or not) a decimal digit.
    #[must_use]
    pub fn with_digit_required(mut self, required: bool) -> Self {
        self.digit_required = required;
        self
    }

    /// Requires (or not) a symbol character.
    #[must_use]
    pub fn with_symbol_required(mut self, required: bool) -> Self {
        self.symbol_required = required;
        self
    }

    /// Adds an excluded keyword.
    #[must_use]
    pub fn with_excluded_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.excluded_keywords.push(keyword.into());
        self
    }

    /// Adds an excluded profile field.
    #[must_use]
    pub fn with_excluded_field(mut self, field: impl Into<String>) -> Self {
        self.excluded_fields.push(field.into());
        self
    }

    /// Sets the minimum guessability level.
    #[must_use]
    pub fn with_min_guessable_level(mut self, level: u8) -> Self {
        self.min_guessable_level = level;
        self
    }

    /// Validates `password` against this policy using the built-in
    /// estimator.
    ///
    /// `user_data` is the account holder's profile map; only its
    /// string-valued fields participate (excluded-field containment and
    /// the guessability dictionary).
    pub fn validate(
        &self,
        password: &str,
        user_data: Option<&Data>,
    ) -> Result<(), PolicyViolation> {
        self.validate_with_estimator(&EntropyEstimator, password, user_data)
    }

    /// Validates `password` with a caller-supplied guessability estimator.
    ///
    /// Checks run in a fixed order and stop at the first violation; see
    /// the crate docs for the order.
    pub fn validate_with_estimator(
        &self,
        estimator: &dyn GuessabilityEstimator,
        password: &str,
        user_data: Option<&Data>,
    ) -> Result<(), PolicyViolation> {
        let pw_length = password.chars().count();
        if pw_length < self.min_length {
            return Err(PolicyViolation::TooShort {
                min_length: self.min_length,
                pw_length,
            });
        }

        if self.uppercase_required && !contains_uppercase(password) {
            return Err(PolicyViolation::UppercaseRequired);
        }
        if self.lowercase_required && !contains_lowercase(password) {
            return Err(PolicyViolation::LowercaseRequired);
        }
        if self.digit_required && !contains_digit(password) {
            return Err(PolicyViolation::DigitRequired);
        }
        if self.symbol_required && !contains_symbol(password) {
            return Err(PolicyViolation::SymbolRequired);
        }

        if !passes_excluded_keywords(password, self.excluded_keywords.iter()) {
            return Err(PolicyViolation::ContainsExcludedKeywords);
        }

        if !self.excluded_fields.is_empty() {
            if let Some(data) = user_data {
                let dictionary = self.excluded_field_values(data);
                if !passes_excluded_keywords(password, dictionary.iter()) {
                    return Err(PolicyViolation::ContainsExcludedKeywords);
                }
            }
        }

        if self.min_guessable_level > 0 {
            let user_inputs = user_data.map(string_field_values).unwrap_or_default();
            let pw_level = estimator
                .score(password, &user_inputs)
                .min(GUESSABILITY_MAX);
            if pw_level < self.min_guessable_level {
                tracing::trace!(
                    pw_level,
                    min_level = self.min_guessable_level,
                    "password below guessable level"
                );
                return Err(PolicyViolation::BelowGuessableLevel {
                    min_level: self.min_guessable_level,
                    pw_level,
                });
            }
        }

        Ok(())
    }

    /// Values of the excluded profile fields, per the configured
    /// selection -- named fields, or every string-valued field when the
    /// list contains [`ALL_FIELDS`].
    fn excluded_field_values(&self, data: &Data) -> Vec<String> {
        if self.excluded_fields.iter().any(|f| f == ALL_FIELDS) {
            return string_field_values(data);
        }
        self.excluded_fields
            .iter()
            .filter_map(|field| data.get(field))
            .filter_map(as_string)
            .collect()
    }
}

// ============================================================================
// Check functions
// ============================================================================

fn contains_uppercase(password: &str) -> bool {
    password.chars().any(char::is_uppercase)
}

fn contains_lowercase(password: &str) -> bool {
    password.chars().any(char::is_lowercase)
}

fn contains_digit(password: &str) -> bool {
    password.chars().any(|c| c.is_ascii_digit())
}

fn contains_symbol(password: &str) -> bool {
    password
        .chars()
        .any(|c| !c.is_alphanumeric() && !c.is_whitespace())
}

/// Returns whether the password avoids every keyword.
///
/// Matching is case-insensitive **literal** substring containment: a
/// keyword like `.` or `[` matches those characters verbatim, never as a
/// pattern. Empty keywords are ignored (an empty string is a substring of
/// everything).
fn passes_excluded_keywords<'a, I>(password: &str, keywords: I) -> bool
where
    I: Iterator<Item = &'a String>,
{
    let lowered = password.to_lowercase();
    !keywords
        .filter(|kw| !kw.is_empty())
        .any(|kw| lowered.contains(&kw.to_lowercase()))
}

/// Projects a profile map to its string-valued fields.
///
/// Non-string values (numbers, booleans, nested structures) are dropped
/// from consideration entirely.
fn string_field_values(data: &Data) -> Vec<String> {
    data.values().filter_map(as_string).collect()
}

fn as_string(value: &Value) -> Option<String> {
    value.as_str().map(ToString::to_string)
}

// ============================================================================
// Tests
// ============================================================================
