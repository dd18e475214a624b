//! Policy violation values.

use serde_json::{Map, Value};

/// A failed password-policy check.
///
/// Violations are enumerable values, not faults: the first failing check
/// short-circuits validation and its violation is returned to the caller,
/// who renders it through [`PolicyViolation::kind`] (a stable identifier)
/// and [`PolicyViolation::context`] (a small structured payload).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PolicyViolation {
    /// The password has fewer characters than the configured minimum.
    #[error("password too short")]
    TooShort {
        /// Configured minimum length.
        min_length: usize,
        /// Actual password length, in characters.
        pw_length: usize,
    },

    /// No uppercase character present.
    #[error("password uppercase required")]
    UppercaseRequired,

    /// No lowercase character present.
    #[error("password lowercase required")]
    LowercaseRequired,

    /// No decimal digit present.
    #[error("password digit required")]
    DigitRequired,

    /// No symbol (non-alphanumeric, non-whitespace) character present.
    #[error("password symbol required")]
    SymbolRequired,

    /// The password contains an excluded keyword or an excluded profile
    /// field's value.
    #[error("password containing excluded keywords")]
    ContainsExcludedKeywords,

    /// The guessability score fell below the configured minimum.
    #[error("password below guessable level")]
    BelowGuessableLevel {
        /// Configured minimum level.
        min_level: u8,
        /// Scored level of the candidate password.
        pw_level: u8,
    },
}

impl PolicyViolation {
    /// Stable identifier consumed by the API-error layer.
    pub fn kind(&self) -> &'static str {
        match self {
            PolicyViolation::TooShort { .. } => "PasswordTooShort",
            PolicyViolation::UppercaseRequired => "PasswordUppercaseRequired",
            PolicyViolation::LowercaseRequired => "PasswordLowercaseRequired",
            PolicyViolation::DigitRequired => "PasswordDigitRequired",
            PolicyViolation::SymbolRequired => "PasswordSymbolRequired",
            PolicyViolation::ContainsExcludedKeywords => "PasswordContainingExcludedKeywords",
            PolicyViolation::BelowGuessableLevel { .. } => "PasswordBelowGuessableLevel",
        }
    }

    /// Structured diagnostic payload for this violation.
    ///
    /// Length and guessability failures carry their thresholds; the other
    /// kinds carry no context beyond the kind itself.
    pub fn context(&self) -> Map<String, Value> {
        let mut context = Map::new();
        match self {
            PolicyViolation::TooShort {
                min_length,
                pw_length,
            } => {
                context.insert("min_length".to_string(), Value::from(*min_length));
                context.insert("pw_length".to_string(), Value::from(*pw_length));
            }
            PolicyViolation::BelowGuessableLevel {
                min_level,
                pw_level,
            } => {
                context.insert("min_level".to_string(), Value::from(*min_level));
                context.insert("pw_level".to_string(), Value::from(*pw_level));
            }
            _ => {}
        }
        context
    }
}
