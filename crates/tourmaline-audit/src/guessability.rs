//! Password strength estimation.
//!
//! The policy engine needs a bounded guessability score (0 = trivially
//! guessable .. 4 = very strong) that is aware of context-specific
//! strings -- an attacker who knows the account holder's name tries it
//! first, so a password built from profile data must score low no matter
//! how long it is.
//!
//! Estimation is an injected capability behind [`GuessabilityEstimator`].
//! The built-in [`EntropyEstimator`] is a self-contained search-space
//! model; deployments wanting a full pattern-matching estimator can plug
//! one in without changing the engine.

/// Upper bound of the guessability scale.
pub const GUESSABILITY_MAX: u8 = 4;

/// Scores how guessable a password is, on a 0..=[`GUESSABILITY_MAX`]
/// scale.
pub trait GuessabilityEstimator {
    /// Scores `password`, taking `user_inputs` as an auxiliary dictionary
    /// of context-specific strings that make resembling passwords cheaper
    /// to guess.
    ///
    /// Implementations should stay within 0..=[`GUESSABILITY_MAX`]; the
    /// policy engine clamps the result regardless.
    fn score(&self, password: &str, user_inputs: &[String]) -> u8;
}

/// Built-in search-space estimator.
///
/// Scores by effective entropy: the character-class pool size raised to an
/// *effective* length that discounts what an attacker gets for free --
/// repeated or sequential runs, and substrings taken from the auxiliary
/// dictionary (each dictionary hit costs the attacker roughly one guess,
/// not one guess per character).
#[derive(Debug, Clone, Copy, Default)]
pub struct EntropyEstimator;

/// Dictionary fragments shorter than this are too noisy to match.
const MIN_FRAGMENT_LEN: usize = 3;

/// Weight of a character continuing a repeated or sequential run.
const RUN_WEIGHT: f64 = 0.25;

impl GuessabilityEstimator for EntropyEstimator {
    fn score(&self, password: &str, user_inputs: &[String]) -> u8 {
        if password.is_empty() {
            return 0;
        }

        let chars: Vec<char> = password.chars().collect();
        let covered = dictionary_coverage(&chars, user_inputs);

        // Per-character contribution to the search space: full weight for
        // a fresh character, a fraction for one continuing a run, and a
        // flat unit per covered dictionary fragment.
        let mut units = 0.0_f64;
        let mut index = 0;
        while index < chars.len() {
            if covered[index] {
                // Consume the whole covered run for one unit.
                while index < chars.len() && covered[index] {
                    index += 1;
                }
                units += 1.0;
                continue;
            }

            let continues_run = index > 0 && {
                let prev = chars[index - 1] as i64;
                let cur = chars[index] as i64;
                (cur - prev).abs() <= 1
            };
            units += if continues_run { RUN_WEIGHT } else { 1.0 };
            index += 1;
        }

        let bits = units * pool_size(&chars).log2();
        level_for_bits(bits)
    }
}

/// Marks which character positions are covered by a dictionary fragment.
///
/// Matching is case-insensitive literal containment, the same rule the
/// excluded-keyword check uses.
fn dictionary_coverage(chars: &[char], user_inputs: &[String]) -> Vec<bool> {
    let mut covered = vec![false; chars.len()];
    // One-to-one lowercase mapping keeps positions aligned with `covered`
    // (multi-char expansions like the Turkish dotted I are not folded).
    let lowered: Vec<char> = chars
        .iter()
        .map(|c| c.to_lowercase().next().unwrap_or(*c))
        .collect();

    for input in user_inputs {
        let fragment: Vec<char> = input.to_lowercase().chars().collect();
        if fragment.len() < MIN_FRAGMENT_LEN || fragment.len() > lowered.len() {
            continue;
        }
        for start in 0..=(lowered.len() - fragment.len()) {
            if lowered[start..start + fragment.len()] == fragment[..] {
                for flag in &mut covered[start..start + fragment.len()] {
                    *flag = true;
                }
            }
        }
    }
    covered
}

/// Size of the smallest character pool containing every password char.
fn pool_size(chars: &[char]) -> f64 {
    let mut pool: f64 = 0.0;
    if chars.iter().any(|c| c.is_lowercase()) {
        pool += 26.0;
    }
    if chars.iter().any(|c| c.is_uppercase()) {
        pool += 26.0;
    }
    if chars.iter().any(char::is_ascii_digit) {
        pool += 10.0;
    }
    if chars
        .iter()
        .any(|c| !c.is_alphanumeric() && !c.is_whitespace())
    {
        pool += 33.0;
    }
    pool.max(10.0)
}

/// Maps effective entropy bits onto the 0..=4 scale.
fn level_for_bits(bits: f64) -> u8 {
    match bits {
        b if b < 18.0 => 0,
        b if b < 36.0 => 1,
        b if b < 54.0 => 2,
        b if b < 72.0 => 3,
        _ => GUESSABILITY_MAX,
    }
}
