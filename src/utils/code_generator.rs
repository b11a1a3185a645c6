//! Short code generation and validation utilities.
//!
//! Codes are 6 characters drawn uniformly from `[a-zA-Z0-9]`. They are not
//! meant to be unguessable: collision resistance comes from the 62^6
//! keyspace together with the storage uniqueness constraint.

use rand::Rng;
use regex::Regex;
use std::sync::LazyLock;

/// Number of characters in every generated short code.
pub const SHORT_CODE_LENGTH: usize = 6;

/// The 62-character alphabet codes are drawn from.
pub const SHORT_CODE_ALPHABET: &str =
    "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Codes that collide with fixed top-level routes.
///
/// `/{code}` is shadowed by these paths, so a link stored under one of them
/// could never be redirected.
pub const RESERVED_CODES: &[&str] = &["health", "static"];

/// Shape accepted by the redirect route.
static SHORT_CODE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9]{6}$").expect("short code pattern is valid"));

/// Source of candidate short codes.
///
/// Implementations are shared between concurrently running requests and
/// must never hand the same random sequence to two callers.
#[cfg_attr(test, mockall::automock)]
pub trait CodeGenerator: Send + Sync {
    /// Produces a fresh candidate code.
    fn generate(&self) -> String;
}

/// Generates codes from the thread-local RNG.
///
/// `rand::rng()` gives every worker thread its own OS-seeded generator, so
/// in-flight requests never share state or observe each other's draws.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomCodeGenerator;

impl CodeGenerator for RandomCodeGenerator {
    fn generate(&self) -> String {
        let alphabet = SHORT_CODE_ALPHABET.as_bytes();
        let mut rng = rand::rng();

        (0..SHORT_CODE_LENGTH)
            .map(|_| char::from(alphabet[rng.random_range(0..alphabet.len())]))
            .collect()
    }
}

/// Returns true if `code` has the exact shape of a short code.
///
/// # Examples
///
/// ```ignore
/// assert!(is_valid_short_code("aZ09bY"));
/// assert!(!is_valid_short_code("abc-12"));
/// assert!(!is_valid_short_code("abc1234"));
/// ```
pub fn is_valid_short_code(code: &str) -> bool {
    SHORT_CODE_REGEX.is_match(code)
}

/// Returns true if `code` is one of [`RESERVED_CODES`].
pub fn is_reserved_code(code: &str) -> bool {
    RESERVED_CODES.contains(&code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::thread;

    #[test]
    fn test_alphabet_has_62_unique_chars() {
        let unique: HashSet<char> = SHORT_CODE_ALPHABET.chars().collect();
        assert_eq!(SHORT_CODE_ALPHABET.len(), 62);
        assert_eq!(unique.len(), 62);
    }

    #[test]
    fn test_generate_has_correct_length() {
        let code = RandomCodeGenerator.generate();
        assert_eq!(code.len(), SHORT_CODE_LENGTH);
    }

    #[test]
    fn test_generate_uses_alphabet_only() {
        for _ in 0..1000 {
            let code = RandomCodeGenerator.generate();
            assert!(
                code.chars().all(|c| SHORT_CODE_ALPHABET.contains(c)),
                "unexpected character in {code}"
            );
            assert!(is_valid_short_code(&code));
        }
    }

    #[test]
    fn test_generate_covers_whole_alphabet() {
        let seen: HashSet<char> = (0..10_000)
            .flat_map(|_| RandomCodeGenerator.generate().chars().collect::<Vec<_>>())
            .collect();

        assert_eq!(seen.len(), 62);
    }

    #[test]
    fn test_generate_produces_unique_codes() {
        let codes: HashSet<String> = (0..1000).map(|_| RandomCodeGenerator.generate()).collect();
        assert_eq!(codes.len(), 1000);
    }

    #[test]
    fn test_generate_concurrently_produces_distinct_sequences() {
        let handles: Vec<_> = (0..8)
            .map(|_| {
                thread::spawn(|| {
                    (0..100)
                        .map(|_| RandomCodeGenerator.generate())
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let all: Vec<String> = handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect();
        let unique: HashSet<&String> = all.iter().collect();

        assert_eq!(all.len(), 800);
        assert_eq!(unique.len(), 800);
    }

    #[test]
    fn test_reserved_codes_match_code_shape() {
        for code in RESERVED_CODES {
            assert!(is_valid_short_code(code));
            assert!(is_reserved_code(code));
        }
        assert!(!is_reserved_code("Health"));
        assert!(!is_reserved_code("abc123"));
    }

    #[test]
    fn test_is_valid_short_code_accepts_mixed_case_and_digits() {
        assert!(is_valid_short_code("aZ09bY"));
        assert!(is_valid_short_code("zzzzzz"));
        assert!(is_valid_short_code("000000"));
    }

    #[test]
    fn test_is_valid_short_code_rejects_wrong_length() {
        assert!(!is_valid_short_code(""));
        assert!(!is_valid_short_code("abc12"));
        assert!(!is_valid_short_code("abc1234"));
    }

    #[test]
    fn test_is_valid_short_code_rejects_other_characters() {
        assert!(!is_valid_short_code("abc-12"));
        assert!(!is_valid_short_code("abc_12"));
        assert!(!is_valid_short_code("abc 12"));
        assert!(!is_valid_short_code("abcé12"));
    }
}
