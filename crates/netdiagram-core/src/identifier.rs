//! Random identifier generation.
//!
//! Nodes that are not given an explicit identifier receive a random string of
//! lowercase ASCII letters. Such strings are always valid unquoted DOT
//! identifiers.
//!
//! # Examples
//!
//! ```
//! use netdiagram_core::identifier::{self, DEFAULT_ID_LENGTH};
//!
//! let id = identifier::random_id();
//! assert_eq!(id.len(), DEFAULT_ID_LENGTH);
//! assert!(id.chars().all(|c| c.is_ascii_lowercase()));
//! ```

use rand::Rng;

/// Characters used for generated identifiers.
pub const CHARSET: &str = "abcdefghijklmnopqrstuvwxyz";

/// Length of identifiers produced by [`random_id`].
pub const DEFAULT_ID_LENGTH: usize = 10;

/// Returns a random identifier of [`DEFAULT_ID_LENGTH`] lowercase letters.
pub fn random_id() -> String {
    random_string(DEFAULT_ID_LENGTH)
}

/// Returns a random string of `length` characters drawn from [`CHARSET`].
pub fn random_string(length: usize) -> String {
    random_string_with_charset(length, CHARSET)
}

/// Returns a random string of `length` characters drawn from `charset`.
///
/// An empty charset yields an empty string regardless of `length`.
///
/// # Examples
///
/// ```
/// use netdiagram_core::identifier::random_string_with_charset;
///
/// let bits = random_string_with_charset(8, "01");
/// assert_eq!(bits.len(), 8);
/// assert!(bits.chars().all(|c| c == '0' || c == '1'));
/// ```
pub fn random_string_with_charset(length: usize, charset: &str) -> String {
    let chars: Vec<char> = charset.chars().collect();
    if chars.is_empty() {
        return String::new();
    }

    let mut rng = rand::rng();
    (0..length)
        .map(|_| chars[rng.random_range(0..chars.len())])
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    use proptest::prelude::*;

    #[test]
    fn test_random_id_uses_default_length() {
        let id = random_id();
        assert_eq!(id.len(), DEFAULT_ID_LENGTH);
        assert!(id.chars().all(|c| CHARSET.contains(c)));
    }

    #[test]
    fn test_zero_length() {
        assert_eq!(random_string(0), "");
    }

    #[test]
    fn test_empty_charset() {
        assert_eq!(random_string_with_charset(12, ""), "");
    }

    #[test]
    fn test_single_char_charset() {
        assert_eq!(random_string_with_charset(4, "x"), "xxxx");
    }

    #[test]
    fn test_ids_differ() {
        // 26^10 possible values; a collision here means the RNG is broken.
        assert_ne!(random_id(), random_id());
    }

    proptest! {
        #[test]
        fn prop_random_string_matches_length_and_charset(length in 0usize..128) {
            let value = random_string(length);
            prop_assert_eq!(value.chars().count(), length);
            prop_assert!(value.chars().all(|c| CHARSET.contains(c)));
        }

        #[test]
        fn prop_custom_charset_is_respected(
            length in 1usize..64,
            charset in "[A-Z0-9]{1,16}",
        ) {
            let value = random_string_with_charset(length, &charset);
            prop_assert_eq!(value.chars().count(), length);
            prop_assert!(value.chars().all(|c| charset.contains(c)));
        }
    }
}
