//! Polynomial rolling hash used to place string keys into buckets
//!
//! Each character contributes its Unicode scalar value (`u32::from(char)`). Keys that contain
//! characters outside the Basic Multilingual Plane therefore hash differently than they would
//! under a UTF-16 code-unit scheme, which changes bucket placement but never lookup results.

/// Multiplier applied to the running hash before each character is added
const PRIME: u128 = 31;

/// Computes `h = (h * 31 + code(c)) mod capacity` over the characters of `key`.
///
/// The modulo is taken after every character, so the running value stays below `capacity`
/// and `h * 31 + code(c)` always fits in `u128`. The result lies in `[0, capacity)` for any
/// positive capacity. A capacity of zero yields `0`, which callers reject with their bounds
/// check.
#[must_use]
pub fn polynomial_hash(key: &str, capacity: usize) -> u128 {
    let Ok(modulus) = u128::try_from(capacity) else {
        return 0;
    };

    key.chars().fold(0, |hash: u128, c| {
        hash.saturating_mul(PRIME)
            .saturating_add(u128::from(u32::from(c)))
            .checked_rem(modulus)
            .unwrap_or(0)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_key_hashes_to_zero() {
        assert_eq!(polynomial_hash("", 16), 0);
    }

    #[test]
    fn test_matches_hand_computation() {
        // 'a' = 97 -> 97 % 16 = 1; 1 * 31 + 98 = 129 -> 129 % 16 = 1
        assert_eq!(polynomial_hash("a", 16), 1);
        assert_eq!(polynomial_hash("ab", 16), 1);
        // "dog": 100 % 32 = 4; 4 * 31 + 111 = 235 % 32 = 11; 11 * 31 + 103 = 444 % 32 = 28
        assert_eq!(polynomial_hash("dog", 32), 28);
    }

    #[test]
    fn test_result_is_below_capacity() {
        for capacity in [1, 2, 7, 16, 33, 1024] {
            for key in ["apple", "ice cream", "zebra crossing", "\u{1F34E}"] {
                assert!(polynomial_hash(key, capacity) < u128::try_from(capacity).unwrap_or(0));
            }
        }
    }

    #[test]
    fn test_uses_scalar_values() {
        // U+1F34E is one scalar value: 127_822 % 1000 = 822
        assert_eq!(polynomial_hash("\u{1F34E}", 1000), 822);
    }

    #[test]
    fn test_zero_capacity() {
        assert_eq!(polynomial_hash("apple", 0), 0);
    }

    #[test]
    fn test_large_capacity_does_not_overflow() {
        let hash = polynomial_hash("a fairly long key with many characters", usize::MAX);
        assert!(hash < u128::try_from(usize::MAX).unwrap_or(0));
    }
}
