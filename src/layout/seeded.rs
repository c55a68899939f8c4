// Hash-style deterministic randomness. Every value is a pure function of
// (seed, offset), so results never depend on call order.

use once_cell::sync::Lazy;
use regex::Regex;

static LEADING_INT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*([+-]?)(?:0[xX]([0-9a-fA-F]+)|(\d+))").unwrap());

const SEED_SCALE: f64 = 9.973;
const HASH_SCALE: f64 = 10000.0;
const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// `frac(sin(seed * 9.973 + offset) * 10000)`, always in `[0, 1)`.
pub fn seeded_random(seed: f64, offset: f64) -> f64 {
    let x = (seed * SEED_SCALE + offset).sin() * HASH_SCALE;
    x - x.floor()
}

/// Integer seed from an id, read like a browser `parseInt` without a radix:
/// leading whitespace, optional sign, then decimal digits or `0x` hex digits.
/// No digits or a zero value yields 1.
pub fn seed_from_id(id: &str) -> f64 {
    LEADING_INT_RE
        .captures(id)
        .and_then(|caps| {
            let magnitude = match (caps.get(2), caps.get(3)) {
                (Some(hex), _) => hex
                    .as_str()
                    .chars()
                    .filter_map(|c| c.to_digit(16))
                    .fold(0.0, |acc, digit| acc * 16.0 + f64::from(digit)),
                (None, Some(dec)) => dec.as_str().parse::<f64>().ok()?,
                (None, None) => return None,
            };
            let negative = caps.get(1).is_some_and(|sign| sign.as_str() == "-");
            Some(if negative { -magnitude } else { magnitude })
        })
        .filter(|seed| *seed != 0.0 && seed.is_finite())
        .unwrap_or(1.0)
}

/// Stable FNV-1a hash folded into a seed. Unlike [`seed_from_id`] this keeps
/// non-numeric ids apart.
pub fn hash_seed(id: &str) -> f64 {
    let mut hash = FNV_OFFSET;
    for byte in id.as_bytes() {
        hash ^= u64::from(*byte);
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    (hash % 1_000_003) as f64 + 1.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_random_is_unit_interval_and_repeatable() {
        for seed in [1.0, 2.0, 42.0, -7.0, 123456.0] {
            for offset in 0..12 {
                let a = seeded_random(seed, offset as f64);
                let b = seeded_random(seed, offset as f64);
                assert_eq!(a.to_bits(), b.to_bits());
                assert!((0.0..1.0).contains(&a), "{a} out of range");
            }
        }
    }

    #[test]
    fn seed_parsing_matches_parse_int() {
        assert_eq!(seed_from_id("42"), 42.0);
        assert_eq!(seed_from_id("  17abc"), 17.0);
        assert_eq!(seed_from_id("-3"), -3.0);
        assert_eq!(seed_from_id("12.9"), 12.0);
        assert_eq!(seed_from_id("0"), 1.0);
        assert_eq!(seed_from_id("abc"), 1.0);
        assert_eq!(seed_from_id(""), 1.0);
    }

    #[test]
    fn seed_parsing_reads_hex_prefix() {
        assert_eq!(seed_from_id("0x10"), 16.0);
        assert_eq!(seed_from_id(" 0XfF"), 255.0);
        assert_eq!(seed_from_id("-0x1a"), -26.0);
        assert_eq!(seed_from_id("0x"), 1.0);
        assert_eq!(seed_from_id("0xg1"), 1.0);
        assert_eq!(seed_from_id("007"), 7.0);
    }

    #[test]
    fn hash_seed_separates_text_ids() {
        assert_ne!(hash_seed("alice"), hash_seed("bob"));
        assert_eq!(hash_seed("alice"), hash_seed("alice"));
        assert!(hash_seed("") >= 1.0);
    }
}
