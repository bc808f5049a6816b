use rand::Rng;

/// Uniform integer over the closed interval `[min, max]`.
///
/// Argument order (max before min) matches the session seeding call site,
/// where the range arrives as "upper bound, lower bound" from config.
/// Callers must guarantee `min <= max`; config validation enforces this
/// before a manager is ever constructed.
pub fn random_in_range(max: i64, min: i64) -> i64 {
    debug_assert!(min <= max);
    rand::rng().random_range(min..=max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn stays_within_bounds() {
        for _ in 0..10_000 {
            let n = random_in_range(56, 2);
            assert!((2..=56).contains(&n), "out of range: {n}");
        }
    }

    #[test]
    fn covers_the_full_range() {
        let mut seen = HashSet::new();
        for _ in 0..5_000 {
            seen.insert(random_in_range(5, 2));
        }
        assert_eq!(seen, HashSet::from([2, 3, 4, 5]));
    }

    #[test]
    fn degenerate_range_is_constant() {
        for _ in 0..100 {
            assert_eq!(random_in_range(7, 7), 7);
        }
    }
}
