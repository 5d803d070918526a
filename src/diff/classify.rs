//! Change significance classification.

use super::result::{ChangeType, Significance};
use crate::config::SignificanceThresholds;

/// Map a change type and similarity score to a significance bucket.
///
/// Additions and removals are always major regardless of text similarity.
/// For matched pairs the boundaries are strict: `similarity < major` is
/// major, `similarity < minor` is minor, everything else trivial.
#[must_use]
pub fn classify(
    change_type: ChangeType,
    similarity: f64,
    thresholds: &SignificanceThresholds,
) -> Significance {
    match change_type {
        ChangeType::Added | ChangeType::Removed => Significance::Major,
        _ => {
            if similarity < thresholds.major {
                Significance::Major
            } else if similarity < thresholds.minor {
                Significance::Minor
            } else {
                Significance::Trivial
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_added_removed_always_major() {
        let t = SignificanceThresholds::default();
        assert_eq!(classify(ChangeType::Added, 1.0, &t), Significance::Major);
        assert_eq!(classify(ChangeType::Removed, 0.99, &t), Significance::Major);
    }

    #[test]
    fn test_boundary_is_strict() {
        let t = SignificanceThresholds::default();
        // Exactly at the cutoff falls into the next bucket up
        assert_eq!(classify(ChangeType::Modified, 0.3, &t), Significance::Minor);
        assert_eq!(
            classify(ChangeType::Modified, 0.7, &t),
            Significance::Trivial
        );
        assert_eq!(
            classify(ChangeType::Modified, 0.3 - 1e-9, &t),
            Significance::Major
        );
        assert_eq!(
            classify(ChangeType::Modified, 0.7 - 1e-9, &t),
            Significance::Minor
        );
    }

    #[test]
    fn test_unchanged_is_trivial() {
        let t = SignificanceThresholds::default();
        assert_eq!(
            classify(ChangeType::Unchanged, 1.0, &t),
            Significance::Trivial
        );
    }

    #[test]
    fn test_custom_thresholds() {
        let t = SignificanceThresholds {
            major: 0.5,
            minor: 0.9,
        };
        assert_eq!(classify(ChangeType::Modified, 0.45, &t), Significance::Major);
        assert_eq!(classify(ChangeType::Modified, 0.85, &t), Significance::Minor);
    }
}
