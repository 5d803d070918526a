//! Character statistics aggregation.

use super::result::{ChangeType, DiffStatistics, ElementChange};

/// Tally estimated added/removed/changed character counts from a change list.
///
/// Modified records contribute the length difference to whichever side grew,
/// plus a `min_len * (1 - similarity)` estimate of in-place edits. That is a
/// heuristic proxy, not a character-level LCS diff.
#[must_use]
pub fn aggregate(changes: &[ElementChange]) -> DiffStatistics {
    let mut added_chars: u64 = 0;
    let mut removed_chars: u64 = 0;
    let mut changed_estimate: f64 = 0.0;

    for change in changes {
        match change.change_type {
            ChangeType::Added => {
                added_chars += change.after_len() as u64;
            }
            ChangeType::Removed => {
                removed_chars += change.before_len() as u64;
            }
            ChangeType::Modified => {
                let before_len = change.before_len();
                let after_len = change.after_len();
                if before_len > after_len {
                    removed_chars += (before_len - after_len) as u64;
                } else {
                    added_chars += (after_len - before_len) as u64;
                }
                let similarity = change.similarity.unwrap_or(0.0).clamp(0.0, 1.0);
                changed_estimate += before_len.min(after_len) as f64 * (1.0 - similarity);
            }
            ChangeType::Moved | ChangeType::Unchanged => {}
        }
    }

    DiffStatistics {
        added_chars,
        removed_chars,
        changed_chars: changed_estimate.round() as u64,
        processing_time_ms: 0,
    }
}
