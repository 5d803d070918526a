//! Semantic diff of document structures.

mod classify;
mod engine;
mod matcher;
mod result;
mod stats;

pub use classify::classify;
pub use engine::DiffEngine;
pub use matcher::{match_siblings, MatchedPair, SiblingMatchResult};
pub use result::{
    ChangeContent, ChangeSummary, ChangeType, DiffStatistics, DocumentComparison, ElementChange,
    Significance,
};
pub use stats::aggregate;
