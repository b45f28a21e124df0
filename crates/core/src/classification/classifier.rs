//! Classifier seam and the keyword implementation.

use super::rules::KEYWORD_RULES;
use super::types::Category;

/// Maps a transaction label to a statement category.
///
/// Implementations must be pure: the same label always yields the same category.
pub trait Classifier: Send + Sync {
    /// Classifies one transaction label.
    fn classify(&self, kind: &str) -> Category;
}

/// Case-insensitive substring classifier over [`KEYWORD_RULES`].
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordClassifier;

impl Classifier for KeywordClassifier {
    fn classify(&self, kind: &str) -> Category {
        let label = kind.to_lowercase();

        KEYWORD_RULES
            .iter()
            .find(|rule| rule.matches(&label))
            .map_or(Category::Unclassified, |rule| rule.resolve(&label))
    }
}
