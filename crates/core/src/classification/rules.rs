//! Priority-ordered keyword rules.

use super::types::Category;

/// Marker that moves an expense label into "Beban Lain-lain".
pub const OTHER_EXPENSE_MARKER: &str = "lain";

/// What a matching rule resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RuleTarget {
    /// Always the same category.
    Fixed(Category),
    /// Other expense when the label carries [`OTHER_EXPENSE_MARKER`], operating otherwise.
    Expense,
}

/// A rule matching any of its keywords as a substring of a lowercased label.
#[derive(Debug, Clone, Copy)]
pub struct KeywordRule {
    target: RuleTarget,
    keywords: &'static [&'static str],
}

/// The rule list, checked in order. Capital comes first, so a label such as
/// "Modal Awal dan Beban" is capital even though it also names an expense.
pub static KEYWORD_RULES: [KeywordRule; 3] = [
    KeywordRule {
        target: RuleTarget::Fixed(Category::Capital),
        keywords: &["modal"],
    },
    KeywordRule {
        target: RuleTarget::Fixed(Category::Revenue),
        keywords: &["pendapatan", "masuk", "penjualan"],
    },
    KeywordRule {
        target: RuleTarget::Expense,
        keywords: &["beban", "keluar", "biaya"],
    },
];

impl KeywordRule {
    /// Keywords this rule looks for.
    #[must_use]
    pub fn keywords(&self) -> &'static [&'static str] {
        self.keywords
    }

    /// Returns true if any keyword occurs in `label`.
    ///
    /// `label` must already be lowercased.
    #[must_use]
    pub fn matches(&self, label: &str) -> bool {
        self.keywords.iter().any(|keyword| label.contains(keyword))
    }

    /// Category for a label this rule matched.
    ///
    /// `label` must already be lowercased.
    #[must_use]
    pub fn resolve(&self, label: &str) -> Category {
        match self.target {
            RuleTarget::Fixed(category) => category,
            RuleTarget::Expense if label.contains(OTHER_EXPENSE_MARKER) => Category::OtherExpense,
            RuleTarget::Expense => Category::OperatingExpense,
        }
    }
}
