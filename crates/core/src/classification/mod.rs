//! Transaction classification.
//!
//! Free-text transaction labels ("Uang Masuk", "Beban Lain-lain", ...) are mapped to
//! a fixed set of statement categories by an ordered list of keyword rules. The first
//! rule that matches wins; labels matching no rule are left unclassified and do not
//! contribute to any total.

pub mod classifier;
pub mod rules;
pub mod types;

#[cfg(test)]
mod tests;

pub use classifier::{Classifier, KeywordClassifier};
pub use rules::{KEYWORD_RULES, KeywordRule};
pub use types::Category;
