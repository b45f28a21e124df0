//! Tests for keyword classification.

use proptest::prelude::*;
use rstest::rstest;

use super::classifier::{Classifier, KeywordClassifier};
use super::rules::KEYWORD_RULES;
use super::types::Category;

#[rstest]
#[case("Modal", Category::Capital)]
#[case("modal usaha", Category::Capital)]
#[case("MODAL", Category::Capital)]
#[case("Uang Masuk", Category::Revenue)]
#[case("Pendapatan", Category::Revenue)]
#[case("Penjualan Produk", Category::Revenue)]
#[case("Uang Keluar", Category::OperatingExpense)]
#[case("Beban Usaha", Category::OperatingExpense)]
#[case("Biaya Listrik", Category::OperatingExpense)]
#[case("Beban Lain-lain", Category::OtherExpense)]
#[case("Biaya lain", Category::OtherExpense)]
#[case("UANG KELUAR LAINNYA", Category::OtherExpense)]
#[case("Transfer", Category::Unclassified)]
#[case("", Category::Unclassified)]
#[case("lain-lain", Category::Unclassified)]
fn test_keyword_classification(#[case] kind: &str, #[case] expected: Category) {
    assert_eq!(KeywordClassifier.classify(kind), expected);
}

#[test]
fn test_capital_rule_wins_over_expense() {
    assert_eq!(
        KeywordClassifier.classify("Modal Awal dan Beban"),
        Category::Capital
    );
}

#[test]
fn test_revenue_rule_wins_over_expense() {
    // "masuk" is checked before "keluar".
    assert_eq!(
        KeywordClassifier.classify("Uang masuk dan keluar"),
        Category::Revenue
    );
}

#[test]
fn test_rule_order() {
    assert_eq!(KEYWORD_RULES[0].keywords(), &["modal"]);
    assert_eq!(
        KEYWORD_RULES[1].keywords(),
        &["pendapatan", "masuk", "penjualan"]
    );
    assert_eq!(KEYWORD_RULES[2].keywords(), &["beban", "keluar", "biaya"]);
}

#[test]
fn test_category_labels() {
    assert_eq!(Category::Capital.label(), "Modal");
    assert_eq!(Category::OperatingExpense.label(), "Beban Usaha");
    assert_eq!(Category::OtherExpense.label(), "Beban Lain-lain");
}

proptest! {
    /// Any label containing "modal", in any case, is capital.
    #[test]
    fn prop_modal_always_capital(
        prefix in "[a-zA-Z -]{0,12}",
        suffix in "[a-zA-Z -]{0,12}",
        upper in any::<bool>(),
    ) {
        let keyword = if upper { "MODAL" } else { "Modal" };
        let kind = format!("{prefix}{keyword}{suffix}");
        prop_assert_eq!(KeywordClassifier.classify(&kind), Category::Capital);
    }

    /// Labels built only from letters that can never spell a keyword stay unclassified.
    #[test]
    fn prop_keywordless_labels_unclassified(kind in "[xyzqwv ]{0,24}") {
        prop_assert_eq!(KeywordClassifier.classify(&kind), Category::Unclassified);
    }

    /// Classification ignores case.
    #[test]
    fn prop_case_insensitive(kind in "[a-zA-Z -]{0,24}") {
        prop_assert_eq!(
            KeywordClassifier.classify(&kind.to_uppercase()),
            KeywordClassifier.classify(&kind.to_lowercase())
        );
    }
}
