//! Text normalization for free-text answers.
//!
//! Two spellings of the same answer compare equal once they agree up to
//! surrounding whitespace, letter case and combining accents.

use unicode_normalization::UnicodeNormalization;

/// Combining Diacritical Marks block.
const COMBINING_MARKS: std::ops::RangeInclusive<char> = '\u{0300}'..='\u{036f}';

/// Normalize a typed answer for comparison.
///
/// Trims, lowercases, decomposes to NFD and strips combining diacritical
/// marks. An absent input normalizes to the empty string.
pub fn normalize_text(input: Option<&str>) -> String {
    let Some(raw) = input else {
        return String::new();
    };

    let folded: String = raw
        .trim()
        .to_lowercase()
        .nfd()
        .filter(|c| !COMBINING_MARKS.contains(c))
        .collect();

    // A stripped mark can leave whitespace at the edge ("a \u{301}").
    folded.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folds_case_accents_and_whitespace() {
        assert_eq!(normalize_text(Some("Café ")), "cafe");
        assert_eq!(normalize_text(Some("  ÉLÈVE\t")), "eleve");
        assert_eq!(normalize_text(Some("Ångström")), "angstrom");
    }

    #[test]
    fn absent_input_is_empty() {
        assert_eq!(normalize_text(None), "");
        assert_eq!(normalize_text(Some("   ")), "");
    }

    #[test]
    fn decomposed_and_composed_forms_agree() {
        let composed = "r\u{e9}sum\u{e9}";
        let decomposed = "re\u{301}sume\u{301}";
        assert_eq!(
            normalize_text(Some(composed)),
            normalize_text(Some(decomposed))
        );
    }

    #[test]
    fn inner_whitespace_is_kept() {
        assert_eq!(normalize_text(Some(" Le  Havre ")), "le  havre");
    }

    #[test]
    fn idempotent() {
        let samples = [
            "Café ",
            "  ÉLÈVE",
            "a \u{301}",
            "\u{301} b",
            "İstanbul",
            "ﬁne",
            "",
            "Straße",
            "naïve résumé",
        ];
        for s in samples {
            let once = normalize_text(Some(s));
            let twice = normalize_text(Some(&once));
            assert_eq!(once, twice, "not idempotent for {s:?}");
        }
    }

    #[test]
    fn marks_outside_the_block_are_kept() {
        // U+0483 (Cyrillic titlo) is a combining mark outside U+0300..U+036F.
        assert_eq!(normalize_text(Some("a\u{483}")), "a\u{483}");
    }
}
