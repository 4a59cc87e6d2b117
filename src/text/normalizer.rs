//! Review text cleaning.
//!
//! Every review goes through the same deterministic steps before it reaches
//! the vectorizer, and the vocabulary was built from text cleaned the same way:
//!
//! 1. lowercase
//! 2. compatibility-decompose (NFKD) and drop everything that is not ASCII
//! 3. strip `http…` / `www…` substrings up to the next whitespace
//! 4. replace non-word characters with a space
//! 5. collapse whitespace runs
//! 6. trim

use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

// U+001C..U+001F count as whitespace when splitting off a URL.
static URL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"http[^\s\x1c-\x1f]+|www[^\s\x1c-\x1f]+|https[^\s\x1c-\x1f]+").unwrap()
});
static NON_WORD_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^A-Za-z0-9_]").unwrap());
static WHITESPACE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Clean a raw review into its canonical form.
///
/// The output only contains `[a-z0-9_ ]`, has no leading, trailing or
/// repeated spaces, and `normalize(&normalize(t)) == normalize(t)`.
/// Non-Latin scripts have no ASCII decomposition and come out empty.
pub fn normalize(text: &str) -> String {
    let lowered = text.to_lowercase();
    let ascii = fold_to_ascii(&lowered);
    let without_urls = URL_REGEX.replace_all(&ascii, "");
    let words = NON_WORD_REGEX.replace_all(&without_urls, " ");
    let collapsed = WHITESPACE_REGEX.replace_all(&words, " ");
    collapsed.trim().to_string()
}

/// NFKD-decompose and keep only ASCII code points.
///
/// Compatibility forms such as `ℌ` decompose into an uppercase letter after
/// lowercasing has already run, so kept characters are lowercased again here.
fn fold_to_ascii(text: &str) -> String {
    text.nfkd()
        .filter(char::is_ascii)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Reusable text cleaner, for callers that want to pass the cleaning step
/// around as a value.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextNormalizer;

impl TextNormalizer {
    pub fn new() -> Self {
        Self
    }

    pub fn normalize(&self, text: &str) -> String {
        normalize(text)
    }

    /// Clean every document, preserving order.
    pub fn normalize_batch<S: AsRef<str>>(&self, texts: &[S]) -> Vec<String> {
        texts.iter().map(|t| normalize(t.as_ref())).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn strips_accents_and_lowercases() {
        assert_eq!(normalize("CAFÉ"), "cafe");
        assert_eq!(normalize("Reseña muy buena, ¡excelente!"), "resena muy buena excelente");
    }

    #[test]
    fn removes_urls() {
        assert_eq!(normalize("Visit http://x.com now!!"), "visit now");
        assert_eq!(normalize("see www.example.org/a?b=1 and https://t.co/x"), "see and");
    }

    #[test]
    fn information_separators_end_a_url() {
        assert_eq!(normalize("see http\u{1c}foo bar"), "see http foo bar");
        assert_eq!(normalize("www.a.com\u{1f}ok"), "ok");
    }

    #[test]
    fn bare_scheme_word_is_kept() {
        assert_eq!(normalize("http is a protocol"), "http is a protocol");
    }

    #[test]
    fn collapses_punctuation_and_whitespace() {
        assert_eq!(normalize("  great...\t\n movie!!  "), "great movie");
        assert_eq!(normalize("snake_case stays"), "snake_case stays");
        assert_eq!(normalize("10/10"), "10 10");
    }

    #[test]
    fn non_latin_scripts_collapse() {
        assert_eq!(normalize("非常好"), "");
        assert_eq!(normalize("отлично good"), "good");
    }

    #[test]
    fn compatibility_forms_fold_to_lowercase_ascii() {
        assert_eq!(normalize("ℌello ﬁne"), "hello fine");
    }

    #[test]
    fn empty_input() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   !!! "), "");
    }

    #[test]
    fn batch_preserves_order() {
        let cleaned = TextNormalizer::new().normalize_batch(&["B!", "a", "Ç"]);
        assert_eq!(cleaned, vec!["b", "a", "c"]);
    }

    proptest! {
        #[test]
        fn normalize_is_idempotent(text in ".*") {
            let once = normalize(&text);
            prop_assert_eq!(normalize(&once), once.clone());
        }

        #[test]
        fn output_alphabet_is_restricted(text in ".*") {
            let out = normalize(&text);
            prop_assert!(out.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == ' '));
            prop_assert!(!out.contains("  "));
            prop_assert_eq!(out.trim(), out.as_str());
            prop_assert!(!URL_REGEX.is_match(&out));
        }
    }
}
