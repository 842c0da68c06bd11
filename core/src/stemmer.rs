//! English suffix stripping (Snowball/Porter2) with a non-empty guarantee.

use lazy_static::lazy_static;
use rust_stemmers::{Algorithm, Stemmer};
use std::borrow::Cow;

lazy_static! {
    static ref STEMMER: Stemmer = Stemmer::create(Algorithm::English);
}

/// Reduce `word` to its root form.
///
/// Plural and possessive endings, `-ing`/`-ed` tense endings, doubled final
/// consonants and derivational endings such as `-er`/`-est` are stripped in
/// rule priority order. The result is never empty for a non-empty input: if
/// the rules would remove everything, the input is returned unchanged.
pub fn stem(word: &str) -> String {
    if word.is_empty() {
        return String::new();
    }
    let lowered: Cow<'_, str> = if word.chars().any(char::is_uppercase) {
        Cow::Owned(word.to_lowercase())
    } else {
        Cow::Borrowed(word)
    };
    let root = STEMMER.stem(&lowered);
    if root.is_empty() {
        lowered.into_owned()
    } else {
        root.into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_inflections() {
        assert_eq!(stem("running"), "run");
        assert_eq!(stem("cats"), "cat");
        assert_eq!(stem("jumped"), "jump");
        assert_eq!(stem("hopping"), "hop");
    }

    #[test]
    fn short_words_pass_through() {
        for w in ["cat", "sat", "mat", "dog", "log", "the", "on"] {
            assert_eq!(stem(w), w);
        }
    }

    #[test]
    fn is_case_insensitive() {
        assert_eq!(stem("Running"), stem("running"));
    }

    #[test]
    fn never_empty() {
        assert_eq!(stem(""), "");
        for w in ["a", "s", "1", "42", "ed", "ing"] {
            assert!(!stem(w).is_empty(), "{w} stemmed to empty");
        }
    }

    #[test]
    fn deterministic() {
        assert_eq!(stem("generalizations"), stem("generalizations"));
    }
}
