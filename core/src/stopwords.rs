//! English stopword table.
//!
//! Terms are filtered after stemming, so the table holds every listed word in
//! both its surface and stemmed form. Contractions are stored as the fragments
//! the tokenizer produces once the apostrophe becomes a separator.

use crate::stemmer::stem;
use lazy_static::lazy_static;
use std::collections::HashSet;

const WORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "am", "an", "and", "any", "are",
    "aren't", "as", "at", "be", "because", "been", "before", "being", "below", "between", "both",
    "but", "by", "can", "can't", "cannot", "could", "couldn't", "did", "didn't", "do", "does",
    "doesn't", "doing", "don't", "down", "during", "each", "few", "for", "from", "further", "had",
    "hadn't", "has", "hasn't", "have", "haven't", "having", "he", "he'd", "he'll", "he's", "her",
    "here", "here's", "hers", "herself", "him", "himself", "his", "how", "how's", "i", "i'd",
    "i'll", "i'm", "i've", "if", "in", "into", "is", "isn't", "it", "it's", "its", "itself",
    "let's", "me", "more", "most", "mustn't", "my", "myself", "no", "nor", "not", "of", "off", "on",
    "once", "only", "or", "other", "ought", "our", "ours", "ourselves", "out", "over", "own",
    "same", "she", "she'd", "she'll", "she's", "should", "shouldn't", "so", "some", "such", "than",
    "that", "that's", "the", "their", "theirs", "them", "themselves", "then", "there", "there's",
    "these", "they", "they'd", "they'll", "they're", "they've", "this", "those", "through", "to",
    "too", "under", "until", "up", "very", "was", "wasn't", "we", "we'd", "we'll", "we're", "we've",
    "were", "weren't", "what", "what's", "when", "when's", "where", "where's", "which", "while",
    "who", "who's", "whom", "why", "why's", "with", "won't", "would", "wouldn't", "you", "you'd",
    "you'll", "you're", "you've", "your", "yours", "yourself", "yourselves",
];

lazy_static! {
    static ref STOPWORDS: HashSet<String> = {
        let mut set = HashSet::new();
        for word in WORDS {
            let fragments = word.split(|c: char| !c.is_ascii_alphanumeric());
            for fragment in fragments.filter(|f| !f.is_empty()) {
                set.insert(stem(fragment));
                set.insert(fragment.to_string());
            }
        }
        set
    };
}

pub fn is_stopword(word: &str) -> bool {
    if word.chars().any(char::is_uppercase) {
        STOPWORDS.contains(&word.to_lowercase())
    } else {
        STOPWORDS.contains(word)
    }
}

/// True when `word` carries content, i.e. is not a stopword.
pub fn is_content(word: &str) -> bool {
    !is_stopword(word)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn common_function_words_are_rejected() {
        for w in ["the", "on", "and", "of", "is", "THE"] {
            assert!(is_stopword(w), "{w}");
            assert!(!is_content(w), "{w}");
        }
    }

    #[test]
    fn stemmed_forms_are_rejected() {
        for w in ["does", "because", "only", "very", "having"] {
            assert!(is_stopword(&stem(w)), "{w}");
        }
    }

    #[test]
    fn contraction_fragments_are_rejected() {
        assert!(is_stopword("t"));
        assert!(is_stopword("ll"));
        assert!(is_stopword("doesn"));
    }

    #[test]
    fn content_words_pass() {
        for w in ["cat", "mat", "search", "index"] {
            assert!(is_content(w), "{w}");
        }
    }
}
