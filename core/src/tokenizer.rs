use crate::round::round_up;
use crate::stemmer::stem;
use crate::stopwords::is_content;
use crate::DocId;
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::{BTreeMap, HashMap};

lazy_static! {
    static ref NON_TERM: Regex = Regex::new(r"[^a-z0-9 ]").expect("valid regex");
}

/// Decimal places kept for term frequencies.
pub const TF_PRECISION: u32 = 4;

pub type TermCounts = HashMap<String, u32>;
pub type TermFrequencies = BTreeMap<String, f64>;

fn for_each_term(line: &str, f: impl FnMut(String)) {
    let lowered = line.to_lowercase();
    let cleaned = NON_TERM.replace_all(&lowered, " ");
    cleaned.split_whitespace().map(stem).filter(|term| is_content(term)).for_each(f);
}

/// Lowercase, blank out everything outside `[a-z0-9 ]`, split, stem, drop stopwords.
pub fn line_terms(line: &str) -> Vec<String> {
    let mut terms = Vec::new();
    for_each_term(line, |term| terms.push(term));
    terms
}

pub fn count_line(line: &str) -> TermCounts {
    let mut counts = TermCounts::new();
    for_each_term(line, |term| *counts.entry(term).or_insert(0) += 1);
    counts
}

/// Sum two partial counts. Associative and commutative, so per-line counts
/// may be folded in any grouping or order.
pub fn merge_counts(mut left: TermCounts, right: TermCounts) -> TermCounts {
    if left.len() < right.len() {
        return merge_counts(right, left);
    }
    for (term, count) in right {
        *left.entry(term).or_insert(0) += count;
    }
    left
}

/// tf(t, d) = count of t in d / number of distinct terms in d, ceiled to 4 places.
pub fn term_frequencies(counts: &TermCounts) -> TermFrequencies {
    let distinct = counts.len() as f64;
    counts
        .iter()
        .map(|(term, &count)| (term.clone(), round_up(count as f64 / distinct, TF_PRECISION)))
        .collect()
}

pub fn tokenize<S: AsRef<str>>(lines: &[S]) -> TermFrequencies {
    let counts = lines
        .iter()
        .map(|line| count_line(line.as_ref()))
        .fold(TermCounts::new(), merge_counts);
    term_frequencies(&counts)
}

/// A document together with its term frequencies.
#[derive(Debug, Clone)]
pub struct DocumentTerms {
    pub doc_id: DocId,
    pub text: String,
    term_frequency: TermFrequencies,
}

impl DocumentTerms {
    pub fn new(doc_id: DocId, text: impl Into<String>) -> Self {
        Self { doc_id, text: text.into(), term_frequency: TermFrequencies::new() }
    }

    /// Build the term frequencies. A second call on a populated document is a no-op.
    pub fn tokenize(&mut self) {
        if !self.term_frequency.is_empty() {
            tracing::warn!(doc_id = self.doc_id, "document already tokenized, skipping");
            return;
        }
        let lines: Vec<&str> = self.text.lines().collect();
        self.term_frequency = tokenize(&lines);
    }

    pub fn tokenized(mut self) -> Self {
        self.tokenize();
        self
    }

    pub fn term_frequency(&self) -> &TermFrequencies {
        &self.term_frequency
    }

    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.term_frequency.keys().map(String::as_str)
    }

    pub fn contains(&self, term: &str) -> bool {
        self.term_frequency.contains_key(term)
    }

    pub fn tf(&self, term: &str) -> f64 {
        self.term_frequency.get(term).copied().unwrap_or(0.0)
    }
}
