use crate::error::{IndexError, Result};
use crate::tokenizer::DocumentTerms;
use std::collections::BTreeMap;

pub type DocumentFrequencies = BTreeMap<String, f64>;

/// df(t) = |{d : t in d}| / N over the whole corpus.
///
/// Must only run once every document has been tokenized.
pub fn compute_df(documents: &[DocumentTerms]) -> Result<DocumentFrequencies> {
    if documents.is_empty() {
        return Err(IndexError::EmptyCorpus);
    }
    let mut containing: BTreeMap<&str, u32> = BTreeMap::new();
    for doc in documents {
        for term in doc.terms() {
            *containing.entry(term).or_insert(0) += 1;
        }
    }
    let n = documents.len() as f64;
    Ok(containing
        .into_iter()
        .map(|(term, count)| (term.to_string(), count as f64 / n))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn docs(texts: &[&str]) -> Vec<DocumentTerms> {
        texts
            .iter()
            .enumerate()
            .map(|(i, t)| DocumentTerms::new(i as u32, *t).tokenized())
            .collect()
    }

    #[test]
    fn fraction_of_documents() {
        let df = compute_df(&docs(&["the cat sat on the mat", "the dog sat on the log"])).unwrap();
        assert_eq!(df["sat"], 1.0);
        assert_eq!(df["cat"], 0.5);
        assert_eq!(df["log"], 0.5);
        assert!(!df.contains_key("the"));
    }

    #[test]
    fn repeated_term_counts_once_per_document() {
        let df = compute_df(&docs(&["cat cat cat", "dog", "mat", "log"])).unwrap();
        assert_eq!(df["cat"], 0.25);
    }

    #[test]
    fn values_in_unit_interval() {
        let df = compute_df(&docs(&["alpha beta", "beta gamma", "gamma delta alpha"])).unwrap();
        assert!(df.values().all(|&v| v > 0.0 && v <= 1.0));
    }

    #[test]
    fn empty_corpus_is_an_error() {
        assert!(matches!(compute_df(&[]), Err(IndexError::EmptyCorpus)));
    }
}
