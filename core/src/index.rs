//! The weighted-term index: vocabulary arena plus sparse (doc, term) weights.
//!
//! Weights use `idf = ln(N + 1/df + 1)`, not the textbook `ln(N / (df + 1))`.
//! Downstream scorers are calibrated against this form, keep it.

use crate::error::IndexError;
use crate::frequency::DocumentFrequencies;
use crate::round::round_half_up;
use crate::{DocId, TermId};
use serde::{Deserialize, Serialize};
use std::collections::{btree_map, BTreeMap, HashMap};

/// Decimal places kept for stored weights.
pub const WEIGHT_PRECISION: u32 = 4;

pub type WeightTable = BTreeMap<(DocId, TermId), f64>;

pub fn idf(num_docs: u32, df: f64) -> f64 {
    (num_docs as f64 + 1.0 / df + 1.0).ln()
}

pub fn weigh(tf: f64, idf: f64) -> f64 {
    round_half_up(tf * idf, WEIGHT_PRECISION)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightedEntry<'a> {
    pub term: &'a str,
    pub doc_id: DocId,
    pub weight: f64,
}

/// Serializes as [`IndexBlob`]; load it back through [`TfIdfIndex::try_from`],
/// which rebuilds the term lookup and validates every key.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TfIdfIndex {
    num_docs: u32,
    vocabulary: Vec<String>,
    document_frequencies: DocumentFrequencies,
    weights: WeightTable,
    #[serde(skip_serializing)]
    lookup: HashMap<String, TermId>,
}

/// On-disk shape of [`TfIdfIndex`].
#[derive(Debug, Serialize, Deserialize)]
pub struct IndexBlob {
    pub(crate) num_docs: u32,
    pub(crate) vocabulary: Vec<String>,
    pub(crate) document_frequencies: DocumentFrequencies,
    pub(crate) weights: WeightTable,
}

impl TryFrom<IndexBlob> for TfIdfIndex {
    type Error = IndexError;

    fn try_from(blob: IndexBlob) -> Result<Self, Self::Error> {
        let mut lookup = HashMap::with_capacity(blob.vocabulary.len());
        for (id, term) in blob.vocabulary.iter().enumerate() {
            if lookup.insert(term.clone(), id as TermId).is_some() {
                return Err(IndexError::Corrupt(format!("duplicate vocabulary term '{term}'")));
            }
        }
        let vocab_len = blob.vocabulary.len() as u64;
        if let Some(&(doc_id, term_id)) = blob
            .weights
            .keys()
            .find(|&&(doc_id, term_id)| doc_id >= blob.num_docs || term_id as u64 >= vocab_len)
        {
            return Err(IndexError::Corrupt(format!(
                "weight key ({doc_id}, {term_id}) outside {} documents / {vocab_len} terms",
                blob.num_docs
            )));
        }
        Ok(Self {
            num_docs: blob.num_docs,
            vocabulary: blob.vocabulary,
            document_frequencies: blob.document_frequencies,
            weights: blob.weights,
            lookup,
        })
    }
}

impl TfIdfIndex {
    pub fn new(num_docs: u32, document_frequencies: DocumentFrequencies) -> Self {
        Self {
            num_docs,
            vocabulary: Vec::new(),
            document_frequencies,
            weights: WeightTable::new(),
            lookup: HashMap::new(),
        }
    }

    /// Store `weight` for (`doc_id`, `term`), giving `term` the next vocabulary
    /// id if it has not been seen. Overwrites an existing weight for the same key.
    pub fn add(&mut self, doc_id: DocId, term: &str, weight: f64) {
        debug_assert!(
            doc_id < self.num_docs,
            "doc {doc_id} outside corpus of {}",
            self.num_docs
        );
        let term_id = match self.lookup.get(term) {
            Some(&id) => id,
            None => {
                let id = self.vocabulary.len() as TermId;
                self.vocabulary.push(term.to_string());
                self.lookup.insert(term.to_string(), id);
                id
            }
        };
        self.weights.insert((doc_id, term_id), weight);
    }

    pub fn index_of(&self, term: &str) -> Option<TermId> {
        self.lookup.get(term).copied()
    }

    /// Number of documents in the corpus.
    pub fn num_docs(&self) -> u32 {
        self.num_docs
    }

    /// Number of stored weights.
    pub fn size(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Document frequency of `term`, 0.0 when unseen.
    pub fn df(&self, term: &str) -> f64 {
        self.document_frequencies.get(term).copied().unwrap_or(0.0)
    }

    pub fn document_frequencies(&self) -> &DocumentFrequencies {
        &self.document_frequencies
    }

    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }

    pub fn weight(&self, doc_id: DocId, term: &str) -> Option<f64> {
        let term_id = self.index_of(term)?;
        self.weights.get(&(doc_id, term_id)).copied()
    }

    /// Every stored (term, doc, weight). Callers must not rely on the order.
    pub fn iter(&self) -> Entries<'_> {
        Entries { vocabulary: &self.vocabulary, inner: self.weights.iter() }
    }
}

pub struct Entries<'a> {
    vocabulary: &'a [String],
    inner: btree_map::Iter<'a, (DocId, TermId), f64>,
}

impl<'a> Iterator for Entries<'a> {
    type Item = WeightedEntry<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let (&(doc_id, term_id), &weight) = self.inner.next()?;
        let term = self.vocabulary.get(term_id as usize)?;
        Some(WeightedEntry { term, doc_id, weight })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.inner.size_hint().1)
    }
}

impl<'a> IntoIterator for &'a TfIdfIndex {
    type Item = WeightedEntry<'a>;
    type IntoIter = Entries<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TfIdfIndex {
        let df = [("cat".to_string(), 0.5), ("sat".to_string(), 1.0)].into_iter().collect();
        TfIdfIndex::new(2, df)
    }

    #[test]
    fn vocabulary_ids_are_first_seen_and_dense() {
        let mut index = sample();
        index.add(0, "sat", 0.4);
        index.add(0, "cat", 0.5);
        index.add(1, "sat", 0.4);
        assert_eq!(index.index_of("sat"), Some(0));
        assert_eq!(index.index_of("cat"), Some(1));
        assert_eq!(index.index_of("dog"), None);
        assert_eq!(index.vocabulary(), &["sat".to_string(), "cat".to_string()]);
        assert_eq!(index.size(), 3);
    }

    #[test]
    fn add_overwrites_same_key() {
        let mut index = sample();
        index.add(0, "cat", 0.1);
        index.add(0, "cat", 0.2);
        assert_eq!(index.size(), 1);
        assert_eq!(index.weight(0, "cat"), Some(0.2));
        assert_eq!(index.index_of("cat"), Some(0));
    }

    #[test]
    fn df_defaults_to_zero() {
        let index = sample();
        assert_eq!(index.df("cat"), 0.5);
        assert_eq!(index.df("unicorn"), 0.0);
    }

    #[test]
    fn idf_keeps_additive_form() {
        assert!((idf(2, 1.0) - 4f64.ln()).abs() < 1e-12);
        assert!((idf(2, 0.5) - 5f64.ln()).abs() < 1e-12);
    }

    #[test]
    fn weigh_rounds_to_four_places() {
        assert_eq!(weigh(0.3334, 4f64.ln()), 0.4622);
    }

    #[test]
    fn iter_yields_every_entry_once() {
        let mut index = sample();
        index.add(0, "cat", 0.5);
        index.add(0, "sat", 0.4);
        index.add(1, "sat", 0.3);
        let mut seen: Vec<(String, u32, f64)> =
            index.iter().map(|e| (e.term.to_string(), e.doc_id, e.weight)).collect();
        seen.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert_eq!(
            seen,
            vec![("cat".into(), 0, 0.5), ("sat".into(), 0, 0.4), ("sat".into(), 1, 0.3)]
        );
        assert_eq!((&index).into_iter().count(), index.size());
    }

    #[test]
    fn rejects_weights_for_unknown_terms() {
        let blob = IndexBlob {
            num_docs: 1,
            vocabulary: vec!["cat".into()],
            document_frequencies: DocumentFrequencies::new(),
            weights: [((0, 3), 0.1)].into_iter().collect(),
        };
        assert!(matches!(TfIdfIndex::try_from(blob), Err(IndexError::Corrupt(_))));
    }
}
