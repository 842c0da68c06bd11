use serde::{Deserialize, Serialize};

pub mod error;
pub mod frequency;
pub mod index;
pub mod persist;
pub mod pipeline;
pub mod round;
pub mod source;
pub mod stemmer;
pub mod stopwords;
pub mod tokenizer;

pub use error::{IndexError, Result};
pub use index::{TfIdfIndex, WeightedEntry};
pub use pipeline::{build_index, index_corpus, IndexerConfig};
pub use tokenizer::DocumentTerms;

pub type TermId = u32;
pub type DocId = u32;

/// One row of the corpus. `doc_id` is the 0-based position of the row in the input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub doc_id: DocId,
    pub text: String,
}

impl Document {
    pub fn new(doc_id: DocId, text: impl Into<String>) -> Self {
        Self { doc_id, text: text.into() }
    }
}
