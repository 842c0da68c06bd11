//! End-to-end indexing: tokenize (parallel) -> DF (barrier) -> weights -> persist.

use crate::error::{IndexError, Result};
use crate::frequency::{compute_df, DocumentFrequencies};
use crate::index::{idf, weigh};
use crate::persist::{save_meta, stage_documents, stage_index, MetaFile};
use crate::source::read_documents;
use crate::{Document, DocumentTerms, TfIdfIndex};
use rayon::prelude::*;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct IndexerConfig {
    pub source: PathBuf,
    pub text_column: String,
    pub index_output: PathBuf,
    pub documents_output: PathBuf,
    /// Optional JSON manifest describing the written index.
    pub meta_output: Option<PathBuf>,
}

impl IndexerConfig {
    pub fn new(
        source: impl Into<PathBuf>,
        text_column: impl Into<String>,
        index_output: impl Into<PathBuf>,
        documents_output: impl Into<PathBuf>,
    ) -> Self {
        Self {
            source: source.into(),
            text_column: text_column.into(),
            index_output: index_output.into(),
            documents_output: documents_output.into(),
            meta_output: None,
        }
    }

    pub fn with_meta(mut self, path: impl Into<PathBuf>) -> Self {
        self.meta_output = Some(path.into());
        self
    }
}

/// Map stage. Documents share no state, output keeps input order.
pub fn tokenize_documents(documents: &[Document]) -> Vec<DocumentTerms> {
    documents
        .par_iter()
        .map(|doc| DocumentTerms::new(doc.doc_id, doc.text.clone()).tokenized())
        .collect()
}

/// Weight stage. Per-document weights are computed in parallel against the
/// finished DF map, then a single writer inserts them in doc order so
/// vocabulary ids follow first-seen corpus order.
pub fn compute_weights(
    documents: &[DocumentTerms],
    df: DocumentFrequencies,
) -> Result<TfIdfIndex> {
    let num_docs = documents.len() as u32;
    let per_doc: Vec<Vec<(&str, f64)>> = documents
        .par_iter()
        .map(|doc| {
            doc.term_frequency()
                .iter()
                .map(|(term, &tf)| {
                    let df_t = df.get(term).copied().ok_or_else(|| {
                        IndexError::Corrupt(format!("no document frequency for '{term}'"))
                    })?;
                    Ok((term.as_str(), weigh(tf, idf(num_docs, df_t))))
                })
                .collect::<Result<Vec<_>>>()
        })
        .collect::<Result<Vec<_>>>()?;

    let mut index = TfIdfIndex::new(num_docs, df);
    for (doc, weights) in documents.iter().zip(per_doc) {
        for (term, weight) in weights {
            index.add(doc.doc_id, term, weight);
        }
    }
    Ok(index)
}

pub fn build_index(documents: &[Document]) -> Result<TfIdfIndex> {
    if documents.is_empty() {
        return Err(IndexError::EmptyCorpus);
    }
    if let Some((position, doc)) =
        documents.iter().enumerate().find(|(position, doc)| doc.doc_id as usize != *position)
    {
        return Err(IndexError::DocumentId { position, doc_id: doc.doc_id });
    }
    let terms = tokenize_documents(documents);
    tracing::info!(documents = terms.len(), "tokenization complete");

    let df = compute_df(&terms)?;
    tracing::info!(terms = df.len(), "DF complete");

    let index = compute_weights(&terms, df)?;
    tracing::info!(
        entries = index.size(),
        vocabulary = index.vocabulary().len(),
        "TF-IDF complete"
    );
    Ok(index)
}

/// Read `config.source`, build the index and write both artifacts. Both are
/// staged before either is renamed into place.
pub fn index_corpus(config: &IndexerConfig) -> Result<TfIdfIndex> {
    let documents = read_documents(&config.source, &config.text_column)?;
    let index = build_index(&documents)?;

    let index_file = stage_index(&config.index_output, &index)?;
    let documents_file = stage_documents(&config.documents_output, &documents)?;

    tracing::info!(path = %config.index_output.display(), "writing index");
    index_file.commit()?;
    tracing::info!(path = %config.documents_output.display(), "writing documents");
    documents_file.commit()?;

    if let Some(meta_path) = &config.meta_output {
        save_meta(meta_path, &MetaFile::describe(&index))?;
    }
    tracing::info!("indexing complete");
    Ok(index)
}
