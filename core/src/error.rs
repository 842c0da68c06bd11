use thiserror::Error;

pub type Result<T> = std::result::Result<T, IndexError>;

#[derive(Debug, Error)]
pub enum IndexError {
    #[error("failed to read source: {0}")]
    Source(#[from] csv::Error),

    #[error("column '{column}' not present in source header")]
    MissingColumn { column: String },

    #[error("row {row} has no value for column '{column}'")]
    MissingField { row: usize, column: String },

    #[error("document at position {position} has id {doc_id}; ids must be 0-based positions")]
    DocumentId { position: usize, doc_id: u32 },

    #[error("empty corpus: at least one document is required to compute document frequencies")]
    EmptyCorpus,

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("encoding error: {0}")]
    Codec(#[from] bincode::Error),

    #[error("corrupt artifact: {0}")]
    Corrupt(String),

    #[error("manifest error: {0}")]
    Meta(#[from] serde_json::Error),
}
