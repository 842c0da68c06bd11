//! Tabular corpus input: a CSV file with a header row, one document per data row.

use crate::error::{IndexError, Result};
use crate::{DocId, Document};
use std::io::Read;
use std::path::Path;

pub fn read_documents<P: AsRef<Path>>(path: P, column: &str) -> Result<Vec<Document>> {
    let path = path.as_ref();
    tracing::info!(path = %path.display(), "opening source for reading");
    let reader = csv::ReaderBuilder::new().has_headers(true).flexible(true).from_path(path)?;
    collect_documents(reader, column)
}

pub fn read_documents_from<R: Read>(input: R, column: &str) -> Result<Vec<Document>> {
    let reader = csv::ReaderBuilder::new().has_headers(true).flexible(true).from_reader(input);
    collect_documents(reader, column)
}

fn collect_documents<R: Read>(mut reader: csv::Reader<R>, column: &str) -> Result<Vec<Document>> {
    let position = reader
        .headers()?
        .iter()
        .position(|h| h == column)
        .ok_or_else(|| IndexError::MissingColumn { column: column.to_string() })?;

    let mut documents = Vec::new();
    for (row, record) in reader.records().enumerate() {
        let record = record?;
        let text = record
            .get(position)
            .ok_or_else(|| IndexError::MissingField { row, column: column.to_string() })?;
        documents.push(Document::new(row as DocId, text));
    }
    tracing::info!(documents = documents.len(), column, "source read");
    Ok(documents)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_become_sequential_documents() {
        let csv = "id,reviews.text\n7,first review\n9,\"second, with comma\"\n";
        let docs = read_documents_from(csv.as_bytes(), "reviews.text").unwrap();
        assert_eq!(
            docs,
            vec![Document::new(0, "first review"), Document::new(1, "second, with comma")]
        );
    }

    #[test]
    fn unknown_column_fails() {
        let err = read_documents_from("a,b\n1,2\n".as_bytes(), "text").unwrap_err();
        assert!(matches!(err, IndexError::MissingColumn { .. }));
    }

    #[test]
    fn short_row_fails_with_its_position() {
        let err = read_documents_from("id,text\n1,ok\n2\n".as_bytes(), "text").unwrap_err();
        assert!(matches!(err, IndexError::MissingField { row: 1, .. }));
    }

    #[test]
    fn missing_file_is_a_source_error() {
        let err = read_documents("/nonexistent/corpus.csv", "text").unwrap_err();
        assert!(matches!(err, IndexError::Source(_)));
    }
}
