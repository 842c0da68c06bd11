//! Artifact persistence.
//!
//! A blob is a bincode payload followed by `[magic "TDX1"][CRC32 BE]`. Files
//! are written to a temp path and renamed into place; a failed write removes
//! its temp file and never leaves a truncated artifact behind.

use crate::error::{IndexError, Result};
use crate::index::IndexBlob;
use crate::{Document, TfIdfIndex};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs::{self, create_dir_all, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

const BLOB_MAGIC: &[u8; 4] = b"TDX1";
const FOOTER_LEN: usize = 8;

pub const FORMAT_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetaFile {
    pub num_docs: u32,
    pub vocabulary_size: usize,
    pub entries: usize,
    pub created_at: String,
    pub version: u32,
}

impl MetaFile {
    pub fn describe(index: &TfIdfIndex) -> Self {
        Self {
            num_docs: index.num_docs(),
            vocabulary_size: index.vocabulary().len(),
            entries: index.size(),
            created_at: time::OffsetDateTime::now_utc()
                .format(&time::format_description::well_known::Rfc3339)
                .unwrap_or_default(),
            version: FORMAT_VERSION,
        }
    }
}

pub fn to_blob<T: Serialize>(value: &T) -> Result<Vec<u8>> {
    let payload = bincode::serialize(value)?;
    let crc = crc32fast::hash(&payload);
    let mut blob = Vec::with_capacity(payload.len() + FOOTER_LEN);
    blob.extend_from_slice(&payload);
    blob.extend_from_slice(BLOB_MAGIC);
    blob.extend_from_slice(&crc.to_be_bytes());
    Ok(blob)
}

pub fn from_blob<T: DeserializeOwned>(blob: &[u8]) -> Result<T> {
    if blob.len() < FOOTER_LEN {
        return Err(IndexError::Corrupt(format!("blob of {} bytes has no footer", blob.len())));
    }
    let (payload, footer) = blob.split_at(blob.len() - FOOTER_LEN);
    if &footer[..4] != BLOB_MAGIC {
        return Err(IndexError::Corrupt("missing blob magic".into()));
    }
    let stored = u32::from_be_bytes([footer[4], footer[5], footer[6], footer[7]]);
    let computed = crc32fast::hash(payload);
    if stored != computed {
        return Err(IndexError::Corrupt(format!(
            "checksum mismatch: expected {stored:#010x}, got {computed:#010x}"
        )));
    }
    tracing::debug!(bytes = payload.len(), crc = %format!("{computed:#010x}"), "blob verified");
    Ok(bincode::deserialize(payload)?)
}

/// A fully written temp file waiting to be renamed over its target.
/// Dropping it without [`Staged::commit`] removes the temp file.
#[must_use]
pub struct Staged {
    tmp: PathBuf,
    target: PathBuf,
    committed: bool,
}

impl Staged {
    pub fn commit(mut self) -> Result<()> {
        fs::rename(&self.tmp, &self.target)?;
        self.committed = true;
        Ok(())
    }
}

impl Drop for Staged {
    fn drop(&mut self) {
        if !self.committed {
            let _ = fs::remove_file(&self.tmp);
        }
    }
}

fn stage(path: &Path, bytes: &[u8]) -> Result<Staged> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        create_dir_all(parent)?;
    }
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let staged = Staged { tmp: PathBuf::from(tmp), target: path.to_path_buf(), committed: false };
    let mut f = File::create(&staged.tmp)?;
    f.write_all(bytes)?;
    f.sync_all()?;
    Ok(staged)
}

fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    stage(path, bytes)?.commit()
}

fn read_all(path: &Path) -> Result<Vec<u8>> {
    let mut f = File::open(path)?;
    let mut buf = Vec::new();
    f.read_to_end(&mut buf)?;
    Ok(buf)
}

/// Decode an index blob, rebuilding the term lookup and validating its keys.
pub fn index_from_blob(blob: &[u8]) -> Result<TfIdfIndex> {
    let raw: IndexBlob = from_blob(blob)?;
    TfIdfIndex::try_from(raw)
}

pub fn stage_index<P: AsRef<Path>>(path: P, index: &TfIdfIndex) -> Result<Staged> {
    let blob = to_blob(index)?;
    let staged = stage(path.as_ref(), &blob)?;
    tracing::debug!(path = %path.as_ref().display(), bytes = blob.len(), "index staged");
    Ok(staged)
}

pub fn save_index<P: AsRef<Path>>(path: P, index: &TfIdfIndex) -> Result<()> {
    stage_index(path, index)?.commit()
}

pub fn load_index<P: AsRef<Path>>(path: P) -> Result<TfIdfIndex> {
    index_from_blob(&read_all(path.as_ref())?)
}

pub fn stage_documents<P: AsRef<Path>>(path: P, documents: &[Document]) -> Result<Staged> {
    let blob = to_blob(&documents)?;
    let staged = stage(path.as_ref(), &blob)?;
    tracing::debug!(path = %path.as_ref().display(), bytes = blob.len(), "documents staged");
    Ok(staged)
}

pub fn save_documents<P: AsRef<Path>>(path: P, documents: &[Document]) -> Result<()> {
    stage_documents(path, documents)?.commit()
}

pub fn load_documents<P: AsRef<Path>>(path: P) -> Result<Vec<Document>> {
    from_blob(&read_all(path.as_ref())?)
}

pub fn save_meta<P: AsRef<Path>>(path: P, meta: &MetaFile) -> Result<()> {
    let json = serde_json::to_string_pretty(meta)?;
    write_atomic(path.as_ref(), json.as_bytes())
}

pub fn load_meta<P: AsRef<Path>>(path: P) -> Result<MetaFile> {
    let mut f = File::open(path.as_ref())?;
    let mut buf = String::new();
    f.read_to_string(&mut buf)?;
    Ok(serde_json::from_str(&buf)?)
}
