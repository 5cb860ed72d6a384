//! Document adapters: read config files, split multi-document content, decode each part.
//!
//! This crate is allowed to do filesystem IO. Decoded parts are opaque values; no schema
//! validation happens here.

#![forbid(unsafe_code)]

mod decode;
mod split;

use camino::{Utf8Path, Utf8PathBuf};
use ccheck_domain::{DocumentPart, FileError};
use ccheck_types::ids;
use rayon::prelude::*;
use thiserror::Error;
use tracing::{debug, warn};

pub use decode::{DocumentFormat, decode_part};
pub use split::{DOCUMENT_SEPARATOR, split_documents};

/// Fuzz-friendly API for testing splitting and decoding without filesystem access.
/// These functions are designed to never panic on any input.
pub mod fuzz {
    use super::*;

    /// Split and decode arbitrary bytes as a YAML/JSON file.
    ///
    /// Returns the number of decoded parts. **Never panics** on any input.
    pub fn split_and_decode(data: &[u8]) -> Result<usize, LoadError> {
        let path = Utf8Path::new("fuzz.yaml");
        decode_all(path, DocumentFormat::Yaml, data).map(|parts| parts.len())
    }
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("unable to open file {path}: {source}")]
    Read {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unsupported format {extension:?} for file {path}")]
    UnsupportedFormat { path: Utf8PathBuf, extension: String },

    #[error("unable to parse {path} (part {part}): {message}")]
    Decode {
        path: Utf8PathBuf,
        part: usize,
        message: String,
    },
}

impl LoadError {
    pub fn path(&self) -> &Utf8Path {
        match self {
            LoadError::Read { path, .. }
            | LoadError::UnsupportedFormat { path, .. }
            | LoadError::Decode { path, .. } => path,
        }
    }

    /// Convert into the file-scoped domain error recorded in the file's result.
    pub fn into_file_error(self) -> FileError {
        let (kind, part) = match &self {
            LoadError::Read { .. } => (ids::ERROR_FILE_ACCESS, None),
            LoadError::UnsupportedFormat { .. } => (ids::ERROR_UNSUPPORTED_FORMAT, None),
            LoadError::Decode { part, .. } => (ids::ERROR_DECODE, Some(*part)),
        };
        FileError::Load {
            kind,
            message: self.to_string(),
            part,
        }
    }
}

/// A config file split into decoded parts, in source order.
#[derive(Clone, Debug, PartialEq)]
pub struct LoadedFile {
    pub path: Utf8PathBuf,
    pub format: DocumentFormat,
    pub parts: Vec<DocumentPart>,
}

/// Read, split, and decode one file.
///
/// Order of failure: unreadable file, then unsupported extension, then the first part
/// that fails to decode.
pub fn load_file(path: &Utf8Path) -> Result<LoadedFile, LoadError> {
    let data = std::fs::read(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let format = DocumentFormat::from_path(path).ok_or_else(|| LoadError::UnsupportedFormat {
        path: path.to_path_buf(),
        extension: path.extension().unwrap_or_default().to_string(),
    })?;

    let parts = decode_all(path, format, &data)?;
    debug!(path = %path, parts = parts.len(), ?format, "loaded config file");

    Ok(LoadedFile {
        path: path.to_path_buf(),
        format,
        parts,
    })
}

/// Load many files in parallel. Output order matches input order; one failure does
/// not affect the other files.
pub fn load_files(paths: &[Utf8PathBuf]) -> Vec<Result<LoadedFile, LoadError>> {
    paths.par_iter().map(|p| load_file(p)).collect()
}

fn decode_all(
    path: &Utf8Path,
    format: DocumentFormat,
    data: &[u8],
) -> Result<Vec<DocumentPart>, LoadError> {
    split_documents(data)
        .into_iter()
        .enumerate()
        .map(|(index, segment)| {
            decode_part(format, segment)
                .inspect(|value| {
                    if value.is_null() {
                        warn!(path = %path, part = index, "document part is empty");
                    }
                })
                .map(|value| DocumentPart::new(index, value))
                .map_err(|message| LoadError::Decode {
                    path: path.to_path_buf(),
                    part: index,
                    message,
                })
        })
        .collect()
}
