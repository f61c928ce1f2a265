//! Writing the document to disk for the offline generator.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use utoipa::openapi::OpenApi;

use super::{ContractError, ContractSummary, to_pretty_json};

#[derive(Debug, Error)]
pub enum ExportError {
    #[error(transparent)]
    Contract(#[from] ContractError),

    #[error("failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Serializes `doc` to `path`, creating missing parent directories.
pub fn write_document(path: &Path, doc: &OpenApi) -> Result<ContractSummary, ExportError> {
    let json = to_pretty_json(doc)?;

    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).map_err(|source| ExportError::CreateDir {
            path: dir.to_path_buf(),
            source,
        })?;
    }
    fs::write(path, json).map_err(|source| ExportError::Write {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::debug!(path = %path.display(), "contract document written");
    Ok(ContractSummary::scan(doc))
}
