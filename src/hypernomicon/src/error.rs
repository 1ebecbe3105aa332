use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("input file not found: {}", path.display())]
    InputNotFound { path: PathBuf },
    #[error("unable to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed XML in {}: {source}", path.display())]
    MalformedInput {
        path: PathBuf,
        #[source]
        source: roxmltree::Error,
    },
    #[error("unable to write {}: {source}", path.display())]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Serialize(#[from] serde_json::Error),
}

impl ConvertError {
    pub fn output_write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConvertError::OutputWrite {
            path: path.into(),
            source,
        }
    }
}

pub type ConvertResult<T> = Result<T, ConvertError>;
