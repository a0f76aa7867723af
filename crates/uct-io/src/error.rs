use std::path::PathBuf;

use thiserror::Error;

use uct_core::CoreError;

/// Errors raised while reading or writing the problem's files.
#[derive(Debug, Error)]
pub enum IoError {
    /// A required input file is absent. The role names what the file is for.
    #[error("the {role} does not exist; the provided path is {path}")]
    MissingRequiredFile { role: &'static str, path: PathBuf },

    #[error("reading {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("{path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A cell failed to decode, with enough context to find it.
    #[error("in {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("in {path}: required column {column} is missing")]
    MissingColumn { path: PathBuf, column: String },

    #[error(transparent)]
    Core(#[from] CoreError),
}

impl IoError {
    pub(crate) fn parse(path: &std::path::Path, message: impl Into<String>) -> Self {
        IoError::Parse {
            path: path.to_path_buf(),
            message: message.into(),
        }
    }

    pub(crate) fn csv(path: &std::path::Path, source: csv::Error) -> Self {
        IoError::Csv {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        IoError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}
