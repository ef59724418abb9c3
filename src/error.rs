// 🚨 Generator Errors
// Every variant is fatal: the run stops and no artifact is written

use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum GenError {
    /// Archive path is missing or unreadable
    #[error("{}: {source}", path.display())]
    ArchiveOpen {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Archive was readable but its content is not valid CLDR data
    #[error("{}: {reason}", path.display())]
    ArchiveDecode { path: PathBuf, reason: String },

    /// Generated file could not be rendered or written
    #[error("{}: {source}", path.display())]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl GenError {
    pub fn decode(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        GenError::ArchiveDecode {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

/// Result type for generator operations
pub type Result<T> = std::result::Result<T, GenError>;
