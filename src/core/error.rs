//! Error type for listing failures.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FacadError {
    #[error("{}: No such file or directory", .0.display())]
    NotFound(PathBuf),

    #[error("cannot open directory {}: Permission denied", .0.display())]
    AccessDenied(PathBuf),

    #[error("cannot open directory {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error("{0}: no matches found")]
    NoMatches(String),

    #[error("nothing to list")]
    NoTargets,

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl FacadError {
    /// Maps a failure to open `path` onto the matching variant.
    pub fn open(path: &Path, err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => FacadError::NotFound(path.to_path_buf()),
            io::ErrorKind::PermissionDenied => FacadError::AccessDenied(path.to_path_buf()),
            _ => FacadError::Open {
                path: path.to_path_buf(),
                source: err,
            },
        }
    }
}
