use std::{
    io,
    path::{Path, PathBuf},
};

use thiserror::Error;

/// A root or destination path handed in by the caller is unusable.
///
/// Always fatal to the call that received it. Problems with individual
/// entries below a valid root never surface as a `PathError`.
#[derive(Debug, Error)]
pub enum PathError {
    #[error("path does not exist: {}", .0.display())]
    NotFound(PathBuf),

    #[error("path is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("cannot access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl PathError {
    pub fn path(&self) -> &Path {
        match self {
            PathError::NotFound(p) | PathError::NotADirectory(p) => p,
            PathError::Io { path, .. } => path,
        }
    }
}

/// Check that `path` names an existing directory and return its canonical,
/// absolute form.
pub(crate) fn require_dir(path: &Path) -> Result<PathBuf, PathError> {
    let meta = match std::fs::metadata(path) {
        Ok(m) => m,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(PathError::NotFound(path.to_path_buf()));
        }
        Err(source) => {
            return Err(PathError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    if !meta.is_dir() {
        return Err(PathError::NotADirectory(path.to_path_buf()));
    }

    path.canonicalize().map_err(|source| PathError::Io {
        path: path.to_path_buf(),
        source,
    })
}
