use super::FailureKind;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("Script directory not found: {}", .dir.display())]
    Missing { dir: PathBuf },
    #[error("Unable to read script directory {}: {source}", .dir.display())]
    Unreadable {
        dir: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl DiscoveryError {
    pub fn from_io(dir: &Path, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            DiscoveryError::Missing {
                dir: dir.to_path_buf(),
            }
        } else {
            DiscoveryError::Unreadable {
                dir: dir.to_path_buf(),
                source,
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum LaunchFailure {
    #[error("Script not found: {}", .path.display())]
    NotFound { path: PathBuf },
    #[error("Script not executable: {}", .path.display())]
    NotExecutable { path: PathBuf },
    #[error(
        "OS error: {source}\nCheck if {} has a valid shebang and is executable.",
        .path.display()
    )]
    Other {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl LaunchFailure {
    pub fn classify(path: &Path, source: io::Error) -> Self {
        let path = path.to_path_buf();
        match source.kind() {
            io::ErrorKind::NotFound => LaunchFailure::NotFound { path },
            io::ErrorKind::PermissionDenied => LaunchFailure::NotExecutable { path },
            _ => LaunchFailure::Other { path, source },
        }
    }

    pub fn kind(&self) -> FailureKind {
        match self {
            LaunchFailure::NotFound { .. } => FailureKind::NotFound,
            LaunchFailure::NotExecutable { .. } => FailureKind::NotExecutable,
            LaunchFailure::Other { .. } => FailureKind::LaunchError,
        }
    }
}
