//! Error types
//!
//! Defines the error kinds surfaced by disk operations.

use std::fmt;
use std::io;

/// Virtual disk errors
#[derive(Debug)]
pub enum DiskError {
    /// Failure from an underlying filesystem primitive, passed through unchanged
    IoError(io::Error),
    InvalidPath(String),
    NotADirectory(String),
    MalformedName(String),
    NotFound(String),
    SelfContainment {
        src: String,
        dst: String,
    },
    DepthExceeded {
        path: String,
        depth: usize,
        max: usize,
    },
    InvalidInput(String),
    /// Carries the display name of the entry already occupying the target
    NameCollision(String),
}

impl fmt::Display for DiskError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiskError::IoError(e) => write!(f, "IO error: {}", e),
            DiskError::InvalidPath(p) => write!(f, "Invalid path: {}", p),
            DiskError::NotADirectory(p) => write!(f, "Not a directory: {}", p),
            DiskError::MalformedName(n) => write!(f, "Malformed file name: {}", n),
            DiskError::NotFound(p) => write!(f, "No such file or directory: {}", p),
            DiskError::SelfContainment { src, dst } => write!(
                f,
                "Destination {} cannot be the source {} or one of its subdirectories",
                dst, src
            ),
            DiskError::DepthExceeded { path, depth, max } => write!(
                f,
                "Directory depth {} of {} exceeds the maximum of {}",
                depth, path, max
            ),
            DiskError::InvalidInput(s) => write!(f, "Invalid input: {}", s),
            DiskError::NameCollision(n) => write!(f, "An entry named {} already exists", n),
        }
    }
}

impl std::error::Error for DiskError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DiskError::IoError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for DiskError {
    fn from(error: io::Error) -> Self {
        DiskError::IoError(error)
    }
}
