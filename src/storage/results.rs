//! Storage result types
//!
//! Defines result structures returned by disk operations.

use std::time::{SystemTime, UNIX_EPOCH};

use crate::storage::disk::EntryType;
use crate::storage::paths::LogicalPath;

/// One entity whose logical location changed or disappeared.
///
/// Paths are relative to the disk root and use physical (encoded) names, the
/// form the external metadata index matches on. `dst` is empty for removals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectedFile {
    pub src: String,
    pub dst: String,
}

impl EffectedFile {
    pub fn moved(src: &LogicalPath, dst: &LogicalPath) -> Self {
        Self {
            src: src.to_string(),
            dst: dst.to_string(),
        }
    }

    pub fn removed(src: &LogicalPath) -> Self {
        Self {
            src: src.to_string(),
            dst: String::new(),
        }
    }

    pub fn is_removal(&self) -> bool {
        self.dst.is_empty()
    }
}

/// One immediate child of a listed directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryEntry {
    pub entry_type: EntryType,
    pub path: String,
    pub last_modified: SystemTime,
}

impl DirectoryEntry {
    /// Modification time as seconds since the Unix epoch
    pub fn modified_secs(&self) -> u64 {
        self.last_modified
            .duration_since(UNIX_EPOCH)
            .map(|dur| dur.as_secs())
            .unwrap_or(0)
    }
}

/// Result of a delete operation
#[derive(Debug, Clone, Default)]
pub struct DeleteResult {
    /// Empty for private disks
    pub effected_files: Vec<EffectedFile>,
    pub file_ids: Vec<String>,
}

/// Result of a copy operation
#[derive(Debug, Clone, Default)]
pub struct CopyResult {
    pub file_ids: Vec<String>,
}

/// Result of a rename operation
#[derive(Debug, Clone, Default)]
pub struct RenameResult {
    pub effected_files: Vec<EffectedFile>,
}

/// Result of a move operation
#[derive(Debug, Clone, Default)]
pub struct MoveResult {
    pub effected_files: Vec<EffectedFile>,
}
