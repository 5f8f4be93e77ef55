//! Directory listing

use std::cmp::Ordering;
use std::fs;

use log::info;

use crate::error::DiskError;
use crate::storage::disk::{Disk, EntryType};
use crate::storage::filesystem;
use crate::storage::paths::{LogicalPath, PathResolver};
use crate::storage::results::DirectoryEntry;

#[derive(Debug, Clone)]
pub struct DirectoryLister {
    resolver: PathResolver,
}

impl DirectoryLister {
    pub fn new(resolver: PathResolver) -> Self {
        Self { resolver }
    }

    /// Lists the immediate children of `dir`.
    ///
    /// The disk root is created on first access.
    pub fn list(&self, disk: &Disk, dir: &LogicalPath) -> Result<Vec<DirectoryEntry>, DiskError> {
        let real_path = self.resolver.resolve(disk, dir);

        if dir.is_root() && !filesystem::path_exists(&real_path) {
            filesystem::create_directory(&real_path)?;
            info!("Created root of disk {} (real: {})", disk, real_path.display());
        }

        if !filesystem::directory_exists(&real_path) {
            return Err(DiskError::NotADirectory(dir.to_string()));
        }

        let mut entries = Vec::new();
        for entry in fs::read_dir(&real_path)? {
            let entry = entry?;
            let metadata = entry.metadata()?;
            let name = entry.file_name().to_string_lossy().to_string();

            let entry_type = if metadata.is_dir() {
                EntryType::Directory
            } else {
                EntryType::File
            };

            entries.push(DirectoryEntry {
                entry_type,
                path: dir.child(&name).to_string(),
                last_modified: metadata.modified()?,
            });
        }

        sort_entries(&mut entries);

        info!(
            "Listed directory {} on disk {} (real: {}) - {} entries",
            dir,
            disk,
            real_path.display(),
            entries.len()
        );

        Ok(entries)
    }
}

/// Directories first, then most recently modified first. Ties keep their
/// enumeration order.
pub fn sort_entries(entries: &mut [DirectoryEntry]) {
    entries.sort_by(|a, b| match (a.entry_type, b.entry_type) {
        (EntryType::Directory, EntryType::File) => Ordering::Less,
        (EntryType::File, EntryType::Directory) => Ordering::Greater,
        _ => b.last_modified.cmp(&a.last_modified),
    });
}
