//! File system operations
//!
//! Thin wrappers over the primitives the disk layer delegates to: create,
//! copy, move, delete and recursive enumeration. Failures are returned as-is;
//! nothing here retries or rolls back.

use std::fs::{self, OpenOptions};
use std::io::Result;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// Create a directory and any missing parents
pub fn create_directory(path: &Path) -> Result<()> {
    fs::create_dir_all(path)
}

/// Create an empty file, creating missing parents. Never truncates.
pub fn create_file(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    OpenOptions::new().write(true).create_new(true).open(path)?;
    Ok(())
}

/// Check if anything exists at the path
pub fn path_exists(path: &Path) -> bool {
    path.symlink_metadata().is_ok()
}

/// Check if file exists
pub fn file_exists(path: &Path) -> bool {
    path.exists() && path.is_file()
}

/// Check if directory exists
pub fn directory_exists(path: &Path) -> bool {
    path.exists() && path.is_dir()
}

/// A directory that is not reached through a symlink. A link to a directory
/// is treated as a single leaf.
pub fn real_directory_exists(path: &Path) -> bool {
    path.symlink_metadata()
        .map(|metadata| metadata.is_dir())
        .unwrap_or(false)
}

/// Every entry below `path`, parents before children, siblings by name.
/// `path` itself is not included.
pub fn descendants(path: &Path) -> Result<Vec<PathBuf>> {
    let mut found = Vec::new();

    for entry in WalkDir::new(path).min_depth(1).sort_by_file_name() {
        found.push(entry?.into_path());
    }

    Ok(found)
}

/// Regular files at or below `path`
pub fn leaf_files(path: &Path) -> Result<Vec<PathBuf>> {
    if !real_directory_exists(path) {
        return Ok(vec![path.to_path_buf()]);
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(path).min_depth(1).sort_by_file_name() {
        let entry = entry?;
        if entry.file_type().is_file() {
            files.push(entry.into_path());
        }
    }

    Ok(files)
}

/// Levels `path` adds below its new parent: 1 for a file, otherwise 1 plus
/// the deepest entry of any kind below it.
pub fn subtree_height(path: &Path) -> Result<usize> {
    if !real_directory_exists(path) {
        return Ok(1);
    }

    let mut deepest = 0;
    for entry in WalkDir::new(path) {
        deepest = deepest.max(entry?.depth() + 1);
    }

    Ok(deepest)
}

/// Copies `src` to `dst` recursively and returns the destination path of every
/// copied regular file.
pub fn copy_recursive(src: &Path, dst: &Path) -> Result<Vec<PathBuf>> {
    if !real_directory_exists(src) {
        fs::copy(src, dst)?;
        return Ok(vec![dst.to_path_buf()]);
    }

    let mut copied = Vec::new();
    fs::create_dir(dst)?;

    for entry in WalkDir::new(src).min_depth(1).sort_by_file_name() {
        let entry = entry?;
        let relative = entry
            .path()
            .strip_prefix(src)
            .map_err(std::io::Error::other)?;
        let target = dst.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            fs::copy(entry.path(), &target)?;
            copied.push(target);
        }
    }

    Ok(copied)
}

/// Move an entry with a single rename
pub fn move_entry(src: &Path, dst: &Path) -> Result<()> {
    fs::rename(src, dst)
}

/// Delete a file or a whole directory tree
pub fn remove_entry(path: &Path) -> Result<()> {
    if real_directory_exists(path) {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    }
}
