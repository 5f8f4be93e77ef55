//! Storage operations
//!
//! The operations exposed to callers: create, list, delete, copy, rename and
//! move. Each one validates first, computes effected paths against the
//! untouched tree, then hands the mutation to the filesystem.

use log::{info, warn};
use std::path::PathBuf;

use crate::config::DiskConfig;
use crate::error::DiskError;
use crate::storage::disk::{Disk, RenameRequest};
use crate::storage::filesystem;
use crate::storage::listing::DirectoryLister;
use crate::storage::naming;
use crate::storage::paths::{LogicalPath, PathResolver};
use crate::storage::propagation::ChangePropagator;
use crate::storage::results::{CopyResult, DeleteResult, DirectoryEntry, MoveResult, RenameResult};
use crate::storage::validation::Validator;

/// All disks under one storage root
#[derive(Debug, Clone)]
pub struct DiskStorage {
    resolver: PathResolver,
    validator: Validator,
    propagator: ChangePropagator,
    lister: DirectoryLister,
}

impl DiskStorage {
    pub fn new(config: &DiskConfig) -> Self {
        let resolver = PathResolver::new(config);

        Self {
            validator: Validator::new(resolver.clone()),
            propagator: ChangePropagator::new(resolver.clone()),
            lister: DirectoryLister::new(resolver.clone()),
            resolver,
        }
    }

    /// Creates a directory, including missing parents
    pub fn new_dir(&self, disk: &Disk, path: &str) -> Result<(), DiskError> {
        let path = LogicalPath::parse(path)?;
        self.resolver.validate_depth(&path)?;

        let real_path = self.resolver.resolve(disk, &path);
        self.validator.check_name_collision(&real_path)?;

        filesystem::create_directory(&real_path)?;
        info!(
            "Created directory {} on disk {} (real: {})",
            path,
            disk,
            real_path.display()
        );
        Ok(())
    }

    /// Creates an empty file. `path` carries the physical (encoded) name.
    pub fn new_file(&self, disk: &Disk, path: &str) -> Result<(), DiskError> {
        let path = LogicalPath::parse(path)?;
        self.resolver.validate_depth(&path)?;

        let real_path = self.resolver.resolve(disk, &path);
        self.validator.check_name_collision(&real_path)?;

        filesystem::create_file(&real_path)?;
        info!(
            "Created file {} on disk {} (real: {})",
            path,
            disk,
            real_path.display()
        );
        Ok(())
    }

    pub fn list_dir(&self, disk: &Disk, path: &str) -> Result<Vec<DirectoryEntry>, DiskError> {
        let path = LogicalPath::parse(path)?;
        self.lister.list(disk, &path)
    }

    /// Deletes a file or directory tree.
    ///
    /// Effected files are only reported for shared disks. Removed files whose
    /// names do not decode are left out of `file_ids`.
    pub fn delete(&self, disk: &Disk, path: &str) -> Result<DeleteResult, DiskError> {
        let path = LogicalPath::parse(path)?;
        if path.is_root() {
            return Err(DiskError::InvalidPath("the disk root cannot be deleted".into()));
        }

        let real_path = self.resolver.resolve(disk, &path);
        if !filesystem::path_exists(&real_path) {
            return Err(DiskError::NotFound(path.to_string()));
        }

        let removed_files = filesystem::leaf_files(&real_path)?;
        let effected_files = if disk.kind.reports_deletions() {
            self.propagator.for_delete(disk, &path)?
        } else {
            Vec::new()
        };

        filesystem::remove_entry(&real_path)?;

        let file_ids = collect_file_ids(&removed_files);
        info!(
            "Deleted {} on disk {} (real: {}) - {} files, {} effected",
            path,
            disk,
            real_path.display(),
            file_ids.len(),
            effected_files.len()
        );

        Ok(DeleteResult {
            effected_files,
            file_ids,
        })
    }

    /// Copies `src` into the directory `dst`
    pub fn copy(&self, disk: &Disk, src: &str, dst: &str) -> Result<CopyResult, DiskError> {
        let src = LogicalPath::parse(src)?;
        let dst = LogicalPath::parse(dst)?;
        let target = self.validator.check_copy_move(disk, &src, &dst)?;

        let src_path = self.resolver.resolve(disk, &src);
        let target_path = self.resolver.resolve(disk, &target);
        let copied = filesystem::copy_recursive(&src_path, &target_path)?;

        let file_ids = collect_file_ids(&copied);
        info!(
            "Copied {} to {} on disk {} - {} files",
            src,
            target,
            disk,
            file_ids.len()
        );

        Ok(CopyResult { file_ids })
    }

    /// Renames an entry inside its parent directory
    pub fn rename(&self, disk: &Disk, request: &RenameRequest) -> Result<RenameResult, DiskError> {
        let src = request.source_path()?;
        let dst = request.target_path()?;

        let src_path = self.resolver.resolve(disk, &src);
        let dst_path = self.resolver.resolve(disk, &dst);

        if !filesystem::path_exists(&src_path) {
            return Err(DiskError::NotFound(src.to_string()));
        }
        self.validator.check_name_collision(&dst_path)?;

        let effected_files = self.propagator.for_rename(disk, request)?;
        filesystem::move_entry(&src_path, &dst_path)?;

        info!(
            "Renamed {} to {} on disk {} - {} effected",
            src,
            dst,
            disk,
            effected_files.len()
        );

        Ok(RenameResult { effected_files })
    }

    /// Moves `src` into the directory `dst`
    pub fn move_entry(&self, disk: &Disk, src: &str, dst: &str) -> Result<MoveResult, DiskError> {
        let src = LogicalPath::parse(src)?;
        let dst = LogicalPath::parse(dst)?;
        let target = self.validator.check_copy_move(disk, &src, &dst)?;

        let effected_files = self.propagator.for_move(disk, &src, &dst)?;

        let src_path = self.resolver.resolve(disk, &src);
        let target_path = self.resolver.resolve(disk, &target);
        filesystem::move_entry(&src_path, &target_path)?;

        info!(
            "Moved {} to {} on disk {} - {} effected",
            src,
            target,
            disk,
            effected_files.len()
        );

        Ok(MoveResult { effected_files })
    }
}

fn collect_file_ids(paths: &[PathBuf]) -> Vec<String> {
    paths
        .iter()
        .filter_map(|path| match naming::decode_path(path) {
            Ok(decoded) => Some(decoded.file_id),
            Err(e) => {
                warn!("Skipping file id of {}: {}", path.display(), e);
                None
            }
        })
        .collect()
}
