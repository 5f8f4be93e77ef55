//! Change propagation
//!
//! Computes which logical paths a structural operation touches so an external
//! index can follow along. Runs before the mutation, while the old tree is
//! still on disk.
//!
//! Every list starts with the entity named by the request, followed by its
//! descendants in pre-order with siblings sorted by name.

use log::debug;

use crate::error::DiskError;
use crate::storage::disk::{Disk, EntryType, RenameRequest};
use crate::storage::filesystem;
use crate::storage::paths::{LogicalPath, PathResolver};
use crate::storage::results::EffectedFile;

#[derive(Debug, Clone)]
pub struct ChangePropagator {
    resolver: PathResolver,
}

impl ChangePropagator {
    pub fn new(resolver: PathResolver) -> Self {
        Self { resolver }
    }

    pub fn for_delete(&self, disk: &Disk, target: &LogicalPath) -> Result<Vec<EffectedFile>, DiskError> {
        let physical = self.resolver.resolve(disk, target);
        let mut effected = vec![EffectedFile::removed(target)];

        if filesystem::real_directory_exists(&physical) {
            for descendant in filesystem::descendants(&physical)? {
                let old = self.resolver.relativize(disk, &descendant)?;
                effected.push(EffectedFile::removed(&old));
            }
        }

        debug!("Delete of {} on {} touches {} paths", target, disk, effected.len());
        Ok(effected)
    }

    pub fn for_rename(
        &self,
        disk: &Disk,
        request: &RenameRequest,
    ) -> Result<Vec<EffectedFile>, DiskError> {
        let src = request.source_path()?;
        let dst = request.target_path()?;

        self.relocate(disk, &src, &dst, request.entry_type == EntryType::Directory)
    }

    /// `dst` is the destination directory; the entry keeps its name.
    pub fn for_move(
        &self,
        disk: &Disk,
        src: &LogicalPath,
        dst: &LogicalPath,
    ) -> Result<Vec<EffectedFile>, DiskError> {
        let name = src
            .file_name()
            .ok_or_else(|| DiskError::InvalidPath(src.to_string()))?;
        let target = dst.join(name)?;
        let is_dir = filesystem::real_directory_exists(&self.resolver.resolve(disk, src));

        self.relocate(disk, src, &target, is_dir)
    }

    fn relocate(
        &self,
        disk: &Disk,
        src: &LogicalPath,
        dst: &LogicalPath,
        is_dir: bool,
    ) -> Result<Vec<EffectedFile>, DiskError> {
        let mut effected = vec![EffectedFile::moved(src, dst)];

        if is_dir {
            for descendant in filesystem::descendants(&self.resolver.resolve(disk, src))? {
                let old = self.resolver.relativize(disk, &descendant)?;
                let new = old
                    .rebase(src, dst)
                    .ok_or_else(|| DiskError::InvalidPath(old.to_string()))?;
                effected.push(EffectedFile::moved(&old, &new));
            }
        }

        debug!("{} -> {} on {} touches {} paths", src, dst, disk, effected.len());
        Ok(effected)
    }
}
