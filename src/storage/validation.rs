//! Structural validation
//!
//! Checks run before any physical mutation, so a rejected request leaves the
//! tree untouched.

use std::path::Path;

use log::debug;

use crate::error::DiskError;
use crate::storage::disk::Disk;
use crate::storage::filesystem;
use crate::storage::naming;
use crate::storage::paths::{LogicalPath, PathResolver};

#[derive(Debug, Clone)]
pub struct Validator {
    resolver: PathResolver,
}

impl Validator {
    pub fn new(resolver: PathResolver) -> Self {
        Self { resolver }
    }

    /// Fails when something already occupies `physical`.
    ///
    /// The error carries the display name: decoded for encoded files, the raw
    /// name otherwise.
    pub fn check_name_collision(&self, physical: &Path) -> Result<(), DiskError> {
        if !filesystem::path_exists(physical) {
            return Ok(());
        }

        let name = if filesystem::file_exists(physical) {
            naming::decode_path(physical).map(|decoded| decoded.display_name).ok()
        } else {
            None
        };
        let name = name.unwrap_or_else(|| {
            physical
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default()
        });

        Err(DiskError::NameCollision(name))
    }

    /// Rejects a destination that is the source or nested inside it
    pub fn check_not_self_contained(
        &self,
        src: &LogicalPath,
        dst: &LogicalPath,
    ) -> Result<(), DiskError> {
        if dst.starts_with(src) {
            return Err(DiskError::SelfContainment {
                src: src.to_string(),
                dst: dst.to_string(),
            });
        }

        Ok(())
    }

    /// Depth of the destination directory plus the height of the source, files
    /// included, must stay within the budget.
    pub fn check_combined_depth(
        &self,
        disk: &Disk,
        src: &LogicalPath,
        dst: &LogicalPath,
    ) -> Result<(), DiskError> {
        let ancestor_depth = dst.depth();
        let height = filesystem::subtree_height(&self.resolver.resolve(disk, src))?;
        let combined = ancestor_depth + height;

        debug!(
            "Depth check for {} -> {}: {} + {} (max {})",
            src,
            dst,
            ancestor_depth,
            height,
            self.resolver.max_depth()
        );

        if combined > self.resolver.max_depth() {
            return Err(DiskError::DepthExceeded {
                path: dst.to_string(),
                depth: combined,
                max: self.resolver.max_depth(),
            });
        }

        Ok(())
    }

    /// Full validation for copying or moving `src` into the directory `dst`.
    ///
    /// Returns the path the entry will occupy, `dst/<name of src>`.
    pub fn check_copy_move(
        &self,
        disk: &Disk,
        src: &LogicalPath,
        dst: &LogicalPath,
    ) -> Result<LogicalPath, DiskError> {
        self.check_not_self_contained(src, dst)?;

        let name = src
            .file_name()
            .ok_or_else(|| DiskError::InvalidPath(src.to_string()))?;
        if !filesystem::path_exists(&self.resolver.resolve(disk, src)) {
            return Err(DiskError::NotFound(src.to_string()));
        }

        let target = dst.join(name)?;
        self.check_name_collision(&self.resolver.resolve(disk, &target))?;
        self.check_combined_depth(disk, src, dst)?;

        if !filesystem::directory_exists(&self.resolver.resolve(disk, dst)) {
            return Err(DiskError::NotADirectory(dst.to_string()));
        }

        Ok(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DiskConfig;
    use std::fs;

    fn setup() -> (tempfile::TempDir, Validator, PathResolver) {
        let dir = tempfile::tempdir().unwrap();
        let config = DiskConfig::new(dir.path().to_str().unwrap(), 5);
        let resolver = PathResolver::new(&config);
        let disk_root = resolver.disk_root(&Disk::shared(1));
        fs::create_dir_all(disk_root.join("a/b/c")).unwrap();
        fs::create_dir_all(disk_root.join("x/y/z/w")).unwrap();
        fs::write(disk_root.join("a/42_d_note.txt"), b"").unwrap();
        (dir, Validator::new(resolver.clone()), resolver)
    }

    fn path(raw: &str) -> LogicalPath {
        LogicalPath::parse(raw).unwrap()
    }

    #[test]
    fn test_collision_reports_display_name() {
        let (_dir, validator, resolver) = setup();
        let disk = Disk::shared(1);

        let err = validator
            .check_name_collision(&resolver.resolve(&disk, &path("/a/42_d_note.txt")))
            .unwrap_err();
        assert!(matches!(err, DiskError::NameCollision(ref n) if n == "note.txt"));

        let err = validator
            .check_name_collision(&resolver.resolve(&disk, &path("/a/b")))
            .unwrap_err();
        assert!(matches!(err, DiskError::NameCollision(ref n) if n == "b"));

        assert!(validator
            .check_name_collision(&resolver.resolve(&disk, &path("/a/free")))
            .is_ok());
    }

    #[test]
    fn test_self_containment() {
        let (_dir, validator, _) = setup();

        assert!(validator.check_not_self_contained(&path("/a"), &path("/a")).is_err());
        assert!(validator.check_not_self_contained(&path("/a"), &path("/a/b")).is_err());
        assert!(validator.check_not_self_contained(&path("/a"), &path("/ab")).is_ok());
        assert!(validator.check_not_self_contained(&path("/a/b"), &path("/a")).is_ok());
    }

    #[test]
    fn test_combined_depth_counts_subtree() {
        let (_dir, validator, _) = setup();
        let disk = Disk::shared(1);

        // /a is three levels tall; /x/y/z is three deep.
        let err = validator
            .check_combined_depth(&disk, &path("/a"), &path("/x/y/z"))
            .unwrap_err();
        assert!(matches!(err, DiskError::DepthExceeded { depth: 6, max: 5, .. }));

        assert!(validator.check_combined_depth(&disk, &path("/a"), &path("/x/y")).is_ok());
        assert!(validator
            .check_combined_depth(&disk, &path("/a/42_d_note.txt"), &path("/x/y/z/w"))
            .is_ok());
    }

    #[test]
    fn test_files_count_toward_height() {
        let (_dir, validator, resolver) = setup();
        let disk = Disk::shared(1);
        let disk_root = resolver.disk_root(&disk);
        fs::create_dir_all(disk_root.join("d")).unwrap();
        fs::write(disk_root.join("d/7_d_h.txt"), b"").unwrap();

        // /x/y/z/w/d fits, but the file inside it would sit at depth 6.
        let err = validator
            .check_combined_depth(&disk, &path("/d"), &path("/x/y/z/w"))
            .unwrap_err();
        assert!(matches!(err, DiskError::DepthExceeded { depth: 6, max: 5, .. }));

        assert!(validator.check_combined_depth(&disk, &path("/d"), &path("/x/y/z")).is_ok());
    }

    #[test]
    fn test_copy_move_target_and_order() {
        let (_dir, validator, _) = setup();
        let disk = Disk::shared(1);

        let target = validator.check_copy_move(&disk, &path("/a/b"), &path("/x")).unwrap();
        assert_eq!(target.to_string(), "/x/b");

        assert!(matches!(
            validator.check_copy_move(&disk, &path("/a"), &path("/a/b")),
            Err(DiskError::SelfContainment { .. })
        ));
        assert!(matches!(
            validator.check_copy_move(&disk, &path("/missing"), &path("/x")),
            Err(DiskError::NotFound(_))
        ));
        assert!(matches!(
            validator.check_copy_move(&disk, &path("/a/b"), &path("/nowhere")),
            Err(DiskError::NotADirectory(_))
        ));
        assert!(matches!(
            validator.check_copy_move(&disk, &path("/a/b"), &path("/a")),
            Err(DiskError::NameCollision(_))
        ));
    }
}
