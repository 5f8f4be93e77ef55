//! Path resolution
//!
//! Logical paths are disk-scoped, `/`-rooted and kept as a list of segments.
//! Physical paths are `<storage root>/<disk kind>/<owner id><logical path>`.

use std::fmt;
use std::path::{Component, Path, PathBuf};

use crate::config::DiskConfig;
use crate::error::DiskError;
use crate::storage::disk::Disk;

pub const SEPARATOR: char = '/';

/// An absolute path inside one disk
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct LogicalPath {
    segments: Vec<String>,
}

impl LogicalPath {
    pub fn root() -> Self {
        Self::default()
    }

    /// Parses a caller supplied path. Trailing separators are stripped.
    pub fn parse(raw: &str) -> Result<Self, DiskError> {
        let Some(rest) = raw.strip_prefix(SEPARATOR) else {
            return Err(DiskError::InvalidPath(format!(
                "path must start with '{}': {}",
                SEPARATOR, raw
            )));
        };

        let rest = rest.trim_end_matches(SEPARATOR);
        if rest.is_empty() {
            return Ok(Self::root());
        }

        let mut segments = Vec::new();
        for segment in rest.split(SEPARATOR) {
            validate_name(segment).map_err(|_| DiskError::InvalidPath(raw.to_string()))?;
            segments.push(segment.to_string());
        }

        Ok(Self { segments })
    }

    /// Builds a logical path from a path relative to a disk root
    pub fn from_relative(relative: &Path) -> Result<Self, DiskError> {
        let mut segments = Vec::new();

        for component in relative.components() {
            match component {
                Component::Normal(name) => {
                    let name = name.to_str().ok_or_else(|| {
                        DiskError::InvalidPath(relative.to_string_lossy().to_string())
                    })?;
                    segments.push(name.to_string());
                }
                Component::CurDir => {}
                _ => {
                    return Err(DiskError::InvalidPath(
                        relative.to_string_lossy().to_string(),
                    ));
                }
            }
        }

        Ok(Self { segments })
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Number of separators in the stripped path; the root is 0.
    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn file_name(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }

    pub fn parent(&self) -> Option<LogicalPath> {
        if self.is_root() {
            return None;
        }

        Some(Self {
            segments: self.segments[..self.segments.len() - 1].to_vec(),
        })
    }

    pub fn join(&self, name: &str) -> Result<LogicalPath, DiskError> {
        validate_name(name)?;

        let mut segments = self.segments.clone();
        segments.push(name.to_string());
        Ok(Self { segments })
    }

    /// Appends a name read back from disk. Not validated; whatever the
    /// filesystem holds is reported as-is.
    pub fn child(&self, name: &str) -> LogicalPath {
        let mut segments = self.segments.clone();
        segments.push(name.to_string());
        Self { segments }
    }

    /// True when `self` is `base` or lies below it. Compares whole segments,
    /// so `/ab` does not start with `/a`.
    pub fn starts_with(&self, base: &LogicalPath) -> bool {
        self.segments.starts_with(&base.segments)
    }

    /// Replaces the leading `from` segments with `to`.
    /// Returns `None` when `self` is not under `from`.
    pub fn rebase(&self, from: &LogicalPath, to: &LogicalPath) -> Option<LogicalPath> {
        let rest = self.segments.strip_prefix(from.segments.as_slice())?;

        let mut segments = to.segments.clone();
        segments.extend(rest.iter().cloned());
        Some(Self { segments })
    }
}

impl fmt::Display for LogicalPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            return write!(f, "{}", SEPARATOR);
        }

        for segment in &self.segments {
            write!(f, "{}{}", SEPARATOR, segment)?;
        }
        Ok(())
    }
}

/// Checks a single entry name
pub fn validate_name(name: &str) -> Result<(), DiskError> {
    if name.is_empty()
        || name == "."
        || name == ".."
        || name.contains(SEPARATOR)
        || name.contains('\\')
        || name.contains('\0')
    {
        return Err(DiskError::InvalidPath(format!("invalid name: {:?}", name)));
    }

    Ok(())
}

/// Maps logical paths of a disk onto the storage tree
#[derive(Debug, Clone)]
pub struct PathResolver {
    storage_root: PathBuf,
    max_depth: usize,
}

impl PathResolver {
    pub fn new(config: &DiskConfig) -> Self {
        Self {
            storage_root: config.storage_root_path(),
            max_depth: config.max_depth,
        }
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// `<storage root>/<kind>/<owner id>`
    pub fn disk_root(&self, disk: &Disk) -> PathBuf {
        self.storage_root
            .join(disk.kind.as_str())
            .join(disk.owner_id.to_string())
    }

    pub fn resolve(&self, disk: &Disk, path: &LogicalPath) -> PathBuf {
        let mut physical = self.disk_root(disk);
        for segment in path.segments() {
            physical.push(segment);
        }
        physical
    }

    /// Strips the disk root from a physical path
    pub fn relativize(&self, disk: &Disk, physical: &Path) -> Result<LogicalPath, DiskError> {
        let disk_root = self.disk_root(disk);
        let relative = physical.strip_prefix(&disk_root).map_err(|_| {
            DiskError::InvalidPath(format!(
                "{} is outside disk {}",
                physical.display(),
                disk
            ))
        })?;

        LogicalPath::from_relative(relative)
    }

    pub fn validate_depth(&self, path: &LogicalPath) -> Result<(), DiskError> {
        if path.depth() > self.max_depth {
            return Err(DiskError::DepthExceeded {
                path: path.to_string(),
                depth: path.depth(),
                max: self.max_depth,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver() -> PathResolver {
        PathResolver::new(&DiskConfig::new("/srv/yunke", 5))
    }

    #[test]
    fn test_parse_strips_trailing_separators() {
        let path = LogicalPath::parse("/a/b/").unwrap();
        assert_eq!(path.to_string(), "/a/b");
        assert_eq!(path.depth(), 2);

        let root = LogicalPath::parse("///").unwrap();
        assert!(root.is_root());
        assert_eq!(root.depth(), 0);
        assert_eq!(root.to_string(), "/");
    }

    #[test]
    fn test_parse_rejects_relative_and_traversal() {
        assert!(LogicalPath::parse("a/b").is_err());
        assert!(LogicalPath::parse("").is_err());
        assert!(LogicalPath::parse("/a//b").is_err());
        assert!(LogicalPath::parse("/a/../b").is_err());
        assert!(LogicalPath::parse("/./a").is_err());
    }

    #[test]
    fn test_segment_prefix_is_not_substring_prefix() {
        let a = LogicalPath::parse("/a").unwrap();
        let ab = LogicalPath::parse("/ab").unwrap();
        let a_b = LogicalPath::parse("/a/b").unwrap();

        assert!(!ab.starts_with(&a));
        assert!(a_b.starts_with(&a));
        assert!(a.starts_with(&a));
        assert!(a.starts_with(&LogicalPath::root()));
    }

    #[test]
    fn test_rebase_replaces_leading_segments() {
        let from = LogicalPath::parse("/a").unwrap();
        let to = LogicalPath::parse("/x/a").unwrap();

        let moved = LogicalPath::parse("/a/b/c.txt").unwrap().rebase(&from, &to).unwrap();
        assert_eq!(moved.to_string(), "/x/a/b/c.txt");

        assert!(LogicalPath::parse("/ab/c").unwrap().rebase(&from, &to).is_none());
    }

    #[test]
    fn test_parent_and_file_name() {
        let path = LogicalPath::parse("/a/b.txt").unwrap();
        assert_eq!(path.file_name(), Some("b.txt"));
        assert_eq!(path.parent().unwrap().to_string(), "/a");
        assert!(LogicalPath::root().parent().is_none());
        assert!(path.join("c/d").is_err());
    }

    #[test]
    fn test_resolve_and_relativize() {
        let resolver = resolver();
        let disk = Disk::shared(9);
        let path = LogicalPath::parse("/a/b.txt").unwrap();

        let physical = resolver.resolve(&disk, &path);
        assert_eq!(physical, PathBuf::from("/srv/yunke/shared/9/a/b.txt"));
        assert_eq!(resolver.disk_root(&disk), PathBuf::from("/srv/yunke/shared/9"));
        assert_eq!(resolver.relativize(&disk, &physical).unwrap(), path);

        let other = Disk::private(9);
        assert!(resolver.relativize(&other, &physical).is_err());
    }

    #[test]
    fn test_validate_depth() {
        let resolver = resolver();
        assert!(resolver.validate_depth(&LogicalPath::parse("/1/2/3/4/5").unwrap()).is_ok());

        let err = resolver
            .validate_depth(&LogicalPath::parse("/1/2/3/4/5/6").unwrap())
            .unwrap_err();
        assert!(matches!(err, DiskError::DepthExceeded { depth: 6, max: 5, .. }));
    }
}
