//! Disk identity and request types

use std::fmt;
use std::str::FromStr;

use crate::error::DiskError;
use crate::storage::naming;
use crate::storage::paths::LogicalPath;

/// Which family of disks a tree belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiskKind {
    /// Owned by an organisation
    Shared,
    /// Owned by a single user
    Private,
}

impl DiskKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiskKind::Shared => "shared",
            DiskKind::Private => "private",
        }
    }

    /// Only shared disks report effected files on delete.
    pub fn reports_deletions(&self) -> bool {
        matches!(self, DiskKind::Shared)
    }
}

impl fmt::Display for DiskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DiskKind {
    type Err = DiskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "shared" => Ok(DiskKind::Shared),
            "private" => Ok(DiskKind::Private),
            _ => Err(DiskError::InvalidInput(format!("unknown disk kind: {}", s))),
        }
    }
}

/// A single disk: kind plus owner id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Disk {
    pub kind: DiskKind,
    pub owner_id: i64,
}

impl Disk {
    pub fn new(kind: DiskKind, owner_id: i64) -> Self {
        Self { kind, owner_id }
    }

    pub fn shared(owner_id: i64) -> Self {
        Self::new(DiskKind::Shared, owner_id)
    }

    pub fn private(owner_id: i64) -> Self {
        Self::new(DiskKind::Private, owner_id)
    }
}

impl fmt::Display for Disk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.owner_id)
    }
}

/// Parses `<kind>:<owner id>`, e.g. `shared:42`
impl FromStr for Disk {
    type Err = DiskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (kind, owner) = s
            .split_once(':')
            .ok_or_else(|| DiskError::InvalidInput(format!("expected <kind>:<owner>, got {}", s)))?;
        let owner_id = owner
            .parse::<i64>()
            .map_err(|_| DiskError::InvalidInput(format!("invalid owner id: {}", owner)))?;

        Ok(Disk::new(kind.parse()?, owner_id))
    }
}

/// Kind of a directory entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryType {
    Directory,
    File,
}

impl EntryType {
    /// Wire code: 1 for directories, 2 for files
    pub fn code(&self) -> u8 {
        match self {
            EntryType::Directory => 1,
            EntryType::File => 2,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(EntryType::Directory),
            2 => Some(EntryType::File),
            _ => None,
        }
    }
}

impl FromStr for EntryType {
    type Err = DiskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(entry_type) = s.parse::<u8>().ok().and_then(EntryType::from_code) {
            return Ok(entry_type);
        }

        match s.to_ascii_lowercase().as_str() {
            "dir" | "directory" => Ok(EntryType::Directory),
            "file" => Ok(EntryType::File),
            _ => Err(DiskError::InvalidInput(format!("unknown entry type: {}", s))),
        }
    }
}

/// Rename of one entry inside its parent directory.
///
/// Names are display names. For files the physical names are derived from
/// `file_id` and `description` through the naming codec.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameRequest {
    pub parent: String,
    pub entry_type: EntryType,
    pub src: String,
    pub dst: String,
    pub file_id: Option<String>,
    pub description: Option<String>,
}

impl RenameRequest {
    pub fn directory(parent: &str, src: &str, dst: &str) -> Self {
        Self {
            parent: parent.to_string(),
            entry_type: EntryType::Directory,
            src: src.to_string(),
            dst: dst.to_string(),
            file_id: None,
            description: None,
        }
    }

    pub fn file(parent: &str, src: &str, dst: &str, file_id: &str, description: &str) -> Self {
        Self {
            parent: parent.to_string(),
            entry_type: EntryType::File,
            src: src.to_string(),
            dst: dst.to_string(),
            file_id: Some(file_id.to_string()),
            description: Some(description.to_string()),
        }
    }

    pub fn source_path(&self) -> Result<LogicalPath, DiskError> {
        LogicalPath::parse(&self.parent)?.join(&self.physical_name(&self.src)?)
    }

    pub fn target_path(&self) -> Result<LogicalPath, DiskError> {
        LogicalPath::parse(&self.parent)?.join(&self.physical_name(&self.dst)?)
    }

    fn physical_name(&self, display_name: &str) -> Result<String, DiskError> {
        match self.entry_type {
            EntryType::Directory => Ok(display_name.to_string()),
            EntryType::File => {
                let file_id = self
                    .file_id
                    .as_deref()
                    .filter(|id| !id.is_empty())
                    .ok_or_else(|| DiskError::InvalidInput("file rename requires a file id".into()))?;
                let description = self.description.as_deref().unwrap_or("");
                Ok(naming::encode(file_id, description, display_name))
            }
        }
    }
}
