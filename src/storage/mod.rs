//! Virtual disk storage
//!
//! Path resolution, validation, change propagation and listing for disks laid
//! out under a single storage root.

pub mod disk;
pub mod filesystem;
pub mod listing;
pub mod naming;
pub mod operations;
pub mod paths;
pub mod propagation;
pub mod results;
pub mod validation;

// Re-export the types callers work with
pub use disk::{Disk, DiskKind, EntryType, RenameRequest};
pub use listing::DirectoryLister;
pub use operations::DiskStorage;
pub use paths::{LogicalPath, PathResolver};
pub use propagation::ChangePropagator;
pub use results::{CopyResult, DeleteResult, DirectoryEntry, EffectedFile, MoveResult, RenameResult};
pub use validation::Validator;
