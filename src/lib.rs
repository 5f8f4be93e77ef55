//! Virtual disk storage layer
//!
//! Many independent disks, keyed by kind and owner id, share one physical
//! storage tree. Structural operations report every logical path they touch so
//! an external metadata index can be kept in step.

pub mod config;
pub mod error;
pub mod protocol;
pub mod storage;

pub use config::DiskConfig;
pub use error::DiskError;
pub use storage::{Disk, DiskKind, DiskStorage};
