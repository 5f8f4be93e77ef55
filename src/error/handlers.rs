//! Error handlers
//!
//! Maps disk errors onto the stable numeric codes reported at the boundary.

use crate::error::types::DiskError;
use log::{error, warn};

pub const IO_FAILURE: u16 = 9100;
pub const INVALID_PATH: u16 = 9101;
pub const NOT_A_DIRECTORY: u16 = 9102;
pub const MALFORMED_NAME: u16 = 9103;
pub const NOT_FOUND: u16 = 9104;
pub const SELF_CONTAINMENT: u16 = 9105;
pub const DEPTH_EXCEEDED: u16 = 9106;
pub const INVALID_INPUT: u16 = 9107;
pub const NAME_COLLISION: u16 = 9108;

/// Handle a disk error
///
/// Validation failures are the caller's to fix and only warrant a warning.
pub fn handle_error(err: &DiskError) {
    if is_io_failure(err) {
        error!("Disk error [{}]: {}", error_code(err), err);
    } else {
        warn!("Request rejected [{}]: {}", error_code(err), err);
    }
}

/// Convert error to its boundary code
pub fn error_code(err: &DiskError) -> u16 {
    match err {
        DiskError::IoError(_) => IO_FAILURE,
        DiskError::InvalidPath(_) => INVALID_PATH,
        DiskError::NotADirectory(_) => NOT_A_DIRECTORY,
        DiskError::MalformedName(_) => MALFORMED_NAME,
        DiskError::NotFound(_) => NOT_FOUND,
        DiskError::SelfContainment { .. } => SELF_CONTAINMENT,
        DiskError::DepthExceeded { .. } => DEPTH_EXCEEDED,
        DiskError::InvalidInput(_) => INVALID_INPUT,
        DiskError::NameCollision(_) => NAME_COLLISION,
    }
}

/// Whether the failure happened after validation, inside a filesystem primitive
pub fn is_io_failure(err: &DiskError) -> bool {
    matches!(err, DiskError::IoError(_))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_codes_are_stable() {
        assert_eq!(error_code(&DiskError::NotADirectory("/a".into())), 9102);
        assert_eq!(error_code(&DiskError::MalformedName("x".into())), 9103);
        assert_eq!(
            error_code(&DiskError::SelfContainment {
                src: "/a".into(),
                dst: "/a/b".into()
            }),
            9105
        );
        assert_eq!(
            error_code(&DiskError::DepthExceeded {
                path: "/a".into(),
                depth: 6,
                max: 5
            }),
            9106
        );
        assert_eq!(error_code(&DiskError::NameCollision("b".into())), 9108);
    }

    #[test]
    fn test_io_errors_are_opaque() {
        let err = DiskError::from(io::Error::new(io::ErrorKind::PermissionDenied, "denied"));
        assert_eq!(error_code(&err), IO_FAILURE);
        assert!(is_io_failure(&err));
        assert!(!is_io_failure(&DiskError::NotFound("/a".into())));
    }

    #[test]
    fn test_collision_message_names_entry() {
        let err = DiskError::NameCollision("report.txt".into());
        assert_eq!(err.to_string(), "An entry named report.txt already exists");
    }
}
