//! Leaf file naming
//!
//! Files are stored as `<file id>_<description>_<display name>` so the external
//! metadata record can be recovered from the physical name alone. Directories
//! keep their display name.
//!
//! Segments are not escaped. A `_` inside the id or the description shifts the
//! split, so a round trip is only exact when neither contains the separator.

use std::path::Path;

use crate::error::DiskError;

pub const NAME_SEPARATOR: char = '_';

/// Identity recovered from an encoded leaf name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedName {
    pub file_id: String,
    pub display_name: String,
}

pub fn encode(file_id: &str, description: &str, display_name: &str) -> String {
    format!(
        "{}{}{}{}{}",
        file_id, NAME_SEPARATOR, description, NAME_SEPARATOR, display_name
    )
}

/// Splits on the first two separators. The description is dropped.
pub fn decode(physical_name: &str) -> Result<DecodedName, DiskError> {
    let mut parts = physical_name.splitn(3, NAME_SEPARATOR);

    match (parts.next(), parts.next(), parts.next()) {
        (Some(file_id), Some(_), Some(display_name)) => Ok(DecodedName {
            file_id: file_id.to_string(),
            display_name: display_name.to_string(),
        }),
        _ => Err(DiskError::MalformedName(physical_name.to_string())),
    }
}

/// Decodes the final component of a physical path
pub fn decode_path(path: &Path) -> Result<DecodedName, DiskError> {
    let name = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| DiskError::MalformedName(path.to_string_lossy().to_string()))?;

    decode(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_joins_segments() {
        assert_eq!(encode("42", "desc", "old.txt"), "42_desc_old.txt");
        assert_eq!(encode("42", "", "a.txt"), "42__a.txt");
    }

    #[test]
    fn test_round_trip_without_separator() {
        let decoded = decode(&encode("1001", "quarterly", "report.pdf")).unwrap();
        assert_eq!(decoded.file_id, "1001");
        assert_eq!(decoded.display_name, "report.pdf");
    }

    #[test]
    fn test_display_name_keeps_underscores() {
        let decoded = decode("7_note_my_file_v2.txt").unwrap();
        assert_eq!(decoded.file_id, "7");
        assert_eq!(decoded.display_name, "my_file_v2.txt");
    }

    #[test]
    fn test_underscore_in_description_breaks_round_trip() {
        // Known limitation: the description is not escaped.
        let decoded = decode(&encode("7", "draft_one", "a.txt")).unwrap();
        assert_eq!(decoded.file_id, "7");
        assert_eq!(decoded.display_name, "one_a.txt");
    }

    #[test]
    fn test_malformed_names() {
        assert!(matches!(decode("plain.txt"), Err(DiskError::MalformedName(_))));
        assert!(matches!(decode("42_only"), Err(DiskError::MalformedName(_))));
    }

    #[test]
    fn test_decode_path_uses_file_name() {
        let decoded = decode_path(Path::new("/srv/shared/1/a/42_d_b.txt")).unwrap();
        assert_eq!(decoded.file_id, "42");
        assert_eq!(decoded.display_name, "b.txt");
    }
}
