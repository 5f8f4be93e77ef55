//! Shell response handling
//!
//! Replies end with a `<code> <message>` status line. Data lines come first,
//! indented by two spaces.

use crate::storage::{DirectoryEntry, EffectedFile, EntryType};

pub const OK: u16 = 200;
pub const READY: u16 = 220;
pub const CLOSING: u16 = 221;
pub const UNKNOWN_COMMAND: u16 = 500;

/// Format a status line
pub fn format_response(code: u16, message: &str) -> String {
    format!("{} {}\n", code, message)
}

/// `d|f <mtime> <path>`
pub fn format_entry(entry: &DirectoryEntry) -> String {
    let kind = match entry.entry_type {
        EntryType::Directory => 'd',
        EntryType::File => 'f',
    };
    format!("  {} {} {}\n", kind, entry.modified_secs(), entry.path)
}

/// `<src> -> <dst>`, with `-` for removals
pub fn format_effected(effected: &EffectedFile) -> String {
    let dst = if effected.is_removal() { "-" } else { effected.dst.as_str() };
    format!("  {} -> {}\n", effected.src, dst)
}

pub fn format_file_id(file_id: &str) -> String {
    format!("  id {}\n", file_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, UNIX_EPOCH};

    #[test]
    fn test_format_lines() {
        assert_eq!(format_response(OK, "done"), "200 done\n");

        let entry = DirectoryEntry {
            entry_type: EntryType::Directory,
            path: "/a".into(),
            last_modified: UNIX_EPOCH + Duration::from_secs(1_700_000_000),
        };
        assert_eq!(format_entry(&entry), "  d 1700000000 /a\n");

        let removed = EffectedFile {
            src: "/a".into(),
            dst: String::new(),
        };
        assert_eq!(format_effected(&removed), "  /a -> -\n");
    }
}
