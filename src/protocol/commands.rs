//! Module `commands`
//!
//! Parses shell lines into commands. The disk is always the first argument,
//! written `<kind>:<owner>`:
//!
//! ```text
//! MKDIR  shared:1 /a
//! TOUCH  shared:1 /a/42_desc_b.txt
//! LIST   shared:1 /a
//! DEL    shared:1 /a
//! COPY   shared:1 /a/b /c
//! MOVE   shared:1 /a/b /c
//! RENAME shared:1 / dir a b
//! RENAME shared:1 / file old.txt new.txt 42 desc
//! QUIT
//! ```

use crate::storage::{Disk, EntryType, RenameRequest};

/// A parsed shell command
#[derive(Debug, PartialEq)]
pub enum Command {
    Quit,
    NewDir(Disk, String),
    NewFile(Disk, String),
    List(Disk, String),
    Delete(Disk, String),
    Copy(Disk, String, String),
    Move(Disk, String, String),
    Rename(Disk, RenameRequest),
    /// Unknown command or bad arguments; keeps the raw line
    Unknown(String),
}

/// Outcome of executing a command
#[derive(Debug, PartialEq)]
pub enum CommandStatus {
    Success,
    Failure(String),
    CloseConnection,
}

/// Full result of a command, including the reply text
#[derive(Debug)]
pub struct CommandResult {
    pub status: CommandStatus,
    pub message: String,
}

// Parse raw command string into Command enum
pub fn parse_command(raw: &str) -> Command {
    let trimmed = raw.trim();
    let mut parts = trimmed.split_whitespace();
    let cmd = parts.next().unwrap_or("").to_ascii_uppercase();
    let args: Vec<&str> = parts.collect();

    parse_args(&cmd, &args).unwrap_or_else(|| Command::Unknown(trimmed.to_string()))
}

fn parse_args(cmd: &str, args: &[&str]) -> Option<Command> {
    if matches!(cmd, "QUIT" | "Q") {
        return args.is_empty().then_some(Command::Quit);
    }

    let (disk, rest) = args.split_first()?;
    let disk: Disk = disk.parse().ok()?;

    match (cmd, rest) {
        ("MKDIR", [path]) => Some(Command::NewDir(disk, path.to_string())),
        ("TOUCH", [path]) => Some(Command::NewFile(disk, path.to_string())),
        ("LIST", [path]) => Some(Command::List(disk, path.to_string())),
        ("LIST", []) => Some(Command::List(disk, "/".to_string())),
        ("DEL", [path]) => Some(Command::Delete(disk, path.to_string())),
        ("COPY", [src, dst]) => Some(Command::Copy(disk, src.to_string(), dst.to_string())),
        ("MOVE", [src, dst]) => Some(Command::Move(disk, src.to_string(), dst.to_string())),
        ("RENAME", [parent, entry_type, src, dst, extra @ ..]) => {
            let request = match (entry_type.parse::<EntryType>().ok()?, extra) {
                (EntryType::Directory, []) => RenameRequest::directory(parent, src, dst),
                (EntryType::File, [file_id]) => RenameRequest::file(parent, src, dst, file_id, ""),
                (EntryType::File, [file_id, description]) => {
                    RenameRequest::file(parent, src, dst, file_id, description)
                }
                _ => return None,
            };
            Some(Command::Rename(disk, request))
        }
        _ => None,
    }
}
