//! Command handlers
//!
//! Runs parsed commands against the storage and renders their replies.

use crate::error::DiskError;
use crate::error::handlers::{error_code, handle_error};
use crate::protocol::commands::{Command, CommandResult, CommandStatus};
use crate::protocol::responses::{
    CLOSING, OK, UNKNOWN_COMMAND, format_effected, format_entry, format_file_id, format_response,
};
use crate::storage::{DiskStorage, EffectedFile};

/// Dispatches a parsed command to its handler
pub fn handle_command(storage: &DiskStorage, command: &Command) -> CommandResult {
    let outcome = match command {
        Command::Quit => {
            return CommandResult {
                status: CommandStatus::CloseConnection,
                message: format_response(CLOSING, "Goodbye"),
            };
        }
        Command::Unknown(raw) => {
            return CommandResult {
                status: CommandStatus::Failure(format!("Unknown command: {}", raw)),
                message: format_response(UNKNOWN_COMMAND, "Unknown command or bad arguments"),
            };
        }
        Command::NewDir(disk, path) => storage
            .new_dir(disk, path)
            .map(|_| format_response(OK, "Directory created")),
        Command::NewFile(disk, path) => storage
            .new_file(disk, path)
            .map(|_| format_response(OK, "File created")),
        Command::List(disk, path) => storage.list_dir(disk, path).map(|entries| {
            let mut reply: String = entries.iter().map(format_entry).collect();
            reply.push_str(&format_response(OK, &format!("{} entries", entries.len())));
            reply
        }),
        Command::Delete(disk, path) => storage.delete(disk, path).map(|result| {
            let mut reply = render_effected(&result.effected_files);
            reply.extend(result.file_ids.iter().map(|id| format_file_id(id)));
            reply.push_str(&format_response(OK, "Deleted"));
            reply
        }),
        Command::Copy(disk, src, dst) => storage.copy(disk, src, dst).map(|result| {
            let mut reply: String = result.file_ids.iter().map(|id| format_file_id(id)).collect();
            reply.push_str(&format_response(OK, "Copied"));
            reply
        }),
        Command::Move(disk, src, dst) => storage.move_entry(disk, src, dst).map(|result| {
            let mut reply = render_effected(&result.effected_files);
            reply.push_str(&format_response(OK, "Moved"));
            reply
        }),
        Command::Rename(disk, request) => storage.rename(disk, request).map(|result| {
            let mut reply = render_effected(&result.effected_files);
            reply.push_str(&format_response(OK, "Renamed"));
            reply
        }),
    };

    match outcome {
        Ok(message) => CommandResult {
            status: CommandStatus::Success,
            message,
        },
        Err(e) => failure(&e),
    }
}

fn render_effected(effected_files: &[EffectedFile]) -> String {
    effected_files.iter().map(format_effected).collect()
}

fn failure(err: &DiskError) -> CommandResult {
    handle_error(err);

    CommandResult {
        status: CommandStatus::Failure(err.to_string()),
        message: format_response(error_code(err), &err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DiskConfig;
    use crate::protocol::commands::parse_command;

    fn storage() -> (tempfile::TempDir, DiskStorage) {
        let dir = tempfile::tempdir().unwrap();
        let storage = DiskStorage::new(&DiskConfig::new(dir.path().to_str().unwrap(), 5));
        (dir, storage)
    }

    fn run(storage: &DiskStorage, line: &str) -> CommandResult {
        handle_command(storage, &parse_command(line))
    }

    #[test]
    fn test_mkdir_then_list() {
        let (_dir, storage) = storage();

        let result = run(&storage, "MKDIR shared:1 /docs");
        assert_eq!(result.status, CommandStatus::Success);
        assert_eq!(result.message, "200 Directory created\n");

        let result = run(&storage, "LIST shared:1 /");
        assert!(result.message.contains(" d "));
        assert!(result.message.contains("/docs"));
        assert!(result.message.ends_with("200 1 entries\n"));
    }

    #[test]
    fn test_errors_carry_codes() {
        let (_dir, storage) = storage();

        let result = run(&storage, "MKDIR shared:1 /1/2/3/4/5/6");
        assert!(matches!(result.status, CommandStatus::Failure(_)));
        assert!(result.message.starts_with("9106 "));

        run(&storage, "MKDIR shared:1 /a");
        let result = run(&storage, "MKDIR shared:1 /a");
        assert!(result.message.starts_with("9108 "));

        let result = run(&storage, "LIST shared:1 /missing");
        assert!(result.message.starts_with("9102 "));
    }

    #[test]
    fn test_quit_and_unknown() {
        let (_dir, storage) = storage();

        assert_eq!(run(&storage, "QUIT").status, CommandStatus::CloseConnection);
        assert!(run(&storage, "NOPE").message.starts_with("500 "));
    }
}
