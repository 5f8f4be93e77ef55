//! Shell session loop
//!
//! Reads commands line by line and writes one reply per command. Commands run
//! one at a time on the blocking pool, so a session never overlaps two
//! structural changes.

use log::{debug, info};
use std::io;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};

use crate::protocol::commands::{CommandStatus, parse_command};
use crate::protocol::handlers::handle_command;
use crate::protocol::responses::{READY, format_response};
use crate::storage::DiskStorage;

pub async fn run_session<R, W>(storage: Arc<DiskStorage>, reader: R, mut writer: W) -> io::Result<()>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = BufReader::new(reader).lines();

    writer
        .write_all(format_response(READY, "Virtual disk ready").as_bytes())
        .await?;
    writer.flush().await?;

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        debug!("Received command: {}", line.trim());
        let command = parse_command(&line);

        let storage = Arc::clone(&storage);
        let result = tokio::task::spawn_blocking(move || handle_command(&storage, &command))
            .await
            .map_err(io::Error::other)?;

        writer.write_all(result.message.as_bytes()).await?;
        writer.flush().await?;

        if result.status == CommandStatus::CloseConnection {
            info!("Session closed by client");
            return Ok(());
        }
    }

    info!("Session input ended");
    Ok(())
}
