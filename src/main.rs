//! Virtual disk shell - Entry Point
//!
//! Serves disk commands read from stdin, one reply per line on stdout.

use log::{error, info};
use std::process;
use std::sync::Arc;

use vdisk::protocol::run_session;
use vdisk::{DiskConfig, DiskStorage};

#[tokio::main]
async fn main() {
    // Initialize the logger (env_logger picks up RUST_LOG environment variable)
    env_logger::init();

    let config = match DiskConfig::load() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    info!(
        "Launching virtual disk shell on {} (max depth {})",
        config.storage_root, config.max_depth
    );

    let storage = Arc::new(DiskStorage::new(&config));
    if let Err(e) = run_session(storage, tokio::io::stdin(), tokio::io::stdout()).await {
        error!("Session failed: {}", e);
        process::exit(1);
    }
}
