use attendtrack_collab::{BoxedStorage, FileStorage, MemoryStorage, Tracker, TrackerConfig};
use attendtrack_server::{run_server, ServerContext};
use colored::Colorize;
use config::{Config, StorageKind};
use log::{error, info, LevelFilter};
use thiserror::Error;
use tokio::runtime;

mod config;
mod logging;

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Could not open storage: {0}")]
    Storage(#[from] attendtrack_collab::StorageError),

    #[error("Fatal error: {0}")]
    Fatal(#[from] std::io::Error),
}

impl StartupError {
    fn hint(&self) -> String {
        match self {
            StartupError::Config(_) => "Check the ATTENDTRACK_* environment variables and try again.".to_string(),
            StartupError::Storage(_) => "Make sure ATTENDTRACK_DATA_DIR points to a writable directory, or set ATTENDTRACK_IN_MEMORY to keep everything in memory.".to_string(),
            StartupError::Fatal(_) => "The server could not be started. Make sure the port is not already in use.".to_string(),
        }
    }
}

fn open_storage(kind: &StorageKind) -> Result<BoxedStorage, StartupError> {
    let storage: BoxedStorage = match kind {
        StorageKind::Memory => {
            info!("Keeping state in memory, nothing will be persisted");
            Box::new(MemoryStorage::new())
        }
        StorageKind::Directory(root) => Box::new(FileStorage::open(root)?),
    };

    Ok(storage)
}

fn run(config: Config) -> Result<(), StartupError> {
    let storage = open_storage(&config.storage)?;

    let tracker = Tracker::new(
        storage,
        TrackerConfig {
            seed_demo_data: config.seed_demo_data,
        },
    );

    info!("Building async runtime...");
    let runtime = runtime::Builder::new_multi_thread()
        .enable_all()
        .thread_name("attendtrack-async")
        .build()?;

    info!("Initialized successfully.");
    runtime.block_on(run_server(ServerContext::new(tracker), config.port))?;

    Ok(())
}

fn main() {
    let config = Config::from_env();
    let level = config
        .as_ref()
        .map(|c| c.log_level)
        .unwrap_or(LevelFilter::Info);

    if let Err(error) = logging::init_logger(level) {
        eprintln!("Could not initialize logging: {error}");
        return;
    }

    if let Err(error) = config.and_then(run) {
        error!(
            "{} Read the error below to troubleshoot the issue.",
            "attendtrack failed to start!".bold().red()
        );
        error!("{}", error);
        error!("{}", format!("Hint: {}", error.hint()).dimmed().italic());
    }
}
