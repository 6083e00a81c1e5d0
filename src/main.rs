//! `micsa-ops` - evaluates an operations snapshot and prints the report.
//!
//! ```text
//! micsa-ops <snapshot.json>     classify and aggregate a JSON snapshot
//! micsa-ops drafts [namespace]  list saved drafts
//! ```

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use micsa_ops::adapters::storage::{FileKeyValueStore, InMemoryKeyValueStore};
use micsa_ops::application::drafts::SYSTEM_DRAFTS;
use micsa_ops::application::{
    BuildOperationsReportHandler, DraftStore, DraftStoreError, OperationsSnapshot,
};
use micsa_ops::config::{AppConfig, ConfigError, StorageBackend, ValidationError};
use micsa_ops::domain::foundation::SystemClock;
use micsa_ops::domain::packing::CategoryCatalog;
use micsa_ops::domain::status::StatusClassifier;
use micsa_ops::ports::KeyValueStore;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("usage: micsa-ops <snapshot.json> | micsa-ops drafts [namespace]")]
    Usage,

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("invalid configuration: {0}")]
    InvalidConfig(#[from] ValidationError),

    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Drafts(#[from] DraftStoreError),
}

enum Command {
    Report(PathBuf),
    Drafts(String),
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Command, CliError> {
    match args.next().as_deref() {
        Some("drafts") => Ok(Command::Drafts(
            args.next().unwrap_or_else(|| SYSTEM_DRAFTS.to_string()),
        )),
        Some(path) if !path.starts_with('-') => Ok(Command::Report(PathBuf::from(path))),
        _ => Err(CliError::Usage),
    }
}

fn init_tracing(config: &AppConfig) -> Result<(), ValidationError> {
    let filter = config.telemetry.env_filter()?;
    // Logs go to stderr so stdout stays valid JSON.
    if config.telemetry.json_logs {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
    Ok(())
}

fn open_store(config: &AppConfig) -> Arc<dyn KeyValueStore> {
    match config.storage.backend {
        StorageBackend::File => Arc::new(FileKeyValueStore::new(&config.storage.data_dir)),
        StorageBackend::Memory => Arc::new(InMemoryKeyValueStore::new()),
    }
}

async fn run() -> Result<(), CliError> {
    let command = parse_args(std::env::args().skip(1))?;

    let config = AppConfig::load()?;
    config.validate()?;
    init_tracing(&config)?;

    let output = match command {
        Command::Report(path) => {
            let raw = tokio::fs::read_to_string(&path)
                .await
                .map_err(|source| CliError::Read {
                    path: path.clone(),
                    source,
                })?;
            let snapshot: OperationsSnapshot = serde_json::from_str(&raw)?;

            let handler = BuildOperationsReportHandler::new(
                StatusClassifier::new(config.compliance.policy()),
                config.compliance.required_courses.clone(),
                CategoryCatalog::standard(),
                Arc::new(SystemClock),
            );
            let report = handler.handle(snapshot);
            tracing::info!(path = %path.display(), "operations report ready");
            serde_json::to_string_pretty(&report)?
        }
        Command::Drafts(namespace) => {
            let store = DraftStore::new(open_store(&config), namespace);
            let drafts = store.get_all().await?;
            tracing::info!(namespace = store.namespace(), count = drafts.len(), "listed drafts");
            serde_json::to_string_pretty(&drafts)?
        }
    };

    println!("{output}");
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "micsa-ops failed");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
