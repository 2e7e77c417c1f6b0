// ./cli/src/main.rs
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;
use std::process::ExitCode;
use tracing::{error, info, level_filters::LevelFilter};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use application::DocumentManager;
use domain::{Document, SearchRequest};
use infrastructure::InMemoryDocumentStore;

mod config;

use config::{CliError, Config};

fn main() -> ExitCode {
    // --- Logger Initialization ---
    // Logs go to stderr so stdout carries only JSON.
    let filter: EnvFilter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), CliError> {
    let config = Config::from_env()?;
    info!(seed = %config.seed_path.display(), "Configuration loaded");

    let seed: Vec<Document> = read_json(&config.seed_path)?;
    let mut manager = DocumentManager::new(InMemoryDocumentStore::new());
    for doc in seed {
        manager.save(doc);
    }
    info!(documents = manager.len(), "Repository seeded");

    let output = match &config.find_id {
        Some(id) => {
            let found = manager.find_by_id(id);
            info!(doc_id = %id, found = found.is_some(), "Lookup finished");
            serde_json::to_string_pretty(&found)?
        }
        None => {
            let request = match &config.request_path {
                Some(path) => Some(read_json::<SearchRequest>(path)?),
                None => None,
            };
            let results = manager.search(request.as_ref());
            info!(hits = results.len(), "Search finished");
            serde_json::to_string_pretty(&results)?
        }
    };

    println!("{output}");
    Ok(())
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, CliError> {
    let raw = fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| CliError::InvalidJson {
        path: path.to_path_buf(),
        source,
    })
}
