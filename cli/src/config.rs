use std::path::PathBuf;
use thiserror::Error;

pub const SEED_VAR: &str = "DOCSTORE_SEED";
pub const REQUEST_VAR: &str = "DOCSTORE_REQUEST";
pub const FIND_ID_VAR: &str = "DOCSTORE_FIND_ID";

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Missing required environment variable {0}")]
    MissingVar(&'static str),
    #[error("Failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid JSON in '{path}': {source}")]
    InvalidJson {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Failed to render output: {0}")]
    Output(#[from] serde_json::Error),
}

/// What the harness should do, resolved from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// JSON array of documents to save before running the query.
    pub seed_path: PathBuf,
    /// JSON search request. `None` searches without a request.
    pub request_path: Option<PathBuf>,
    /// When set, look this id up instead of searching.
    pub find_id: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, CliError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, CliError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let seed_path = get(SEED_VAR)
            .map(PathBuf::from)
            .ok_or(CliError::MissingVar(SEED_VAR))?;

        Ok(Self {
            seed_path,
            request_path: get(REQUEST_VAR).map(PathBuf::from),
            find_id: get(FIND_ID_VAR),
        })
    }
}
