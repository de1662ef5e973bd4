use std::path::PathBuf;

use thiserror::Error;

/// The primary error type that can be produced by Spotter.
#[derive(Debug, Error)]
pub enum Error {
    #[error("table has {columns} column(s), but at least 2 are needed to resolve name and address")]
    SchemaIncomplete { columns: usize },
    #[error("table has no header row")]
    EmptyTable,
    #[error("I/O error {0}: {1}")]
    Io(String, std::io::Error),
    #[error("failed to load data from file {0}: {1}")]
    LoadFromFile(PathBuf, Box<Error>),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("cannot determine file type of file: {0}")]
    CannotDetermineFileType(PathBuf),
    #[error("failed to load configuration from {0}")]
    FailedToLoadConfig(PathBuf),
    #[error("invalid delimiter \"{0}\": must be a single ASCII character")]
    InvalidDelimiter(String),
    #[error("no dataset is currently loaded")]
    NotLoaded,
}
