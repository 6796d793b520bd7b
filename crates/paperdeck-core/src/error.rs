use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PaperdeckError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("CSV source not found: {0}")]
    SourceNotFound(PathBuf),

    #[error("Missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PaperdeckError>;
