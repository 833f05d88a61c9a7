use std::path::PathBuf;

use thiserror::Error;

use crate::constants::{EXIT_DATA_ERROR, EXIT_FAILURE, EXIT_USAGE};

#[derive(Error, Debug)]
pub enum LensError {
    #[error(transparent)]
    Cli(#[from] clap::Error),

    #[error("Feature with ID {id} is not recognized. Valid feature IDs: {}", format_ids(.valid))]
    UnknownFeature { id: u32, valid: Vec<u32> },

    #[error("Duplicate feature_id {id} in feature '{name}' (already registered by '{existing}')")]
    DuplicateFeature {
        id: u32,
        name: String,
        existing: String,
    },

    #[error("Feature '{0}' must use a positive feature_id")]
    InvalidFeatureId(String),

    #[error("Invalid argument info: {0}")]
    InvalidArgInfo(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Data file not found: {}", .0.display())]
    DataFileNotFound(PathBuf),

    #[error("Failed to parse data file {}: {message}", .path.display())]
    DataParse { path: PathBuf, message: String },

    #[error("{0}")]
    EmptyResult(String),

    #[error("Terminal error: {0}")]
    Terminal(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl LensError {
    /// Process exit status for this error class.
    pub fn exit_code(&self) -> i32 {
        match self {
            LensError::Cli(e) => e.exit_code(),
            LensError::UnknownFeature { .. } => EXIT_USAGE,
            LensError::EmptyResult(_) => EXIT_DATA_ERROR,
            _ => EXIT_FAILURE,
        }
    }
}

fn format_ids(ids: &[u32]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

pub type LensResult<T> = Result<T, LensError>;
