use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use once_cell::unsync::OnceCell;
use serde_json::Value;

use crate::config::Config;
use crate::constants::{DATA_PATH_PARAM, DEFAULT_DATA_PATH};
use crate::error::{LensError, LensResult};
use crate::logging::{log_error, log_info};
use crate::models::Issue;

/// Loads the issue export once and hands out the cached list afterwards.
///
/// Created in `main` and lent to every analysis. A failed load leaves the
/// cache empty, so the next call tries the file again.
#[derive(Debug, Default)]
pub struct DataLoader {
    cache: OnceCell<Vec<Issue>>,
}

impl DataLoader {
    pub fn new() -> Self {
        Self {
            cache: OnceCell::new(),
        }
    }

    /// A loader that is already populated and never reads a file.
    pub fn with_issues(issues: Vec<Issue>) -> Self {
        Self {
            cache: OnceCell::with_value(issues),
        }
    }

    pub fn get_issues(&self, config: &Config) -> LensResult<&[Issue]> {
        self.cache
            .get_or_try_init(|| load_issues(&resolve_data_path(config)))
            .map(Vec::as_slice)
    }

    pub fn is_loaded(&self) -> bool {
        self.cache.get().is_some()
    }

    /// Drop the cached issues. Test hook only.
    pub fn reset(&mut self) {
        self.cache.take();
    }
}

pub fn resolve_data_path(config: &Config) -> PathBuf {
    config
        .get_string(DATA_PATH_PARAM)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_PATH))
}

pub fn load_issues(path: &Path) -> LensResult<Vec<Issue>> {
    log_info(&format!("Loading issues from {}", path.display()));

    let contents = fs::read_to_string(path).map_err(|e| {
        log_error(&format!("Failed to read {}: {}", path.display(), e));
        if e.kind() == ErrorKind::NotFound {
            LensError::DataFileNotFound(path.to_path_buf())
        } else {
            LensError::Io(e)
        }
    })?;

    let issues = parse_issues(&contents).map_err(|message| {
        log_error(&format!("Failed to parse {}: {}", path.display(), message));
        LensError::DataParse {
            path: path.to_path_buf(),
            message,
        }
    })?;

    log_info(&format!("Loaded {} issues", issues.len()));
    Ok(issues)
}

/// Parse a JSON array of issue records, keeping array order.
pub fn parse_issues(contents: &str) -> Result<Vec<Issue>, String> {
    let records: Vec<Value> = serde_json::from_str(contents).map_err(|e| e.to_string())?;
    records
        .iter()
        .enumerate()
        .map(|(index, record)| {
            Issue::from_value(record).map_err(|e| format!("issue at index {}: {}", index, e))
        })
        .collect()
}
