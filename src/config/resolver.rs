use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use clap::parser::ValueSource;
use clap::{ArgMatches, Command};
use serde_json::{Map, Value};

use crate::constants::{CONFIG_FILE, CONFIG_PATH_ENV, ENV_PREFIX};
use crate::error::{LensError, LensResult};
use crate::logging::{log_debug, log_info};

/// Named-parameter resolver.
///
/// Lookup order: explicit overrides (CLI values, `set`), the environment,
/// the JSON config file, then the caller's default.
#[derive(Debug, Clone, Default)]
pub struct Config {
    overrides: HashMap<String, Value>,
    file_values: Map<String, Value>,
    env_prefix: Option<String>,
    source: Option<PathBuf>,
}

impl Config {
    /// Load the config file and enable environment lookups.
    ///
    /// `explicit` (or `ISSUE_LENS_CONFIG`) must point at an existing file;
    /// otherwise `config.json` in the working directory is used if present.
    pub fn load(explicit: Option<&Path>) -> LensResult<Self> {
        let explicit = explicit
            .map(Path::to_path_buf)
            .or_else(|| env::var_os(CONFIG_PATH_ENV).map(PathBuf::from));

        let path = match explicit {
            Some(path) => {
                if !path.is_file() {
                    return Err(LensError::Config(format!(
                        "config file {} does not exist",
                        path.display()
                    )));
                }
                Some(path)
            }
            None => default_config_path(),
        };

        let file_values = match &path {
            Some(path) => read_config_file(path)?,
            None => {
                log_info("Initializing empty config");
                Map::new()
            }
        };

        let mut config = Config::from_parts(file_values, Some(ENV_PREFIX));
        config.source = path;
        Ok(config)
    }

    /// Build a resolver from already-parsed file values. `env_prefix: None`
    /// turns environment lookups off.
    pub fn from_parts(file_values: Map<String, Value>, env_prefix: Option<&str>) -> Self {
        Self {
            overrides: HashMap::new(),
            file_values,
            env_prefix: env_prefix.map(str::to_string),
            source: None,
        }
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn set(&mut self, name: &str, value: Value) {
        log_debug(&format!("Config override {} = {}", name, value));
        self.overrides.insert(name.to_string(), value);
    }

    pub fn get(&self, name: &str) -> Option<Value> {
        if let Some(value) = self.overrides.get(name) {
            return Some(value.clone());
        }
        if let Some(raw) = self.env_value(name) {
            return Some(coerce_value(&raw));
        }
        self.file_values.get(name).cloned()
    }

    pub fn get_or(&self, name: &str, default: Value) -> Value {
        self.get(name).unwrap_or(default)
    }

    /// String view of a parameter; scalars are stringified, null and
    /// containers count as absent. Environment values are returned as
    /// written, without JSON coercion.
    pub fn get_string(&self, name: &str) -> Option<String> {
        if let Some(value) = self.overrides.get(name) {
            return scalar_string(value);
        }
        if let Some(raw) = self.env_value(name) {
            return Some(raw);
        }
        self.file_values.get(name).and_then(scalar_string)
    }

    pub fn get_u64_or(&self, name: &str, default: u64) -> u64 {
        match self.get(name) {
            Some(Value::Number(n)) => n.as_u64().unwrap_or(default),
            Some(Value::String(s)) => s.trim().parse().unwrap_or(default),
            _ => default,
        }
    }

    /// Like `get_u64_or`, for "how many to show" options: zero means unset.
    pub fn get_count_or(&self, name: &str, default: u64) -> u64 {
        match self.get_u64_or(name, default) {
            0 => default,
            count => count,
        }
    }

    fn env_value(&self, name: &str) -> Option<String> {
        let prefix = self.env_prefix.as_deref()?;
        env::var(env_key(prefix, name)).ok()
    }

    /// Record every argument the user actually typed as an override.
    ///
    /// Values that only come from clap defaults are skipped so they do not
    /// shadow the environment or the config file. Arguments clap parsed as
    /// text are stored verbatim; typed ones are coerced from their raw form.
    pub fn overwrite_from_matches(&mut self, command: &Command, matches: &ArgMatches) {
        for arg in command.get_arguments() {
            let id = arg.get_id().as_str();
            if matches.value_source(id) != Some(ValueSource::CommandLine) {
                continue;
            }
            let value = match matches.try_get_many::<String>(id) {
                Ok(Some(values)) => values.last().cloned().map(Value::String),
                _ => matches
                    .get_raw(id)
                    .and_then(|values| values.last())
                    .map(|raw| coerce_value(&raw.to_string_lossy())),
            };
            if let Some(value) = value {
                self.set(id, value);
            }
        }
    }
}

/// Best-effort typing for textual values: JSON objects, arrays, booleans,
/// null and numbers keep their type, anything else stays a string.
pub fn coerce_value(raw: &str) -> Value {
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::String(_)) | Err(_) => Value::String(raw.to_string()),
        Ok(value) => value,
    }
}

fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

pub fn env_key(prefix: &str, name: &str) -> String {
    format!("{}{}", prefix, name.to_uppercase().replace('-', "_"))
}

pub fn default_config_path() -> Option<PathBuf> {
    let path = env::current_dir().ok()?.join(CONFIG_FILE);
    path.is_file().then_some(path)
}

fn read_config_file(path: &Path) -> LensResult<Map<String, Value>> {
    log_info(&format!("Loading config from {}", path.display()));
    let contents = fs::read_to_string(path).map_err(|e| {
        LensError::Config(format!("cannot read config file {}: {}", path.display(), e))
    })?;
    match serde_json::from_str::<Value>(&contents) {
        Ok(Value::Object(values)) => Ok(values),
        Ok(_) => Err(LensError::Config(format!(
            "config file {} must contain a JSON object",
            path.display()
        ))),
        Err(e) => Err(LensError::Config(format!(
            "config file {} is not valid JSON: {}",
            path.display(),
            e
        ))),
    }
}
