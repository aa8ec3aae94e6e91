//! Flat YAML files of `NAME: value` pairs exported into the process environment.

use std::collections::BTreeMap;
use std::path::Path;

use serde_yaml::Value;
use tracing::debug;

use super::ConfigError;

/// Read and validate an env file without touching the environment
pub fn read_env_file(path: &Path) -> Result<BTreeMap<String, String>, ConfigError> {
    let display = path.display().to_string();
    let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: display.clone(),
        source,
    })?;
    parse_env_yaml(&raw, &display)
}

/// Export every entry of the file with `std::env::set_var`; returns how many were set
pub fn load_env_file(path: &Path) -> Result<usize, ConfigError> {
    let vars = read_env_file(path)?;
    for (key, value) in &vars {
        std::env::set_var(key, value);
    }
    debug!(path = %path.display(), count = vars.len(), "loaded env file");
    Ok(vars.len())
}

fn parse_env_yaml(raw: &str, path: &str) -> Result<BTreeMap<String, String>, ConfigError> {
    if raw.trim().is_empty() {
        return Err(ConfigError::Empty { path: path.to_string() });
    }

    let parsed: BTreeMap<String, Value> = serde_yaml::from_str(raw).map_err(|source| ConfigError::Parse {
        path: path.to_string(),
        source,
    })?;
    if parsed.is_empty() {
        return Err(ConfigError::Empty { path: path.to_string() });
    }

    parsed
        .into_iter()
        .map(|(key, value)| {
            let value = match value {
                Value::String(s) => s,
                Value::Number(n) => n.to_string(),
                Value::Bool(b) => b.to_string(),
                Value::Null => String::new(),
                _ => return Err(ConfigError::NonScalar { path: path.to_string(), key }),
            };
            Ok((key, value))
        })
        .collect()
}
