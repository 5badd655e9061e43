use std::fs;
use std::path::{Path, PathBuf};

use crate::model::config::AppConfig;
use crate::model::settings::FontSize;

/// Environment variable overriding the config directory
pub const CONFIG_DIR_ENV: &str = "CHECKLIST_CONFIG_DIR";

/// Error type for configuration I/O
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not write {path}: {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse config.toml: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("could not edit config.toml: {0}")]
    EditError(#[from] toml_edit::TomlError),
    #[error("unknown config key: {0}")]
    UnknownKey(String),
    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}

/// Keys accepted by `ckl config`
pub const CONFIG_KEYS: &[&str] = &[
    "defaults.title",
    "defaults.font_size",
    "defaults.strikethrough",
    "links.opener",
    "recent.limit",
];

/// The config directory: `$CHECKLIST_CONFIG_DIR`, else
/// `$XDG_CONFIG_HOME/checklist`, else `~/.config/checklist`.
pub fn config_dir() -> PathBuf {
    if let Ok(dir) = std::env::var(CONFIG_DIR_ENV)
        && !dir.is_empty()
    {
        return PathBuf::from(dir);
    }
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".config"));
    base.join("checklist")
}

fn home_dir() -> PathBuf {
    std::env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("/"))
}

pub fn config_path(dir: &Path) -> PathBuf {
    dir.join("config.toml")
}

/// Read the config from `dir`. A missing file yields the defaults.
pub fn read_config(dir: &Path) -> Result<AppConfig, ConfigError> {
    let path = config_path(dir);
    if !path.exists() {
        return Ok(AppConfig::default());
    }
    let text = fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        source: e,
    })?;
    Ok(toml::from_str(&text)?)
}

/// Read the config, falling back to defaults (with a warning) if it is broken.
pub fn load_config(dir: &Path) -> AppConfig {
    match read_config(dir) {
        Ok(config) => config,
        Err(e) => {
            log::warn!("{}; using default configuration", e);
            AppConfig::default()
        }
    }
}

/// Look up a dotted key in the config file as text.
/// Returns None if the key is valid but not set.
pub fn get_value(dir: &Path, key: &str) -> Result<Option<String>, ConfigError> {
    let (table, field) = split_key(key)?;
    let doc = read_document(dir)?;
    let value = doc
        .get(table)
        .and_then(|t| t.get(field))
        .and_then(|item| item.as_value())
        .map(|v| match v.as_str() {
            Some(s) => s.to_string(),
            None => v.to_string().trim().to_string(),
        });
    Ok(value)
}

/// Set a dotted key in the config file, preserving the rest of the file's
/// formatting and comments.
pub fn set_value(dir: &Path, key: &str, raw: &str) -> Result<(), ConfigError> {
    let (table, field) = split_key(key)?;
    let value = typed_value(key, raw)?;

    let mut doc = read_document(dir)?;
    if !doc.contains_key(table) {
        doc[table] = toml_edit::Item::Table(toml_edit::Table::new());
    }
    doc[table][field] = toml_edit::Item::Value(value);

    let text = doc.to_string();
    // The edited file must still load
    toml::from_str::<AppConfig>(&text)?;

    fs::create_dir_all(dir).map_err(|e| ConfigError::WriteError {
        path: dir.to_path_buf(),
        source: e,
    })?;
    let path = config_path(dir);
    fs::write(&path, text).map_err(|e| ConfigError::WriteError { path, source: e })?;
    Ok(())
}

fn read_document(dir: &Path) -> Result<toml_edit::DocumentMut, ConfigError> {
    let path = config_path(dir);
    if !path.exists() {
        return Ok(toml_edit::DocumentMut::new());
    }
    let text = fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        source: e,
    })?;
    Ok(text.parse::<toml_edit::DocumentMut>()?)
}

fn split_key(key: &str) -> Result<(&str, &str), ConfigError> {
    if !CONFIG_KEYS.contains(&key) {
        return Err(ConfigError::UnknownKey(key.to_string()));
    }
    key.split_once('.')
        .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))
}

fn typed_value(key: &str, raw: &str) -> Result<toml_edit::Value, ConfigError> {
    let invalid = || ConfigError::InvalidValue {
        key: key.to_string(),
        value: raw.to_string(),
    };
    let value = match key {
        "defaults.font_size" => {
            let size = FontSize::from_token(raw.trim()).ok_or_else(invalid)?;
            toml_edit::Value::from(size.as_str())
        }
        "defaults.strikethrough" => {
            let flag: bool = raw.trim().parse().map_err(|_| invalid())?;
            toml_edit::Value::from(flag)
        }
        "recent.limit" => {
            let limit: i64 = raw.trim().parse().map_err(|_| invalid())?;
            if limit < 0 {
                return Err(invalid());
            }
            toml_edit::Value::from(limit)
        }
        _ => toml_edit::Value::from(raw),
    };
    Ok(value)
}
