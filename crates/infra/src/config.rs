//! Configuration loading and representation.
//!
//! Everything is read from `BOOKSTORE_*` environment variables; unset variables
//! fall back to the defaults below.

use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;

pub const ENV_DATA_FILE: &str = "BOOKSTORE_DATA_FILE";
pub const ENV_ON_DUPLICATE: &str = "BOOKSTORE_ON_DUPLICATE";
pub const ENV_ON_UNKNOWN_KIND: &str = "BOOKSTORE_ON_UNKNOWN_KIND";
pub const ENV_PERSIST_PURCHASES: &str = "BOOKSTORE_PERSIST_PURCHASES";

pub const DEFAULT_DATA_FILE: &str = "books/index.json";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {key} (expected one of: {expected})")]
    Invalid {
        key: &'static str,
        value: String,
        expected: &'static str,
    },
}

/// What `add` does when the identifier is already in the catalog.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum DuplicatePolicy {
    /// Replace the existing entry (last write wins).
    #[default]
    Overwrite,
    /// Refuse the add and keep the existing entry.
    Reject,
}

impl FromStr for DuplicatePolicy {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "overwrite" => Ok(DuplicatePolicy::Overwrite),
            "reject" => Ok(DuplicatePolicy::Reject),
            _ => Err(()),
        }
    }
}

/// What loading does with a persisted record whose kind is not recognized.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum UnknownKindPolicy {
    /// Leave it out of the catalog (it stays in the file).
    #[default]
    Skip,
    /// Fail the load.
    Fail,
}

impl FromStr for UnknownKindPolicy {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "skip" => Ok(UnknownKindPolicy::Skip),
            "fail" => Ok(UnknownKindPolicy::Fail),
            _ => Err(()),
        }
    }
}

/// Catalog service configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    /// Backing JSON file.
    pub data_file: PathBuf,
    pub on_duplicate: DuplicatePolicy,
    pub on_unknown_kind: UnknownKindPolicy,
    /// Write the catalog back after each successful purchase so stock changes
    /// survive a restart.
    pub persist_purchases: bool,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            on_duplicate: DuplicatePolicy::default(),
            on_unknown_kind: UnknownKindPolicy::default(),
            persist_purchases: true,
        }
    }
}

impl CatalogConfig {
    /// Read the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(path) = lookup(ENV_DATA_FILE).filter(|p| !p.trim().is_empty()) {
            config.data_file = PathBuf::from(path);
        }
        if let Some(value) = lookup(ENV_ON_DUPLICATE) {
            config.on_duplicate = parse(ENV_ON_DUPLICATE, value, "overwrite, reject")?;
        }
        if let Some(value) = lookup(ENV_ON_UNKNOWN_KIND) {
            config.on_unknown_kind = parse(ENV_ON_UNKNOWN_KIND, value, "skip, fail")?;
        }
        if let Some(value) = lookup(ENV_PERSIST_PURCHASES) {
            config.persist_purchases = parse_bool(ENV_PERSIST_PURCHASES, value)?;
        }

        Ok(config)
    }

    pub fn with_data_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.data_file = path.into();
        self
    }
}

fn parse<T: FromStr>(key: &'static str, value: String, expected: &'static str) -> Result<T, ConfigError> {
    value.parse().map_err(|_| ConfigError::Invalid {
        key,
        value,
        expected,
    })
}

fn parse_bool(key: &'static str, value: String) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid {
            key,
            value,
            expected: "true, false",
        }),
    }
}
