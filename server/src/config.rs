//! Server configuration from environment variables.

use std::env;
use std::path::PathBuf;

use pantry_core::{DatasetLocation, DEFAULT_TABLE};
use thiserror::Error;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_RECIPES_FILE: &str = "data/recipes.json";
pub const DEFAULT_PAGE_SIZE: usize = 10;
pub const MAX_PAGE_SIZE: usize = 100;

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid value for {var}: {value:?}")]
    InvalidValue { var: String, value: String },
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub dataset: DatasetLocation,
    /// Table to read when the dataset is a multi-table workbook.
    pub dataset_table: String,
    /// Flat JSON file backing user-submitted recipes.
    pub recipes_file: PathBuf,
    pub bind_addr: String,
    pub default_page_size: usize,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Required:
    /// - `PANTRY_DATASET`: path or http(s) URL of the recipe dataset
    ///
    /// Optional:
    /// - `PANTRY_DATASET_TABLE`: workbook table (default: "recipes_data")
    /// - `PANTRY_RECIPES_FILE`: user recipe store (default: "data/recipes.json")
    /// - `PANTRY_BIND_ADDR`: listen address (default: "0.0.0.0:3000")
    /// - `PANTRY_DEFAULT_PAGE_SIZE`: search page size (default: 10, max: 100)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let dataset = get("PANTRY_DATASET")
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar("PANTRY_DATASET".to_string()))?;

        let dataset_table =
            get("PANTRY_DATASET_TABLE").unwrap_or_else(|| DEFAULT_TABLE.to_string());

        let recipes_file = get("PANTRY_RECIPES_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_RECIPES_FILE));

        let bind_addr = get("PANTRY_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());

        let default_page_size = match get("PANTRY_DEFAULT_PAGE_SIZE") {
            None => DEFAULT_PAGE_SIZE,
            Some(value) => match value.trim().parse::<usize>() {
                Ok(n) if n > 0 => n.min(MAX_PAGE_SIZE),
                _ => {
                    return Err(ConfigError::InvalidValue {
                        var: "PANTRY_DEFAULT_PAGE_SIZE".to_string(),
                        value,
                    })
                }
            },
        };

        Ok(Self {
            dataset: DatasetLocation::parse(dataset.trim()),
            dataset_table,
            recipes_file,
            bind_addr,
            default_page_size,
        })
    }

    /// Page size for a request: the configured default when absent, clamped
    /// to `1..=MAX_PAGE_SIZE` otherwise.
    pub fn page_size(&self, requested: Option<usize>) -> usize {
        requested
            .unwrap_or(self.default_page_size)
            .clamp(1, MAX_PAGE_SIZE)
    }
}
