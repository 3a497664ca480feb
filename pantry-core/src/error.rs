use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("Unexpected HTTP status {status} for {url}")]
    Status { url: String, status: u16 },
}

/// The dataset as a whole could not be loaded. Distinct from a load that
/// succeeded with zero usable rows.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Dataset not found: {0}")]
    NotFound(String),

    #[error("Failed to read dataset: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to fetch dataset: {0}")]
    Fetch(#[from] FetchError),

    #[error("Table '{table}' not found (available: {})", available.join(", "))]
    TableNotFound {
        table: String,
        available: Vec<String>,
    },

    #[error("Dataset is missing required column '{0}'")]
    MissingColumn(String),

    #[error("Invalid JSON dataset: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Invalid CSV dataset: {0}")]
    InvalidCsv(#[from] csv::Error),

    #[error("Invalid workbook: {0}")]
    InvalidWorkbook(#[from] calamine::Error),
}

/// Why a single row was dropped during load.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RowError {
    #[error("Row has no title")]
    MissingTitle,

    #[error("Malformed '{field}' field: {reason}")]
    MalformedField { field: &'static str, reason: String },

    #[error("Row is not an object")]
    NotAnObject,

    #[error("Unreadable row: {0}")]
    Unreadable(String),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SearchError {
    #[error("Please provide at least one ingredient")]
    EmptyQuery,

    #[error("Page number and page size must be positive")]
    InvalidPage,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlanError {
    #[error("Unknown day of the week: {0}")]
    UnknownDay(String),

    #[error("Recipe name cannot be empty")]
    EmptyRecipeName,

    #[error("Every day must be planned before changing a day")]
    PlanIncomplete,

    #[error("Every day is already planned")]
    PlanComplete,
}
