use thiserror::Error;

pub type Result<T> = std::result::Result<T, DashboardError>;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("Failed to load {source_name}: {message}")]
    DataLoad {
        source_name: String,
        message: String,
    },

    #[error("Invalid season code {code} in data row {row} (expected 1-4)")]
    InvalidSeasonCode { row: usize, code: i64 },

    #[error("Invalid selection: {0}")]
    InvalidSelection(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),
}

impl DashboardError {
    pub fn data_load(source_name: impl Into<String>, message: impl Into<String>) -> Self {
        DashboardError::DataLoad {
            source_name: source_name.into(),
            message: message.into(),
        }
    }
}

impl From<config::ConfigError> for DashboardError {
    fn from(err: config::ConfigError) -> Self {
        DashboardError::Config(err.to_string())
    }
}
