//! Runtime configuration.

use crate::error::{DashboardError, Result};
use crate::processors::SeasonCodePolicy;
use crate::readers::{DataSource, TableFiles};
use crate::store::LoadOptions;
use crate::utils::constants::{
    CONFIG_ENV_PREFIX, CONFIG_FILE_STEM, DEFAULT_DAILY_FILE, DEFAULT_DATA_PATH,
    DEFAULT_DELIMITER, DEFAULT_HOURLY_FILE, DEFAULT_PREVIEW_ROWS,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct DashboardConfig {
    /// Directory with the CSV files, or the dataset zip archive
    pub data_path: PathBuf,

    #[validate(length(min = 1))]
    pub hourly_file: String,

    #[validate(length(min = 1))]
    pub daily_file: String,

    /// Single ASCII character separating fields in both tables
    #[validate(length(equal = 1))]
    pub delimiter: String,

    pub season_policy: SeasonCodePolicy,

    #[validate(range(min = 1, max = 1000))]
    pub preview_rows: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            hourly_file: DEFAULT_HOURLY_FILE.to_string(),
            daily_file: DEFAULT_DAILY_FILE.to_string(),
            delimiter: char::from(DEFAULT_DELIMITER).to_string(),
            season_policy: SeasonCodePolicy::default(),
            preview_rows: DEFAULT_PREVIEW_ROWS,
        }
    }
}

impl DashboardConfig {
    /// Load configuration, later sources overriding earlier ones:
    /// 1. built-in defaults
    /// 2. `bikeshare.toml` in the working directory, or `explicit` if given
    /// 3. `BIKESHARE_*` environment variables
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let builder = config::Config::builder();
        let builder = match explicit {
            Some(path) => builder.add_source(config::File::from(path).required(true)),
            None => builder.add_source(config::File::with_name(CONFIG_FILE_STEM).required(false)),
        };

        let config: DashboardConfig = builder
            .add_source(config::Environment::with_prefix(CONFIG_ENV_PREFIX).try_parsing(true))
            .build()?
            .try_deserialize()?;

        config.validate()?;
        config.delimiter_byte()?;
        Ok(config)
    }

    /// The delimiter as the byte the CSV reader expects.
    pub fn delimiter_byte(&self) -> Result<u8> {
        match self.delimiter.as_bytes() {
            [byte] if byte.is_ascii() => Ok(*byte),
            _ => Err(DashboardError::Config(format!(
                "delimiter must be a single ASCII character, got '{}'",
                self.delimiter
            ))),
        }
    }

    pub fn data_source(&self) -> DataSource {
        DataSource::detect(&self.data_path)
    }

    pub fn load_options(&self) -> Result<LoadOptions> {
        Ok(LoadOptions {
            files: TableFiles {
                hourly: self.hourly_file.clone(),
                daily: self.daily_file.clone(),
            },
            season_policy: self.season_policy,
            delimiter: self.delimiter_byte()?,
        })
    }
}
