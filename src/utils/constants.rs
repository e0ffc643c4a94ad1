/// File names inside the UCI bike-sharing dataset
pub const DEFAULT_HOURLY_FILE: &str = "hour.csv";
pub const DEFAULT_DAILY_FILE: &str = "day.csv";
pub const DEFAULT_DATA_PATH: &str = "data";

/// Field separator of the UCI files
pub const DEFAULT_DELIMITER: u8 = b',';

/// Columns that must be present in each input file
pub const HOURLY_REQUIRED_COLUMNS: [&str; 7] =
    ["dteday", "season", "weathersit", "hr", "temp", "hum", "cnt"];
pub const DAILY_REQUIRED_COLUMNS: [&str; 6] =
    ["dteday", "season", "weathersit", "temp", "hum", "cnt"];

/// Hours in the per-hour seasonal profile
pub const HOURS_PER_DAY: usize = 24;

/// Box-plot whisker reach, in multiples of the interquartile range
pub const OUTLIER_IQR_FACTOR: f64 = 1.5;

/// Number of rows shown in the filtered-data preview
pub const DEFAULT_PREVIEW_ROWS: usize = 5;

/// Configuration sources
pub const CONFIG_FILE_STEM: &str = "bikeshare";
pub const CONFIG_ENV_PREFIX: &str = "BIKESHARE";
