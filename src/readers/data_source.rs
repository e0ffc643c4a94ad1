use crate::error::{DashboardError, Result};
use crate::models::{DailyRecord, RawHourlyRecord};
use crate::readers::TableReader;
use crate::utils::constants::{DEFAULT_DAILY_FILE, DEFAULT_HOURLY_FILE};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use zip::ZipArchive;

/// File names of the two tables inside a directory or archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableFiles {
    pub hourly: String,
    pub daily: String,
}

impl Default for TableFiles {
    fn default() -> Self {
        Self {
            hourly: DEFAULT_HOURLY_FILE.to_string(),
            daily: DEFAULT_DAILY_FILE.to_string(),
        }
    }
}

/// Where the two tables live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    /// A directory holding `hour.csv` and `day.csv`.
    Directory(PathBuf),
    /// A zip archive such as the UCI `Bike-Sharing-Dataset.zip`.
    Archive(PathBuf),
}

impl DataSource {
    pub fn detect(path: &Path) -> Self {
        let is_zip = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.eq_ignore_ascii_case("zip"))
            .unwrap_or(false);

        if is_zip {
            DataSource::Archive(path.to_path_buf())
        } else {
            DataSource::Directory(path.to_path_buf())
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            DataSource::Directory(path) | DataSource::Archive(path) => path,
        }
    }

    /// Read both tables. Dates are parsed, nothing else is changed.
    pub fn read_tables(
        &self,
        files: &TableFiles,
        reader: &TableReader,
    ) -> Result<(Vec<RawHourlyRecord>, Vec<DailyRecord>)> {
        info!(source = %self.path().display(), "loading bike-sharing tables");

        let tables = match self {
            DataSource::Directory(dir) => Self::read_directory(dir, files, reader)?,
            DataSource::Archive(zip_path) => Self::read_archive(zip_path, files, reader)?,
        };

        info!(
            hourly_rows = tables.0.len(),
            daily_rows = tables.1.len(),
            "tables loaded"
        );
        Ok(tables)
    }

    fn read_directory(
        dir: &Path,
        files: &TableFiles,
        reader: &TableReader,
    ) -> Result<(Vec<RawHourlyRecord>, Vec<DailyRecord>)> {
        let hourly_path = dir.join(&files.hourly);
        let daily_path = dir.join(&files.daily);

        let hourly = reader.read_hourly(Self::open(&hourly_path)?, &files.hourly)?;
        let daily = reader.read_daily(Self::open(&daily_path)?, &files.daily)?;

        Ok((hourly, daily))
    }

    fn open(path: &Path) -> Result<BufReader<File>> {
        let file = File::open(path).map_err(|e| {
            DashboardError::data_load(path.display().to_string(), format!("cannot open file: {}", e))
        })?;
        Ok(BufReader::new(file))
    }

    fn read_archive(
        zip_path: &Path,
        files: &TableFiles,
        reader: &TableReader,
    ) -> Result<(Vec<RawHourlyRecord>, Vec<DailyRecord>)> {
        let file = File::open(zip_path).map_err(|e| {
            DashboardError::data_load(
                zip_path.display().to_string(),
                format!("cannot open archive: {}", e),
            )
        })?;
        let mut archive = ZipArchive::new(file).map_err(|e| {
            DashboardError::data_load(
                zip_path.display().to_string(),
                format!("not a readable zip archive: {}", e),
            )
        })?;

        let hourly_entry = Self::find_entry(&archive, zip_path, &files.hourly)?;
        let daily_entry = Self::find_entry(&archive, zip_path, &files.daily)?;
        debug!(hourly = %hourly_entry, daily = %daily_entry, "archive entries located");

        let hourly = {
            let entry = archive.by_name(&hourly_entry)?;
            reader.read_hourly(entry, &hourly_entry)?
        };
        let daily = {
            let entry = archive.by_name(&daily_entry)?;
            reader.read_daily(entry, &daily_entry)?
        };

        Ok((hourly, daily))
    }

    /// Find an entry by file name in any folder of the archive, skipping
    /// macOS resource forks.
    fn find_entry(archive: &ZipArchive<File>, zip_path: &Path, file_name: &str) -> Result<String> {
        let mut candidates: Vec<&str> = archive
            .file_names()
            .filter(|name| !name.starts_with("__MACOSX/"))
            .filter(|name| name.rsplit('/').next() == Some(file_name))
            .collect();
        candidates.sort_by_key(|name| name.len());

        candidates
            .first()
            .map(|name| name.to_string())
            .ok_or_else(|| {
                DashboardError::data_load(
                    zip_path.display().to_string(),
                    format!("archive has no entry named '{}'", file_name),
                )
            })
    }
}
