use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{DashboardError, Result};
use crate::models::hourly::ensure_finite;
use crate::models::{PassThroughColumns, WeatherSituation};
use crate::utils::dates::parse_day;

/// One line of `day.csv` as it appears in the file.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct DailyRow {
    pub dteday: String,
    pub season: i64,

    #[validate(range(min = 1, max = 4))]
    pub weathersit: u8,

    #[validate(range(min = 0.0, max = 1.0))]
    pub temp: f64,

    #[validate(range(min = 0.0, max = 1.0))]
    pub hum: f64,

    pub cnt: u32,

    pub instant: Option<u32>,
    pub yr: Option<u8>,
    pub mnth: Option<u8>,
    pub holiday: Option<u8>,
    pub weekday: Option<u8>,
    pub workingday: Option<u8>,
    pub atemp: Option<f64>,
    pub windspeed: Option<f64>,
    pub casual: Option<u32>,
    pub registered: Option<u32>,
}

impl DailyRow {
    pub fn into_record(self, row: usize, source_name: &str) -> Result<DailyRecord> {
        self.validate().map_err(|e| {
            DashboardError::data_load(source_name, format!("row {}: {}", row, e))
        })?;
        ensure_finite(row, source_name, &[("temp", self.temp), ("hum", self.hum)])?;

        let date = parse_day(&self.dteday).ok_or_else(|| {
            DashboardError::data_load(
                source_name,
                format!("row {}: unparseable date '{}'", row, self.dteday),
            )
        })?;

        let weather = WeatherSituation::from_code(self.weathersit).ok_or_else(|| {
            DashboardError::data_load(
                source_name,
                format!("row {}: invalid weathersit {}", row, self.weathersit),
            )
        })?;

        Ok(DailyRecord {
            date,
            season_code: self.season,
            weather,
            temperature: self.temp,
            humidity: self.hum,
            rental_count: self.cnt,
            extra: PassThroughColumns {
                instant: self.instant,
                yr: self.yr,
                mnth: self.mnth,
                holiday: self.holiday,
                weekday: self.weekday,
                workingday: self.workingday,
                atemp: self.atemp,
                windspeed: self.windspeed,
                casual: self.casual,
                registered: self.registered,
            },
        })
    }
}

/// Daily totals. Kept as loaded; the season code is not resolved.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyRecord {
    pub date: NaiveDate,
    pub season_code: i64,
    pub weather: WeatherSituation,
    pub temperature: f64,
    pub humidity: f64,
    pub rental_count: u32,
    pub extra: PassThroughColumns,
}
