use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{DashboardError, Result};
use crate::models::{PassThroughColumns, Season, WeatherSituation};
use crate::utils::dates::parse_day;

/// One line of `hour.csv` as it appears in the file.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct HourlyRow {
    pub dteday: String,
    pub season: i64,

    #[validate(range(min = 0, max = 23))]
    pub hr: u8,

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

/// `range` checks let NaN through, so measurements are also checked here.
pub(crate) fn ensure_finite(row: usize, source_name: &str, fields: &[(&str, f64)]) -> Result<()> {
    match fields.iter().find(|(_, value)| !value.is_finite()) {
        Some((name, value)) => Err(DashboardError::data_load(
            source_name,
            format!("row {}: {} is not a finite number ({})", row, name, value),
        )),
        None => Ok(()),
    }
}

impl HourlyRow {
    /// Check ranges and parse the date. `row` is the 1-based data row.
    pub fn into_record(self, row: usize, source_name: &str) -> Result<RawHourlyRecord> {
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

        Ok(RawHourlyRecord {
            date,
            hour: self.hr,
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

/// An hourly observation before the season label is attached.
#[derive(Debug, Clone, PartialEq)]
pub struct RawHourlyRecord {
    pub date: NaiveDate,
    pub hour: u8,
    pub season_code: i64,
    pub weather: WeatherSituation,
    pub temperature: f64,
    pub humidity: f64,
    pub rental_count: u32,
    pub extra: PassThroughColumns,
}

impl RawHourlyRecord {
    pub fn with_season(self, season: Season) -> HourlyRecord {
        HourlyRecord {
            date: self.date,
            hour: self.hour,
            season,
            weather: self.weather,
            temperature: self.temperature,
            humidity: self.humidity,
            rental_count: self.rental_count,
            extra: self.extra,
        }
    }
}

/// An hourly observation with its season resolved.
///
/// The season code and label are both derived from `season`, so they
/// cannot drift apart after load.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourlyRecord {
    pub date: NaiveDate,
    pub hour: u8,
    pub season: Season,
    pub weather: WeatherSituation,
    pub temperature: f64,
    pub humidity: f64,
    pub rental_count: u32,
    pub extra: PassThroughColumns,
}

impl HourlyRecord {
    pub fn new(
        date: NaiveDate,
        hour: u8,
        season: Season,
        weather: WeatherSituation,
        rental_count: u32,
    ) -> Self {
        Self {
            date,
            hour,
            season,
            weather,
            temperature: 0.0,
            humidity: 0.0,
            rental_count,
            extra: PassThroughColumns::default(),
        }
    }

    pub fn with_conditions(mut self, temperature: f64, humidity: f64) -> Self {
        self.temperature = temperature;
        self.humidity = humidity;
        self
    }

    pub fn season_code(&self) -> u8 {
        self.season.code()
    }

    pub fn season_label(&self) -> &'static str {
        self.season.label()
    }

    pub fn weather_code(&self) -> u8 {
        self.weather.code()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row() -> HourlyRow {
        HourlyRow {
            dteday: "2011-01-01".to_string(),
            season: 1,
            hr: 3,
            weathersit: 2,
            temp: 0.24,
            hum: 0.81,
            cnt: 16,
            instant: Some(4),
            yr: Some(0),
            mnth: Some(1),
            holiday: Some(0),
            weekday: Some(6),
            workingday: Some(0),
            atemp: Some(0.2879),
            windspeed: Some(0.0),
            casual: Some(3),
            registered: Some(13),
        }
    }

    #[test]
    fn test_row_into_record() {
        let record = row().into_record(1, "hour.csv").unwrap();

        assert_eq!(record.date, NaiveDate::from_ymd_opt(2011, 1, 1).unwrap());
        assert_eq!(record.hour, 3);
        assert_eq!(record.season_code, 1);
        assert_eq!(record.weather, WeatherSituation::Mist);
        assert_eq!(record.rental_count, 16);
        assert_eq!(record.extra.registered, Some(13));
    }

    #[test]
    fn test_hour_out_of_range() {
        let mut bad = row();
        bad.hr = 24;
        let err = bad.into_record(7, "hour.csv").unwrap_err();
        assert!(err.to_string().contains("row 7"));
    }

    #[test]
    fn test_nan_measurements_rejected() {
        let mut bad = row();
        bad.temp = f64::NAN;
        let err = bad.into_record(4, "hour.csv").unwrap_err();
        assert!(matches!(err, DashboardError::DataLoad { .. }));
        assert!(err.to_string().contains("row 4: temp"));

        let mut bad = row();
        bad.hum = f64::NAN;
        let err = bad.into_record(5, "hour.csv").unwrap_err();
        assert!(err.to_string().contains("row 5: hum"));
    }

    #[test]
    fn test_unparseable_date() {
        let mut bad = row();
        bad.dteday = "first of january".to_string();
        let err = bad.into_record(2, "hour.csv").unwrap_err();
        assert!(matches!(err, DashboardError::DataLoad { .. }));
        assert!(err.to_string().contains("unparseable date"));
    }

    #[test]
    fn test_invalid_weather_code() {
        let mut bad = row();
        bad.weathersit = 5;
        assert!(bad.into_record(1, "hour.csv").is_err());
    }

    #[test]
    fn test_season_is_consistent() {
        let record = row()
            .into_record(1, "hour.csv")
            .unwrap()
            .with_season(Season::Fall);
        assert_eq!(record.season_code(), 3);
        assert_eq!(record.season_label(), "Fall");
    }
}
