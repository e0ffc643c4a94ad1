use crate::error::{DashboardError, Result};
use crate::models::{DailyRecord, DailyRow, HourlyRow, RawHourlyRecord};
use crate::utils::constants::{DAILY_REQUIRED_COLUMNS, DEFAULT_DELIMITER, HOURLY_REQUIRED_COLUMNS};
use serde::de::DeserializeOwned;
use std::io::Read;
use tracing::debug;

/// Reads the hourly and daily CSV tables from any byte source.
pub struct TableReader {
    delimiter: u8,
}

impl TableReader {
    pub fn new() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER,
        }
    }

    pub fn with_delimiter(delimiter: u8) -> Self {
        Self { delimiter }
    }

    pub fn read_hourly<R: Read>(&self, reader: R, source_name: &str) -> Result<Vec<RawHourlyRecord>> {
        self.read_rows(
            reader,
            source_name,
            &HOURLY_REQUIRED_COLUMNS,
            |row: HourlyRow, index, name| row.into_record(index, name),
        )
    }

    pub fn read_daily<R: Read>(&self, reader: R, source_name: &str) -> Result<Vec<DailyRecord>> {
        self.read_rows(
            reader,
            source_name,
            &DAILY_REQUIRED_COLUMNS,
            |row: DailyRow, index, name| row.into_record(index, name),
        )
    }

    fn read_rows<R, T, U, F>(
        &self,
        reader: R,
        source_name: &str,
        required: &[&str],
        convert: F,
    ) -> Result<Vec<U>>
    where
        R: Read,
        T: DeserializeOwned,
        F: Fn(T, usize, &str) -> Result<U>,
    {
        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(self.delimiter)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = csv_reader
            .headers()
            .map_err(|e| {
                DashboardError::data_load(source_name, format!("cannot read header row: {}", e))
            })?
            .clone();

        let missing: Vec<&str> = required
            .iter()
            .copied()
            .filter(|column| !headers.iter().any(|h| h == *column))
            .collect();

        if !missing.is_empty() {
            return Err(DashboardError::data_load(
                source_name,
                format!("missing required column(s): {}", missing.join(", ")),
            ));
        }

        let mut records = Vec::new();
        for (index, result) in csv_reader.deserialize::<T>().enumerate() {
            let row_number = index + 1;
            let row = result.map_err(|e| {
                DashboardError::data_load(source_name, format!("row {}: {}", row_number, e))
            })?;
            records.push(convert(row, row_number, source_name)?);
        }

        debug!(source = source_name, rows = records.len(), "read table");
        Ok(records)
    }
}

impl Default for TableReader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::WeatherSituation;
    use chrono::NaiveDate;

    const HOUR_CSV: &str = "\
instant,dteday,season,yr,mnth,hr,holiday,weekday,workingday,weathersit,temp,atemp,hum,windspeed,casual,registered,cnt
1,2011-01-01,1,0,1,0,0,6,0,1,0.24,0.2879,0.81,0,3,13,16
2,2011-01-01,1,0,1,1,0,6,0,1,0.22,0.2727,0.8,0,8,32,40
3,2011-01-01,1,0,1,2,0,6,0,2,0.22,0.2727,0.8,0,5,27,32
";

    #[test]
    fn test_read_uci_hourly() -> Result<()> {
        let reader = TableReader::new();
        let records = reader.read_hourly(HOUR_CSV.as_bytes(), "hour.csv")?;

        assert_eq!(records.len(), 3);
        assert_eq!(records[0].date, NaiveDate::from_ymd_opt(2011, 1, 1).unwrap());
        assert_eq!(records[1].hour, 1);
        assert_eq!(records[1].rental_count, 40);
        assert_eq!(records[2].weather, WeatherSituation::Mist);
        assert_eq!(records[2].extra.casual, Some(5));

        Ok(())
    }

    #[test]
    fn test_minimal_columns_only() -> Result<()> {
        let csv = "dteday,season,weathersit,hr,temp,hum,cnt\n2012-06-01,2,1,17,0.7,0.4,512\n";
        let records = TableReader::new().read_hourly(csv.as_bytes(), "hour.csv")?;

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].season_code, 2);
        assert!(records[0].extra.is_empty());

        Ok(())
    }

    #[test]
    fn test_missing_column_is_reported() {
        let csv = "dteday,season,weathersit,temp,cnt\n2011-01-01,1,1,0.2,5\n";
        let err = TableReader::new()
            .read_hourly(csv.as_bytes(), "hour.csv")
            .unwrap_err();

        let message = err.to_string();
        assert!(message.contains("hour.csv"));
        assert!(message.contains("hr"));
        assert!(message.contains("hum"));
    }

    #[test]
    fn test_empty_input_is_malformed() {
        let err = TableReader::new().read_daily("".as_bytes(), "day.csv").unwrap_err();
        assert!(matches!(err, DashboardError::DataLoad { .. }));
    }

    #[test]
    fn test_unparseable_number_reports_row() {
        let csv = "dteday,season,weathersit,hr,temp,hum,cnt\n\
                   2011-01-01,1,1,0,0.2,0.5,10\n\
                   2011-01-01,1,1,1,0.2,0.5,lots\n";
        let err = TableReader::new()
            .read_hourly(csv.as_bytes(), "hour.csv")
            .unwrap_err();
        assert!(err.to_string().contains("row 2"));
    }

    #[test]
    fn test_nan_temperature_is_rejected() {
        let csv = "dteday,season,weathersit,hr,temp,hum,cnt\n\
                   2011-01-01,1,1,0,NaN,0.5,10\n";
        let err = TableReader::new()
            .read_hourly(csv.as_bytes(), "hour.csv")
            .unwrap_err();
        assert!(matches!(err, DashboardError::DataLoad { .. }));
        assert!(err.to_string().contains("row 1: temp"));
    }

    #[test]
    fn test_semicolon_delimiter() -> Result<()> {
        let csv = "dteday;season;weathersit;temp;hum;cnt\n2011-01-01;1;1;0.34;0.8;985\n";
        let records = TableReader::with_delimiter(b';').read_daily(csv.as_bytes(), "day.csv")?;

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].rental_count, 985);
        Ok(())
    }
}
