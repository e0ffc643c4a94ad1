//! The in-memory record store.
//!
//! Both tables are read once, the hourly table gets its season labels, and
//! the result is never modified afterwards. Pipeline runs borrow the store.

use crate::error::Result;
use crate::models::{DailyRecord, HourlyRecord, RawHourlyRecord};
use crate::processors::{DataQualityReport, LabelEnricher, SeasonCodePolicy, SelectionDomain};
use crate::readers::{DataSource, TableFiles, TableReader};
use crate::utils::constants::DEFAULT_DELIMITER;
use chrono::NaiveDate;
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct LoadOptions {
    pub files: TableFiles,
    pub season_policy: SeasonCodePolicy,
    /// Field separator of both tables
    pub delimiter: u8,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            files: TableFiles::default(),
            season_policy: SeasonCodePolicy::default(),
            delimiter: DEFAULT_DELIMITER,
        }
    }
}

#[derive(Debug)]
pub struct RecordStore {
    hourly: Vec<HourlyRecord>,
    daily: Vec<DailyRecord>,
    quality: DataQualityReport,
}

impl RecordStore {
    /// Read both tables from `source` and resolve season labels.
    pub fn load(source: &DataSource, options: &LoadOptions) -> Result<Self> {
        let reader = TableReader::with_delimiter(options.delimiter);
        let (raw_hourly, daily) = source.read_tables(&options.files, &reader)?;
        Self::from_tables(raw_hourly, daily, options.season_policy)
    }

    pub fn from_tables(
        raw_hourly: Vec<RawHourlyRecord>,
        daily: Vec<DailyRecord>,
        season_policy: SeasonCodePolicy,
    ) -> Result<Self> {
        let enrichment = LabelEnricher::with_policy(season_policy).enrich(raw_hourly)?;

        if !enrichment.report.is_clean() {
            warn!(
                rejected = enrichment.report.rejected_count(),
                "hourly rows dropped during season labelling"
            );
        }
        info!(
            hourly_rows = enrichment.records.len(),
            daily_rows = daily.len(),
            "record store ready"
        );

        Ok(Self {
            hourly: enrichment.records,
            daily,
            quality: enrichment.report,
        })
    }

    pub fn hourly(&self) -> &[HourlyRecord] {
        &self.hourly
    }

    pub fn daily(&self) -> &[DailyRecord] {
        &self.daily
    }

    pub fn quality(&self) -> &DataQualityReport {
        &self.quality
    }

    pub fn domain(&self) -> SelectionDomain {
        SelectionDomain::from_records(&self.hourly)
    }

    pub fn hourly_date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        date_range(self.hourly.iter().map(|r| r.date))
    }

    pub fn daily_date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        date_range(self.daily.iter().map(|r| r.date))
    }

    pub fn summary(&self) -> String {
        let describe = |range: Option<(NaiveDate, NaiveDate)>| match range {
            Some((start, end)) => format!("{} to {}", start, end),
            None => "no rows".to_string(),
        };

        format!(
            "Hourly Table: {} rows ({})\n\
            Daily Table: {} rows ({})\n\
            Rows Rejected: {}",
            self.hourly.len(),
            describe(self.hourly_date_range()),
            self.daily.len(),
            describe(self.daily_date_range()),
            self.quality.rejected_count()
        )
    }
}

fn date_range(dates: impl Iterator<Item = NaiveDate>) -> Option<(NaiveDate, NaiveDate)> {
    dates.fold(None, |range, date| match range {
        None => Some((date, date)),
        Some((start, end)) => Some((start.min(date), end.max(date))),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DashboardError;
    use crate::models::{PassThroughColumns, WeatherSituation};

    fn raw(day: u32, season_code: i64) -> RawHourlyRecord {
        RawHourlyRecord {
            date: NaiveDate::from_ymd_opt(2011, 1, day).unwrap(),
            hour: 0,
            season_code,
            weather: WeatherSituation::Clear,
            temperature: 0.3,
            humidity: 0.6,
            rental_count: 12,
            extra: PassThroughColumns::default(),
        }
    }

    #[test]
    fn test_store_from_tables() -> Result<()> {
        let store = RecordStore::from_tables(
            vec![raw(3, 1), raw(1, 1), raw(2, 5)],
            vec![],
            SeasonCodePolicy::Skip,
        )?;

        assert_eq!(store.hourly().len(), 2);
        assert_eq!(store.quality().rejected_count(), 1);
        assert_eq!(
            store.hourly_date_range(),
            Some((
                NaiveDate::from_ymd_opt(2011, 1, 1).unwrap(),
                NaiveDate::from_ymd_opt(2011, 1, 3).unwrap()
            ))
        );
        assert_eq!(store.daily_date_range(), None);
        assert!(store.summary().contains("Daily Table: 0 rows (no rows)"));
        Ok(())
    }

    #[test]
    fn test_strict_store_fails() {
        let err = RecordStore::from_tables(vec![raw(1, 7)], vec![], SeasonCodePolicy::Strict)
            .unwrap_err();
        assert!(matches!(err, DashboardError::InvalidSeasonCode { code: 7, .. }));
    }

    #[test]
    fn test_store_is_shareable() {
        fn assert_sync<T: Sync + Send>() {}
        assert_sync::<RecordStore>();
    }
}
