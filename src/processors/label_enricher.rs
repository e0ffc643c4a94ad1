use crate::error::{DashboardError, Result};
use crate::models::{HourlyRecord, RawHourlyRecord, Season};
use crate::processors::{DataQualityReport, RejectedRow, RejectionReason};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// What to do with a row whose season code has no label.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeasonCodePolicy {
    /// Drop the row and record it in the quality report.
    #[default]
    Skip,
    /// Abort on the first bad row.
    Strict,
}

impl std::str::FromStr for SeasonCodePolicy {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "skip" => Ok(SeasonCodePolicy::Skip),
            "strict" => Ok(SeasonCodePolicy::Strict),
            other => Err(DashboardError::Config(format!(
                "unknown season policy '{}', expected 'skip' or 'strict'",
                other
            ))),
        }
    }
}

pub struct Enrichment {
    pub records: Vec<HourlyRecord>,
    pub report: DataQualityReport,
}

pub struct LabelEnricher {
    policy: SeasonCodePolicy,
}

impl LabelEnricher {
    pub fn new() -> Self {
        Self {
            policy: SeasonCodePolicy::default(),
        }
    }

    pub fn with_policy(policy: SeasonCodePolicy) -> Self {
        Self { policy }
    }

    /// Attach a season to every row, applying the configured policy to
    /// rows whose code is outside 1-4. Row order is kept.
    pub fn enrich(&self, table: Vec<RawHourlyRecord>) -> Result<Enrichment> {
        let mut report = DataQualityReport {
            rows_read: table.len(),
            ..Default::default()
        };
        let mut records = Vec::with_capacity(table.len());

        for (index, raw) in table.into_iter().enumerate() {
            let row = index + 1;
            match Season::from_code(raw.season_code, row) {
                Ok(season) => records.push(raw.with_season(season)),
                Err(err) => match self.policy {
                    SeasonCodePolicy::Strict => return Err(err),
                    SeasonCodePolicy::Skip => {
                        warn!(row, code = raw.season_code, "dropping row with invalid season code");
                        report.rejected.push(RejectedRow {
                            row,
                            reason: RejectionReason::InvalidSeasonCode(raw.season_code),
                        });
                    }
                },
            }
        }

        report.rows_kept = records.len();
        Ok(Enrichment { records, report })
    }
}

impl Default for LabelEnricher {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolve season labels, failing on the first code outside 1-4.
pub fn enrich(table: Vec<RawHourlyRecord>) -> Result<Vec<HourlyRecord>> {
    LabelEnricher::with_policy(SeasonCodePolicy::Strict)
        .enrich(table)
        .map(|enrichment| enrichment.records)
}
