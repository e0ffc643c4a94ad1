use serde::Serialize;

/// Why a row was left out of the hourly table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum RejectionReason {
    InvalidSeasonCode(i64),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RejectedRow {
    /// 1-based data row in the source file
    pub row: usize,
    pub reason: RejectionReason,
}

/// Outcome of resolving season labels for the hourly table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DataQualityReport {
    pub rows_read: usize,
    pub rows_kept: usize,
    pub rejected: Vec<RejectedRow>,
}

impl DataQualityReport {
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }

    pub fn rejected_count(&self) -> usize {
        self.rejected.len()
    }

    pub fn summary(&self) -> String {
        let mut summary = String::new();

        summary.push_str("=== Data Quality Report ===\n");
        summary.push_str(&format!("Rows Read: {}\n", self.rows_read));
        summary.push_str(&format!("Rows Kept: {}\n", self.rows_kept));
        summary.push_str(&format!("Rows Rejected: {}\n", self.rejected.len()));

        if !self.rejected.is_empty() {
            summary.push_str("\nFirst 10 Rejections:\n");
            for (i, rejected) in self.rejected.iter().take(10).enumerate() {
                let detail = match rejected.reason {
                    RejectionReason::InvalidSeasonCode(code) => {
                        format!("season code {} is outside 1-4", code)
                    }
                };
                summary.push_str(&format!("  {}. Row {}: {}\n", i + 1, rejected.row, detail));
            }
        }

        summary
    }
}
