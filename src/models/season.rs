use serde::{Deserialize, Serialize};

use crate::error::{DashboardError, Result};

/// Meteorological season as coded in the `season` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Season {
    Spring = 1,
    Summer = 2,
    Fall = 3,
    Winter = 4,
}

impl Season {
    pub const ALL: [Season; 4] = [Season::Spring, Season::Summer, Season::Fall, Season::Winter];

    /// Map a season code to its season. `row` is only used for the error.
    ///
    /// Takes the code at the width it was read from the file, so negative
    /// or oversized codes are reported here rather than at parse time.
    pub fn from_code(code: i64, row: usize) -> Result<Self> {
        match code {
            1 => Ok(Season::Spring),
            2 => Ok(Season::Summer),
            3 => Ok(Season::Fall),
            4 => Ok(Season::Winter),
            _ => Err(DashboardError::InvalidSeasonCode { row, code }),
        }
    }

    pub fn code(&self) -> u8 {
        *self as u8
    }

    pub fn label(&self) -> &'static str {
        match self {
            Season::Spring => "Spring",
            Season::Summer => "Summer",
            Season::Fall => "Fall",
            Season::Winter => "Winter",
        }
    }

    /// Case-insensitive lookup by label.
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Season::ALL
            .into_iter()
            .find(|s| s.label().eq_ignore_ascii_case(label))
    }

    /// All seasons in ascending label order.
    pub fn by_label() -> Vec<Season> {
        let mut seasons = Season::ALL.to_vec();
        seasons.sort_by_key(|s| s.label());
        seasons
    }
}

impl std::fmt::Display for Season {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
