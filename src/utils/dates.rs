use chrono::{NaiveDate, NaiveDateTime};

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];

/// Parse the `dteday` column into a calendar date.
///
/// The UCI files use `YYYY-MM-DD`; a few other common spellings are accepted
/// as well, and a date-time keeps only its date part.
pub fn parse_day(value: &str) -> Option<NaiveDate> {
    let value = value.trim();

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
                .map(|dt| dt.date())
        })
}
