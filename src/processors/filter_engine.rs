use crate::error::{DashboardError, Result};
use crate::models::{HourlyRecord, Season, WeatherSituation};
use serde::Serialize;
use std::collections::BTreeSet;
use tracing::debug;

/// Values a selection may contain for a given hourly table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectionDomain {
    /// Weather situations present in the data, ascending by code
    pub weather: Vec<WeatherSituation>,
    /// The four seasons, ascending by label
    pub seasons: Vec<Season>,
}

impl SelectionDomain {
    pub fn from_records(records: &[HourlyRecord]) -> Self {
        let weather: BTreeSet<WeatherSituation> = records.iter().map(|r| r.weather).collect();

        Self {
            weather: weather.into_iter().collect(),
            seasons: Season::by_label(),
        }
    }

    pub fn weather_codes(&self) -> Vec<u8> {
        self.weather.iter().map(|w| w.code()).collect()
    }

    pub fn season_labels(&self) -> Vec<&'static str> {
        self.seasons.iter().map(|s| s.label()).collect()
    }
}

/// The weather situations and seasons a user has picked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    weather: BTreeSet<WeatherSituation>,
    seasons: BTreeSet<Season>,
}

impl Selection {
    pub fn new(
        weather: impl IntoIterator<Item = WeatherSituation>,
        seasons: impl IntoIterator<Item = Season>,
    ) -> Self {
        Self {
            weather: weather.into_iter().collect(),
            seasons: seasons.into_iter().collect(),
        }
    }

    /// Everything in the domain selected, the initial state of the filters.
    pub fn all(domain: &SelectionDomain) -> Self {
        Self::new(domain.weather.iter().copied(), domain.seasons.iter().copied())
    }

    /// Build a selection from raw user input, rejecting values the domain
    /// does not offer.
    pub fn parse(
        weather_codes: &[u8],
        season_labels: &[String],
        domain: &SelectionDomain,
    ) -> Result<Self> {
        let mut weather = BTreeSet::new();
        for &code in weather_codes {
            let situation = WeatherSituation::from_code(code)
                .filter(|w| domain.weather.contains(w))
                .ok_or_else(|| {
                    DashboardError::InvalidSelection(format!(
                        "weather code {} is not one of {:?}",
                        code,
                        domain.weather_codes()
                    ))
                })?;
            weather.insert(situation);
        }

        let mut seasons = BTreeSet::new();
        for label in season_labels {
            let season = Season::from_label(label)
                .filter(|s| domain.seasons.contains(s))
                .ok_or_else(|| {
                    DashboardError::InvalidSelection(format!(
                        "season '{}' is not one of {:?}",
                        label,
                        domain.season_labels()
                    ))
                })?;
            seasons.insert(season);
        }

        Ok(Self { weather, seasons })
    }

    pub fn weather(&self) -> &BTreeSet<WeatherSituation> {
        &self.weather
    }

    pub fn seasons(&self) -> &BTreeSet<Season> {
        &self.seasons
    }

    pub fn weather_codes(&self) -> Vec<u8> {
        self.weather.iter().map(|w| w.code()).collect()
    }

    /// Selected labels, ascending.
    pub fn season_labels(&self) -> Vec<&'static str> {
        let mut labels: Vec<&'static str> = self.seasons.iter().map(|s| s.label()).collect();
        labels.sort_unstable();
        labels
    }

    pub fn matches(&self, record: &HourlyRecord) -> bool {
        self.weather.contains(&record.weather) && self.seasons.contains(&record.season)
    }
}

/// Rows of the hourly table that pass a selection, in table order.
///
/// Borrows from the table; building a view never touches the records.
#[derive(Debug, Clone, Default)]
pub struct FilteredView<'a> {
    rows: Vec<&'a HourlyRecord>,
}

impl<'a> FilteredView<'a> {
    /// A view over the whole table.
    pub fn unfiltered(table: &'a [HourlyRecord]) -> Self {
        Self {
            rows: table.iter().collect(),
        }
    }

    pub fn rows(&self) -> &[&'a HourlyRecord] {
        &self.rows
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a HourlyRecord> + '_ {
        self.rows.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn head(&self, n: usize) -> &[&'a HourlyRecord] {
        &self.rows[..n.min(self.rows.len())]
    }
}

/// Keep the rows whose weather and season are both selected.
///
/// An empty weather or season set gives an empty view.
pub fn filter<'a>(table: &'a [HourlyRecord], selection: &Selection) -> FilteredView<'a> {
    let rows: Vec<&HourlyRecord> = table.iter().filter(|r| selection.matches(r)).collect();

    debug!(
        input_rows = table.len(),
        kept_rows = rows.len(),
        weather = ?selection.weather_codes(),
        seasons = ?selection.season_labels(),
        "filtered hourly table"
    );

    FilteredView { rows }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(weather: WeatherSituation, season: Season, rental_count: u32) -> HourlyRecord {
        HourlyRecord::new(
            NaiveDate::from_ymd_opt(2011, 6, 1).unwrap(),
            0,
            season,
            weather,
            rental_count,
        )
    }

    fn table() -> Vec<HourlyRecord> {
        vec![
            record(WeatherSituation::Clear, Season::Summer, 1),
            record(WeatherSituation::Mist, Season::Winter, 2),
            record(WeatherSituation::Clear, Season::Winter, 3),
            record(WeatherSituation::LightPrecipitation, Season::Summer, 4),
            record(WeatherSituation::Clear, Season::Fall, 5),
            record(WeatherSituation::Mist, Season::Summer, 6),
        ]
    }

    fn counts(view: &FilteredView<'_>) -> Vec<u32> {
        view.iter().map(|r| r.rental_count).collect()
    }

    #[test]
    fn test_conjunction_preserves_order() {
        let table = table();
        let selection = Selection::new(
            [WeatherSituation::Clear, WeatherSituation::Mist],
            [Season::Summer, Season::Winter],
        );

        let view = filter(&table, &selection);

        assert_eq!(counts(&view), vec![1, 2, 3, 6]);
        assert!(view.iter().all(|r| selection.matches(r)));
    }

    #[test]
    fn test_empty_selection_yields_empty_view() {
        let table = table();
        let domain = SelectionDomain::from_records(&table);

        let no_weather = Selection::new([], domain.seasons.iter().copied());
        let no_seasons = Selection::new(domain.weather.iter().copied(), []);

        assert!(filter(&table, &no_weather).is_empty());
        assert!(filter(&table, &no_seasons).is_empty());
        assert!(filter(&table, &Selection::default()).is_empty());
    }

    #[test]
    fn test_full_domain_is_identity() {
        let table = table();
        let domain = SelectionDomain::from_records(&table);
        let view = filter(&table, &Selection::all(&domain));

        assert_eq!(view.len(), table.len());
        for (kept, original) in view.iter().zip(table.iter()) {
            assert!(std::ptr::eq(kept, original));
        }
    }

    #[test]
    fn test_domain_from_records() {
        let domain = SelectionDomain::from_records(&table());

        assert_eq!(domain.weather_codes(), vec![1, 2, 3]);
        assert_eq!(
            domain.season_labels(),
            vec!["Fall", "Spring", "Summer", "Winter"]
        );
    }

    #[test]
    fn test_parse_selection() {
        let domain = SelectionDomain::from_records(&table());
        let selection = Selection::parse(
            &[3, 1, 1],
            &["winter".to_string(), "Fall".to_string()],
            &domain,
        )
        .unwrap();

        assert_eq!(selection.weather_codes(), vec![1, 3]);
        assert_eq!(selection.season_labels(), vec!["Fall", "Winter"]);
    }

    #[test]
    fn test_parse_rejects_values_outside_domain() {
        let domain = SelectionDomain::from_records(&table());

        // code 4 is valid in general but absent from this table
        let err = Selection::parse(&[4], &[], &domain).unwrap_err();
        assert!(matches!(err, DashboardError::InvalidSelection(_)));

        let err = Selection::parse(&[], &["Monsoon".to_string()], &domain).unwrap_err();
        assert!(err.to_string().contains("Monsoon"));
    }

    #[test]
    fn test_head() {
        let table = table();
        let view = FilteredView::unfiltered(&table);

        assert_eq!(view.head(2).len(), 2);
        assert_eq!(view.head(100).len(), table.len());
        assert!(FilteredView::default().head(5).is_empty());
    }
}
