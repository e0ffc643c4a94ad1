use crate::analyzers::{RentalAggregates, RentalAnalyzer};
use crate::models::HourlyRecord;
use crate::processors::{filter, Selection};
use crate::store::RecordStore;
use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

/// A row of the filtered-data preview table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PreviewRow {
    pub date: NaiveDate,
    pub hour: u8,
    pub season: &'static str,
    pub weather: u8,
    pub temperature: f64,
    pub humidity: f64,
    pub rental_count: u32,
}

impl From<&HourlyRecord> for PreviewRow {
    fn from(record: &HourlyRecord) -> Self {
        Self {
            date: record.date,
            hour: record.hour,
            season: record.season_label(),
            weather: record.weather_code(),
            temperature: record.temperature,
            humidity: record.humidity,
            rental_count: record.rental_count,
        }
    }
}

/// One point of a scatter chart, grouped by a categorical hue.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPoint<H> {
    pub x: f64,
    pub y: u32,
    pub hue: H,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectionEcho {
    pub weather: Vec<u8>,
    pub seasons: Vec<&'static str>,
}

/// Everything the presentation shell needs for one selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub selection: SelectionEcho,
    pub total_rows: usize,
    pub preview: Vec<PreviewRow>,
    pub aggregates: RentalAggregates,
    /// Temperature against rentals, hue = weather code
    pub temperature_scatter: Vec<ScatterPoint<u8>>,
    /// Humidity against rentals, hue = season label
    pub humidity_scatter: Vec<ScatterPoint<&'static str>>,
}

/// Run the whole pipeline for one selection: filter, aggregate, and shape
/// the result for display. The store is only read.
pub fn render(store: &RecordStore, selection: &Selection, preview_rows: usize) -> DashboardView {
    let view = filter(store.hourly(), selection);
    let aggregates = RentalAnalyzer::new().analyze(&view);

    let temperature_scatter = view
        .iter()
        .map(|r| ScatterPoint {
            x: r.temperature,
            y: r.rental_count,
            hue: r.weather_code(),
        })
        .collect();
    let humidity_scatter = view
        .iter()
        .map(|r| ScatterPoint {
            x: r.humidity,
            y: r.rental_count,
            hue: r.season_label(),
        })
        .collect();

    debug!(rows = view.len(), preview_rows, "rendered dashboard view");

    DashboardView {
        selection: SelectionEcho {
            weather: selection.weather_codes(),
            seasons: selection.season_labels(),
        },
        total_rows: view.len(),
        preview: view.head(preview_rows).iter().map(|r| PreviewRow::from(*r)).collect(),
        aggregates,
        temperature_scatter,
        humidity_scatter,
    }
}
