use crate::analyzers::BoxStats;
use crate::models::{Season, WeatherSituation};
use crate::processors::FilteredView;
use crate::utils::constants::HOURS_PER_DAY;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

#[derive(Debug, Clone, Copy, Default)]
struct MeanAccumulator {
    sum: u64,
    count: usize,
}

impl MeanAccumulator {
    fn push(&mut self, value: u32) {
        self.sum += u64::from(value);
        self.count += 1;
    }

    fn mean(&self) -> Option<f64> {
        if self.count == 0 {
            None
        } else {
            Some(self.sum as f64 / self.count as f64)
        }
    }
}

fn mean_of(counts: &[u32]) -> f64 {
    let sum: u64 = counts.iter().map(|&c| u64::from(c)).sum();
    sum as f64 / counts.len() as f64
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherSummary {
    pub weather: WeatherSituation,
    pub weather_code: u8,
    pub count: usize,
    pub mean: f64,
    pub distribution: BoxStats,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeasonSummary {
    pub season: Season,
    pub season_label: &'static str,
    pub count: usize,
    pub mean: f64,
    pub distribution: BoxStats,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourlyPoint {
    pub hour: u8,
    pub count: usize,
    /// `None` when no row of the view falls in this hour
    pub mean: Option<f64>,
}

/// Mean rentals for each hour 0..=23 of one season.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeasonHourlyProfile {
    pub season: Season,
    pub season_label: &'static str,
    pub points: Vec<HourlyPoint>,
}

impl SeasonHourlyProfile {
    pub fn mean_at(&self, hour: u8) -> Option<f64> {
        self.points.get(hour as usize).and_then(|p| p.mean)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherSeasonMean {
    pub weather: WeatherSituation,
    pub weather_code: u8,
    pub season: Season,
    pub season_label: &'static str,
    pub count: usize,
    pub mean: f64,
}

/// All four grouped views of one filtered table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RentalAggregates {
    pub by_weather: Vec<WeatherSummary>,
    pub by_season: Vec<SeasonSummary>,
    pub hourly_profile: Vec<SeasonHourlyProfile>,
    pub by_weather_season: Vec<WeatherSeasonMean>,
}

/// Grouped reductions of `rental_count` over a filtered view.
///
/// Groups come out in ascending key order: weather by code, season by
/// label, pairs by (code, label). An empty view gives empty results.
pub struct RentalAnalyzer;

impl RentalAnalyzer {
    pub fn new() -> Self {
        Self
    }

    pub fn analyze(&self, view: &FilteredView<'_>) -> RentalAggregates {
        let aggregates = RentalAggregates {
            by_weather: self.by_weather(view),
            by_season: self.by_season(view),
            hourly_profile: self.by_season_hour(view),
            by_weather_season: self.by_weather_season(view),
        };

        debug!(
            rows = view.len(),
            weather_groups = aggregates.by_weather.len(),
            season_groups = aggregates.by_season.len(),
            pair_groups = aggregates.by_weather_season.len(),
            "aggregated filtered view"
        );

        aggregates
    }

    pub fn by_weather(&self, view: &FilteredView<'_>) -> Vec<WeatherSummary> {
        let mut groups: BTreeMap<WeatherSituation, Vec<u32>> = BTreeMap::new();
        for record in view.iter() {
            groups.entry(record.weather).or_default().push(record.rental_count);
        }

        groups
            .into_iter()
            .filter_map(|(weather, counts)| {
                BoxStats::from_counts(&counts).map(|distribution| WeatherSummary {
                    weather,
                    weather_code: weather.code(),
                    count: counts.len(),
                    mean: mean_of(&counts),
                    distribution,
                })
            })
            .collect()
    }

    pub fn by_season(&self, view: &FilteredView<'_>) -> Vec<SeasonSummary> {
        let mut groups: BTreeMap<&'static str, (Season, Vec<u32>)> = BTreeMap::new();
        for record in view.iter() {
            groups
                .entry(record.season_label())
                .or_insert_with(|| (record.season, Vec::new()))
                .1
                .push(record.rental_count);
        }

        groups
            .into_iter()
            .filter_map(|(label, (season, counts))| {
                BoxStats::from_counts(&counts).map(|distribution| SeasonSummary {
                    season,
                    season_label: label,
                    count: counts.len(),
                    mean: mean_of(&counts),
                    distribution,
                })
            })
            .collect()
    }

    /// Per-season hour profile. Every season present in the view gets all
    /// 24 hours; hours without rows have `mean: None`.
    pub fn by_season_hour(&self, view: &FilteredView<'_>) -> Vec<SeasonHourlyProfile> {
        let mut groups: BTreeMap<&'static str, (Season, [MeanAccumulator; HOURS_PER_DAY])> =
            BTreeMap::new();
        for record in view.iter() {
            let (_, hours) = groups
                .entry(record.season_label())
                .or_insert_with(|| (record.season, [MeanAccumulator::default(); HOURS_PER_DAY]));
            if let Some(slot) = hours.get_mut(record.hour as usize) {
                slot.push(record.rental_count);
            }
        }

        groups
            .into_iter()
            .map(|(label, (season, hours))| SeasonHourlyProfile {
                season,
                season_label: label,
                points: hours
                    .iter()
                    .enumerate()
                    .map(|(hour, acc)| HourlyPoint {
                        hour: hour as u8,
                        count: acc.count,
                        mean: acc.mean(),
                    })
                    .collect(),
            })
            .collect()
    }

    pub fn by_weather_season(&self, view: &FilteredView<'_>) -> Vec<WeatherSeasonMean> {
        let mut groups: BTreeMap<(u8, &'static str), (WeatherSituation, Season, MeanAccumulator)> =
            BTreeMap::new();
        for record in view.iter() {
            groups
                .entry((record.weather_code(), record.season_label()))
                .or_insert_with(|| (record.weather, record.season, MeanAccumulator::default()))
                .2
                .push(record.rental_count);
        }

        groups
            .into_iter()
            .filter_map(|((code, label), (weather, season, acc))| {
                acc.mean().map(|mean| WeatherSeasonMean {
                    weather,
                    weather_code: code,
                    season,
                    season_label: label,
                    count: acc.count,
                    mean,
                })
            })
            .collect()
    }
}

impl Default for RentalAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}
