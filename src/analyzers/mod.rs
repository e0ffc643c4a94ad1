pub mod distribution;
pub mod rental_analyzer;

pub use distribution::{quantile, BoxStats};
pub use rental_analyzer::{
    HourlyPoint, RentalAggregates, RentalAnalyzer, SeasonHourlyProfile, SeasonSummary,
    WeatherSeasonMean, WeatherSummary,
};
