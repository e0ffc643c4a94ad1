use crate::cli::args::{Cli, Commands, DataArgs};
use crate::config::DashboardConfig;
use crate::dashboard::{render, text_report};
use crate::error::{DashboardError, Result};
use crate::processors::{Selection, SelectionDomain};
use crate::store::RecordStore;
use crate::utils::progress::ProgressReporter;
use std::fs::File;
use std::path::Path;
use std::sync::Mutex;
use tracing::Level;

pub fn run(cli: Cli) -> Result<()> {
    init_logging(cli.verbose, cli.log_file.as_deref())?;

    let config = DashboardConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Summary {
            data,
            weather,
            season,
            json,
            preview,
        } => {
            let config = apply_data_args(&config, &data)?;
            let store = load_store(&config, json)?;

            let domain = store.domain();
            let selection = parse_selection(weather.as_deref(), season.as_deref(), &domain)?;
            let view = render(&store, &selection, preview.unwrap_or(config.preview_rows));

            if json {
                println!("{}", serde_json::to_string_pretty(&view)?);
            } else {
                if !store.quality().is_clean() {
                    println!(
                        "⚠️  {} hourly rows were dropped (run `validate` for details)\n",
                        store.quality().rejected_count()
                    );
                }
                println!("{}", text_report(&view));
            }
        }

        Commands::Domain { data } => {
            let config = apply_data_args(&config, &data)?;
            let store = load_store(&config, false)?;
            let domain = store.domain();

            println!("Weather conditions:");
            for weather in &domain.weather {
                println!("  {}", weather);
            }
            println!("Seasons:");
            for season in &domain.seasons {
                println!("  {} (code {})", season.label(), season.code());
            }
        }

        Commands::Validate { data } => {
            let config = apply_data_args(&config, &data)?;
            let store = load_store(&config, false)?;

            println!("\n{}", store.quality().summary());

            if store.quality().is_clean() {
                println!("✅ All hourly rows have a valid season code");
            } else {
                println!(
                    "⚠️  Dropped {} rows with invalid season codes",
                    store.quality().rejected_count()
                );
            }
        }

        Commands::Info { data } => {
            let config = apply_data_args(&config, &data)?;
            let store = load_store(&config, false)?;
            let domain = store.domain();

            println!("Dataset: {}", config.data_path.display());
            println!("{}", store.summary());
            println!("Weather codes present: {:?}", domain.weather_codes());
            println!("Seasons: {}", domain.season_labels().join(", "));
        }
    }

    Ok(())
}

fn init_logging(verbose: bool, log_file: Option<&Path>) -> Result<()> {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    let builder = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false);

    let result = match log_file {
        Some(path) => {
            let file = File::create(path)?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
        None => builder.with_writer(std::io::stderr).try_init(),
    };

    result.map_err(|e| DashboardError::Config(format!("cannot initialise logging: {}", e)))
}

fn apply_data_args(config: &DashboardConfig, data: &DataArgs) -> Result<DashboardConfig> {
    let mut config = config.clone();

    if let Some(path) = &data.data {
        config.data_path = path.clone();
    }
    if let Some(policy) = &data.season_policy {
        config.season_policy = policy.parse()?;
    }
    if let Some(delimiter) = data.delimiter {
        config.delimiter = delimiter.to_string();
        config.delimiter_byte()?;
    }

    Ok(config)
}

fn load_store(config: &DashboardConfig, silent: bool) -> Result<RecordStore> {
    let source = config.data_source();
    let progress = ProgressReporter::new_spinner(
        &format!("Loading {}...", source.path().display()),
        silent,
    );

    match RecordStore::load(&source, &config.load_options()?) {
        Ok(store) => {
            progress.finish_with_message(&format!(
                "Loaded {} hourly and {} daily rows",
                store.hourly().len(),
                store.daily().len()
            ));
            Ok(store)
        }
        Err(e) => {
            progress.finish_and_clear();
            Err(e)
        }
    }
}

fn is_none_keyword(values: &[String]) -> bool {
    values.len() == 1 && values[0].trim().eq_ignore_ascii_case("none")
}

/// Turn the `--weather` / `--season` flags into a selection. A missing flag
/// selects the whole domain; `none` selects nothing.
pub fn parse_selection(
    weather: Option<&[String]>,
    seasons: Option<&[String]>,
    domain: &SelectionDomain,
) -> Result<Selection> {
    let weather_codes: Vec<u8> = match weather {
        None => domain.weather_codes(),
        Some(values) if is_none_keyword(values) => Vec::new(),
        Some(values) => values
            .iter()
            .map(|v| {
                v.trim().parse::<u8>().map_err(|_| {
                    DashboardError::InvalidSelection(format!("weather code '{}' is not a number", v))
                })
            })
            .collect::<Result<_>>()?,
    };

    let season_labels: Vec<String> = match seasons {
        None => domain.season_labels().iter().map(|s| s.to_string()).collect(),
        Some(values) if is_none_keyword(values) => Vec::new(),
        Some(values) => values.to_vec(),
    };

    Selection::parse(&weather_codes, &season_labels, domain)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Season, WeatherSituation};

    fn domain() -> SelectionDomain {
        SelectionDomain {
            weather: vec![WeatherSituation::Clear, WeatherSituation::Mist],
            seasons: Season::by_label(),
        }
    }

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_missing_flags_select_everything() {
        let domain = domain();
        let selection = parse_selection(None, None, &domain).unwrap();
        assert_eq!(selection, Selection::all(&domain));
    }

    #[test]
    fn test_none_keyword_selects_nothing() {
        let none = strings(&["none"]);
        let selection = parse_selection(Some(none.as_slice()), None, &domain()).unwrap();

        assert!(selection.weather().is_empty());
        assert_eq!(selection.seasons().len(), 4);
    }

    #[test]
    fn test_explicit_values() {
        let weather = strings(&["2"]);
        let seasons = strings(&["summer", "Winter"]);
        let selection = parse_selection(Some(weather.as_slice()), Some(seasons.as_slice()), &domain()).unwrap();

        assert_eq!(selection.weather_codes(), vec![2]);
        assert_eq!(selection.season_labels(), vec!["Summer", "Winter"]);
    }

    #[test]
    fn test_rejects_bad_values() {
        let weather = strings(&["rainy"]);
        assert!(parse_selection(Some(weather.as_slice()), None, &domain()).is_err());

        let weather = strings(&["4"]);
        assert!(parse_selection(Some(weather.as_slice()), None, &domain()).is_err());
    }

    #[test]
    fn test_data_args_override_config() {
        let config = DashboardConfig::default();
        let data = DataArgs {
            data: Some("Bike-Sharing-Dataset.zip".into()),
            season_policy: Some("strict".to_string()),
            delimiter: Some(';'),
        };

        let merged = apply_data_args(&config, &data).unwrap();
        assert_eq!(merged.data_path, std::path::PathBuf::from("Bike-Sharing-Dataset.zip"));
        assert_eq!(merged.season_policy, crate::processors::SeasonCodePolicy::Strict);
        assert_eq!(merged.load_options().unwrap().delimiter, b';');

        let bad = DataArgs {
            data: None,
            season_policy: Some("lenient".to_string()),
            delimiter: None,
        };
        assert!(apply_data_args(&config, &bad).is_err());

        let bad = DataArgs {
            delimiter: Some('é'),
            ..DataArgs::default()
        };
        assert!(apply_data_args(&config, &bad).is_err());
    }
}
