use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "bikeshare-explorer")]
#[command(about = "Explore how weather and season affect bike-sharing rentals")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Log file path")]
    pub log_file: Option<PathBuf>,

    #[arg(
        short,
        long,
        global = true,
        help = "Configuration file [default: ./bikeshare.toml if present]"
    )]
    pub config: Option<PathBuf>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct DataArgs {
    #[arg(short, long, help = "Dataset directory or zip archive (overrides config)")]
    pub data: Option<PathBuf>,

    #[arg(long, help = "Rows with season codes outside 1-4: 'skip' or 'strict'")]
    pub season_policy: Option<String>,

    #[arg(long, help = "Field separator of the CSV files (overrides config)")]
    pub delimiter: Option<char>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Filter the hourly table and print the weather and season summaries
    Summary {
        #[command(flatten)]
        data: DataArgs,

        #[arg(
            short,
            long,
            value_delimiter = ',',
            help = "Weather codes to keep, e.g. 1,2 [default: all, 'none' for no rows]"
        )]
        weather: Option<Vec<String>>,

        #[arg(
            short,
            long,
            value_delimiter = ',',
            help = "Seasons to keep, e.g. summer,fall [default: all, 'none' for no rows]"
        )]
        season: Option<Vec<String>>,

        #[arg(long, help = "Print the view as JSON instead of a text report")]
        json: bool,

        #[arg(long, help = "Number of preview rows (overrides config)")]
        preview: Option<usize>,
    },

    /// List the weather codes and seasons available for filtering
    Domain {
        #[command(flatten)]
        data: DataArgs,
    },

    /// Load the tables and report rows dropped during season labelling
    Validate {
        #[command(flatten)]
        data: DataArgs,
    },

    /// Show row counts and date ranges of both tables
    Info {
        #[command(flatten)]
        data: DataArgs,
    },
}
