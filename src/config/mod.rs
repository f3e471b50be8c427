pub mod toml_config;

pub use toml_config::DashboardConfig;

use crate::adapters::csv_file::DEFAULT_SALARY_COLUMN;
use crate::core::histogram::BinningStrategy;
use crate::core::smoothing::SmoothingKind;
use crate::domain::model::{Education, Gender};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "salarycast")]
#[command(about = "Client for a remote salary-prediction service")]
pub struct Cli {
    /// Optional TOML configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Submit your details and print the predicted salary
    Predict(PredictArgs),
    /// Fetch salary observations and render the distribution chart
    Chart(ChartArgs),
}

#[derive(Debug, Args)]
pub struct PredictArgs {
    /// Age in years (typical range 21-60; advisory only)
    #[arg(long)]
    pub age: u32,

    #[arg(long, value_enum)]
    pub gender: Gender,

    #[arg(long, value_enum)]
    pub education: Education,

    /// Free text; see `salarycast predict --help` for suggested titles
    #[arg(long)]
    pub job_title: String,

    /// Years of experience
    #[arg(long)]
    pub experience: f64,

    /// Override the prediction endpoint from the config
    #[arg(long)]
    pub endpoint: Option<String>,
}

#[derive(Debug, Args)]
pub struct ChartArgs {
    /// URL returning a JSON numeric array (defaults to the configured
    /// salary-data endpoint)
    #[arg(long, conflicts_with = "csv")]
    pub source_url: Option<String>,

    /// Read observations from a local CSV file instead
    #[arg(long)]
    pub csv: Option<PathBuf>,

    /// CSV column holding the salary values
    #[arg(long, default_value = DEFAULT_SALARY_COLUMN)]
    pub column: String,

    /// Fixed bucket width in currency units (axis anchored at zero)
    #[arg(long, conflicts_with = "buckets")]
    pub bucket_width: Option<f64>,

    /// Fixed bucket count spanning [min, max]
    #[arg(long)]
    pub buckets: Option<usize>,

    #[arg(long, value_enum, default_value = "moving-average")]
    pub smoothing: SmoothingKind,
}

impl ChartArgs {
    /// CLI flags override the file config; otherwise fall back to it.
    pub fn binning_or(&self, fallback: BinningStrategy) -> BinningStrategy {
        if let Some(width) = self.bucket_width {
            BinningStrategy::FixedWidth { width }
        } else if let Some(buckets) = self.buckets {
            BinningStrategy::FixedCount { buckets }
        } else {
            fallback
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_predict_command() {
        let cli = Cli::parse_from([
            "salarycast",
            "predict",
            "--age",
            "30",
            "--gender",
            "female",
            "--education",
            "master",
            "--job-title",
            "Data Scientist",
            "--experience",
            "5",
        ]);

        match cli.command {
            Command::Predict(args) => {
                assert_eq!(args.age, 30);
                assert_eq!(args.gender, Gender::Female);
                assert_eq!(args.education, Education::Master);
                assert_eq!(args.job_title, "Data Scientist");
                assert_eq!(args.experience, 5.0);
            }
            _ => panic!("expected predict command"),
        }
    }

    #[test]
    fn test_parse_chart_command_with_csv() {
        let cli = Cli::parse_from([
            "salarycast",
            "chart",
            "--csv",
            "data/Salary_Data.csv",
            "--buckets",
            "30",
            "--smoothing",
            "passthrough",
        ]);

        match cli.command {
            Command::Chart(args) => {
                assert!(args.source_url.is_none());
                assert_eq!(args.column, "Salary");
                assert_eq!(
                    args.binning_or(BinningStrategy::default()),
                    BinningStrategy::FixedCount { buckets: 30 }
                );
                assert_eq!(args.smoothing, SmoothingKind::Passthrough);
            }
            _ => panic!("expected chart command"),
        }
    }

    #[test]
    fn test_chart_binning_falls_back_to_config() {
        let cli = Cli::parse_from(["salarycast", "chart"]);
        match cli.command {
            Command::Chart(args) => {
                let fallback = BinningStrategy::FixedCount { buckets: 12 };
                assert_eq!(args.binning_or(fallback), fallback);
            }
            _ => panic!("expected chart command"),
        }
    }

    #[test]
    fn test_source_url_conflicts_with_csv() {
        let result = Cli::try_parse_from([
            "salarycast",
            "chart",
            "--source-url",
            "http://localhost:5000/salary-data",
            "--csv",
            "data.csv",
        ]);
        assert!(result.is_err());
    }
}
