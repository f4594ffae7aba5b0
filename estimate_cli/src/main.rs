//! # Construction Estimate CLI
//!
//! Terminal front end for `estimate_core`:
//!
//! - `quick`    - interactive estimate from room counts per type
//! - `detailed` - interactive estimate from room dimensions
//! - `report`   - estimate a saved dataset file
//! - `wall`     - brickwork for the walls of one room

mod console;
mod render;
mod session;

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use color_eyre::eyre::{eyre, Result, WrapErr};
use tracing_subscriber::EnvFilter;

use estimate_core::building::{RoomCounts, RoomList};
use estimate_core::calculations::masonry::{self, MasonryInput, WallThickness};
use estimate_core::calculations::CostReport;
use estimate_core::file_io::{load_dataset, load_rate_card, save_report, ReportDocument};
use estimate_core::rates::RateCard;

use console::Console;
use render::MasonryView;

#[derive(Parser, Debug)]
#[command(name = "estimate_cli")]
#[command(about = "Construction cost estimator for residential buildings")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    #[command(flatten)]
    output: OutputArgs,

    /// Rate card JSON file (defaults to the built-in rates)
    #[arg(long, global = true, value_name = "FILE")]
    rates: Option<PathBuf>,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Args, Debug)]
struct OutputArgs {
    /// Print the result as JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    /// Save the report document to this file
    #[arg(long, global = true, value_name = "FILE")]
    out: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Interactive estimate from the number of rooms of each type
    Quick,
    /// Interactive estimate from the length and width of every room
    Detailed,
    /// Estimate a dataset file
    Report {
        /// Dataset JSON file
        dataset: PathBuf,
    },
    /// Brickwork for the four walls of one room
    Wall {
        /// Room length (ft)
        #[arg(long)]
        length: f64,
        /// Room width (ft)
        #[arg(long)]
        width: f64,
        /// Wall height (ft)
        #[arg(long, default_value_t = 9.0)]
        height: f64,
        /// Wall thickness in inches: 4, 6 or 9
        #[arg(long, default_value_t = 9)]
        thickness: u32,
    },
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_level.into()))
        .with_writer(std::io::stderr)
        .init();
}

fn load_rates(path: Option<&Path>) -> Result<RateCard> {
    match path {
        Some(path) => load_rate_card(path).wrap_err_with(|| format!("loading rate card {}", path.display())),
        None => Ok(RateCard::default()),
    }
}

fn estimate_dataset(path: &Path, rates: &RateCard) -> Result<CostReport> {
    let dataset = load_dataset(path).wrap_err_with(|| format!("loading dataset {}", path.display()))?;
    let report = dataset
        .derive_cost_report(rates)
        .wrap_err_with(|| format!("estimating dataset {}", path.display()))?;
    Ok(report)
}

fn emit_report(report: CostReport, output: &OutputArgs) -> Result<()> {
    if output.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render::ReportView(&report));
    }

    if let Some(path) = &output.out {
        save_report(&ReportDocument::new(report), path)
            .wrap_err_with(|| format!("saving report to {}", path.display()))?;
        eprintln!("Report saved to {}", path.display());
    }
    Ok(())
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let rates = load_rates(cli.rates.as_deref())?;

    match cli.command {
        Command::Quick => {
            let mut console = Console::stdio();
            let report = session::run::<RoomCounts, _, _>(&mut console, rates)?;
            emit_report(report, &cli.output)
        }
        Command::Detailed => {
            let mut console = Console::stdio();
            let report = session::run::<RoomList, _, _>(&mut console, rates)?;
            emit_report(report, &cli.output)
        }
        Command::Report { dataset } => {
            let report = estimate_dataset(&dataset, &rates)?;
            emit_report(report, &cli.output)
        }
        Command::Wall {
            length,
            width,
            height,
            thickness,
        } => {
            let thickness = WallThickness::from_inches(thickness)
                .ok_or_else(|| eyre!("wall thickness must be 4, 6 or 9 inches, got {}", thickness))?;
            let input = MasonryInput {
                length_ft: length,
                width_ft: width,
                height_ft: height,
                thickness,
            };
            let result = masonry::calculate(&input)?;
            if cli.output.json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print!("{}", MasonryView { input: &input, result: &result });
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use estimate_core::errors::EstimateError;
    use estimate_core::file_io::load_report;
    use std::env::temp_dir;
    use std::fs;

    fn temp_path(name: &str) -> PathBuf {
        temp_dir().join(format!("estimate_cli_test_{}.json", name))
    }

    #[test]
    fn test_report_command_estimates_dataset_file() {
        let dataset = temp_path("report_dataset");
        let out = temp_path("report_out");
        fs::write(
            &dataset,
            r#"{ "workflow": "Dimensioned", "floors": [ [ { "length": 10, "width": 12 } ] ] }"#,
        )
        .unwrap();

        let report = estimate_dataset(&dataset, &RateCard::default()).unwrap();
        assert_eq!(report.total_area_sqft, 120.0);
        assert_eq!(report.beams.estimated_beams, 1);

        let output = OutputArgs {
            json: true,
            out: Some(out.clone()),
        };
        emit_report(report, &output).unwrap();
        assert_eq!(load_report(&out).unwrap().report.total_area_sqft, 120.0);

        let _ = fs::remove_file(&dataset);
        let _ = fs::remove_file(&out);
    }

    #[test]
    fn test_report_command_rejects_incomplete_dataset() {
        let dataset = temp_path("report_incomplete");
        fs::write(&dataset, r#"{ "workflow": "TypedCount", "floors": [ {} ] }"#).unwrap();

        let err = estimate_dataset(&dataset, &RateCard::default()).unwrap_err();
        assert_eq!(
            err.downcast_ref::<EstimateError>(),
            Some(&EstimateError::incomplete_input(1, "floor has no rooms"))
        );

        let _ = fs::remove_file(&dataset);
    }

    #[test]
    fn test_report_command_missing_file() {
        let err = estimate_dataset(&temp_path("report_missing"), &RateCard::default()).unwrap_err();
        assert!(err.to_string().contains("loading dataset"));
    }
}
