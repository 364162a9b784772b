//! `chuk`: check, mask, export and create CHUK datasets.

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use chuk_cli::commands;
use chuk_cli::{ChukConfig, LogFormat};
use chuk_dataset::{DatasetUtils, NewDatasetAttributes};

#[derive(Parser, Debug)]
#[command(name = "chuk")]
#[command(about = "Tools for EOCIS CHUK datasets")]
struct Args {
    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Reference CHUK grid file (overrides config and CHUK_GRID_PATH)
    #[arg(long, global = true)]
    grid: Option<PathBuf>,

    /// Log level (overrides config and CHUK_LOG_LEVEL)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Log format: json or pretty
    #[arg(long, global = true)]
    log_format: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check a dataset against the reference grid and metadata vocabulary
    Check {
        input: PathBuf,
    },
    /// Count the cells of a flag variable matching category names or patterns
    Mask {
        input: PathBuf,
        variable: String,
        #[arg(required = true)]
        tokens: Vec<String>,
        /// Also select cells with missing data
        #[arg(long)]
        include_missing: bool,
        /// Categories to remove from the selection
        #[arg(long, num_args = 1..)]
        exclude: Vec<String>,
    },
    /// Print the GeoTIFF tag payload for a variable
    Tags {
        input: PathBuf,
        variable: String,
    },
    /// Write one variable to a GeoTIFF tagged with its metadata
    Export {
        input: PathBuf,
        variable: String,
        output: PathBuf,
    },
    /// Create an empty dataset on the reference grid
    New {
        output: PathBuf,
        #[arg(long)]
        title: String,
        #[arg(long)]
        institution: String,
        #[arg(long)]
        product_version: String,
        /// Defaults to a random UUID
        #[arg(long)]
        tracking_id: Option<String>,
        #[arg(long)]
        summary: Option<String>,
        #[arg(long)]
        with_latlon: bool,
        #[arg(long)]
        with_latlon_bnds: bool,
    },
}

fn init_logging(config: &ChukConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    let builder = fmt().with_env_filter(filter).with_writer(std::io::stderr);
    match config.logging.format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.with_target(false).init(),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn utils(config: &ChukConfig) -> Result<DatasetUtils> {
    let grid: &Path = config.require_grid_path()?;
    Ok(DatasetUtils::open(grid)?)
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let mut config = ChukConfig::load(args.config.as_deref())?;
    if let Some(grid) = args.grid {
        config.grid_path = Some(grid);
    }
    if let Some(level) = args.log_level {
        config.logging.level = level;
    }
    if let Some(format) = args.log_format {
        config.logging.format = format.parse()?;
    }

    init_logging(&config);
    info!(command = ?args.command, "Starting chuk");

    match args.command {
        Command::Check { input } => {
            let report = commands::check(&utils(&config)?, &input)?;
            print_json(&report)?;
            if report.has_errors() {
                std::process::exit(2);
            }
        }
        Command::Mask {
            input,
            variable,
            tokens,
            include_missing,
            exclude,
        } => {
            let summary = commands::mask(&input, &variable, &tokens, &exclude, include_missing)?;
            print_json(&summary)?;
        }
        Command::Tags { input, variable } => {
            print_json(&commands::tags(&input, &variable)?)?;
        }
        Command::Export {
            input,
            variable,
            output,
        } => {
            print_json(&commands::export(&input, &variable, &output)?)?;
        }
        Command::New {
            output,
            title,
            institution,
            product_version,
            tracking_id,
            summary,
            with_latlon,
            with_latlon_bnds,
        } => {
            let mut attrs = NewDatasetAttributes::new(title, institution, product_version);
            if let Some(id) = tracking_id {
                attrs = attrs.with_tracking_id(id);
            }
            if let Some(summary) = summary {
                attrs = attrs.with_summary(summary);
            }
            let report = commands::new_dataset(
                &utils(&config)?,
                &attrs,
                &output,
                with_latlon,
                with_latlon_bnds,
            )?;
            print_json(&report)?;
        }
    }

    Ok(())
}
