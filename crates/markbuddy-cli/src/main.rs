//! markbuddy CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;
mod config;

#[derive(Parser)]
#[command(
    name = "markbuddy",
    version,
    about = "Personal GPA and CGPA record keeper"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute course GPAs, semester CGPAs and the overall CGPA
    Calc {
        /// Path to a .toml record file or .json gradebook snapshot
        #[arg(long)]
        record: Option<PathBuf>,

        /// Output format: text, json, markdown
        #[arg(long)]
        format: Option<String>,

        /// Also save the transcript as JSON to this path
        #[arg(long)]
        output: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Validate record files
    Validate {
        /// Path to a record file or directory
        #[arg(long)]
        record: PathBuf,
    },

    /// Print the percentage to GPA scale
    Scale,

    /// Convert a percentage to a GPA
    Grade {
        /// Weighted course percentage
        #[arg(long, allow_negative_numbers = true)]
        percent: f64,
    },

    /// Create starter config and example record
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("markbuddy=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Calc {
            record,
            format,
            output,
            config,
        } => commands::calc::execute(record, format, output, config),
        Commands::Validate { record } => commands::validate::execute(record),
        Commands::Scale => commands::scale::execute(),
        Commands::Grade { percent } => commands::grade::execute(percent),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
