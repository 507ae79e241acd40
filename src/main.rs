use std::io;
use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};
use itinerary_prettifier::io::lookup;
use itinerary_prettifier::model::{Highlight, RenderStyle};
use itinerary_prettifier::{PrettifyError, Result, assemble, prompt};
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "PRETTIFY_LOG";

fn main() {
    if std::env::args_os().len() <= 1 {
        println!("No command line arguments provided.\nAdd -h to see the usage.");
        return;
    }

    let cli = Cli::parse();
    if let Err(error) = run(cli) {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    init_logging()?;
    check_inputs(&cli)?;

    let mapping = lookup::load_lookup(&cli.lookup)?;

    let highlight = match cli.color {
        Some(color) => Highlight::from(color),
        None => prompt::ask_for_color(&mut io::stdin().lock(), &mut io::stdout())?,
    };
    let style = RenderStyle::new(highlight);

    let report = assemble::prettify_document(
        &cli.input,
        &cli.output,
        &mapping,
        &style,
        &mut io::stdout().lock(),
    )?;
    for diagnostic in &report.diagnostics {
        eprintln!("{diagnostic}");
    }
    Ok(())
}

fn init_logging() -> Result<()> {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("error"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init()
        .map_err(|err| PrettifyError::Logging(err.to_string()))
}

/// Reports every missing input before giving up on the run.
fn check_inputs(cli: &Cli) -> Result<()> {
    let mut missing: Vec<PrettifyError> = [("Input", &cli.input), ("Airport lookup", &cli.lookup)]
        .into_iter()
        .filter(|(_, path)| !path.exists())
        .map(|(kind, path)| missing_file(kind, path))
        .collect();

    match missing.pop() {
        Some(last) => {
            for error in &missing {
                eprintln!("error: {error}");
            }
            Err(last)
        }
        None => Ok(()),
    }
}

fn missing_file(kind: &'static str, path: &Path) -> PrettifyError {
    PrettifyError::MissingFile {
        kind,
        path: path.to_path_buf(),
    }
}

#[derive(Parser)]
#[command(
    name = "prettify",
    author,
    version,
    about = "Expand airport codes and date/time markers in an itinerary.",
    after_help = "Usage example:\n  $ prettify ./input.txt ./output.txt ./airport-lookup.csv"
)]
struct Cli {
    /// Itinerary text to prettify.
    input: PathBuf,

    /// Where the plain prettified itinerary is written.
    output: PathBuf,

    /// Airport lookup CSV (icao_code, iata_code, name, municipality, ...).
    lookup: PathBuf,

    /// Highlight colour; skips the interactive prompt when given.
    #[arg(long, value_enum)]
    color: Option<ColorArg>,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum ColorArg {
    Red,
    Green,
    Yellow,
    Blue,
    Purple,
}

impl From<ColorArg> for Highlight {
    fn from(color: ColorArg) -> Self {
        match color {
            ColorArg::Red => Highlight::Red,
            ColorArg::Green => Highlight::Green,
            ColorArg::Yellow => Highlight::Yellow,
            ColorArg::Blue => Highlight::Blue,
            ColorArg::Purple => Highlight::Purple,
        }
    }
}
