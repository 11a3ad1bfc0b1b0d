//! Decode a captured SEN0186 log (one sentence per line) into CSV.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use weather_station::{Acquisition, DecodeArgs, OutputFormat, ReaderSource};

/// SEN0186 log decoder
#[derive(Parser, Debug)]
#[command(name = "parse_log")]
#[command(about = "Decode a captured SEN0186 sentence log to CSV")]
#[command(version)]
struct Args {
    /// Captured log, one sentence per line
    input: PathBuf,

    /// CSV file to write
    output: PathBuf,

    #[command(flatten)]
    decode: DecodeArgs,
}

fn main() -> Result<()> {
    weather_station::logging::init();
    let args = Args::parse();

    let input = File::open(&args.input)
        .with_context(|| format!("Failed to open {}", args.input.display()))?;
    let output = File::create(&args.output)
        .with_context(|| format!("Failed to create {}", args.output.display()))?;

    let mut acquisition = Acquisition::new(
        ReaderSource::new(BufReader::new(input)),
        BufWriter::new(output),
        args.decode.parser(),
    )
    .with_format(OutputFormat::Csv);

    let stats = acquisition.run()?;

    println!(
        "Parsed {} lines from {}: {} valid, {} invalid, {} rain sensor faults, {} realigned",
        stats.lines,
        args.input.display(),
        stats.valid,
        stats.invalid,
        stats.rain_faults,
        stats.realigned
    );
    println!("Wrote {}", args.output.display());
    Ok(())
}
