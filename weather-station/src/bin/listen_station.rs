//! Decode live SEN0186 traffic from a serial port and print a report per line.
//!
//! The interface board TX is 5V logic; boards with 3.3V-only inputs need a
//! divider (10k from TX to RX, 20k from RX to GND) in front of the UART.

use std::io;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use weather_station::{open_serial, Acquisition, OutputArgs, SerialArgs};

/// Example of a healthy sentence, shown at startup
const EXPECTED_SENTENCE: &str = "c000s000g000t086r000p000h53b10020*3E";

/// SEN0186 weather station listener
#[derive(Parser, Debug)]
#[command(name = "listen_station")]
#[command(about = "Decode SEN0186 weather station sentences from a serial port")]
#[command(version)]
struct Args {
    #[command(flatten)]
    serial: SerialArgs,

    #[command(flatten)]
    output: OutputArgs,
}

fn main() -> Result<()> {
    weather_station::logging::init();
    let args = Args::parse();

    info!("Port: {} at {} baud", args.serial.port, args.serial.baud);
    info!("Expected: {}", EXPECTED_SENTENCE);
    info!("Waiting for weather data...");

    let source = open_serial(&args.serial)
        .with_context(|| format!("Failed to open {}", args.serial.port))?;

    let stdout = io::stdout();
    let mut acquisition = Acquisition::new(source, stdout.lock(), args.output.decode.parser())
        .with_format(args.output.format)
        .with_poll_interval(args.serial.poll_interval())
        .with_max_lines(args.output.max_lines);

    let stats = acquisition.run()?;
    info!(
        "Decoded {} lines: {} valid, {} invalid, {} with rain sensor faults",
        stats.lines, stats.valid, stats.invalid, stats.rain_faults
    );
    Ok(())
}
