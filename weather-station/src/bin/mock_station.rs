//! Emit synthetic SEN0186 sentences to stdout or a serial port.
//!
//! Useful for exercising `listen_station` through a loopback cable or a
//! pseudo-terminal pair when no station is wired up.

use std::io::{self, Write};
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info};
use weather_station::config::{DEFAULT_BAUD, DEFAULT_TIMEOUT_MS};
use weather_station::{open_port, SerialArgs, SyntheticStation};

/// Mock SEN0186 weather station
#[derive(Parser, Debug)]
#[command(name = "mock_station")]
#[command(about = "Emit synthetic SEN0186 weather station sentences")]
#[command(version)]
struct Args {
    /// Serial device to write to; stdout when omitted
    #[arg(short, long)]
    port: Option<String>,

    /// Baud rate
    #[arg(short, long, default_value_t = DEFAULT_BAUD)]
    baud: u32,

    /// Write timeout in milliseconds; a stalled port fails instead of blocking
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_MS)]
    timeout_ms: u64,

    /// Milliseconds between sentences
    #[arg(short, long, default_value = "1000")]
    interval_ms: u64,

    /// Number of sentences to send (0 = infinite)
    #[arg(short, long, default_value = "0")]
    count: u64,

    /// Inject a rain-gauge fault sentinel every N sentences (0 = never)
    #[arg(long, default_value = "10")]
    fault_every: u32,

    /// Checksum token appended after '*'
    #[arg(long, default_value = "3A")]
    checksum: String,
}

fn main() -> Result<()> {
    weather_station::logging::init();
    let args = Args::parse();

    let mut out: Box<dyn Write> = match &args.port {
        Some(port) => {
            info!("Writing to {} at {} baud", port, args.baud);
            let serial_args = SerialArgs {
                port: port.clone(),
                baud: args.baud,
                timeout_ms: args.timeout_ms,
                poll_ms: 0,
            };
            let serial =
                open_port(&serial_args).with_context(|| format!("Failed to open {port}"))?;
            Box::new(serial)
        }
        None => Box::new(io::stdout()),
    };

    let interval = Duration::from_millis(args.interval_ms);
    let station = SyntheticStation::new(Some(args.fault_every));
    let limit = if args.count == 0 {
        usize::MAX
    } else {
        usize::try_from(args.count).unwrap_or(usize::MAX)
    };

    for (i, raw) in station.take(limit).enumerate() {
        let sentence = raw.to_sentence(&args.checksum);
        debug!(sentence = %sentence, "sending");
        writeln!(out, "{sentence}")?;
        out.flush()?;

        if i + 1 < limit && !interval.is_zero() {
            thread::sleep(interval);
        }
    }

    Ok(())
}
