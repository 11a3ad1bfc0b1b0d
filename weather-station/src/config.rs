//! Command-line configuration shared by the station binaries

use std::time::Duration;

use clap::{Args, ValueEnum};
use sen0186::{DecodePolicy, SentenceParser};

/// SEN0186 interface board default baud rate
pub const DEFAULT_BAUD: u32 = 9600;

/// Default serial read timeout in milliseconds
pub const DEFAULT_TIMEOUT_MS: u64 = 1000;

/// Default pause between polls of an idle port in milliseconds
pub const DEFAULT_POLL_MS: u64 = 100;

/// Serial link settings
#[derive(Args, Debug, Clone)]
pub struct SerialArgs {
    /// Serial device the interface board TX line is wired to
    #[arg(short, long)]
    pub port: String,

    /// Baud rate
    #[arg(short, long, default_value_t = DEFAULT_BAUD)]
    pub baud: u32,

    /// Read timeout in milliseconds; an expired read counts as an idle poll
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_MS)]
    pub timeout_ms: u64,

    /// Pause after an idle poll in milliseconds
    #[arg(long, default_value_t = DEFAULT_POLL_MS)]
    pub poll_ms: u64,
}

impl SerialArgs {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_ms)
    }
}

/// Report rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Multi-line operator summary
    #[default]
    Text,
    /// One CSV row per line, header first
    Csv,
    /// One JSON object per line
    Json,
}

/// How field decode failures are judged
#[derive(Args, Debug, Clone, Copy, Default)]
pub struct DecodeArgs {
    /// Mark a sentence invalid when any single field fails to decode
    #[arg(long)]
    pub strict: bool,
}

impl DecodeArgs {
    pub fn policy(&self) -> DecodePolicy {
        if self.strict {
            DecodePolicy::Strict
        } else {
            DecodePolicy::BestEffort
        }
    }

    pub fn parser(&self) -> SentenceParser {
        SentenceParser::new(self.policy())
    }
}

/// Decoding and output settings
#[derive(Args, Debug, Clone, Default)]
pub struct OutputArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    #[command(flatten)]
    pub decode: DecodeArgs,

    /// Stop after this many non-empty lines
    #[arg(long)]
    pub max_lines: Option<u64>,
}

impl OutputArgs {
    pub fn policy(&self) -> DecodePolicy {
        self.decode.policy()
    }
}
