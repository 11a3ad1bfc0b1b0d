//! Acquisition loop
//!
//! Pulls lines from a [`LineSource`], decodes each one, and writes a report
//! for every non-empty line. Invalid sentences are reported too, and in text
//! mode every report is preceded by the line exactly as received, so an
//! operator chasing a wiring or level-shifting fault sees the raw traffic.

use std::io::Write;
use std::thread;
use std::time::Duration;

use sen0186::report::{csv_row, to_json, CSV_HEADER};
use sen0186::{Reading, Report, SentenceParser};
use tracing::{info, warn};

use crate::align::align_sentence;
use crate::config::OutputFormat;
use crate::error::StationResult;
use crate::transport::{LineEvent, LineSource};

/// Running totals for one acquisition session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AcquisitionStats {
    /// Non-empty lines decoded
    pub lines: u64,
    pub valid: u64,
    pub invalid: u64,
    /// Lines whose rain gauge reported the fault sentinel
    pub rain_faults: u64,
    /// Lines that needed leading bytes dropped
    pub realigned: u64,
    /// Polls that found no complete line
    pub idle_polls: u64,
}

impl AcquisitionStats {
    fn record(&mut self, reading: &Reading) {
        self.lines += 1;
        if reading.is_valid {
            self.valid += 1;
        } else {
            self.invalid += 1;
        }
        if !reading.rainfall_valid {
            self.rain_faults += 1;
        }
    }
}

/// Decode-and-report loop over one line source
pub struct Acquisition<S, W> {
    source: S,
    out: W,
    parser: SentenceParser,
    format: OutputFormat,
    poll_interval: Duration,
    max_lines: Option<u64>,
    header_written: bool,
    stats: AcquisitionStats,
}

impl<S: LineSource, W: Write> Acquisition<S, W> {
    pub fn new(source: S, out: W, parser: SentenceParser) -> Self {
        Self {
            source,
            out,
            parser,
            format: OutputFormat::default(),
            poll_interval: Duration::ZERO,
            max_lines: None,
            header_written: false,
            stats: AcquisitionStats::default(),
        }
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Sleep between idle polls. Zero (the default) retries immediately.
    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Stop after this many non-empty lines
    pub fn with_max_lines(mut self, max_lines: Option<u64>) -> Self {
        self.max_lines = max_lines;
        self
    }

    pub fn stats(&self) -> &AcquisitionStats {
        &self.stats
    }

    pub fn into_inner(self) -> (S, W) {
        (self.source, self.out)
    }

    /// Run until the source closes or the line limit is reached.
    pub fn run(&mut self) -> StationResult<AcquisitionStats> {
        info!(format = ?self.format, policy = ?self.parser.policy(), "acquisition started");

        while !self.limit_reached() {
            match self.source.next_line()? {
                LineEvent::Line(line) => {
                    self.process_line(&line)?;
                }
                LineEvent::Idle => {
                    self.stats.idle_polls += 1;
                    if !self.poll_interval.is_zero() {
                        thread::sleep(self.poll_interval);
                    }
                }
                LineEvent::Closed => {
                    info!("line source closed");
                    break;
                }
            }
        }

        self.out.flush()?;
        info!(
            lines = self.stats.lines,
            valid = self.stats.valid,
            invalid = self.stats.invalid,
            rain_faults = self.stats.rain_faults,
            "acquisition finished"
        );
        Ok(self.stats)
    }

    /// Decode and report one line. Empty lines are skipped and yield `None`.
    pub fn process_line(&mut self, line: &str) -> StationResult<Option<Reading>> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }
        info!("[RAW] {}", line);

        let (sentence, skipped) = align_sentence(line);
        if skipped > 0 {
            warn!(skipped, "dropped bytes ahead of sentence start");
            self.stats.realigned += 1;
        }

        let reading = self.parser.parse(sentence);
        if !reading.is_valid {
            warn!(raw = line, issues = reading.issues.len(), "invalid sentence");
        }
        self.stats.record(&reading);
        self.write_report(line, &reading)?;
        Ok(Some(reading))
    }

    fn write_report(&mut self, raw: &str, reading: &Reading) -> StationResult<()> {
        match self.format {
            OutputFormat::Text => {
                writeln!(self.out, "[RAW] {raw}")?;
                writeln!(self.out, "{}", Report(reading))?;
            }
            OutputFormat::Csv => {
                if !self.header_written {
                    writeln!(self.out, "{CSV_HEADER}")?;
                    self.header_written = true;
                }
                writeln!(self.out, "{}", csv_row(reading))?;
            }
            OutputFormat::Json => writeln!(self.out, "{}", to_json(reading)?)?,
        }
        Ok(())
    }

    fn limit_reached(&self) -> bool {
        self.max_lines
            .is_some_and(|max_lines| self.stats.lines >= max_lines)
    }
}
