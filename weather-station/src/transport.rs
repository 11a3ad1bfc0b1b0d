//! Line transports
//!
//! The station sends newline-terminated ASCII. A serial read that times out
//! before a newline arrives is not an error: the partial line is kept and
//! the caller is told the link is idle, so a polling loop can retry.

use std::io::{BufRead, BufReader, ErrorKind};

use serialport::{DataBits, FlowControl, Parity, SerialPort, StopBits};
use tracing::{debug, info};

use crate::config::SerialArgs;
use crate::error::StationResult;

/// Outcome of asking a source for its next line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineEvent {
    /// A complete line, with surrounding whitespace trimmed
    Line(String),
    /// No complete line yet; try again later
    Idle,
    /// The source has no more data
    Closed,
}

/// Anything that yields station lines one at a time
pub trait LineSource {
    fn next_line(&mut self) -> StationResult<LineEvent>;
}

/// [`LineSource`] over any buffered reader: files, stdin, or a serial port.
pub struct ReaderSource<R> {
    reader: R,
    pending: Vec<u8>,
}

impl<R: BufRead> ReaderSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            pending: Vec::new(),
        }
    }

    pub fn into_inner(self) -> R {
        self.reader
    }

    fn take_pending(&mut self) -> String {
        let line = String::from_utf8_lossy(&self.pending).trim().to_string();
        self.pending.clear();
        line
    }
}

impl<R: BufRead> LineSource for ReaderSource<R> {
    fn next_line(&mut self) -> StationResult<LineEvent> {
        match self.reader.read_until(b'\n', &mut self.pending) {
            Ok(0) if self.pending.is_empty() => Ok(LineEvent::Closed),
            // A final line without a terminator is still delivered
            Ok(_) => Ok(LineEvent::Line(self.take_pending())),
            Err(e) if is_idle(e.kind()) => Ok(LineEvent::Idle),
            Err(e) => Err(e.into()),
        }
    }
}

fn is_idle(kind: ErrorKind) -> bool {
    matches!(
        kind,
        ErrorKind::TimedOut | ErrorKind::WouldBlock | ErrorKind::Interrupted
    )
}

/// Serial port wrapped as a line source
pub type SerialSource = ReaderSource<BufReader<Box<dyn SerialPort>>>;

/// Open a port as 8N1 without flow control, with the configured timeout
/// applied to both reads and writes.
pub fn open_port(args: &SerialArgs) -> StationResult<Box<dyn SerialPort>> {
    debug!(
        port = %args.port,
        baud = args.baud,
        timeout_ms = args.timeout_ms,
        "opening serial port"
    );
    let port = serialport::new(&args.port, args.baud)
        .data_bits(DataBits::Eight)
        .parity(Parity::None)
        .stop_bits(StopBits::One)
        .flow_control(FlowControl::None)
        .timeout(args.timeout())
        .open()?;
    info!(port = %args.port, baud = args.baud, "serial port open");
    Ok(port)
}

/// Open the station's serial link as a line source.
pub fn open_serial(args: &SerialArgs) -> StationResult<SerialSource> {
    Ok(ReaderSource::new(BufReader::new(open_port(args)?)))
}
