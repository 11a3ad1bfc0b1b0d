//! Acquisition side of the SEN0186 weather station.
//!
//! The station's interface board writes one sentence per line over a 9600
//! baud 8N1 UART. This crate pulls those lines from a [`LineSource`],
//! realigns them to the sentence start, decodes them with
//! [`sen0186::SentenceParser`], and writes a report for every line,
//! including the ones that fail to decode.
//!
//! # Binaries
//! - `listen_station` - decode live traffic from a serial port
//! - `parse_log` - decode a captured log into CSV
//! - `mock_station` - emit synthetic sentences for bench testing

pub mod acquisition;
pub mod align;
pub mod config;
pub mod error;
pub mod logging;
pub mod mock;
pub mod transport;

pub use acquisition::{Acquisition, AcquisitionStats};
pub use align::align_sentence;
pub use config::{DecodeArgs, OutputArgs, OutputFormat, SerialArgs};
pub use error::{StationError, StationResult};
pub use mock::SyntheticStation;
pub use transport::{open_port, open_serial, LineEvent, LineSource, ReaderSource};
