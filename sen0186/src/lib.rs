//! DFRobot SEN0186 weather station sentence parsing
//!
//! The station's interface board emits one ASCII sentence per reporting
//! cycle, for example:
//!
//! ```text
//! c000s000g000t075r453p453h45b09830*3A
//! ```
//!
//! This crate decodes such a line into a [`Reading`] holding the raw
//! integers, their metric and imperial conversions, and status flags.
//! Parsing never fails outright: malformed input produces a best-effort
//! [`Reading`] with `is_valid` cleared and the problems listed in
//! [`Reading::issues`].
//!
//! ```
//! let reading = sen0186::parse("c180s010g015t086r005p123h53b10020*3E");
//! assert!(reading.is_valid);
//! assert_eq!(reading.raw.wind_direction, 180);
//! assert!((reading.temperature.celsius - 30.0).abs() < 1e-9);
//! ```

mod error;
pub mod layout;
mod parser;
mod reading;
pub mod report;
mod units;

pub use error::SentenceError;
pub use layout::{extract_int, extract_int_or_zero, ExtractError, Field, FieldSpec, FIELDS};
pub use parser::{parse, parse_strict, DecodePolicy, SentenceParser};
pub use reading::{RawReading, Reading, SensorFaults, RAIN_SENSOR_FAULT};
pub use report::Report;
pub use units::{Pressure, Rainfall, Speed, Temperature};
