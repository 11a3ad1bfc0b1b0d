//! Decoded weather reading

use bitflags::bitflags;
use serde::Serialize;

use crate::error::SentenceError;
use crate::layout::Field;
use crate::units::{Pressure, Rainfall, Speed, Temperature};

/// Raw rainfall value the station sends when its rain gauge has failed
pub const RAIN_SENSOR_FAULT: u32 = 453;

bitflags! {
    /// Fields that carried a sensor-fault sentinel instead of a measurement
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
    pub struct SensorFaults: u8 {
        const RAIN_1H = 1 << 0;
        const RAIN_24H = 1 << 1;
    }
}

/// Integer field values in the units the station sends them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct RawReading {
    /// Degrees, 0-360
    pub wind_direction: u32,
    /// mph
    pub wind_speed_avg: u32,
    /// mph, five minute maximum
    pub wind_gust: u32,
    /// Degrees Fahrenheit
    pub temperature: u32,
    /// Hundredths of an inch
    pub rainfall_1h: u32,
    /// Hundredths of an inch
    pub rainfall_24h: u32,
    /// Percent
    pub humidity: u32,
    /// Tenths of a millibar
    pub pressure: u32,
}

impl RawReading {
    pub fn get(&self, field: Field) -> u32 {
        match field {
            Field::WindDirection => self.wind_direction,
            Field::WindSpeedAvg => self.wind_speed_avg,
            Field::WindGust => self.wind_gust,
            Field::Temperature => self.temperature,
            Field::Rainfall1h => self.rainfall_1h,
            Field::Rainfall24h => self.rainfall_24h,
            Field::Humidity => self.humidity,
            Field::Pressure => self.pressure,
        }
    }

    pub fn set(&mut self, field: Field, value: u32) {
        let slot = match field {
            Field::WindDirection => &mut self.wind_direction,
            Field::WindSpeedAvg => &mut self.wind_speed_avg,
            Field::WindGust => &mut self.wind_gust,
            Field::Temperature => &mut self.temperature,
            Field::Rainfall1h => &mut self.rainfall_1h,
            Field::Rainfall24h => &mut self.rainfall_24h,
            Field::Humidity => &mut self.humidity,
            Field::Pressure => &mut self.pressure,
        };
        *slot = value;
    }

    /// Format these values as a station sentence with the given checksum token.
    ///
    /// Values wider than their field are written in full, which shifts every
    /// later field; callers emitting real traffic must keep values in range.
    pub fn to_sentence(&self, checksum: &str) -> String {
        format!(
            "c{:03}s{:03}g{:03}t{:03}r{:03}p{:03}h{:02}b{:05}*{}",
            self.wind_direction,
            self.wind_speed_avg,
            self.wind_gust,
            self.temperature,
            self.rainfall_1h,
            self.rainfall_24h,
            self.humidity,
            self.pressure,
            checksum
        )
    }
}

/// One decoded sentence.
///
/// Produced by [`SentenceParser`](crate::SentenceParser), never modified
/// afterwards. Rainfall fields that carried [`RAIN_SENSOR_FAULT`] read as
/// zero in both `raw` and the converted values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reading {
    pub raw: RawReading,

    pub temperature: Temperature,
    pub wind_speed: Speed,
    pub wind_gust: Speed,
    pub rainfall_1h: Rainfall,
    pub rainfall_24h: Rainfall,
    pub humidity_percent: f64,
    pub pressure: Pressure,

    /// Sentence shape was intact (and, under strict decoding, every field decoded)
    pub is_valid: bool,
    /// False when either rainfall field carried the fault sentinel
    pub rainfall_valid: bool,
    pub sensor_faults: SensorFaults,
    /// Token after `*`, captured verbatim and never verified
    pub checksum: String,
    /// Defects found while parsing, in sentence order
    pub issues: Vec<SentenceError>,
}

impl Reading {
    /// Build a reading from raw values, applying the rain sentinel and
    /// computing every converted value.
    ///
    /// The result is marked valid with an empty checksum; the parser
    /// overrides those from the sentence.
    pub fn from_raw(mut raw: RawReading) -> Self {
        let mut sensor_faults = SensorFaults::empty();
        if raw.rainfall_1h == RAIN_SENSOR_FAULT {
            sensor_faults |= SensorFaults::RAIN_1H;
            raw.rainfall_1h = 0;
        }
        if raw.rainfall_24h == RAIN_SENSOR_FAULT {
            sensor_faults |= SensorFaults::RAIN_24H;
            raw.rainfall_24h = 0;
        }

        Self {
            raw,
            temperature: Temperature::from_fahrenheit(f64::from(raw.temperature)),
            wind_speed: Speed::from_mph(f64::from(raw.wind_speed_avg)),
            wind_gust: Speed::from_mph(f64::from(raw.wind_gust)),
            rainfall_1h: Rainfall::from_counts(raw.rainfall_1h),
            rainfall_24h: Rainfall::from_counts(raw.rainfall_24h),
            humidity_percent: f64::from(raw.humidity),
            pressure: Pressure::from_counts(raw.pressure),
            is_valid: true,
            rainfall_valid: sensor_faults.is_empty(),
            sensor_faults,
            checksum: String::new(),
            issues: Vec::new(),
        }
    }

    /// An all-zero reading marked invalid, for lines with nothing to decode
    pub fn invalid(issue: SentenceError) -> Self {
        Self {
            temperature: Temperature::default(),
            is_valid: false,
            issues: vec![issue],
            ..Self::from_raw(RawReading::default())
        }
    }

    /// Fields whose digits failed to decode
    pub fn failed_fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.issues.iter().filter_map(|issue| match issue {
            SentenceError::FieldDecode { field, .. } => Some(*field),
            _ => None,
        })
    }
}
