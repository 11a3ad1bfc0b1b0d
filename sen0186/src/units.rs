//! Unit conversions for SEN0186 raw readings
//!
//! The station reports imperial integers. Each type here holds the native
//! unit alongside its metric (or imperial, for pressure) counterpart.

use serde::Serialize;

/// Metres per second in one mile per hour
pub const MPH_TO_METERS_PER_SECOND: f64 = 0.44704;

/// Inches of rain per raw rainfall count
pub const RAIN_INCHES_PER_COUNT: f64 = 0.01;

/// Millimetres per inch
pub const INCHES_TO_MILLIMETERS: f64 = 25.4;

/// Millibar per raw pressure count
pub const PRESSURE_MBAR_PER_COUNT: f64 = 0.1;

/// Inches of mercury per millibar
pub const MBAR_TO_INHG: f64 = 0.0295301;

/// Air temperature
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Temperature {
    pub fahrenheit: f64,
    pub celsius: f64,
}

impl Temperature {
    pub fn from_fahrenheit(fahrenheit: f64) -> Self {
        Self {
            fahrenheit,
            celsius: (fahrenheit - 32.0) * 5.0 / 9.0,
        }
    }
}

/// Wind speed
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Speed {
    pub mph: f64,
    pub meters_per_second: f64,
}

impl Speed {
    pub fn from_mph(mph: f64) -> Self {
        Self {
            mph,
            meters_per_second: mph * MPH_TO_METERS_PER_SECOND,
        }
    }
}

/// Accumulated rainfall
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Rainfall {
    pub inches: f64,
    pub millimeters: f64,
}

impl Rainfall {
    /// Convert a raw count in hundredths of an inch
    pub fn from_counts(counts: u32) -> Self {
        let inches = f64::from(counts) * RAIN_INCHES_PER_COUNT;
        Self {
            inches,
            millimeters: inches * INCHES_TO_MILLIMETERS,
        }
    }
}

/// Barometric pressure
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Pressure {
    pub millibar: f64,
    pub inches_hg: f64,
}

impl Pressure {
    /// Convert a raw count in tenths of a millibar
    pub fn from_counts(counts: u32) -> Self {
        let millibar = f64::from(counts) * PRESSURE_MBAR_PER_COUNT;
        Self {
            millibar,
            inches_hg: millibar * MBAR_TO_INHG,
        }
    }
}
