//! Fixed-position layout of the SEN0186 sentence
//!
//! Every value sits at a fixed byte offset directly behind a one-character
//! tag. There are no delimiters between fields:
//!
//! ```text
//! c000s000g000t075r453p453h45b09830*3A
//! |   |   |   |   |   |   |  |     |
//! 0   4   8   12  16  20  24 27    33   <- tag offsets
//! ```
//!
//! Offsets are positional. Nothing is searched for character by character.

use serde::Serialize;
use strum::{Display, EnumIter};
use thiserror::Error;

/// A numeric field carried by the sentence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, Serialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Field {
    /// Wind direction, degrees (0-360)
    WindDirection,
    /// Average wind speed over one minute, mph
    WindSpeedAvg,
    /// Maximum wind speed over five minutes, mph
    WindGust,
    /// Air temperature, degrees Fahrenheit
    Temperature,
    /// Rainfall over the last hour, hundredths of an inch
    #[strum(serialize = "rainfall_1h")]
    #[serde(rename = "rainfall_1h")]
    Rainfall1h,
    /// Rainfall over the last 24 hours, hundredths of an inch
    #[strum(serialize = "rainfall_24h")]
    #[serde(rename = "rainfall_24h")]
    Rainfall24h,
    /// Relative humidity, percent
    Humidity,
    /// Barometric pressure, tenths of a millibar
    Pressure,
}

impl Field {
    /// Layout entry for this field
    pub fn spec(self) -> &'static FieldSpec {
        &FIELDS[self as usize]
    }
}

/// Position of one tagged field within the sentence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub field: Field,
    /// Tag character preceding the digits
    pub tag: u8,
    /// Offset of the first digit
    pub offset: usize,
    /// Number of digits
    pub width: usize,
    /// Largest meaningful value, when the sensor documents one
    pub max: Option<u32>,
}

impl FieldSpec {
    const fn new(field: Field, tag: u8, offset: usize, width: usize) -> Self {
        Self {
            field,
            tag,
            offset,
            width,
            max: None,
        }
    }

    const fn with_max(mut self, max: u32) -> Self {
        self.max = Some(max);
        self
    }

    /// Extract this field's digits from `line` and check them against [`max`](Self::max).
    pub fn extract(&self, line: &str) -> Result<u32, ExtractError> {
        let value = extract_int(line, self.offset, self.width)?;
        match self.max {
            Some(max) if value > max => Err(ExtractError::OutOfRange {
                start: self.offset,
                value,
                max,
            }),
            _ => Ok(value),
        }
    }

    /// Offset of the tag character
    pub const fn tag_offset(&self) -> usize {
        self.offset - 1
    }

    /// Offset one past the last digit
    pub const fn end(&self) -> usize {
        self.offset + self.width
    }
}

/// Field table, in sentence order. Indexed by `Field as usize`.
pub const FIELDS: [FieldSpec; 8] = [
    FieldSpec::new(Field::WindDirection, b'c', 1, 3).with_max(360),
    FieldSpec::new(Field::WindSpeedAvg, b's', 5, 3),
    FieldSpec::new(Field::WindGust, b'g', 9, 3),
    FieldSpec::new(Field::Temperature, b't', 13, 3),
    FieldSpec::new(Field::Rainfall1h, b'r', 17, 3),
    FieldSpec::new(Field::Rainfall24h, b'p', 21, 3),
    FieldSpec::new(Field::Humidity, b'h', 25, 2).with_max(100),
    FieldSpec::new(Field::Pressure, b'b', 28, 5),
];

/// Character separating the data fields from the checksum token
pub const CHECKSUM_DELIMITER: u8 = b'*';

/// Offset of the `*` delimiter
pub const CHECKSUM_DELIMITER_OFFSET: usize = 33;

/// Offset of the checksum token
pub const CHECKSUM_OFFSET: usize = CHECKSUM_DELIMITER_OFFSET + 1;

/// Width of the checksum token
pub const CHECKSUM_WIDTH: usize = 2;

/// Shortest line that holds every field up to and including the `*` delimiter
pub const MIN_SENTENCE_LEN: usize = CHECKSUM_DELIMITER_OFFSET + 1;

/// Length of a complete sentence including the checksum token
pub const SENTENCE_LEN: usize = CHECKSUM_OFFSET + CHECKSUM_WIDTH;

/// Failure to read a fixed-width integer out of a line
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ExtractError {
    /// The requested range runs past the end of the line.
    #[error("bytes {start}..{end} out of bounds for line of length {len}")]
    OutOfBounds { start: usize, end: usize, len: usize },

    /// The range contains something other than ASCII digits.
    #[error("non-numeric text {text:?} at offset {start}")]
    NotNumeric { start: usize, text: String },

    /// The digits do not fit in a `u32`. Only reachable for widths above nine.
    #[error("value {text:?} at offset {start} does not fit in 32 bits")]
    Overflow { start: usize, text: String },

    /// The value is beyond what the sensor can report for this field.
    #[error("value {value} at offset {start} exceeds maximum {max}")]
    OutOfRange { start: usize, value: u32, max: u32 },
}

/// Read the decimal integer made of the `width` ASCII digits at `start`.
///
/// Signs, spaces and any other non-digit byte are rejected, as is an empty
/// range. Works on bytes so a multi-byte character in the input can never
/// cause a slicing panic.
pub fn extract_int(text: &str, start: usize, width: usize) -> Result<u32, ExtractError> {
    let bytes = text.as_bytes();
    let end = start.saturating_add(width);
    let digits = bytes.get(start..end).ok_or(ExtractError::OutOfBounds {
        start,
        end,
        len: bytes.len(),
    })?;

    let lossy = || String::from_utf8_lossy(digits).into_owned();

    if digits.is_empty() || !digits.iter().all(u8::is_ascii_digit) {
        return Err(ExtractError::NotNumeric {
            start,
            text: lossy(),
        });
    }

    digits
        .iter()
        .try_fold(0u32, |acc, &d| {
            acc.checked_mul(10)?.checked_add(u32::from(d - b'0'))
        })
        .ok_or_else(|| ExtractError::Overflow {
            start,
            text: lossy(),
        })
}

/// Like [`extract_int`] but yields 0 on any failure.
pub fn extract_int_or_zero(text: &str, start: usize, width: usize) -> u32 {
    extract_int(text, start, width).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_table_is_indexed_by_field() {
        for field in Field::iter() {
            assert_eq!(field.spec().field, field);
        }
    }

    #[test]
    fn test_fields_are_contiguous() {
        // Each tag sits directly after the previous field's digits
        for pair in FIELDS.windows(2) {
            assert_eq!(pair[0].end(), pair[1].tag_offset());
        }
        assert_eq!(FIELDS[0].tag_offset(), 0);
        assert_eq!(FIELDS[7].end(), CHECKSUM_DELIMITER_OFFSET);
    }

    #[test]
    fn test_sentence_lengths() {
        assert_eq!(MIN_SENTENCE_LEN, 34);
        assert_eq!(SENTENCE_LEN, 36);
        assert_eq!("c000s000g000t075r453p453h45b09830*3A".len(), SENTENCE_LEN);
    }

    #[test]
    fn test_extract_int_reads_digits() {
        let line = "c180s010g015t086r005p123h53b10020*3E";
        assert_eq!(extract_int(line, 1, 3), Ok(180));
        assert_eq!(extract_int(line, 5, 3), Ok(10));
        assert_eq!(extract_int(line, 25, 2), Ok(53));
        assert_eq!(extract_int(line, 28, 5), Ok(10020));
    }

    #[test]
    fn test_extract_int_out_of_bounds() {
        let err = extract_int("c18", 1, 3).unwrap_err();
        assert_eq!(
            err,
            ExtractError::OutOfBounds {
                start: 1,
                end: 4,
                len: 3
            }
        );
        assert_eq!(extract_int_or_zero("c18", 1, 3), 0);
        assert!(extract_int("", usize::MAX, 3).is_err());
    }

    #[test]
    fn test_extract_int_rejects_non_digits() {
        assert!(matches!(
            extract_int("c0x0", 1, 3),
            Err(ExtractError::NotNumeric { start: 1, .. })
        ));
        assert!(extract_int("c-05", 1, 3).is_err());
        assert!(extract_int("c 05", 1, 3).is_err());
        assert!(extract_int("c+05", 1, 3).is_err());
        assert!(extract_int("c005", 1, 0).is_err());
    }

    #[test]
    fn test_extract_int_multibyte_input_does_not_panic() {
        // 'é' is two bytes; the range cuts it in half
        let err = extract_int("cé00", 1, 3).unwrap_err();
        assert!(matches!(err, ExtractError::NotNumeric { .. }));
    }

    #[test]
    fn test_extract_int_overflow() {
        let err = extract_int("99999999999", 0, 11).unwrap_err();
        assert!(matches!(err, ExtractError::Overflow { .. }));
    }

    #[test]
    fn test_field_extract_enforces_documented_range() {
        let direction = Field::WindDirection.spec();
        assert_eq!(direction.extract("c360"), Ok(360));
        assert_eq!(
            direction.extract("c999"),
            Err(ExtractError::OutOfRange {
                start: 1,
                value: 999,
                max: 360
            })
        );
        // No documented ceiling: any three digits are accepted
        assert_eq!(Field::WindGust.spec().max, None);
        assert_eq!(Field::Humidity.spec().max, Some(100));
    }

    #[test]
    fn test_field_names() {
        assert_eq!(Field::WindDirection.to_string(), "wind_direction");
        assert_eq!(Field::Rainfall24h.to_string(), "rainfall_24h");
    }
}
