//! Sentence parser
//!
//! Decoding is a single pass over the [`FIELDS`] table. Each entry's tag is
//! checked at its fixed position and its digits are extracted. Nothing stops
//! the pass early: every field that can be located is decoded, so a damaged
//! sentence still yields as much data as it carries.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::SentenceError;
use crate::layout::{
    CHECKSUM_DELIMITER, CHECKSUM_DELIMITER_OFFSET, CHECKSUM_OFFSET, CHECKSUM_WIDTH,
    FIELDS, MIN_SENTENCE_LEN,
};
use crate::reading::{RawReading, Reading};

/// How field-level decode failures affect [`Reading::is_valid`].
///
/// Under both policies a field whose digits fail to decode reads as zero and
/// is listed in [`Reading::issues`]. Structural defects (short line, missing
/// tag) always clear `is_valid`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecodePolicy {
    /// Field decode failures leave `is_valid` set
    #[default]
    BestEffort,
    /// Any field decode failure clears `is_valid`
    Strict,
}

/// Stateless SEN0186 sentence decoder
#[derive(Debug, Clone, Copy, Default)]
pub struct SentenceParser {
    policy: DecodePolicy,
}

impl SentenceParser {
    pub const fn new(policy: DecodePolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> DecodePolicy {
        self.policy
    }

    /// Decode one trimmed line.
    ///
    /// Always returns a [`Reading`]. Lines shorter than
    /// [`MIN_SENTENCE_LEN`] produce an all-zero invalid reading. A tag found
    /// out of place clears `is_valid` and leaves the field behind it at zero,
    /// while the remaining fields are still decoded.
    pub fn parse(&self, line: &str) -> Reading {
        let bytes = line.as_bytes();
        if bytes.len() < MIN_SENTENCE_LEN {
            trace!(len = bytes.len(), "sentence too short");
            return Reading::invalid(SentenceError::TooShort {
                len: bytes.len(),
                min: MIN_SENTENCE_LEN,
            });
        }

        let mut raw = RawReading::default();
        let mut issues = Vec::new();

        for spec in &FIELDS {
            if let Err(issue) = check_tag(bytes, spec.tag, spec.tag_offset()) {
                trace!(field = %spec.field, %issue, "tag out of place");
                issues.push(issue);
                continue;
            }
            match spec.extract(line) {
                Ok(value) => raw.set(spec.field, value),
                Err(source) => {
                    trace!(field = %spec.field, %source, "field decode failed");
                    issues.push(SentenceError::FieldDecode {
                        field: spec.field,
                        source,
                    });
                }
            }
        }

        if let Err(issue) = check_tag(bytes, CHECKSUM_DELIMITER, CHECKSUM_DELIMITER_OFFSET) {
            trace!(%issue, "checksum delimiter out of place");
            issues.push(issue);
        }

        let structural_ok = !issues.iter().any(SentenceError::is_structural);
        let fields_ok = match self.policy {
            DecodePolicy::BestEffort => true,
            DecodePolicy::Strict => issues.is_empty(),
        };

        Reading {
            is_valid: structural_ok && fields_ok,
            checksum: capture_checksum(bytes),
            issues,
            ..Reading::from_raw(raw)
        }
    }
}

/// Decode a line with [`DecodePolicy::BestEffort`].
pub fn parse(line: &str) -> Reading {
    SentenceParser::default().parse(line)
}

/// Decode a line, turning the first defect into an error.
///
/// A sentinel-flagged rainfall field is not a defect and still yields `Ok`.
pub fn parse_strict(line: &str) -> Result<Reading, SentenceError> {
    let reading = SentenceParser::new(DecodePolicy::Strict).parse(line);
    match reading.issues.first() {
        Some(issue) => Err(issue.clone()),
        None => Ok(reading),
    }
}

fn check_tag(bytes: &[u8], tag: u8, offset: usize) -> Result<(), SentenceError> {
    match bytes.get(offset) {
        Some(&found) if found == tag => Ok(()),
        found => Err(SentenceError::MissingTag {
            tag: char::from(tag),
            offset,
            found: found.map(|&b| char::from(b)),
        }),
    }
}

/// Up to [`CHECKSUM_WIDTH`] bytes after the delimiter, verbatim
fn capture_checksum(bytes: &[u8]) -> String {
    let end = bytes.len().min(CHECKSUM_OFFSET + CHECKSUM_WIDTH);
    bytes
        .get(CHECKSUM_OFFSET..end)
        .map(|token| String::from_utf8_lossy(token).into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{ExtractError, Field};
    use crate::reading::SensorFaults;

    const CALM: &str = "c000s000g000t075r453p453h45b09830*3A";
    const BREEZY: &str = "c180s010g015t086r005p123h53b10020*3E";

    #[test]
    fn test_parse_clean_sentence() {
        let reading = parse(BREEZY);
        assert!(reading.is_valid);
        assert!(reading.issues.is_empty());
        assert_eq!(reading.checksum, "3E");
        assert_eq!(reading.raw.wind_direction, 180);
        assert_eq!(reading.raw.pressure, 10020);
    }

    #[test]
    fn test_parse_sentinels() {
        let reading = parse(CALM);
        assert!(reading.is_valid);
        assert!(!reading.rainfall_valid);
        assert_eq!(
            reading.sensor_faults,
            SensorFaults::RAIN_1H | SensorFaults::RAIN_24H
        );
        assert_eq!(reading.raw.rainfall_1h, 0);
        assert_eq!(reading.raw.rainfall_24h, 0);
    }

    #[test]
    fn test_too_short_is_zeroed() {
        let reading = parse("c000s000g0");
        assert!(!reading.is_valid);
        assert_eq!(reading.raw, RawReading::default());
        assert_eq!(reading.checksum, "");
        assert_eq!(
            reading.issues,
            vec![SentenceError::TooShort { len: 10, min: 34 }]
        );
    }

    #[test]
    fn test_missing_tag_invalidates_but_keeps_other_fields() {
        // 'b' replaced by 'x'
        let reading = parse("c180s010g015t086r005p123h53x10020*3E");
        assert!(!reading.is_valid);
        assert_eq!(reading.raw.pressure, 0);
        assert_eq!(reading.raw.wind_direction, 180);
        assert_eq!(reading.raw.humidity, 53);
        assert_eq!(
            reading.issues,
            vec![SentenceError::MissingTag {
                tag: 'b',
                offset: 27,
                found: Some('x'),
            }]
        );
    }

    #[test]
    fn test_missing_delimiter_invalidates() {
        let reading = parse("c180s010g015t086r005p123h53b10020#3E");
        assert!(!reading.is_valid);
        assert_eq!(reading.raw.pressure, 10020);
        assert_eq!(reading.checksum, "3E");
    }

    #[test]
    fn test_best_effort_field_failure_keeps_valid() {
        let reading = parse("c0x0s000g000t075r000p000h45b09830*3A");
        assert!(reading.is_valid);
        assert_eq!(reading.raw.wind_direction, 0);
        assert_eq!(reading.raw.temperature, 75);
        assert_eq!(
            reading.failed_fields().collect::<Vec<_>>(),
            vec![Field::WindDirection]
        );
    }

    #[test]
    fn test_direction_beyond_360_is_a_field_failure() {
        let reading = parse("c999s010g015t086r005p123h53b10020*3E");
        assert!(reading.is_valid);
        assert_eq!(reading.raw.wind_direction, 0);
        assert_eq!(reading.raw.wind_speed_avg, 10);
        assert_eq!(
            reading.issues,
            vec![SentenceError::FieldDecode {
                field: Field::WindDirection,
                source: ExtractError::OutOfRange {
                    start: 1,
                    value: 999,
                    max: 360,
                },
            }]
        );

        let strict = SentenceParser::new(DecodePolicy::Strict)
            .parse("c999s010g015t086r005p123h53b10020*3E");
        assert!(!strict.is_valid);
        assert_eq!(strict.raw.humidity, 53);
    }

    #[test]
    fn test_strict_field_failure_clears_valid() {
        let parser = SentenceParser::new(DecodePolicy::Strict);
        let reading = parser.parse("c0x0s000g000t075r000p000h45b09830*3A");
        assert!(!reading.is_valid);
        assert_eq!(reading.raw.wind_direction, 0);
        assert_eq!(reading.raw.humidity, 45);
    }

    #[test]
    fn test_parse_strict_reports_first_issue() {
        let err = parse_strict("c0x0s000g0y0t075r000p000h45b09830*3A").unwrap_err();
        assert_eq!(
            err,
            SentenceError::FieldDecode {
                field: Field::WindDirection,
                source: ExtractError::NotNumeric {
                    start: 1,
                    text: "0x0".to_string(),
                },
            }
        );
        assert!(parse_strict(CALM).is_ok());
    }

    #[test]
    fn test_checksum_capture() {
        // Delimiter present but checksum missing or partial
        assert_eq!(parse(&CALM[..34]).checksum, "");
        assert_eq!(parse(&CALM[..35]).checksum, "3");
        assert!(parse(&CALM[..34]).is_valid);
        // Trailing bytes past the checksum are ignored
        assert_eq!(parse(&format!("{CALM}ZZ")).checksum, "3A");
    }

    #[test]
    fn test_checksum_never_verified() {
        let reading = parse("c180s010g015t086r005p123h53b10020*??");
        assert!(reading.is_valid);
        assert_eq!(reading.checksum, "??");
    }

    #[test]
    fn test_parse_is_idempotent() {
        let parser = SentenceParser::default();
        assert_eq!(parser.parse(BREEZY), parser.parse(BREEZY));
        assert_eq!(parser.parse("garbage"), parser.parse("garbage"));
    }

    #[test]
    fn test_policy_default() {
        assert_eq!(SentenceParser::default().policy(), DecodePolicy::BestEffort);
    }
}
