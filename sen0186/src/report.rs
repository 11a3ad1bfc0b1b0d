//! Human and machine renderings of a [`Reading`]

use std::fmt;

use crate::reading::{Reading, SensorFaults};

/// Column names matching [`csv_row`]
pub const CSV_HEADER: &str = "valid,rainfall_valid,wind_direction,wind_speed_mph,wind_speed_ms,wind_gust_mph,wind_gust_ms,temp_f,temp_c,rain_1h_in,rain_1h_mm,rain_24h_in,rain_24h_mm,humidity_pct,pressure_mbar,pressure_inhg,checksum,issues";

/// Multi-line operator summary of a reading.
///
/// ```
/// use sen0186::{parse, Report};
///
/// let reading = parse("c180s010g015t086r005p123h53b10020*3E");
/// let text = Report(&reading).to_string();
/// assert!(text.contains("Temperature: 86 F (30.00 C)"));
/// ```
pub struct Report<'a>(pub &'a Reading);

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = self.0;
        let status = if r.is_valid { "VALID" } else { "INVALID" };

        writeln!(f, "=== Weather Station [{status}] ===")?;
        writeln!(
            f,
            "Wind:        {} deg, avg {} mph ({:.2} m/s), gust {} mph ({:.2} m/s)",
            r.raw.wind_direction,
            r.raw.wind_speed_avg,
            r.wind_speed.meters_per_second,
            r.raw.wind_gust,
            r.wind_gust.meters_per_second,
        )?;
        writeln!(
            f,
            "Temperature: {} F ({:.2} C)",
            r.raw.temperature, r.temperature.celsius
        )?;

        let rain_1h = if r.sensor_faults.contains(SensorFaults::RAIN_1H) {
            "SENSOR FAULT".to_string()
        } else {
            format!(
                "{:.2} in ({:.2} mm)",
                r.rainfall_1h.inches, r.rainfall_1h.millimeters
            )
        };
        let rain_24h = if r.sensor_faults.contains(SensorFaults::RAIN_24H) {
            "SENSOR FAULT".to_string()
        } else {
            format!(
                "{:.2} in ({:.2} mm)",
                r.rainfall_24h.inches, r.rainfall_24h.millimeters
            )
        };
        writeln!(f, "Rain 1h:     {rain_1h}")?;
        writeln!(f, "Rain 24h:    {rain_24h}")?;

        writeln!(f, "Humidity:    {:.0} %", r.humidity_percent)?;
        writeln!(
            f,
            "Pressure:    {:.1} mbar ({:.2} inHg)",
            r.pressure.millibar, r.pressure.inches_hg
        )?;
        writeln!(f, "Checksum:    {} (unverified)", r.checksum)?;

        for issue in &r.issues {
            writeln!(f, "Issue:       {issue}")?;
        }
        Ok(())
    }
}

/// One CSV line (no trailing newline) with the columns of [`CSV_HEADER`].
///
/// Issues are joined with `; ` and the field is quoted when non-empty.
pub fn csv_row(r: &Reading) -> String {
    let issues = r
        .issues
        .iter()
        .map(|issue| issue.to_string().replace('"', "'"))
        .collect::<Vec<_>>()
        .join("; ");
    let issues = if issues.is_empty() {
        issues
    } else {
        format!("\"{issues}\"")
    };

    format!(
        "{},{},{},{},{:.4},{},{:.4},{},{:.2},{:.2},{:.2},{:.2},{:.2},{:.0},{:.1},{:.4},{},{}",
        r.is_valid,
        r.rainfall_valid,
        r.raw.wind_direction,
        r.raw.wind_speed_avg,
        r.wind_speed.meters_per_second,
        r.raw.wind_gust,
        r.wind_gust.meters_per_second,
        r.raw.temperature,
        r.temperature.celsius,
        r.rainfall_1h.inches,
        r.rainfall_1h.millimeters,
        r.rainfall_24h.inches,
        r.rainfall_24h.millimeters,
        r.humidity_percent,
        r.pressure.millibar,
        r.pressure.inches_hg,
        csv_escape(&r.checksum),
        issues,
    )
}

/// Single-line JSON encoding of a reading
pub fn to_json(r: &Reading) -> serde_json::Result<String> {
    serde_json::to_string(r)
}

fn csv_escape(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;

    #[test]
    fn test_report_valid_reading() {
        let reading = parse("c180s010g015t086r005p123h53b10020*3E");
        let text = Report(&reading).to_string();
        assert!(text.starts_with("=== Weather Station [VALID] ==="));
        assert!(text.contains("Wind:        180 deg, avg 10 mph (4.47 m/s), gust 15 mph (6.71 m/s)"));
        assert!(text.contains("Rain 1h:     0.05 in (1.27 mm)"));
        assert!(text.contains("Rain 24h:    1.23 in (31.24 mm)"));
        assert!(text.contains("Humidity:    53 %"));
        assert!(text.contains("Pressure:    1002.0 mbar (29.59 inHg)"));
        assert!(text.contains("Checksum:    3E (unverified)"));
        assert!(!text.contains("Issue:"));
    }

    #[test]
    fn test_report_sensor_fault_and_issues() {
        let reading = parse("c000s000g000t075r453p453h45b09830*3A");
        let text = Report(&reading).to_string();
        assert!(text.contains("Rain 1h:     SENSOR FAULT"));
        assert!(text.contains("Rain 24h:    SENSOR FAULT"));

        let reading = parse("c000s0");
        let text = Report(&reading).to_string();
        assert!(text.starts_with("=== Weather Station [INVALID] ==="));
        assert!(text.contains("Issue:       sentence too short"));
    }

    #[test]
    fn test_csv_row_matches_header() {
        let reading = parse("c180s010g015t086r005p123h53b10020*3E");
        let row = csv_row(&reading);
        assert_eq!(
            row.split(',').count(),
            CSV_HEADER.split(',').count()
        );
        assert!(row.starts_with("true,true,180,10,4.4704,15,6.7056,86,30.00,"));
        assert!(row.ends_with(",3E,"));
    }

    #[test]
    fn test_csv_row_quotes_issues() {
        let reading = parse("c0x0s000g000t075r000p000h45b09830*3A");
        let row = csv_row(&reading);
        assert!(row.ends_with("\"failed to decode wind_direction: non-numeric text '0x0' at offset 1\""));
    }

    #[test]
    fn test_csv_escape() {
        assert_eq!(csv_escape("3A"), "3A");
        assert_eq!(csv_escape("a,b"), "\"a,b\"");
        assert_eq!(csv_escape("a\"b"), "\"a\"\"b\"");
    }

    #[test]
    fn test_json_encoding() {
        let reading = parse("c000s000g000t075r453p453h45b09830*3A");
        let json: serde_json::Value = serde_json::from_str(&to_json(&reading).unwrap()).unwrap();
        assert_eq!(json["is_valid"], true);
        assert_eq!(json["rainfall_valid"], false);
        assert_eq!(json["raw"]["temperature"], 75);
        assert_eq!(json["checksum"], "3A");
    }
}
