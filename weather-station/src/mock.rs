//! Synthetic station traffic for bench testing without hardware

use sen0186::{RawReading, RAIN_SENSOR_FAULT};

/// Endless sequence of plausible readings.
///
/// Values sweep slowly through their ranges. Every `fault_every`-th reading
/// replaces the hourly rainfall with the rain-gauge fault sentinel; the
/// 24-hour field gets it on the following reading.
#[derive(Debug, Clone)]
pub struct SyntheticStation {
    tick: u32,
    fault_every: Option<u32>,
}

impl SyntheticStation {
    pub fn new(fault_every: Option<u32>) -> Self {
        Self {
            tick: 0,
            fault_every: fault_every.filter(|&n| n > 0),
        }
    }

    fn is_fault(&self, tick: u32) -> bool {
        self.fault_every.is_some_and(|n| tick % n == n - 1)
    }
}

impl Iterator for SyntheticStation {
    type Item = RawReading;

    fn next(&mut self) -> Option<RawReading> {
        let t = self.tick;
        self.tick = self.tick.wrapping_add(1);

        let wind = t % 25;
        let mut raw = RawReading {
            wind_direction: (t % 24) * 15,
            wind_speed_avg: wind,
            wind_gust: wind + t % 7,
            temperature: 50 + t % 40,
            rainfall_1h: t % 30,
            rainfall_24h: (t % 400) * 3 % 400,
            humidity: 30 + t % 60,
            pressure: 9900 + (t % 400) * 7 % 400,
        };
        if self.is_fault(t) {
            raw.rainfall_1h = RAIN_SENSOR_FAULT;
        }
        if t > 0 && self.is_fault(t - 1) {
            raw.rainfall_24h = RAIN_SENSOR_FAULT;
        }
        Some(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sen0186::{parse, SensorFaults};

    #[test]
    fn test_readings_fit_the_layout() {
        for raw in SyntheticStation::new(None).take(2000) {
            let reading = parse(&raw.to_sentence("00"));
            assert!(reading.is_valid);
            assert!(reading.rainfall_valid);
            assert_eq!(reading.raw, raw);
        }
    }

    #[test]
    fn test_fault_schedule() {
        let faults: Vec<SensorFaults> = SyntheticStation::new(Some(3))
            .take(6)
            .map(|raw| parse(&raw.to_sentence("00")).sensor_faults)
            .collect();
        assert_eq!(
            faults,
            vec![
                SensorFaults::empty(),
                SensorFaults::empty(),
                SensorFaults::RAIN_1H,
                SensorFaults::RAIN_24H,
                SensorFaults::empty(),
                SensorFaults::RAIN_1H,
            ]
        );
    }

    #[test]
    fn test_zero_fault_interval_disables_faults() {
        assert!(SyntheticStation::new(Some(0))
            .take(50)
            .all(|raw| raw.rainfall_1h != RAIN_SENSOR_FAULT));
    }
}
