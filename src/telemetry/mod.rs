//! # Telemetry Module
//!
//! Reads power-supply telemetry and parses it into battery readings.
//!
//! This module handles:
//! - Enumerating `BAT<n>` devices under the power-supply directory
//! - Reading each device's `uevent` file
//! - Parsing `KEY=VALUE` records into raw readings
//!
//! A device that cannot be read contributes an all-absent reading rather
//! than an error, so it drops out of sums and fails the usability check.

pub mod parser;
pub mod source;

pub use parser::{parse_reading, parse_uevent, records};
pub use source::{SysfsSource, TelemetrySource};

use crate::battery::BatteryReading;
use tracing::debug;

/// Read and parse every battery the source knows about, in index order.
pub fn read_batteries(source: &dyn TelemetrySource) -> Vec<BatteryReading> {
    source
        .battery_names()
        .iter()
        .map(|name| {
            let reading = source
                .read_uevent(name)
                .map(|contents| parse_uevent(&contents))
                .unwrap_or_default();
            debug!("{}: {:?}", name, reading);
            reading
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battery::{ChargeStatus, MeasurementUnit};
    use crate::telemetry::source::MockTelemetrySource;

    #[test]
    fn test_read_batteries_in_order() {
        let mut source = MockTelemetrySource::new();
        source
            .expect_battery_names()
            .times(1)
            .returning(|| vec!["BAT0".to_string(), "BAT1".to_string()]);
        source.expect_read_uevent().times(2).returning(|name| match name {
            "BAT0" => Some("POWER_SUPPLY_STATUS=Discharging\nPOWER_SUPPLY_ENERGY_NOW=10\n".to_string()),
            "BAT1" => Some("POWER_SUPPLY_STATUS=Charging\nPOWER_SUPPLY_CHARGE_NOW=20\n".to_string()),
            _ => None,
        });

        let readings = read_batteries(&source);
        assert_eq!(readings.len(), 2);
        assert_eq!(readings[0].status, ChargeStatus::Discharging);
        assert_eq!(readings[0].unit, MeasurementUnit::Energy);
        assert_eq!(readings[1].status, ChargeStatus::Charging);
        assert_eq!(readings[1].unit, MeasurementUnit::Charge);
        assert_eq!(readings[1].energy_remaining, Some(20.0));
    }

    #[test]
    fn test_unreadable_device_is_all_absent() {
        let mut source = MockTelemetrySource::new();
        source
            .expect_battery_names()
            .returning(|| vec!["BAT0".to_string()]);
        source.expect_read_uevent().returning(|_| None);

        let readings = read_batteries(&source);
        assert_eq!(readings, vec![BatteryReading::default()]);
    }

    #[test]
    fn test_no_devices() {
        let mut source = MockTelemetrySource::new();
        source.expect_battery_names().returning(Vec::new);
        source.expect_read_uevent().never();

        assert!(read_batteries(&source).is_empty());
    }
}
