//! # Telemetry Record Parser
//!
//! Turns `KEY=VALUE` power-supply records into a [`BatteryReading`] in raw
//! kernel units.
//!
//! ## Recognized Keys
//!
//! | Key | Field |
//! |-----|-------|
//! | `ENERGY_NOW` | remaining capacity, energy units |
//! | `CHARGE_NOW` | remaining capacity, charge units |
//! | `CURRENT_NOW` | present rate (absolute) |
//! | `POWER_NOW` | present rate (absolute) |
//! | `VOLTAGE_NOW` | voltage (absolute) |
//! | `STATUS` | charge status |
//! | `ENERGY_FULL_DESIGN` | design capacity |
//! | `ENERGY_FULL` | last full capacity |
//!
//! When a device reports both `ENERGY_NOW` and `CHARGE_NOW`, whichever
//! comes last decides the remaining capacity and its unit.

use crate::battery::{BatteryReading, ChargeStatus, MeasurementUnit};

/// Prefix the kernel puts in front of every `uevent` key
pub const UEVENT_KEY_PREFIX: &str = "POWER_SUPPLY_";

/// Split `uevent` contents into `(key, value)` records.
///
/// Lines are split on the first `=`; lines without one are skipped. The
/// `POWER_SUPPLY_` prefix is removed from keys and values are trimmed.
///
/// # Examples
///
/// ```
/// use battery_block::telemetry::parser::records;
///
/// let contents = "POWER_SUPPLY_NAME=BAT0\nPOWER_SUPPLY_STATUS=Charging\n";
/// let pairs: Vec<_> = records(contents).collect();
/// assert_eq!(pairs, vec![("NAME", "BAT0"), ("STATUS", "Charging")]);
/// ```
pub fn records(contents: &str) -> impl Iterator<Item = (&str, &str)> {
    contents.lines().filter_map(|line| {
        let (key, value) = line.split_once('=')?;
        let key = key.trim();
        let key = key.strip_prefix(UEVENT_KEY_PREFIX).unwrap_or(key);
        Some((key, value.trim()))
    })
}

/// Parse a numeric value the way C's `atoi` does.
///
/// Uses the longest leading `[+-]digits` prefix; anything without one
/// parses as `0`.
#[must_use]
pub fn parse_permissive(value: &str) -> f64 {
    let value = value.trim_start();
    let sign_len = usize::from(value.starts_with(|c: char| c == '+' || c == '-'));
    let digits_len = value[sign_len..]
        .bytes()
        .take_while(u8::is_ascii_digit)
        .count();

    if digits_len == 0 {
        return 0.0;
    }

    value[..sign_len + digits_len].parse().unwrap_or(0.0)
}

/// Build a raw reading from `(key, value)` records.
///
/// Unrecognized keys are ignored. Fields that never appear stay `None`;
/// an empty record set yields the all-absent default reading.
///
/// # Arguments
///
/// * `records` - Records for one device, in file order
///
/// # Returns
///
/// A reading in the units the device reported (see [`crate::battery::normalize`])
///
/// # Examples
///
/// ```
/// use battery_block::battery::{ChargeStatus, MeasurementUnit};
/// use battery_block::telemetry::parser::parse_reading;
///
/// let reading = parse_reading([
///     ("STATUS", "Discharging"),
///     ("CHARGE_NOW", "2500000"),
///     ("CURRENT_NOW", "-1200000"),
/// ]);
/// assert_eq!(reading.status, ChargeStatus::Discharging);
/// assert_eq!(reading.unit, MeasurementUnit::Charge);
/// assert_eq!(reading.energy_remaining, Some(2_500_000.0));
/// assert_eq!(reading.present_rate, Some(1_200_000.0));
/// ```
pub fn parse_reading<'a, I>(records: I) -> BatteryReading
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut reading = BatteryReading::default();

    for (key, value) in records {
        match key {
            "ENERGY_NOW" => {
                reading.unit = MeasurementUnit::Energy;
                reading.energy_remaining = Some(parse_permissive(value));
            }
            "CHARGE_NOW" => {
                reading.unit = MeasurementUnit::Charge;
                reading.energy_remaining = Some(parse_permissive(value));
            }
            // POWER_NOW is CURRENT_NOW in µW instead of µA
            "CURRENT_NOW" | "POWER_NOW" => {
                reading.present_rate = Some(parse_permissive(value).abs());
            }
            "VOLTAGE_NOW" => reading.voltage = Some(parse_permissive(value).abs()),
            "STATUS" => reading.status = ChargeStatus::from_status_value(value),
            "ENERGY_FULL_DESIGN" => reading.energy_full_design = Some(parse_permissive(value)),
            "ENERGY_FULL" => reading.energy_full = Some(parse_permissive(value)),
            _ => {}
        }
    }

    reading
}

/// Parse the full contents of a `uevent` file.
#[must_use]
pub fn parse_uevent(contents: &str) -> BatteryReading {
    parse_reading(records(contents))
}
