//! # Unit Normalizer
//!
//! Converts charge-domain readings (µAh, µA) to the energy domain using the
//! measured voltage, so every reading shares one unit system.
//!
//! When the voltage is missing the reading is left in charge units. The
//! percentage stays correct (numerator and denominator share the unit) but
//! time estimates are no longer in hours.

use tracing::debug;

use super::reading::{BatteryReading, MeasurementUnit};

/// Convert one charge-domain value: `(voltage / 1000) * (value / 1000)`
#[inline]
fn charge_to_energy(voltage: f64, value: f64) -> f64 {
    (voltage / 1000.0) * (value / 1000.0)
}

/// Normalize a reading to energy units.
///
/// # Arguments
///
/// * `reading` - Parsed reading, possibly in charge units
///
/// # Returns
///
/// The reading in energy units, or unchanged if it already was, or if no
/// positive voltage is available for the conversion.
///
/// # Examples
///
/// ```
/// use battery_block::battery::{normalize, BatteryReading, MeasurementUnit};
///
/// let raw = BatteryReading {
///     energy_remaining: Some(2_000_000.0),
///     voltage: Some(12_000_000.0),
///     unit: MeasurementUnit::Charge,
///     ..BatteryReading::default()
/// };
/// let normalized = normalize(raw);
/// assert_eq!(normalized.unit, MeasurementUnit::Energy);
/// assert_eq!(normalized.energy_remaining, Some(24_000_000.0));
/// ```
#[must_use]
pub fn normalize(reading: BatteryReading) -> BatteryReading {
    if reading.unit == MeasurementUnit::Energy {
        return reading;
    }

    let voltage = match reading.voltage {
        Some(v) if v > 0.0 => v,
        // Zero or unparsable voltage is treated like a missing one
        _ => {
            debug!("No voltage for charge-unit reading, leaving values unconverted");
            return reading;
        }
    };

    let convert = |value: Option<f64>| value.map(|v| charge_to_energy(voltage, v));

    BatteryReading {
        present_rate: convert(reading.present_rate),
        energy_remaining: convert(reading.energy_remaining),
        energy_full_design: convert(reading.energy_full_design),
        energy_full: convert(reading.energy_full),
        unit: MeasurementUnit::Energy,
        ..reading
    }
}
