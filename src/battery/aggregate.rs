//! # Battery Aggregator
//!
//! Reduces the normalized per-battery readings to the single reading shown
//! in the bar: either one battery picked by index or all batteries combined.

use tracing::debug;

use super::reading::{AggregateReading, BatteryReading, ChargeStatus, MeasurementUnit};

/// Which battery (or batteries) to report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BatterySelector {
    /// Combine every battery into one logical reading
    #[default]
    Combined,
    /// Report a single battery by zero-based index
    Index(usize),
}

impl BatterySelector {
    /// Clamp the selector to the number of available batteries.
    ///
    /// An index past the end selects the last battery. With no batteries at
    /// all the selector falls back to [`BatterySelector::Combined`].
    #[must_use]
    pub fn clamp(self, count: usize) -> Self {
        match self {
            BatterySelector::Combined => BatterySelector::Combined,
            BatterySelector::Index(_) if count == 0 => BatterySelector::Combined,
            BatterySelector::Index(index) if index >= count => {
                debug!("Battery index {} out of range, using {}", index, count - 1);
                BatterySelector::Index(count - 1)
            }
            selector => selector,
        }
    }
}

/// Sum the present values, `None` if no value is present
fn sum_present(values: impl Iterator<Item = Option<f64>>) -> Option<f64> {
    values.flatten().fold(None, |acc, v| Some(acc.unwrap_or(0.0) + v))
}

/// Maximum of the present values, `None` if no value is present
fn max_present(values: impl Iterator<Item = Option<f64>>) -> Option<f64> {
    values.flatten().fold(None, |acc, v| Some(acc.map_or(v, |a: f64| a.max(v))))
}

/// Combine all readings into one.
///
/// Capacities are summed over usable readings only, so a battery missing
/// its design capacity cannot push the percentage past 100%. Rate and
/// voltage take the maximum over all readings, and the status is the
/// highest-priority status any battery reports. Absent fields are skipped;
/// a field absent on every battery stays absent.
///
/// # Examples
///
/// ```
/// use battery_block::battery::{combine, BatteryReading, ChargeStatus};
///
/// let a = BatteryReading {
///     status: ChargeStatus::Plugged,
///     energy_remaining: Some(30.0),
///     energy_full_design: Some(50.0),
///     ..BatteryReading::default()
/// };
/// let b = BatteryReading {
///     status: ChargeStatus::Discharging,
///     energy_remaining: Some(10.0),
///     energy_full_design: Some(50.0),
///     present_rate: Some(5.0),
///     ..BatteryReading::default()
/// };
///
/// let combined = combine(&[a, b]);
/// assert_eq!(combined.status, ChargeStatus::Discharging);
/// assert_eq!(combined.percentage(), Some(40.0));
/// ```
#[must_use]
pub fn combine(readings: &[BatteryReading]) -> AggregateReading {
    let status = readings
        .iter()
        .map(|r| r.status)
        .max_by_key(|s| s.priority())
        .unwrap_or_default();

    let unit = if readings.iter().any(|r| r.unit == MeasurementUnit::Charge) {
        MeasurementUnit::Charge
    } else {
        MeasurementUnit::Energy
    };

    let usable = || readings.iter().filter(|r| r.is_usable());
    let skipped = readings.len() - usable().count();
    if skipped > 0 {
        debug!("Skipping {} unusable batteries in combined capacity", skipped);
    }

    AggregateReading {
        status,
        energy_full_design: sum_present(usable().map(|r| r.energy_full_design)),
        energy_full: sum_present(usable().map(|r| r.energy_full)),
        energy_remaining: sum_present(usable().map(|r| r.energy_remaining)),
        present_rate: max_present(readings.iter().map(|r| r.present_rate)),
        voltage: max_present(readings.iter().map(|r| r.voltage)),
        unit,
    }
}

/// Resolve the reading to display.
///
/// # Arguments
///
/// * `readings` - Normalized readings, ordered by battery index
/// * `selector` - Requested battery, clamped to the available range
///
/// # Returns
///
/// The selected or combined reading. Check
/// [`BatteryReading::percentage`] for `None` to detect unavailable data.
#[must_use]
pub fn aggregate(readings: &[BatteryReading], selector: BatterySelector) -> AggregateReading {
    match selector.clamp(readings.len()) {
        BatterySelector::Index(index) => readings[index],
        BatterySelector::Combined => combine(readings),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading(status: ChargeStatus, remaining: f64, design: f64, rate: f64) -> BatteryReading {
        BatteryReading {
            status,
            energy_full_design: Some(design),
            energy_full: None,
            energy_remaining: Some(remaining),
            present_rate: Some(rate),
            voltage: Some(11_400_000.0),
            unit: MeasurementUnit::Energy,
        }
    }

    fn two_batteries() -> Vec<BatteryReading> {
        vec![
            reading(ChargeStatus::Plugged, 40_000_000.0, 45_000_000.0, 0.0),
            reading(ChargeStatus::Discharging, 12_000_000.0, 24_000_000.0, 8_000_000.0),
        ]
    }

    #[test]
    fn test_clamp_in_range() {
        assert_eq!(BatterySelector::Index(1).clamp(3), BatterySelector::Index(1));
    }

    #[test]
    fn test_clamp_past_end() {
        assert_eq!(BatterySelector::Index(3).clamp(3), BatterySelector::Index(2));
        assert_eq!(BatterySelector::Index(99).clamp(1), BatterySelector::Index(0));
    }

    #[test]
    fn test_clamp_no_batteries() {
        assert_eq!(BatterySelector::Index(0).clamp(0), BatterySelector::Combined);
        assert_eq!(BatterySelector::Combined.clamp(0), BatterySelector::Combined);
    }

    #[test]
    fn test_select_by_index() {
        let readings = two_batteries();
        assert_eq!(aggregate(&readings, BatterySelector::Index(1)), readings[1]);
    }

    #[test]
    fn test_out_of_range_index_matches_last() {
        let readings = two_batteries();
        let count = readings.len();
        let last = aggregate(&readings, BatterySelector::Index(count - 1));
        assert_eq!(aggregate(&readings, BatterySelector::Index(count)), last);
        assert_eq!(aggregate(&readings, BatterySelector::Index(count + 5)), last);
    }

    #[test]
    fn test_zero_devices_unavailable() {
        let combined = aggregate(&[], BatterySelector::Index(0));
        assert!(!combined.is_usable());
        assert_eq!(combined.percentage(), None);

        let combined = aggregate(&[], BatterySelector::Combined);
        assert_eq!(combined.percentage(), None);
    }

    #[test]
    fn test_combine_sums_and_maxes() {
        let combined = aggregate(&two_batteries(), BatterySelector::Combined);

        assert_eq!(combined.energy_remaining, Some(52_000_000.0));
        assert_eq!(combined.energy_full_design, Some(69_000_000.0));
        assert_eq!(combined.energy_full, None);
        assert_eq!(combined.present_rate, Some(8_000_000.0));
        assert_eq!(combined.voltage, Some(11_400_000.0));
        assert_eq!(combined.status, ChargeStatus::Discharging);
    }

    #[test]
    fn test_combine_order_independent() {
        let batteries = vec![
            reading(ChargeStatus::Charging, 10_000_000.0, 50_000_000.0, 3_000_000.0),
            reading(ChargeStatus::Plugged, 24_000_000.0, 24_000_000.0, 0.0),
            reading(ChargeStatus::Discharging, 7_500_000.0, 30_000_000.0, 9_000_000.0),
        ];
        let reference = combine(&batteries);

        let permutations = [[0, 2, 1], [1, 0, 2], [1, 2, 0], [2, 0, 1], [2, 1, 0]];
        for order in &permutations {
            let permuted: Vec<_> = order.iter().map(|&i| batteries[i]).collect();
            let combined = combine(&permuted);
            assert_eq!(combined.energy_remaining, reference.energy_remaining);
            assert_eq!(combined.energy_full_design, reference.energy_full_design);
            assert_eq!(combined.percentage(), reference.percentage());
            assert_eq!(combined.status, reference.status);
        }
    }

    #[test]
    fn test_status_discharging_wins() {
        let batteries = [
            reading(ChargeStatus::Discharging, 1.0, 2.0, 0.0),
            reading(ChargeStatus::Charging, 1.0, 2.0, 0.0),
            reading(ChargeStatus::Plugged, 1.0, 2.0, 0.0),
        ];
        assert_eq!(combine(&batteries).status, ChargeStatus::Discharging);
    }

    #[test]
    fn test_status_charging_over_plugged() {
        let batteries = [
            reading(ChargeStatus::Plugged, 1.0, 2.0, 0.0),
            reading(ChargeStatus::Charging, 1.0, 2.0, 0.0),
        ];
        assert_eq!(combine(&batteries).status, ChargeStatus::Charging);
    }

    #[test]
    fn test_status_all_plugged() {
        let batteries = [
            reading(ChargeStatus::Plugged, 1.0, 2.0, 0.0),
            reading(ChargeStatus::Plugged, 1.0, 2.0, 0.0),
        ];
        assert_eq!(combine(&batteries).status, ChargeStatus::Plugged);
    }

    #[test]
    fn test_unusable_battery_excluded_from_capacities() {
        let missing_design = BatteryReading {
            energy_remaining: Some(5.0),
            present_rate: Some(3.0),
            ..BatteryReading::default()
        };
        let complete = reading(ChargeStatus::Discharging, 10.0, 40.0, 2.0);

        let combined = combine(&[missing_design, complete]);
        assert_eq!(combined.energy_remaining, Some(10.0));
        assert_eq!(combined.energy_full_design, Some(40.0));
        assert_eq!(combined.present_rate, Some(3.0));
        assert_eq!(combined.status, ChargeStatus::Discharging);
    }

    #[test]
    fn test_remaining_only_battery_keeps_percentage() {
        // BAT1 reports charge without any design capacity the parser knows
        let bat0 = reading(ChargeStatus::Discharging, 30_000_000.0, 40_000_000.0, 0.0);
        let bat1 = BatteryReading {
            energy_remaining: Some(48_000_000.0),
            voltage: Some(12_000_000.0),
            ..BatteryReading::default()
        };

        let combined = combine(&[bat0, bat1]);
        assert_eq!(combined.percentage(), bat0.percentage());
        assert_eq!(combined.percentage(), Some(75.0));
    }

    #[test]
    fn test_no_usable_battery_stays_unavailable() {
        let remaining_only = BatteryReading {
            energy_remaining: Some(5.0),
            ..BatteryReading::default()
        };
        let design_only = BatteryReading {
            energy_full_design: Some(40.0),
            ..BatteryReading::default()
        };

        let combined = combine(&[remaining_only, design_only]);
        assert!(!combined.is_usable());
        assert_eq!(combined.percentage(), None);
    }

    #[test]
    fn test_all_absent_stays_unavailable() {
        let combined = combine(&[BatteryReading::default(), BatteryReading::default()]);
        assert_eq!(combined.energy_remaining, None);
        assert_eq!(combined.energy_full_design, None);
        assert!(!combined.is_usable());
    }

    #[test]
    fn test_combine_keeps_charge_unit_marker() {
        let unconverted = BatteryReading {
            unit: MeasurementUnit::Charge,
            ..reading(ChargeStatus::Discharging, 1.0, 2.0, 0.5)
        };
        let converted = reading(ChargeStatus::Plugged, 1.0, 2.0, 0.0);
        assert_eq!(combine(&[converted, unconverted]).unit, MeasurementUnit::Charge);
        assert_eq!(combine(&[converted]).unit, MeasurementUnit::Energy);
    }
}
