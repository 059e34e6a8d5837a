//! # Battery Reading Types
//!
//! Per-battery telemetry in a single unit system, plus the charge status
//! and its reconciliation priority.

use std::fmt;

/// Battery charging status as reported by `STATUS`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChargeStatus {
    /// Running on battery power
    Discharging,
    /// Connected and charging
    Charging,
    /// Full, not charging, or any other reported state
    #[default]
    Plugged,
}

impl ChargeStatus {
    /// Priority used when several batteries disagree.
    ///
    /// The combined status is the one with the highest priority:
    /// Discharging (2) > Charging (1) > Plugged (0). Any discharging battery
    /// makes the whole system discharging.
    #[must_use]
    pub fn priority(self) -> u8 {
        match self {
            ChargeStatus::Discharging => 2,
            ChargeStatus::Charging => 1,
            ChargeStatus::Plugged => 0,
        }
    }

    /// Map a raw `STATUS` value. Anything other than `Charging` or
    /// `Discharging` counts as plugged.
    #[must_use]
    pub fn from_status_value(value: &str) -> Self {
        match value {
            "Charging" => ChargeStatus::Charging,
            "Discharging" => ChargeStatus::Discharging,
            _ => ChargeStatus::Plugged,
        }
    }
}

impl fmt::Display for ChargeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChargeStatus::Discharging => write!(f, "Discharging"),
            ChargeStatus::Charging => write!(f, "Charging"),
            ChargeStatus::Plugged => write!(f, "Plugged"),
        }
    }
}

/// Unit system a reading's capacity and rate fields are expressed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MeasurementUnit {
    /// Energy domain (µWh / µW from the kernel, mWh-like after conversion)
    #[default]
    Energy,
    /// Charge domain (µAh / µA), needs voltage to convert
    Charge,
}

/// Telemetry for one physical battery
///
/// Every numeric field is `None` when the source never reported it. A
/// malformed value that was reported reads as `Some(0.0)`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BatteryReading {
    /// Charging status
    pub status: ChargeStatus,

    /// Design capacity
    pub energy_full_design: Option<f64>,

    /// Last measured full capacity
    pub energy_full: Option<f64>,

    /// Remaining capacity
    pub energy_remaining: Option<f64>,

    /// Absolute charge or discharge rate
    pub present_rate: Option<f64>,

    /// Absolute measured voltage (µV)
    pub voltage: Option<f64>,

    /// Unit the capacity and rate fields are in
    pub unit: MeasurementUnit,
}

/// A reading used for display: one selected battery or all of them combined
pub type AggregateReading = BatteryReading;

impl BatteryReading {
    /// Whether the fields needed for a percentage are present.
    #[must_use]
    pub fn is_usable(&self) -> bool {
        self.energy_full_design.is_some() && self.energy_remaining.is_some()
    }

    /// Charge level in percent of design capacity.
    ///
    /// Returns `None` when the reading is unusable. A non-positive design
    /// capacity yields `0.0` rather than an infinite or NaN percentage.
    ///
    /// # Examples
    ///
    /// ```
    /// use battery_block::battery::BatteryReading;
    ///
    /// let reading = BatteryReading {
    ///     energy_full_design: Some(50_000_000.0),
    ///     energy_remaining: Some(25_000_000.0),
    ///     ..BatteryReading::default()
    /// };
    /// assert_eq!(reading.percentage(), Some(50.0));
    /// assert_eq!(BatteryReading::default().percentage(), None);
    /// ```
    #[must_use]
    pub fn percentage(&self) -> Option<f64> {
        let design = self.energy_full_design?;
        let remaining = self.energy_remaining?;

        if design <= 0.0 {
            return Some(0.0);
        }

        Some(remaining / design * 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_priority_order() {
        assert!(ChargeStatus::Discharging.priority() > ChargeStatus::Charging.priority());
        assert!(ChargeStatus::Charging.priority() > ChargeStatus::Plugged.priority());
    }

    #[test]
    fn test_status_from_value() {
        assert_eq!(ChargeStatus::from_status_value("Charging"), ChargeStatus::Charging);
        assert_eq!(ChargeStatus::from_status_value("Discharging"), ChargeStatus::Discharging);
        assert_eq!(ChargeStatus::from_status_value("Full"), ChargeStatus::Plugged);
        assert_eq!(ChargeStatus::from_status_value("Not charging"), ChargeStatus::Plugged);
        assert_eq!(ChargeStatus::from_status_value("Unknown"), ChargeStatus::Plugged);
        // Case-sensitive
        assert_eq!(ChargeStatus::from_status_value("charging"), ChargeStatus::Plugged);
    }

    #[test]
    fn test_default_reading_is_unusable() {
        let reading = BatteryReading::default();
        assert!(!reading.is_usable());
        assert_eq!(reading.status, ChargeStatus::Plugged);
        assert_eq!(reading.unit, MeasurementUnit::Energy);
    }

    #[test]
    fn test_percentage_requires_design_capacity() {
        let reading = BatteryReading {
            energy_remaining: Some(10.0),
            energy_full: Some(100.0),
            ..BatteryReading::default()
        };
        assert_eq!(reading.percentage(), None);
    }

    #[test]
    fn test_percentage_zero_design_capacity() {
        let reading = BatteryReading {
            energy_full_design: Some(0.0),
            energy_remaining: Some(0.0),
            ..BatteryReading::default()
        };
        assert_eq!(reading.percentage(), Some(0.0));
    }

    #[test]
    fn test_percentage_uses_design_capacity() {
        let reading = BatteryReading {
            energy_full_design: Some(200.0),
            energy_full: Some(100.0),
            energy_remaining: Some(50.0),
            ..BatteryReading::default()
        };
        assert_eq!(reading.percentage(), Some(25.0));
    }
}
