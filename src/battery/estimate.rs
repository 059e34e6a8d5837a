//! # Time Estimator
//!
//! Time until empty (discharging) or until full (charging) for an
//! aggregate reading.

use std::fmt;

use super::reading::{AggregateReading, ChargeStatus};

const SECONDS_PER_HOUR: f64 = 3600.0;

/// Result of a time-remaining estimate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeEstimate {
    /// Whole seconds until empty or full
    Remaining(u64),
    /// Nothing to estimate: plugged, or no current flowing
    Complete,
}

impl TimeEstimate {
    /// Whole hours and leftover minutes, `None` for [`TimeEstimate::Complete`]
    #[must_use]
    pub fn hours_minutes(&self) -> Option<(u64, u64)> {
        match *self {
            TimeEstimate::Remaining(seconds) => Some((seconds / 3600, (seconds % 3600) / 60)),
            TimeEstimate::Complete => None,
        }
    }
}

impl fmt::Display for TimeEstimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.hours_minutes() {
            Some((hours, minutes)) => write!(f, "{:02}:{:02}", hours, minutes),
            None => write!(f, "Full"),
        }
    }
}

/// Estimate the time remaining for a reading.
///
/// * Discharging: `remaining / rate` hours
/// * Charging: `(full - remaining) / rate` hours, with `full` the last
///   measured capacity if known, else the design capacity
/// * Plugged, or no positive rate: [`TimeEstimate::Complete`]
///
/// Negative and NaN results clamp to zero seconds.
///
/// # Examples
///
/// ```
/// use battery_block::battery::{estimate, BatteryReading, ChargeStatus};
///
/// let reading = BatteryReading {
///     status: ChargeStatus::Discharging,
///     energy_remaining: Some(50.0),
///     present_rate: Some(10.0),
///     ..BatteryReading::default()
/// };
/// assert_eq!(estimate(&reading).to_string(), "05:00");
/// ```
#[must_use]
pub fn estimate(reading: &AggregateReading) -> TimeEstimate {
    let rate = match reading.present_rate {
        Some(rate) if rate > 0.0 => rate,
        _ => return TimeEstimate::Complete,
    };

    let remaining = reading.energy_remaining.unwrap_or(0.0);

    let hours = match reading.status {
        ChargeStatus::Discharging => remaining / rate,
        ChargeStatus::Charging => {
            let full = reading
                .energy_full
                .or(reading.energy_full_design)
                .unwrap_or(0.0);
            (full - remaining) / rate
        }
        ChargeStatus::Plugged => return TimeEstimate::Complete,
    };

    TimeEstimate::Remaining(clamp_seconds(hours * SECONDS_PER_HOUR))
}

/// Floor to whole seconds, mapping negative and NaN to zero
fn clamp_seconds(seconds: f64) -> u64 {
    if seconds.is_nan() || seconds <= 0.0 {
        0
    } else {
        // `as` saturates at u64::MAX for huge values
        seconds.floor() as u64
    }
}
