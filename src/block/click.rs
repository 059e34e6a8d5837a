//! # Click Handling
//!
//! i3blocks reports the mouse button that triggered a refresh through the
//! `BLOCK_BUTTON` environment variable. A click changes what a single run
//! displays; nothing is remembered between runs.
//!
//! | Button | Effect |
//! |--------|--------|
//! | none / 0 | icon display |
//! | 1 | percentage of the configured selection |
//! | 2, 3 | percentage; in combined mode, of the highest-index battery with charge left |
//! | other | percentage of the configured selection |

use crate::battery::{BatteryReading, BatterySelector};

/// Environment variable carrying the clicked button
pub const BLOCK_BUTTON_VAR: &str = "BLOCK_BUTTON";

/// What the block shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayMode {
    /// Status glyph, tier icon and time estimate
    #[default]
    Icon,
    /// Whole-number percentage and time estimate
    Percentage,
}

/// Display mode and battery selection for one run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interaction {
    pub mode: DisplayMode,
    pub selector: BatterySelector,
}

/// Button id from a raw `BLOCK_BUTTON` value.
///
/// Absent, empty and unparsable values all mean no click (`0`).
#[must_use]
pub fn button_from_value(value: Option<&str>) -> u32 {
    value
        .map(str::trim)
        .and_then(|v| v.parse().ok())
        .unwrap_or(0)
}

/// Button id from the process environment
#[must_use]
pub fn button_from_env() -> u32 {
    button_from_value(std::env::var(BLOCK_BUTTON_VAR).ok().as_deref())
}

/// Highest-index battery whose remaining capacity is present and nonzero
fn last_charged_battery(readings: &[BatteryReading]) -> Option<usize> {
    readings
        .iter()
        .rposition(|r| matches!(r.energy_remaining, Some(remaining) if remaining != 0.0))
}

/// Resolve a click into a display mode and battery selection.
///
/// # Arguments
///
/// * `button` - Button id, `0` for no click
/// * `selector` - Configured battery selection
/// * `readings` - Normalized readings, ordered by battery index
///
/// # Examples
///
/// ```
/// use battery_block::battery::{BatteryReading, BatterySelector};
/// use battery_block::block::click::{resolve, DisplayMode};
///
/// let readings = [
///     BatteryReading { energy_remaining: Some(12.0), ..BatteryReading::default() },
///     BatteryReading { energy_remaining: Some(0.0), ..BatteryReading::default() },
/// ];
/// let interaction = resolve(3, BatterySelector::Combined, &readings);
/// assert_eq!(interaction.mode, DisplayMode::Percentage);
/// assert_eq!(interaction.selector, BatterySelector::Index(0));
/// ```
#[must_use]
pub fn resolve(button: u32, selector: BatterySelector, readings: &[BatteryReading]) -> Interaction {
    let mode = if button == 0 {
        DisplayMode::Icon
    } else {
        DisplayMode::Percentage
    };

    let selector = match (button, selector) {
        (2 | 3, BatterySelector::Combined) => last_charged_battery(readings)
            .map(BatterySelector::Index)
            .unwrap_or(BatterySelector::Combined),
        _ => selector,
    };

    Interaction { mode, selector }
}
