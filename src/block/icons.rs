//! # Icon Sets
//!
//! Tier icons and status glyphs for the icon display.
//!
//! ## Tiers
//!
//! | Tier | Percentage |
//! |------|------------|
//! | 0 | >= 95 |
//! | 1 | >= 75 |
//! | 2 | >= 50 |
//! | 3 | >= 25 |
//! | 4 | below 25 |
//!
//! The default glyphs come from Font Awesome and need a font that has them.

use clap::ValueEnum;
use serde::Deserialize;

use crate::battery::ChargeStatus;
use crate::error::{BatteryBlockError, Result};

/// Number of percentage tiers
pub const TIER_COUNT: usize = 5;

/// Delimiter between the FULL and EMPTY parts of a custom icon pair
pub const CUSTOM_DELIMITER: char = ',';

/// Font Awesome battery glyphs, full to empty
const BATTERY_GLYPHS: [&str; TIER_COUNT] = ["\u{f240}", "\u{f241}", "\u{f242}", "\u{f243}", "\u{f244}"];

const HEART_FULL: &str = "\u{2665}";
const HEART_EMPTY: &str = "\u{2661}";

const GLYPH_CHARGING: &str = "\u{f0e7}";
const GLYPH_DISCHARGING: &str = "\u{f063}";
const GLYPH_PLUGGED: &str = "\u{f1e6}";

/// Tier lower bounds in percent, tier 0 first
const TIER_THRESHOLDS: [f64; TIER_COUNT - 1] = [95.0, 75.0, 50.0, 25.0];

/// Icon style selectable from the command line or config file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum IconStyle {
    /// Battery outline glyphs
    #[default]
    Battery,
    /// A ramp of filled and outlined hearts
    Heart,
    /// A ramp built from a FULL,EMPTY pair
    Custom,
}

/// Tier of a percentage, 0 (full) to 4 (nearly empty).
///
/// Each tier includes its lower bound. NaN falls into the last tier.
///
/// # Examples
///
/// ```
/// use battery_block::block::icons::tier;
///
/// assert_eq!(tier(95.0), 0);
/// assert_eq!(tier(94.9), 1);
/// assert_eq!(tier(24.9), 4);
/// ```
#[must_use]
pub fn tier(percentage: f64) -> usize {
    TIER_THRESHOLDS
        .iter()
        .position(|&threshold| percentage >= threshold)
        .unwrap_or(TIER_COUNT - 1)
}

/// Build a five-tier ramp: FULL/EMPTY repeated 4:0, 3:1, 2:2, 1:3, 0:4.
#[must_use]
pub fn ramp(full: &str, empty: &str) -> [String; TIER_COUNT] {
    let width = TIER_COUNT - 1;
    std::array::from_fn(|tier| format!("{}{}", full.repeat(width - tier), empty.repeat(tier)))
}

/// Split a `FULL,EMPTY` pair.
///
/// # Errors
///
/// Returns [`BatteryBlockError::InvalidIcons`] if the delimiter is missing
/// or either side is empty.
pub fn parse_custom_pair(spec: &str) -> Result<(&str, &str)> {
    let (full, empty) = spec.split_once(CUSTOM_DELIMITER).ok_or_else(|| {
        BatteryBlockError::InvalidIcons(format!(
            "expected FULL{}EMPTY, got \"{}\"",
            CUSTOM_DELIMITER, spec
        ))
    })?;

    if full.is_empty() || empty.is_empty() {
        return Err(BatteryBlockError::InvalidIcons(format!(
            "FULL and EMPTY must not be empty in \"{}\"",
            spec
        )));
    }

    Ok((full, empty))
}

/// Immutable icon table for one invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconSet {
    /// Tier icons, tier 0 first
    tiers: [String; TIER_COUNT],
    charging: String,
    discharging: String,
    plugged: String,
}

impl Default for IconSet {
    fn default() -> Self {
        Self::battery()
    }
}

impl IconSet {
    fn with_tiers(tiers: [String; TIER_COUNT]) -> Self {
        Self {
            tiers,
            charging: GLYPH_CHARGING.to_string(),
            discharging: GLYPH_DISCHARGING.to_string(),
            plugged: GLYPH_PLUGGED.to_string(),
        }
    }

    /// Battery glyph preset
    #[must_use]
    pub fn battery() -> Self {
        Self::with_tiers(BATTERY_GLYPHS.map(str::to_string))
    }

    /// Heart ramp preset
    #[must_use]
    pub fn heart() -> Self {
        Self::with_tiers(ramp(HEART_FULL, HEART_EMPTY))
    }

    /// Ramp built from a `FULL,EMPTY` pair
    ///
    /// # Errors
    ///
    /// Returns [`BatteryBlockError::InvalidIcons`] for a malformed pair.
    ///
    /// # Examples
    ///
    /// ```
    /// use battery_block::block::icons::IconSet;
    ///
    /// let icons = IconSet::custom("#,-")?;
    /// assert_eq!(icons.tier_icon(60.0), "##--");
    /// assert!(IconSet::custom("#-").is_err());
    /// # Ok::<(), battery_block::error::BatteryBlockError>(())
    /// ```
    pub fn custom(spec: &str) -> Result<Self> {
        let (full, empty) = parse_custom_pair(spec)?;
        Ok(Self::with_tiers(ramp(full, empty)))
    }

    /// Build the icon set for a style.
    ///
    /// # Errors
    ///
    /// Returns [`BatteryBlockError::InvalidIcons`] if the style is
    /// [`IconStyle::Custom`] and `custom` is missing or malformed.
    pub fn from_style(style: IconStyle, custom: Option<&str>) -> Result<Self> {
        match style {
            IconStyle::Battery => Ok(Self::battery()),
            IconStyle::Heart => Ok(Self::heart()),
            IconStyle::Custom => {
                let spec = custom.ok_or_else(|| {
                    BatteryBlockError::InvalidIcons(
                        "custom icon style needs a FULL,EMPTY pair".to_string(),
                    )
                })?;
                Self::custom(spec)
            }
        }
    }

    /// All tier icons, tier 0 first
    pub fn tiers(&self) -> &[String; TIER_COUNT] {
        &self.tiers
    }

    /// Icon for a charge percentage
    pub fn tier_icon(&self, percentage: f64) -> &str {
        &self.tiers[tier(percentage)]
    }

    /// Glyph for a charge status
    pub fn status_icon(&self, status: ChargeStatus) -> &str {
        match status {
            ChargeStatus::Charging => &self.charging,
            ChargeStatus::Discharging => &self.discharging,
            ChargeStatus::Plugged => &self.plugged,
        }
    }
}
