//! # Block Output
//!
//! Composes the lines i3blocks reads from stdout.
//!
//! Text format is up to three lines: full text, short text (the same here)
//! and, when the charge is at or below the threshold, the color. JSON
//! format is a single object with `full_text`, `short_text` and `color`.

use clap::ValueEnum;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::warn;

use super::click::DisplayMode;
use super::icons::IconSet;
use crate::battery::{estimate, AggregateReading};
use crate::config::DisplayConfig;

/// Text printed when no usable battery data exists
pub const PLACEHOLDER: &str = "  ";

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Line-based output
    #[default]
    Text,
    /// i3blocks JSON object
    Json,
}

/// One rendered block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockOutput {
    pub full_text: String,
    pub short_text: String,
    /// Color for low charge, `None` otherwise
    pub color: Option<String>,
    /// False when the reading had no usable data
    available: bool,
}

impl BlockOutput {
    /// Placeholder block for missing battery data
    #[must_use]
    pub fn unavailable() -> Self {
        Self {
            full_text: PLACEHOLDER.to_string(),
            short_text: PLACEHOLDER.to_string(),
            color: None,
            available: false,
        }
    }

    /// Whether the block reflects real battery data
    pub fn is_available(&self) -> bool {
        self.available
    }

    /// Render for stdout, newline terminated.
    #[must_use]
    pub fn render(&self, format: OutputFormat) -> String {
        match format {
            OutputFormat::Text => {
                let mut out = format!("{}\n{}\n", self.full_text, self.short_text);
                if let Some(color) = &self.color {
                    out.push_str(color);
                    out.push('\n');
                }
                out
            }
            OutputFormat::Json => {
                let mut block = json!({
                    "full_text": self.full_text,
                    "short_text": self.short_text,
                });
                if let (Some(color), Value::Object(map)) = (&self.color, &mut block) {
                    map.insert("color".to_string(), Value::String(color.clone()));
                }
                format!("{}\n", block)
            }
        }
    }
}

/// Whether a percentage should be colored as low (threshold inclusive)
#[must_use]
pub fn is_low(percentage: f64, threshold: f64) -> bool {
    percentage <= threshold
}

/// Compose the block for an aggregate reading.
///
/// # Arguments
///
/// * `reading` - Selected or combined reading
/// * `mode` - Icon or percentage display
/// * `icons` - Icon table for this run
/// * `display` - Threshold and low-charge color
///
/// # Returns
///
/// The rendered block, or [`BlockOutput::unavailable`] when the reading
/// lacks remaining or design capacity.
#[must_use]
pub fn compose(
    reading: &AggregateReading,
    mode: DisplayMode,
    icons: &IconSet,
    display: &DisplayConfig,
) -> BlockOutput {
    let Some(percentage) = reading.percentage() else {
        warn!("Battery data unavailable: {:?}", reading);
        return BlockOutput::unavailable();
    };

    let time = estimate(reading);
    let text = match mode {
        DisplayMode::Icon => format!(
            "{} {}  {}",
            icons.status_icon(reading.status),
            icons.tier_icon(percentage),
            time
        ),
        // `as` truncates toward zero and saturates negatives at 0
        DisplayMode::Percentage => format!("{}% {}", percentage as u64, time),
    };

    BlockOutput {
        short_text: text.clone(),
        full_text: text,
        color: is_low(percentage, display.threshold).then(|| display.low_color.clone()),
        available: true,
    }
}
