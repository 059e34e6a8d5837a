//! # Battery Block Library
//!
//! Battery status for i3blocks-style status bars.
//!
//! This library reads kernel power-supply telemetry, normalizes charge and
//! energy units, combines multiple batteries and renders a short status
//! line with an optional low-charge color.
//!
//! ```no_run
//! use battery_block::block::click::button_from_env;
//! use battery_block::block::IconSet;
//! use battery_block::config::Config;
//! use battery_block::telemetry::SysfsSource;
//!
//! let config = Config::default();
//! let icons = IconSet::default();
//! let source = SysfsSource::new(&config.battery.base_path);
//!
//! let output = battery_block::run(&config, &icons, &source, button_from_env());
//! print!("{}", output.render(config.display.format));
//! ```

pub mod battery;
pub mod block;
pub mod config;
pub mod error;
pub mod telemetry;

use battery::{aggregate, normalize, BatteryReading};
use block::{click, output, BlockOutput, IconSet};
use config::Config;
use telemetry::TelemetrySource;
use tracing::debug;

/// Read, normalize and parse every battery the source exposes.
pub fn collect_readings(source: &dyn TelemetrySource) -> Vec<BatteryReading> {
    telemetry::read_batteries(source)
        .into_iter()
        .map(normalize)
        .collect()
}

/// Produce the block for one invocation.
///
/// # Arguments
///
/// * `config` - Validated configuration
/// * `icons` - Icon table built from `config.icons`
/// * `source` - Telemetry source
/// * `button` - Clicked button id, `0` for none
///
/// # Returns
///
/// The block to print. [`BlockOutput::is_available`] is false when no
/// usable battery data was found.
pub fn run(
    config: &Config,
    icons: &IconSet,
    source: &dyn TelemetrySource,
    button: u32,
) -> BlockOutput {
    let readings = collect_readings(source);
    let interaction = click::resolve(button, config.battery.selector(), &readings);
    debug!("{} batteries, {:?}", readings.len(), interaction);

    let reading = aggregate(&readings, interaction.selector);
    output::compose(&reading, interaction.mode, icons, &config.display)
}
