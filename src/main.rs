//! # Battery Block
//!
//! Battery status block for i3blocks-style status bars.
//!
//! Each run reads `/sys/class/power_supply/BAT*/uevent`, prints the full
//! text, short text and (when low) color lines, then exits. i3blocks
//! re-runs it on every interval or click.
//!
//! # Examples
//!
//! i3blocks configuration:
//! ```text
//! [battery]
//! command=battery-block --type heart
//! interval=30
//! ```
//!
//! After a left click (`BLOCK_BUTTON=1`) the block shows the percentage:
//! ```text
//! 63% 01:42
//! 63% 01:42
//! ```
//!
//! Logs go to stderr (or the configured file); set `RUST_LOG=debug` to see
//! parsed readings.

use anyhow::Result;
use clap::Parser;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use battery_block::block::click::button_from_env;
use battery_block::block::{BlockOutput, IconSet, IconStyle, OutputFormat};
use battery_block::config::{self, Config, LoggingConfig};
use battery_block::telemetry::SysfsSource;

/// Exit status when no usable battery data was found
const EXIT_UNAVAILABLE: u8 = 1;

/// Process exit status for a rendered block
fn exit_status(output: &BlockOutput) -> u8 {
    if output.is_available() {
        0
    } else {
        EXIT_UNAVAILABLE
    }
}

#[derive(Parser)]
#[command(name = "battery-block")]
#[command(about = "Battery status for i3blocks-style status bars", long_about = None)]
#[command(version)]
struct Cli {
    /// Icons to indicate the battery status
    #[arg(short = 't', long = "type", value_enum)]
    icon_type: Option<IconStyle>,

    /// FULL,EMPTY pair for custom icons (implies --type custom)
    #[arg(short, long, value_name = "FULL,EMPTY")]
    custom: Option<String>,

    /// Battery index to report (default: combine all batteries)
    #[arg(short, long, value_name = "INDEX")]
    battery: Option<usize>,

    /// Power supply directory
    #[arg(short, long, value_name = "DIR")]
    path: Option<PathBuf>,

    /// Emit the low color at or below this percentage
    #[arg(short = 'T', long, value_name = "PERCENT")]
    threshold: Option<f64>,

    /// Output format
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Configuration file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

impl Cli {
    /// Apply command line overrides on top of the file configuration
    fn apply(self, config: &mut Config) {
        if let Some(custom) = self.custom {
            config.icons.style = IconStyle::Custom;
            config.icons.custom = Some(custom);
        }
        if let Some(style) = self.icon_type {
            config.icons.style = style;
        }
        if let Some(index) = self.battery {
            config.battery.index = Some(index);
        }
        if let Some(path) = self.path {
            config.battery.base_path = path;
        }
        if let Some(threshold) = self.threshold {
            config.display.threshold = threshold;
        }
        if let Some(format) = self.format {
            config.display.format = format;
        }
    }
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
}

/// Initialize logging. Stdout belongs to the status bar, so logs go to
/// stderr or to the configured file.
fn init_logging(logging: &LoggingConfig) -> Option<WorkerGuard> {
    let file = logging
        .file
        .as_ref()
        .and_then(|path| Some((path.parent()?, path.file_name()?)));

    match file {
        Some((dir, name)) => {
            let appender = tracing_appender::rolling::never(dir, name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .with_writer(writer)
                .with_ansi(false)
                .init();
            Some(guard)
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .with_writer(std::io::stderr)
                .init();
            None
        }
    }
}

/// Main entry point for Battery Block
///
/// 1. Parse flags and load the configuration file
/// 2. Build the icon set (a malformed custom pair fails here, before any output)
/// 3. Read and aggregate battery telemetry
/// 4. Print the block and exit non-zero if no battery data was usable
fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::load_or_default(config::default_path())?,
    };
    cli.apply(&mut config);
    config.validate()?;

    let _guard = init_logging(&config.logging);
    debug!("Battery Block v{} starting", env!("CARGO_PKG_VERSION"));

    let icons = IconSet::from_style(config.icons.style, config.icons.custom.as_deref())?;
    let source = SysfsSource::new(&config.battery.base_path);

    let output = battery_block::run(&config, &icons, &source, button_from_env());

    let stdout = std::io::stdout();
    let mut stdout = stdout.lock();
    stdout.write_all(output.render(config.display.format).as_bytes())?;
    stdout.flush()?;

    Ok(ExitCode::from(exit_status(&output)))
}
