//! # Telemetry Sources
//!
//! Where battery telemetry comes from. [`SysfsSource`] reads the kernel's
//! power-supply class directory; tests drive the pipeline through a mock
//! of [`TelemetrySource`] instead.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Default power-supply class directory
pub const DEFAULT_BASE_PATH: &str = "/sys/class/power_supply";

/// Prefix of battery device directory names (`BAT0`, `BAT1`, ...)
pub const BATTERY_PREFIX: &str = "BAT";

/// Name of the per-device telemetry file
pub const UEVENT_FILE: &str = "uevent";

/// Trait for battery telemetry access
#[cfg_attr(test, mockall::automock)]
pub trait TelemetrySource {
    /// Battery device names, ordered by battery index
    fn battery_names(&self) -> Vec<String>;

    /// Raw `uevent` contents of one device, `None` if it cannot be read
    fn read_uevent(&self, name: &str) -> Option<String>;
}

/// Index of a `BAT<digits>` device name, `None` for any other name
///
/// # Examples
///
/// ```
/// use battery_block::telemetry::source::battery_index;
///
/// assert_eq!(battery_index("BAT0"), Some(0));
/// assert_eq!(battery_index("BAT12"), Some(12));
/// assert_eq!(battery_index("AC"), None);
/// assert_eq!(battery_index("BATX"), None);
/// ```
#[must_use]
pub fn battery_index(name: &str) -> Option<u64> {
    let digits = name.strip_prefix(BATTERY_PREFIX)?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// Telemetry read from a sysfs power-supply directory
#[derive(Debug, Clone)]
pub struct SysfsSource {
    /// Directory holding the `BAT<n>` device entries
    base_path: PathBuf,
}

impl Default for SysfsSource {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_PATH)
    }
}

impl SysfsSource {
    /// Create a source rooted at `base_path`
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    /// Directory this source enumerates
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }
}

impl TelemetrySource for SysfsSource {
    fn battery_names(&self) -> Vec<String> {
        let entries = match fs::read_dir(&self.base_path) {
            Ok(entries) => entries,
            Err(e) => {
                warn!("Failed to list {}: {}", self.base_path.display(), e);
                return Vec::new();
            }
        };

        let mut batteries: Vec<(u64, String)> = entries
            .flatten()
            .filter_map(|entry| {
                let name = entry.file_name().to_string_lossy().into_owned();
                battery_index(&name).map(|index| (index, name))
            })
            .collect();
        batteries.sort();

        debug!("Found {} batteries under {}", batteries.len(), self.base_path.display());
        batteries.into_iter().map(|(_, name)| name).collect()
    }

    fn read_uevent(&self, name: &str) -> Option<String> {
        let path = self.base_path.join(name).join(UEVENT_FILE);
        match fs::read_to_string(&path) {
            Ok(contents) => Some(contents),
            Err(e) => {
                warn!("Failed to read {}: {}", path.display(), e);
                None
            }
        }
    }
}
