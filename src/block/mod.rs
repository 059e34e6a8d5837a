//! # Block Module
//!
//! Turns an aggregate reading into i3blocks output.
//!
//! This module handles:
//! - Mapping `BLOCK_BUTTON` clicks to a display mode and selection
//! - Tier icons, custom ramps and status glyphs
//! - Composing text or JSON output with the low-charge color

pub mod click;
pub mod icons;
pub mod output;

pub use click::{DisplayMode, Interaction};
pub use icons::{IconSet, IconStyle};
pub use output::{BlockOutput, OutputFormat};
