use crate::constants::*;
use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the LED server, without the `/color` path.
    pub server: String,
    pub timeout_secs: u64,
    pub picker: PickerConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: DEFAULT_SERVER.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            picker: PickerConfig::default(),
        }
    }
}

impl Config {
    pub fn load_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::load(&text).map_err(|source| Error::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn load(text: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PickerConfig {
    pub width: f32,
    pub height: f32,
    pub border_width: f32,
    pub border_color: String,
    pub anticlockwise: bool,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            width: GUI_PICKER_WIDTH,
            height: GUI_PICKER_HEIGHT,
            border_width: GUI_PICKER_BORDER_WIDTH,
            border_color: GUI_PICKER_BORDER_COLOR.to_string(),
            anticlockwise: true,
        }
    }
}

/// Parses `#rrggbb` or the short `#rgb` form.
pub fn parse_hex_color(s: &str) -> Result<[u8; 3]> {
    let invalid = || Error::InvalidHexColor(s.to_string());
    let hex = s.trim().strip_prefix('#').ok_or_else(invalid)?;
    if !hex.is_ascii() {
        return Err(invalid());
    }

    let digit = |i: usize, len: usize| u8::from_str_radix(&hex[i..i + len], 16).map_err(|_| invalid());
    match hex.len() {
        6 => Ok([digit(0, 2)?, digit(2, 2)?, digit(4, 2)?]),
        3 => Ok([digit(0, 1)? * 17, digit(1, 1)? * 17, digit(2, 1)? * 17]),
        _ => Err(invalid()),
    }
}
