//! Decoder settings from an optional TOML file plus command-line overrides.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use clap::ValueEnum;
use dxlshark_core::DecoderConfig;
use dxlshark_core::config::{ControllerHint, DisplayBase, Protocol1Family, Protocol2Family};
use serde::Deserialize;

/// Default bus speed for raw captures.
pub const DEFAULT_BAUD: u32 = 1_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputFormat {
    /// Logic-analyzer async-serial CSV export
    Csv,
    /// Raw bus bytes
    Raw,
}

/// Layout of `--config` files.
///
/// ```toml
/// [decoder]
/// display_base = "hex"
/// protocol1_family = "mx"
///
/// [capture]
/// format = "raw"
/// baud = 57600
/// ```
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub decoder: DecoderConfig,
    pub capture: CaptureConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CaptureConfig {
    pub format: Option<InputFormat>,
    pub baud: Option<u32>,
}

/// Flags that override file values when present.
#[derive(Debug, Default, Clone, Copy)]
pub struct Overrides {
    pub display_base: Option<DisplayBase>,
    pub protocol1_family: Option<Protocol1Family>,
    pub protocol2_family: Option<Protocol2Family>,
    pub controller: Option<ControllerHint>,
    pub register_pairs: Option<bool>,
}

pub fn load(path: Option<&Path>) -> Result<FileConfig> {
    let Some(path) = path else {
        return Ok(FileConfig::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    toml::from_str(&text).with_context(|| format!("Invalid config file: {}", path.display()))
}

pub fn apply(mut config: DecoderConfig, overrides: Overrides) -> DecoderConfig {
    if let Some(base) = overrides.display_base {
        config.display_base = base;
    }
    if let Some(family) = overrides.protocol1_family {
        config.protocol1_family = family;
    }
    if let Some(family) = overrides.protocol2_family {
        config.protocol2_family = family;
    }
    if let Some(controller) = overrides.controller {
        config.controller = controller;
    }
    if let Some(pairs) = overrides.register_pairs {
        config.register_pairs = pairs;
    }
    config
}

/// Parser for `yes`/`no` style flags.
pub fn parse_yes_no(value: &str) -> Result<bool, String> {
    match value.trim().to_ascii_lowercase().as_str() {
        "yes" | "y" | "true" | "on" | "1" => Ok(true),
        "no" | "n" | "false" | "off" | "0" => Ok(false),
        other => Err(format!("expected yes or no, got '{other}'")),
    }
}
