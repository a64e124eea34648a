//! Session configuration.
//!
//! A `DecoderConfig` is built once by the host and handed to the decoder,
//! which only ever reads it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown servo family: {name}")]
    UnknownFamily { name: String },
    #[error("servo family {name} is not available for protocol {protocol}")]
    UnsupportedFamily { protocol: u8, name: String },
    #[error("unknown display base: {name}")]
    UnknownDisplayBase { name: String },
    #[error("unknown controller hint: {name}")]
    UnknownControllerHint { name: String },
}

/// Numeric base for every rendered scalar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayBase {
    /// Decimal.
    #[default]
    Auto,
    Dec,
    Hex,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Protocol1Family {
    #[default]
    Ax,
    Mx,
    Xl320,
    X,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Protocol2Family {
    #[default]
    X,
    Mx,
    Xl320,
}

/// What kind of device sits on the bus besides the servos.
///
/// Only affects which register table is consulted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControllerHint {
    #[default]
    Unknown,
    /// A controller board answering on its factory ID (200).
    ReservedId,
    /// Every Protocol 1 frame targets a controller board.
    ControllerBoard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DecoderConfig {
    pub display_base: DisplayBase,
    pub protocol1_family: Protocol1Family,
    pub protocol2_family: Protocol2Family,
    pub controller: ControllerHint,
    /// Render multi-byte registers as one value instead of raw bytes.
    pub register_pairs: bool,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            display_base: DisplayBase::default(),
            protocol1_family: Protocol1Family::default(),
            protocol2_family: Protocol2Family::default(),
            controller: ControllerHint::default(),
            register_pairs: true,
        }
    }
}

fn normalize(name: &str) -> String {
    name.trim()
        .chars()
        .filter(|c| *c != '-' && *c != '_' && *c != ' ')
        .flat_map(char::to_lowercase)
        .collect()
}

impl FromStr for DisplayBase {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "auto" => Ok(DisplayBase::Auto),
            "dec" | "decimal" => Ok(DisplayBase::Dec),
            "hex" | "hexadecimal" => Ok(DisplayBase::Hex),
            _ => Err(ConfigError::UnknownDisplayBase { name: s.to_string() }),
        }
    }
}

impl FromStr for Protocol1Family {
    type Err = ConfigError;

    /// # Examples
    /// ```
    /// use dxlshark_core::config::Protocol1Family;
    ///
    /// assert_eq!("XL-320".parse::<Protocol1Family>().unwrap(), Protocol1Family::Xl320);
    /// assert!("foo".parse::<Protocol1Family>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "ax" | "axseries" => Ok(Protocol1Family::Ax),
            "mx" | "mxseries" => Ok(Protocol1Family::Mx),
            "xl320" | "xl" | "xlseries" => Ok(Protocol1Family::Xl320),
            "x" | "xseries" => Ok(Protocol1Family::X),
            _ => Err(ConfigError::UnknownFamily { name: s.to_string() }),
        }
    }
}

impl FromStr for Protocol2Family {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "x" | "xseries" => Ok(Protocol2Family::X),
            "mx" | "mxseries" => Ok(Protocol2Family::Mx),
            "xl320" | "xl" | "xlseries" => Ok(Protocol2Family::Xl320),
            "ax" | "axseries" => Err(ConfigError::UnsupportedFamily {
                protocol: 2,
                name: s.to_string(),
            }),
            _ => Err(ConfigError::UnknownFamily { name: s.to_string() }),
        }
    }
}

impl FromStr for ControllerHint {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "unknown" | "none" => Ok(ControllerHint::Unknown),
            "reservedid" | "reserved" => Ok(ControllerHint::ReservedId),
            "controllerboard" | "controller" | "board" | "cm730" => {
                Ok(ControllerHint::ControllerBoard)
            }
            _ => Err(ConfigError::UnknownControllerHint { name: s.to_string() }),
        }
    }
}

impl fmt::Display for Protocol1Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Protocol1Family::Ax => "AX",
            Protocol1Family::Mx => "MX",
            Protocol1Family::Xl320 => "XL-320",
            Protocol1Family::X => "X",
        };
        f.write_str(name)
    }
}

impl fmt::Display for Protocol2Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Protocol2Family::X => "X",
            Protocol2Family::Mx => "MX",
            Protocol2Family::Xl320 => "XL-320",
        };
        f.write_str(name)
    }
}
