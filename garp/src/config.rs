//! Settings for the `garp` binary: a JSON file, overridden field by field from the command line.

use std::convert::TryFrom;
use std::fs;
use std::net::IpAddr;
use std::path::Path;

use anyhow::{anyhow, Context, Error};
use garp_packets::MacAddr;
use serde::Deserialize;

/// Where the binary looks for its settings when `--config` isn't given.
pub const DEFAULT_CONFIG_PATH: &str = "config.json";

/// Settings as written by the user, nothing checked yet.
#[derive(Debug, Eq, PartialEq, Clone, Deserialize, Default)]
#[serde(deny_unknown_fields)] // To prevent typos.
pub struct RawConfig {
    pub ip: Option<String>,
    pub mac: Option<String>,
    pub interface: Option<String>,
}

impl RawConfig {
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let buffer = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        serde_json::from_str(&buffer)
            .with_context(|| format!("failed to parse config file {}", path.display()))
    }

    /// Fields set in `overrides` win.
    pub fn merge(self, overrides: RawConfig) -> RawConfig {
        RawConfig {
            ip: overrides.ip.or(self.ip),
            mac: overrides.mac.or(self.mac),
            interface: overrides.interface.or(self.interface),
        }
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Config {
    pub interface: String,
    pub ip: IpAddr,
    /// `None` means use the interface's own address.
    pub mac: Option<MacAddr>,
}

impl TryFrom<RawConfig> for Config {
    type Error = Error;

    fn try_from(raw: RawConfig) -> Result<Self, Self::Error> {
        let interface = match raw.interface {
            Some(interface) if !interface.is_empty() => interface,
            _ => return Err(anyhow!("`interface` is required")),
        };
        let ip = raw
            .ip
            .ok_or_else(|| anyhow!("`ip` is required"))?
            .parse::<IpAddr>()
            .context("`ip` is not an IP address")?;
        let mac = match raw.mac {
            Some(mac) => Some(
                mac.parse::<MacAddr>()
                    .with_context(|| format!("`mac` {:?} is not a MAC address", mac))?,
            ),
            None => None,
        };
        Ok(Config { interface, ip, mac })
    }
}
