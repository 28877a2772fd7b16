//! Configuration type definitions
//!
//! Board-agnostic configuration for the sign. Everything here is a static
//! startup constant: the firmware reads it once from the embedded TOML at
//! boot and never changes it afterwards.

use heapless::String;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Maximum Wi-Fi SSID length (802.11 limit)
pub const MAX_SSID_LEN: usize = 32;

/// Maximum Wi-Fi passphrase length (WPA2 limit)
pub const MAX_PASSWORD_LEN: usize = 64;

/// Maximum NTP server hostname length
pub const MAX_HOSTNAME_LEN: usize = 48;

/// Wi-Fi credentials
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NetworkConfig {
    /// Access point to join
    pub ssid: String<MAX_SSID_LEN>,
    /// WPA2 passphrase
    pub password: String<MAX_PASSWORD_LEN>,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            ssid: String::new(),
            password: String::new(),
        }
    }
}

/// Time authority and local-time settings
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TimeConfig {
    /// NTP server hostname
    pub server: String<MAX_HOSTNAME_LEN>,
    /// Fixed offset from UTC in seconds (e.g. -18000 for UTC-5)
    pub utc_offset_s: i32,
    /// How often the time client re-contacts the authority
    pub sync_interval_s: u32,
}

impl Default for TimeConfig {
    fn default() -> Self {
        let mut server = String::new();
        let _ = server.push_str("pool.ntp.org");
        Self {
            server,
            utc_offset_s: -5 * 3600,
            sync_interval_s: 60,
        }
    }
}

/// Matrix panel dimensions in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PanelConfig {
    pub width: u16,
    pub height: u16,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            width: 32,
            height: 16,
        }
    }
}

/// HTTP listener settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ServerConfig {
    /// TCP port to accept screen requests on
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { port: 80 }
    }
}

/// Complete sign configuration
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SignConfig {
    pub network: NetworkConfig,
    pub time: TimeConfig,
    pub panel: PanelConfig,
    pub server: ServerConfig,
    /// Controller tick spacing in milliseconds
    pub tick_interval_ms: u32,
}

impl SignConfig {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Default for SignConfig {
    fn default() -> Self {
        Self {
            network: NetworkConfig::default(),
            time: TimeConfig::default(),
            panel: PanelConfig::default(),
            server: ServerConfig::default(),
            tick_interval_ms: 1000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_mirror_the_sign() {
        let config = SignConfig::new();
        assert_eq!(config.server.port, 80);
        assert_eq!(config.time.server.as_str(), "pool.ntp.org");
        assert_eq!(config.time.utc_offset_s, -18000);
        assert_eq!(config.time.sync_interval_s, 60);
        assert_eq!((config.panel.width, config.panel.height), (32, 16));
        assert_eq!(config.tick_interval_ms, 1000);
    }
}
