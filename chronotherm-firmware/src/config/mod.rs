//! Configuration loading
//!
//! The sign's configuration is a TOML file embedded at compile time. If it
//! somehow fails to parse at runtime (build.rs validates it on the host, so
//! this means the parser and the validator disagree), the firmware falls
//! back to built-in defaults rather than refusing to boot - a sign with an
//! empty SSID still shows the clock at 00:00.

pub mod toml;

use defmt::*;

use chronotherm_core::config::SignConfig;

/// Embedded configuration (compiled into firmware).
/// Edit chronotherm.toml and rebuild to customize.
const EMBEDDED_CONFIG: &str = include_str!("../../chronotherm.toml");

/// Parse the embedded configuration, falling back to defaults
pub fn load_config() -> SignConfig {
    match toml::parse_config(EMBEDDED_CONFIG) {
        Ok(config) => {
            info!("Parsed embedded configuration");
            config
        }
        Err(e) => {
            error!("Failed to parse embedded config: {:?}", e);
            error!("Using built-in default configuration");
            SignConfig::default()
        }
    }
}
