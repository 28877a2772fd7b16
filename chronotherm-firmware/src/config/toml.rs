//! Simple TOML parser for the sign configuration
//!
//! This is a minimal TOML parser that handles only the subset needed for
//! Chronotherm configuration. It does NOT support the full TOML spec.
//!
//! Supported features:
//! - Key = value pairs (string, integer)
//! - [section] headers
//! - Comments (# ...)
//!
//! NOT supported:
//! - Arrays, inline tables, multi-line strings, datetimes

use heapless::String;

use chronotherm_core::config::SignConfig;

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Unrecognized section header
    InvalidSection,
    /// Value has the wrong type or shape for its key
    InvalidValue,
    /// String value exceeds its heapless capacity
    ValueTooLong,
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Network,
    Time,
    Panel,
    Server,
}

/// Parse TOML configuration into a [`SignConfig`]
///
/// Unknown keys inside known sections are ignored so the config file can
/// grow without lock-stepping firmware updates.
pub fn parse_config(input: &str) -> Result<SignConfig, ParseError> {
    let mut config = SignConfig::default();
    let mut section = Section::Root;

    for line in input.lines() {
        let line = line.trim();

        // Skip empty lines and comments
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        // Section header
        if let Some(name) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
            section = match name.trim() {
                "network" => Section::Network,
                "time" => Section::Time,
                "panel" => Section::Panel,
                "server" => Section::Server,
                _ => return Err(ParseError::InvalidSection),
            };
            continue;
        }

        // Key = value
        let Some((key, value)) = line.split_once('=') else {
            return Err(ParseError::InvalidValue);
        };
        let (key, value) = (key.trim(), strip_comment(value).trim());

        match (section, key) {
            (Section::Network, "ssid") => config.network.ssid = parse_string(value)?,
            (Section::Network, "password") => config.network.password = parse_string(value)?,
            (Section::Time, "server") => config.time.server = parse_string(value)?,
            (Section::Time, "utc_offset_s") => config.time.utc_offset_s = parse_int(value)?,
            (Section::Time, "sync_interval_s") => {
                config.time.sync_interval_s = parse_int(value)?
            }
            (Section::Panel, "width") => config.panel.width = parse_int(value)?,
            (Section::Panel, "height") => config.panel.height = parse_int(value)?,
            (Section::Server, "port") => config.server.port = parse_int(value)?,
            (Section::Root, "tick_interval_ms") => {
                config.tick_interval_ms = parse_int(value)?
            }
            _ => {}
        }
    }

    Ok(config)
}

/// Drop a trailing `# comment` from an unquoted value. A `#` inside a
/// quoted string stays.
fn strip_comment(value: &str) -> &str {
    let trimmed = value.trim();
    if trimmed.starts_with('"') {
        return trimmed;
    }
    match trimmed.find('#') {
        Some(idx) => &trimmed[..idx],
        None => trimmed,
    }
}

fn parse_string<const N: usize>(value: &str) -> Result<String<N>, ParseError> {
    let inner = value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .ok_or(ParseError::InvalidValue)?;
    let mut out = String::new();
    out.push_str(inner).map_err(|_| ParseError::ValueTooLong)?;
    Ok(out)
}

fn parse_int<T: TryFrom<i64>>(value: &str) -> Result<T, ParseError> {
    let parsed: i64 = value.parse().map_err(|_| ParseError::InvalidValue)?;
    T::try_from(parsed).map_err(|_| ParseError::InvalidValue)
}
