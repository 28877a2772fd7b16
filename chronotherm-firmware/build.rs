//! Build script for chronotherm-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates chronotherm.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate chronotherm.toml configuration at compile time
///
/// The firmware falls back to built-in defaults if the embedded TOML fails
/// to parse at runtime, but an empty SSID means a sign that never comes up
/// on the network. Catch that on the host instead of in the field.
fn validate_config() {
    println!("cargo:rerun-if-changed=chronotherm.toml");

    let config_path = Path::new("chronotherm.toml");
    if !config_path.exists() {
        panic!("chronotherm.toml not found; the firmware embeds it at compile time");
    }

    let config_content =
        fs::read_to_string(config_path).expect("failed to read chronotherm.toml");

    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => panic!("invalid TOML syntax in chronotherm.toml: {e}"),
    };

    let mut errors = Vec::new();

    match config.get("network") {
        Some(toml::Value::Table(network)) => {
            match network.get("ssid") {
                Some(toml::Value::String(ssid)) if !ssid.is_empty() => {}
                Some(toml::Value::String(_)) => {
                    errors.push("[network] ssid must not be empty".to_string())
                }
                _ => errors.push("[network] missing 'ssid'".to_string()),
            }
            if !matches!(network.get("password"), Some(toml::Value::String(_))) {
                errors.push("[network] missing 'password'".to_string());
            }
        }
        _ => errors.push("missing [network] section".to_string()),
    }

    if let Some(toml::Value::Table(time)) = config.get("time") {
        if let Some(toml::Value::Integer(interval)) = time.get("sync_interval_s") {
            if *interval <= 0 {
                errors.push("[time] sync_interval_s must be positive".to_string());
            }
        }
    }

    if let Some(toml::Value::Integer(tick)) = config.get("tick_interval_ms") {
        if *tick <= 0 {
            errors.push("tick_interval_ms must be positive".to_string());
        }
    }

    if !errors.is_empty() {
        panic!(
            "invalid chronotherm.toml:\n{}",
            errors
                .iter()
                .map(|e| format!("  - {e}"))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }
}
