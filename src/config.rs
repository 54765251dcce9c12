//! Bridge configuration parameters.
//!
//! All tunable parameters for the bridge. Loaded from a TOML file by
//! the driver and hot-swapped into the running service on change; the
//! core treats the active config as read-only.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Core bridge configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // --- Observation source ---
    /// Avatar parameter to watch (resolved under `/avatar/parameters/`).
    pub parameter: String,
    /// UDP listen address.
    pub listen_ip: IpAddr,
    /// UDP listen port.
    pub listen_port: u16,

    // --- Actuator ---
    /// Name of the actuator target, substituted for `{source}` in the
    /// command templates.
    pub source: String,
    /// Command to run when muting (whitespace-split argv).
    pub mute_command: String,
    /// Command to run when unmuting (whitespace-split argv).
    pub unmute_command: String,

    // --- Stabilization ---
    /// Invert the observed value before stabilizing.
    pub invert: bool,
    /// Debounce window (milliseconds, 0–2000).
    pub debounce_ms: u64,
    /// Correction interval (seconds, 1–30).
    pub correction_secs: u64,

    // --- Runtime ---
    /// Master switch; when off the service ignores input and ticks.
    pub enabled: bool,
    /// Log every accepted observation and forced re-assert.
    pub debug: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            parameter: "muteself".into(),
            listen_ip: IpAddr::V4(Ipv4Addr::LOCALHOST),
            listen_port: 9001,

            source: String::new(),
            mute_command: String::new(),
            unmute_command: String::new(),

            invert: false,
            debounce_ms: 200,
            correction_secs: 3,

            enabled: true,
            debug: false,
        }
    }
}

impl Config {
    /// Validate ranges before the config reaches the core. Invalid
    /// values are rejected, not clamped.
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.parameter.trim().is_empty() {
            return Err("parameter must not be empty");
        }
        if self.listen_port == 0 {
            return Err("listen_port must be 1–65535");
        }
        if self.debounce_ms > 2000 {
            return Err("debounce_ms must be 0–2000");
        }
        if !(1..=30).contains(&self.correction_secs) {
            return Err("correction_secs must be 1–30");
        }
        Ok(())
    }

    /// The full OSC address this bridge watches.
    pub fn target_address(&self) -> String {
        format!("/avatar/parameters/{}", self.parameter.trim())
    }

    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::new(self.listen_ip, self.listen_port)
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn correction(&self) -> Duration {
        Duration::from_secs(self.correction_secs)
    }

    /// Whether `other` needs a different actuator adapter.
    pub fn actuator_differs(&self, other: &Config) -> bool {
        self.source != other.source
            || self.mute_command != other.mute_command
            || self.unmute_command != other.unmute_command
    }
}
