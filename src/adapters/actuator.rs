//! Command-driven mute actuator.
//!
//! Implements [`MutePort`] by running a host-configured command line
//! per state change, e.g.
//!
//! ```toml
//! source = "@DEFAULT_SOURCE@"
//! mute_command   = "pactl set-source-mute {source} 1"
//! unmute_command = "pactl set-source-mute {source} 0"
//! ```
//!
//! `{source}` is substituted with the configured target name. Program
//! resolution failure is the "target not found" case: logged by the
//! caller, never fatal — the correction path retries on its own
//! schedule. The last-applied cache implements the non-forced
//! short-circuit required by the port contract; a failed apply does not
//! update it, so the next non-forced call retries.

use std::process::Command;

use log::debug;

use crate::app::ports::{ActuatorError, MutePort};
use crate::config::Config;

/// Actuator adapter that shells out to the host's mute command.
pub struct CommandMute {
    mute_argv: Vec<String>,
    unmute_argv: Vec<String>,
    /// Last successfully applied state (non-forced short-circuit).
    last_applied: Option<bool>,
}

impl CommandMute {
    /// Build from configuration. Empty command templates leave the
    /// adapter unconfigured; applies then fail with
    /// [`ActuatorError::NotConfigured`] until a reload fixes it.
    pub fn from_config(config: &Config) -> Self {
        Self {
            mute_argv: build_argv(&config.mute_command, &config.source),
            unmute_argv: build_argv(&config.unmute_command, &config.source),
            last_applied: None,
        }
    }

    pub fn is_configured(&self) -> bool {
        !self.mute_argv.is_empty() && !self.unmute_argv.is_empty()
    }
}

impl MutePort for CommandMute {
    fn apply(&mut self, muted: bool, force: bool) -> Result<(), ActuatorError> {
        if !force && self.last_applied == Some(muted) {
            return Ok(());
        }

        let argv = if muted { &self.mute_argv } else { &self.unmute_argv };
        let Some((program, args)) = argv.split_first() else {
            return Err(ActuatorError::NotConfigured);
        };

        let status = Command::new(program).args(args).status().map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ActuatorError::TargetNotFound
            } else {
                ActuatorError::SpawnFailed
            }
        })?;

        if !status.success() {
            return Err(ActuatorError::CommandFailed);
        }

        debug!("actuator set muted={muted} (forced={force})");
        self.last_applied = Some(muted);
        Ok(())
    }
}

/// Whitespace-split the template, substituting `{source}` per token so
/// a target name containing spaces stays one argument.
fn build_argv(template: &str, source: &str) -> Vec<String> {
    template
        .split_whitespace()
        .map(|tok| tok.replace("{source}", source))
        .collect()
}
