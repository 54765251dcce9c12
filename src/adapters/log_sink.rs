//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured bridge events to the
//! logger. Chatty events (per-observation, periodic re-asserts) drop to
//! debug level unless verbose mode is on, so a healthy bridge is quiet
//! at the default filter. A future status-endpoint adapter would
//! implement the same trait.

use log::{debug, info, warn};

use crate::app::events::BridgeEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`BridgeEvent`].
pub struct LogEventSink {
    verbose: bool,
}

impl LogEventSink {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    /// Follows the config `debug` flag across hot-reloads.
    pub fn set_verbose(&mut self, verbose: bool) {
        self.verbose = verbose;
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &BridgeEvent) {
        match event {
            BridgeEvent::Started { target } => {
                info!("START | watching {target}");
            }
            BridgeEvent::Observation { value } => {
                if self.verbose {
                    info!("PARAM | observed={value}");
                } else {
                    debug!("PARAM | observed={value}");
                }
            }
            BridgeEvent::MuteApplied { muted, forced } => {
                if *forced && !self.verbose {
                    debug!("MUTE  | applied={muted} (correction)");
                } else if *forced {
                    info!("MUTE  | applied={muted} (correction)");
                } else {
                    info!("MUTE  | applied={muted}");
                }
            }
            BridgeEvent::ActuatorFailed(e) => {
                warn!("MUTE  | actuator failed: {e}");
            }
            BridgeEvent::ConfigReloaded => {
                info!("CONF  | configuration reloaded");
            }
        }
    }
}
