//! Port traits — the hexagonal boundary between the bridge core and the
//! outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ BridgeService (domain)
//! ```
//!
//! Driven adapters (the mute actuator, event sinks) implement these
//! traits. The core consumes them via generics, so the stabilizer never
//! touches a process, socket, or logger directly.

use super::events::BridgeEvent;

// ───────────────────────────────────────────────────────────────
// Mute port (driven adapter: domain → actuator)
// ───────────────────────────────────────────────────────────────

/// Write-side port: the stabilizer calls this to set the actuator state.
///
/// Non-forced calls are expected to short-circuit when the adapter's
/// last-applied value already equals `muted` — idempotency lives on the
/// actuator side, not in the stabilizer. Forced calls (the periodic
/// correction path) must always attempt the apply.
pub trait MutePort {
    fn apply(&mut self, muted: bool, force: bool) -> Result<(), ActuatorError>;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The core emits structured [`BridgeEvent`]s through this port.
/// Adapters decide where they go (log output, a future status socket).
pub trait EventSink {
    fn emit(&mut self, event: &BridgeEvent);
}

// ───────────────────────────────────────────────────────────────
// Error types
// ───────────────────────────────────────────────────────────────

/// Errors from [`MutePort`] operations.
///
/// Every variant is handled identically by the core: emit an event, log,
/// continue. A failing actuator never stalls the state machine; the
/// periodic correction path retries it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActuatorError {
    /// No actuator command is configured.
    NotConfigured,
    /// The actuator target could not be resolved (program not found).
    TargetNotFound,
    /// The actuator process could not be started.
    SpawnFailed,
    /// The actuator ran but reported failure (non-zero exit).
    CommandFailed,
}

impl core::fmt::Display for ActuatorError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NotConfigured => write!(f, "no actuator command configured"),
            Self::TargetNotFound => write!(f, "actuator target not found"),
            Self::SpawnFailed => write!(f, "actuator spawn failed"),
            Self::CommandFailed => write!(f, "actuator command failed"),
        }
    }
}
