//! Outbound application events.
//!
//! The [`BridgeService`](super::service::BridgeService) and the
//! stabilizer emit these through the [`EventSink`](super::ports::EventSink)
//! port. Adapters on the other side decide what to do with them —
//! today that means the log; a status endpoint would implement the
//! same trait.

use super::ports::ActuatorError;

/// Structured events emitted by the bridge core.
#[derive(Debug, Clone)]
pub enum BridgeEvent {
    /// The bridge has started (carries the watched OSC address).
    Started { target: String },

    /// A matching observation was accepted into the stabilizer.
    Observation { value: bool },

    /// The actuator was commanded. `forced` marks the periodic
    /// correction path; non-forced applies come from debounce commits.
    MuteApplied { muted: bool, forced: bool },

    /// The actuator reported a failure; the core continues regardless.
    ActuatorFailed(ActuatorError),

    /// A new configuration was hot-swapped into the running service.
    ConfigReloaded,
}
