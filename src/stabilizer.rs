//! Debounce + correction stabilizer.
//!
//! Turns a noisy stream of boolean observations (lossy, duplicated,
//! reordered transport) into a small number of confident actuator
//! transitions. Two independent mechanisms run off the same clock:
//!
//! | Path       | Trigger                                  | Apply    |
//! |------------|------------------------------------------|----------|
//! | Debounce   | input quiet for the debounce window      | normal   |
//! | Correction | correction interval elapsed since last   | forced   |
//!
//! The debounce path is last-write-wins: a rapid burst of flips
//! collapses to a single actuator call reflecting the final value once
//! the input has been quiet for the window. The correction path
//! periodically re-asserts the last known value with `force = true`,
//! so a silently drifted actuator (external change, missed apply) is
//! pulled back within one interval.
//!
//! Both checks read the same `now`, taken once at tick start; both may
//! fire on the same tick.

use std::time::{Duration, Instant};

use log::warn;

use crate::app::events::BridgeEvent;
use crate::app::ports::{EventSink, MutePort};

/// A single timestamped boolean reading derived from a matching
/// message. Ephemeral; superseded by the next observation.
#[derive(Debug, Clone, Copy)]
pub struct Observation {
    pub value: bool,
    pub observed_at: Instant,
}

/// The one long-lived mutable entity of the bridge.
///
/// Owned exclusively by its caller; mutated only through [`observe`]
/// and [`tick`]; never persisted.
///
/// [`observe`]: Stabilizer::observe
/// [`tick`]: Stabilizer::tick
pub struct Stabilizer {
    debounce: Duration,
    correction: Duration,
    /// Most recent observation not yet committed.
    pending: Option<Observation>,
    /// Last value applied via the debounce path. Advances even when the
    /// actuator call fails — the correction path retries, not us.
    last_committed: Option<bool>,
    /// Most recent observation value regardless of commit.
    last_known: Option<bool>,
    /// When the correction last fired. Armed on the first tick so the
    /// first correction comes one full interval after startup.
    last_correction_at: Option<Instant>,
}

impl Stabilizer {
    pub fn new(debounce: Duration, correction: Duration) -> Self {
        Self {
            debounce,
            correction,
            pending: None,
            last_committed: None,
            last_known: None,
            last_correction_at: None,
        }
    }

    /// Replace the timing parameters (config hot-reload). Pending and
    /// committed state survive the swap.
    pub fn set_timing(&mut self, debounce: Duration, correction: Duration) {
        self.debounce = debounce;
        self.correction = correction;
    }

    /// Record an observation. Unconditionally overwrites any pending
    /// value — only the latest observation in a debounce window
    /// survives (last-write-wins, not majority vote). Never fails.
    pub fn observe(&mut self, obs: Observation) {
        self.pending = Some(obs);
        self.last_known = Some(obs.value);
    }

    /// Advance both paths by one tick. Never fails; actuator errors are
    /// reported through the sink and otherwise ignored.
    pub fn tick(
        &mut self,
        now: Instant,
        actuator: &mut impl MutePort,
        sink: &mut impl EventSink,
    ) {
        // Debounce commit: the pending value is applied once the input
        // has been quiet for the full window.
        if let Some(obs) = self.pending {
            if now.duration_since(obs.observed_at) >= self.debounce {
                self.pending = None;
                self.apply(obs.value, false, actuator, sink);
                self.last_committed = Some(obs.value);
            }
        }

        // Periodic correction: independent of the debounce path, and
        // not skipped merely because a commit just happened.
        match self.last_correction_at {
            None => self.last_correction_at = Some(now),
            Some(at) if now.duration_since(at) >= self.correction => {
                if let Some(value) = self.last_known {
                    self.apply(value, true, actuator, sink);
                    self.last_correction_at = Some(now);
                }
            }
            Some(_) => {}
        }
    }

    /// Last value committed via the debounce path.
    pub fn last_committed(&self) -> Option<bool> {
        self.last_committed
    }

    /// Most recent observation value, committed or not.
    pub fn last_known(&self) -> Option<bool> {
        self.last_known
    }

    fn apply(
        &mut self,
        muted: bool,
        forced: bool,
        actuator: &mut impl MutePort,
        sink: &mut impl EventSink,
    ) {
        match actuator.apply(muted, forced) {
            Ok(()) => sink.emit(&BridgeEvent::MuteApplied { muted, forced }),
            Err(e) => {
                warn!("actuator apply (muted={muted}, forced={forced}) failed: {e}");
                sink.emit(&BridgeEvent::ActuatorFailed(e));
            }
        }
    }
}
