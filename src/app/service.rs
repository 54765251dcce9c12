//! Bridge service — the hexagonal core.
//!
//! [`BridgeService`] owns the observation filter, the stabilizer, and
//! the active configuration. It exposes a clean, I/O-agnostic API; all
//! sockets and processes stay behind port traits injected at call
//! sites, making the entire service testable with mock adapters.
//!
//! ```text
//!  DatagramTransport ──▶ ┌──────────────────────────┐ ──▶ EventSink
//!                        │      BridgeService        │
//!            MutePort ◀──│  Codec · Filter · Stabilizer
//!                        └──────────────────────────┘
//! ```

use std::time::Instant;

use log::warn;

use crate::config::Config;
use crate::osc::{ObservationFilter, decode_packet};
use crate::stabilizer::Stabilizer;
use crate::transport::{DatagramTransport, MAX_DATAGRAM};

use super::events::BridgeEvent;
use super::ports::{EventSink, MutePort};

/// The bridge service orchestrates decode → filter → stabilize.
pub struct BridgeService {
    config: Config,
    filter: ObservationFilter,
    stabilizer: Stabilizer,
    /// Reusable receive buffer, sized for the largest UDP payload.
    recv_buf: Vec<u8>,
}

impl BridgeService {
    /// Construct the service from a validated configuration.
    pub fn new(config: Config) -> Self {
        let filter = ObservationFilter::new(&config.target_address(), config.invert);
        let stabilizer = Stabilizer::new(config.debounce(), config.correction());
        Self {
            config,
            filter,
            stabilizer,
            recv_buf: vec![0u8; MAX_DATAGRAM],
        }
    }

    /// Announce startup through the sink.
    pub fn start(&self, sink: &mut impl EventSink) {
        sink.emit(&BridgeEvent::Started {
            target: self.filter.target().to_owned(),
        });
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Drain every pending datagram, decoding and filtering each into
    /// zero-or-more `observe()` calls. A receive error ends the drain
    /// for this tick; the next tick tries again.
    pub fn pump(
        &mut self,
        transport: &mut impl DatagramTransport,
        now: Instant,
        sink: &mut impl EventSink,
    ) {
        if !self.config.enabled {
            return;
        }
        loop {
            match transport.recv(&mut self.recv_buf) {
                Ok(0) => break,
                Ok(n) => {
                    for msg in decode_packet(&self.recv_buf[..n]) {
                        if let Some(obs) = self.filter.observe(&msg, now) {
                            sink.emit(&BridgeEvent::Observation { value: obs.value });
                            self.stabilizer.observe(obs);
                        }
                    }
                }
                Err(e) => {
                    warn!("transport receive failed: {e:?}");
                    break;
                }
            }
        }
    }

    /// Advance the stabilizer by one tick. Call exactly once per driver
    /// loop iteration, after [`pump`](Self::pump), with the same `now`.
    pub fn tick(
        &mut self,
        now: Instant,
        actuator: &mut impl MutePort,
        sink: &mut impl EventSink,
    ) {
        if !self.config.enabled {
            return;
        }
        self.stabilizer.tick(now, actuator, sink);
    }

    // ── Configuration ─────────────────────────────────────────

    /// Atomically swap in a new configuration. The filter target and
    /// stabilizer timing follow immediately; stabilizer state survives,
    /// so a reload never re-triggers or drops an in-flight commit.
    pub fn replace_config(&mut self, config: Config, sink: &mut impl EventSink) {
        self.filter = ObservationFilter::new(&config.target_address(), config.invert);
        self.stabilizer
            .set_timing(config.debounce(), config.correction());
        self.config = config;
        sink.emit(&BridgeEvent::ConfigReloaded);
    }

    /// The active configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    // ── Queries ───────────────────────────────────────────────

    /// Last value committed to the actuator via the debounce path.
    pub fn last_committed(&self) -> Option<bool> {
        self.stabilizer.last_committed()
    }
}
