//! Mock adapters and wire-format builders for integration tests.
//!
//! Records every actuator call and every emitted event so tests can
//! assert on the full history without a socket or a subprocess.

use std::collections::VecDeque;

use vrcmute::app::events::BridgeEvent;
use vrcmute::app::ports::{ActuatorError, EventSink, MutePort};
use vrcmute::transport::DatagramTransport;

// ── Actuator mock ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MuteCall {
    pub muted: bool,
    pub forced: bool,
}

pub struct MockMute {
    pub calls: Vec<MuteCall>,
    pub fail_with: Option<ActuatorError>,
}

#[allow(dead_code)]
impl MockMute {
    pub fn new() -> Self {
        Self {
            calls: Vec::new(),
            fail_with: None,
        }
    }

    pub fn last_call(&self) -> Option<&MuteCall> {
        self.calls.last()
    }
}

impl MutePort for MockMute {
    fn apply(&mut self, muted: bool, force: bool) -> Result<(), ActuatorError> {
        self.calls.push(MuteCall {
            muted,
            forced: force,
        });
        match self.fail_with {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

// ── Event sink mock ───────────────────────────────────────────

pub struct RecordingSink {
    pub events: Vec<BridgeEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn applied(&self) -> Vec<(bool, bool)> {
        self.events
            .iter()
            .filter_map(|e| match e {
                BridgeEvent::MuteApplied { muted, forced } => Some((*muted, *forced)),
                _ => None,
            })
            .collect()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &BridgeEvent) {
        self.events.push(event.clone());
    }
}

// ── Transport mock ────────────────────────────────────────────

/// Scripted datagram source: hands out queued packets, then reports
/// "nothing pending".
pub struct ScriptedTransport {
    pub queue: VecDeque<Vec<u8>>,
    pub fail_next: bool,
}

#[allow(dead_code)]
impl ScriptedTransport {
    pub fn new() -> Self {
        Self {
            queue: VecDeque::new(),
            fail_next: false,
        }
    }

    pub fn push(&mut self, packet: Vec<u8>) {
        self.queue.push_back(packet);
    }
}

impl DatagramTransport for ScriptedTransport {
    type Error = &'static str;

    fn recv(&mut self, buf: &mut [u8]) -> Result<usize, &'static str> {
        if self.fail_next {
            self.fail_next = false;
            return Err("scripted receive failure");
        }
        match self.queue.pop_front() {
            Some(packet) => {
                let n = packet.len().min(buf.len());
                buf[..n].copy_from_slice(&packet[..n]);
                Ok(n)
            }
            None => Ok(0),
        }
    }
}

// ── Wire-format builders ──────────────────────────────────────

#[allow(dead_code)]
pub fn osc_str(s: &str) -> Vec<u8> {
    let mut v = s.as_bytes().to_vec();
    v.push(0);
    while v.len() % 4 != 0 {
        v.push(0);
    }
    v
}

/// Encode one message with a boolean-literal argument.
#[allow(dead_code)]
pub fn bool_message(address: &str, value: bool) -> Vec<u8> {
    let mut v = osc_str(address);
    v.extend(osc_str(if value { ",T" } else { ",F" }));
    v
}

/// Wrap elements in a bundle with an opaque time tag.
#[allow(dead_code)]
pub fn bundle(elements: &[Vec<u8>]) -> Vec<u8> {
    let mut v = b"#bundle\0".to_vec();
    v.extend_from_slice(&[0u8; 8]);
    for e in elements {
        v.extend_from_slice(&(e.len() as i32).to_be_bytes());
        v.extend_from_slice(e);
    }
    v
}
