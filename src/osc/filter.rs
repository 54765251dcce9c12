//! Observation filter — matching messages become boolean observations.
//!
//! Sits between the codec and the stabilizer: compares each decoded
//! address against the configured target (case-insensitively), coerces
//! the first argument to a boolean, and applies the inversion policy.
//! Everything else decodes to "no observation".

use std::time::Instant;

use crate::stabilizer::Observation;

use super::codec::{OscMessage, OscValue};

/// String forms accepted as "true" (trimmed, case-insensitive).
const TRUTHY: [&str; 5] = ["1", "true", "t", "yes", "on"];

/// Stateless mapper from decoded messages to observations.
#[derive(Debug, Clone)]
pub struct ObservationFilter {
    target: String,
    invert: bool,
}

impl ObservationFilter {
    pub fn new(target_address: &str, invert: bool) -> Self {
        Self {
            target: target_address.to_owned(),
            invert,
        }
    }

    /// The address this filter matches against.
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Map a decoded message to an observation, or `None` when the
    /// address does not match the target. A matching message with no
    /// arguments reads as `false`.
    pub fn observe(&self, msg: &OscMessage, now: Instant) -> Option<Observation> {
        if !msg.address.eq_ignore_ascii_case(&self.target) {
            return None;
        }
        let raw = msg.args.first().map_or(false, coerce_bool);
        let value = if self.invert { !raw } else { raw };
        Some(Observation {
            value,
            observed_at: now,
        })
    }
}

/// Boolean coercion across argument types: booleans pass through,
/// numerics are nonzero-tested, strings match a truthy set, anything
/// else reads as `false`.
fn coerce_bool(v: &OscValue) -> bool {
    match v {
        OscValue::Bool(b) => *b,
        OscValue::Int(i) => *i != 0,
        OscValue::Float(f) => *f != 0.0,
        OscValue::Str(s) => {
            let s = s.trim();
            TRUTHY.iter().any(|t| s.eq_ignore_ascii_case(t))
        }
        OscValue::Blob(_) => false,
    }
}
