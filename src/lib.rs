//! vrcmute library.
//!
//! Listens to VRChat's OSC output, extracts one boolean avatar
//! parameter, and drives a mute actuator with debounce + periodic
//! correction so message loss, duplication, reordering, and jitter
//! never translate into actuator chatter.
//!
//! The crate exposes the pure-logic modules for integration testing and
//! embedding; all I/O lives behind the port traits in [`app::ports`]
//! and the transport trait in [`transport`].

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod osc;
pub mod stabilizer;
pub mod transport;
