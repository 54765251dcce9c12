//! OSC wire-format subsystem.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────┐
//! │                    OSC Stack                           │
//! │                                                        │
//! │  ┌──────────┐   ┌───────────────┐   ┌──────────────┐  │
//! │  │ Datagram │──▶│    Codec      │──▶│    Filter    │  │
//! │  │ (bytes)  │   │ (msg/bundle)  │   │ (observation)│  │
//! │  └──────────┘   └───────────────┘   └──────────────┘  │
//! └────────────────────────────────────────────────────────┘
//! ```
//!
//! The codec is pure and total: any byte buffer decodes to zero or more
//! messages, never an error. The filter turns matching messages into
//! boolean observations for the stabilizer.

pub mod codec;
pub mod filter;

pub use codec::{OscMessage, OscValue, decode_packet};
pub use filter::ObservationFilter;
