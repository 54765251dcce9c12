//! OSC packet decoder.
//!
//! Wire format (per message):
//! ```text
//! ┌──────────────┬──────────────┬──────────────────────────┐
//! │ Address (str)│ Tags (",…")  │ Arguments (per tag char) │
//! │ NUL + pad4   │ NUL + pad4   │ 4-byte aligned           │
//! └──────────────┴──────────────┴──────────────────────────┘
//! ```
//!
//! A packet starting with `#bundle\0` is a container: an 8-byte time
//! tag followed by length-prefixed elements, each of which is itself a
//! message or a nested bundle.
//!
//! Decoding is total. Malformed, truncated, or hostile input yields
//! fewer messages — never a panic, never an error to the caller. The
//! transport is lossy anyway; a bad datagram is just another lost one.

/// Marker that introduces a bundle, including its terminating NUL.
const BUNDLE_MARKER: &[u8; 8] = b"#bundle\0";

/// Bundle header size: marker (8) + opaque time tag (8).
const BUNDLE_HEADER: usize = 16;

/// A single decoded OSC argument.
#[derive(Debug, Clone, PartialEq)]
pub enum OscValue {
    /// `i` — 32-bit big-endian signed integer.
    Int(i32),
    /// `f` — 32-bit big-endian IEEE-754 float.
    Float(f32),
    /// `T` / `F` — boolean literal, zero payload bytes.
    Bool(bool),
    /// `s` — NUL-terminated, 4-byte-padded UTF-8 string.
    Str(String),
    /// `b` — length-prefixed opaque bytes, 4-byte-padded.
    Blob(Vec<u8>),
}

/// One decoded message: an address pattern plus its typed arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct OscMessage {
    pub address: String,
    pub args: Vec<OscValue>,
}

/// Decode one datagram into zero or more messages, in encounter order.
///
/// Bundles recurse; a malformed element yields nothing for that element
/// without affecting its siblings.
pub fn decode_packet(packet: &[u8]) -> Vec<OscMessage> {
    let mut out = Vec::new();
    decode_into(packet, &mut out);
    out
}

fn decode_into(packet: &[u8], out: &mut Vec<OscMessage>) {
    if packet.starts_with(BUNDLE_MARKER) {
        let mut idx = BUNDLE_HEADER;
        // Stop when fewer than 4 bytes remain for a length prefix.
        while idx + 4 <= packet.len() {
            let len = read_len(packet, idx);
            idx += 4;
            // Clamp hostile lengths so a truncated or negative prefix
            // degrades to a short element instead of a fault.
            let end = idx.saturating_add(len).min(packet.len());
            decode_into(&packet[idx..end], out);
            idx = end;
        }
    } else if let Some(msg) = parse_message(packet) {
        out.push(msg);
    }
}

fn parse_message(packet: &[u8]) -> Option<OscMessage> {
    let (address, idx) = read_str(packet, 0);
    if address.is_empty() {
        return None;
    }

    let (tags, mut idx) = read_str(packet, idx);
    if !tags.starts_with(',') {
        return None;
    }

    let mut args = Vec::new();
    for tag in tags.chars().skip(1) {
        match tag {
            'i' => {
                let Some(word) = word_at(packet, idx) else {
                    break;
                };
                args.push(OscValue::Int(i32::from_be_bytes(word)));
                idx += 4;
            }
            'f' => {
                let Some(word) = word_at(packet, idx) else {
                    break;
                };
                args.push(OscValue::Float(f32::from_be_bytes(word)));
                idx += 4;
            }
            'T' => args.push(OscValue::Bool(true)),
            'F' => args.push(OscValue::Bool(false)),
            's' => {
                let (s, next) = read_str(packet, idx);
                idx = next;
                args.push(OscValue::Str(s));
            }
            'b' => {
                if idx + 4 > packet.len() {
                    break;
                }
                let len = read_len(packet, idx);
                idx += 4;
                let end = idx.saturating_add(len).min(packet.len());
                args.push(OscValue::Blob(packet[idx..end].to_vec()));
                idx = pad4(end);
            }
            // Unknown tag: contributes no argument, consumes no bytes.
            _ => {}
        }
    }

    Some(OscMessage { address, args })
}

/// Read a NUL-terminated string starting at `idx`, returning the string
/// and the cursor advanced past the NUL and its zero-padding.
///
/// No NUL before buffer end ⇒ empty string and cursor at buffer end, so
/// the caller's next read fails cleanly.
fn read_str(buf: &[u8], idx: usize) -> (String, usize) {
    if idx >= buf.len() {
        return (String::new(), idx);
    }
    match buf[idx..].iter().position(|&b| b == 0) {
        Some(rel) => {
            let end = idx + rel;
            let s = String::from_utf8_lossy(&buf[idx..end]).into_owned();
            (s, pad4(end + 1))
        }
        None => (String::new(), buf.len()),
    }
}

/// Big-endian signed length prefix, clamped to a usable `usize`.
/// Caller guarantees `idx + 4 <= buf.len()`.
fn read_len(buf: &[u8], idx: usize) -> usize {
    let word = [buf[idx], buf[idx + 1], buf[idx + 2], buf[idx + 3]];
    usize::try_from(i32::from_be_bytes(word)).unwrap_or(0)
}

fn word_at(buf: &[u8], idx: usize) -> Option<[u8; 4]> {
    buf.get(idx..idx + 4)
        .map(|b| [b[0], b[1], b[2], b[3]])
}

/// Next multiple of 4 at or above `i`.
fn pad4(i: usize) -> usize {
    (i + 3) & !3
}
