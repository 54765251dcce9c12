//! Transport abstraction — any non-blocking datagram source.
//!
//! The bridge core is generic over `DatagramTransport`, so tests drive
//! it with scripted packet queues and the binary plugs in a UDP socket.
//! No ordering or delivery guarantee is assumed: a datagram either
//! arrives whole or not at all, and the decoder copes with whatever is
//! inside.

use std::io;
use std::net::{SocketAddr, UdpSocket};

/// Largest datagram the bridge will accept (UDP payload ceiling).
pub const MAX_DATAGRAM: usize = 65535;

/// Message-oriented, non-blocking transport channel.
pub trait DatagramTransport {
    /// Error type for this transport.
    type Error: std::fmt::Debug;

    /// Read one pending datagram into `buf`.
    /// Returns the datagram length, or 0 if none is pending.
    fn recv(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error>;
}

/// UDP socket adapter. Bound once; `recv` never blocks.
pub struct UdpTransport {
    socket: UdpSocket,
}

impl UdpTransport {
    /// Bind and switch to non-blocking mode. Bind failure is the
    /// caller's problem (fatal to the transport, not to the bridge).
    pub fn bind(addr: SocketAddr) -> io::Result<Self> {
        let socket = UdpSocket::bind(addr)?;
        socket.set_nonblocking(true)?;
        Ok(Self { socket })
    }

    /// The locally bound address.
    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.socket.local_addr()
    }
}

impl DatagramTransport for UdpTransport {
    type Error = io::Error;

    fn recv(&mut self, buf: &mut [u8]) -> Result<usize, io::Error> {
        match self.socket.recv_from(buf) {
            Ok((n, _peer)) => Ok(n),
            Err(e) if e.kind() == io::ErrorKind::WouldBlock => Ok(0),
            Err(e) => Err(e),
        }
    }
}
