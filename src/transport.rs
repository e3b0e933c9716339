// transport.rs - synchronous UDP client
//
// One blocking round trip per `send`: encode, write, read one datagram,
// decode against the request's authenticator. No connection pooling or
// retry, matching the source's RadClient (a fresh socket per send, a
// single read with a deadline).

use std::net::UdpSocket;
use std::time::Duration;

use crate::codes::PacketCode;
use crate::error::Result;
use crate::packet::Packet;

/// Default time to wait for a reply before giving up.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(2);
/// Receive buffer size; large enough for the 4096-byte RADIUS maximum.
const RECV_BUF_SIZE: usize = 4096;

/// A minimal synchronous RADIUS client bound to one server and secret.
pub struct RadiusClient {
    server: String,
    secret: String,
    timeout: Duration,
}

impl RadiusClient {
    /// Build a client targeting `server` (`host:port`) with `secret`,
    /// using [`DEFAULT_TIMEOUT`].
    pub fn new(server: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            server: server.into(),
            secret: secret.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Override the read timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build an empty request packet using this client's secret.
    pub fn new_request(&self, code: PacketCode) -> Result<Packet> {
        Packet::request(code, self.secret.clone())
    }

    /// Encode `request`, send it, and decode the single reply datagram
    /// received within the configured timeout.
    pub fn send(&self, request: &mut Packet) -> Result<Packet> {
        let buf = request.encode()?;
        let request_auth = request.authenticator;

        let socket = UdpSocket::bind("0.0.0.0:0")?;
        socket.connect(&self.server)?;
        socket.set_read_timeout(Some(self.timeout))?;
        socket.set_write_timeout(Some(self.timeout))?;

        socket.send(&buf)?;

        let mut recv_buf = vec![0u8; RECV_BUF_SIZE];
        let n = socket.recv(&mut recv_buf)?;

        Packet::decode_reply(self.secret.clone(), &recv_buf[..n], &request_auth)
    }
}
