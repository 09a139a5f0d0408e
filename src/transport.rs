//! Datagram transport used by the session.
//!
//! The client only needs two things from the network: fire off one packet,
//! and wait a bounded amount of time for the next one. Keeping that behind a
//! trait lets the session logic run against a scripted transport in tests.

use crate::error::RconError;
use crate::packet::MAX_PACKET_SIZE;
use async_trait::async_trait;
use std::io;
use std::time::Duration;
use tokio::net::{lookup_host, UdpSocket};
use tokio::time::timeout;

/// One send / one bounded receive, the only two operations the session
/// performs. A receive ends in one of three ways: a datagram, a timeout
/// ([`RconError::TimeoutError`]) or an I/O failure — all three are distinct
/// to the caller and the latter two are fatal to the session.
#[async_trait]
pub trait Transport {
    async fn send(&mut self, packet: &[u8]) -> Result<(), RconError>;
    async fn receive(&mut self, wait: Duration) -> Result<Vec<u8>, RconError>;
}

/// Connected UDP socket to the rcon server.
pub struct UdpTransport {
    socket: UdpSocket,
}

impl UdpTransport {
    /// Resolve `host` and connect an ephemeral socket of the matching
    /// address family to it.
    pub async fn connect(host: &str) -> Result<Self, RconError> {
        let address = lookup_host(host)
            .await
            .map_err(RconError::UnreachableHost)?
            .next()
            .ok_or_else(|| {
                RconError::UnreachableHost(io::Error::new(
                    io::ErrorKind::NotFound,
                    "host did not resolve to any address",
                ))
            })?;

        let bind_address = if address.is_ipv4() { "0.0.0.0:0" } else { "[::]:0" };
        let socket = UdpSocket::bind(bind_address)
            .await
            .map_err(RconError::UnreachableHost)?;
        socket
            .connect(address)
            .await
            .map_err(RconError::UnreachableHost)?;

        Ok(UdpTransport { socket })
    }
}

#[async_trait]
impl Transport for UdpTransport {
    async fn send(&mut self, packet: &[u8]) -> Result<(), RconError> {
        let written = self
            .socket
            .send(packet)
            .await
            .map_err(RconError::SendError)?;
        if written != packet.len() {
            return Err(RconError::SendError(io::Error::new(
                io::ErrorKind::WriteZero,
                "partial write",
            )));
        }
        Ok(())
    }

    async fn receive(&mut self, wait: Duration) -> Result<Vec<u8>, RconError> {
        let mut buf = [0u8; MAX_PACKET_SIZE];
        let read = timeout(wait, self.socket.recv(&mut buf))
            .await?
            .map_err(RconError::ReceiveError)?;
        Ok(buf[..read].to_vec())
    }
}
