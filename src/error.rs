use thiserror::Error;
use tokio::time::error::Elapsed;

/// Possible errors for the package.
#[derive(Error, Debug)]
pub enum RconError {
    /// Returned if a packet is shorter than the fixed 8-byte header.
    #[error("packet too short ({0} bytes)")]
    PacketTooShort(usize),
    /// Returned if the packet does not start with the 'B' 'E' key bytes.
    #[error("key bytes 'B' 'E' not matched in packet header")]
    BadMagic([u8; 2]),
    /// Returned if the packet is corrupted (stored CRC-32 does not match the
    /// payload).
    #[error("crc32 check failed (computed {computed:#010x}, packet carries {stored:#010x})")]
    ChecksumMismatch { computed: u32, stored: u32 },
    /// Returned if the payload marker byte at offset 6 is not 0xFF.
    #[error("unexpected byte {0:#04x} at payload marker position")]
    BadMarker(u8),
    /// Returned if we received a packet that does not have a type known to us.
    #[error("unknown rcon packet type: {0}")]
    UnknownPacketType(u8),
    /// Returned if the body is mangled in some way.
    #[error("packet body malformed (not valid ascii or utf-8)")]
    MalformedPacketBody(#[from] std::str::Utf8Error),
    /// Returned if the server answers the login packet with anything other
    /// than a login response.
    #[error("unexpected message during login")]
    UnexpectedMessage,
    /// Returned if you can't remember the password.
    #[error("bad password")]
    AuthenticationError,
    /// Returned if the host is down or behind a firewall.
    #[error("host cannot be reached")]
    UnreachableHost(#[source] std::io::Error),
    /// Internal error used if the socket was successfully connected, but
    /// there was a problem writing to it.
    #[error("cannot send message to host")]
    SendError(#[source] std::io::Error),
    /// Internal error used if the socket was successfully connected, but
    /// there was a problem reading from it.
    #[error("cannot receive response from host")]
    ReceiveError(#[source] std::io::Error),
    /// Returned if the server did not respond in time.
    #[error("timeout")]
    TimeoutError(#[from] Elapsed),
    /// Returned if the password file cannot be read.
    #[error("cannot read password file")]
    ConfigError(#[source] std::io::Error),
}
