//! Wire codec for BattlEye RCon packets.
//!
//! Every packet shares an 8-byte header followed by a type-specific payload:
//!
//! ```text
//! ┌─────────────┬────────────────┬──────────┬──────────┬─────────────┐
//! │ 'B' 'E' (2) │ CRC-32, LE (4) │ 0xFF (1) │ type (1) │ payload ... │
//! └─────────────┴────────────────┴──────────┴──────────┴─────────────┘
//! ```
//!
//! The checksum covers everything from the 0xFF marker byte to the end of
//! the packet. Payload strings are delimited by the packet length alone;
//! there is no terminator on the wire.

use crate::error::RconError;
use crate::message::Message;

/// Key bytes at the start of every packet.
pub const MAGIC: [u8; 2] = [0x42, 0x45];

/// Marker byte separating the header from the typed payload.
pub const MARKER: u8 = 0xFF;

/// All packets are at least 8 bytes long.
pub const HEADER_LENGTH: usize = 8;

/// Largest datagram the protocol deals in. Replies never exceed this; longer
/// command output arrives as multi-part responses.
pub const MAX_PACKET_SIZE: usize = 2048;

// The message type identifiers found inside the packets. Login packets and
// multi-part responses share a type byte and are told apart by length.
const PKT_LOGIN: u8 = 0;
const PKT_MULTI: u8 = 0;
const PKT_CMD: u8 = 1;
const PKT_SERVER: u8 = 2;

/// Calculate the CRC-32 checksum for a packet tail.
pub fn checksum(data: &[u8]) -> u32 {
    crc32fast::hash(data)
}

/// Serialize a message into its exact wire representation.
pub fn encode(message: &Message) -> Vec<u8> {
    let mut packet = Vec::with_capacity(HEADER_LENGTH + 16);
    packet.extend_from_slice(&MAGIC);
    // checksum placeholder, backfilled once the payload is in place
    packet.extend_from_slice(&[0u8; 4]);
    packet.push(MARKER);

    match message {
        Message::Login { password } => {
            packet.push(PKT_LOGIN);
            packet.extend_from_slice(password.as_bytes());
        }
        Message::LoginResponse { result } => {
            packet.push(PKT_LOGIN);
            packet.push(*result);
        }
        Message::Command { seq, command } => {
            packet.push(PKT_CMD);
            packet.push(*seq);
            packet.extend_from_slice(command.as_bytes());
        }
        Message::CommandResponse { seq, body } => {
            packet.push(PKT_CMD);
            packet.push(*seq);
            packet.extend_from_slice(body.as_bytes());
        }
        Message::CommandPartialResponse {
            total_parts,
            part_index,
            body,
        } => {
            packet.push(PKT_MULTI);
            packet.push(*total_parts);
            packet.push(*part_index);
            packet.extend_from_slice(body.as_bytes());
        }
        Message::ServerMessage { seq, body } => {
            packet.push(PKT_SERVER);
            packet.push(*seq);
            packet.extend_from_slice(body.as_bytes());
        }
        Message::ServerAck { seq } => {
            packet.push(PKT_SERVER);
            packet.push(*seq);
        }
    }

    let crc = checksum(&packet[6..]);
    packet[2..6].copy_from_slice(&crc.to_le_bytes());
    packet
}

/// Parse and validate a received packet.
///
/// Only server-side variants come out of here: a 9-byte type-0 packet is a
/// [`Message::LoginResponse`] and a longer one is a
/// [`Message::CommandPartialResponse`], no matter who produced it.
pub fn decode(bytes: &[u8]) -> Result<Message, RconError> {
    if bytes.len() < HEADER_LENGTH {
        return Err(RconError::PacketTooShort(bytes.len()));
    }

    if bytes[0..2] != MAGIC {
        return Err(RconError::BadMagic([bytes[0], bytes[1]]));
    }

    let stored = u32::from_le_bytes([bytes[2], bytes[3], bytes[4], bytes[5]]);
    let computed = checksum(&bytes[6..]);
    if computed != stored {
        return Err(RconError::ChecksumMismatch { computed, stored });
    }

    if bytes[6] != MARKER {
        return Err(RconError::BadMarker(bytes[6]));
    }

    match bytes[7] {
        PKT_LOGIN if bytes.len() == 9 => Ok(Message::LoginResponse { result: bytes[8] }),
        PKT_MULTI if bytes.len() > 9 => Ok(Message::CommandPartialResponse {
            total_parts: bytes[8],
            part_index: bytes[9],
            body: extract_body(&bytes[10..])?,
        }),
        PKT_CMD if bytes.len() > HEADER_LENGTH => Ok(Message::CommandResponse {
            seq: bytes[8],
            body: extract_body(&bytes[9..])?,
        }),
        PKT_SERVER if bytes.len() > HEADER_LENGTH => Ok(Message::ServerMessage {
            seq: bytes[8],
            body: extract_body(&bytes[9..])?,
        }),
        // type is known but the payload byte after the header is missing
        PKT_LOGIN | PKT_CMD | PKT_SERVER => Err(RconError::PacketTooShort(bytes.len())),
        unknown => Err(RconError::UnknownPacketType(unknown)),
    }
}

fn extract_body(bytes: &[u8]) -> Result<String, RconError> {
    Ok(std::str::from_utf8(bytes)?.to_string())
}
