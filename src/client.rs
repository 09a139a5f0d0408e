use crate::{
    error::RconError,
    message::Message,
    packet,
    transport::{Transport, UdpTransport},
};
use log::trace;
use std::time::Duration;

/// How long to wait for any expected reply. The protocol has no
/// retransmission, so a reply that misses this window fails the session.
pub const REPLY_TIMEOUT: Duration = Duration::from_millis(500);

/// Wrapping 8-bit counter handing out sequence numbers for outgoing
/// commands. One instance lives inside the [`Client`]; the protocol only
/// needs the numbers to be unique across the last 256 commands.
#[derive(Debug, Default)]
struct Sequence(u8);

impl Sequence {
    fn next(&mut self) -> u8 {
        let seq = self.0;
        self.0 = self.0.wrapping_add(1);
        seq
    }
}

/// BattlEye RCon client. Call `connect()` to establish a connection and
/// authenticate. The client should be `mut` as it keeps a counter used for
/// command sequence numbers.
///
/// Server replies are handed to the caller line by line through a sink
/// closure: a split-up response arrives as several calls, one per chunk, in
/// the order the packets came in.
///
/// ## Example
/// ```no_run
/// use bercon::client::Client;
/// use std::error::Error;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn Error>> {
///     let host = "203.0.113.7:2302";
///     // client must be mutable so we can increment sequence numbers
///     let mut client = Client::connect(host, "<put rcon password here>").await?;
///     client.command("players", |line| println!("{line}")).await?;
///     Ok(())
/// }
/// ```
pub struct Client<T: Transport> {
    transport: T,
    sequence: Sequence,
    reply_timeout: Duration,
}

impl Client<UdpTransport> {
    /// Connect to `host` over UDP and log in.
    pub async fn connect(host: &str, password: &str) -> Result<Self, RconError> {
        let transport = UdpTransport::connect(host).await?;

        trace!("opened udp socket to {}, attempting login", host);

        Self::login(transport, password).await
    }
}

impl<T: Transport> Client<T> {
    /// Authenticate against an already connected transport.
    ///
    /// The server must answer with a login response; `result` 0 means the
    /// password was rejected. Anything else on the wire at this point is a
    /// protocol violation and fails the session.
    pub async fn login(mut transport: T, password: &str) -> Result<Self, RconError> {
        let login = Message::Login {
            password: password.to_string(),
        };

        trace!("sending login packet to server");
        transport.send(&packet::encode(&login)).await?;

        let reply = transport.receive(REPLY_TIMEOUT).await?;
        match packet::decode(&reply)? {
            Message::LoginResponse { result: 0 } => Err(RconError::AuthenticationError),
            Message::LoginResponse { .. } => {
                trace!("login accepted");
                Ok(Client {
                    transport,
                    sequence: Sequence::default(),
                    reply_timeout: REPLY_TIMEOUT,
                })
            }
            other => {
                trace!("received {} instead of a login response", other.kind());
                Err(RconError::UnexpectedMessage)
            }
        }
    }

    /// Run a rcon command and stream the reply into `emit`.
    ///
    /// The call returns once the server sends the final response packet for
    /// this command. Along the way, chunks of a split-up response are
    /// emitted as they arrive, and unsolicited server messages are emitted
    /// and acknowledged without ending the command.
    pub async fn command<F>(&mut self, command: &str, mut emit: F) -> Result<(), RconError>
    where
        F: FnMut(&str),
    {
        let seq = self.sequence.next();
        let outgoing = Message::Command {
            seq,
            command: command.to_string(),
        };

        trace!("sending command {} to server", seq);
        self.transport.send(&packet::encode(&outgoing)).await?;

        loop {
            let bytes = self.transport.receive(self.reply_timeout).await?;
            match packet::decode(&bytes)? {
                Message::CommandResponse { seq, body } => {
                    trace!("receive final response for command {}", seq);
                    emit(&body);
                    return Ok(());
                }
                Message::CommandPartialResponse {
                    total_parts,
                    part_index,
                    body,
                } => {
                    trace!(
                        "receive part {} of {} of a split response",
                        part_index,
                        total_parts
                    );
                    emit(&body);
                }
                Message::ServerMessage { seq, body } => {
                    trace!("receive server message {}, acknowledging", seq);
                    emit(&body);
                    let ack = Message::ServerAck { seq };
                    self.transport.send(&packet::encode(&ack)).await?;
                }
                other => {
                    // anything else counts as the end of the command, not
                    // as an error
                    trace!("receive {} mid-command, ending the cycle", other.kind());
                    return Ok(());
                }
            }
        }
    }
}
