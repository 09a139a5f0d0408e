/// A single BattlEye RCon message, either direction.
///
/// The wire format is direction-asymmetric: [`Login`](Message::Login),
/// [`Command`](Message::Command) and [`ServerAck`](Message::ServerAck) are
/// only ever sent by the client, the remaining variants only ever arrive
/// from the server. Decoding therefore never produces a client-side variant
/// (see [`crate::packet::decode`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// Authentication request carrying the plaintext rcon password.
    Login { password: String },
    /// Server verdict on a login attempt. `result` is 1 if the password was
    /// accepted and 0 if it was rejected.
    LoginResponse { result: u8 },
    /// A remote console command, correlated with its reply by `seq`.
    Command { seq: u8, command: String },
    /// Complete, single-packet reply to a command.
    CommandResponse { seq: u8, body: String },
    /// One chunk of a reply that the server split across several packets.
    /// `total_parts` and `part_index` are reported by the server as-is and
    /// are not validated against each other.
    CommandPartialResponse {
        total_parts: u8,
        part_index: u8,
        body: String,
    },
    /// Unsolicited notice from the server. Must be acknowledged with a
    /// [`ServerAck`](Message::ServerAck) carrying the same `seq`.
    ServerMessage { seq: u8, body: String },
    /// Acknowledgment for a received [`ServerMessage`](Message::ServerMessage).
    ServerAck { seq: u8 },
}

impl Message {
    /// Short human-readable name of the variant, for log output.
    pub fn kind(&self) -> &'static str {
        match self {
            Message::Login { .. } => "login",
            Message::LoginResponse { .. } => "login response",
            Message::Command { .. } => "command",
            Message::CommandResponse { .. } => "command response",
            Message::CommandPartialResponse { .. } => "command partial response",
            Message::ServerMessage { .. } => "server message",
            Message::ServerAck { .. } => "server ack",
        }
    }
}
