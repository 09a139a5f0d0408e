//! Pure Rust async implementation of the [BattlEye RCon protocol](https://www.battleye.com/downloads/BERConProtocol.txt).
pub mod client;
pub mod config;
pub mod error;
pub mod message;
pub mod packet;
pub mod transport;
