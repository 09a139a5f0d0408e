//! End-to-end session tests against a scripted UDP server.
//!
//! Each test binds a real socket, plays the server side of the conversation
//! byte-for-byte and asserts on what the client puts on the wire.

use bercon::client::Client;
use bercon::error::RconError;
use bercon::message::Message;
use bercon::packet;
use std::net::SocketAddr;
use tokio::net::UdpSocket;

/// Receive one datagram and assert it is the exact encoding of `expected`.
async fn expect_packet(socket: &UdpSocket, expected: &Message) -> SocketAddr {
    let mut buf = [0u8; packet::MAX_PACKET_SIZE];
    let (read, peer) = socket.recv_from(&mut buf).await.unwrap();
    assert_eq!(
        &buf[..read],
        packet::encode(expected).as_slice(),
        "client sent unexpected bytes for {}",
        expected.kind()
    );
    peer
}

async fn send(socket: &UdpSocket, peer: SocketAddr, message: &Message) {
    socket
        .send_to(&packet::encode(message), peer)
        .await
        .unwrap();
}

#[tokio::test]
async fn full_session_with_split_response_and_server_notice() {
    let server = UdpSocket::bind("127.0.0.1:0").await.unwrap();
    let address = server.local_addr().unwrap().to_string();

    let script = tokio::spawn(async move {
        let peer = expect_packet(
            &server,
            &Message::Login {
                password: "secret".to_string(),
            },
        )
        .await;
        send(&server, peer, &Message::LoginResponse { result: 1 }).await;

        expect_packet(
            &server,
            &Message::Command {
                seq: 0,
                command: "players".to_string(),
            },
        )
        .await;
        send(
            &server,
            peer,
            &Message::CommandPartialResponse {
                total_parts: 2,
                part_index: 0,
                body: "alice".to_string(),
            },
        )
        .await;
        send(
            &server,
            peer,
            &Message::ServerMessage {
                seq: 77,
                body: "bob connected".to_string(),
            },
        )
        .await;
        expect_packet(&server, &Message::ServerAck { seq: 77 }).await;
        send(
            &server,
            peer,
            &Message::CommandResponse {
                seq: 0,
                body: "bob".to_string(),
            },
        )
        .await;
    });

    let mut client = Client::connect(&address, "secret").await.unwrap();
    let mut lines = Vec::new();
    client
        .command("players", |line| lines.push(line.to_string()))
        .await
        .unwrap();

    assert_eq!(lines, ["alice", "bob connected", "bob"]);
    script.await.unwrap();
}

#[tokio::test]
async fn wrong_password_is_rejected() {
    let server = UdpSocket::bind("127.0.0.1:0").await.unwrap();
    let address = server.local_addr().unwrap().to_string();

    let script = tokio::spawn(async move {
        let peer = expect_packet(
            &server,
            &Message::Login {
                password: "wrong".to_string(),
            },
        )
        .await;
        send(&server, peer, &Message::LoginResponse { result: 0 }).await;
    });

    let result = Client::connect(&address, "wrong").await;
    assert!(matches!(result, Err(RconError::AuthenticationError)));
    script.await.unwrap();
}

#[tokio::test]
async fn unanswered_login_times_out() {
    let server = UdpSocket::bind("127.0.0.1:0").await.unwrap();
    let address = server.local_addr().unwrap().to_string();

    let result = Client::connect(&address, "secret").await;
    assert!(matches!(result, Err(RconError::TimeoutError(_))));
}

#[tokio::test]
async fn corrupted_reply_is_fatal() {
    let server = UdpSocket::bind("127.0.0.1:0").await.unwrap();
    let address = server.local_addr().unwrap().to_string();

    let script = tokio::spawn(async move {
        let mut buf = [0u8; packet::MAX_PACKET_SIZE];
        let (_, peer) = server.recv_from(&mut buf).await.unwrap();
        send(&server, peer, &Message::LoginResponse { result: 1 }).await;

        let (_, _) = server.recv_from(&mut buf).await.unwrap();
        let mut reply = packet::encode(&Message::CommandResponse {
            seq: 0,
            body: "ok".to_string(),
        });
        reply[10] ^= 0xff;
        server.send_to(&reply, peer).await.unwrap();
    });

    let mut client = Client::connect(&address, "secret").await.unwrap();
    let result = client.command("players", |_| {}).await;

    assert!(matches!(result, Err(RconError::ChecksumMismatch { .. })));
    script.await.unwrap();
}
