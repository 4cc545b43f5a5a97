//! Test utilities: a fake display device listening on localhost.

use std::time::Duration;

use initiative_host::protocol::{CommandSender, DeviceAddress};
use tokio::io::AsyncReadExt;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Accept `connections` connections and collect what each one carried.
#[allow(dead_code)]
pub async fn fake_device(connections: usize) -> (u16, JoinHandle<Vec<String>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let port = listener.local_addr().expect("local addr").port();
    let handle = tokio::spawn(async move {
        let mut received = Vec::with_capacity(connections);
        for _ in 0..connections {
            let (mut stream, _) = listener.accept().await.expect("accept");
            let mut buf = String::new();
            stream.read_to_string(&mut buf).await.expect("read");
            received.push(buf);
        }
        received
    });
    (port, handle)
}

/// Wait for the fake device, failing instead of hanging if a send went missing.
#[allow(dead_code)]
pub async fn collect(handle: JoinHandle<Vec<String>>) -> Vec<String> {
    tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .expect("device did not receive every expected connection")
        .expect("device task")
}

/// A localhost port with nothing listening on it.
#[allow(dead_code)]
pub async fn closed_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    listener.local_addr().expect("local addr").port()
}

#[allow(dead_code)]
pub fn sender_for(port: u16) -> CommandSender {
    CommandSender::new(
        Some(DeviceAddress::new("127.0.0.1", port)),
        Duration::from_secs(2),
    )
}

/// Decode one received payload, checking the single trailing newline.
#[allow(dead_code)]
pub fn decode(payload: &str) -> serde_json::Value {
    assert!(payload.ends_with('\n'), "payload not newline terminated: {payload:?}");
    assert_eq!(payload.matches('\n').count(), 1);
    serde_json::from_str(payload.trim_end()).expect("valid json")
}
