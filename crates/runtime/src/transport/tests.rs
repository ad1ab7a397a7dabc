use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpListener;
use tokio_tungstenite::tungstenite::Message;

use super::*;
use crate::config::SessionConfig;
use crate::error::Error;

async fn local_ws_server() -> (TcpListener, String) {
	let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
	let url = format!("ws://{}", listener.local_addr().unwrap());
	(listener, url)
}

fn fast_keepalive(interval_ms: u64, timeout_ms: u64) -> SessionConfig {
	SessionConfig {
		ping_interval: Duration::from_millis(interval_ms),
		ping_timeout: Duration::from_millis(timeout_ms),
		..SessionConfig::default()
	}
}

#[tokio::test]
async fn test_memory_pair_delivers_in_order() {
	let (mut client, mut tv) = MemoryTransport::pair();

	client.send("first".into()).await.unwrap();
	client.send("second".into()).await.unwrap();

	assert_eq!(tv.recv().await.unwrap().as_deref(), Some("first"));
	assert_eq!(tv.recv().await.unwrap().as_deref(), Some("second"));
}

#[tokio::test]
async fn test_memory_close_ends_peer_stream() {
	let (mut client, mut tv) = MemoryTransport::pair();

	client.close().await.unwrap();
	assert!(client.is_closed());
	assert_eq!(tv.recv().await.unwrap(), None);
	assert!(matches!(client.send("late".into()).await, Err(Error::ChannelClosed)));

	// closing twice is fine
	client.close().await.unwrap();
}

#[tokio::test]
async fn test_memory_connector_records_dials() {
	let connector = MemoryConnector::new();
	let _tv = connector.listen("wss://10.0.0.2:3001");

	assert!(connector.connect("wss://10.0.0.2:3001").await.is_ok());
	let refused = connector.connect("wss://10.0.0.2:3001").await;
	assert!(matches!(refused, Err(Error::ConnectionFailed { .. })));

	assert_eq!(connector.dialed(), vec!["wss://10.0.0.2:3001", "wss://10.0.0.2:3001"]);
}

#[tokio::test]
async fn test_websocket_round_trip() {
	let (listener, url) = local_ws_server().await;

	let server = tokio::spawn(async move {
		let (tcp, _) = listener.accept().await.unwrap();
		let mut ws = tokio_tungstenite::accept_async(tcp).await.unwrap();
		while let Some(Ok(message)) = ws.next().await {
			match message {
				Message::Text(text) => ws.send(Message::Text(format!("echo:{text}"))).await.unwrap(),
				Message::Close(_) => break,
				_ => {}
			}
		}
	});

	let connector = WebSocketConnector::default();
	let mut transport = connector.connect(&url).await.unwrap();

	transport.send(r#"{"type":"request"}"#.into()).await.unwrap();
	assert_eq!(transport.recv().await.unwrap().as_deref(), Some(r#"echo:{"type":"request"}"#));

	transport.close().await.unwrap();
	transport.close().await.unwrap();
	server.await.unwrap();
}

#[tokio::test]
async fn test_websocket_peer_close_yields_none() {
	let (listener, url) = local_ws_server().await;

	tokio::spawn(async move {
		let (tcp, _) = listener.accept().await.unwrap();
		let mut ws = tokio_tungstenite::accept_async(tcp).await.unwrap();
		ws.close(None).await.unwrap();
	});

	let mut transport = WebSocketConnector::default().connect(&url).await.unwrap();
	assert_eq!(transport.recv().await.unwrap(), None);
	assert!(matches!(transport.send("x".into()).await, Err(Error::ChannelClosed)));
}

#[tokio::test]
async fn test_websocket_sends_keepalive_ping_when_idle() {
	let (listener, url) = local_ws_server().await;

	tokio::spawn(async move {
		let (tcp, _) = listener.accept().await.unwrap();
		let mut ws = tokio_tungstenite::accept_async(tcp).await.unwrap();
		if let Some(Ok(Message::Ping(_))) = ws.next().await {
			ws.send(Message::Text("saw ping".into())).await.unwrap();
		}
	});

	let connector = WebSocketConnector::new(&fast_keepalive(50, 5_000));
	let mut transport = connector.connect(&url).await.unwrap();
	assert_eq!(transport.recv().await.unwrap().as_deref(), Some("saw ping"));
}

#[tokio::test]
async fn test_websocket_unanswered_ping_times_out() {
	let (listener, url) = local_ws_server().await;

	tokio::spawn(async move {
		let (tcp, _) = listener.accept().await.unwrap();
		let _ws = tokio_tungstenite::accept_async(tcp).await.unwrap();
		// hold the socket open without ever reading
		tokio::time::sleep(Duration::from_secs(5)).await;
	});

	let connector = WebSocketConnector::new(&fast_keepalive(20, 50));
	let mut transport = connector.connect(&url).await.unwrap();
	let result = transport.recv().await;
	assert!(matches!(result, Err(Error::Timeout(_))), "got {result:?}");
}

#[tokio::test]
async fn test_connect_refused_is_connection_failed() {
	let (listener, url) = local_ws_server().await;
	drop(listener);

	let result = WebSocketConnector::default().connect(&url).await;
	assert!(matches!(result, Err(Error::ConnectionFailed { .. })));
}
