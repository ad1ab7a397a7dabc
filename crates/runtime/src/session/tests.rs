use std::sync::Arc;
use std::time::Duration;

use serde_json::{Value, json};

use super::*;
use crate::credential::MemoryCredentialStore;
use crate::transport::{MemoryConnector, MemoryTransport, Transport};

const IP: &str = "10.0.0.7";
const CONTROL_URL: &str = "wss://10.0.0.7:3001";
const INPUT_URL: &str = "wss://10.0.0.7:3001/resources/1f2e/netinput.pointer.sock";

struct Tv {
	connector: Arc<MemoryConnector>,
	store: Arc<MemoryCredentialStore>,
}

impl Tv {
	fn new(saved_key: Option<&str>) -> Self {
		Self {
			connector: Arc::new(MemoryConnector::new()),
			store: Arc::new(MemoryCredentialStore::new(saved_key)),
		}
	}

	fn session(&self) -> Session {
		self.session_with(SessionConfig::default())
	}

	fn session_with(&self, config: SessionConfig) -> Session {
		Session::builder(IP)
			.config(config)
			.connector(self.connector.clone())
			.store(self.store.clone())
			.build()
			.unwrap()
	}

	/// Accepts one control connection that answers the handshake with `registered`.
	async fn control_registered(&self, issued_key: Option<&str>) -> MemoryTransport {
		let mut peer = self.connector.listen(CONTROL_URL);
		let payload = match issued_key {
			Some(key) => json!({ "client-key": key }),
			None => json!({}),
		};
		reply(&mut peer, json!({ "type": "registered", "id": "register_0", "payload": payload })).await;
		peer
	}

	async fn connected(&self, key: Option<&str>) -> (Session, MemoryTransport) {
		let mut peer = self.control_registered(key).await;
		let mut session = self.session();
		session.connect(false).await.unwrap();
		let register = next_frame(&mut peer).await;
		assert_eq!(register["type"], "register");
		(session, peer)
	}
}

async fn reply(peer: &mut MemoryTransport, frame: Value) {
	peer.send(frame.to_string()).await.unwrap();
}

async fn next_frame(peer: &mut MemoryTransport) -> Value {
	let text = peer.recv().await.unwrap().expect("client closed the socket");
	serde_json::from_str(&text).unwrap()
}

fn response(id: &str, payload: Value) -> Value {
	json!({ "type": "response", "id": id, "payload": payload })
}

#[tokio::test]
async fn test_saved_key_registers_without_prompt() {
	let tv = Tv::new(Some("key-1"));
	let mut peer = tv.control_registered(Some("key-1")).await;
	let mut session = tv.session();

	session.connect(false).await.unwrap();

	let register = next_frame(&mut peer).await;
	assert_eq!(register["id"], "register_0");
	assert_eq!(register["payload"]["forcePairing"], false);
	assert_eq!(register["payload"]["client-key"], "key-1");
	assert!(session.is_registered());
	assert!(tv.store.saved().is_empty(), "same key must not be re-saved");
}

#[tokio::test]
async fn test_force_repair_raises_prompt_flag() {
	let tv = Tv::new(Some("key-1"));
	let mut peer = tv.control_registered(Some("key-1")).await;
	let mut session = tv.session();

	session.connect(true).await.unwrap();

	let register = next_frame(&mut peer).await;
	assert_eq!(register["payload"]["forcePairing"], true);
	assert!(register["payload"].get("client-key").is_none());
}

#[tokio::test]
async fn test_new_key_is_persisted_and_reused() {
	let tv = Tv::new(None);
	let mut peer = tv.control_registered(Some("fresh-key")).await;
	let mut first = tv.session();

	first.connect(false).await.unwrap();

	let register = next_frame(&mut peer).await;
	assert_eq!(register["payload"]["forcePairing"], true);
	assert_eq!(tv.store.saved(), vec!["fresh-key"]);
	assert_eq!(first.client_key(), Some("fresh-key"));
	first.close().await.unwrap();

	let mut peer = tv.control_registered(Some("fresh-key")).await;
	let mut second = tv.session();
	second.connect(false).await.unwrap();

	let register = next_frame(&mut peer).await;
	assert_eq!(register["payload"]["forcePairing"], false);
	assert_eq!(register["payload"]["client-key"], "fresh-key");
	assert_eq!(tv.store.saved().len(), 1);
}

#[tokio::test]
async fn test_explicit_key_overrides_store() {
	let tv = Tv::new(Some("stored"));
	let mut peer = tv.control_registered(None).await;
	let mut session = Session::builder(IP)
		.connector(tv.connector.clone())
		.store(tv.store.clone())
		.client_key(Some("explicit".to_string()))
		.build()
		.unwrap();

	session.connect(false).await.unwrap();
	assert_eq!(next_frame(&mut peer).await["payload"]["client-key"], "explicit");
}

#[tokio::test]
async fn test_auxiliary_frames_are_skipped_during_pairing() {
	let tv = Tv::new(None);
	let mut peer = tv.connector.listen(CONTROL_URL);
	reply(&mut peer, response("register_0", json!({ "pairingType": "PROMPT", "returnValue": true }))).await;
	reply(&mut peer, json!({ "type": "hello", "payload": {} })).await;
	reply(&mut peer, json!({ "type": "registered", "id": "register_0", "payload": { "client-key": "k" } })).await;

	let mut session = tv.session();
	session.connect(false).await.unwrap();
	assert_eq!(session.state(), SessionState::Registered);
	assert_eq!(session.client_key(), Some("k"));
}

#[tokio::test]
async fn test_registration_permission_error() {
	let tv = Tv::new(Some("stale"));
	let mut peer = tv.connector.listen(CONTROL_URL);
	reply(&mut peer, json!({ "type": "error", "id": "register_0", "error": "403 insufficient permissions" })).await;

	let mut session = tv.session();
	let err = session.connect(false).await.unwrap_err();

	assert!(err.is_permission(), "got {err:?}");
	assert_eq!(session.state(), SessionState::Failed);
}

#[tokio::test]
async fn test_registration_generic_error() {
	let tv = Tv::new(None);
	let mut peer = tv.connector.listen(CONTROL_URL);
	reply(&mut peer, json!({ "type": "error", "id": "register_0", "error": "403 User rejected pairing" })).await;

	let mut session = tv.session();
	let err = session.connect(false).await.unwrap_err();

	assert!(matches!(err, Error::RegistrationFailed(ref msg) if msg.contains("rejected")), "got {err:?}");
	assert!(tv.store.saved().is_empty());
}

#[tokio::test]
async fn test_rejected_registration_refuses_requests() {
	let tv = Tv::new(None);
	let mut peer = tv.connector.listen(CONTROL_URL);
	reply(&mut peer, json!({ "type": "error", "id": "register_0", "error": "rejected by user" })).await;
	reply(&mut peer, response("cmd_1", json!({ "volume": 3 }))).await;

	let mut session = tv.session();
	session.connect(false).await.unwrap_err();
	assert_eq!(session.state(), SessionState::Failed);

	let err = session.request("ssap://audio/getVolume").await.unwrap_err();
	assert!(matches!(err, Error::NotConnected), "got {err:?}");
	let err = session.subscribe("ssap://audio/getVolume", json!({})).await.err();
	assert!(matches!(err, Some(Error::NotConnected)), "got {err:?}");
	let err = session.connect_input().await.unwrap_err();
	assert!(matches!(err, Error::NotConnected), "got {err:?}");
	assert_eq!(session.last_request_id(), 0);

	assert_eq!(next_frame(&mut peer).await["type"], "register");
	assert_eq!(peer.recv().await.unwrap(), None, "control socket must be released");
}

#[tokio::test]
async fn test_timed_out_pairing_releases_socket() {
	let tv = Tv::new(None);
	let mut peer = tv.connector.listen(CONTROL_URL);
	let mut session = tv.session_with(SessionConfig {
		pairing_read_timeout: Duration::from_millis(30),
		..SessionConfig::default()
	});

	session.connect(false).await.unwrap_err();

	assert_eq!(next_frame(&mut peer).await["type"], "register");
	assert_eq!(peer.recv().await.unwrap(), None);
	assert!(matches!(session.request("ssap://audio/getVolume").await, Err(Error::NotConnected)));
}

#[tokio::test]
async fn test_pairing_read_timeout() {
	let tv = Tv::new(None);
	let _peer = tv.connector.listen(CONTROL_URL);
	let mut session = tv.session_with(SessionConfig {
		pairing_read_timeout: Duration::from_millis(50),
		..SessionConfig::default()
	});

	let err = session.connect(false).await.unwrap_err();
	assert!(err.is_timeout(), "got {err:?}");
	assert_eq!(session.state(), SessionState::Failed);
}

#[tokio::test]
async fn test_pairing_deadline_bounds_the_loop() {
	let tv = Tv::new(None);
	let mut peer = tv.connector.listen(CONTROL_URL);
	let mut session = tv.session_with(SessionConfig {
		pairing_read_timeout: Duration::from_secs(30),
		pairing_deadline: Some(Duration::from_millis(80)),
		..SessionConfig::default()
	});

	let chatter = tokio::spawn(async move {
		for _ in 0..20 {
			if peer.send(json!({ "type": "hello" }).to_string()).await.is_err() {
				break;
			}
			tokio::time::sleep(Duration::from_millis(20)).await;
		}
	});

	let err = session.connect(false).await.unwrap_err();
	assert!(err.is_timeout(), "got {err:?}");
	chatter.abort();
}

#[tokio::test]
async fn test_connect_refused() {
	let tv = Tv::new(None);
	let mut session = tv.session();

	let err = session.connect(false).await.unwrap_err();
	assert!(matches!(err, Error::ConnectionFailed { .. }));
	assert_eq!(tv.connector.dialed(), vec![CONTROL_URL]);
}

#[tokio::test]
async fn test_request_ids_are_sequential() {
	let tv = Tv::new(Some("k"));
	let (mut session, mut peer) = tv.connected(Some("k")).await;

	for n in 1..=3 {
		reply(&mut peer, response(&format!("cmd_{n}"), json!({ "n": n }))).await;
	}

	for n in 1..=3u64 {
		let value = session.request("ssap://audio/getVolume").await.unwrap();
		assert_eq!(value, Some(json!({ "n": n })));
	}

	for n in 1..=3 {
		let frame = next_frame(&mut peer).await;
		assert_eq!(frame["type"], "request");
		assert_eq!(frame["id"], format!("cmd_{n}"));
		assert_eq!(frame["uri"], "ssap://audio/getVolume");
		assert_eq!(frame["payload"], json!({}));
	}
	assert_eq!(session.last_request_id(), 3);
}

#[tokio::test]
async fn test_mismatched_response_is_desync() {
	let tv = Tv::new(Some("k"));
	let (mut session, mut peer) = tv.connected(Some("k")).await;
	reply(&mut peer, response("cmd_9", json!({ "volume": 99 }))).await;

	let err = session.request("ssap://audio/getVolume").await.unwrap_err();
	match err {
		Error::ProtocolDesync { expected, received } => {
			assert_eq!(expected, "cmd_1");
			assert_eq!(received, "cmd_9");
		}
		other => panic!("expected desync, got {other:?}"),
	}

	// ids keep moving forward after a failure
	reply(&mut peer, response("cmd_2", json!({}))).await;
	session.request("ssap://audio/getVolume").await.unwrap();
	next_frame(&mut peer).await;
	assert_eq!(next_frame(&mut peer).await["id"], "cmd_2");
}

#[tokio::test]
async fn test_error_response_without_permission_is_no_data() {
	let tv = Tv::new(Some("k"));
	let (mut session, mut peer) = tv.connected(Some("k")).await;
	reply(&mut peer, json!({ "type": "error", "id": "cmd_1", "error": "404 no such service or method" })).await;

	let result = session.request("ssap://tv/getChannelList").await.unwrap();
	assert_eq!(result, None);
}

#[tokio::test]
async fn test_error_response_with_permission_names_uri() {
	let tv = Tv::new(Some("k"));
	let (mut session, mut peer) = tv.connected(Some("k")).await;
	reply(&mut peer, json!({ "type": "error", "id": "cmd_1", "error": "401 insufficient permissions" })).await;

	let err = session.request("ssap://system/turnOff").await.unwrap_err();
	match err {
		Error::Permission { uri, .. } => assert_eq!(uri.as_deref(), Some("ssap://system/turnOff")),
		other => panic!("expected permission error, got {other:?}"),
	}
}

#[tokio::test]
async fn test_response_without_payload_returns_frame() {
	let tv = Tv::new(Some("k"));
	let (mut session, mut peer) = tv.connected(Some("k")).await;
	reply(&mut peer, json!({ "type": "response", "id": "cmd_1", "returnValue": true })).await;

	let value = session.request("ssap://media.controls/play").await.unwrap().unwrap();
	assert_eq!(value["returnValue"], true);
	assert_eq!(value["id"], "cmd_1");
}

#[tokio::test]
async fn test_invoke_subscribe_returns_first_value() {
	let tv = Tv::new(Some("k"));
	let (mut session, mut peer) = tv.connected(Some("k")).await;
	reply(&mut peer, response("cmd_1", json!({ "volume": 5 }))).await;

	let value = session.invoke("ssap://audio/getVolume", json!({}), true).await.unwrap();
	assert_eq!(value, Some(json!({ "volume": 5 })));
	assert_eq!(next_frame(&mut peer).await["type"], "subscribe");
}

#[tokio::test]
async fn test_invoke_before_connect() {
	let tv = Tv::new(None);
	let mut session = tv.session();

	let err = session.request("ssap://audio/getVolume").await.unwrap_err();
	assert!(matches!(err, Error::NotConnected));
}

#[tokio::test]
async fn test_peer_close_during_request() {
	let tv = Tv::new(Some("k"));
	let (mut session, mut peer) = tv.connected(Some("k")).await;
	peer.close().await.unwrap();

	let err = session.request("ssap://audio/getVolume").await.unwrap_err();
	assert!(err.is_transport(), "got {err:?}");
}

#[tokio::test]
async fn test_response_timeout() {
	let tv = Tv::new(Some("k"));
	let _peer = tv.control_registered(Some("k")).await;
	let mut session = tv.session_with(SessionConfig {
		response_timeout: Duration::from_millis(50),
		..SessionConfig::default()
	});
	session.connect(false).await.unwrap();

	let err = session.request("ssap://audio/getVolume").await.unwrap_err();
	assert!(err.is_timeout());
}

#[tokio::test]
async fn test_reconnect_keeps_counter() {
	let tv = Tv::new(Some("k"));
	let (mut session, mut peer) = tv.connected(Some("k")).await;
	reply(&mut peer, response("cmd_1", json!({}))).await;
	session.request("ssap://audio/getVolume").await.unwrap();

	let mut second = tv.control_registered(Some("k")).await;
	session.connect(false).await.unwrap();
	next_frame(&mut second).await;
	reply(&mut second, response("cmd_2", json!({}))).await;
	session.request("ssap://audio/getVolume").await.unwrap();

	assert_eq!(next_frame(&mut second).await["id"], "cmd_2");
}

#[tokio::test]
async fn test_send_button_opens_input_socket_first() {
	let tv = Tv::new(Some("k"));
	let (mut session, mut peer) = tv.connected(Some("k")).await;
	let mut input = tv.connector.listen(INPUT_URL);
	reply(&mut peer, response("cmd_1", json!({ "socketPath": INPUT_URL }))).await;

	assert!(!session.input_connected());
	session.send_button("HOME").await.unwrap();

	let request = next_frame(&mut peer).await;
	assert_eq!(request["uri"], "ssap://com.webos.service.networkinput/getPointerInputSocket");
	assert_eq!(input.recv().await.unwrap().as_deref(), Some("type:button\nname:HOME\n\n"));
	assert!(session.input_connected());

	// already open: no second lookup, no second dial
	session.connect_input().await.unwrap();
	session.press(ssap_protocol::Button::Back).await.unwrap();
	assert_eq!(input.recv().await.unwrap().as_deref(), Some("type:button\nname:BACK\n\n"));
	assert_eq!(tv.connector.dialed(), vec![CONTROL_URL, INPUT_URL]);
	assert!(peer.try_recv().is_none());
	assert_eq!(session.last_request_id(), 1);
}

#[tokio::test]
async fn test_connect_input_without_socket_path() {
	let tv = Tv::new(Some("k"));
	let (mut session, mut peer) = tv.connected(Some("k")).await;
	reply(&mut peer, response("cmd_1", json!({ "returnValue": true }))).await;

	let err = session.connect_input().await.unwrap_err();
	assert!(matches!(err, Error::Protocol(_)), "got {err:?}");
	assert!(!session.input_connected());
}

#[tokio::test]
async fn test_invalid_button_name_sends_nothing() {
	let tv = Tv::new(Some("k"));
	let (mut session, mut peer) = tv.connected(Some("k")).await;

	let err = session.send_button("UP\nname:HOME").await.unwrap_err();
	assert!(matches!(err, Error::Validation(_)));
	assert!(peer.try_recv().is_none());
	assert_eq!(tv.connector.dialed(), vec![CONTROL_URL]);
}

#[tokio::test]
async fn test_close_releases_both_sockets_and_is_idempotent() {
	let tv = Tv::new(Some("k"));
	let (mut session, mut peer) = tv.connected(Some("k")).await;
	let mut input = tv.connector.listen(INPUT_URL);
	reply(&mut peer, response("cmd_1", json!({ "socketPath": INPUT_URL }))).await;
	session.connect_input().await.unwrap();
	next_frame(&mut peer).await;

	session.close().await.unwrap();

	assert_eq!(input.recv().await.unwrap(), None);
	assert_eq!(peer.recv().await.unwrap(), None);
	assert!(!session.input_connected());
	assert_eq!(session.state(), SessionState::Disconnected);

	session.close().await.unwrap();
	session.disconnect_input().await.unwrap();
}

#[tokio::test]
async fn test_subscription_streams_values() {
	let tv = Tv::new(Some("k"));
	let (mut session, mut peer) = tv.connected(Some("k")).await;
	reply(&mut peer, response("cmd_1", json!({ "volume": 10 }))).await;
	reply(&mut peer, response("cmd_77", json!({ "unrelated": true }))).await;
	reply(&mut peer, response("cmd_1", json!({ "volume": 11 }))).await;
	reply(&mut peer, json!({ "type": "error", "id": "cmd_1", "error": "500 internal" })).await;

	let mut subscription = session.subscribe("ssap://audio/getVolume", json!({})).await.unwrap();
	assert_eq!(subscription.id(), "cmd_1");
	assert_eq!(subscription.next().await.unwrap(), Some(json!({ "volume": 10 })));
	assert_eq!(subscription.next().await.unwrap(), Some(json!({ "volume": 11 })));
	assert_eq!(subscription.next().await.unwrap(), None);
	subscription.unsubscribe().await.unwrap();

	let subscribe = next_frame(&mut peer).await;
	assert_eq!(subscribe["type"], "subscribe");
	assert_eq!(subscribe["id"], "cmd_1");
	let unsubscribe = next_frame(&mut peer).await;
	assert_eq!(unsubscribe["type"], "unsubscribe");
	assert_eq!(unsubscribe["id"], "cmd_1");

	assert_eq!(session.last_request_id(), 1);
}

#[tokio::test]
async fn test_dropped_subscription_is_cancelled_before_next_request() {
	let tv = Tv::new(Some("k"));
	let (mut session, mut peer) = tv.connected(Some("k")).await;
	reply(&mut peer, response("cmd_1", json!({ "volume": 10 }))).await;

	{
		let mut subscription = session.subscribe("ssap://audio/getVolume", json!({})).await.unwrap();
		assert_eq!(subscription.next().await.unwrap(), Some(json!({ "volume": 10 })));
	}

	reply(&mut peer, response("cmd_2", json!({ "muted": false }))).await;
	let value = session.request("ssap://audio/getMute").await.unwrap();
	assert_eq!(value, Some(json!({ "muted": false })));

	assert_eq!(next_frame(&mut peer).await["type"], "subscribe");
	let cancel = next_frame(&mut peer).await;
	assert_eq!(cancel["type"], "unsubscribe");
	assert_eq!(cancel["id"], "cmd_1");
	let request = next_frame(&mut peer).await;
	assert_eq!(request["id"], "cmd_2");
	assert!(peer.try_recv().is_none(), "unsubscribe must be sent once");
}
