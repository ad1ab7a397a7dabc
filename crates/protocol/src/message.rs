//! Control channel frames.
//!
//! Outbound frames are always `{"type", "id", "uri"?, "payload"}`. Inbound
//! frames are loosely shaped (the TV adds fields per command), so [`Inbound`]
//! keeps the raw JSON and exposes typed accessors over it.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Id used for the one registration frame of a connection.
pub const REGISTER_ID: &str = "register_0";

/// Builds the correlation id for the `n`th request of a session.
pub fn request_id(n: u64) -> String {
	format!("cmd_{n}")
}

/// Frame type of an outbound message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutboundKind {
	Register,
	Request,
	Subscribe,
	Unsubscribe,
}

/// Message sent from the client to the TV on the control channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outbound {
	#[serde(rename = "type")]
	pub kind: OutboundKind,
	pub id: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub uri: Option<String>,
	pub payload: Value,
}

impl Outbound {
	/// Registration frame carrying the pairing payload.
	pub fn register(payload: Value) -> Self {
		Self {
			kind: OutboundKind::Register,
			id: REGISTER_ID.to_string(),
			uri: None,
			payload,
		}
	}

	/// Command frame; `subscribe` switches the frame type to `subscribe`.
	pub fn request(id: String, uri: &str, payload: Value, subscribe: bool) -> Self {
		Self {
			kind: if subscribe { OutboundKind::Subscribe } else { OutboundKind::Request },
			id,
			uri: Some(uri.to_string()),
			payload,
		}
	}

	/// Ends the subscription previously opened under `id`.
	pub fn unsubscribe(id: String) -> Self {
		Self {
			kind: OutboundKind::Unsubscribe,
			id,
			uri: None,
			payload: Value::Object(Default::default()),
		}
	}

	pub fn to_json(&self) -> serde_json::Result<String> {
		serde_json::to_string(self)
	}
}

/// Frame type of an inbound message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundKind {
	Registered,
	Response,
	Error,
	/// Any other frame type (auxiliary frames, future additions).
	Other(String),
}

impl InboundKind {
	fn from_type(kind: Option<&str>) -> Self {
		match kind {
			Some("registered") => Self::Registered,
			Some("response") => Self::Response,
			Some("error") => Self::Error,
			Some(other) => Self::Other(other.to_string()),
			None => Self::Other(String::new()),
		}
	}
}

/// Message received from the TV on the control channel.
#[derive(Debug, Clone, PartialEq)]
pub struct Inbound {
	pub kind: InboundKind,
	pub id: Option<String>,
	raw: Value,
}

impl Inbound {
	pub fn parse(text: &str) -> serde_json::Result<Self> {
		let raw: Value = serde_json::from_str(text)?;
		Ok(Self::from_value(raw))
	}

	pub fn from_value(raw: Value) -> Self {
		let kind = InboundKind::from_type(raw.get("type").and_then(Value::as_str));
		let id = raw.get("id").and_then(Value::as_str).map(str::to_string);
		Self { kind, id, raw }
	}

	pub fn raw(&self) -> &Value {
		&self.raw
	}

	pub fn payload(&self) -> Option<&Value> {
		self.raw.get("payload")
	}

	/// The `payload` field, or the whole frame when the TV sent none.
	pub fn into_payload(mut self) -> Value {
		let payload = self.raw.get_mut("payload").map(Value::take);
		match payload {
			Some(payload) => payload,
			None => self.raw,
		}
	}

	/// `client-key` issued in a `registered` frame.
	pub fn client_key(&self) -> Option<&str> {
		self.payload()?.get("client-key")?.as_str()
	}

	/// Human readable error text: the `error` field when present, else the frame.
	pub fn error_text(&self) -> String {
		match self.raw.get("error").and_then(Value::as_str) {
			Some(text) => text.to_string(),
			None => self.raw.to_string(),
		}
	}

	/// True when any part of the frame talks about permissions.
	pub fn mentions_permissions(&self) -> bool {
		self.raw.to_string().to_lowercase().contains("permission")
	}
}
