//! SSAP session engine.
//!
//! A [`Session`] owns the control channel to one TV, performs the pairing
//! handshake, and correlates each request with the single response frame that
//! follows it.
//!
//! # Message Flow
//!
//! 1. [`Session::connect`] dials `wss://<ip>:3001` and sends `register_0`
//! 2. Frames are read until `registered` or `error` (see `handshake.rs`)
//! 3. [`Session::invoke`] bumps the request counter, sends `cmd_<n>`
//! 4. Exactly one frame is read back and must carry `cmd_<n>`
//!
//! The protocol is strict ping-pong per channel. There is no pending-request
//! table: a response is matched against the id just sent and nothing else.
//! `invoke` takes `&mut self`, so the compiler rejects a second request while
//! one is still in flight. Run independent commands in parallel by opening
//! separate sessions.

#[cfg(test)]
mod tests;

mod builder;
mod handshake;
mod input;
mod subscription;

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use ssap_protocol::{Inbound, InboundKind, Outbound, request_id};

pub use builder::SessionBuilder;
pub use subscription::Subscription;

use crate::config::SessionConfig;
use crate::credential::CredentialStore;
use crate::error::{Error, Result};
use crate::transport::{Connector, Transport};

/// Lifecycle of the control channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
	Disconnected,
	SocketOpen,
	AwaitingRegistration,
	Registered,
	Failed,
}

/// Connection to one webOS TV.
pub struct Session {
	ip: String,
	config: SessionConfig,
	connector: Arc<dyn Connector>,
	store: Arc<dyn CredentialStore>,
	client_key: Option<String>,
	state: SessionState,
	control: Option<Box<dyn Transport>>,
	input: Option<Box<dyn Transport>>,
	/// Last issued request number. Never reset, including across reconnects.
	last_id: u64,
	/// Subscriptions dropped without `unsubscribe`; cancelled before the next request.
	abandoned: Vec<String>,
}

impl Session {
	pub fn builder(ip: impl Into<String>) -> SessionBuilder {
		SessionBuilder::new(ip)
	}

	pub fn ip(&self) -> &str {
		&self.ip
	}

	pub fn state(&self) -> SessionState {
		self.state
	}

	pub fn is_registered(&self) -> bool {
		self.state == SessionState::Registered
	}

	/// Credential currently held (loaded, passed in, or issued by the TV).
	pub fn client_key(&self) -> Option<&str> {
		self.client_key.as_deref()
	}

	/// Number of the most recent request; `0` before the first one.
	pub fn last_request_id(&self) -> u64 {
		self.last_id
	}

	pub fn config(&self) -> &SessionConfig {
		&self.config
	}

	/// Opens the control channel and pairs.
	///
	/// With a held credential and `force_repair == false` the TV accepts the
	/// client silently. Otherwise it shows an accept prompt, and this call
	/// waits (bounded per read by `pairing_read_timeout`) for the user.
	pub async fn connect(&mut self, force_repair: bool) -> Result<()> {
		if self.control.is_some() {
			tracing::debug!("reconnecting: closing existing sockets");
			if let Err(e) = self.close().await {
				tracing::warn!(error = %e, "failed to close previous sockets");
			}
		}

		let url = self.config.control_url(&self.ip);
		tracing::info!(url = %url, "connecting to TV");

		let transport = match self.connector.connect(&url).await {
			Ok(transport) => transport,
			Err(e) => {
				self.state = SessionState::Failed;
				return Err(e);
			}
		};
		self.control = Some(transport);
		self.state = SessionState::SocketOpen;

		match self.register(force_repair).await {
			Ok(()) => {
				self.state = SessionState::Registered;
				tracing::info!(ip = %self.ip, "registered with TV");
				Ok(())
			}
			Err(e) => {
				if let Some(mut control) = self.control.take() {
					if let Err(close_err) = control.close().await {
						tracing::debug!(error = %close_err, "failed to close rejected control socket");
					}
				}
				self.state = SessionState::Failed;
				Err(e)
			}
		}
	}

	/// Sends one request and returns the payload of its response.
	///
	/// - `Ok(Some(value))`: the `payload` field, or the whole frame if absent
	/// - `Ok(None)`: the TV answered with an error unrelated to permissions
	/// - `Err(Error::Permission)`: the TV refused the capability behind `uri`
	/// - `Err(Error::ProtocolDesync)`: the frame belonged to another request;
	///   its payload is discarded and the session should be re-created
	///
	/// With `subscribe == true` the frame type is `subscribe` and only the
	/// first pushed value is returned. Use [`Session::subscribe`] to keep
	/// consuming pushes.
	pub async fn invoke(&mut self, uri: &str, payload: Value, subscribe: bool) -> Result<Option<Value>> {
		self.ensure_registered()?;
		self.cancel_abandoned().await?;
		let id = self.next_request_id();
		let frame = Outbound::request(id.clone(), uri, payload, subscribe);

		tracing::debug!(id = %id, uri, subscribe, "sending request");
		self.send_control(&frame).await?;

		let response = self.recv_control(Some(self.config.response_timeout), uri).await?;
		interpret_response(uri, &id, response)
	}

	/// [`invoke`](Self::invoke) without a payload.
	pub async fn request(&mut self, uri: &str) -> Result<Option<Value>> {
		self.invoke(uri, Value::Object(Default::default()), false).await
	}

	/// Closes the input socket, then the control socket.
	///
	/// Either may already be absent. Safe to call repeatedly. Both sockets are
	/// always released; the first close error, if any, is returned.
	pub async fn close(&mut self) -> Result<()> {
		let input_result = self.disconnect_input().await;

		let control_result = match self.control.take() {
			Some(mut control) => {
				tracing::info!(ip = %self.ip, "closing control socket");
				control.close().await
			}
			None => Ok(()),
		};

		self.state = SessionState::Disconnected;
		self.abandoned.clear();
		input_result.and(control_result)
	}

	/// Requests are only valid on a paired control channel; `Failed` is terminal
	/// until the next [`connect`](Self::connect).
	fn ensure_registered(&self) -> Result<()> {
		match self.state {
			SessionState::Registered => Ok(()),
			_ => Err(Error::NotConnected),
		}
	}

	/// Sends the `unsubscribe` owed for every dropped [`Subscription`].
	async fn cancel_abandoned(&mut self) -> Result<()> {
		for id in std::mem::take(&mut self.abandoned) {
			tracing::debug!(id = %id, "cancelling dropped subscription");
			self.send_control(&Outbound::unsubscribe(id)).await?;
		}
		Ok(())
	}

	fn next_request_id(&mut self) -> String {
		self.last_id += 1;
		request_id(self.last_id)
	}

	async fn send_control(&mut self, frame: &Outbound) -> Result<()> {
		let text = frame.to_json()?;
		let control = self.control.as_mut().ok_or(Error::NotConnected)?;
		control.send(text).await
	}

	/// Reads the next control frame, bounded by `wait` when given.
	async fn recv_control(&mut self, wait: Option<Duration>, waiting_for: &str) -> Result<Inbound> {
		let control = self.control.as_mut().ok_or(Error::NotConnected)?;

		let received = match wait {
			Some(wait) => tokio::time::timeout(wait, control.recv())
				.await
				.map_err(|_| Error::Timeout(format!("no response for {waiting_for} within {wait:?}")))?,
			None => control.recv().await,
		};

		let text = received?.ok_or(Error::ChannelClosed)?;
		tracing::debug!(frame = %text, "received frame");
		Ok(Inbound::parse(&text)?)
	}
}

/// Applies the single-response rules to the frame read after request `expected`.
fn interpret_response(uri: &str, expected: &str, response: Inbound) -> Result<Option<Value>> {
	if response.id.as_deref() != Some(expected) {
		let received = response.id.unwrap_or_default();
		tracing::warn!(expected, received = %received, uri, "response id mismatch");
		return Err(Error::ProtocolDesync {
			expected: expected.to_string(),
			received,
		});
	}

	if response.kind == InboundKind::Error {
		if response.mentions_permissions() {
			return Err(Error::Permission {
				uri: Some(uri.to_string()),
				message: response.error_text(),
			});
		}
		tracing::debug!(uri, error = %response.error_text(), "TV returned an error; no data");
		return Ok(None);
	}

	Ok(Some(response.into_payload()))
}
