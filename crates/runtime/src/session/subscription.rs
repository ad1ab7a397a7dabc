//! Streaming subscriptions.
//!
//! A `subscribe` frame makes the TV push a response under the same id every
//! time the watched value changes. [`Subscription`] borrows the session
//! mutably for as long as it lives, so no request can interleave with the
//! pushes. Values are pulled lazily with [`Subscription::next`]; wrap that
//! call in `tokio::time::timeout` to bound the wait.
//!
//! End a subscription with [`Subscription::unsubscribe`]. Dropping it instead
//! only queues the `unsubscribe`, which goes out ahead of the next request.
//! Pushes the TV already sent before that arrive as responses to that request
//! and fail it with [`Error::ProtocolDesync`].

use serde_json::Value;
use ssap_protocol::{InboundKind, Outbound};

use super::Session;
use crate::error::{Error, Result};

/// Live `subscribe` request. Call [`unsubscribe`](Self::unsubscribe) when done.
pub struct Subscription<'a> {
	session: &'a mut Session,
	id: String,
	uri: String,
	closed: bool,
}

impl Session {
	/// Sends a `subscribe` frame and returns the stream of pushed values.
	pub async fn subscribe(&mut self, uri: &str, payload: Value) -> Result<Subscription<'_>> {
		self.ensure_registered()?;
		self.cancel_abandoned().await?;
		let id = self.next_request_id();
		tracing::debug!(id = %id, uri, "opening subscription");
		self.send_control(&Outbound::request(id.clone(), uri, payload, true)).await?;

		Ok(Subscription {
			session: self,
			id,
			uri: uri.to_string(),
			closed: false,
		})
	}
}

impl Subscription<'_> {
	pub fn id(&self) -> &str {
		&self.id
	}

	pub fn uri(&self) -> &str {
		&self.uri
	}

	/// Waits for the next value pushed for this subscription.
	///
	/// Frames for other ids are skipped. An error frame for this id yields
	/// `Ok(None)`, or [`Error::Permission`] when it is about permissions.
	pub async fn next(&mut self) -> Result<Option<Value>> {
		loop {
			let frame = self.session.recv_control(None, &self.uri).await?;
			if frame.id.as_deref() != Some(self.id.as_str()) {
				tracing::debug!(id = ?frame.id, subscription = %self.id, "skipping frame for another id");
				continue;
			}

			if frame.kind == InboundKind::Error {
				if frame.mentions_permissions() {
					return Err(Error::Permission {
						uri: Some(self.uri.clone()),
						message: frame.error_text(),
					});
				}
				return Ok(None);
			}

			return Ok(Some(frame.into_payload()));
		}
	}

	/// Tells the TV to stop pushing and releases the session.
	pub async fn unsubscribe(mut self) -> Result<()> {
		tracing::debug!(id = %self.id, uri = %self.uri, "closing subscription");
		self.closed = true;
		let id = std::mem::take(&mut self.id);
		self.session.send_control(&Outbound::unsubscribe(id)).await
	}
}

impl Drop for Subscription<'_> {
	fn drop(&mut self) {
		if !self.closed {
			tracing::debug!(id = %self.id, uri = %self.uri, "subscription dropped; unsubscribe deferred");
			self.session.abandoned.push(std::mem::take(&mut self.id));
		}
	}
}
