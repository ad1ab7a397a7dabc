//! Registration handshake.
//!
//! `register_0` goes out once; frames are then read until the TV answers
//! `registered` or `error`. Anything else (the TV sometimes sends a
//! `response` with `pairingType` before showing the prompt) is skipped.

use ssap_protocol::{InboundKind, Outbound, RegisterPayload};
use tokio::time::Instant;

use super::{Session, SessionState};
use crate::error::{Error, Result};

impl Session {
	pub(super) async fn register(&mut self, force_repair: bool) -> Result<()> {
		let payload = RegisterPayload::new(self.client_key.as_deref(), force_repair);
		if payload.is_prompting() {
			tracing::info!("requesting pairing prompt: accept the connection on the TV");
		} else {
			tracing::info!("pairing with saved client key");
		}

		self.send_control(&Outbound::register(serde_json::to_value(&payload)?)).await?;
		self.state = SessionState::AwaitingRegistration;

		let deadline = self.config.pairing_deadline.map(|ceiling| Instant::now() + ceiling);

		loop {
			let mut wait = self.config.pairing_read_timeout;
			if let Some(deadline) = deadline {
				let remaining = deadline.saturating_duration_since(Instant::now());
				if remaining.is_zero() {
					return Err(Error::Timeout("pairing was not completed before the deadline".to_string()));
				}
				wait = wait.min(remaining);
			}

			let frame = self.recv_control(Some(wait), "registration").await?;

			match frame.kind {
				InboundKind::Registered => {
					if let Some(issued) = frame.client_key() {
						self.adopt_client_key(issued);
					}
					return Ok(());
				}
				InboundKind::Error => {
					let message = frame.error_text();
					tracing::warn!(error = %message, "registration rejected");
					if frame.mentions_permissions() {
						return Err(Error::Permission { uri: None, message });
					}
					return Err(Error::RegistrationFailed(message));
				}
				_ => {
					tracing::debug!(kind = ?frame.kind, "ignoring frame while awaiting registration");
				}
			}
		}
	}

	/// Persists and adopts a credential the TV issued, unless it is the one held.
	///
	/// A failed save is logged, not returned: the TV has accepted the key, so
	/// it stays valid for this session even if it cannot be stored.
	fn adopt_client_key(&mut self, issued: &str) {
		if self.client_key.as_deref() == Some(issued) {
			return;
		}

		match self.store.save(issued) {
			Ok(()) => tracing::info!("stored new client key"),
			Err(e) => tracing::warn!(error = %e, "could not persist new client key"),
		}
		self.client_key = Some(issued.to_string());
	}
}
