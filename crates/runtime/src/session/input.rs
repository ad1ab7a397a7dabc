//! Pointer/input sub-channel.
//!
//! The TV hands out a second socket URL through
//! `getPointerInputSocket`. Button presses go there as small text frames and
//! are never answered, so this channel shares no correlation state with the
//! control channel.

use serde_json::Value;
use ssap_protocol::uri;
use ssap_protocol::{Button, button_frame};

use super::Session;
use crate::error::{Error, Result};

impl Session {
	pub fn input_connected(&self) -> bool {
		self.input.is_some()
	}

	/// Asks the TV for the pointer socket and dials it. No-op when already open.
	pub async fn connect_input(&mut self) -> Result<()> {
		if self.input.is_some() {
			tracing::debug!("input socket already connected");
			return Ok(());
		}

		let response = self.request(uri::input::GET_POINTER_INPUT_SOCKET).await?;
		let socket_path = response
			.as_ref()
			.and_then(|payload| payload.get("socketPath"))
			.and_then(Value::as_str)
			.ok_or_else(|| Error::Protocol("TV did not return an input socket path".to_string()))?
			.to_string();

		tracing::info!(socket = %socket_path, "connecting input socket");
		let transport = self.connector.connect(&socket_path).await?;
		self.input = Some(transport);
		Ok(())
	}

	/// Presses the button named `name`, opening the input socket on first use.
	pub async fn send_button(&mut self, name: &str) -> Result<()> {
		if name.is_empty() || name.contains(['\n', '\r', ':']) {
			return Err(Error::Validation(format!("invalid button name: {name:?}")));
		}

		if self.input.is_none() {
			self.connect_input().await?;
		}
		let input = self.input.as_mut().ok_or(Error::NotConnected)?;
		input.send(button_frame(name)).await?;

		tracing::debug!(button = name, "sent button");
		Ok(())
	}

	pub async fn press(&mut self, button: Button) -> Result<()> {
		self.send_button(button.as_str()).await
	}

	/// Closes the input socket if one is open.
	pub async fn disconnect_input(&mut self) -> Result<()> {
		match self.input.take() {
			Some(mut input) => {
				tracing::info!("closing input socket");
				input.close().await
			}
			None => Ok(()),
		}
	}
}
