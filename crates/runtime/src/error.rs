//! Error types for the SSAP runtime.

use thiserror::Error;

/// Result type alias for runtime operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while talking to a webOS TV.
#[derive(Debug, Error)]
pub enum Error {
	/// The socket could not be opened (refused, TLS failure, bad URL).
	#[error("Failed to connect to {url}: {reason}")]
	ConnectionFailed { url: String, reason: String },

	/// A socket read or write failed after the connection was established.
	#[error("Transport error: {0}")]
	Transport(String),

	/// The peer closed the socket.
	#[error("Channel closed unexpectedly")]
	ChannelClosed,

	/// An operation needed the control channel before `connect` succeeded.
	#[error("Not connected: call connect() first")]
	NotConnected,

	/// The TV rejected the registration handshake.
	#[error("Registration failed: {0}")]
	RegistrationFailed(String),

	/// The TV refused a capability this client asked for.
	#[error(
		"Insufficient permissions{}: {message}",
		uri.as_deref().map(|u| format!(" for {u}")).unwrap_or_default()
	)]
	Permission { uri: Option<String>, message: String },

	/// Local input outside the accepted range; nothing was sent.
	#[error("Invalid argument: {0}")]
	Validation(String),

	/// The response id did not match the request that was just sent.
	#[error("Protocol desync: expected response '{expected}', received '{received}'")]
	ProtocolDesync { expected: String, received: String },

	/// A frame was well-formed JSON but not what the protocol step required.
	#[error("Protocol error: {0}")]
	Protocol(String),

	/// A bounded wait ran out.
	#[error("Timeout: {0}")]
	Timeout(String),

	/// Loading or persisting the pairing credential failed.
	#[error("Credential store error: {0}")]
	Credential(String),

	#[error("I/O error: {0}")]
	Io(#[from] std::io::Error),

	#[error("JSON error: {0}")]
	Json(#[from] serde_json::Error),
}

impl Error {
	/// Returns true if the TV rejected a permission; re-pairing is required.
	pub fn is_permission(&self) -> bool {
		matches!(self, Error::Permission { .. })
	}

	/// Returns true if the session lost request/response alignment.
	pub fn is_desync(&self) -> bool {
		matches!(self, Error::ProtocolDesync { .. })
	}

	pub fn is_timeout(&self) -> bool {
		matches!(self, Error::Timeout(_))
	}

	/// Returns true for failures of the socket itself rather than of a command.
	pub fn is_transport(&self) -> bool {
		matches!(
			self,
			Error::ConnectionFailed { .. } | Error::Transport(_) | Error::ChannelClosed | Error::NotConnected
		)
	}
}

impl From<tokio_tungstenite::tungstenite::Error> for Error {
	fn from(err: tokio_tungstenite::tungstenite::Error) -> Self {
		use tokio_tungstenite::tungstenite::Error as WsError;
		match err {
			WsError::ConnectionClosed | WsError::AlreadyClosed => Error::ChannelClosed,
			other => Error::Transport(other.to_string()),
		}
	}
}
