//! Session tuning knobs.

use std::time::Duration;

/// Default SSAP port for the secured control channel.
pub const DEFAULT_PORT: u16 = 3001;

/// Timeouts and keep-alive settings for a [`Session`](crate::Session).
///
/// The control channel is a mostly idle remote-control link; keep-alive
/// pings default to once every ten minutes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
	pub port: u16,
	/// Upper bound for opening either socket (TCP + TLS + websocket upgrade).
	pub connect_timeout: Duration,
	/// Idle time after which a websocket ping is sent.
	pub ping_interval: Duration,
	/// How long an unanswered ping may stay outstanding before the socket is declared dead.
	pub ping_timeout: Duration,
	/// Per-read wait during registration. A human may have to accept a prompt on the TV.
	pub pairing_read_timeout: Duration,
	/// Optional ceiling for the whole registration loop.
	pub pairing_deadline: Option<Duration>,
	/// Wait for the single response frame of a request.
	pub response_timeout: Duration,
}

impl Default for SessionConfig {
	fn default() -> Self {
		Self {
			port: DEFAULT_PORT,
			connect_timeout: Duration::from_secs(10),
			ping_interval: Duration::from_secs(600),
			ping_timeout: Duration::from_secs(600),
			pairing_read_timeout: Duration::from_secs(60),
			pairing_deadline: None,
			response_timeout: Duration::from_secs(30),
		}
	}
}

impl SessionConfig {
	/// `wss://` URL of the control channel on `ip`.
	pub fn control_url(&self, ip: &str) -> String {
		if ip.contains(':') && !ip.starts_with('[') {
			format!("wss://[{ip}]:{}", self.port)
		} else {
			format!("wss://{ip}:{}", self.port)
		}
	}
}
