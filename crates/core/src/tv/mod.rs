//! [`Tv`] typed command surface.
//!
//! Every method is a thin caller of [`Session::invoke`] with a fixed SSAP URI
//! and payload shape. Results are returned as raw JSON: the TV's schemas vary
//! between firmware releases, so no typed decoding is attempted.

mod apps;
mod audio;
mod channels;
mod media;
mod navigation;
mod power;


pub use audio::MAX_VOLUME;

use serde_json::Value;
use ssap_runtime::{Result, Session, Subscription};

/// A paired webOS TV.
///
/// Wraps one [`Session`]. Methods take `&mut self` because the control channel
/// handles one request at a time.
pub struct Tv {
	session: Session,
}

impl Tv {
	pub fn new(session: Session) -> Self {
		Self { session }
	}

	/// Opens the control channel and pairs. See [`Session::connect`].
	pub async fn connect(&mut self, force_repair: bool) -> Result<()> {
		self.session.connect(force_repair).await
	}

	/// Sends an arbitrary SSAP request.
	pub async fn invoke(&mut self, uri: &str, payload: Value, subscribe: bool) -> Result<Option<Value>> {
		self.session.invoke(uri, payload, subscribe).await
	}

	pub async fn subscribe(&mut self, uri: &str, payload: Value) -> Result<Subscription<'_>> {
		self.session.subscribe(uri, payload).await
	}

	/// Closes the input and control sockets.
	pub async fn close(&mut self) -> Result<()> {
		self.session.close().await
	}

	pub fn session(&self) -> &Session {
		&self.session
	}

	pub fn session_mut(&mut self) -> &mut Session {
		&mut self.session
	}

	pub fn into_session(self) -> Session {
		self.session
	}

	async fn call(&mut self, uri: &str) -> Result<Option<Value>> {
		self.session.request(uri).await
	}

	async fn call_with(&mut self, uri: &str, payload: Value) -> Result<Option<Value>> {
		self.session.invoke(uri, payload, false).await
	}
}
