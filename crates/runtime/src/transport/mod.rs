//! Text-frame transports for the control and input channels.
//!
//! The session engine only needs three things from a socket: send one text
//! frame, receive the next text frame, close. [`Transport`] captures that, and
//! [`Connector`] opens one from a URL so the session can dial the control
//! channel and, later, whatever input socket path the TV hands out.
//!
//! - [`WebSocketTransport`] / [`WebSocketConnector`]: TLS websocket to a real TV
//! - [`MemoryTransport`] / [`MemoryConnector`]: in-process pairs for tests

#[cfg(test)]
mod tests;

pub mod memory;
pub mod websocket;

use std::future::Future;
use std::pin::Pin;

use crate::error::Result;

pub use memory::{MemoryConnector, MemoryTransport};
pub use websocket::{WebSocketConnector, WebSocketTransport};

/// Boxed future returned by the object-safe transport traits.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// One bidirectional text-frame socket.
pub trait Transport: Send {
	/// Hands one frame to the socket. Success means the bytes were written, not acknowledged.
	fn send(&mut self, frame: String) -> BoxFuture<'_, Result<()>>;

	/// Waits for the next text frame. `Ok(None)` once the peer has closed.
	fn recv(&mut self) -> BoxFuture<'_, Result<Option<String>>>;

	/// Closes the socket. Closing an already closed socket succeeds.
	fn close(&mut self) -> BoxFuture<'_, Result<()>>;
}

/// Opens transports by URL.
pub trait Connector: Send + Sync {
	fn connect<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<Box<dyn Transport>>>;
}
