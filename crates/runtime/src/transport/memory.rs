//! In-process transports.
//!
//! [`MemoryTransport::pair`] returns two connected ends; whatever one end
//! sends the other receives. [`MemoryConnector`] hands out pre-registered ends
//! by URL and records every dial, which lets tests play the TV side of both
//! the control and the input channel without a network.

use std::collections::{HashMap, VecDeque};

use parking_lot::Mutex;
use tokio::sync::mpsc;

use super::{BoxFuture, Connector, Transport};
use crate::error::{Error, Result};

/// One end of an in-memory text-frame pipe.
#[derive(Debug)]
pub struct MemoryTransport {
	tx: Option<mpsc::UnboundedSender<String>>,
	rx: mpsc::UnboundedReceiver<String>,
}

impl MemoryTransport {
	pub fn pair() -> (Self, Self) {
		let (a_tx, b_rx) = mpsc::unbounded_channel();
		let (b_tx, a_rx) = mpsc::unbounded_channel();
		(Self { tx: Some(a_tx), rx: a_rx }, Self { tx: Some(b_tx), rx: b_rx })
	}

	/// Returns a frame that is already waiting, without blocking.
	pub fn try_recv(&mut self) -> Option<String> {
		self.rx.try_recv().ok()
	}

	pub fn is_closed(&self) -> bool {
		self.tx.is_none()
	}
}

impl Transport for MemoryTransport {
	fn send(&mut self, frame: String) -> BoxFuture<'_, Result<()>> {
		Box::pin(async move {
			let tx = self.tx.as_ref().ok_or(Error::ChannelClosed)?;
			tx.send(frame).map_err(|_| Error::ChannelClosed)
		})
	}

	fn recv(&mut self) -> BoxFuture<'_, Result<Option<String>>> {
		Box::pin(async move { Ok(self.rx.recv().await) })
	}

	fn close(&mut self) -> BoxFuture<'_, Result<()>> {
		Box::pin(async move {
			self.tx = None;
			self.rx.close();
			Ok(())
		})
	}
}

/// Connector serving [`MemoryTransport`] ends registered per URL.
#[derive(Debug, Default)]
pub struct MemoryConnector {
	endpoints: Mutex<HashMap<String, VecDeque<MemoryTransport>>>,
	dialed: Mutex<Vec<String>>,
}

impl MemoryConnector {
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers one connection for `url` and returns the peer (TV) end.
	///
	/// Each call queues one more connection; each dial consumes one.
	pub fn listen(&self, url: &str) -> MemoryTransport {
		let (client, peer) = MemoryTransport::pair();
		self.endpoints.lock().entry(url.to_string()).or_default().push_back(client);
		peer
	}

	/// URLs dialed so far, in order.
	pub fn dialed(&self) -> Vec<String> {
		self.dialed.lock().clone()
	}
}

impl Connector for MemoryConnector {
	fn connect<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<Box<dyn Transport>>> {
		Box::pin(async move {
			self.dialed.lock().push(url.to_string());
			let client = self.endpoints.lock().get_mut(url).and_then(VecDeque::pop_front);
			match client {
				Some(client) => Ok(Box::new(client) as Box<dyn Transport>),
				None => Err(Error::ConnectionFailed {
					url: url.to_string(),
					reason: "connection refused".to_string(),
				}),
			}
		})
	}
}
