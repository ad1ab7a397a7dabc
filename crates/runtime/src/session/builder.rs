//! Builder for [`Session`].

use std::sync::Arc;

use super::{Session, SessionState};
use crate::config::SessionConfig;
use crate::credential::{CredentialStore, MemoryCredentialStore};
use crate::error::Result;
use crate::transport::{Connector, WebSocketConnector};

/// Configures a [`Session`] before it is connected.
///
/// ```ignore
/// let session = Session::builder("192.168.0.5")
///     .client_key(settings.client_key.clone())
///     .store(Arc::new(env_store))
///     .build()?;
/// ```
pub struct SessionBuilder {
	ip: String,
	config: SessionConfig,
	connector: Option<Arc<dyn Connector>>,
	store: Option<Arc<dyn CredentialStore>>,
	client_key: Option<Option<String>>,
}

impl SessionBuilder {
	pub(super) fn new(ip: impl Into<String>) -> Self {
		Self {
			ip: ip.into(),
			config: SessionConfig::default(),
			connector: None,
			store: None,
			client_key: None,
		}
	}

	pub fn config(mut self, config: SessionConfig) -> Self {
		self.config = config;
		self
	}

	/// Replaces the default TLS websocket connector.
	pub fn connector(mut self, connector: Arc<dyn Connector>) -> Self {
		self.connector = Some(connector);
		self
	}

	/// Where newly issued credentials are saved.
	pub fn store(mut self, store: Arc<dyn CredentialStore>) -> Self {
		self.store = Some(store);
		self
	}

	/// Uses this credential instead of asking the store.
	///
	/// `None` here means "known to have no credential", which differs from
	/// not calling this method at all.
	pub fn client_key(mut self, client_key: Option<String>) -> Self {
		self.client_key = Some(client_key.filter(|key| !key.is_empty()));
		self
	}

	pub fn build(self) -> Result<Session> {
		let store = self.store.unwrap_or_else(|| Arc::new(MemoryCredentialStore::default()));
		let client_key = match self.client_key {
			Some(explicit) => explicit,
			None => store.load()?,
		};
		let connector = self
			.connector
			.unwrap_or_else(|| Arc::new(WebSocketConnector::new(&self.config)));

		Ok(Session {
			ip: self.ip,
			config: self.config,
			connector,
			store,
			client_key,
			state: SessionState::Disconnected,
			control: None,
			input: None,
			last_id: 0,
			abandoned: Vec::new(),
		})
	}
}
